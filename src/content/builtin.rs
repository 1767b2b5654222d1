//! Documentation compiled into the binary.
//!
//! Bodies live in `assets/sections/` and are embedded with `include_str!`.
//! The table order is the sidebar order.

use super::Section;

/// `(id, title, body)` in display order.
const BUILTIN_SECTIONS: &[(&str, &str, &str)] = &[
    (
        "introduction",
        "Introduction",
        include_str!("../../assets/sections/introduction.md"),
    ),
    (
        "basic-setup",
        "Basic Setup",
        include_str!("../../assets/sections/basic-setup.md"),
    ),
    (
        "starting-project",
        "Starting a Project",
        include_str!("../../assets/sections/starting-project.md"),
    ),
    (
        "daily-workflow",
        "Daily Workflow",
        include_str!("../../assets/sections/daily-workflow.md"),
    ),
    (
        "branching",
        "Branching Strategies",
        include_str!("../../assets/sections/branching.md"),
    ),
    (
        "merging",
        "Merging & Conflicts",
        include_str!("../../assets/sections/merging.md"),
    ),
    (
        "remote-operations",
        "Remote Operations",
        include_str!("../../assets/sections/remote-operations.md"),
    ),
    (
        "pull-requests",
        "Pull Requests",
        include_str!("../../assets/sections/pull-requests.md"),
    ),
    (
        "emergencies",
        "Emergency Scenarios",
        include_str!("../../assets/sections/emergencies.md"),
    ),
    (
        "advanced",
        "Advanced Scenarios",
        include_str!("../../assets/sections/advanced.md"),
    ),
    (
        "team-workflows",
        "Team Workflows",
        include_str!("../../assets/sections/team-workflows.md"),
    ),
    (
        "troubleshooting",
        "Troubleshooting",
        include_str!("../../assets/sections/troubleshooting.md"),
    ),
    (
        "best-practices",
        "Best Practices",
        include_str!("../../assets/sections/best-practices.md"),
    ),
    (
        "jenkins-cli",
        "Jenkins CLI",
        include_str!("../../assets/sections/jenkins-cli.md"),
    ),
];

/// Build the built-in sections.
///
/// Asset files end with a newline; it is dropped so the last line of a
/// section does not render as an extra blank.
pub(super) fn sections() -> Vec<Section> {
    BUILTIN_SECTIONS
        .iter()
        .map(|(id, title, body)| Section::new(*id, *title, body.trim_end_matches('\n')))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use crate::markdown::{render, RenderNode};
    use std::collections::HashSet;

    #[test]
    fn test_builtin_section_order() {
        let ids: Vec<_> = sections().into_iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 14);
        assert_eq!(ids.first().map(String::as_str), Some("introduction"));
        assert_eq!(ids.last().map(String::as_str), Some("jenkins-cli"));
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let all = sections();
        let unique: HashSet<_> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(unique.len(), all.len());
        assert!(ContentStore::new(all.clone()).is_ok());
    }

    #[test]
    fn test_builtin_bodies_are_not_empty() {
        for section in sections() {
            assert!(!section.raw_text.trim().is_empty(), "{} is empty", section.id);
            assert!(!section.raw_text.ends_with('\n'), "{} ends with newline", section.id);
        }
    }

    #[test]
    fn test_builtin_sections_start_with_title_heading() {
        for section in sections() {
            let nodes = render(&section.raw_text);
            assert!(
                matches!(nodes.first(), Some(RenderNode::Heading { .. })),
                "{} does not open with a heading",
                section.id
            );
        }
    }

    #[test]
    fn test_builtin_fences_are_closed() {
        for section in sections() {
            let markers = section
                .raw_text
                .lines()
                .filter(|l| l.trim_start().starts_with("```"))
                .count();
            assert_eq!(markers % 2, 0, "{} has an unclosed fence", section.id);

            let blocks = render(&section.raw_text)
                .iter()
                .filter(|n| matches!(n, RenderNode::CodeBlock { .. }))
                .count();
            assert_eq!(blocks, markers / 2, "{}", section.id);
        }
    }

    #[test]
    fn test_builtin_search_finds_merge_sections() {
        let store = ContentStore::builtin();
        let hits: Vec<_> = store.filter("merge").iter().map(|s| s.id.clone()).collect();
        assert!(hits.contains(&"merging".to_string()));
        assert!(store.filter("no-such-git-command-xyz").is_empty());
    }

    #[test]
    fn test_jenkins_section_contains_api_calls() {
        let store = ContentStore::builtin();
        let jenkins = store.get("jenkins-cli").unwrap();
        assert!(jenkins.matches("lastBuiltRevision"));
        assert!(jenkins.matches("JENKINS_TOKEN"));
    }
}
