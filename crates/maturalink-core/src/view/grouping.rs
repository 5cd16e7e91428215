//! Two-level grouping of arguments by subject and macroargument.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::ArgumentDetail;

/// Bucket name for arguments without a macroargument.
pub const NO_MACROARGUMENT: &str = "No Macroargument";

/// Nesting order of the grouped view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupMode {
    /// subject → macroargument → arguments
    #[default]
    #[serde(rename = "subject-macro")]
    SubjectMacro,
    /// macroargument → subject → arguments
    #[serde(rename = "macro-subject")]
    MacroSubject,
}

impl GroupMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupMode::SubjectMacro => "subject-macro",
            GroupMode::MacroSubject => "macro-subject",
        }
    }
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subject-macro" => Ok(GroupMode::SubjectMacro),
            "macro-subject" => Ok(GroupMode::MacroSubject),
            other => Err(Error::Validation(format!(
                "unknown grouping '{other}', expected subject-macro or macro-subject"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedView {
    pub by: GroupMode,
    pub groups: Vec<OuterGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OuterGroup {
    pub key: String,
    pub groups: Vec<InnerGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InnerGroup {
    pub key: String,
    pub arguments: Vec<GroupedArgument>,
}

/// An argument as placed in one bucket, carrying only the links that
/// belong to that bucket's macroargument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedArgument {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub links: Vec<GroupedLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedLink {
    pub id: i64,
    pub description: String,
}

type Buckets = BTreeMap<String, BTreeMap<String, Vec<GroupedArgument>>>;

/// Group arguments into an ordered two-level view.
///
/// An argument linked to several macroarguments appears once per
/// macroargument; one with no links lands in [`NO_MACROARGUMENT`].
pub fn group_arguments(arguments: &[ArgumentDetail], mode: GroupMode) -> GroupedView {
    let mut buckets: Buckets = BTreeMap::new();

    for arg in arguments {
        let subject = arg.subject.name.clone();
        for macro_name in macro_names(arg) {
            let (outer, inner) = match mode {
                GroupMode::SubjectMacro => (subject.clone(), macro_name.clone()),
                GroupMode::MacroSubject => (macro_name.clone(), subject.clone()),
            };
            let entries = buckets.entry(outer).or_default().entry(inner).or_default();
            // Two links to the same macroargument place the argument once.
            if entries.iter().any(|e| e.id == arg.id()) {
                continue;
            }
            entries.push(placed(arg, &macro_name));
        }
    }

    GroupedView {
        by: mode,
        groups: buckets
            .into_iter()
            .map(|(key, inner)| OuterGroup {
                key,
                groups: inner
                    .into_iter()
                    .map(|(key, arguments)| InnerGroup { key, arguments })
                    .collect(),
            })
            .collect(),
    }
}

fn macro_names(arg: &ArgumentDetail) -> Vec<String> {
    if arg.links.is_empty() {
        return vec![NO_MACROARGUMENT.to_string()];
    }
    arg.links
        .iter()
        .map(|link| {
            link.macroargument
                .as_ref()
                .map_or_else(|| NO_MACROARGUMENT.to_string(), |m| m.name.clone())
        })
        .collect()
}

fn placed(arg: &ArgumentDetail, macro_name: &str) -> GroupedArgument {
    let links = if macro_name == NO_MACROARGUMENT {
        Vec::new()
    } else {
        arg.links
            .iter()
            .filter(|l| l.macroargument.as_ref().is_some_and(|m| m.name == macro_name))
            .map(|l| GroupedLink {
                id: l.link.id,
                description: l.link.description.clone(),
            })
            .collect()
    };

    GroupedArgument {
        id: arg.argument.id,
        title: arg.argument.title.clone(),
        description: arg.argument.description.clone(),
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArgumentElement, LinkDetail, LinkElement, Macroargument, Subject};

    fn subject(id: i64, name: &str) -> Subject {
        Subject {
            id,
            name: name.to_string(),
            color: None,
        }
    }

    fn link(id: i64, argument_id: i64, macro_: Option<(i64, &str)>) -> LinkDetail {
        LinkDetail {
            link: LinkElement {
                id,
                description: format!("link {id}"),
                argument_id,
                macroargument_id: macro_.map(|(mid, _)| mid),
            },
            macroargument: macro_.map(|(mid, name)| Macroargument {
                id: mid,
                name: name.to_string(),
            }),
        }
    }

    fn argument(id: i64, subj: Subject, links: Vec<LinkDetail>) -> ArgumentDetail {
        ArgumentDetail {
            argument: ArgumentElement {
                id,
                title: format!("arg {id}"),
                description: String::new(),
                subject_id: subj.id,
            },
            subject: subj,
            links,
            from_argument_links: vec![],
            to_argument_links: vec![],
        }
    }

    fn fixture() -> Vec<ArgumentDetail> {
        vec![
            argument(1, subject(1, "Storia"), vec![link(10, 1, Some((1, "Guerra")))]),
            argument(
                2,
                subject(2, "Arte"),
                vec![link(11, 2, Some((1, "Guerra"))), link(12, 2, Some((2, "Natura")))],
            ),
            argument(3, subject(1, "Storia"), vec![]),
            argument(4, subject(2, "Arte"), vec![link(13, 4, None)]),
        ]
    }

    #[test]
    fn test_subject_then_macro() {
        let view = group_arguments(&fixture(), GroupMode::SubjectMacro);
        let keys: Vec<_> = view.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Arte", "Storia"]);

        let arte = &view.groups[0];
        let inner: Vec<_> = arte.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(inner, vec!["Guerra", "Natura", NO_MACROARGUMENT]);

        let storia = &view.groups[1];
        let no_macro = storia
            .groups
            .iter()
            .find(|g| g.key == NO_MACROARGUMENT)
            .unwrap();
        assert_eq!(no_macro.arguments.len(), 1);
        assert_eq!(no_macro.arguments[0].id, 3);
        assert!(no_macro.arguments[0].links.is_empty());
    }

    #[test]
    fn test_macro_then_subject() {
        let view = group_arguments(&fixture(), GroupMode::MacroSubject);
        let guerra = view.groups.iter().find(|g| g.key == "Guerra").unwrap();
        let subjects: Vec<_> = guerra.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(subjects, vec!["Arte", "Storia"]);
    }

    #[test]
    fn test_multi_linked_argument_appears_per_macro_with_filtered_links() {
        let view = group_arguments(&fixture(), GroupMode::SubjectMacro);
        let arte = view.groups.iter().find(|g| g.key == "Arte").unwrap();
        let natura = arte.groups.iter().find(|g| g.key == "Natura").unwrap();
        assert_eq!(natura.arguments[0].id, 2);
        assert_eq!(
            natura.arguments[0].links,
            vec![GroupedLink {
                id: 12,
                description: "link 12".to_string()
            }]
        );
        let guerra = arte.groups.iter().find(|g| g.key == "Guerra").unwrap();
        assert_eq!(guerra.arguments[0].links.len(), 1);
        assert_eq!(guerra.arguments[0].links[0].id, 11);
    }

    #[test]
    fn test_detached_link_goes_to_no_macroargument() {
        let view = group_arguments(&fixture(), GroupMode::SubjectMacro);
        let arte = view.groups.iter().find(|g| g.key == "Arte").unwrap();
        let none = arte.groups.iter().find(|g| g.key == NO_MACROARGUMENT).unwrap();
        assert_eq!(none.arguments[0].id, 4);
        assert!(none.arguments[0].links.is_empty());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("macro-subject".parse::<GroupMode>().unwrap(), GroupMode::MacroSubject);
        assert_eq!(GroupMode::default().to_string(), "subject-macro");
        assert!("sideways".parse::<GroupMode>().is_err());
    }

    #[test]
    fn test_empty_input() {
        let view = group_arguments(&[], GroupMode::MacroSubject);
        assert!(view.groups.is_empty());
        assert_eq!(view.by, GroupMode::MacroSubject);
    }
}
