//! Graph elements for the argument map.
//!
//! Produces node and edge records in the shape force-directed layout
//! libraries consume: macroargument hubs, argument nodes colored by subject,
//! and edges for both kinds of links.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{ArgumentDetail, Subject};

/// Fill color for subjects without one.
pub const DEFAULT_NODE_COLOR: &str = "#999999";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GraphNode {
    #[serde(rename_all = "camelCase")]
    Macro {
        id: String,
        label: String,
        connection_count: usize,
    },
    #[serde(rename_all = "camelCase")]
    Argument {
        id: String,
        label: String,
        description: String,
        subject_id: i64,
        color: String,
    },
}

impl GraphNode {
    pub fn id(&self) -> &str {
        match self {
            GraphNode::Macro { id, .. } | GraphNode::Argument { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// First line of the description.
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub id: i64,
    pub name: String,
    pub color: String,
}

fn macro_node_id(id: i64) -> String {
    format!("macro-{id}")
}

fn argument_node_id(id: i64) -> String {
    format!("arg-{id}")
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}

/// Build graph elements from subjects and argument details.
pub fn build_graph(subjects: &[Subject], arguments: &[ArgumentDetail]) -> Graph {
    let colors: BTreeMap<i64, String> = subjects
        .iter()
        .map(|s| (s.id, effective_color(s)))
        .collect();

    // macro id -> (name, link count), only for macroarguments that are linked
    let mut macros: BTreeMap<i64, (String, usize)> = BTreeMap::new();
    for link in arguments.iter().flat_map(|a| &a.links) {
        if let Some(m) = &link.macroargument {
            macros.entry(m.id).or_insert_with(|| (m.name.clone(), 0)).1 += 1;
        }
    }

    let mut nodes: Vec<GraphNode> = macros
        .iter()
        .map(|(id, (name, count))| GraphNode::Macro {
            id: macro_node_id(*id),
            label: name.clone(),
            connection_count: *count,
        })
        .collect();
    let mut edges = Vec::new();

    for arg in arguments {
        let arg_id = argument_node_id(arg.argument.id);
        nodes.push(GraphNode::Argument {
            id: arg_id.clone(),
            label: arg.argument.title.clone(),
            description: arg.argument.description.clone(),
            subject_id: arg.argument.subject_id,
            color: colors
                .get(&arg.argument.subject_id)
                .cloned()
                .unwrap_or_else(|| effective_color(&arg.subject)),
        });

        for link in &arg.links {
            let Some(m) = &link.macroargument else {
                continue;
            };
            edges.push(GraphEdge {
                id: format!("link-{}", link.link.id),
                source: arg_id.clone(),
                target: macro_node_id(m.id),
                label: first_line(&link.link.description),
                description: link.link.description.clone(),
            });
        }

        // Outgoing side only, so every argument link yields one edge.
        for link in &arg.from_argument_links {
            edges.push(GraphEdge {
                id: format!("argLink-{}", link.id),
                source: argument_node_id(link.from_argument_id),
                target: argument_node_id(link.to_argument_id),
                label: first_line(&link.description),
                description: link.description.clone(),
            });
        }
    }

    let mut legend: Vec<LegendEntry> = subjects
        .iter()
        .map(|s| LegendEntry {
            id: s.id,
            name: s.name.clone(),
            color: effective_color(s),
        })
        .collect();
    legend.sort_by(|a, b| a.name.cmp(&b.name));

    Graph {
        nodes,
        edges,
        legend,
    }
}

fn effective_color(subject: &Subject) -> String {
    subject
        .color
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_NODE_COLOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArgumentElement, ArgumentLink, LinkDetail, LinkElement, Macroargument};
    use std::collections::HashSet;

    fn subjects() -> Vec<Subject> {
        vec![
            Subject {
                id: 1,
                name: "Storia".into(),
                color: Some("#FFC300".into()),
            },
            Subject {
                id: 2,
                name: "Arte".into(),
                color: None,
            },
        ]
    }

    fn fixture() -> Vec<ArgumentDetail> {
        let subs = subjects();
        let guerra = Macroargument {
            id: 5,
            name: "Guerra".into(),
        };
        let arg_link = ArgumentLink {
            id: 30,
            description: "causa\ndettagli".into(),
            from_argument_id: 1,
            to_argument_id: 2,
        };
        vec![
            ArgumentDetail {
                argument: ArgumentElement {
                    id: 1,
                    title: "Prima guerra mondiale".into(),
                    description: "desc".into(),
                    subject_id: 1,
                },
                subject: subs[0].clone(),
                links: vec![
                    LinkDetail {
                        link: LinkElement {
                            id: 10,
                            description: "trincee\naltro".into(),
                            argument_id: 1,
                            macroargument_id: Some(5),
                        },
                        macroargument: Some(guerra.clone()),
                    },
                    LinkDetail {
                        link: LinkElement {
                            id: 11,
                            description: "orphan".into(),
                            argument_id: 1,
                            macroargument_id: None,
                        },
                        macroargument: None,
                    },
                ],
                from_argument_links: vec![arg_link.clone()],
                to_argument_links: vec![],
            },
            ArgumentDetail {
                argument: ArgumentElement {
                    id: 2,
                    title: "Guernica".into(),
                    description: String::new(),
                    subject_id: 2,
                },
                subject: subs[1].clone(),
                links: vec![LinkDetail {
                    link: LinkElement {
                        id: 12,
                        description: "bombardamento".into(),
                        argument_id: 2,
                        macroargument_id: Some(5),
                    },
                    macroargument: Some(guerra),
                }],
                from_argument_links: vec![],
                to_argument_links: vec![arg_link],
            },
        ]
    }

    #[test]
    fn test_macro_nodes_count_connections() {
        let graph = build_graph(&subjects(), &fixture());
        let macros: Vec<_> = graph
            .nodes
            .iter()
            .filter_map(|n| match n {
                GraphNode::Macro {
                    id,
                    connection_count,
                    ..
                } => Some((id.clone(), *connection_count)),
                _ => None,
            })
            .collect();
        assert_eq!(macros, vec![("macro-5".to_string(), 2)]);
    }

    #[test]
    fn test_argument_nodes_use_subject_color() {
        let graph = build_graph(&subjects(), &fixture());
        let colors: Vec<_> = graph
            .nodes
            .iter()
            .filter_map(|n| match n {
                GraphNode::Argument { id, color, .. } => Some((id.as_str(), color.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![("arg-1", "#FFC300"), ("arg-2", DEFAULT_NODE_COLOR)]);
    }

    #[test]
    fn test_edges_reference_existing_nodes() {
        let graph = build_graph(&subjects(), &fixture());
        let ids: HashSet<_> = graph.nodes.iter().map(|n| n.id().to_string()).collect();
        for edge in &graph.edges {
            assert!(ids.contains(&edge.source), "missing source {}", edge.source);
            assert!(ids.contains(&edge.target), "missing target {}", edge.target);
        }
    }

    #[test]
    fn test_edge_set_and_labels() {
        let graph = build_graph(&subjects(), &fixture());
        let edge_ids: Vec<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(edge_ids, vec!["link-10", "argLink-30", "link-12"]);

        let arg_link = graph.edges.iter().find(|e| e.id == "argLink-30").unwrap();
        assert_eq!(arg_link.label, "causa");
        assert_eq!(arg_link.description, "causa\ndettagli");
        assert_eq!(arg_link.source, "arg-1");
        assert_eq!(arg_link.target, "arg-2");
    }

    #[test]
    fn test_legend_sorted_by_name() {
        let graph = build_graph(&subjects(), &fixture());
        let names: Vec<_> = graph.legend.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Arte", "Storia"]);
    }

    #[test]
    fn test_node_serialization_shape() {
        let node = GraphNode::Macro {
            id: "macro-1".into(),
            label: "Guerra".into(),
            connection_count: 3,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "macro");
        assert_eq!(json["connectionCount"], 3);
    }
}
