//! Graphviz DOT rendering

use std::path::Path;

use tracing::{info, warn};

use crate::tree::{DirectoryNode, TreeEntry, escape_label, qualified_id};

use super::config::{EdgeSpec, GraphStyle};

const INDENT: &str = "    ";

/// Counts of what a rendered document contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub clusters: usize,
    pub leaves: usize,
    pub edges: usize,
}

/// A rendered DOT document.
#[derive(Debug, Clone)]
pub struct DotDocument {
    pub lines: Vec<String>,
    pub summary: GraphSummary,
}

impl DotDocument {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// An edge whose endpoints were found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedEdge {
    from: String,
    to: String,
    ltail: Option<String>,
    lhead: Option<String>,
    label: Option<String>,
}

/// Renders a scanned tree as a full DOT document.
#[derive(Debug, Clone, Default)]
pub struct DotRenderer {
    style: GraphStyle,
    edges: Vec<EdgeSpec>,
}

impl DotRenderer {
    pub fn new(style: GraphStyle) -> Self {
        Self {
            style,
            edges: Vec::new(),
        }
    }

    pub fn with_edges(mut self, edges: Vec<EdgeSpec>) -> Self {
        self.edges = edges;
        self
    }

    pub fn render(&self, root: &DirectoryNode) -> DotDocument {
        let edges = self.resolve_edges(root);
        let font = quote_attr(&self.style.font);

        let mut lines = vec![
            format!("digraph {} {{", qualified_id(None, &self.style.name)),
            format!("{INDENT}rankdir={};", dot_value(&self.style.rankdir)),
            format!(
                "{INDENT}node [shape={}, style={}, fontname=\"{}\"];",
                dot_value(&self.style.node_shape),
                dot_value(&self.style.node_style),
                font
            ),
            format!("{INDENT}edge [fontname=\"{}\"];", font),
        ];
        if edges.iter().any(|e| e.ltail.is_some() || e.lhead.is_some()) {
            lines.push(format!("{INDENT}compound=true;"));
        }

        lines.extend(render_cluster(root).into_iter().map(|l| format!("{INDENT}{l}")));
        lines.extend(edges.iter().map(|e| format!("{INDENT}{}", edge_line(e))));
        lines.push("}".to_string());

        let summary = GraphSummary {
            clusters: root.dir_count(),
            leaves: root.file_count(),
            edges: edges.len(),
        };
        info!(
            clusters = summary.clusters,
            leaves = summary.leaves,
            edges = summary.edges,
            "rendered graph"
        );

        DotDocument { lines, summary }
    }

    fn resolve_edges(&self, root: &DirectoryNode) -> Vec<ResolvedEdge> {
        self.edges
            .iter()
            .filter_map(|spec| {
                let from = resolve_endpoint(root, &spec.from);
                let to = resolve_endpoint(root, &spec.to);
                match (from, to) {
                    (Some((from, ltail)), Some((to, lhead))) => Some(ResolvedEdge {
                        from,
                        to,
                        ltail,
                        lhead,
                        label: spec.label.clone(),
                    }),
                    _ => {
                        warn!(from = %spec.from, to = %spec.to, "edge endpoint not found, skipping");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Find the node an edge endpoint refers to.
///
/// Returns the node id to attach to and, for folders, the cluster to clip at.
/// Folders without any file cannot carry an edge.
fn resolve_endpoint(root: &DirectoryNode, path: &str) -> Option<(String, Option<String>)> {
    let trimmed = path.trim_matches('/');
    let dir = if trimmed.is_empty() || trimmed == "." {
        root
    } else {
        match root.find(Path::new(trimmed))? {
            TreeEntry::File(file) => return Some((file.id.clone(), None)),
            TreeEntry::Dir(dir) => dir,
        }
    };
    let anchor = dir.first_leaf()?;
    Some((anchor.id.clone(), Some(format!("cluster_{}", dir.id))))
}

fn edge_line(edge: &ResolvedEdge) -> String {
    let mut attrs = Vec::new();
    if let Some(ltail) = &edge.ltail {
        attrs.push(format!("ltail={ltail}"));
    }
    if let Some(lhead) = &edge.lhead {
        attrs.push(format!("lhead={lhead}"));
    }
    if let Some(label) = &edge.label {
        attrs.push(format!("label=\"{}\"", quote_attr(label)));
    }
    if attrs.is_empty() {
        format!("{} -> {};", edge.from, edge.to)
    } else {
        format!("{} -> {} [{}];", edge.from, edge.to, attrs.join(", "))
    }
}

/// Render one folder as a cluster block, nested clusters indented.
pub fn render_cluster(node: &DirectoryNode) -> Vec<String> {
    let mut lines = vec![
        format!("subgraph cluster_{} {{", node.id),
        format!("{INDENT}label=\"{}\";", escape_label(&node.name)),
        format!("{INDENT}style=filled;"),
        format!("{INDENT}color={};", dot_value(&node.color)),
    ];
    if let Some(category) = &node.category {
        lines.push(format!("{INDENT}tooltip=\"{}\";", quote_attr(category)));
    }

    for child in &node.children {
        match child {
            TreeEntry::File(file) => lines.push(format!(
                "{INDENT}{} [label=\"{}\"];",
                file.id,
                escape_label(&file.name)
            )),
            TreeEntry::Dir(dir) => {
                lines.extend(render_cluster(dir).into_iter().map(|l| format!("{INDENT}{l}")));
            }
        }
    }

    lines.push("}".to_string());
    lines
}

/// Bare attribute value when it is a plain identifier, quoted otherwise.
fn dot_value(value: &str) -> String {
    let plain = !value.is_empty()
        && !value.starts_with(|c: char| c.is_ascii_digit())
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        value.to_string()
    } else {
        format!("\"{}\"", quote_attr(value))
    }
}

fn quote_attr(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
