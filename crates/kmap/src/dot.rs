//! Graphviz DOT rendering.
//!
//! Turns extracted fragments into statements of the DOT language and wraps
//! them in a `digraph` block ready for a layout engine.

use crate::domain::{DependencyEdge, Node};
use crate::extract::Fragment;

/// Options controlling the `digraph` wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotOptions {
    /// Lay out prerequisites below their dependents (`rankdir=BT`).
    pub bottom_up: bool,
}

/// Quote a DOT identifier or string, escaping `"` and `\`.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Node statement: `"id" [label="Title"];`
pub fn node_statement(node: &Node) -> String {
    format!(
        "{} [label={}];",
        quote(node.id().as_str()),
        quote(node.display_title())
    )
}

/// Edge statement: `"source" -> "target";` plus any attributes.
pub fn edge_statement(edge: &DependencyEdge) -> String {
    let mut attrs = Vec::new();
    if let Some(reason) = edge.reason() {
        attrs.push(format!("label={}", quote(reason)));
    }
    if let Some(style) = edge.style().map(str::trim).filter(|s| !s.is_empty()) {
        attrs.push(style.to_string());
    }

    let head = format!(
        "{} -> {}",
        quote(edge.source().as_str()),
        quote(edge.target().as_str())
    );
    if attrs.is_empty() {
        format!("{head};")
    } else {
        format!("{head} [{}];", attrs.join(", "))
    }
}

/// Render fragments as a complete `digraph` description.
pub fn render_dot(fragments: &[Fragment], options: DotOptions) -> String {
    let mut lines: Vec<&str> = Vec::with_capacity(fragments.len() + 1);
    if options.bottom_up {
        lines.push("rankdir=BT");
    }
    lines.extend(fragments.iter().map(Fragment::statement));

    format!("digraph G{{\n{}}}", lines.join("\n"))
}
