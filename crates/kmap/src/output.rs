//! Output formatting for CLI commands.
//!
//! Supports human-readable text and JSON for programmatic use. Text writers
//! take any `Write` so they can be tested against a buffer.
//!
//! Semantic colors:
//!   - Warning: yellow (load warnings, cycles)
//!   - Info:    cyan   (node IDs)
//!   - Muted:   dimmed (counts, connectors)

use crate::domain::NodeId;
use crate::store::{LoadWarning, ModelStore};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print any serializable value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

fn info(text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

fn dimmed(text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Write load warnings, one per line.
pub fn write_load_warnings<W: Write>(
    w: &mut W,
    warnings: &[LoadWarning],
    use_colors: bool,
) -> io::Result<()> {
    for item in warnings {
        writeln!(w, "{} {}", warning("warning:", use_colors), item)?;
    }
    Ok(())
}

/// Write one line per node: ID, title, prerequisite count.
pub fn write_nodes_text<W: Write>(
    w: &mut W,
    store: &dyn ModelStore,
    use_colors: bool,
) -> io::Result<()> {
    for node in store.nodes() {
        let count = store.unique_dependency_source_ids(node).len();
        writeln!(
            w,
            "{}  {}  {}",
            info(node.id().as_str(), use_colors),
            node.display_title(),
            dimmed(&format!("({count} prerequisites)"), use_colors)
        )?;
    }
    writeln!(w)?;
    writeln!(w, "{} nodes", store.len())
}

/// Write dependency cycles, one per line, IDs joined by arrows.
pub fn write_cycles_text<W: Write>(
    w: &mut W,
    cycles: &[Vec<NodeId>],
    use_colors: bool,
) -> io::Result<()> {
    if cycles.is_empty() {
        return writeln!(w, "No dependency cycles found");
    }

    writeln!(
        w,
        "{}",
        warning(&format!("Found {} dependency cycle(s):", cycles.len()), use_colors)
    )?;
    for cycle in cycles {
        let ids: Vec<&str> = cycle.iter().map(NodeId::as_str).collect();
        writeln!(w, "  {}", ids.join(dimmed(" <-> ", use_colors).as_str()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;
    use crate::store::InMemoryStore;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_warning_without_colors_is_plain() {
        assert_eq!(warning("careful", false), "careful");
    }

    #[test]
    fn test_write_nodes_text() {
        let store: InMemoryStore = [Node::new("a", "Alpha"), Node::new("b", "").with_dependency("a")]
            .into_iter()
            .collect();
        let text = render(|w| write_nodes_text(w, &store, false));
        assert_eq!(
            text,
            "a  Alpha  (0 prerequisites)\nb  b  (1 prerequisites)\n\n2 nodes\n"
        );
    }

    #[test]
    fn test_write_cycles_text() {
        let text = render(|w| write_cycles_text(w, &[], false));
        assert_eq!(text, "No dependency cycles found\n");

        let cycles = vec![vec![NodeId::new("a"), NodeId::new("b")]];
        let text = render(|w| write_cycles_text(w, &cycles, false));
        assert_eq!(text, "Found 1 dependency cycle(s):\n  a <-> b\n");
    }

    #[test]
    fn test_write_load_warnings() {
        let warnings = vec![LoadWarning::MalformedJson {
            line_number: 3,
            error: "oops".to_string(),
        }];
        let text = render(|w| write_load_warnings(w, &warnings, false));
        assert_eq!(text, "warning: Skipped malformed JSON at line 3: oops\n");
    }
}
