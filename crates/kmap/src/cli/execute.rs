//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;
use std::io::{self, IsTerminal, Write};

use super::args::{CyclesArgs, DotArgs, NodesArgs};
use crate::app::App;
use crate::domain::NodeId;
use crate::dot::DotOptions;
use crate::extract::{GraphExtractor, validate_depth};
use crate::output::{self, OutputMode};
use crate::store::find_cycles;

/// Report load warnings on stderr.
pub fn report_warnings(app: &App) -> Result<()> {
    if app.warnings().is_empty() {
        return Ok(());
    }
    let stderr = io::stderr();
    let use_colors = stderr.is_terminal();
    output::write_load_warnings(&mut stderr.lock(), app.warnings(), use_colors)?;
    Ok(())
}

/// Build the DOT text (or fragment list) for the `dot` command.
///
/// Depth and layout direction fall back to the configuration when the
/// arguments leave them unset.
pub fn render_dot_command(app: &App, args: &DotArgs, output_mode: OutputMode) -> Result<String> {
    let depth = match args.depth {
        Some(depth) => validate_depth(depth)?,
        None => app.config().depth()?,
    };
    let options = DotOptions {
        bottom_up: args.bottom_up || app.config().bottom_up,
    };
    let key = args.key.as_deref().map(NodeId::from);

    let description = GraphExtractor::new(app.store()).extract(key.as_ref(), depth)?;

    let rendered = match output_mode {
        OutputMode::Json => serde_json::to_string_pretty(&description)?,
        OutputMode::Text => description.to_dot(options),
    };
    Ok(rendered)
}

/// Execute the dot command
pub fn execute_dot(app: &App, args: &DotArgs, output_mode: OutputMode) -> Result<()> {
    let rendered = render_dot_command(app, args, output_mode)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{rendered}")?;
    Ok(())
}

/// Execute the nodes command
pub fn execute_nodes(app: &App, _args: &NodesArgs, output_mode: OutputMode) -> Result<()> {
    use crate::domain::NodeRecord;
    use crate::store::ModelStore;

    match output_mode {
        OutputMode::Json => {
            let records: Vec<NodeRecord> = app.store().nodes().map(NodeRecord::from).collect();
            output::print_json(&records)?;
        }
        OutputMode::Text => {
            let stdout = io::stdout();
            let use_colors = stdout.is_terminal();
            output::write_nodes_text(&mut stdout.lock(), app.store(), use_colors)?;
        }
    }
    Ok(())
}

/// Execute the cycles command
pub fn execute_cycles(app: &App, _args: &CyclesArgs, output_mode: OutputMode) -> Result<()> {
    let cycles = find_cycles(app.store());

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "count": cycles.len(),
                "cycles": cycles,
            }))?;
        }
        OutputMode::Text => {
            let stdout = io::stdout();
            let use_colors = stdout.is_terminal();
            output::write_cycles_text(&mut stdout.lock(), &cycles, use_colors)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app_with(map: &str, config: Option<&str>) -> (App, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("kmap.jsonl"), map).unwrap();
        if let Some(config) = config {
            std::fs::write(temp_dir.path().join("kmap.yaml"), config).unwrap();
        }
        let app = App::from_directory(temp_dir.path(), None, None).unwrap();
        (app, temp_dir)
    }

    const CHAIN: &str = "{\"id\":\"a\",\"title\":\"A\"}\n{\"id\":\"b\",\"title\":\"B\",\"dependencies\":[{\"source\":\"a\"}]}\n{\"id\":\"c\",\"title\":\"C\",\"dependencies\":[{\"source\":\"b\"}]}\n";

    #[test]
    fn test_dot_full_map() {
        let (app, _temp) = app_with(CHAIN, None);
        let dot = render_dot_command(&app, &DotArgs::default(), OutputMode::Text).unwrap();
        assert_eq!(
            dot,
            "digraph G{\n\"c\" [label=\"C\"];\n\"b\" [label=\"B\"];\n\"a\" [label=\"A\"];\n\"a\" -> \"b\";\n\"b\" -> \"c\";}"
        );
    }

    #[test]
    fn test_dot_bounded_uses_explicit_depth() {
        let (app, _temp) = app_with(CHAIN, None);
        let args = DotArgs {
            key: Some("c".to_string()),
            depth: Some(1),
            bottom_up: false,
        };
        let dot = render_dot_command(&app, &args, OutputMode::Text).unwrap();
        assert!(dot.contains("\"b\" -> \"c\";"));
        assert!(!dot.contains("\"a\""));
    }

    #[test]
    fn test_dot_depth_and_direction_from_config() {
        let (app, _temp) = app_with(CHAIN, Some("default-depth: 0\nbottom-up: true\n"));
        let args = DotArgs {
            key: Some("c".to_string()),
            ..DotArgs::default()
        };
        let dot = render_dot_command(&app, &args, OutputMode::Text).unwrap();
        assert_eq!(dot, "digraph G{\nrankdir=BT\n\"c\" [label=\"C\"];}");
    }

    #[test]
    fn test_dot_negative_depth_is_invalid_argument() {
        let (app, _temp) = app_with(CHAIN, None);
        let args = DotArgs {
            key: Some("c".to_string()),
            depth: Some(-1),
            bottom_up: false,
        };
        let err = render_dot_command(&app, &args, OutputMode::Text).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::Error>(),
            Some(crate::Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_dot_unknown_key() {
        let (app, _temp) = app_with(CHAIN, None);
        let args = DotArgs {
            key: Some("zzz".to_string()),
            ..DotArgs::default()
        };
        let err = render_dot_command(&app, &args, OutputMode::Text).unwrap_err();
        assert!(err.to_string().contains("Node not found: zzz"));
    }

    #[test]
    fn test_dot_json_lists_fragments() {
        let (app, _temp) = app_with(CHAIN, None);
        let args = DotArgs {
            key: Some("b".to_string()),
            depth: Some(1),
            bottom_up: false,
        };
        let json = render_dot_command(&app, &args, OutputMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let kinds: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["node", "node", "edge"]);
    }

    #[test]
    fn test_dot_key_with_surrounding_whitespace() {
        use crate::cli::validators::validate_node_id;

        let (app, _temp) = app_with("{\"id\":\" a\",\"title\":\"A\"}\n", None);
        let args = DotArgs {
            key: Some(validate_node_id(" a").unwrap()),
            depth: Some(0),
            bottom_up: false,
        };
        let dot = render_dot_command(&app, &args, OutputMode::Text).unwrap();
        assert_eq!(dot, "digraph G{\n\" a\" [label=\"A\"];}");
    }
}
