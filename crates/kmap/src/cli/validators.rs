//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time.

/// Validate a node ID argument.
///
/// IDs are free-form but must contain something other than whitespace and
/// must not span lines, since they become DOT identifiers. The value is kept
/// verbatim so it matches IDs loaded from the data file exactly.
pub fn validate_node_id(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Node ID cannot be empty".to_string());
    }

    if s.contains(['\n', '\r']) {
        return Err(format!("Node ID cannot contain line breaks: '{}'", s.escape_debug()));
    }

    Ok(s.to_string())
}
