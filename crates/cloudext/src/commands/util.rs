//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

/// Split `KEY=VALUE` arguments.
pub fn parse_pairs<'a>(field: &str, pairs: &'a [String]) -> Result<Vec<(&'a str, String)>, CliError> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(k, _)| !k.is_empty())
                .map(|(k, v)| (k, v.to_owned()))
                .ok_or_else(|| CliError::Validation {
                    field: field.into(),
                    reason: format!("expected KEY=VALUE, got '{pair}'"),
                })
        })
        .collect()
}

/// Collect the set fields of an update into a JSON object.
///
/// Errors when nothing would change.
pub fn changes(fields: Vec<(&str, Option<Value>)>) -> Result<Value, CliError> {
    let map: Map<String, Value> = fields
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_owned(), v)))
        .collect();
    if map.is_empty() {
        return Err(CliError::Validation {
            field: "set".into(),
            reason: "nothing to change; pass at least one field flag".into(),
        });
    }
    Ok(Value::Object(map))
}

pub fn not_found(resource_type: &str, identifier: &str, list_command: &str) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: identifier.into(),
        list_command: list_command.into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pairs_split_on_first_equals() {
        let args = vec!["status=ACTIVE".to_owned(), "tag=a=b".to_owned()];
        let pairs = parse_pairs("filter", &args).unwrap();
        assert_eq!(pairs, vec![("status", "ACTIVE".to_owned()), ("tag", "a=b".to_owned())]);
    }

    #[test]
    fn pairs_without_key_are_rejected() {
        let args = vec!["=x".to_owned()];
        assert!(matches!(
            parse_pairs("filter", &args),
            Err(CliError::Validation { .. })
        ));
        let args = vec!["novalue".to_owned()];
        assert!(parse_pairs("filter", &args).is_err());
    }

    #[test]
    fn changes_keep_only_set_fields() {
        let body = changes(vec![
            ("name", Some(json!("edge"))),
            ("description", None),
        ])
        .unwrap();
        assert_eq!(body, json!({ "name": "edge" }));
        assert!(changes(vec![("name", None)]).is_err());
    }

    #[test]
    fn yes_flag_skips_prompt() {
        assert!(confirm("Delete?", true).unwrap());
    }

    #[test]
    fn bad_json_file_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            read_json_file::<Value>(&path),
            Err(CliError::Validation { .. })
        ));
    }
}
