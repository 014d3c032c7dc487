//! Structural validation for Docker Compose manifests
//!
//! This is a deliberately shallow, single-error-at-a-time validator: it exists
//! to catch the common authoring mistakes on every keystroke, not to be a full
//! Compose schema engine. Parse failures and schema violations are both folded
//! into a [`ValidationResult`]; nothing escapes `validate` as an error.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Root keys accepted when a manifest has no `services` block.
const ROOT_KEY_WHITELIST: &[&str] = &[
    "version", "services", "volumes", "networks", "secrets", "configs",
];

/// Compose extension keys (`x-*`) are always accepted at the root.
const EXTENSION_KEY_PREFIX: &str = "x-";

/// Outcome of validating a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
    /// 1-based line of the first problem. Syntax errors carry one; structural
    /// violations usually have no direct source position.
    pub line: Option<usize>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
            line: None,
        }
    }

    fn syntax(message: String, line: Option<usize>) -> Self {
        Self {
            is_valid: false,
            error: Some(message),
            line,
        }
    }
}

impl From<SchemaViolation> for ValidationResult {
    fn from(violation: SchemaViolation) -> Self {
        Self {
            is_valid: false,
            error: Some(violation.to_string()),
            line: None,
        }
    }
}

/// First structural rule broken by a well-formed manifest.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("Document must be an object (Docker Compose root)")]
    NonMappingRoot,
    #[error("'version' must be a string (e.g., '3.8')")]
    VersionNotString,
    #[error("'services' must be a mapping of service names")]
    ServicesNotMapping,
    #[error("Service '{0}' must be a mapping configuration")]
    ServiceNotMapping(String),
    #[error("Service '{0}' must specify either 'image' or 'build'")]
    ServiceMissingSource(String),
    #[error("Service '{0}' ports must be a list")]
    PortsNotList(String),
    #[error("Service '{0}' volumes must be a list or mapping")]
    VolumesNotListOrMapping(String),
    #[error("Unknown root level key: '{0}'")]
    UnknownRootKey(String),
}

/// Validates manifest text, reporting the first problem found.
///
/// Empty and whitespace-only input is vacuously valid.
pub fn validate(text: &str) -> ValidationResult {
    if text.trim().is_empty() {
        return ValidationResult::valid();
    }

    let doc: Value = match serde_yaml::from_str(text) {
        Ok(doc) => doc,
        Err(err) => {
            // serde_yaml locations are already 1-based.
            let line = err.location().map(|loc| loc.line());
            return ValidationResult::syntax(err.to_string(), line);
        }
    };

    match check_root(&doc) {
        Ok(()) => ValidationResult::valid(),
        Err(violation) => violation.into(),
    }
}

fn check_root(doc: &Value) -> Result<(), SchemaViolation> {
    let root = match doc {
        Value::Mapping(root) => root,
        _ => return Err(SchemaViolation::NonMappingRoot),
    };

    if let Some(version) = entry(root, "version") {
        if !version.is_string() {
            return Err(SchemaViolation::VersionNotString);
        }
    }

    if let Some(services) = entry(root, "services") {
        let services = match services {
            Value::Mapping(services) => services,
            _ => return Err(SchemaViolation::ServicesNotMapping),
        };
        // Mapping order; the first failing entry wins.
        for (name, config) in services {
            check_service(&key_name(name), config)?;
        }
    } else if !root.is_empty() {
        // Partial files (only volumes/networks/...) are fine; flag anything
        // outside the known vocabulary. This check intentionally does not run
        // when `services` is present.
        for (key, _) in root {
            let name = key_name(key);
            if !ROOT_KEY_WHITELIST.contains(&name.as_str())
                && !name.starts_with(EXTENSION_KEY_PREFIX)
            {
                return Err(SchemaViolation::UnknownRootKey(name));
            }
        }
    }

    Ok(())
}

fn check_service(name: &str, config: &Value) -> Result<(), SchemaViolation> {
    let config = match config {
        Value::Mapping(config) => config,
        _ => return Err(SchemaViolation::ServiceNotMapping(name.to_string())),
    };

    if entry(config, "image").is_none() && entry(config, "build").is_none() {
        return Err(SchemaViolation::ServiceMissingSource(name.to_string()));
    }

    if let Some(ports) = entry(config, "ports") {
        if !ports.is_sequence() {
            return Err(SchemaViolation::PortsNotList(name.to_string()));
        }
    }

    if let Some(volumes) = entry(config, "volumes") {
        if !volumes.is_sequence() && !volumes.is_mapping() {
            return Err(SchemaViolation::VolumesNotListOrMapping(name.to_string()));
        }
    }

    Ok(())
}

/// Looks up a string key in a YAML mapping.
fn entry<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

/// Renders a mapping key for use in a message. Service names are normally
/// strings, but YAML permits any scalar as a key.
fn key_name(key: &Value) -> String {
    match key.as_str() {
        Some(name) => name.to_string(),
        None => serde_yaml::to_string(key)
            .map(|rendered| rendered.trim_end().to_string())
            .unwrap_or_default(),
    }
}
