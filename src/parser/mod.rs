//! Ingestion of raw flow documents: format detection, deserialization and
//! structural validation.

#[cfg(feature = "module-docs")]
mod module;

use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::error::ParseError;
use crate::flow::FlowDocument;

/// Declared origin of a raw flow document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatHint {
    /// Plain JSON data.
    Json,
    /// A scripted module wrapping the document in a default export.
    Module,
    /// Sniff for module syntax before falling back to JSON.
    #[default]
    Auto,
}

impl FormatHint {
    /// The hint a file name suggests: `.js`-family extensions mean a
    /// scripted module, everything else plain JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("js" | "mjs" | "cjs" | "ts") => FormatHint::Module,
            _ => FormatHint::Json,
        }
    }

    fn resolve(self, content: &str) -> Self {
        match self {
            FormatHint::Auto => {
                if content.contains("export default") || content.contains("module.exports") {
                    FormatHint::Module
                } else {
                    FormatHint::Json
                }
            }
            other => other,
        }
    }
}

/// A parsed and structurally validated flow document.
#[derive(Debug, Clone)]
pub struct ParsedFlow {
    pub document: FlowDocument,
    /// The document's declared name, for use as a default title.
    pub name: Option<String>,
}

/// Parses raw flow content into a validated [`FlowDocument`].
///
/// Plain JSON is deserialized directly; scripted-module content goes
/// through the export extraction behind the `module-docs` feature. The
/// candidate value is then checked structurally before it is decoded into
/// the typed model. Referential problems found by the document audit are
/// logged as warnings, never failures.
pub fn parse_flow(content: &str, hint: FormatHint) -> Result<ParsedFlow, ParseError> {
    let value = match hint.resolve(content) {
        FormatHint::Module => module_export(content)?,
        _ => serde_json::from_str::<Value>(content)
            .map_err(|error| ParseError::Syntax(error.to_string()))?,
    };

    validate_structure(&value)?;

    let document: FlowDocument =
        serde_json::from_value(value).map_err(|error| ParseError::Syntax(error.to_string()))?;

    for issue in document.audit() {
        warn!(%issue, "flow document failed an integrity check");
    }

    let name = document.name.clone();
    Ok(ParsedFlow { document, name })
}

/// Structural pre-flight over an already-decoded document value.
///
/// The value must be an object whose `groups` is a non-empty array, and at
/// least one group must carry a non-empty `blocks` array.
pub fn validate_structure(value: &Value) -> Result<(), ParseError> {
    let Some(object) = value.as_object() else {
        return Err(ParseError::InvalidStructure(
            "flow document is not an object".to_string(),
        ));
    };

    let groups = match object.get("groups").and_then(Value::as_array) {
        Some(groups) if !groups.is_empty() => groups,
        _ => {
            return Err(ParseError::InvalidStructure(
                "missing or empty \"groups\" array".to_string(),
            ));
        }
    };

    let any_blocks = groups.iter().any(|group| {
        group
            .get("blocks")
            .and_then(Value::as_array)
            .is_some_and(|blocks| !blocks.is_empty())
    });
    if !any_blocks {
        return Err(ParseError::InvalidStructure(
            "no group contains any blocks".to_string(),
        ));
    }

    Ok(())
}

#[cfg(feature = "module-docs")]
fn module_export(content: &str) -> Result<Value, ParseError> {
    module::extract_default_export(content)
}

#[cfg(not(feature = "module-docs"))]
fn module_export(_content: &str) -> Result<Value, ParseError> {
    Err(ParseError::EvaluationFailed(
        "scripted flow modules are not enabled; rebuild with the `module-docs` feature".to_string(),
    ))
}
