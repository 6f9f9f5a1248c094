//! `{{name}}` placeholder substitution over plain and rich text.

use serde_json::Value;

use crate::flow::{FlowDocument, RichTextChild, RichTextElement, VariableMap};

/// Replaces every `{{name}}` token whose trimmed name resolves in
/// `variables`.
///
/// A token name is a non-empty run of characters up to the first `}`,
/// closed by `}}`. Leading and trailing whitespace inside the braces is
/// ignored for the lookup, matching is case sensitive, and unresolved
/// tokens are left completely unchanged, braces included. Substituted
/// values are not re-scanned, so the result is stable once no resolvable
/// token remains.
pub fn interpolate(text: &str, variables: &VariableMap) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        match token_name(&rest[start + 2..]) {
            Some(name) => {
                let token_len = 2 + name.len() + 2;
                match variables.get(name.trim()) {
                    Some(value) => output.push_str(&value.to_string()),
                    None => output.push_str(&rest[start..start + token_len]),
                }
                rest = &rest[start + token_len..];
            }
            None => {
                // Not a token after all; emit one brace and rescan from the
                // next character.
                output.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// The token name following `{{`, if the input continues with a non-empty
/// `}`-free run closed by `}}`.
fn token_name(input: &str) -> Option<&str> {
    let name_len = input.find('}')?;
    if name_len == 0 || !input[name_len..].starts_with("}}") {
        return None;
    }
    Some(&input[..name_len])
}

/// Applies [`interpolate`] to every text run, preserving styling flags and
/// paragraph structure.
pub fn interpolate_rich_text(
    paragraphs: &[RichTextElement],
    variables: &VariableMap,
) -> Vec<RichTextElement> {
    paragraphs
        .iter()
        .map(|paragraph| RichTextElement {
            element_type: paragraph.element_type.clone(),
            children: paragraph
                .children
                .iter()
                .map(|child| RichTextChild {
                    text: interpolate(&child.text, variables),
                    bold: child.bold,
                    italic: child.italic,
                })
                .collect(),
        })
        .collect()
}

/// Every distinct `{{name}}` key referenced anywhere in the document's
/// groups or edges, plus all declared variable names, trimmed, deduplicated
/// and sorted.
///
/// The scan covers every string field, so tokens in prompt labels, choice
/// contents, redirect URLs and expressions are all found.
pub fn collect_variable_names(document: &FlowDocument) -> Vec<String> {
    let mut names = Vec::new();

    if let Ok(groups) = serde_json::to_value(&document.groups) {
        collect_from_value(&groups, &mut names);
    }
    if let Ok(edges) = serde_json::to_value(&document.edges) {
        collect_from_value(&edges, &mut names);
    }
    for variable in &document.variables {
        if !variable.name.is_empty() {
            names.push(variable.name.clone());
        }
    }

    names.sort();
    names.dedup();
    names
}

fn collect_from_value(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::String(text) => collect_token_names(text, names),
        Value::Array(items) => {
            for item in items {
                collect_from_value(item, names);
            }
        }
        Value::Object(fields) => {
            for field in fields.values() {
                collect_from_value(field, names);
            }
        }
        _ => {}
    }
}

fn collect_token_names(text: &str, names: &mut Vec<String>) {
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        match token_name(&rest[start + 2..]) {
            Some(name) => {
                let trimmed = name.trim();
                if !trimmed.is_empty() {
                    names.push(trimmed.to_string());
                }
                rest = &rest[start + 2 + name.len() + 2..];
            }
            None => rest = &rest[start + 1..],
        }
    }
}
