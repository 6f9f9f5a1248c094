//! Extraction of flow documents from scripted module exports.
//!
//! Legacy export tooling wraps a flow document in a small JS module,
//! `export default {...}` or `module.exports = {...}`. The document inside
//! those files is a plain object literal, so it can be recovered without
//! executing anything: strip comments, locate the export assignment, and
//! normalize the literal to JSON. Constructs that would need evaluation
//! (calls, template literals, identifier values) are rejected outright.

use serde_json::Value;

use crate::error::ParseError;

/// Recovers the default export of a scripted flow module as a JSON value.
pub(super) fn extract_default_export(content: &str) -> Result<Value, ParseError> {
    let stripped = strip_comments(content);
    let expression = export_expression(&stripped)?;
    let tokens = tokenize(expression)?;
    let normalized = render_json(&tokens)?;
    serde_json::from_str(&normalized).map_err(|error| {
        ParseError::EvaluationFailed(format!(
            "module export is not a plain object literal: {}",
            error
        ))
    })
}

/// Removes `//` and `/* */` comments, leaving string literals untouched.
fn strip_comments(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut string_delimiter: Option<char> = None;

    while let Some(ch) = chars.next() {
        if let Some(delimiter) = string_delimiter {
            output.push(ch);
            if ch == '\\' {
                if let Some(escaped) = chars.next() {
                    output.push(escaped);
                }
            } else if ch == delimiter {
                string_delimiter = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' | '`' => {
                string_delimiter = Some(ch);
                output.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        output.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }
            _ => output.push(ch),
        }
    }

    output
}

/// Locates the expression assigned to the module's default export.
fn export_expression(source: &str) -> Result<&str, ParseError> {
    let start = if let Some(position) = source.find("export default") {
        position + "export default".len()
    } else if let Some(position) = source.find("module.exports") {
        let after_marker = position + "module.exports".len();
        let equals = source[after_marker..].find('=').ok_or_else(|| {
            ParseError::EvaluationFailed("module.exports is never assigned".to_string())
        })?;
        after_marker + equals + 1
    } else {
        return Err(ParseError::EvaluationFailed(
            "module has no default export".to_string(),
        ));
    };

    let expression = source[start..].trim_start();
    if expression.starts_with('{') || expression.starts_with('[') {
        Ok(expression)
    } else {
        Err(ParseError::EvaluationFailed(
            "module export is not an object or array literal".to_string(),
        ))
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
    Str(String),
    Number(String),
    Word(String),
}

/// Splits the literal into tokens, stopping once the outermost braces
/// balance out so trailing statements are ignored.
fn tokenize(expression: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();
    let mut depth: usize = 0;

    while let Some(&ch) = chars.peek() {
        match ch {
            '{' => {
                chars.next();
                tokens.push(Token::OpenBrace);
                depth += 1;
            }
            '[' => {
                chars.next();
                tokens.push(Token::OpenBracket);
                depth += 1;
            }
            '}' | ']' => {
                chars.next();
                tokens.push(if ch == '}' {
                    Token::CloseBrace
                } else {
                    Token::CloseBracket
                });
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ParseError::EvaluationFailed(
                        "unbalanced brackets in module export".to_string(),
                    )
                })?;
                if depth == 0 {
                    break;
                }
            }
            ':' => {
                chars.next();
                tokens.push(Token::Colon);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '\'' | '"' => {
                chars.next();
                tokens.push(Token::Str(read_string(&mut chars, ch)?));
            }
            '`' => {
                return Err(ParseError::EvaluationFailed(
                    "template literals in the export require evaluation".to_string(),
                ));
            }
            '-' | '0'..='9' => {
                let mut number = String::new();
                number.push(ch);
                chars.next();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_digit() || matches!(next, '.' | 'e' | 'E' | '+' | '-') {
                        number.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Number(number));
            }
            _ if ch.is_alphabetic() || ch == '_' || ch == '$' => {
                let mut word = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' || next == '$' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Word(word));
            }
            _ if ch.is_whitespace() => {
                chars.next();
            }
            _ => {
                return Err(ParseError::EvaluationFailed(format!(
                    "unsupported syntax '{}' in module export",
                    ch
                )));
            }
        }
    }

    if depth != 0 {
        return Err(ParseError::EvaluationFailed(
            "unbalanced brackets in module export".to_string(),
        ));
    }
    Ok(tokens)
}

/// Reads a quoted string, decoding the escapes JS and JSON share.
fn read_string(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    delimiter: char,
) -> Result<String, ParseError> {
    let mut value = String::new();
    while let Some(ch) = chars.next() {
        match ch {
            ch if ch == delimiter => return Ok(value),
            '\\' => {
                let Some(escaped) = chars.next() else { break };
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    'u' => {
                        let mut code = String::new();
                        for _ in 0..4 {
                            if let Some(digit) = chars.next() {
                                code.push(digit);
                            }
                        }
                        let decoded = u32::from_str_radix(&code, 16)
                            .ok()
                            .and_then(char::from_u32)
                            .ok_or_else(|| {
                                ParseError::EvaluationFailed(format!(
                                    "invalid unicode escape '\\u{}' in module export",
                                    code
                                ))
                            })?;
                        value.push(decoded);
                    }
                    other => value.push(other),
                }
            }
            other => value.push(other),
        }
    }
    Err(ParseError::EvaluationFailed(
        "unterminated string literal in module export".to_string(),
    ))
}

/// Renders the token stream back out as strict JSON.
fn render_json(tokens: &[Token]) -> Result<String, ParseError> {
    let mut output = String::new();

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::OpenBrace => output.push('{'),
            Token::CloseBrace => output.push('}'),
            Token::OpenBracket => output.push('['),
            Token::CloseBracket => output.push(']'),
            Token::Colon => output.push(':'),
            Token::Comma => {
                // JS tolerates trailing commas; JSON does not.
                if !matches!(
                    tokens.get(index + 1),
                    Some(Token::CloseBrace | Token::CloseBracket) | None
                ) {
                    output.push(',');
                }
            }
            Token::Str(inner) => output.push_str(&quote(inner)?),
            Token::Number(text) => output.push_str(text),
            Token::Word(word) => {
                let is_key = matches!(tokens.get(index + 1), Some(Token::Colon));
                if is_key {
                    output.push_str(&quote(word)?);
                } else if matches!(word.as_str(), "true" | "false" | "null") {
                    output.push_str(word);
                } else {
                    return Err(ParseError::EvaluationFailed(format!(
                        "identifier '{}' in the export requires evaluation",
                        word
                    )));
                }
            }
        }
    }

    Ok(output)
}

fn quote(raw: &str) -> Result<String, ParseError> {
    serde_json::to_string(raw).map_err(|error| ParseError::EvaluationFailed(error.to_string()))
}
