//! Small pure checks for respondent answers, used by drivers before a
//! response is recorded.

use url::Url;

use crate::error::ValidationError;

/// Parses a numeric answer and checks it against optional bounds.
///
/// Non-finite parses ("NaN", "inf") are rejected as not a number; a bound
/// check against them would silently pass.
pub fn validate_number(
    raw: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber(trimmed.to_string()));
    }
    if let Some(min) = min {
        if value < min {
            return Err(ValidationError::BelowMinimum { value, min });
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(ValidationError::AboveMaximum { value, max });
        }
    }
    Ok(value)
}

/// Checks the basic shape of an email address: one `@`, a non-empty local
/// part, and a domain with at least one dot separating non-empty labels.
pub fn validate_email(raw: &str) -> Result<(), ValidationError> {
    let value = raw.trim();
    let shaped = !value.is_empty()
        && !value.contains(char::is_whitespace)
        && value.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .rsplit_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        });
    if shaped {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

/// Checks that an answer parses as an absolute `http` or `https` URL.
pub fn validate_http_url(raw: &str) -> Result<Url, ValidationError> {
    let value = raw.trim();
    let url =
        Url::parse(value).map_err(|_| ValidationError::InvalidUrl(value.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ValidationError::InvalidUrl(value.to_string())),
    }
}
