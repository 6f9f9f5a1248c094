use thiserror::Error;

/// Errors that can occur while parsing a raw flow document.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("Failed to parse flow JSON: {0}")]
    Syntax(String),

    #[error("Failed to evaluate scripted flow module: {0}")]
    EvaluationFailed(String),

    #[error("Invalid flow structure: {0}")]
    InvalidStructure(String),
}

/// A non-fatal structural problem reported by a document audit.
///
/// Issues are diagnostics: traversal degrades around them instead of
/// failing, so a flow with a dangling edge still runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentIssue {
    #[error("Group id '{0}' is declared more than once")]
    DuplicateGroupId(String),

    #[error("Block id '{block_id}' is declared more than once in group '{group_id}'")]
    DuplicateBlockId { group_id: String, block_id: String },

    #[error("Edge '{edge_id}' starts from block '{block_id}', which does not exist")]
    EdgeSourceMissing { edge_id: String, block_id: String },

    #[error("Edge '{edge_id}' targets group '{group_id}', which does not exist")]
    EdgeTargetMissing { edge_id: String, group_id: String },

    #[error("Edge '{edge_id}' targets block '{block_id}', which does not exist in group '{group_id}'")]
    EdgeTargetBlockMissing {
        edge_id: String,
        group_id: String,
        block_id: String,
    },
}

/// Errors raised for snapshots that no longer fit their document.
///
/// End-of-flow is never an error: `Navigator::advance` reports it as a
/// boolean result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error(
        "Stored position (group {group_index}, block {block_index}) does not exist in this document of {group_count} groups"
    )]
    StalePosition {
        group_index: usize,
        block_index: usize,
        group_count: usize,
    },
}

/// Errors that can occur in a progress persistence adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Progress store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Progress snapshot could not be encoded or decoded: {0}")]
    Corrupt(String),
}

/// Errors that can occur while delivering a completion payload to a webhook.
#[derive(Error, Debug, Clone)]
pub enum WebhookError {
    #[error("Webhook URL '{url}' is not valid: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Webhook URL scheme '{scheme}' is not allowed; only http and https are delivered")]
    UnsupportedScheme { scheme: String },

    #[error("Webhook delivery failed: {0}")]
    Delivery(String),

    #[error("Webhook endpoint answered with status {0}")]
    BadStatus(u16),
}

/// Rejections produced by the respondent input validators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("Number {value} is below the minimum of {min}")]
    BelowMinimum { value: f64, min: f64 },

    #[error("Number {value} is above the maximum of {max}")]
    AboveMaximum { value: f64, max: f64 },

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("'{0}' is not a valid http(s) URL")]
    InvalidUrl(String),
}
