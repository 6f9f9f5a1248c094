//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the fluxo crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! // Use the prelude to get easy access to all the core types.
//! use fluxo::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Load and parse a flow document
//! let raw = std::fs::read_to_string("path/to/flow.json")?;
//! let parsed = parse_flow(&raw, FormatHint::Auto)?;
//!
//! // Walk the display blocks
//! let mut navigator = Navigator::new(parsed.document);
//! while let Signal::Display(block) = navigator.signal() {
//!     println!("{:?}", block);
//!     if !navigator.advance(None, None) {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Parsing
pub use crate::parser::{FormatHint, ParsedFlow, parse_flow};

// Flow document model
pub use crate::flow::{
    Block, Edge, FlowDocument, Group, ResponseValue, UserResponse, Variable, VariableMap,
    VariableValue, plain_text,
};

// Navigation
pub use crate::navigator::{
    CompletionSummary, Navigator, NavigatorState, Signal, TransitionToken,
};

// Sessions, sources and persistence
pub use crate::session::FlowSession;
pub use crate::source::{DocumentSource, FetchOutcome, MemoryDocumentSource};
pub use crate::store::{FileProgressStore, MemoryProgressStore, ProgressStore};

// Interpolation
pub use crate::interpolate::{collect_variable_names, interpolate};

// Completion delivery
pub use crate::webhook::{WebhookPayload, deliverable_url};

// Error types
pub use crate::error::{
    DocumentIssue, NavigationError, ParseError, StoreError, ValidationError, WebhookError,
};

// Standard library re-exports commonly used with this crate
pub use std::collections::HashMap;
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
