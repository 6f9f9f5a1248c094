//! # Fluxo - Conversational Flow Interpretation Engine
//!
//! **Fluxo** is an interpretation engine for node-based conversational forms. A flow
//! document describes groups of blocks connected by edges; Fluxo parses that document,
//! walks a respondent through it one block at a time, interpolates `{{variable}}`
//! templates into everything shown, and hands the accumulated responses back when the
//! flow completes.
//!
//! ## Core Workflow
//!
//! The engine is host-agnostic. It operates on a canonical flow document and tells the
//! host what to do next through signals. The primary workflow is:
//!
//! 1.  **Parse**: Feed a raw export (plain JSON, or a scripted `export default` module with the `module-docs` feature) to `parse_flow`, yielding a validated `FlowDocument`.
//! 2.  **Navigate**: Create a `Navigator` (or a persistent `FlowSession`) over the document and ask it for a `Signal` describing the current block.
//! 3.  **Respond**: Render the signalled block, collect the answer, record it with `add_response`, and `advance`. Edges, variables and interpolation are handled for you.
//! 4.  **Complete**: When no block remains, collect the `CompletionSummary` and forward it wherever responses live, for example through the webhook envelope.
//!
//! ## Quick Start
//!
//! The following example walks a two-block flow end to end.
//!
//! ```rust
//! use fluxo::flow::ResponseValue;
//! use fluxo::navigator::{Navigator, Signal};
//! use fluxo::parser::{FormatHint, parse_flow};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let raw = r#"{
//!         "version": "6",
//!         "name": "Onboarding",
//!         "groups": [{
//!             "id": "g1",
//!             "title": "Welcome",
//!             "blocks": [
//!                 { "id": "b1", "type": "text input", "options": {
//!                     "labels": { "placeholder": "Your name", "button": "Send" },
//!                     "variableId": "v1"
//!                 } },
//!                 { "id": "b2", "type": "text", "content": { "richText": [
//!                     { "type": "p", "children": [{ "text": "Welcome, {{name}}!" }] }
//!                 ] } }
//!             ]
//!         }],
//!         "edges": [],
//!         "variables": [{ "id": "v1", "name": "name" }]
//!     }"#;
//!
//!     // Parse the raw export into a flow document
//!     let parsed = parse_flow(raw, FormatHint::Auto)?;
//!     let mut navigator = Navigator::new(parsed.document);
//!
//!     // Walk it, answering prompts as they come
//!     loop {
//!         match navigator.signal() {
//!             Signal::AwaitInput(block) => {
//!                 navigator.add_response(block.id(), ResponseValue::from("Ada"), block.variable_id());
//!                 if !navigator.advance(None, None) {
//!                     break;
//!                 }
//!             }
//!             Signal::Display(block) => {
//!                 println!("{}", fluxo::flow::plain_text(&block_rich_text(&block)));
//!                 if !navigator.advance(None, None) {
//!                     break;
//!                 }
//!             }
//!             Signal::AssignVariable { .. } => {
//!                 if !navigator.apply_set_variable() {
//!                     break;
//!                 }
//!             }
//!             Signal::Redirect { url } => {
//!                 println!("-> {url}");
//!                 break;
//!             }
//!             Signal::Completed => break,
//!         }
//!     }
//!
//!     // Collect the results
//!     let summary = navigator.summary();
//!     assert_eq!(summary.responses.len(), 1);
//!     assert_eq!(summary.variables["name"].to_string(), "Ada");
//!     Ok(())
//! }
//!
//! fn block_rich_text(block: &fluxo::flow::Block) -> Vec<fluxo::flow::RichTextElement> {
//!     match block {
//!         fluxo::flow::Block::Text(text) => text.content.rich_text.clone(),
//!         _ => Vec::new(),
//!     }
//! }
//! ```

pub mod error;
pub mod flow;
pub mod interpolate;
pub mod navigator;
pub mod parser;
pub mod prelude;
pub mod session;
pub mod source;
pub mod store;
pub mod validate;
pub mod webhook;
