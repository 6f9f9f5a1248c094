//! The flow navigator: the state machine that walks a respondent through a
//! document one block at a time, accumulating responses and variables.

mod signal;
mod state;

pub use signal::{CompletionSummary, Signal};
pub use state::{NavigatorState, TransitionToken};

use ahash::AHashMap;
use chrono::Utc;
use tracing::{debug, warn};

use crate::error::NavigationError;
use crate::flow::{
    Block, FlowDocument, Group, ResponseValue, RichTextElement, UserResponse, VariableMap,
    VariableValue,
};
use crate::interpolate::{interpolate, interpolate_rich_text};

/// The state machine tracking current position, responses and variables
/// through a session.
///
/// One navigator serves one respondent, single threaded; a discrete action
/// commits at most one transition. The document is read only here.
pub struct Navigator {
    document: FlowDocument,
    names_by_id: AHashMap<String, String>,
    ids_by_name: AHashMap<String, String>,
    state: NavigatorState,
}

impl Navigator {
    /// Creates a navigator positioned at the first block of `document`.
    pub fn new(document: FlowDocument) -> Self {
        let mut names_by_id = AHashMap::with_capacity(document.variables.len());
        let mut ids_by_name = AHashMap::with_capacity(document.variables.len());
        for variable in &document.variables {
            names_by_id.insert(variable.id.clone(), variable.name.clone());
            ids_by_name.insert(variable.name.clone(), variable.id.clone());
        }
        Self {
            document,
            names_by_id,
            ids_by_name,
            state: NavigatorState::initial(),
        }
    }

    /// Creates a navigator resuming from a previously persisted state.
    pub fn with_state(
        document: FlowDocument,
        state: NavigatorState,
    ) -> Result<Self, NavigationError> {
        let mut navigator = Self::new(document);
        navigator.restore(state)?;
        Ok(navigator)
    }

    pub fn document(&self) -> &FlowDocument {
        &self.document
    }

    /// The full progress snapshot, as a store would persist it.
    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    /// Responses recorded so far, in traversal order.
    pub fn responses(&self) -> &[UserResponse] {
        &self.state.responses
    }

    /// The live variable map, keyed by both variable ids and names.
    pub fn variables(&self) -> &VariableMap {
        &self.state.variables
    }

    /// Replaces the navigator's progress with a stored snapshot.
    ///
    /// A snapshot pointing outside the document is rejected, so a stale
    /// session from an older document revision cannot strand the
    /// respondent; callers fall back to a fresh start.
    pub fn restore(&mut self, state: NavigatorState) -> Result<(), NavigationError> {
        let in_range = self
            .document
            .groups
            .get(state.current_group_index)
            .is_some_and(|group| state.current_block_index < group.blocks.len().max(1));
        if !in_range {
            return Err(NavigationError::StalePosition {
                group_index: state.current_group_index,
                block_index: state.current_block_index,
                group_count: self.document.groups.len(),
            });
        }
        self.state = state;
        Ok(())
    }

    /// The group at the current position, or `None` past the end.
    pub fn current_group(&self) -> Option<&Group> {
        self.document.groups.get(self.state.current_group_index)
    }

    /// The block at the current position, or `None` when the position is
    /// out of range and the flow is over.
    pub fn current_block(&self) -> Option<&Block> {
        self.current_group()?
            .blocks
            .get(self.state.current_block_index)
    }

    /// Moves to the next position, committing at most one transition.
    ///
    /// The edge to resolve is the supplied `outgoing_edge_id` or, absent
    /// that, the current block's own default. When either names an edge,
    /// the first edge leaving the current block that is compatible with
    /// `item_id` decides the jump; otherwise traversal falls back to the
    /// next block in the group, then to the first block of the next group.
    ///
    /// Returns `false` when no further position exists; callers check
    /// [`Navigator::is_complete`]. A dangling edge target degrades to the
    /// sequential fallback instead of failing.
    pub fn advance(&mut self, outgoing_edge_id: Option<&str>, item_id: Option<&str>) -> bool {
        match self.next_position(outgoing_edge_id, item_id) {
            Some((group_index, block_index)) => {
                self.state.current_group_index = group_index;
                self.state.current_block_index = block_index;
                self.state.step += 1;
                true
            }
            None => false,
        }
    }

    fn next_position(
        &self,
        outgoing_edge_id: Option<&str>,
        item_id: Option<&str>,
    ) -> Option<(usize, usize)> {
        let current_block = self.current_block();
        let edge_id =
            outgoing_edge_id.or_else(|| current_block.and_then(Block::outgoing_edge_id));

        if let (Some(_), Some(block)) = (edge_id, current_block) {
            if let Some(edge) = self.document.matching_edge(block.id(), item_id) {
                match self.document.group_position(&edge.to.group_id) {
                    Some(group_index) => {
                        let block_index = edge
                            .to
                            .block_id
                            .as_deref()
                            .and_then(|block_id| {
                                self.document.groups[group_index].block_position(block_id)
                            })
                            .unwrap_or(0);
                        return Some((group_index, block_index));
                    }
                    None => {
                        warn!(
                            edge_id = %edge.id,
                            group_id = %edge.to.group_id,
                            "edge targets a group that does not exist; continuing in sequence"
                        );
                    }
                }
            }
        }

        let group = self.current_group()?;
        if self.state.current_block_index + 1 < group.blocks.len() {
            return Some((
                self.state.current_group_index,
                self.state.current_block_index + 1,
            ));
        }
        if self.state.current_group_index + 1 < self.document.groups.len() {
            return Some((self.state.current_group_index + 1, 0));
        }
        None
    }

    /// Captures a token bound to the current step, for serializing a
    /// timer-driven advance against a user-driven one.
    pub fn transition_token(&self) -> TransitionToken {
        TransitionToken(self.state.step)
    }

    /// Commits [`Navigator::advance`] only when nothing has mutated the
    /// navigator since `token` was taken; a stale token is a no-op
    /// returning `false`.
    pub fn advance_with_token(
        &mut self,
        token: TransitionToken,
        outgoing_edge_id: Option<&str>,
        item_id: Option<&str>,
    ) -> bool {
        if token.0 != self.state.step {
            debug!(
                held = token.0,
                current = self.state.step,
                "discarding stale transition"
            );
            return false;
        }
        self.advance(outgoing_edge_id, item_id)
    }

    /// Records a respondent answer, stamped now.
    ///
    /// When `variable_id` is given, the value also lands in the variable
    /// map through [`Navigator::write_variable`], and is visible to
    /// interpolation the moment this returns.
    pub fn add_response(
        &mut self,
        block_id: &str,
        value: ResponseValue,
        variable_id: Option<&str>,
    ) {
        if let Some(variable_id) = variable_id {
            self.write_variable(variable_id, VariableValue::from(value.clone()));
        }
        self.state.responses.push(UserResponse {
            block_id: block_id.to_string(),
            variable_id: variable_id.map(str::to_string),
            value,
            timestamp: Utc::now(),
        });
        self.state.step += 1;
    }

    /// Writes `value` under both the variable's id and its resolved name.
    ///
    /// Interpolation looks variables up by name while blocks reference them
    /// by id; the two keys are always written together so neither view can
    /// silently go missing. An id with no declared name falls back to the
    /// id itself.
    pub fn write_variable(&mut self, variable_id: &str, value: VariableValue) {
        let name = self.variable_name(variable_id).to_string();
        self.state
            .variables
            .insert(variable_id.to_string(), value.clone());
        self.state.variables.insert(name, value);
    }

    /// The human-readable name declared for a variable id, or the id itself
    /// when unmapped.
    ///
    /// The fallback hands the argument back, so the returned borrow is tied
    /// to both `self` and `variable_id`.
    pub fn variable_name<'a>(&'a self, variable_id: &'a str) -> &'a str {
        self.names_by_id
            .get(variable_id)
            .map(String::as_str)
            .unwrap_or(variable_id)
    }

    /// The id declared for a variable name, if any.
    pub fn variable_id(&self, name: &str) -> Option<&str> {
        self.ids_by_name.get(name).map(String::as_str)
    }

    /// Processes a `Set variable` block at the current position: the
    /// expression string becomes the variable's value, a response is
    /// recorded, and the navigator advances.
    ///
    /// Expressions are opaque passthrough; nothing is evaluated. Returns
    /// `false` when the current block is no `Set variable`, or when the
    /// flow cannot advance further.
    pub fn apply_set_variable(&mut self) -> bool {
        let Some(Block::SetVariable(block)) = self.current_block() else {
            return false;
        };
        let block_id = block.id.clone();
        let variable_id = block.options.variable_id.clone();
        let expression = block.options.expression_to_evaluate.clone();

        self.add_response(
            &block_id,
            ResponseValue::Single(expression),
            Some(&variable_id),
        );
        self.advance(None, None)
    }

    /// Whether the position is at or beyond the last block of the last
    /// group.
    pub fn is_complete(&self) -> bool {
        let Some(last_group) = self.document.groups.last() else {
            return true;
        };
        self.state.current_group_index + 1 >= self.document.groups.len()
            && self.state.current_block_index + 1 >= last_group.blocks.len()
    }

    /// Returns the navigator to the start of the flow, wiping responses and
    /// variables.
    pub fn reset(&mut self) {
        self.state = NavigatorState::initial();
    }

    /// Interpolates `text` against the live variable map, as it stands at
    /// this call; there is no cached copy that could lag behind a just
    /// recorded response.
    pub fn interpolate_text(&self, text: &str) -> String {
        interpolate(text, &self.state.variables)
    }

    /// Rich-text counterpart of [`Navigator::interpolate_text`].
    pub fn interpolate_rich_text(&self, paragraphs: &[RichTextElement]) -> Vec<RichTextElement> {
        interpolate_rich_text(paragraphs, &self.state.variables)
    }
}
