//! What the host should do next: signals derived from the current block,
//! and the completion summary handed out at the end of a flow.

use serde::Serialize;

use super::Navigator;
use crate::flow::{Block, InputLabels, UserResponse, VariableMap};
use crate::interpolate::{interpolate, interpolate_rich_text};

/// The next action a host application should take for the current position.
///
/// Blocks carried inside `Display` and `AwaitInput` are rendered copies:
/// every visible string has already been interpolated against the live
/// variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Show the block and advance when ready; no answer is expected.
    Display(Block),
    /// Show the block and wait for a respondent answer.
    AwaitInput(Block),
    /// Call [`Navigator::apply_set_variable`] to record the assignment and
    /// move on; nothing is shown.
    AssignVariable {
        block_id: String,
        variable_id: String,
        expression: String,
    },
    /// Send the respondent to `url` and stop walking the flow.
    Redirect { url: String },
    /// The flow has no current block left.
    Completed,
}

/// Everything a completion handler needs once the flow is over.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    pub flow_name: Option<String>,
    pub responses: Vec<UserResponse>,
    /// Collected variables, keyed by name where one is declared.
    pub variables: VariableMap,
}

impl Navigator {
    /// Derives the action for the current position without mutating
    /// anything; calling it twice in a row yields the same signal.
    pub fn signal(&self) -> Signal {
        let Some(block) = self.current_block() else {
            return Signal::Completed;
        };
        match block {
            Block::SetVariable(block) => Signal::AssignVariable {
                block_id: block.id.clone(),
                variable_id: block.options.variable_id.clone(),
                expression: block.options.expression_to_evaluate.clone(),
            },
            Block::Redirect(block) => Signal::Redirect {
                url: interpolate(&block.options.url, &self.state.variables),
            },
            block if block.requires_input() => Signal::AwaitInput(self.rendered_block(block)),
            block => Signal::Display(self.rendered_block(block)),
        }
    }

    /// A copy of `block` with every respondent-visible string interpolated.
    fn rendered_block(&self, block: &Block) -> Block {
        let variables = &self.state.variables;
        let mut block = block.clone();
        match &mut block {
            Block::Text(text) => {
                text.content.rich_text =
                    interpolate_rich_text(&text.content.rich_text, variables);
            }
            Block::Image(image) => {
                image.content.url = interpolate(&image.content.url, variables);
            }
            Block::TextInput(input) => render_labels(&mut input.options.labels, variables),
            Block::NumberInput(input) => render_labels(&mut input.options.labels, variables),
            Block::ChoiceInput(choice) => {
                for item in &mut choice.items {
                    if let Some(content) = &mut item.content {
                        *content = interpolate(content, variables);
                    }
                }
                if let Some(label) = &mut choice.options.button_label {
                    *label = interpolate(label, variables);
                }
            }
            Block::FileUpload(input) => render_labels(&mut input.options.labels, variables),
            Block::Rating(rating) => {
                if let Some(left) = &mut rating.options.labels.left {
                    *left = interpolate(left, variables);
                }
                if let Some(right) = &mut rating.options.labels.right {
                    *right = interpolate(right, variables);
                }
            }
            Block::SetVariable(_) | Block::Redirect(_) => {}
        }
        block
    }

    /// Assembles the completion summary for the session so far.
    ///
    /// The variable map stores each value under both its raw id and its
    /// declared name; the summary keeps the name key and drops the id twin,
    /// so consumers see `{{score}}` style names rather than opaque ids.
    pub fn summary(&self) -> CompletionSummary {
        let variables = self
            .state
            .variables
            .iter()
            .filter(|(key, _)| {
                let id_twin = self.names_by_id.contains_key(key.as_str())
                    && !self.ids_by_name.contains_key(key.as_str());
                !id_twin
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        CompletionSummary {
            flow_name: self.document.name.clone(),
            responses: self.state.responses.clone(),
            variables,
        }
    }
}

fn render_labels(labels: &mut InputLabels, variables: &VariableMap) {
    labels.placeholder = interpolate(&labels.placeholder, variables);
    labels.button = interpolate(&labels.button, variables);
}
