use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A single styled text run inside a rich-text paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichTextChild {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

/// One rich-text paragraph: an element kind (paragraph, heading, ...) and
/// its styled children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextElement {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub children: Vec<RichTextChild>,
}

/// The payload of a `text` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextElement>,
}

/// The payload of an `image` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    pub url: String,
}

/// Prompt and submit labels shared by the input block kinds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputLabels {
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub button: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInputOptions {
    #[serde(default)]
    pub labels: InputLabels,
    pub variable_id: Option<String>,
    /// Multi-line answers when set.
    #[serde(default)]
    pub is_long: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberInputOptions {
    #[serde(default)]
    pub labels: InputLabels,
    pub variable_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOptions {
    pub variable_id: Option<String>,
    /// Collects the selected item contents into a list value when set.
    #[serde(default)]
    pub is_multiple_choice: bool,
    pub button_label: Option<String>,
}

/// One selectable entry of a `choice input` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceItem {
    pub id: String,
    pub content: Option<String>,
    /// Overrides the block-level default edge when this item is selected.
    pub outgoing_edge_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadOptions {
    #[serde(default)]
    pub labels: InputLabels,
    pub variable_id: Option<String>,
    #[serde(default)]
    pub is_multiple_allowed: bool,
}

/// End labels shown beside a rating scale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RatingLabels {
    pub left: Option<String>,
    pub right: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingOptions {
    /// The scale runs from 0 to `length` inclusive.
    #[serde(default = "default_rating_length")]
    pub length: u32,
    #[serde(default)]
    pub labels: RatingLabels,
    pub variable_id: Option<String>,
}

impl Default for RatingOptions {
    fn default() -> Self {
        Self {
            length: default_rating_length(),
            labels: RatingLabels::default(),
            variable_id: None,
        }
    }
}

fn default_rating_length() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableOptions {
    pub variable_id: String,
    /// Opaque passthrough; the engine assigns the expression string itself.
    #[serde(default)]
    pub expression_to_evaluate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectOptions {
    pub url: String,
}

/// A message block rendering rich text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub id: String,
    #[serde(default)]
    pub content: RichTextContent,
    pub outgoing_edge_id: Option<String>,
}

/// A message block rendering a single image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub id: String,
    pub content: ImageContent,
    pub outgoing_edge_id: Option<String>,
}

/// A free-text prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInputBlock {
    pub id: String,
    #[serde(default)]
    pub options: TextInputOptions,
    pub outgoing_edge_id: Option<String>,
}

/// A numeric prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberInputBlock {
    pub id: String,
    #[serde(default)]
    pub options: NumberInputOptions,
    pub outgoing_edge_id: Option<String>,
}

/// A branching selection among items, each of which may carry its own edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceInputBlock {
    pub id: String,
    #[serde(default)]
    pub options: ChoiceOptions,
    #[serde(default)]
    pub items: Vec<ChoiceItem>,
    pub outgoing_edge_id: Option<String>,
}

/// A file-upload prompt; answers are file names, possibly several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadBlock {
    pub id: String,
    #[serde(default)]
    pub options: FileUploadOptions,
    pub outgoing_edge_id: Option<String>,
}

/// An integer-scale prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBlock {
    pub id: String,
    #[serde(default)]
    pub options: RatingOptions,
    pub outgoing_edge_id: Option<String>,
}

/// An auto-advancing variable assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableBlock {
    pub id: String,
    pub options: SetVariableOptions,
    pub outgoing_edge_id: Option<String>,
}

/// A terminal block sending the respondent to an external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectBlock {
    pub id: String,
    pub options: RedirectOptions,
    pub outgoing_edge_id: Option<String>,
}

/// One interaction step in a flow, discriminated on the wire by its `type`
/// field.
///
/// The discriminant strings are those of the flow export format, spaces and
/// mixed case included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "text")]
    Text(TextBlock),
    #[serde(rename = "image")]
    Image(ImageBlock),
    #[serde(rename = "text input")]
    TextInput(TextInputBlock),
    #[serde(rename = "number input")]
    NumberInput(NumberInputBlock),
    #[serde(rename = "choice input")]
    ChoiceInput(ChoiceInputBlock),
    #[serde(rename = "file upload")]
    FileUpload(FileUploadBlock),
    #[serde(rename = "rating")]
    Rating(RatingBlock),
    #[serde(rename = "Set variable")]
    SetVariable(SetVariableBlock),
    #[serde(rename = "Redirect")]
    Redirect(RedirectBlock),
}

impl Block {
    /// The block's id, unique within its group.
    pub fn id(&self) -> &str {
        match self {
            Block::Text(block) => &block.id,
            Block::Image(block) => &block.id,
            Block::TextInput(block) => &block.id,
            Block::NumberInput(block) => &block.id,
            Block::ChoiceInput(block) => &block.id,
            Block::FileUpload(block) => &block.id,
            Block::Rating(block) => &block.id,
            Block::SetVariable(block) => &block.id,
            Block::Redirect(block) => &block.id,
        }
    }

    /// The default edge taken when the block completes, if any.
    pub fn outgoing_edge_id(&self) -> Option<&str> {
        match self {
            Block::Text(block) => block.outgoing_edge_id.as_deref(),
            Block::Image(block) => block.outgoing_edge_id.as_deref(),
            Block::TextInput(block) => block.outgoing_edge_id.as_deref(),
            Block::NumberInput(block) => block.outgoing_edge_id.as_deref(),
            Block::ChoiceInput(block) => block.outgoing_edge_id.as_deref(),
            Block::FileUpload(block) => block.outgoing_edge_id.as_deref(),
            Block::Rating(block) => block.outgoing_edge_id.as_deref(),
            Block::SetVariable(block) => block.outgoing_edge_id.as_deref(),
            Block::Redirect(block) => block.outgoing_edge_id.as_deref(),
        }
    }

    /// The variable the block writes its answer into, if any.
    pub fn variable_id(&self) -> Option<&str> {
        match self {
            Block::Text(_) | Block::Image(_) | Block::Redirect(_) => None,
            Block::TextInput(block) => block.options.variable_id.as_deref(),
            Block::NumberInput(block) => block.options.variable_id.as_deref(),
            Block::ChoiceInput(block) => block.options.variable_id.as_deref(),
            Block::FileUpload(block) => block.options.variable_id.as_deref(),
            Block::Rating(block) => block.options.variable_id.as_deref(),
            Block::SetVariable(block) => Some(&block.options.variable_id),
        }
    }

    /// Whether the block waits for a respondent action before it can
    /// advance.
    pub fn requires_input(&self) -> bool {
        matches!(
            self,
            Block::TextInput(_)
                | Block::NumberInput(_)
                | Block::ChoiceInput(_)
                | Block::FileUpload(_)
                | Block::Rating(_)
        )
    }

    /// The wire discriminant, as serialized in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Text(_) => "text",
            Block::Image(_) => "image",
            Block::TextInput(_) => "text input",
            Block::NumberInput(_) => "number input",
            Block::ChoiceInput(_) => "choice input",
            Block::FileUpload(_) => "file upload",
            Block::Rating(_) => "rating",
            Block::SetVariable(_) => "Set variable",
            Block::Redirect(_) => "Redirect",
        }
    }
}

/// Flattens rich text to plain text: the children of a paragraph joined by
/// single spaces, paragraphs joined by newlines.
pub fn plain_text(paragraphs: &[RichTextElement]) -> String {
    paragraphs
        .iter()
        .map(|paragraph| {
            paragraph
                .children
                .iter()
                .map(|child| child.text.as_str())
                .join(" ")
        })
        .join("\n")
}
