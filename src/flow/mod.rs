//! The flow document model: the shared vocabulary of groups, blocks, edges,
//! variables and recorded responses.

mod block;
mod document;
mod response;

pub use block::{
    Block, ChoiceInputBlock, ChoiceItem, ChoiceOptions, FileUploadBlock, FileUploadOptions,
    ImageBlock, ImageContent, InputLabels, NumberInputBlock, NumberInputOptions, RatingBlock,
    RatingLabels, RatingOptions, RedirectBlock, RedirectOptions, RichTextChild, RichTextContent,
    RichTextElement, SetVariableBlock, SetVariableOptions, TextBlock, TextInputBlock,
    TextInputOptions, plain_text,
};
pub use document::{Edge, EdgeSource, EdgeTarget, FlowDocument, Group, Variable};
pub use response::{ResponseValue, UserResponse, VariableMap, VariableValue};
