//! Common test utilities for building flow documents and fixtures.
use fluxo::flow::{
    Block, ChoiceInputBlock, ChoiceItem, ChoiceOptions, Edge, EdgeSource, EdgeTarget,
    FlowDocument, Group, InputLabels, RatingBlock, RatingLabels, RatingOptions, RichTextChild,
    RichTextContent, RichTextElement, SetVariableBlock, SetVariableOptions, TextBlock,
    TextInputBlock, TextInputOptions, Variable,
};

/// A single-run paragraph for rich-text content.
#[allow(dead_code)]
pub fn paragraph(text: &str) -> RichTextElement {
    RichTextElement {
        element_type: "p".to_string(),
        children: vec![RichTextChild {
            text: text.to_string(),
            bold: false,
            italic: false,
        }],
    }
}

/// A `text` block with one plain paragraph.
#[allow(dead_code)]
pub fn text_block(id: &str, text: &str) -> Block {
    Block::Text(TextBlock {
        id: id.to_string(),
        content: RichTextContent {
            rich_text: vec![paragraph(text)],
        },
        outgoing_edge_id: None,
    })
}

/// A `text input` block writing into the given variable.
#[allow(dead_code)]
pub fn text_input_block(id: &str, variable_id: Option<&str>) -> Block {
    Block::TextInput(TextInputBlock {
        id: id.to_string(),
        options: TextInputOptions {
            labels: InputLabels {
                placeholder: "Type your answer".to_string(),
                button: "Send".to_string(),
            },
            variable_id: variable_id.map(str::to_string),
            is_long: false,
        },
        outgoing_edge_id: None,
    })
}

/// A `rating` block with a 0..=length scale.
#[allow(dead_code)]
pub fn rating_block(id: &str, length: u32, variable_id: Option<&str>) -> Block {
    Block::Rating(RatingBlock {
        id: id.to_string(),
        options: RatingOptions {
            length,
            labels: RatingLabels {
                left: Some("Not likely".to_string()),
                right: Some("Very likely".to_string()),
            },
            variable_id: variable_id.map(str::to_string),
        },
        outgoing_edge_id: None,
    })
}

/// A `Set variable` block assigning an opaque expression string.
#[allow(dead_code)]
pub fn set_variable_block(id: &str, variable_id: &str, expression: &str) -> Block {
    Block::SetVariable(SetVariableBlock {
        id: id.to_string(),
        options: SetVariableOptions {
            variable_id: variable_id.to_string(),
            expression_to_evaluate: expression.to_string(),
        },
        outgoing_edge_id: None,
    })
}

#[allow(dead_code)]
pub fn group(id: &str, blocks: Vec<Block>) -> Group {
    Group {
        id: id.to_string(),
        title: id.to_string(),
        blocks,
    }
}

#[allow(dead_code)]
pub fn document(groups: Vec<Group>) -> FlowDocument {
    FlowDocument {
        version: Some("6".to_string()),
        name: Some("Test flow".to_string()),
        groups,
        edges: Vec::new(),
        variables: Vec::new(),
    }
}

/// Two sequential groups of two text blocks each; no edges.
#[allow(dead_code)]
pub fn simple_document() -> FlowDocument {
    document(vec![
        group(
            "g1",
            vec![text_block("b1", "First"), text_block("b2", "Second")],
        ),
        group(
            "g2",
            vec![text_block("b3", "Third"), text_block("b4", "Fourth")],
        ),
    ])
}

/// A single choice whose items branch to different groups through
/// item-scoped edges, with a declared `answer` variable.
#[allow(dead_code)]
pub fn branching_document() -> FlowDocument {
    let choice = Block::ChoiceInput(ChoiceInputBlock {
        id: "choice".to_string(),
        options: ChoiceOptions {
            variable_id: Some("var-choice".to_string()),
            is_multiple_choice: false,
            button_label: None,
        },
        items: vec![
            ChoiceItem {
                id: "item-yes".to_string(),
                content: Some("Yes".to_string()),
                outgoing_edge_id: Some("edge-yes".to_string()),
            },
            ChoiceItem {
                id: "item-no".to_string(),
                content: Some("No".to_string()),
                outgoing_edge_id: Some("edge-no".to_string()),
            },
        ],
        outgoing_edge_id: None,
    });

    let mut doc = document(vec![
        group("start", vec![choice]),
        group("yes-path", vec![text_block("yes-text", "You said yes")]),
        group("no-path", vec![text_block("no-text", "You said no")]),
    ]);
    doc.edges = vec![
        Edge {
            id: "edge-yes".to_string(),
            from: EdgeSource {
                block_id: "choice".to_string(),
                item_id: Some("item-yes".to_string()),
            },
            to: EdgeTarget {
                group_id: "yes-path".to_string(),
                block_id: None,
            },
        },
        Edge {
            id: "edge-no".to_string(),
            from: EdgeSource {
                block_id: "choice".to_string(),
                item_id: Some("item-no".to_string()),
            },
            to: EdgeTarget {
                group_id: "no-path".to_string(),
                block_id: None,
            },
        },
    ];
    doc.variables = vec![Variable {
        id: "var-choice".to_string(),
        name: "answer".to_string(),
    }];
    doc
}

/// A realistic JSON export: intro text, a name prompt, a branching choice
/// and a farewell using the collected variable. Items carry the extra
/// `blockId`/`type` fields real exports include.
#[allow(dead_code)]
pub const ONBOARDING_FLOW_JSON: &str = r#"{
    "version": "6",
    "name": "Onboarding",
    "theme": { "font": "Inter" },
    "groups": [
        {
            "id": "intro",
            "title": "Intro",
            "blocks": [
                {
                    "id": "welcome",
                    "type": "text",
                    "content": { "richText": [
                        { "type": "p", "children": [{ "text": "Hi there!" }] }
                    ] }
                },
                {
                    "id": "ask-name",
                    "type": "text input",
                    "options": {
                        "labels": { "placeholder": "Your name", "button": "Send" },
                        "variableId": "var-name"
                    }
                },
                {
                    "id": "pick-plan",
                    "type": "choice input",
                    "options": { "variableId": "var-plan", "buttonLabel": "Choose" },
                    "items": [
                        {
                            "id": "item-free",
                            "blockId": "pick-plan",
                            "type": 0,
                            "content": "Free",
                            "outgoingEdgeId": "edge-free"
                        },
                        {
                            "id": "item-pro",
                            "blockId": "pick-plan",
                            "type": 0,
                            "content": "Pro",
                            "outgoingEdgeId": "edge-pro"
                        }
                    ]
                }
            ]
        },
        {
            "id": "free-group",
            "title": "Free",
            "blocks": [
                {
                    "id": "free-bye",
                    "type": "text",
                    "content": { "richText": [
                        { "type": "p", "children": [{ "text": "Enjoy the free tier, {{name}}!" }] }
                    ] }
                }
            ]
        },
        {
            "id": "pro-group",
            "title": "Pro",
            "blocks": [
                {
                    "id": "pro-bye",
                    "type": "text",
                    "content": { "richText": [
                        { "type": "p", "children": [{ "text": "Welcome aboard, {{name}}!" }] }
                    ] }
                }
            ]
        }
    ],
    "edges": [
        {
            "id": "edge-free",
            "from": { "blockId": "pick-plan", "itemId": "item-free" },
            "to": { "groupId": "free-group" }
        },
        {
            "id": "edge-pro",
            "from": { "blockId": "pick-plan", "itemId": "item-pro" },
            "to": { "groupId": "pro-group" }
        }
    ],
    "variables": [
        { "id": "var-name", "name": "name" },
        { "id": "var-plan", "name": "plan" }
    ]
}"#;

/// The same document family written as a scripted module export, with the
/// comment styles, quote styles and trailing commas editor tooling emits.
#[allow(dead_code)]
pub const SCRIPTED_FLOW_SOURCE: &str = r#"
// Fixture mirroring the export default wrapper legacy tooling writes.
const revision = 6;

export default {
    version: '6',
    name: "Scripted flow",
    /* a single group, no edges */
    groups: [
        {
            id: 'g1',
            title: 'Intro',
            blocks: [
                {
                    id: 'b1',
                    type: 'text',
                    content: {
                        richText: [{ type: 'p', children: [{ text: 'Hello {{name}}', bold: true }] }],
                    },
                },
                {
                    id: 'b2',
                    type: 'text input',
                    options: {
                        labels: { placeholder: 'Your name', button: 'Send' },
                        variableId: 'v1',
                    },
                },
            ],
        },
    ],
    edges: [],
    variables: [{ id: 'v1', name: 'name' }],
};
"#;
