//! Parser tests: format handling, structural validation and audit
//! diagnostics.
mod common;
use common::*;
use fluxo::error::{DocumentIssue, ParseError};
use fluxo::flow::{Block, Edge, EdgeSource, EdgeTarget};
use fluxo::parser::{FormatHint, parse_flow, validate_structure};

#[test]
fn test_json_export_parses() {
    let parsed = parse_flow(ONBOARDING_FLOW_JSON, FormatHint::Json)
        .expect("Failed to parse onboarding fixture");

    assert_eq!(parsed.document.version.as_deref(), Some("6"));
    assert_eq!(parsed.name.as_deref(), Some("Onboarding"));
    assert_eq!(parsed.document.groups.len(), 3);
    assert_eq!(parsed.document.edges.len(), 2);
    assert_eq!(parsed.document.variables.len(), 2);

    // Choice items keep what the model needs and ignore the rest.
    let Some(Block::ChoiceInput(choice)) = parsed.document.groups[0].blocks.get(2) else {
        panic!("expected a choice input block");
    };
    assert_eq!(choice.items.len(), 2);
    assert_eq!(choice.items[0].content.as_deref(), Some("Free"));
    assert_eq!(choice.items[0].outgoing_edge_id.as_deref(), Some("edge-free"));
    assert_eq!(choice.options.button_label.as_deref(), Some("Choose"));
}

#[test]
fn test_auto_hint_reads_plain_json() {
    let parsed = parse_flow(ONBOARDING_FLOW_JSON, FormatHint::Auto)
        .expect("Failed to parse JSON under the auto hint");
    assert_eq!(parsed.name.as_deref(), Some("Onboarding"));
}

#[test]
fn test_format_hint_from_path() {
    assert_eq!(FormatHint::from_path("flows/export.js"), FormatHint::Module);
    assert_eq!(FormatHint::from_path("flows/export.mjs"), FormatHint::Module);
    assert_eq!(FormatHint::from_path("flows/export.ts"), FormatHint::Module);
    assert_eq!(FormatHint::from_path("flows/export.json"), FormatHint::Json);
    assert_eq!(FormatHint::from_path("export"), FormatHint::Json);
}

#[test]
fn test_malformed_json_is_a_syntax_error() {
    let error = parse_flow("{ nope", FormatHint::Json).unwrap_err();
    assert!(matches!(error, ParseError::Syntax(_)));
}

#[test]
fn test_non_object_document_is_rejected() {
    let error = parse_flow("[1, 2, 3]", FormatHint::Json).unwrap_err();
    assert!(matches!(error, ParseError::InvalidStructure(_)));
    assert!(error.to_string().contains("not an object"));
}

#[test]
fn test_missing_or_empty_groups_are_rejected() {
    let missing = parse_flow("{}", FormatHint::Json).unwrap_err();
    assert!(missing.to_string().contains("groups"));

    let empty = parse_flow(r#"{ "groups": [] }"#, FormatHint::Json).unwrap_err();
    assert!(empty.to_string().contains("groups"));
}

#[test]
fn test_document_without_blocks_is_rejected() {
    let raw = r#"{ "groups": [ { "id": "g1", "blocks": [] }, { "id": "g2" } ] }"#;
    let error = parse_flow(raw, FormatHint::Json).unwrap_err();
    assert!(error.to_string().contains("blocks"));
}

#[test]
fn test_unknown_block_type_is_rejected() {
    let raw = r#"{
        "groups": [ { "id": "g1", "blocks": [ { "id": "b1", "type": "video" } ] } ]
    }"#;
    let error = parse_flow(raw, FormatHint::Json).unwrap_err();
    assert!(matches!(error, ParseError::Syntax(_)));
    assert!(error.to_string().contains("video"));
}

#[test]
fn test_validate_structure_on_decoded_values() {
    let good = serde_json::json!({
        "groups": [ { "id": "g1", "blocks": [ { "id": "b1", "type": "text" } ] } ]
    });
    assert!(validate_structure(&good).is_ok());

    let bad = serde_json::json!({ "groups": "not an array" });
    assert!(validate_structure(&bad).is_err());
}

#[test]
fn test_audit_reports_duplicate_ids() {
    let doc = document(vec![
        group("dup", vec![text_block("b1", "one"), text_block("b1", "two")]),
        group("dup", vec![text_block("b2", "three")]),
    ]);

    let issues = doc.audit();
    assert!(issues.contains(&DocumentIssue::DuplicateGroupId("dup".to_string())));
    assert!(issues.contains(&DocumentIssue::DuplicateBlockId {
        group_id: "dup".to_string(),
        block_id: "b1".to_string(),
    }));
}

#[test]
fn test_audit_reports_dangling_edges() {
    let mut doc = simple_document();
    doc.edges = vec![
        Edge {
            id: "e1".to_string(),
            from: EdgeSource {
                block_id: "ghost-block".to_string(),
                item_id: None,
            },
            to: EdgeTarget {
                group_id: "g2".to_string(),
                block_id: None,
            },
        },
        Edge {
            id: "e2".to_string(),
            from: EdgeSource {
                block_id: "b1".to_string(),
                item_id: None,
            },
            to: EdgeTarget {
                group_id: "ghost-group".to_string(),
                block_id: None,
            },
        },
        Edge {
            id: "e3".to_string(),
            from: EdgeSource {
                block_id: "b1".to_string(),
                item_id: None,
            },
            to: EdgeTarget {
                group_id: "g2".to_string(),
                block_id: Some("ghost-target".to_string()),
            },
        },
    ];

    let issues = doc.audit();
    assert!(issues.contains(&DocumentIssue::EdgeSourceMissing {
        edge_id: "e1".to_string(),
        block_id: "ghost-block".to_string(),
    }));
    assert!(issues.contains(&DocumentIssue::EdgeTargetMissing {
        edge_id: "e2".to_string(),
        group_id: "ghost-group".to_string(),
    }));
    assert!(issues.contains(&DocumentIssue::EdgeTargetBlockMissing {
        edge_id: "e3".to_string(),
        group_id: "g2".to_string(),
        block_id: "ghost-target".to_string(),
    }));
}

#[test]
fn test_audit_is_quiet_on_a_clean_document() {
    assert!(branching_document().audit().is_empty());
}

#[test]
fn test_dangling_edges_do_not_fail_the_parse() {
    let raw = r#"{
        "groups": [ { "id": "g1", "blocks": [ { "id": "b1", "type": "text" } ] } ],
        "edges": [ {
            "id": "e1",
            "from": { "blockId": "nowhere" },
            "to": { "groupId": "also-nowhere" }
        } ]
    }"#;
    let parsed = parse_flow(raw, FormatHint::Json).expect("audit issues must not fail parsing");
    assert_eq!(parsed.document.edges.len(), 1);
}

#[cfg(feature = "module-docs")]
mod scripted {
    use super::*;

    #[test]
    fn test_scripted_export_parses() {
        let parsed = parse_flow(SCRIPTED_FLOW_SOURCE, FormatHint::Module)
            .expect("Failed to parse scripted fixture");

        assert_eq!(parsed.name.as_deref(), Some("Scripted flow"));
        assert_eq!(parsed.document.groups.len(), 1);
        assert_eq!(parsed.document.groups[0].blocks.len(), 2);
        assert_eq!(parsed.document.variables[0].name, "name");
    }

    #[test]
    fn test_auto_hint_sniffs_module_syntax() {
        let parsed = parse_flow(SCRIPTED_FLOW_SOURCE, FormatHint::Auto)
            .expect("Failed to sniff scripted fixture");
        assert_eq!(parsed.name.as_deref(), Some("Scripted flow"));
    }

    #[test]
    fn test_module_exports_assignment_parses() {
        let source = r#"
            module.exports = { groups: [ { id: "g1", blocks: [
                { id: "b1", type: "text", content: { richText: [] } },
            ] } ] };
        "#;
        let parsed = parse_flow(source, FormatHint::Module)
            .expect("Failed to parse module.exports form");
        assert_eq!(parsed.document.groups[0].id, "g1");
    }

    #[test]
    fn test_export_must_be_a_literal() {
        let error = parse_flow("export default buildFlow()", FormatHint::Module).unwrap_err();
        assert!(matches!(error, ParseError::EvaluationFailed(_)));
    }

    #[test]
    fn test_template_literals_are_rejected() {
        let source = "export default { name: `Flow`, groups: [] }";
        let error = parse_flow(source, FormatHint::Module).unwrap_err();
        assert!(error.to_string().contains("template literal"));
    }

    #[test]
    fn test_identifier_values_are_rejected() {
        let source = "export default { groups: allGroups }";
        let error = parse_flow(source, FormatHint::Module).unwrap_err();
        assert!(error.to_string().contains("allGroups"));
    }

    #[test]
    fn test_commented_out_exports_are_ignored() {
        let source = r#"
            // export default { bogus: true }
            module.exports = { groups: [ { id: "real", blocks: [
                { id: "b1", type: "text", content: { richText: [] } }
            ] } ] };
        "#;
        let parsed = parse_flow(source, FormatHint::Module)
            .expect("comments must not count as exports");
        assert_eq!(parsed.document.groups[0].id, "real");
    }
}

#[cfg(not(feature = "module-docs"))]
#[test]
fn test_scripted_input_requires_the_module_docs_feature() {
    let error = parse_flow(SCRIPTED_FLOW_SOURCE, FormatHint::Module).unwrap_err();
    assert!(matches!(error, ParseError::EvaluationFailed(_)));
    assert!(error.to_string().contains("module-docs"));
}
