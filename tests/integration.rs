//! Integration tests for Fluxo
//!
//! End-to-end tests that walk complete flow documents from raw source to
//! completion summary.
//!
mod common;
use common::*;
use fluxo::prelude::*;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_onboarding_walk_takes_the_pro_branch() {
        let parsed = parse_flow(ONBOARDING_FLOW_JSON, FormatHint::Auto)
            .expect("Failed to parse onboarding flow");
        let mut session = FlowSession::start(parsed.document, MemoryProgressStore::new(), "it-1");

        // Block 1: the welcome message.
        let Signal::Display(block) = session.signal() else {
            panic!("expected the welcome message first");
        };
        assert_eq!(block.id(), "welcome");
        assert!(session.advance(None, None));

        // Block 2: the name prompt.
        let Signal::AwaitInput(block) = session.signal() else {
            panic!("expected the name prompt");
        };
        assert_eq!(block.id(), "ask-name");
        session.add_response("ask-name", ResponseValue::from("Ada"), Some("var-name"));
        assert!(session.advance(None, None));

        // Block 3: the plan choice, branching through the item's edge.
        let Signal::AwaitInput(Block::ChoiceInput(choice)) = session.signal() else {
            panic!("expected the plan choice");
        };
        let pro = choice.items[1].clone();
        assert_eq!(pro.content.as_deref(), Some("Pro"));
        session.add_response("pick-plan", ResponseValue::from("Pro"), Some("var-plan"));
        assert!(session.advance(pro.outgoing_edge_id.as_deref(), Some(&pro.id)));

        // The edge lands on the pro group; the farewell uses the collected
        // name.
        let Signal::Display(Block::Text(farewell)) = session.signal() else {
            panic!("expected the pro farewell");
        };
        assert_eq!(plain_text(&farewell.content.rich_text), "Welcome aboard, Ada!");

        assert!(!session.advance(None, None));
        assert!(session.is_complete());

        let summary = session.summary();
        assert_eq!(summary.flow_name.as_deref(), Some("Onboarding"));
        assert_eq!(summary.responses.len(), 2);
        assert_eq!(summary.variables.get("name"), Some(&VariableValue::from("Ada")));
        assert_eq!(summary.variables.get("plan"), Some(&VariableValue::from("Pro")));
        assert!(!summary.variables.contains_key("var-name"));

        println!(
            "Walked {} responses to completion of '{}'",
            summary.responses.len(),
            summary.flow_name.as_deref().unwrap_or("unnamed")
        );
    }

    #[test]
    fn test_onboarding_walk_takes_the_free_branch() {
        let parsed = parse_flow(ONBOARDING_FLOW_JSON, FormatHint::Json)
            .expect("Failed to parse onboarding flow");
        let mut session = FlowSession::start(parsed.document, MemoryProgressStore::new(), "it-2");

        session.advance(None, None);
        session.add_response("ask-name", ResponseValue::from("Grace"), Some("var-name"));
        session.advance(None, None);
        session.add_response("pick-plan", ResponseValue::from("Free"), Some("var-plan"));
        assert!(session.advance(Some("edge-free"), Some("item-free")));

        let Signal::Display(Block::Text(farewell)) = session.signal() else {
            panic!("expected the free farewell");
        };
        assert_eq!(
            plain_text(&farewell.content.rich_text),
            "Enjoy the free tier, Grace!"
        );
    }

    #[test]
    fn test_progress_survives_a_restart() {
        let dir = tempfile::tempdir().expect("Failed to create a temp dir");
        let parsed = parse_flow(ONBOARDING_FLOW_JSON, FormatHint::Json)
            .expect("Failed to parse onboarding flow");

        {
            let store = FileProgressStore::open(dir.path()).expect("Failed to open store");
            let mut session = FlowSession::start(parsed.document.clone(), store, "restart");
            session.advance(None, None);
            session.add_response("ask-name", ResponseValue::from("Ada"), Some("var-name"));
            session.advance(None, None);
        }

        let store = FileProgressStore::open(dir.path()).expect("Failed to reopen store");
        let session = FlowSession::start(parsed.document, store, "restart");

        let Signal::AwaitInput(block) = session.signal() else {
            panic!("expected to resume at the plan choice");
        };
        assert_eq!(block.id(), "pick-plan");
        assert_eq!(
            session.navigator().variables().get("name"),
            Some(&VariableValue::from("Ada"))
        );
    }

    #[test]
    fn test_set_variable_and_redirect_round_trip() {
        let raw = r#"{
            "name": "Scored exit",
            "groups": [ { "id": "g1", "blocks": [
                {
                    "id": "assign",
                    "type": "Set variable",
                    "options": { "variableId": "var-score", "expressionToEvaluate": "7" }
                },
                {
                    "id": "out",
                    "type": "Redirect",
                    "options": { "url": "https://example.com/r/{{score}}" }
                }
            ] } ],
            "variables": [ { "id": "var-score", "name": "score" } ]
        }"#;
        let parsed = parse_flow(raw, FormatHint::Json).expect("Failed to parse redirect flow");
        let mut session = FlowSession::start(parsed.document, MemoryProgressStore::new(), "it-3");

        let Signal::AssignVariable { variable_id, .. } = session.signal() else {
            panic!("expected the assignment signal");
        };
        assert_eq!(variable_id, "var-score");
        assert!(session.apply_set_variable());

        let Signal::Redirect { url } = session.signal() else {
            panic!("expected the redirect signal");
        };
        assert_eq!(url, "https://example.com/r/7");
        deliverable_url(&url).expect("redirect URL must pass the scheme gate");
    }

    #[test]
    fn test_completion_payload_matches_the_summary() {
        let parsed = parse_flow(ONBOARDING_FLOW_JSON, FormatHint::Json)
            .expect("Failed to parse onboarding flow");
        let mut navigator = Navigator::new(parsed.document);
        navigator.add_response("ask-name", ResponseValue::from("Ada"), Some("var-name"));

        let summary = navigator.summary();
        let payload = WebhookPayload::new(&summary);
        assert_eq!(payload.flow_name, "Onboarding");
        assert_eq!(payload.responses.len(), summary.responses.len());
    }

    #[test]
    fn test_collect_variable_names_sees_the_whole_document() {
        let parsed = parse_flow(ONBOARDING_FLOW_JSON, FormatHint::Json)
            .expect("Failed to parse onboarding flow");

        let names = collect_variable_names(&parsed.document);
        assert!(names.contains(&"name".to_string()));
        assert!(names.contains(&"plan".to_string()));

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[cfg(feature = "module-docs")]
    #[test]
    fn test_scripted_module_end_to_end() {
        let parsed = parse_flow(SCRIPTED_FLOW_SOURCE, FormatHint::Auto)
            .expect("Failed to parse scripted flow");
        let mut session = FlowSession::start(parsed.document, MemoryProgressStore::new(), "it-4");

        // No name collected yet: the token stays verbatim.
        let Signal::Display(Block::Text(greeting)) = session.signal() else {
            panic!("expected the greeting");
        };
        assert_eq!(plain_text(&greeting.content.rich_text), "Hello {{name}}");
        assert!(session.advance(None, None));

        session.add_response("b2", ResponseValue::from("Lin"), Some("v1"));
        assert!(!session.advance(None, None));
        assert!(session.is_complete());

        let summary = session.summary();
        assert_eq!(summary.variables.get("name"), Some(&VariableValue::from("Lin")));
    }
}
