use completion_api::CompletionRequest;
use serde_json::{json, Value};

#[test]
fn payload_serialization_matches_gateway_shape() {
    let request = CompletionRequest::new(vec!["* Roses are red".to_owned()]);
    let body = serde_json::to_value(&request).expect("serialize payload");

    assert_eq!(body, json!({ "layers": ["* Roses are red"] }));
}

#[test]
fn framing_prefixes_each_fragment_with_a_bullet() {
    let request = CompletionRequest::from_fragments(["Roses are red", "violets are blue"]);

    assert_eq!(
        request.layers,
        vec!["* Roses are red".to_owned(), "* violets are blue".to_owned()]
    );
}

#[test]
fn framing_preserves_fragment_order() {
    let request = CompletionRequest::from_fragments(["first", "second", "third"]);
    let body = serde_json::to_value(&request).expect("serialize payload");

    assert_eq!(
        body["layers"],
        Value::Array(vec![
            Value::String("* first".to_owned()),
            Value::String("* second".to_owned()),
            Value::String("* third".to_owned()),
        ])
    );
}

#[test]
fn empty_fragment_sequence_produces_an_empty_request() {
    let request = CompletionRequest::from_fragments(Vec::<String>::new());
    assert!(request.is_empty());
}
