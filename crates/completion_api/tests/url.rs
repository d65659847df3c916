use completion_api::normalize_completion_url;

#[test]
fn url_normalization_keeps_existing_completion_endpoint() {
    assert_eq!(
        normalize_completion_url("http://localhost:3000/api/completion"),
        "http://localhost:3000/api/completion"
    );
}

#[test]
fn url_normalization_appends_completion_to_api_base() {
    assert_eq!(
        normalize_completion_url("http://localhost:3000/api"),
        "http://localhost:3000/api/completion"
    );
}

#[test]
fn url_normalization_appends_api_completion_to_generic_base() {
    assert_eq!(
        normalize_completion_url("http://localhost:3000"),
        "http://localhost:3000/api/completion"
    );
}

#[test]
fn url_normalization_falls_back_to_default_base_on_blank_input() {
    assert_eq!(
        normalize_completion_url("   "),
        "http://localhost:3000/api/completion"
    );
}
