use super::*;

#[test]
fn empty_key_is_missing_credential() {
    let err = GeminiClient::new(ServiceConfig::default().with_api_key("  ")).unwrap_err();
    assert!(matches!(err, ServiceError::MissingCredential));
}

#[test]
fn endpoint_joins_base_and_model() {
    let client = GeminiClient::new(
        ServiceConfig::default()
            .with_api_key("k")
            .with_base_url("http://127.0.0.1:9/"),
    )
    .unwrap();
    assert_eq!(
        client.endpoint("gemini-2.5-flash"),
        "http://127.0.0.1:9/v1beta/models/gemini-2.5-flash:generateContent"
    );
    assert!(!format!("{client:?}").contains("\"k\""));
}

#[test]
fn genre_is_appended_only_when_present() {
    assert_eq!(captions_prompt(None), CAPTIONS_PROMPT);
    assert_eq!(captions_prompt(Some("   ")), CAPTIONS_PROMPT);
    let p = captions_prompt(Some("Sarcastic"));
    assert!(p.starts_with(CAPTIONS_PROMPT));
    assert!(p.ends_with("Write them in a Sarcastic style."));
}
