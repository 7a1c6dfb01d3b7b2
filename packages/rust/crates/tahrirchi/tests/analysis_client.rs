//! Client contract tests against a scripted backend: tagging, validation, error classification.

use tahrirchi::test_support::{ScriptedBackend, scripted_client};
use tahrirchi::{
    AnalysisError, AnalysisResult, BackendError, JSON_MIME_TYPE, LanguageCode, Operation,
    response_schema,
};

const API_KEY: &str = "test-key-AIzaSyD0notreal";

#[tokio::test]
async fn grammar_check_returns_grammar_result_with_errors() {
    let backend = ScriptedBackend::replying(
        r#"{"correctedText":"I have an apple.","errors":[{"offset":2,"length":3,"original":"has","suggestion":"have","explanation":"subject-verb agreement"}]}"#,
    );
    let client = scripted_client(backend.clone(), Some(API_KEY)).expect("client");

    let result = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .expect("grammar result");

    assert_eq!(result.operation(), Operation::GrammarCheck);
    let AnalysisResult::GrammarCheck(grammar) = &result else {
        panic!("expected grammar result, got {result:?}");
    };
    assert_eq!(grammar.corrected_text, "I have an apple.");
    assert_eq!(grammar.errors.len(), 1);
    assert_eq!(grammar.errors[0].span_in("I has a apple."), Some("has"));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn simplify_returns_simplify_result() {
    let backend = ScriptedBackend::replying(
        r#"{"simplifiedText":"Tiny particles behave in ways we can only predict, not know for sure.","summary":"Used shorter sentences and simpler words."}"#,
    );
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let result = client
        .analyze_text(
            "The quantum mechanical behavior of subatomic particles is probabilistic.",
            LanguageCode::En,
            Operation::Simplify,
        )
        .await
        .expect("simplify result");

    let simplify = result.as_simplify().expect("simplify variant");
    assert!(!simplify.summary.is_empty());
    assert_eq!(
        result.primary_text(),
        "Tiny particles behave in ways we can only predict, not know for sure."
    );
}

#[tokio::test]
async fn no_issues_yields_empty_error_list() {
    let backend =
        ScriptedBackend::replying(r#"{"correctedText":"I have an apple.","errors":[]}"#);
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let result = client
        .analyze_text("I have an apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .expect("grammar result");

    let grammar = result.as_grammar().expect("grammar variant");
    assert!(grammar.errors.is_empty());
    assert_eq!(grammar.corrected_text, "I have an apple.");
}

#[tokio::test]
async fn request_carries_instruction_schema_and_mime_type() {
    let backend =
        ScriptedBackend::replying(r#"{"simplifiedText":"Bu oson.","summary":"Qisqa gaplar."}"#);
    let client = scripted_client(backend.clone(), Some(API_KEY)).expect("client");

    client
        .analyze_text("Bu juda murakkab jumla.", LanguageCode::Uz, Operation::Simplify)
        .await
        .expect("simplify result");

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.contents, "Bu juda murakkab jumla.");
    assert_eq!(call.response_mime_type, JSON_MIME_TYPE);
    assert_eq!(call.response_schema, response_schema(Operation::Simplify));
    assert!(call.system_instruction.contains("Uzbek"));
    assert_eq!(call.api_key.expose(), API_KEY);
    assert_eq!(call.model, tahrirchi::DEFAULT_MODEL);
}

#[tokio::test]
async fn missing_credential_is_configuration_error_without_backend_call() {
    let backend = ScriptedBackend::replying(r#"{"correctedText":"x","errors":[]}"#);
    let client = scripted_client(backend.clone(), None).expect("client");

    let err = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Configuration(_)), "got {err:?}");
    assert!(err.to_string().contains("API_KEY"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn blank_input_is_rejected_before_backend_call() {
    let backend = ScriptedBackend::replying(r#"{"correctedText":"x","errors":[]}"#);
    let client = scripted_client(backend.clone(), Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("  \n\t ", LanguageCode::Ru, Operation::Simplify)
        .await
        .unwrap_err();

    assert_eq!(err, AnalysisError::EmptyInput);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn missing_required_field_is_malformed() {
    let backend = ScriptedBackend::replying(r#"{"errors":[]}"#);
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse { .. }), "got {err:?}");
}

#[tokio::test]
async fn wrong_shape_for_operation_is_malformed() {
    // A simplify payload returned for a grammar check must not be coerced.
    let backend = ScriptedBackend::replying(r#"{"simplifiedText":"a","summary":"b"}"#);
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
}

#[tokio::test]
async fn error_entry_with_wrong_types_is_malformed() {
    let backend = ScriptedBackend::replying(
        r#"{"correctedText":"I have an apple.","errors":[{"offset":"two","length":3,"original":"has","suggestion":"have","explanation":"x"}]}"#,
    );
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
}

#[tokio::test]
async fn empty_body_is_malformed() {
    for backend in [ScriptedBackend::empty(), ScriptedBackend::replying("   ")] {
        let client = scripted_client(backend, Some(API_KEY)).expect("client");
        let err = client
            .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse { .. }), "got {err:?}");
    }
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let backend = ScriptedBackend::replying("Sure! Here is your corrected text: I have an apple.");
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
}

#[tokio::test]
async fn malformed_message_never_echoes_model_output() {
    let chunks = (0..200)
        .map(|i| format!("\"model output chunk {i}\""))
        .collect::<Vec<_>>()
        .join(",");
    let backend = ScriptedBackend::replying(&format!("[{chunks}]"));
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse { .. }), "got {err:?}");
    let message = err.to_string();
    assert!(message.len() <= 120, "message too long: {} bytes", message.len());
    assert!(!message.contains("model output chunk"), "got: {message}");
    assert!(err.detail().is_some_and(|detail| !detail.is_empty()));
}

#[tokio::test]
async fn blank_summary_is_malformed() {
    let backend = ScriptedBackend::replying(r#"{"simplifiedText":"Short text.","summary":"  "}"#);
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("A long and winding text.", LanguageCode::En, Operation::Simplify)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
}

#[tokio::test]
async fn forbidden_is_authentication_error_without_credential_in_message() {
    let backend = ScriptedBackend::failing(BackendError::Status {
        status: 403,
        status_text: Some("PERMISSION_DENIED".to_string()),
        message: format!("key {API_KEY} is not allowed"),
    });
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .unwrap_err();

    assert_eq!(err, AnalysisError::Authentication);
    assert!(!err.to_string().contains(API_KEY));
}

#[tokio::test]
async fn invalid_key_reported_as_bad_request_is_authentication_error() {
    let backend = ScriptedBackend::failing(BackendError::Status {
        status: 400,
        status_text: Some("INVALID_ARGUMENT".to_string()),
        message: "API key not valid. Please pass a valid API key.".to_string(),
    });
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .unwrap_err();

    assert_eq!(err, AnalysisError::Authentication);
}

#[tokio::test]
async fn server_errors_and_timeouts_are_backend_unavailable() {
    let failures = [
        BackendError::Status {
            status: 503,
            status_text: Some("UNAVAILABLE".to_string()),
            message: "The model is overloaded.".to_string(),
        },
        BackendError::Status {
            status: 400,
            status_text: Some("INVALID_ARGUMENT".to_string()),
            message: "Request contains an invalid argument.".to_string(),
        },
        BackendError::Timeout,
        BackendError::Transport("connection refused".to_string()),
    ];
    for failure in failures {
        let client =
            scripted_client(ScriptedBackend::failing(failure), Some(API_KEY)).expect("client");
        let err = client
            .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
            .await
            .unwrap_err();
        assert_eq!(err, AnalysisError::BackendUnavailable);
        assert_eq!(
            err.to_string(),
            "Unable to reach the AI engine. Please try again later."
        );
    }
}

#[tokio::test]
async fn undecodable_envelope_is_malformed() {
    let backend = ScriptedBackend::failing(BackendError::Decode("expected value".to_string()));
    let client = scripted_client(backend, Some(API_KEY)).expect("client");

    let err = client
        .analyze_text("I has a apple.", LanguageCode::En, Operation::GrammarCheck)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
}
