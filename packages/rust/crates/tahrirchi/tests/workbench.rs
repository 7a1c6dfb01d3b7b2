//! Workbench state transitions plus copy/download of the primary text.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tahrirchi::test_support::{ScriptedBackend, scripted_client};
use tahrirchi::{
    AnalysisResult, BackendError, ErrorKind, LanguageCode, NO_ERRORS_MESSAGE, Operation,
    SimplifyResult, ViewState, Workbench, artifact_file_name, render_result, write_artifact_at,
};
use tempfile::TempDir;

fn workbench(backend: Arc<ScriptedBackend>) -> Workbench {
    Workbench::new(Arc::new(scripted_client(backend, Some("k")).expect("client")))
}

#[tokio::test]
async fn invoke_success_exposes_copy_text_and_download() {
    let backend =
        ScriptedBackend::replying(r#"{"simplifiedText":"Easy now.","summary":"Shorter words."}"#);
    let mut bench = workbench(backend);

    let state = bench
        .invoke("A convoluted sentence.", LanguageCode::En, Operation::Simplify)
        .await;
    assert!(matches!(state, ViewState::Ready { .. }));
    assert_eq!(bench.copy_text(), Some("Easy now."));

    let dir = TempDir::new().expect("tempdir");
    let path = bench
        .download(dir.path())
        .expect("download")
        .expect("a file");
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "Easy now.");
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name.starts_with("tahrirchi-result-") && name.ends_with(".txt"));
}

#[tokio::test]
async fn invoke_failure_records_kind_and_discards_previous_result() {
    let ok = ScriptedBackend::replying(r#"{"correctedText":"Fine.","errors":[]}"#);
    let mut bench = workbench(ok);
    bench
        .invoke("Fine.", LanguageCode::En, Operation::GrammarCheck)
        .await;
    assert!(bench.result().is_some());

    let mut failing = workbench(ScriptedBackend::failing(BackendError::Timeout));
    let state = failing
        .invoke("Fine.", LanguageCode::En, Operation::GrammarCheck)
        .await;
    assert_eq!(
        state,
        &ViewState::Failed {
            kind: ErrorKind::BackendUnavailable,
            message: "Unable to reach the AI engine. Please try again later.".to_string(),
        }
    );
    assert!(failing.copy_text().is_none());

    let state = bench.invoke("   ", LanguageCode::En, Operation::GrammarCheck).await;
    assert!(matches!(
        state,
        ViewState::Failed {
            kind: ErrorKind::EmptyInput,
            ..
        }
    ));
    assert!(bench.result().is_none());
}

#[tokio::test]
async fn clear_returns_to_idle_and_download_is_noop() {
    let backend = ScriptedBackend::replying(r#"{"correctedText":"Fine.","errors":[]}"#);
    let mut bench = workbench(backend);
    bench
        .invoke("Fine.", LanguageCode::En, Operation::GrammarCheck)
        .await;

    bench.clear();

    assert_eq!(bench.state(), &ViewState::Idle);
    let dir = TempDir::new().expect("tempdir");
    assert!(bench.download(dir.path()).expect("download").is_none());
}

#[test]
fn artifact_name_uses_unix_millis() {
    let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    assert_eq!(artifact_file_name(at), "tahrirchi-result-1700000000123.txt");
}

#[test]
fn write_artifact_creates_missing_directory() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path().join("nested/out");
    let result = AnalysisResult::Simplify(SimplifyResult {
        simplified_text: "Oson matn.".to_string(),
        summary: "Qisqaroq gaplar.".to_string(),
    });
    let at = Utc.timestamp_millis_opt(42).unwrap();

    let path = write_artifact_at(&result, &dir, at).expect("write");

    assert_eq!(path, dir.join("tahrirchi-result-42.txt"));
    assert_eq!(std::fs::read_to_string(path).expect("read"), "Oson matn.");
}

#[tokio::test]
async fn render_lists_corrections_or_no_errors_message() {
    let input = "I has a apple.";
    let backend = ScriptedBackend::replying(
        r#"{"correctedText":"I have an apple.","errors":[{"offset":2,"length":3,"original":"has","suggestion":"have","explanation":"subject-verb agreement"}]}"#,
    );
    let mut bench = workbench(backend);
    bench.invoke(input, LanguageCode::En, Operation::GrammarCheck).await;
    let rendered = render_result(bench.result().expect("result"), input);
    assert!(rendered.contains("I have an apple."));
    assert!(rendered.contains("Suggested improvements (1):"));
    assert!(rendered.contains("\"has\" -> \"have\" (at 2): subject-verb agreement"));

    let clean = ScriptedBackend::replying(r#"{"correctedText":"I have an apple.","errors":[]}"#);
    let mut bench = workbench(clean);
    bench
        .invoke("I have an apple.", LanguageCode::En, Operation::GrammarCheck)
        .await;
    let rendered = render_result(bench.result().expect("result"), "I have an apple.");
    assert!(rendered.contains(NO_ERRORS_MESSAGE));
}
