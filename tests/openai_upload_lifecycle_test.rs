//! OpenAI document upload lifecycle through the dispatcher.

mod support;

use llm_dispatch::prelude::*;
use support::{Call, RecordingTransport, Reply, dispatcher, pdf_bytes};
use tracing_test::traced_test;

fn pdf_params() -> RequestParameters {
    RequestParameters::builder(ProviderType::OpenAi, "Summarize the report")
        .system_instruction("Be brief")
        .build()
}

#[tokio::test]
async fn pdf_is_uploaded_referenced_then_deleted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, pdf_bytes()).expect("write pdf");

    let transport = RecordingTransport::default();
    let response = dispatcher(&transport)
        .dispatch(&pdf_params(), AttachmentInput::new().path(&path))
        .await
        .expect("dispatch ok");
    assert_eq!(response.text().as_deref(), Some("ok"));

    assert_eq!(transport.kinds(), vec!["upload", "json", "delete"]);
    let calls = transport.calls();

    let Call::Multipart(upload) = &calls[0] else {
        panic!("expected upload first");
    };
    assert_eq!(upload.url, "https://api.openai.com/v1/files");
    assert_eq!(
        upload.fields,
        vec![("purpose".to_string(), "assistants".to_string())]
    );
    assert_eq!(upload.file.field_name, "file");
    assert_eq!(upload.file.filename, "report.pdf");
    assert_eq!(upload.file.mime_type, "application/pdf");
    assert_eq!(upload.file.bytes, pdf_bytes());
    assert_eq!(
        upload.headers.get("authorization").unwrap(),
        "Bearer sk-test"
    );

    let Call::Json(main) = &calls[1] else {
        panic!("expected provider call second");
    };
    assert_eq!(main.url, "https://api.openai.com/v1/responses");
    assert_eq!(main.body["instructions"], "Be brief");
    assert_eq!(
        main.body["input"][0]["content"],
        serde_json::json!([
            { "type": "input_file", "file_id": "file-abc123" },
            { "type": "input_text", "text": "Summarize the report" }
        ])
    );

    assert_eq!(calls[2].url(), "https://api.openai.com/v1/files/file-abc123");
}

#[tokio::test]
async fn delete_still_runs_when_provider_call_fails() {
    let transport = RecordingTransport::default().with_json_reply(Reply::Status(
        500,
        serde_json::json!({ "error": { "message": "internal" } }),
    ));
    let err = dispatcher(&transport)
        .dispatch(
            &pdf_params(),
            AttachmentInput::new().bytes(pdf_bytes()).filename("report.pdf"),
        )
        .await
        .unwrap_err();

    match err {
        LlmError::ApiError { code, details, .. } => {
            assert_eq!(code, 500);
            assert_eq!(details.unwrap()["error"]["message"], "internal");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(transport.kinds(), vec!["upload", "json", "delete"]);
}

#[tokio::test]
async fn delete_still_runs_when_transport_fails() {
    let transport = RecordingTransport::default()
        .with_json_reply(Reply::TransportError("connection reset".into()));
    let err = dispatcher(&transport)
        .dispatch(
            &pdf_params(),
            AttachmentInput::new().bytes(pdf_bytes()).mime_type("application/pdf"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::HttpError(_)));
    assert_eq!(transport.kinds(), vec!["upload", "json", "delete"]);
}

#[tokio::test]
#[traced_test]
async fn delete_failure_is_only_a_warning() {
    let transport = RecordingTransport::default()
        .with_delete_reply(Reply::Text(404, "no such file".into()));
    let response = dispatcher(&transport)
        .dispatch(
            &pdf_params(),
            AttachmentInput::new().bytes(pdf_bytes()).filename("report.pdf"),
        )
        .await
        .expect("cleanup failure must not fail the call");

    assert_eq!(response.status, 200);
    assert_eq!(transport.kinds(), vec!["upload", "json", "delete"]);
    assert!(logs_contain("failed to delete uploaded attachment"));
    assert!(logs_contain("file-abc123"));
}

#[tokio::test]
async fn upload_failure_aborts_before_provider_call() {
    let transport = RecordingTransport::default()
        .with_upload_reply(Reply::Text(413, "file too large".into()));
    let err = dispatcher(&transport)
        .dispatch(
            &pdf_params(),
            AttachmentInput::new().bytes(pdf_bytes()).filename("big.pdf"),
        )
        .await
        .unwrap_err();

    match err {
        LlmError::UploadError { status, message } => {
            assert_eq!(status, Some(413));
            assert_eq!(message, "file too large");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(transport.kinds(), vec!["upload"]);
}

#[tokio::test]
async fn upload_transport_error_is_upload_error() {
    let transport =
        RecordingTransport::default().with_upload_reply(Reply::TransportError("dns".into()));
    let err = dispatcher(&transport)
        .dispatch(
            &pdf_params(),
            AttachmentInput::new().bytes(pdf_bytes()).filename("a.pdf"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::UploadError { status: None, .. }));
    assert_eq!(transport.kinds(), vec!["upload"]);
}

#[tokio::test]
async fn images_and_other_providers_never_upload() {
    let transport = RecordingTransport::default();
    let d = dispatcher(&transport);

    d.dispatch(
        &RequestParameters::builder(ProviderType::OpenAi, "Describe").build(),
        AttachmentInput::new()
            .bytes(support::jpeg_bytes())
            .filename("photo.jpg"),
    )
    .await
    .expect("openai image");

    for provider in [ProviderType::Gemini, ProviderType::Anthropic] {
        d.dispatch(
            &RequestParameters::builder(provider, "Read").build(),
            AttachmentInput::new().bytes(pdf_bytes()).filename("a.pdf"),
        )
        .await
        .expect("inline pdf");
    }

    assert_eq!(transport.kinds(), vec!["json", "json", "json"]);
}

#[tokio::test]
async fn pdf_is_inlined_when_uploads_are_disabled() {
    let transport = RecordingTransport::default();
    let d = llm_dispatch::Dispatcher::builder()
        .config(
            DispatcherConfig::default()
                .with_override(ConfigOverride::UploadMediaTypes(Vec::new())),
        )
        .transport(std::sync::Arc::new(transport.clone()))
        .credentials(support::test_credentials())
        .build();

    d.dispatch(
        &pdf_params(),
        AttachmentInput::new().bytes(pdf_bytes()).filename("r.pdf"),
    )
    .await
    .expect("dispatch ok");

    assert_eq!(transport.kinds(), vec!["json"]);
    let block = &transport.json_body()["input"][0]["content"][0];
    assert_eq!(block["type"], "input_file");
    assert_eq!(block["filename"], "r.pdf");
}
