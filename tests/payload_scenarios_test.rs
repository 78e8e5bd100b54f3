//! End-to-end payload shapes observed at the transport boundary.

mod support;

use base64::Engine;
use llm_dispatch::prelude::*;
use serde_json::{Value, json};
use std::io::{Cursor, Seek, SeekFrom};
use support::{RecordingTransport, dispatcher, jpeg_bytes};

/// Content blocks of the single user turn, per provider.
fn blocks(provider: ProviderType, body: &Value) -> Vec<Value> {
    let pointer = match provider {
        ProviderType::OpenAi => "/input/0/content",
        ProviderType::Gemini => "/contents/0/parts",
        ProviderType::Anthropic => "/messages/0/content",
    };
    body.pointer(pointer)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn prompt_text(block: &Value) -> Option<&str> {
    block.get("text").and_then(Value::as_str)
}

#[tokio::test]
async fn describe_this_image_yields_image_then_prompt_for_every_provider() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("image.jpg");
    std::fs::write(&path, jpeg_bytes()).expect("write");
    let b64 = base64::engine::general_purpose::STANDARD.encode(jpeg_bytes());

    for provider in ProviderType::ALL {
        let transport = RecordingTransport::default();
        dispatcher(&transport)
            .dispatch(
                &RequestParameters::builder(provider, "Describe this").build(),
                AttachmentInput::new().path(&path),
            )
            .await
            .expect("dispatch ok");

        let body = transport.json_body();
        let blocks = blocks(provider, &body);
        assert_eq!(blocks.len(), 2, "{provider}: {body}");
        assert_eq!(prompt_text(&blocks[1]), Some("Describe this"));

        match provider {
            ProviderType::OpenAi => {
                assert_eq!(blocks[0]["type"], "input_image");
                assert_eq!(
                    blocks[0]["image_url"],
                    format!("data:image/jpeg;base64,{b64}")
                );
            }
            ProviderType::Gemini => {
                assert_eq!(blocks[0]["inline_data"]["mime_type"], "image/jpeg");
                assert_eq!(blocks[0]["inline_data"]["data"], b64);
            }
            ProviderType::Anthropic => {
                assert_eq!(blocks[0]["type"], "image");
                assert_eq!(blocks[0]["source"]["media_type"], "image/jpeg");
                assert_eq!(blocks[0]["source"]["data"], b64);
            }
        }
    }
}

#[tokio::test]
async fn unknown_extension_becomes_a_note_with_name_and_generic_type() {
    for provider in ProviderType::ALL {
        let transport = RecordingTransport::default();
        dispatcher(&transport)
            .dispatch(
                &RequestParameters::builder(provider, "What is this?").build(),
                AttachmentInput::new()
                    .bytes(vec![0x13, 0x37, 0x00, 0xAB])
                    .filename("file.xyz"),
            )
            .await
            .expect("dispatch ok");

        let blocks = blocks(provider, &transport.json_body());
        assert_eq!(blocks.len(), 2);
        let note = prompt_text(&blocks[0]).expect("note is text");
        assert!(note.contains("file.xyz"), "{provider}: {note}");
        assert!(note.contains("application/octet-stream"), "{provider}: {note}");
        assert_eq!(prompt_text(&blocks[1]), Some("What is this?"));
    }
}

#[tokio::test]
async fn whitespace_only_text_attachment_leaves_only_the_prompt() {
    for provider in ProviderType::ALL {
        let transport = RecordingTransport::default();
        dispatcher(&transport)
            .dispatch(
                &RequestParameters::builder(provider, "Anything here?").build(),
                AttachmentInput::new()
                    .bytes(b"  \n\t \r\n".to_vec())
                    .filename("empty.txt"),
            )
            .await
            .expect("dispatch ok");

        let blocks = blocks(provider, &transport.json_body());
        assert_eq!(blocks.len(), 1, "{provider}");
        assert_eq!(prompt_text(&blocks[0]), Some("Anything here?"));
    }
}

#[tokio::test]
async fn text_attachment_carries_provenance() {
    let transport = RecordingTransport::default();
    dispatcher(&transport)
        .dispatch(
            &RequestParameters::builder(ProviderType::Gemini, "Summarize").build(),
            AttachmentInput::new()
                .bytes(b"meeting at noon".to_vec())
                .filename("notes.txt"),
        )
        .await
        .expect("dispatch ok");

    let blocks = blocks(ProviderType::Gemini, &transport.json_body());
    assert_eq!(
        blocks[0],
        json!({ "text": "(Contents of notes.txt):\n\nmeeting at noon" })
    );
}

#[tokio::test]
async fn two_origins_fail_before_any_transport_call() {
    let transport = RecordingTransport::default();
    let err = dispatcher(&transport)
        .dispatch(
            &RequestParameters::builder(ProviderType::Anthropic, "hi").build(),
            AttachmentInput::new()
                .path("/definitely/missing/file.pdf")
                .bytes(b"data".to_vec()),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ConfigurationError(_)));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn missing_path_is_not_found_and_nothing_is_sent() {
    let transport = RecordingTransport::default();
    let err = dispatcher(&transport)
        .dispatch(
            &RequestParameters::builder(ProviderType::OpenAi, "hi").build(),
            AttachmentInput::new().path("/definitely/missing/report.pdf"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::NotFound(_)));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn stream_can_be_dispatched_twice_with_identical_payloads() {
    let mut cursor = Cursor::new(b"reusable notes".to_vec());
    cursor.seek(SeekFrom::Start(3)).expect("seek");

    let transport = RecordingTransport::default();
    let d = dispatcher(&transport);
    let params = RequestParameters::builder(ProviderType::Anthropic, "Go").build();

    for _ in 0..2 {
        d.dispatch(
            &params,
            AttachmentInput::new().stream(&mut cursor).filename("notes.txt"),
        )
        .await
        .expect("dispatch ok");
        assert_eq!(cursor.position(), 3);
    }

    let bodies: Vec<Value> = transport
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            support::Call::Json(r) => Some(r.body),
            _ => None,
        })
        .collect();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(
        blocks(ProviderType::Anthropic, &bodies[0])[0]["text"],
        "(Contents of notes.txt):\n\nreusable notes"
    );
}

#[tokio::test]
async fn system_instruction_placement_per_provider() {
    for provider in ProviderType::ALL {
        let transport = RecordingTransport::default();
        dispatcher(&transport)
            .dispatch(
                &RequestParameters::builder(provider, "Hello")
                    .system_instruction("Reply in Latin")
                    .build(),
                AttachmentInput::new(),
            )
            .await
            .expect("dispatch ok");

        let body = transport.json_body();
        match provider {
            ProviderType::OpenAi => assert_eq!(body["instructions"], "Reply in Latin"),
            ProviderType::Gemini => assert_eq!(
                body["systemInstruction"],
                json!({ "parts": [{ "text": "Reply in Latin" }] })
            ),
            ProviderType::Anthropic => assert_eq!(body["system"], "Reply in Latin"),
        }
        assert_eq!(blocks(provider, &body).len(), 1);
    }
}

#[tokio::test]
async fn provider_error_status_is_api_error_with_raw_body() {
    let transport = RecordingTransport::default()
        .with_json_reply(support::Reply::Text(429, "slow down".into()));
    let err = dispatcher(&transport)
        .dispatch(
            &RequestParameters::builder(ProviderType::Gemini, "hi").build(),
            AttachmentInput::new(),
        )
        .await
        .unwrap_err();
    match &err {
        LlmError::ApiError { code, message, .. } => {
            assert_eq!(*code, 429);
            assert_eq!(message, "slow down");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn raw_response_is_returned_unmodified() {
    let raw = json!({
        "candidates": [{ "content": { "parts": [{ "text": "salve" }] } }],
        "usageMetadata": { "totalTokenCount": 3 }
    });
    let transport =
        RecordingTransport::default().with_json_reply(support::Reply::Status(200, raw.clone()));
    let response = dispatcher(&transport)
        .dispatch(
            &RequestParameters::builder(ProviderType::Gemini, "hi").build(),
            AttachmentInput::new(),
        )
        .await
        .expect("dispatch ok");
    assert_eq!(response.raw, raw);
    assert_eq!(response.provider, ProviderType::Gemini);
    assert_eq!(response.text().as_deref(), Some("salve"));
}

#[tokio::test]
async fn missing_credentials_fail_before_sending() {
    let transport = RecordingTransport::default();
    let d = Dispatcher::builder()
        .transport(std::sync::Arc::new(transport.clone()))
        .credentials(std::sync::Arc::new(StaticCredentials::new()))
        .build();
    let err = d
        .dispatch(
            &RequestParameters::builder(ProviderType::OpenAi, "hi").build(),
            AttachmentInput::new().bytes(support::pdf_bytes()).filename("a.pdf"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey(_)));
    assert!(transport.calls().is_empty());
}
