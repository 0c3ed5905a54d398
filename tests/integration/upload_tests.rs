//! Upload integration tests.
//!
//! Tests verify:
//! - The success payload with file names and exact byte sizes
//! - Declared content type checks on every slot, in DOD, ETP, TR order
//! - Missing parts, non-multipart and malformed bodies, and the body size limit

use axum::body::Body;
use axum::http::{header, Request, StatusCode};

use upload_gateway::{create_router, RouterConfig, UPLOAD_PATH};

use super::test_utils::{
    authorized_upload, body_bytes, body_json, file_bytes, send, test_router, valid_documents,
    MultipartBody, DOCX_MIME, PDF_MIME, TEST_PASSWORD, TEST_USERNAME,
};

// =============================================================================
// Successful Uploads
// =============================================================================

#[tokio::test]
async fn test_reference_scenario() {
    let response = send(test_router(), authorized_upload(valid_documents().finish())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({
            "status": "sucesso",
            "usuario_responsavel": "admin",
            "mensagem": "Arquivos recepcionados com segurança.",
            "dados_recebidos": {
                "dod": {"nome": "a.pdf", "tamanho": 120},
                "etp": {"nome": "b.docx", "tamanho": 340},
                "tr": {"nome": "c.pdf", "tamanho": 75},
            }
        })
    );
}

#[tokio::test]
async fn test_sizes_match_uploaded_bytes() {
    let body = MultipartBody::new()
        .file("dod", "dod.docx", Some(DOCX_MIME), &file_bytes(4096, 7))
        .file("etp", "etp.pdf", Some(PDF_MIME), &[])
        .file("tr", "tr.docx", Some(DOCX_MIME), &file_bytes(1, 9))
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["dados_recebidos"]["dod"]["tamanho"], 4096);
    assert_eq!(body["dados_recebidos"]["etp"]["tamanho"], 0);
    assert_eq!(body["dados_recebidos"]["tr"]["tamanho"], 1);
}

#[tokio::test]
async fn test_binary_content_with_crlf_is_counted_exactly() {
    let tricky = b"\r\n--not-the-boundary\r\n\r\n\x00\xff".to_vec();
    let body = MultipartBody::new()
        .file("dod", "a.pdf", Some(PDF_MIME), &tricky)
        .file("etp", "b.pdf", Some(PDF_MIME), &tricky)
        .file("tr", "c.pdf", Some(PDF_MIME), &tricky)
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["dados_recebidos"]["tr"]["tamanho"], tricky.len());
}

#[tokio::test]
async fn test_parts_in_any_order() {
    let body = MultipartBody::new()
        .file("tr", "c.pdf", Some(PDF_MIME), &file_bytes(75, 3))
        .file("dod", "a.pdf", Some(PDF_MIME), &file_bytes(120, 1))
        .file("etp", "b.docx", Some(DOCX_MIME), &file_bytes(340, 2))
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["dados_recebidos"]["dod"]["nome"], "a.pdf");
    assert_eq!(body["dados_recebidos"]["etp"]["nome"], "b.docx");
    assert_eq!(body["dados_recebidos"]["tr"]["nome"], "c.pdf");
}

#[tokio::test]
async fn test_extra_parts_are_ignored() {
    let body = valid_documents()
        .text("observacao", "urgente")
        .file("anexo", "foto.png", Some("image/png"), b"\x89PNG")
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_filename_is_reported_as_sent() {
    let body = MultipartBody::new()
        .file("dod", "", Some(PDF_MIME), b"%PDF")
        .file("etp", "b.pdf", Some(PDF_MIME), b"%PDF")
        .file("tr", "c.pdf", Some(PDF_MIME), b"%PDF")
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body["dados_recebidos"]["dod"],
        serde_json::json!({"nome": "", "tamanho": 4})
    );
}

#[tokio::test]
async fn test_identical_requests_identical_responses() {
    let first = send(test_router(), authorized_upload(valid_documents().finish())).await;
    let second = send(test_router(), authorized_upload(valid_documents().finish())).await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_bytes(first).await, body_bytes(second).await);
}

// =============================================================================
// Content Type Gate
// =============================================================================

#[tokio::test]
async fn test_unsupported_type_on_each_slot() {
    let cases = [
        ("dod", "DOD", "dod.txt"),
        ("etp", "ETP", "etp.txt"),
        ("tr", "TR", "tr.txt"),
    ];

    for (field, label, filename) in cases {
        let mut body = MultipartBody::new();
        for slot in ["dod", "etp", "tr"] {
            body = if slot == field {
                body.file(slot, filename, Some("text/plain"), b"texto")
            } else {
                body.file(slot, "ok.pdf", Some(PDF_MIME), b"%PDF")
            };
        }

        let response = send(test_router(), authorized_upload(body.finish())).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = body_json(response).await;
        assert_eq!(
            body["detail"],
            format!("O arquivo {} ({}) deve ser PDF ou DOCX.", label, filename)
        );
        assert_eq!(body["status"], 415);
    }
}

#[tokio::test]
async fn test_first_failing_slot_is_reported() {
    let body = MultipartBody::new()
        .file("tr", "tr.odt", Some("application/vnd.oasis.opendocument.text"), b"x")
        .file("etp", "etp.doc", Some("application/msword"), b"x")
        .file("dod", "dod.pdf", Some(PDF_MIME), b"x")
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body = body_json(response).await;
    assert_eq!(body["detail"], "O arquivo ETP (etp.doc) deve ser PDF ou DOCX.");
}

#[tokio::test]
async fn test_declared_type_case_is_preserved() {
    for declared in ["Application/PDF", "APPLICATION/PDF", "application/PDF"] {
        let body = MultipartBody::new()
            .file("dod", "a.pdf", Some(declared), b"%PDF")
            .file("etp", "b.pdf", Some(PDF_MIME), b"%PDF")
            .file("tr", "c.pdf", Some(PDF_MIME), b"%PDF")
            .finish();

        let response = send(test_router(), authorized_upload(body)).await;
        assert_eq!(
            response.status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "declared type {declared:?}"
        );

        let body = body_json(response).await;
        assert_eq!(body["detail"], "O arquivo DOD (a.pdf) deve ser PDF ou DOCX.");
    }
}

#[tokio::test]
async fn test_declared_type_with_parameters_rejected() {
    let body = MultipartBody::new()
        .file("dod", "a.pdf", Some(PDF_MIME), b"%PDF")
        .file("etp", "b.pdf", Some(PDF_MIME), b"%PDF")
        .file("tr", "c.pdf", Some("application/pdf; charset=binary"), b"%PDF")
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body = body_json(response).await;
    assert_eq!(body["detail"], "O arquivo TR (c.pdf) deve ser PDF ou DOCX.");
}

#[tokio::test]
async fn test_missing_part_content_type_rejected() {
    let body = MultipartBody::new()
        .file("dod", "a.pdf", None, b"%PDF")
        .file("etp", "b.pdf", Some(PDF_MIME), b"%PDF")
        .file("tr", "c.pdf", Some(PDF_MIME), b"%PDF")
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_declared_type_is_trusted() {
    // Not a PDF at all, but declared as one
    let body = MultipartBody::new()
        .file("dod", "a.pdf", Some(PDF_MIME), b"#!/bin/sh\necho hi\n")
        .file("etp", "b.pdf", Some(PDF_MIME), b"plain text")
        .file("tr", "c.docx", Some(DOCX_MIME), b"")
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Missing Parts
// =============================================================================

#[tokio::test]
async fn test_missing_part_returns_422() {
    let body = MultipartBody::new()
        .file("dod", "a.pdf", Some(PDF_MIME), b"%PDF")
        .file("tr", "c.pdf", Some(PDF_MIME), b"%PDF")
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_field");
    assert!(body["detail"].as_str().unwrap().contains("etp"));
}

#[tokio::test]
async fn test_missing_part_checked_before_content_type() {
    let body = MultipartBody::new()
        .file("dod", "a.txt", Some("text/plain"), b"x")
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_text_part_does_not_count_as_file() {
    let body = MultipartBody::new()
        .text("dod", "not a file")
        .file("etp", "b.pdf", Some(PDF_MIME), b"%PDF")
        .file("tr", "c.pdf", Some(PDF_MIME), b"%PDF")
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("dod"));
}

#[tokio::test]
async fn test_empty_form_returns_422() {
    let response = send(test_router(), authorized_upload(MultipartBody::new().finish())).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Read Failures
// =============================================================================

#[tokio::test]
async fn test_truncated_body_fails_without_partial_data() {
    let response = send(test_router(), authorized_upload(valid_documents().truncated())).await;
    assert!(response.status().is_client_error());
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "read_error");
    assert!(body.get("dados_recebidos").is_none());
}

#[tokio::test]
async fn test_non_multipart_body_reports_missing_part() {
    let request = Request::builder()
        .method("POST")
        .uri(UPLOAD_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            header::AUTHORIZATION,
            upload_gateway::basic_header_value(TEST_USERNAME, TEST_PASSWORD),
        )
        .body(Body::from("{}"))
        .unwrap();

    let response = send(test_router(), request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_field");
    assert!(body["detail"].as_str().unwrap().contains("dod"));
}

#[tokio::test]
async fn test_body_without_content_type_reports_missing_part() {
    let request = Request::builder()
        .method("POST")
        .uri(UPLOAD_PATH)
        .header(
            header::AUTHORIZATION,
            upload_gateway::basic_header_value(TEST_USERNAME, TEST_PASSWORD),
        )
        .body(Body::empty())
        .unwrap();

    let response = send(test_router(), request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_body_over_limit_rejected() {
    let router = create_router(
        RouterConfig::new(TEST_USERNAME, TEST_PASSWORD)
            .with_max_body_size(256)
            .with_tracing(false),
    );

    let response = send(router, authorized_upload(valid_documents().finish())).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_large_documents_within_default_limit() {
    let size = 3 * 1024 * 1024;
    let body = MultipartBody::new()
        .file("dod", "a.pdf", Some(PDF_MIME), &file_bytes(size, 1))
        .file("etp", "b.pdf", Some(PDF_MIME), &file_bytes(10, 2))
        .file("tr", "c.pdf", Some(PDF_MIME), &file_bytes(10, 3))
        .finish();

    let response = send(test_router(), authorized_upload(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["dados_recebidos"]["dod"]["tamanho"], size);
}
