//! HTTP-level integration tests for marriage document upload, listing,
//! download and removal.

mod common;

use std::path::Path;

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::{
    body_bytes, body_json, create_user, delete_with_cookie, get_with_cookie,
    patch_json_with_cookie, post_json_with_cookie, send, signed_in,
};
use serde_json::json;
use sqlx::PgPool;

const BOUNDARY: &str = "ccb-test-boundary";
const PDF_BYTES: &[u8] = b"%PDF-1.4 marriage certificate";

/// Build a `multipart/form-data` body from text fields and an optional file.
fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: Router, cookie: &str, body: Vec<u8>) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/marriage-documents")
        .header(COOKIE, cookie)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

async fn create_marriage(app: Router, cookie: &str, user_id: i64) -> i64 {
    let response = post_json_with_cookie(
        app,
        "/api/v1/marriages",
        cookie,
        json!({ "user_id": user_id, "certificate_number": "MC-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

fn stored_files(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_stores_file_and_metadata(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (_clerk, clerk) = signed_in(&pool, "clerk").await;
    let person = create_user(&pool, "person@ccb.test", "member").await;
    let app = common::build_test_app_with_upload_dir(pool, uploads.path().to_path_buf());
    let marriage_id = create_marriage(app.clone(), &clerk, person.id).await;

    let body = multipart_body(
        &[
            ("marriage_id", marriage_id.to_string().as_str()),
            ("document_type", "certificate"),
        ],
        Some(("Marriage Cert.pdf", PDF_BYTES)),
    );
    let response = upload(app, &clerk, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["marriage_id"], marriage_id);
    assert_eq!(json["document_type"], "certificate");
    assert_eq!(json["file_name"], "Marriage Cert.pdf");
    assert_eq!(json["file_size"], PDF_BYTES.len());

    let stored = json["file_path"].as_str().unwrap();
    let (millis, rest) = stored.split_once('_').unwrap();
    assert!(millis.parse::<i64>().is_ok());
    assert_eq!(rest, "Marriage_Cert.pdf");
    assert_eq!(
        json["download_url"],
        format!("/api/v1/marriage-documents/download/{stored}")
    );

    let on_disk = std::fs::read(uploads.path().join(stored)).unwrap();
    assert_eq!(on_disk, PDF_BYTES);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_rejects_bad_input_without_writing(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (_clerk, clerk) = signed_in(&pool, "clerk").await;
    let person = create_user(&pool, "person@ccb.test", "member").await;
    let app = common::build_test_app_with_upload_dir(pool, uploads.path().to_path_buf());
    let marriage_id = create_marriage(app.clone(), &clerk, person.id).await;
    let marriage_field = marriage_id.to_string();

    let exe = multipart_body(
        &[("marriage_id", marriage_field.as_str())],
        Some(("payload.exe", b"MZ")),
    );
    let response = upload(app.clone(), &clerk, exe).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let no_file = multipart_body(&[("marriage_id", marriage_field.as_str())], None);
    let response = upload(app.clone(), &clerk, no_file).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let no_marriage = multipart_body(&[], Some(("cert.pdf", PDF_BYTES)));
    let response = upload(app.clone(), &clerk, no_marriage).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unknown_marriage = multipart_body(
        &[("marriage_id", "999999")],
        Some(("cert.pdf", PDF_BYTES)),
    );
    let response = upload(app, &clerk, unknown_marriage).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(stored_files(uploads.path()).is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn members_cannot_upload(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (_clerk, clerk) = signed_in(&pool, "clerk").await;
    let (me, member) = signed_in(&pool, "member").await;
    let app = common::build_test_app_with_upload_dir(pool, uploads.path().to_path_buf());
    let marriage_id = create_marriage(app.clone(), &clerk, me.id).await;

    let body = multipart_body(
        &[("marriage_id", marriage_id.to_string().as_str())],
        Some(("cert.pdf", PDF_BYTES)),
    );
    let response = upload(app, &member, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(stored_files(uploads.path()).is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn download_streams_the_stored_file(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (_clerk, clerk) = signed_in(&pool, "clerk").await;
    let (me, member) = signed_in(&pool, "member").await;
    let app = common::build_test_app_with_upload_dir(pool, uploads.path().to_path_buf());
    let marriage_id = create_marriage(app.clone(), &clerk, me.id).await;

    let body = multipart_body(
        &[("marriage_id", marriage_id.to_string().as_str())],
        Some(("cert.pdf", PDF_BYTES)),
    );
    let created = body_json(upload(app.clone(), &clerk, body).await).await;
    let url = created["download_url"].as_str().unwrap().to_string();
    let stored = created["file_path"].as_str().unwrap().to_string();

    // The couple may download their own documents.
    let response = get_with_cookie(app.clone(), &url, &member).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION],
        format!("attachment; filename=\"{stored}\"").as_str()
    );
    assert_eq!(body_bytes(response).await, PDF_BYTES);

    let response = get_with_cookie(
        app.clone(),
        "/api/v1/marriage-documents/download/1_missing.pdf",
        &clerk,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_with_cookie(
        app,
        "/api/v1/marriage-documents/download/..%2F..%2Fetc%2Fpasswd",
        &clerk,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_carries_download_urls(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (_clerk, clerk) = signed_in(&pool, "clerk").await;
    let person = create_user(&pool, "person@ccb.test", "member").await;
    let app = common::build_test_app_with_upload_dir(pool, uploads.path().to_path_buf());
    let marriage_id = create_marriage(app.clone(), &clerk, person.id).await;

    for name in ["a.pdf", "b.png"] {
        let body = multipart_body(
            &[("marriage_id", marriage_id.to_string().as_str())],
            Some((name, PDF_BYTES)),
        );
        assert_eq!(
            upload(app.clone(), &clerk, body).await.status(),
            StatusCode::CREATED
        );
    }

    let response = get_with_cookie(
        app.clone(),
        &format!("/api/v1/marriage-documents/marriage/{marriage_id}"),
        &clerk,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    for doc in list {
        let url = doc["download_url"].as_str().unwrap();
        assert!(url.ends_with(doc["file_path"].as_str().unwrap()));
    }

    let response = get_with_cookie(
        app,
        &format!("/api/v1/marriages/user/{}/full", person.id),
        &clerk,
    )
    .await;
    let full = body_json(response).await;
    assert_eq!(full[0]["documents"].as_array().unwrap().len(), 2);
    assert!(full[0]["documents"][0]["download_url"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn metadata_update_and_delete_removes_file(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (_clerk, clerk) = signed_in(&pool, "clerk").await;
    let person = create_user(&pool, "person@ccb.test", "member").await;
    let app = common::build_test_app_with_upload_dir(pool, uploads.path().to_path_buf());
    let marriage_id = create_marriage(app.clone(), &clerk, person.id).await;

    let body = multipart_body(
        &[("marriage_id", marriage_id.to_string().as_str())],
        Some(("cert.pdf", PDF_BYTES)),
    );
    let created = body_json(upload(app.clone(), &clerk, body).await).await;
    let id = created["id"].as_i64().unwrap();
    let stored = created["file_path"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/marriage-documents/{id}");

    let response = patch_json_with_cookie(
        app.clone(),
        &uri,
        &clerk,
        json!({ "document_type": "banns" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["document_type"], "banns");
    assert_eq!(json["file_path"], stored.as_str());

    let response = delete_with_cookie(app.clone(), &uri, &clerk).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!uploads.path().join(&stored).exists());

    let response = get_with_cookie(app.clone(), &uri, &clerk).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_with_cookie(app, &uri, &clerk).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn uploads_with_doubled_dots_stay_downloadable(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (_clerk, clerk) = signed_in(&pool, "clerk").await;
    let person = create_user(&pool, "person@ccb.test", "member").await;
    let app = common::build_test_app_with_upload_dir(pool, uploads.path().to_path_buf());
    let marriage_id = create_marriage(app.clone(), &clerk, person.id).await;

    let body = multipart_body(
        &[("marriage_id", marriage_id.to_string().as_str())],
        Some(("cert..final.pdf", PDF_BYTES)),
    );
    let created = body_json(upload(app.clone(), &clerk, body).await).await;
    assert_eq!(created["file_name"], "cert..final.pdf");
    let stored = created["file_path"].as_str().unwrap();
    assert!(stored.ends_with("_cert.final.pdf"), "stored as {stored}");

    let download_url = created["download_url"].as_str().unwrap();
    let response = get_with_cookie(app, download_url, &clerk).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, PDF_BYTES);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_user_removes_their_document_files(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (_clerk, clerk) = signed_in(&pool, "clerk").await;
    let (_admin, admin) = signed_in(&pool, "admin").await;
    let person = create_user(&pool, "person@ccb.test", "member").await;
    let other = create_user(&pool, "other@ccb.test", "member").await;
    let app = common::build_test_app_with_upload_dir(pool, uploads.path().to_path_buf());

    let first = create_marriage(app.clone(), &clerk, person.id).await;
    let second = create_marriage(app.clone(), &clerk, person.id).await;
    let unrelated = create_marriage(app.clone(), &clerk, other.id).await;
    let documents = [(first, "cert.pdf"), (second, "banns.png"), (unrelated, "kept.pdf")];
    for (marriage_id, name) in documents {
        let body = multipart_body(
            &[("marriage_id", marriage_id.to_string().as_str())],
            Some((name, PDF_BYTES)),
        );
        let response = upload(app.clone(), &clerk, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    assert_eq!(stored_files(uploads.path()).len(), 3);

    let response =
        delete_with_cookie(app.clone(), &format!("/api/v1/users/{}", person.id), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining = stored_files(uploads.path());
    assert_eq!(remaining.len(), 1, "left on disk: {remaining:?}");
    assert!(remaining[0].ends_with("_kept.pdf"));

    let response = get_with_cookie(
        app,
        &format!("/api/v1/marriage-documents/marriage/{first}"),
        &clerk,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_upload_body_is_refused(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (_clerk, clerk) = signed_in(&pool, "clerk").await;
    let app = common::build_test_app_with_upload_dir(pool, uploads.path().to_path_buf());

    let body = vec![b'x'; ccb_api::handlers::marriage_documents::UPLOAD_BODY_LIMIT + 1];
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/marriage-documents")
        .header(COOKIE, clerk)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(stored_files(uploads.path()).is_empty());
}
