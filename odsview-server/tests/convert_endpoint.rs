use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use odsview_core::sample::sample_document;
use odsview_core::writer::write_document;
use odsview_core::{EmptySheetPolicy, extract};
use odsview_server::{AppState, CONVERT_PATH, configure};
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;

const BOUNDARY: &str = "odsviewtestboundary";

fn state(static_dir: &Path, temp_dir: &Path, max_upload_bytes: usize) -> web::Data<AppState> {
    web::Data::new(AppState {
        static_dir: static_dir.to_path_buf(),
        temp_dir: Some(temp_dir.to_path_buf()),
        max_upload_bytes,
        empty_sheets: EmptySheetPolicy::Omit,
    })
}

fn sample_bytes() -> Vec<u8> {
    write_document(&sample_document(), Cursor::new(Vec::new()))
        .unwrap()
        .into_inner()
}

fn multipart_body(field: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    let disposition =
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"upload.ods\"\r\n");
    body.extend_from_slice(disposition.as_bytes());
    body.extend_from_slice(b"Content-Type: application/vnd.oasis.opendocument.spreadsheet\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri(CONVERT_PATH)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

#[actix_web::test]
async fn test_convert_sample_upload() {
    let static_dir = tempfile::tempdir().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let app_state = state(static_dir.path(), temp_dir.path(), 1 << 20);
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, app_state))).await;

    let req = upload_request(multipart_body("file", &sample_bytes())).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let expected =
        serde_json::to_value(extract(&sample_document(), EmptySheetPolicy::Omit)).unwrap();
    assert_eq!(body, expected);
    assert_eq!(body[0]["name"], "Schedule");
    assert_eq!(body[1]["data"][1][0], "Alice Smith");

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[actix_web::test]
async fn test_rejects_non_multipart_body() {
    let static_dir = tempfile::tempdir().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let app_state = state(static_dir.path(), temp_dir.path(), 1 << 20);
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, app_state))).await;

    let req = test::TestRequest::post()
        .uri(CONVERT_PATH)
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .set_payload(sample_bytes())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_rejects_missing_file_field() {
    let static_dir = tempfile::tempdir().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let app_state = state(static_dir.path(), temp_dir.path(), 1 << 20);
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, app_state))).await;

    let req = upload_request(multipart_body("attachment", &sample_bytes())).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"No file uploaded");
}

#[actix_web::test]
async fn test_corrupted_upload_is_a_processing_error() {
    let static_dir = tempfile::tempdir().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let app_state = state(static_dir.path(), temp_dir.path(), 1 << 20);
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, app_state))).await;

    let req = upload_request(multipart_body("file", b"not a zip archive")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).starts_with("Error processing file:"));

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[actix_web::test]
async fn test_upload_over_limit() {
    let static_dir = tempfile::tempdir().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let app_state = state(static_dir.path(), temp_dir.path(), 64);
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, app_state))).await;

    let req = upload_request(multipart_body("file", &sample_bytes())).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[actix_web::test]
async fn test_serves_static_files() {
    let static_dir = tempfile::tempdir().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(static_dir.path().join("index.html"), "<h1>viewer</h1>").unwrap();
    let app_state = state(static_dir.path(), temp_dir.path(), 1 << 20);
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, app_state))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await.as_ref(), b"<h1>viewer</h1>");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/missing.html").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_repeat_bomb_is_a_processing_error() {
    let static_dir = tempfile::tempdir().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let app_state = state(static_dir.path(), temp_dir.path(), 1 << 20);
    let app = test::init_service(App::new().configure(|cfg| configure(cfg, app_state))).await;

    // Under a kilobyte of XML that would expand to billions of cells
    let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">
<office:body><office:spreadsheet><table:table table:name="Bomb">
<table:table-row table:number-rows-repeated="65536">
<table:table-cell table:number-columns-repeated="65536"><text:p>x</text:p></table:table-cell>
</table:table-row>
</table:table></office:spreadsheet></office:body></office:document-content>"#;
    let mut package = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut package));
        zip.start_file("content.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    let req = upload_request(multipart_body("file", &package)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    let message = String::from_utf8_lossy(&body);
    assert!(message.starts_with("Error processing file: Spreadsheet expands"));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
