//! Integration tests for `POST /api/libros/{id}/imagen`.

mod common;

use axum::http::StatusCode;
use biblioteca_core::upload::MAX_IMAGE_BYTES;
use common::{body_json, build_test_app, get, multipart_body, post_multipart};

const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[tokio::test]
async fn image_upload_records_placeholder_url() {
    let app = build_test_app();
    let body = multipart_body("imagen", "portada.png", "image/png", PNG_HEADER);
    let response = post_multipart(app.clone(), "/api/libros/1/imagen", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Imagen actualizada correctamente");

    let url = json["data"]["imagen_url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/imagenes/libro-1-"), "{url}");
    assert!(url.ends_with(".png"), "{url}");

    let fetched = body_json(get(app, "/api/libros/1").await).await;
    assert_eq!(fetched["data"]["imagen_url"], url.as_str());
}

#[tokio::test]
async fn non_image_upload_is_rejected() {
    let app = build_test_app();
    let body = multipart_body("imagen", "notas.txt", "text/plain", b"hola");
    let response = post_multipart(app.clone(), "/api/libros/1/imagen", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UPLOAD_REJECTED");

    let fetched = body_json(get(app, "/api/libros/1").await).await;
    assert!(fetched["data"]["imagen_url"].is_null());
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    let app = build_test_app();
    let data = vec![0u8; MAX_IMAGE_BYTES + 1];
    let body = multipart_body("imagen", "grande.jpg", "image/jpeg", &data);
    let response = post_multipart(app, "/api/libros/1/imagen", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPLOAD_REJECTED");
}

#[tokio::test]
async fn missing_image_field_is_rejected() {
    let app = build_test_app();
    let body = multipart_body("archivo", "portada.png", "image/png", PNG_HEADER);
    let response = post_multipart(app, "/api/libros/1/imagen", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPLOAD_REJECTED");
}

#[tokio::test]
async fn upload_for_unknown_book_is_404() {
    let app = build_test_app();
    let body = multipart_body("imagen", "portada.png", "image/png", PNG_HEADER);
    let response = post_multipart(app, "/api/libros/9999/imagen", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Libro no encontrado");
}
