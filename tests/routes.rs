use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use biomed_api::clients::UpstreamError;
use biomed_api::clients::email::{LogMailer, Notifier};
use biomed_api::clients::media::{MediaHost, UploadedMedia};
use biomed_api::models::config::EmailConfig;
use biomed_api::repository::DieselRepository;
use biomed_api::routes::{RESOURCE_NOT_FOUND, api_scope, default_not_found};
use serde_json::{Value, json};

mod common;

/// Media host that accepts every upload without network access.
struct StaticMedia;

#[async_trait]
impl MediaHost for StaticMedia {
    async fn upload(
        &self,
        _bytes: Vec<u8>,
        filename: &str,
        folder: &str,
    ) -> Result<UploadedMedia, UpstreamError> {
        let public_id = format!("{folder}/{filename}");
        Ok(UploadedMedia {
            url: format!("http://media.test/{public_id}"),
            secure_url: format!("https://media.test/{public_id}"),
            public_id,
            width: Some(10),
            height: Some(10),
            bytes: Some(4),
            format: Some("png".into()),
        })
    }

    async fn destroy(&self, _public_id: &str) -> Result<(), UpstreamError> {
        Ok(())
    }
}

fn notifier() -> Notifier {
    let config = EmailConfig {
        brevo_api_key: None,
        api_url: "http://localhost".into(),
        from_email: "noreply@example.com".into(),
        from_name: "BioMed".into(),
        admin_email: "admin@example.com".into(),
        support_email: "support@example.com".into(),
        support_phone: "+1 555 0100".into(),
    };
    Notifier::new(Arc::new(LogMailer), &config)
}

macro_rules! test_app {
    ($test_db:expr) => {{
        let media: Arc<dyn MediaHost> = Arc::new(StaticMedia);
        test::init_service(
            App::new()
                .app_data(web::Data::new(DieselRepository::new($test_db.pool())))
                .app_data(web::Data::new(notifier()))
                .app_data(web::Data::from(media))
                .service(api_scope("v1"))
                .default_service(web::to(default_not_found)),
        )
        .await
    }};
}

fn blog(title: &str, slug: &str, category_id: i32) -> Value {
    json!({
        "title": title,
        "slug": slug,
        "content": "<p>Body</p>",
        "category_id": category_id,
        "author_id": "1",
    })
}

#[actix_web::test]
async fn test_health_reports_connected_database() {
    let test_db = common::TestDb::new("test_health.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "connected");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[actix_web::test]
async fn test_unknown_route_uses_envelope() {
    let test_db = common::TestDb::new("test_unknown_route.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::get().uri("/api/v1/nothing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], RESOURCE_NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[actix_web::test]
async fn test_blog_lifecycle() {
    let test_db = common::TestDb::new("test_blog_lifecycle.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/blogs/create")
        .set_json(blog("Heart health", "heart-health", 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["message"], "Blog created successfully");

    let req = test::TestRequest::post()
        .uri("/api/v1/blogs")
        .set_json(blog("Copy", "heart-health", 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/api/v1/blogs/slug/heart-health")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/blogs/{id}"))
        .set_json(json!({"title": "Heart care"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "Heart care");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/blogs/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/blogs/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_blog_validation_errors() {
    let test_db = common::TestDb::new("test_blog_validation.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/blogs/create")
        .set_json(json!({"title": "Only a title"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Title, content, category_id, author_id, and slug are required"
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/blogs/create")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let req = test::TestRequest::get().uri("/api/v1/blogs/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_without_known_fields_is_rejected() {
    let test_db = common::TestDb::new("test_update_unknown_fields.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/blogs/create")
        .set_json(blog("Lungs", "lungs", 2))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/blogs/{id}"))
        .set_json(json!({"id": 5, "unknown": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No valid fields to update");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/blogs/{id}"))
        .set_json(json!({"category_id": 3_000_000_000_i64}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/blogs/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Lungs");
    assert_eq!(body["data"]["category_id"], 2);
}

#[actix_web::test]
async fn test_page_past_the_end_keeps_totals() {
    let test_db = common::TestDb::new("test_page_past_end.db");
    let app = test_app!(test_db);

    for i in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/v1/blogs")
            .set_json(blog(&format!("Post {i}"), &format!("post-{i}"), 1))
            .to_request();
        test::call_service(&app, req).await;
    }

    for page in ["2", "1000000000000000000"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/blogs/filtered?page={page}&limit=10"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["pages"], 1);
    }
}

#[actix_web::test]
async fn test_repeated_filtered_listing_is_stable() {
    let test_db = common::TestDb::new("test_repeated_listing.db");
    let app = test_app!(test_db);

    for i in 0..4 {
        let req = test::TestRequest::post()
            .uri("/api/v1/blogs")
            .set_json(blog(&format!("Post {i}"), &format!("post-{i}"), i % 2))
            .to_request();
        test::call_service(&app, req).await;
    }

    let uri = "/api/v1/blogs/filtered?category_id=1&search=Post&limit=1&page=2";
    let first: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let second: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(first["data"], second["data"]);
    assert_eq!(first["pagination"], second["pagination"]);
    assert_eq!(first["pagination"]["total"], 2);
    assert_eq!(first["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_filtered_listing_paginates() {
    let test_db = common::TestDb::new("test_filtered_listing.db");
    let app = test_app!(test_db);

    for i in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/v1/blogs")
            .set_json(blog(&format!("Post {i}"), &format!("post-{i}"), 7))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    let req = test::TestRequest::post()
        .uri("/api/v1/blogs")
        .set_json(blog("Elsewhere", "elsewhere", 8))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/blogs/filtered?category_id=7&limit=2&page=1&bogus=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["pages"], 2);
    assert_eq!(body["pagination"]["limit"], 2);

    let req = test::TestRequest::get().uri("/api/v1/blogs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 4);
    assert!(body.get("pagination").is_none());
}

#[actix_web::test]
async fn test_newsletter_subscription_flow() {
    let test_db = common::TestDb::new("test_newsletter_flow.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/newsletter/subscribe")
        .set_json(json!({"email": "Reader@Example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/newsletter/subscribe")
        .set_json(json!({"email": "reader@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "This email is already subscribed");

    let req = test::TestRequest::post()
        .uri("/api/v1/newsletter/subscribe")
        .set_json(json!({"email": "not-an-email"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/newsletter/unsubscribe")
        .set_json(json!({"email": "reader@example.com"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "unsubscribed");

    let req = test::TestRequest::get()
        .uri("/api/v1/newsletter/stats/summary")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["unsubscribed"], 1);
}

#[actix_web::test]
async fn test_contact_submission_and_status() {
    let test_db = common::TestDb::new("test_contact_flow.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/contact/submit")
        .set_json(json!({
            "full_name": "Alice Visitor",
            "email": "alice@example.com",
            "message": "When does the next course start?",
            "agreed_to_terms": true,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "new");

    let req = test::TestRequest::post()
        .uri("/api/v1/contact/submit")
        .set_json(json!({
            "full_name": "Bob",
            "email": "bob@example.com",
            "message": "Hi",
            "agreed_to_terms": false,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/contact/{id}/status"))
        .set_json(json!({"status": "resolved"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "resolved");

    let req = test::TestRequest::get()
        .uri("/api/v1/contact/stats/summary")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["resolved"], 1);
}

#[actix_web::test]
async fn test_user_creation_and_instructors() {
    let test_db = common::TestDb::new("test_user_flow.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@example.com",
            "phone": "+200",
            "password": "secret123",
            "role": "INSTRUCTOR",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());

    let req = test::TestRequest::get()
        .uri("/api/v1/users/instructors")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["total"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/email/grace@example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_image_lookup_with_malformed_id_is_not_found() {
    let test_db = common::TestDb::new("test_image_lookup.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/v1/images/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

const BOUNDARY: &str = "biomed-test-boundary";

fn multipart_body(file_name: &str, content_type: &str, folder: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&[0x89, b'P', b'N', b'G']);
    body.extend_from_slice(
        format!(
            "\r\n--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder\"\r\n\r\n{folder}\r\n--{BOUNDARY}--\r\n"
        )
        .as_bytes(),
    );
    body
}

#[actix_web::test]
async fn test_image_upload_is_recorded() {
    let test_db = common::TestDb::new("test_image_upload.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/images/upload")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("pixel.png", "image/png", "biomed/tests"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Image uploaded successfully");
    assert_eq!(body["data"]["cloudinary_id"], "biomed/tests/pixel.png");
    assert_eq!(body["data"]["folder"], "biomed/tests");

    let req = test::TestRequest::get()
        .uri("/api/v1/images/cloudinary/biomed/tests/pixel.png")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_image_upload_rejects_non_images() {
    let test_db = common::TestDb::new("test_image_upload_rejected.db");
    let app = test_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/v1/images/upload")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body("notes.txt", "text/plain", "biomed"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Only image files are allowed (JPG, PNG, GIF, WEBP)"
    );
}
