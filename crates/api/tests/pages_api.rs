//! HTTP-level integration tests for the page editing lifecycle, the public
//! rendering boundary, and the translation endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.

mod common;

use axum::http::StatusCode;
use common::{
    auth_token, body_json, body_text, build_test_app, delete_auth, get, get_auth, post_json_auth,
    put_json, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

fn hero_block() -> serde_json::Value {
    json!({
        "id": "hero-1",
        "type": "hero",
        "data": {
            "title": {"en": "Hi", "de": "", "ru": ""}
        }
    })
}

/// Create a page via the API and return its id.
async fn create_page(app: &axum::Router, token: &str, slug: &str, title: &str) -> i64 {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/pages",
        token,
        json!({"slug": slug, "title": title}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["page"]["id"].as_i64().expect("page id")
}

// ---------------------------------------------------------------------------
// Validation & conflicts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn reserved_slug_is_rejected_without_creating_a_page(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token("editor");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/pages",
        &token,
        json!({"slug": "admin", "title": "Sneaky"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let list = body_json(get_auth(app, "/api/v1/pages", &token).await).await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_slug_maps_to_conflict(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token("editor");
    create_page(&app, &token, "about", "About").await;

    let response = post_json_auth(
        app,
        "/api/v1/pages",
        &token,
        json!({"slug": "about", "title": "Again"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Auth gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn mutating_routes_require_a_token(pool: PgPool) {
    let app = build_test_app(pool);

    let response = put_json(
        app,
        "/api/v1/pages/1",
        json!({"title": "X", "blocks": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn page_delete_requires_admin(pool: PgPool) {
    let app = build_test_app(pool);
    let editor = auth_token("editor");
    let admin = auth_token("admin");
    let page_id = create_page(&app, &editor, "about", "About").await;

    let response = delete_auth(app.clone(), &format!("/api/v1/pages/{page_id}"), &editor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app, &format!("/api/v1/pages/{page_id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// End-to-end lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_save_publish_render_flow(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token("editor");
    let page_id = create_page(&app, &token, "about", "About").await;

    // nothing public before publish
    let response = get(app.clone(), "/public/pages/about").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // save one hero block with only the English title set
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}"),
        &token,
        json!({"title": "About", "blocks": [hero_block()]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // the stored draft carries the block
    let detail = body_json(get_auth(app.clone(), &format!("/api/v1/pages/{page_id}"), &token).await)
        .await;
    assert_eq!(
        detail["data"]["draft"]["blocks"][0]["data"]["title"]["en"],
        "Hi"
    );

    // publish, then render in German: the title falls back to English
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}/publish"),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/public/pages/about?locale=de").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>Hi</h1>"));
    assert!(html.contains("<html lang=\"de\">"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn save_sanitizes_incoming_blocks(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token("editor");
    let page_id = create_page(&app, &token, "notes", "Notes").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}"),
        &token,
        json!({"blocks": [
            {"id": "rt-1", "type": "richText", "data": {"content": {
                "en": "<script>alert(1)</script><p>ok</p>", "de": "", "ru": ""
            }}},
            "not a block at all"
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let revision = body_json(response).await;
    let blocks = revision["data"]["blocks"].as_array().unwrap();
    // the malformed entry was dropped, the script stripped
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["data"]["content"]["en"], "<p>ok</p>");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revert_stages_prior_content(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token("editor");
    let page_id = create_page(&app, &token, "work", "Work").await;

    let first = body_json(
        put_json_auth(
            app.clone(),
            &format!("/api/v1/pages/{page_id}"),
            &token,
            json!({"blocks": [hero_block()]}),
        )
        .await,
    )
    .await;
    let first_revision_id = first["data"]["id"].as_i64().unwrap();

    put_json_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}"),
        &token,
        json!({"blocks": []}),
    )
    .await;

    let reverted = body_json(
        post_json_auth(
            app.clone(),
            &format!("/api/v1/pages/{page_id}/revert"),
            &token,
            json!({"revision_id": first_revision_id}),
        )
        .await,
    )
    .await;
    assert_ne!(reverted["data"]["id"].as_i64().unwrap(), first_revision_id);
    assert_eq!(
        reverted["data"]["blocks"][0]["data"]["title"]["en"],
        "Hi"
    );

    // reverting to a foreign revision id is a 404
    let response = post_json_auth(
        app,
        &format!("/api/v1/pages/{page_id}/revert"),
        &token,
        json!({"revision_id": 99999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn preview_renders_the_draft(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token("editor");
    let page_id = create_page(&app, &token, "draft-page", "Draft").await;

    put_json_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}"),
        &token,
        json!({"blocks": [hero_block()]}),
    )
    .await;

    // unpublished content is visible in the authenticated preview...
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/pages/{page_id}/preview?locale=en"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<h1>Hi</h1>"));

    // ...but stays off the public boundary
    let response = get(app, "/public/pages/draft-page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Translation endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn translate_value_fills_gaps_only(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token("editor");

    let response = post_json_auth(
        app,
        "/api/v1/translate",
        &token,
        json!({
            "value": {"en": "Hello", "de": "Hallo von Hand", "ru": "???"},
            "sourceLocale": "en",
            "format": "text"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["value"]["en"], "Hello");
    assert_eq!(json["data"]["value"]["de"], "Hallo von Hand");
    assert_eq!(json["data"]["value"]["ru"], "ru:Hello");
    assert!(json["data"]["failedLocales"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn translate_block_walks_nested_fields(pool: PgPool) {
    let app = build_test_app(pool);
    let token = auth_token("editor");

    let response = post_json_auth(
        app,
        "/api/v1/translate/block",
        &token,
        json!({
            "block": {
                "id": "faq-1",
                "type": "faq",
                "data": {
                    "title": {"en": "FAQ", "de": "", "ru": ""},
                    "items": [{
                        "id": "q1",
                        "question": {"en": "Why?", "de": "", "ru": ""},
                        "answer": {"en": "<p>Because.</p>", "de": "", "ru": ""}
                    }]
                }
            },
            "sourceLocale": "en"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"]["block"]["data"];
    assert_eq!(data["title"]["de"], "de:FAQ");
    assert_eq!(data["items"][0]["question"]["ru"], "ru:Why?");
    assert_eq!(data["items"][0]["answer"]["de"], "de:<p>Because.</p>");
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_database_status(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["database"], "ok");
}
