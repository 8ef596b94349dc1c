//! End-to-end HTTP tests against a real PostgreSQL container.

mod common;

use actix_web::http::StatusCode;
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{test, web, App};
use serde_json::{json, Value};
use video_service::handlers;

macro_rules! init_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .wrap(NormalizePath::new(TrailingSlash::Trim))
                .configure(handlers::configure),
        )
        .await
    };
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL container"]
async fn user_lifecycle_over_http() {
    let db = common::setup().await;
    let app = init_app!(db.pool);

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({
            "email": "shinji.ikari@nerv.net",
            "nick": "sIkari",
            "fullName": "Shinji Ikari"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["admin"], false);
    let id = created["userId"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/users/id/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let found: Value = test::read_body_json(resp).await;
    assert_eq!(found["nick"], "sIkari");
    assert_eq!(found["videos"], json!([]));
    assert_eq!(found["comments"], json!([]));

    // Same email and nick again
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"email": "shinji.ikari@nerv.net", "nick": "sIkari"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/id/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/id/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/users/id/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let missing: Value = test::read_body_json(resp).await;
    assert!(missing.is_null());
}

#[actix_web::test]
#[ignore = "Requires Docker for PostgreSQL container"]
async fn video_views_and_search_over_http() {
    let db = common::setup().await;
    let (user, video) =
        common::user_with_video(&db.pool, "Rei", "Ayanami", "Lo2qQmj0_h4").await;
    let app = init_app!(db.pool);

    for _ in 0..3 {
        let req = test::TestRequest::put()
            .uri(&format!("/videos/views/{}", video.video_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri("/videos/url/Lo2qQmj0_h4")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let found: Value = test::read_body_json(resp).await;
    assert_eq!(found["views"], 3);
    assert_eq!(found["author"]["userId"], user.user_id);

    let req = test::TestRequest::get()
        .uri("/videos/search?title=video")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let hits: Value = test::read_body_json(resp).await;
    assert_eq!(hits.as_array().map(Vec::len), Some(1));

    // Numeric strings in bodies are accepted as ids
    let req = test::TestRequest::post()
        .uri("/comments")
        .set_json(json!({
            "authorId": user.user_id.to_string(),
            "videoId": video.video_id,
            "text": "Great song"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/comments/video/{}", video.video_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let count: Value = test::read_body_json(resp).await;
    assert_eq!(count["count"], 1);
}
