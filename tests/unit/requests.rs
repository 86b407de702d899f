// Malformed request bodies must surface as 400 validation errors through the
// extractor, never as axum's bare 422 rejection.

use axum::body::Body;
use axum::extract::FromRequest;
use axum::http::{Request, header};
use roadmap_backend::error::AppError;
use roadmap_backend::routes::comments::{CreateCommentRequest, UpdateCommentRequest};
use roadmap_backend::routes::upvotes::UpvoteRequest;
use roadmap_backend::validation::ValidatedJson;

fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

#[tokio::test]
async fn comment_bodies_missing_content_are_validation_errors() {
    let err = ValidatedJson::<CreateCommentRequest>::from_request(
        json_request(r#"{"parent": null}"#),
        &(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err =
        ValidatedJson::<UpdateCommentRequest>::from_request(json_request(r#"{}"#), &())
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn comment_bodies_with_bad_parent_uuid_are_validation_errors() {
    let err = ValidatedJson::<CreateCommentRequest>::from_request(
        json_request(r#"{"content": "hi", "parent": "not-a-uuid"}"#),
        &(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let ok = ValidatedJson::<CreateCommentRequest>::from_request(
        json_request(r#"{"content": "hi"}"#),
        &(),
    )
    .await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn upvote_bodies_with_bad_item_id_are_validation_errors() {
    let err = ValidatedJson::<UpvoteRequest>::from_request(
        json_request(r#"{"roadmap_item": "not-a-uuid"}"#),
        &(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = ValidatedJson::<UpvoteRequest>::from_request(json_request(r#"{}"#), &())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}
