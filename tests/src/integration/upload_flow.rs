//! Profile photo replacement over HTTP.
//!
//! Drives `POST /profile/photo` through the full router: auth middleware,
//! multipart decoding, pipeline, in-memory backends.

#[cfg(test)]
mod tests {
    use crate::integration::{
        await_audit, png_bytes, send, MultipartBuilder, TestApp, TOKEN_BLANK, TOKEN_GHOST,
        TOKEN_U1,
    };
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use vp_media_store::AssetRef;
    use vp_records::{Identity, UserRecords};

    fn photo_request(token: Option<&str>, filename: &str, content_type: &str) -> Request<Body> {
        MultipartBuilder::new()
            .file("photo", filename, content_type, png_bytes())
            .post("/profile/photo", token)
    }

    #[tokio::test]
    async fn test_first_upload_returns_committed_reference() {
        let app = TestApp::new();

        let (status, json) = send(
            &app.router,
            photo_request(Some(TOKEN_U1), "avatar.png", "image/png"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "00");
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["userId"], "u1");

        let reference = json["data"]["profilePic"].as_str().expect("reference");
        assert!(reference.starts_with("uploads/"));
        assert!(reference.ends_with("-avatar.png"));

        // The record points at the stored object.
        let user = app
            .users
            .find(&Identity::new("u1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.profile_pic, Some(AssetRef::new(reference)));
        assert!(app.media.contains(&AssetRef::new(reference)));

        await_audit(&app.log, 1).await;
        let entries = app.log.entries();
        assert!(entries[0].activity.contains("u1"));
        assert_eq!(entries[0].actor_email.as_deref(), Some("u1@example.com"));
    }

    #[tokio::test]
    async fn test_replacement_retires_previous_asset() {
        let app = TestApp::new();

        let (_, first) = send(
            &app.router,
            photo_request(Some(TOKEN_U1), "old.png", "image/png"),
        )
        .await;
        let (status, second) = send(
            &app.router,
            photo_request(Some(TOKEN_U1), "new.jpg", "image/jpeg"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let old_ref = AssetRef::new(first["data"]["profilePic"].as_str().unwrap());
        let new_ref = AssetRef::new(second["data"]["profilePic"].as_str().unwrap());
        assert_ne!(old_ref, new_ref);

        assert!(!app.media.contains(&old_ref), "old asset must be deleted");
        assert!(app.media.contains(&new_ref));
        assert_eq!(app.media.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_credentials_rejected_with_envelope() {
        let app = TestApp::new();

        let (status, json) = send(&app.router, photo_request(None, "a.png", "image/png")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["status"], "E00");
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Unauthorized. Please login");
        assert_eq!(app.media.store_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_identity_is_a_client_error() {
        let app = TestApp::new();

        let (status, json) = send(
            &app.router,
            photo_request(Some(TOKEN_GHOST), "a.png", "image/png"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "User profile not found!");
        assert_eq!(app.media.store_calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_identity_is_rejected_before_any_work() {
        let app = TestApp::new();

        // The verifier vouched for the token but resolved it to a blank
        // identity; the handler must refuse it rather than operate on "".
        let (status, json) = send(
            &app.router,
            photo_request(Some(TOKEN_BLANK), "a.png", "image/png"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "E00");
        assert_eq!(json["message"], "identity required");
        assert_eq!(app.media.store_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_part() {
        let app = TestApp::new();

        let (status, json) = send(
            &app.router,
            MultipartBuilder::new()
                .text("unrelated", "field")
                .post("/profile/photo", Some(TOKEN_U1)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_disallowed_extension_stores_nothing() {
        let app = TestApp::new();

        let (status, json) = send(
            &app.router,
            photo_request(Some(TOKEN_U1), "payload.exe", "image/png"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "E00");
        assert_eq!(app.media.store_calls(), 0);
        assert_eq!(app.media.len(), 0);
    }

    #[tokio::test]
    async fn test_mismatched_content_type_rejected() {
        let app = TestApp::new();

        // Extension is fine; the declared MIME type is not. Both checks must
        // pass independently.
        let (status, _) = send(
            &app.router,
            photo_request(Some(TOKEN_U1), "doc.png", "application/pdf"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(app.media.store_calls(), 0);
    }

    #[tokio::test]
    async fn test_health_needs_no_credentials() {
        let app = TestApp::new();

        let (status, json) = send(
            &app.router,
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}
