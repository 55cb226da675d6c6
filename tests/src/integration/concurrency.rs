//! Racing replacements through the full HTTP stack.

#[cfg(test)]
mod tests {
    use crate::integration::{png_bytes, send, MultipartBuilder, TestApp, TOKEN_U1};
    use axum::http::StatusCode;
    use std::sync::Arc;
    use vp_media_store::AssetRef;
    use vp_records::{Identity, UserRecords};

    /// Several clients replace the same photo at once. A writer that loses
    /// the commit race repeatedly may answer 500 after reclaiming its own
    /// upload; what must always hold is that the record ends up pointing at
    /// exactly one committed asset and nothing else survives in storage.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_replacements_leave_one_backed_reference() {
        let app = TestApp::new();
        let app = Arc::new(app);

        let mut handles = Vec::new();
        for i in 0..4 {
            let app = Arc::clone(&app);
            handles.push(tokio::spawn(async move {
                let request = MultipartBuilder::new()
                    .file("photo", &format!("race-{i}.png"), "image/png", png_bytes())
                    .post("/profile/photo", Some(TOKEN_U1));
                send(&app.router, request).await
            }));
        }

        let mut committed_refs = Vec::new();
        for handle in handles {
            let (status, json) = handle.await.expect("task join");
            match status {
                StatusCode::OK => {
                    committed_refs
                        .push(AssetRef::new(json["data"]["profilePic"].as_str().unwrap()));
                }
                // Lost the race past the retry budget; its upload was
                // reclaimed and the record untouched.
                StatusCode::INTERNAL_SERVER_ERROR => {}
                other => panic!("unexpected status {other}"),
            }
        }
        assert!(!committed_refs.is_empty(), "at least one writer must win");

        let current = app
            .users
            .find(&Identity::new("u1"))
            .await
            .unwrap()
            .unwrap()
            .profile_pic
            .expect("photo set");

        // The committed reference is one that a winner returned, its bytes
        // still exist, and every superseded or reclaimed asset is gone.
        assert!(committed_refs.contains(&current));
        assert!(app.media.contains(&current));
        assert_eq!(app.media.len(), 1);
    }

    /// Repeated replacements leave no asset behind.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_sequential_replacements_never_leak_assets() {
        let app = TestApp::new();

        for i in 0..5 {
            let (status, _) = send(
                &app.router,
                MultipartBuilder::new()
                    .file("photo", &format!("v{i}.png"), "image/png", png_bytes())
                    .post("/profile/photo", Some(TOKEN_U1)),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        // One current photo, zero leaked predecessors.
        assert_eq!(app.media.len(), 1);
    }
}
