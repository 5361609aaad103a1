#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;
use uuid::Uuid;

use quillpost::config::AppConfig;
use quillpost::domain::comment::Comment;
use quillpost::domain::post::Post;
use quillpost::AppState;

pub const PAGE_SIZE: usize = 15;

// ---------------------------------------------------------------------------
// TestApp: one router and one throwaway data directory per test
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub data_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body_bytes: bytes::Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body_bytes).unwrap_or(Value::Null)
    }

    pub fn error_message(&self) -> String {
        self.json()["error"].as_str().unwrap_or("").to_string()
    }

    pub fn items(&self) -> Vec<Value> {
        self.json().as_array().cloned().unwrap_or_default()
    }
}

pub async fn app() -> TestApp {
    TestApp::setup().await
}

impl TestApp {
    async fn setup() -> Self {
        let data_dir = tempfile::tempdir().expect("failed to create temp data dir");
        let config = AppConfig {
            http_addr: "127.0.0.1:0".into(),
            data_dir: data_dir.path().to_path_buf(),
            page_size: PAGE_SIZE,
            cors_allow_any: false,
        };

        let state = AppState::new(&config);
        state.init_storage().await.expect("init_storage failed");

        let router = quillpost::http::router(state.clone());

        TestApp {
            router,
            state,
            data_dir,
        }
    }

    // ------------------------------------------------------------------
    // Low-level request helper
    // ------------------------------------------------------------------
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(path)
            .header("host", "localhost");

        let request = if let Some(body) = body {
            builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to collect body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body_bytes,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn patch_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str) -> TestResponse {
        self.request(Method::PATCH, path, None).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Method::DELETE, path, None).await
    }

    // ------------------------------------------------------------------
    // Test data helpers
    // ------------------------------------------------------------------

    /// Create a post through the API. Returns the created post body.
    pub async fn create_post(&self, title: &str) -> Value {
        let resp = self
            .post_json(
                "/posts",
                json!({
                    "title": title,
                    "content": "Some content long enough.",
                    "author": "tester",
                    "tags": ["rust"],
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{:?}", resp.json());
        resp.json()
    }

    /// Write posts straight to the collection file, bypassing validation and timestamps.
    pub async fn seed_posts(&self, posts: Vec<Post>) {
        self.state
            .posts
            .modify(|stored| {
                stored.extend(posts);
                Ok::<_, anyhow::Error>(())
            })
            .await
            .expect("seed posts failed");
    }

    pub async fn seed_comments(&self, comments: Vec<Comment>) {
        self.state
            .comments
            .modify(|stored| {
                stored.extend(comments);
                Ok::<_, anyhow::Error>(())
            })
            .await
            .expect("seed comments failed");
    }

    pub fn posts_file(&self) -> std::path::PathBuf {
        self.data_dir.path().join("posts.json")
    }

    pub fn comments_file(&self) -> std::path::PathBuf {
        self.data_dir.path().join("comments.json")
    }
}

/// A post dated `minutes_ago` minutes before a fixed reference instant.
pub fn sample_post(title: &str, minutes_ago: i64) -> Post {
    let base = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    Post {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: format!("Body of {}", title),
        author: "seeder".to_string(),
        tags: vec![],
        date: base - Duration::minutes(minutes_ago),
        bookmarked: false,
    }
}

pub fn sample_comment(post_id: Uuid, author: &str) -> Comment {
    Comment {
        id: Uuid::new_v4(),
        post_id,
        author: author.to_string(),
        content: format!("Comment by {}", author),
        date: OffsetDateTime::now_utc(),
    }
}
