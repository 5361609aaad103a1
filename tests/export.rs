//! Export Tests
//!
//! Covers the markdown zip archive and entry naming.

mod common;

use axum::http::{header, StatusCode};
use common::{app, sample_post};
use std::io::{Cursor, Read};

use quillpost::app::export::slugify;

fn read_archive(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            (entry.name().to_string(), body)
        })
        .collect()
}

#[tokio::test]
async fn export_posts_as_markdown_zip() {
    let app = app().await;
    app.seed_posts(vec![
        sample_post("Hello World", 2),
        sample_post("Second  post", 1),
    ])
    .await;

    let resp = app.get("/posts/export").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.headers[header::CONTENT_TYPE], "application/zip");
    assert_eq!(
        resp.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"posts.zip\""
    );

    let entries = read_archive(&resp.body_bytes);
    assert_eq!(
        entries,
        vec![
            (
                "Hello-World.md".to_string(),
                "# Hello World\n\nBody of Hello World\n".to_string()
            ),
            (
                "Second-post.md".to_string(),
                "# Second  post\n\nBody of Second  post\n".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn export_empty_collection() {
    let app = app().await;

    let resp = app.get("/posts/export").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(read_archive(&resp.body_bytes).is_empty());
}

#[tokio::test]
async fn export_colliding_slugs_get_suffixes() {
    let app = app().await;
    app.seed_posts(vec![
        sample_post("Same title", 3),
        sample_post("Same  title", 2),
        sample_post("Same\ttitle", 1),
    ])
    .await;

    let resp = app.get("/posts/export").await;

    let names: Vec<String> = read_archive(&resp.body_bytes)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(
        names,
        vec!["Same-title.md", "Same-title-2.md", "Same-title-3.md"]
    );
}

#[test]
fn slugify_replaces_unsafe_characters() {
    assert_eq!(slugify("Hello   World"), "Hello-World");
    assert_eq!(slugify(" padded "), "-padded-");
    assert_eq!(slugify("a/b\\c:d"), "a-b-c-d");
    assert_eq!(slugify("   "), "untitled");
    assert_eq!(slugify(".."), "untitled");
    assert_eq!(slugify("Café crème"), "Café-crème");
}
