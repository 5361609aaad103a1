use anyhow::{Context, Result};
use bytes::Bytes;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::app::error::StoreError;
use crate::domain::post::Post;
use crate::infra::storage::JsonCollection;

pub const ARCHIVE_FILE_NAME: &str = "posts.zip";

#[derive(Clone)]
pub struct ExportService {
    posts: JsonCollection<Post>,
}

impl ExportService {
    pub fn new(posts: JsonCollection<Post>) -> Self {
        Self { posts }
    }

    /// Builds a zip holding one markdown document per post, in stored order.
    pub async fn export_archive(&self) -> Result<Bytes, StoreError> {
        let posts = self.posts.read().await?;
        let count = posts.len();

        let archive = tokio::task::spawn_blocking(move || build_archive(&posts))
            .await
            .context("archive task panicked")??;

        tracing::info!(posts = count, bytes = archive.len(), "posts exported");
        Ok(Bytes::from(archive))
    }
}

pub fn build_archive(posts: &[Post]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let mut used = HashSet::new();
    for post in posts {
        let name = unique_entry_name(&slugify(&post.title), &mut used);
        writer
            .start_file(name.as_str(), options)
            .with_context(|| format!("failed to start archive entry {}", name))?;
        writer
            .write_all(render_markdown(post).as_bytes())
            .with_context(|| format!("failed to write archive entry {}", name))?;
    }

    let cursor = writer.finish().context("failed to finish archive")?;
    Ok(cursor.into_inner())
}

pub fn render_markdown(post: &Post) -> String {
    format!("# {}\n\n{}\n", post.title, post.content)
}

/// Replaces whitespace runs and path-unsafe characters with a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        let unsafe_char = ch.is_whitespace()
            || ch.is_control()
            || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        if unsafe_char {
            pending_dash = true;
            continue;
        }
        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }
        slug.push(ch);
    }
    if pending_dash {
        slug.push('-');
    }

    if slug.is_empty() || slug.chars().all(|ch| ch == '-' || ch == '.') {
        return "untitled".to_string();
    }
    slug
}

fn unique_entry_name(slug: &str, used: &mut HashSet<String>) -> String {
    let mut name = format!("{}.md", slug);
    let mut suffix = 2;
    while used.contains(&name) {
        name = format!("{}-{}.md", slug, suffix);
        suffix += 1;
    }
    used.insert(name.clone());
    name
}
