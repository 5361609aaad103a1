use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// A record collection persisted as one pretty-printed JSON array.
///
/// Every access loads the whole file and every mutation rewrites it. The
/// mutex serializes the load/mutate/persist cycle so concurrent writers
/// cannot interleave and drop each other's changes.
pub struct JsonCollection<T> {
    inner: Arc<Inner>,
    _records: PhantomData<fn() -> T>,
}

struct Inner {
    path: PathBuf,
    lock: Mutex<()>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _records: PhantomData,
        }
    }
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                lock: Mutex::new(()),
            }),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Creates the parent directory and an empty `[]` file if nothing is there yet.
    pub async fn ensure_exists(&self) -> Result<()> {
        let _guard = self.inner.lock.lock().await;
        let path = self.path();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        if tokio::fs::try_exists(path)
            .await
            .with_context(|| format!("failed to stat {}", path.display()))?
        {
            return Ok(());
        }

        tracing::info!(path = %path.display(), "initializing empty collection");
        self.persist(&[]).await
    }

    pub async fn read(&self) -> Result<Vec<T>> {
        let _guard = self.inner.lock.lock().await;
        self.load().await
    }

    /// Holds the collection lock until the returned guard drops. Callers
    /// locking several collections must always take posts before comments.
    pub async fn lock(&self) -> LockedCollection<'_, T> {
        LockedCollection {
            collection: self,
            _guard: self.inner.lock.lock().await,
        }
    }

    /// Runs `f` against the freshly loaded records and rewrites the file only if `f` succeeds.
    pub async fn modify<R, E, F>(&self, f: F) -> std::result::Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> std::result::Result<R, E>,
        E: From<anyhow::Error>,
    {
        let _guard = self.inner.lock.lock().await;
        let mut records = self.load().await?;
        let output = f(&mut records)?;
        self.persist(&records).await?;
        Ok(output)
    }

    async fn load(&self) -> Result<Vec<T>> {
        let path = self.path();
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        serde_json::from_slice(&raw).with_context(|| format!("corrupt JSON in {}", path.display()))
    }

    async fn persist(&self, records: &[T]) -> Result<()> {
        let path = self.path();
        let body = serde_json::to_vec_pretty(records)
            .with_context(|| format!("failed to encode {}", path.display()))?;

        // Write then rename so readers never observe a half-written array.
        let tmp = tmp_path(path);
        tokio::fs::write(&tmp, &body)
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .with_context(|| format!("failed to replace {}", path.display()))?;

        Ok(())
    }
}

pub struct LockedCollection<'a, T> {
    collection: &'a JsonCollection<T>,
    _guard: MutexGuard<'a, ()>,
}

impl<T> LockedCollection<'_, T>
where
    T: Serialize + DeserializeOwned,
{
    pub async fn load(&self) -> Result<Vec<T>> {
        self.collection.load().await
    }

    pub async fn persist(&self, records: &[T]) -> Result<()> {
        self.collection.persist(records).await
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
