//! Progress store persistence.
//!
//! The whole quest progress tree is one document, read-modify-written as a unit. The
//! `ProgressStore` owns the single mutex guarding it: every mutation goes through
//! `mutate`, which holds the lock across load, change and save so two concurrent
//! handlers can never both read a stale tree and overwrite each other's increments.
//! Backends only know how to load and save a whole tree.

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::server::{error::AppError, model::progress::ProgressTree, util::fs::write_atomic};

/// Storage for a serialized progress tree.
#[async_trait]
pub trait ProgressBackend: Send + Sync {
    /// Loads the persisted tree; a store that was never written reads as empty.
    async fn load(&self) -> Result<ProgressTree, AppError>;

    /// Replaces the persisted tree as a whole.
    ///
    /// Must be atomic: after a failure the previous tree is still what `load` returns.
    async fn save(&self, tree: &ProgressTree) -> Result<(), AppError>;
}

/// Progress tree stored as a JSON file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProgressBackend for JsonFileBackend {
    async fn load(&self) -> Result<ProgressTree, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "No progress store at {}, starting empty",
                    self.path.display()
                );
                return Ok(ProgressTree::new());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ProgressTree::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, tree: &ProgressTree) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(tree)?;
        write_atomic(&self.path, &bytes).await
    }
}

/// Progress tree held in memory only.
///
/// Used for tests and dry runs. Saves can be made to fail on demand to exercise the
/// I/O error path.
#[derive(Default)]
pub struct MemoryBackend {
    tree: Mutex<ProgressTree>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing tree.
    pub fn with_tree(tree: ProgressTree) -> Self {
        Self {
            tree: Mutex::new(tree),
            ..Self::default()
        }
    }

    /// Makes every following `save` fail with an I/O error until reset.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the last successfully saved tree.
    pub async fn saved(&self) -> ProgressTree {
        self.tree.lock().await.clone()
    }
}

#[async_trait]
impl ProgressBackend for MemoryBackend {
    async fn load(&self) -> Result<ProgressTree, AppError> {
        Ok(self.tree.lock().await.clone())
    }

    async fn save(&self, tree: &ProgressTree) -> Result<(), AppError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("simulated progress store write failure").into());
        }

        *self.tree.lock().await = tree.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Locked, cached access to the progress tree.
///
/// Cheap to clone; clones share the same lock and cache.
#[derive(Clone)]
pub struct ProgressStore {
    backend: Arc<dyn ProgressBackend>,
    cache: Arc<Mutex<Option<ProgressTree>>>,
}

impl ProgressStore {
    /// Creates a store over a backend. Nothing is loaded until first use.
    ///
    /// # Arguments
    /// - `backend` - Where the tree is persisted
    ///
    /// # Returns
    /// - `ProgressStore` - New store with an empty cache
    pub fn new(backend: Arc<dyn ProgressBackend>) -> Self {
        Self {
            backend,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a store persisted as a JSON file at `path`.
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileBackend::new(path)))
    }

    /// Returns a snapshot of the current tree.
    ///
    /// # Returns
    /// - `Ok(ProgressTree)` - Copy of the tree as last persisted
    /// - `Err(AppError)` - The tree could not be loaded from the backend
    pub async fn get(&self) -> Result<ProgressTree, AppError> {
        let mut guard = self.cache.lock().await;
        let tree = match guard.take() {
            Some(tree) => tree,
            None => self.backend.load().await?,
        };
        let snapshot = tree.clone();
        *guard = Some(tree);

        Ok(snapshot)
    }

    /// Applies `change` to the tree and persists the result as one critical section.
    ///
    /// The closure runs against a copy of the tree. If it changed anything the copy is
    /// saved and only then becomes the current tree; when the save fails the previous
    /// tree stays current and the error is returned, so callers never observe progress
    /// that is not on disk. Closures that change nothing cost no write.
    ///
    /// # Arguments
    /// - `change` - Synchronous edit of the whole tree; its return value is passed through
    ///
    /// # Returns
    /// - `Ok(R)` - The closure's result, after any change was persisted
    /// - `Err(AppError)` - Loading or saving the tree failed; nothing was changed
    pub async fn mutate<F, R>(&self, change: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut ProgressTree) -> R,
    {
        let mut guard = self.cache.lock().await;
        let current = match guard.take() {
            Some(tree) => tree,
            None => self.backend.load().await?,
        };

        let mut next = current.clone();
        let result = change(&mut next);

        if next == current {
            *guard = Some(current);
            return Ok(result);
        }

        match self.backend.save(&next).await {
            Ok(()) => {
                *guard = Some(next);
                Ok(result)
            }
            Err(e) => {
                *guard = Some(current);
                Err(e)
            }
        }
    }
}
