//! Persistence backends for saved editor state.
//!
//! A backend stores [`PersistedState`] values under string keys. The editor
//! helpers at the bottom run the same validation as [`Editor::from_persisted`]
//! when reading a state back.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::persist::{LoadError, PersistedState};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Key used when a host keeps a single saved editor.
pub const DEFAULT_STATE_KEY: &str = "editor";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No saved state under key: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Saved state rejected: {0}")]
    Invalid(#[from] LoadError),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A place to keep saved editor states.
pub trait Storage: Send + Sync {
    /// Save a state under `key`, replacing any previous one.
    fn save(&self, key: &str, state: &PersistedState) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the state saved under `key`.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<PersistedState>>;

    /// Delete the state under `key`. Missing keys are not an error.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check whether `key` holds a state.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Save an editor under `key`.
pub async fn save_editor<S: Storage + ?Sized>(storage: &S, key: &str, editor: &Editor) -> StorageResult<()> {
    storage.save(key, &editor.to_persisted()).await?;
    log::info!("Saved editor state to '{}'", key);
    Ok(())
}

/// Load and validate the editor saved under `key`.
pub async fn load_editor<S: Storage + ?Sized>(
    storage: &S,
    key: &str,
    config: EditorConfig,
) -> StorageResult<Editor> {
    let state = storage.load(key).await?;
    let editor = Editor::from_persisted(state, config)?;
    log::info!("Loaded editor state from '{}'", key);
    Ok(editor)
}
