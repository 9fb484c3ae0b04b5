//! LineDraft Core Library
//!
//! Platform-agnostic editor state for drawing, grouping and transforming
//! line segments on a 2D canvas, with linear undo/redo and persistence.

pub mod command;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod persist;
pub mod shapes;
pub mod storage;
pub mod tools;
pub mod widget;

pub use command::Command;
pub use config::EditorConfig;
pub use editor::{Editor, InvariantViolation, StatusInfo};
pub use geometry::{LineEquation, line_intersects_rect, segments_intersect};
pub use history::{DEFAULT_HISTORY_LIMIT, History, Snapshot};
pub use input::{InputEvent, Key, Modifiers, translate};
pub use persist::{LoadError, PersistedState};
pub use shapes::{Group, GroupId, Line, LineId, Pin};
pub use storage::{MemoryStorage, Storage, StorageError};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use tools::{Interaction, Mode};
pub use widget::{Handle, WidgetState};
