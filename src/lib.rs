//! Purpose: Library crate backing the `scenekeys` CLI and tests.
//! Exports: `scene` (loading), `scan` (key/type collection), `render` (line output), `error`.
//! Role: Keeps the scan pure and testable apart from process concerns.
//! Invariants: Only `scene` touches the filesystem.
pub mod error;
pub mod json;
pub mod render;
pub mod scan;
pub mod scene;

pub use error::{Error, ErrorKind, to_exit_code};
