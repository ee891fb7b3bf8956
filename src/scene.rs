//! Purpose: Load the scene document from disk.
//! Exports: `SCENE_PATH`, `load`.
//! Role: Only filesystem touchpoint of the crate.
//! Invariants: The file handle is released before decoding starts.
//! Invariants: Missing file and malformed JSON both map to `ErrorKind::Input`.
use std::path::Path;

use serde_json::Value;

use crate::error::Error;
use crate::json::parse;

/// Fixed location of the scene document, relative to the working directory.
pub const SCENE_PATH: &str = "./test/output/scene.json";

pub fn load(path: impl AsRef<Path>) -> Result<Value, Error> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|err| {
        Error::input(path, "failed to read scene file")
            .with_hint("Run from the directory containing test/output/scene.json.")
            .with_source(err)
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read scene file");

    parse::from_slice(&bytes).map_err(|err| {
        let hint = parse::hint_for_error(&err, "scene.load");
        Error::input(path, "scene file is not valid JSON")
            .with_hint(hint)
            .with_source(err)
    })
}
