//! Purpose: Internal JSON parsing boundary for the scene loader.
//! Exports: `parse` module with decode helpers and failure categorization.
//! Role: Single seam for parser usage so callsites avoid ad hoc decode logic.
//! Invariants: Scene decoding goes through this module.

pub mod parse;
