//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - Line-buffer file I/O with consistent error handling
//! - `validation` - Input validation helpers

pub mod io;
pub mod validation;
