//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use blockseq::prelude::*;
//!
//! let seq: GrowableSequence<u32> = (0..4).collect();
//! let mut cursor = seq.cursor();
//! assert_eq!(cursor.try_next()?, 0);
//! # Ok::<(), Error>(())
//! ```

// Re-export container types
pub use crate::cursor::SequenceCursor;
pub use crate::sequence::{ArrayExport, GrowableSequence, SharedSequence};

// Re-export error types
pub use blockseq_core::error::{Error, Result};

// Re-export capability traits
pub use blockseq_core::api::{CursorMutation, ListMutation, LiveSequence};

// Re-export configuration
pub use blockseq_core::config::GrowthPolicy;
