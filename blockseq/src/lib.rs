//! Append-only sequences with fixed-increment growth and live cursors.
//!
//! This crate provides two types:
//!
//! - [`GrowableSequence`]: an ordered container supporting append, bulk
//!   append, indexed read, linear search and export. It refuses removal,
//!   replacement and positional insertion with [`Error::Unsupported`].
//!   Capacity grows by configurable fixed blocks ([`GrowthPolicy`]) instead of
//!   doubling.
//! - [`SequenceCursor`]: a bidirectional cursor that reads the sequence live,
//!   so elements appended during traversal are seen.
//!
//! Neither type is thread safe.
//!
//! # Feature Flags
//!
//! - `yaml` (default): load a [`GrowthPolicy`] from YAML
//! - `logging`: re-export [`logger::init_logging`]
//!
//! # Example
//!
//! ```
//! use blockseq::prelude::*;
//!
//! let shared = GrowableSequence::with_blocks(10, 100)?.into_shared();
//! shared.borrow_mut().append_all(["A", "B"]);
//!
//! let mut cursor = SequenceCursor::new(0, &shared);
//! assert_eq!(cursor.try_next()?, "A");
//! assert_eq!(cursor.try_next()?, "B");
//! assert!(cursor.try_next().is_err());
//! assert_eq!(cursor.try_previous()?, "B");
//! # Ok::<(), Error>(())
//! ```

pub mod cursor;
pub mod prelude;
pub mod sequence;

pub use cursor::SequenceCursor;
pub use sequence::{ArrayExport, GrowableSequence, SharedSequence};

// Always re-export core types and traits
pub use blockseq_core::{self, api, config, error};
pub use blockseq_core::{
    CursorMutation, DEFAULT_GROWTH_BLOCK, DEFAULT_INITIAL_BLOCK, Error, GrowthPolicy,
    GrowthSettings, ListMutation, LiveSequence, Result,
};

#[cfg(feature = "logging")]
pub use blockseq_core::logger;
