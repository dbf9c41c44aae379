//! Capability traits shared by sequence containers and their cursors.
//!
//! Generic code can be written against these traits instead of a concrete
//! container type.
//!
//! # Traits
//!
//! - [`LiveSequence`] - Live size and indexed read, as seen by a cursor
//! - [`ListMutation`] - The full list editing surface (index insert, removal, replacement, views)
//! - [`CursorMutation`] - Editing through a cursor
//!
//! A container with a reduced feature set still implements [`ListMutation`]
//! and [`CursorMutation`], answering every operation it does not provide with
//! [`Error::Unsupported`](crate::Error::Unsupported).
//!
//! # Example
//!
//! ```
//! use blockseq_core::{Result, api::LiveSequence};
//!
//! fn first_two<S: LiveSequence<u32>>(seq: &S) -> Result<(u32, u32)> {
//!     Ok((seq.fetch(0)?, seq.fetch(1)?))
//! }
//! ```

use crate::Result;
use std::{cell::RefCell, rc::Rc};

// ============================================================================
// Read access
// ============================================================================

/// Read access a cursor needs from the sequence it observes.
///
/// Both methods are queried on every cursor call, so implementations must
/// report current state rather than a snapshot.
pub trait LiveSequence<T> {
    /// Number of live elements right now.
    fn size(&self) -> usize;

    /// Owned copy of the element at `index`.
    ///
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange)
    /// when `index >= self.size()`.
    fn fetch(&self, index: usize) -> Result<T>;
}

impl<T, S: LiveSequence<T> + ?Sized> LiveSequence<T> for &S {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn fetch(&self, index: usize) -> Result<T> {
        (**self).fetch(index)
    }
}

impl<T, S: LiveSequence<T> + ?Sized> LiveSequence<T> for Rc<S> {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn fetch(&self, index: usize) -> Result<T> {
        (**self).fetch(index)
    }
}

/// Interior mutability lets a writer append while cursors hold shared
/// references. Each call takes a short-lived shared borrow.
///
/// # Panics
///
/// Panics if the cell is mutably borrowed at the time of the call.
impl<T, S: LiveSequence<T> + ?Sized> LiveSequence<T> for RefCell<S> {
    fn size(&self) -> usize {
        self.borrow().size()
    }

    fn fetch(&self, index: usize) -> Result<T> {
        self.borrow().fetch(index)
    }
}

// ============================================================================
// Editing
// ============================================================================

/// Positional and value-based editing of a list.
pub trait ListMutation<T> {
    /// Insert `element` at `index`, shifting later elements.
    fn insert(&mut self, index: usize, element: T) -> Result<()>;

    /// Remove and return the element at `index`.
    fn remove_at(&mut self, index: usize) -> Result<T>;

    /// Remove the first element equal to `element`.
    fn remove_item(&mut self, element: &T) -> Result<bool>;

    /// Remove every element equal to one of `elements`.
    fn remove_all(&mut self, elements: &[T]) -> Result<bool>;

    /// Keep only elements equal to one of `elements`.
    fn retain_all(&mut self, elements: &[T]) -> Result<bool>;

    /// Replace the element at `index`, returning the previous one.
    fn set(&mut self, index: usize, element: T) -> Result<T>;

    /// Insert all `elements` starting at `index`.
    fn insert_all<I>(&mut self, index: usize, elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>;

    /// View of the elements in `[from, to)`.
    fn sub_list(&self, from: usize, to: usize) -> Result<&[T]>;
}

/// Editing the underlying sequence at a cursor position.
pub trait CursorMutation<T> {
    /// Remove the element last returned by the cursor.
    fn remove(&mut self) -> Result<()>;

    /// Replace the element last returned by the cursor.
    fn set(&mut self, element: T) -> Result<()>;

    /// Insert `element` at the cursor position.
    fn add(&mut self, element: T) -> Result<()>;
}
