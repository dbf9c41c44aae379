//! Bidirectional cursor over a live sequence.
//!
//! A [`SequenceCursor`] sits between two elements. [`try_next`] reads the
//! element after it and moves forward; [`try_previous`] reads the element
//! before it and moves back.
//!
//! The cursor caches nothing: every call asks the sequence for its current
//! size and reads through [`LiveSequence::fetch`]. Elements appended after
//! the cursor ran off the end are picked up by the next [`try_next`], and a
//! cleared sequence makes traversal fail with [`Error::EndOfSequence`]. No
//! "concurrent modification" error exists.
//!
//! ```
//! use blockseq::{GrowableSequence, SequenceCursor};
//!
//! let shared = GrowableSequence::from(vec!["A"]).into_shared();
//! let mut cursor = SequenceCursor::new(0, &shared);
//! assert_eq!(cursor.try_next()?, "A");
//! assert!(!cursor.has_next());
//!
//! shared.borrow_mut().push("B");
//! assert_eq!(cursor.try_next()?, "B");
//! # Ok::<(), blockseq::Error>(())
//! ```
//!
//! [`try_next`]: SequenceCursor::try_next
//! [`try_previous`]: SequenceCursor::try_previous

use std::marker::PhantomData;

use blockseq_core::{CursorMutation, Error, LiveSequence, Result};

use crate::sequence::SharedSequence;

/// Cursor over a borrowed [`LiveSequence`].
///
/// Position is expressed through [`next_index`](Self::next_index): the index
/// the next forward step reads. Construction is infallible; an index past
/// the end is allowed and simply reports no next element until the sequence
/// grows that far.
///
/// # Panics
///
/// When the sequence is a [`SharedSequence`], calling into the cursor while a
/// `borrow_mut()` guard of the same sequence is alive panics.
pub struct SequenceCursor<'a, T, S: ?Sized = SharedSequence<T>> {
    next: usize,
    sequence: &'a S,
    _element: PhantomData<fn() -> T>,
}

impl<'a, T, S> SequenceCursor<'a, T, S>
where
    S: LiveSequence<T> + ?Sized,
{
    /// Cursor whose first forward step reads `index`.
    pub fn new(index: usize, sequence: &'a S) -> Self {
        Self {
            next: index,
            sequence,
            _element: PhantomData,
        }
    }

    /// Index a forward step would read.
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Index a backward step would read, `None` at the front.
    pub fn previous_index(&self) -> Option<usize> {
        self.next.checked_sub(1)
    }

    /// True when the sequence currently holds an element at
    /// [`next_index`](Self::next_index).
    pub fn has_next(&self) -> bool {
        self.sequence.size() > self.next
    }

    /// True unless the cursor is at the front.
    pub fn has_previous(&self) -> bool {
        self.next > 0
    }

    /// Read the element after the cursor and step over it.
    ///
    /// Fails with [`Error::EndOfSequence`] when the sequence currently has no
    /// element there; the position does not change.
    pub fn try_next(&mut self) -> Result<T> {
        let pos = self.next;
        if pos >= self.sequence.size() {
            return Err(Error::EndOfSequence);
        }
        let value = self.sequence.fetch(pos)?;
        self.next = pos + 1;
        Ok(value)
    }

    /// Read the element before the cursor and step back over it.
    ///
    /// Fails with [`Error::EndOfSequence`] at the front, or when the sequence
    /// shrank below the cursor since the last step. The position does not
    /// change on failure.
    pub fn try_previous(&mut self) -> Result<T> {
        let pos = self.previous_index().ok_or(Error::EndOfSequence)?;
        let value = match self.sequence.fetch(pos) {
            Ok(value) => value,
            Err(Error::IndexOutOfRange { .. }) => return Err(Error::EndOfSequence),
            Err(e) => return Err(e),
        };
        self.next = pos;
        Ok(value)
    }
}

impl<T, S> Iterator for SequenceCursor<'_, T, S>
where
    S: LiveSequence<T> + ?Sized,
{
    type Item = T;

    /// Forward step as an `Option`.
    ///
    /// Returning `None` is not final: if the sequence grows, later calls yield
    /// the new elements.
    fn next(&mut self) -> Option<T> {
        self.try_next().ok()
    }
}

impl<T, S: ?Sized> Clone for SequenceCursor<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            sequence: self.sequence,
            _element: PhantomData,
        }
    }
}

impl<T, S: ?Sized> std::fmt::Debug for SequenceCursor<'_, T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceCursor")
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl<T, S> CursorMutation<T> for SequenceCursor<'_, T, S>
where
    S: LiveSequence<T> + ?Sized,
{
    fn remove(&mut self) -> Result<()> {
        Err(Error::unsupported("remove"))
    }

    fn set(&mut self, _element: T) -> Result<()> {
        Err(Error::unsupported("set"))
    }

    fn add(&mut self, _element: T) -> Result<()> {
        Err(Error::unsupported("add"))
    }
}
