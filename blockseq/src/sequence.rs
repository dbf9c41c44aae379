//! Growable sequence with fixed-increment capacity growth.
//!
//! [`GrowableSequence`] is an append-only ordered container. It never removes,
//! replaces or inserts at an arbitrary position; those operations exist only
//! through [`ListMutation`] and always fail with [`Error::Unsupported`].
//!
//! Storage grows by a fixed amount rather than by doubling. The first
//! allocation holds the incoming elements plus
//! [`GrowthPolicy::initial_block`] spare slots; when later appends do not fit
//! in the spare room, a new block holding the live elements, the incoming
//! ones and [`GrowthPolicy::growth_block`] spare slots replaces the old one.
//! Over-allocation is therefore bounded by the larger of the two blocks.
//!
//! # Thread safety
//!
//! Not synchronized. Share it between cursors and a writer on one thread
//! through [`SharedSequence`].

use std::cell::RefCell;
use std::ops::Index;

use blockseq_core::{Error, GrowthPolicy, ListMutation, LiveSequence, Result};
use tracing::trace;

use crate::cursor::SequenceCursor;

/// A sequence that cursors can observe while it is still being appended to.
///
/// `RefCell` is `!Sync`, so a shared sequence cannot cross threads.
pub type SharedSequence<T> = RefCell<GrowableSequence<T>>;

/// Append-only sequence backed by a single block of memory.
///
/// # Example
///
/// ```
/// use blockseq::GrowableSequence;
///
/// let mut seq = GrowableSequence::with_blocks(2, 4)?;
/// seq.push("A");
/// assert_eq!(seq.capacity(), 3);
///
/// assert!(seq.append_all(["B", "C", "D"]));
/// assert_eq!(seq.capacity(), 8);
/// assert_eq!(seq.as_slice(), &["A", "B", "C", "D"]);
/// # Ok::<(), blockseq::Error>(())
/// ```
#[derive(Debug)]
pub struct GrowableSequence<T> {
    storage: Vec<T>,
    policy: GrowthPolicy,
}

impl<T> GrowableSequence<T> {
    /// Empty sequence with the default policy. Nothing is allocated until the
    /// first append.
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    /// Empty sequence with a validated policy.
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self {
            storage: Vec::new(),
            policy,
        }
    }

    /// Empty sequence with distinct initial and incremental blocks.
    ///
    /// Fails with [`Error::InvalidArgument`] if either block is zero.
    pub fn with_blocks(initial_block: usize, growth_block: usize) -> Result<Self> {
        Ok(Self::with_policy(GrowthPolicy::new(
            initial_block,
            growth_block,
        )?))
    }

    /// Empty sequence using `growth_block` for the first allocation too.
    pub fn with_block(growth_block: usize) -> Result<Self> {
        Ok(Self::with_policy(GrowthPolicy::uniform(growth_block)?))
    }

    /// Sequence holding the elements of `source`, in source order.
    pub fn from_source<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Self::from_source_with_policy(source, GrowthPolicy::default())
    }

    /// Like [`from_source`](Self::from_source) with a uniform block.
    pub fn from_source_with_block<I>(source: I, growth_block: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Ok(Self::from_source_with_policy(
            source,
            GrowthPolicy::uniform(growth_block)?,
        ))
    }

    /// Like [`from_source`](Self::from_source) with distinct blocks.
    pub fn from_source_with_blocks<I>(
        source: I,
        initial_block: usize,
        growth_block: usize,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Ok(Self::from_source_with_policy(
            source,
            GrowthPolicy::new(initial_block, growth_block)?,
        ))
    }

    /// Like [`from_source`](Self::from_source) with an explicit policy.
    pub fn from_source_with_policy<I>(source: I, policy: GrowthPolicy) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut seq = Self::with_policy(policy);
        seq.append_all(source);
        seq
    }

    /// The growth policy in use.
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Make room for `incoming` more elements.
    fn ensure_capacity(&mut self, incoming: usize) {
        let capacity = self.storage.capacity();
        if capacity == 0 {
            let first = self.policy.first_capacity(incoming);
            trace!(capacity = first, "allocating sequence storage");
            self.storage = Vec::with_capacity(first);
            return;
        }

        let live = self.storage.len();
        if capacity - live >= incoming {
            return;
        }

        let grown = self.policy.next_capacity(live, incoming);
        trace!(from = capacity, to = grown, live, "growing sequence storage");
        let mut block = Vec::with_capacity(grown);
        block.append(&mut self.storage);
        self.storage = block;
    }

    /// Append one element.
    pub fn push(&mut self, element: T) {
        self.ensure_capacity(1);
        self.storage.push(element);
    }

    /// Append every element of `source` in its iteration order.
    ///
    /// Room for the whole source is made in a single step. Returns `false`,
    /// leaving the sequence untouched, when the source is empty.
    pub fn append_all<I>(&mut self, source: I) -> bool
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let source = source.into_iter();
        let incoming = source.len();
        if incoming < 1 {
            return false;
        }
        self.ensure_capacity(incoming);
        self.storage.extend(source.take(incoming));
        true
    }

    /// Element at `index`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] when `index >= len()`, which
    /// includes every index on an empty sequence.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.storage.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.storage.len(),
        })
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// True when no element is live.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Number of elements the current block holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Forget every element. The allocated block is kept.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// The live elements in append order.
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    /// Borrowing iterator over the live elements. Unlike a cursor it holds
    /// a borrow, so the sequence cannot grow while it is in use.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.storage.iter()
    }

    /// Shareable form, for cursors that must see later appends.
    pub fn into_shared(self) -> SharedSequence<T> {
        RefCell::new(self)
    }
}

impl<T: PartialEq> GrowableSequence<T> {
    /// Position of the first element equal to `element`.
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.storage.iter().position(|e| e == element)
    }

    /// Position of the last element equal to `element`.
    pub fn last_index_of(&self, element: &T) -> Option<usize> {
        self.storage.iter().rposition(|e| e == element)
    }

    pub fn contains(&self, element: &T) -> bool {
        self.index_of(element).is_some()
    }

    /// True when every candidate is present.
    pub fn contains_all<'c, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'c T>,
        T: 'c,
    {
        candidates
            .into_iter()
            .all(|candidate| self.index_of(candidate).is_some())
    }

    /// [`contains_all`](Self::contains_all) for a candidate collection that
    /// may be absent, failing with [`Error::NullReference`] in that case.
    pub fn try_contains_all<'c, I>(&self, candidates: Option<I>) -> Result<bool>
    where
        I: IntoIterator<Item = &'c T>,
        T: 'c,
    {
        let candidates = candidates.ok_or(Error::NullReference {
            argument: "candidates",
        })?;
        Ok(self.contains_all(candidates))
    }
}

impl<T: Clone> GrowableSequence<T> {
    /// Fresh copy of the live elements, sized exactly `len()`.
    pub fn to_vec(&self) -> Vec<T> {
        self.storage.to_vec()
    }

    /// Fresh boxed copy of the live elements, sized exactly `len()`.
    pub fn to_array(&self) -> Box<[T]> {
        self.storage.as_slice().into()
    }

    /// Copy the live elements into a caller-supplied buffer.
    ///
    /// If `buffer` is shorter than `len()`, it is left alone and a new boxed
    /// slice of exactly `len()` slots is returned instead. Otherwise elements
    /// land in `buffer[..len()]` and, when the buffer is longer, the slot right
    /// after them is set to `None` to mark the end of data. Later slots are not
    /// touched.
    ///
    /// ```
    /// use blockseq::{ArrayExport, GrowableSequence};
    ///
    /// let seq = GrowableSequence::from(vec!["A", "B"]);
    /// let mut buffer = [Some("0"), Some("1"), Some("2"), Some("3")];
    /// assert!(matches!(seq.to_array_into(&mut buffer), ArrayExport::Filled(_)));
    /// assert_eq!(buffer, [Some("A"), Some("B"), None, Some("3")]);
    /// ```
    pub fn to_array_into<'b>(&self, buffer: &'b mut [Option<T>]) -> ArrayExport<'b, T> {
        let count = self.storage.len();
        if buffer.len() < count {
            return ArrayExport::Allocated(self.storage.iter().cloned().map(Some).collect());
        }

        for (slot, element) in buffer.iter_mut().zip(&self.storage) {
            *slot = Some(element.clone());
        }
        if buffer.len() > count {
            buffer[count] = None;
        }
        ArrayExport::Filled(buffer)
    }
}

impl<T: Clone> GrowableSequence<T> {
    /// Cursor over this sequence, positioned before the first element.
    pub fn cursor(&self) -> SequenceCursor<'_, T, Self> {
        self.cursor_at(0)
    }

    /// Cursor whose first [`try_next`](SequenceCursor::try_next) reads `index`.
    pub fn cursor_at(&self, index: usize) -> SequenceCursor<'_, T, Self> {
        SequenceCursor::new(index, self)
    }
}

/// Result of [`GrowableSequence::to_array_into`].
#[derive(Debug, PartialEq)]
pub enum ArrayExport<'b, T> {
    /// The supplied buffer was large enough and now holds the elements.
    Filled(&'b mut [Option<T>]),
    /// The supplied buffer was too short; a new one was allocated.
    Allocated(Box<[Option<T>]>),
}

impl<T> ArrayExport<'_, T> {
    /// The exported slots, whichever buffer holds them.
    pub fn as_slice(&self) -> &[Option<T>] {
        match self {
            ArrayExport::Filled(buffer) => &buffer[..],
            ArrayExport::Allocated(buffer) => &buffer[..],
        }
    }

    /// True when the caller's buffer was too short and left untouched.
    pub fn is_allocated(&self) -> bool {
        matches!(self, ArrayExport::Allocated(_))
    }
}

// ============================================================================
// Refused editing
// ============================================================================

impl<T> ListMutation<T> for GrowableSequence<T> {
    fn insert(&mut self, _index: usize, _element: T) -> Result<()> {
        Err(Error::unsupported("insert"))
    }

    fn remove_at(&mut self, _index: usize) -> Result<T> {
        Err(Error::unsupported("remove_at"))
    }

    fn remove_item(&mut self, _element: &T) -> Result<bool> {
        Err(Error::unsupported("remove_item"))
    }

    fn remove_all(&mut self, _elements: &[T]) -> Result<bool> {
        Err(Error::unsupported("remove_all"))
    }

    fn retain_all(&mut self, _elements: &[T]) -> Result<bool> {
        Err(Error::unsupported("retain_all"))
    }

    fn set(&mut self, _index: usize, _element: T) -> Result<T> {
        Err(Error::unsupported("set"))
    }

    fn insert_all<I>(&mut self, _index: usize, _elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        Err(Error::unsupported("insert_all"))
    }

    fn sub_list(&self, _from: usize, _to: usize) -> Result<&[T]> {
        Err(Error::unsupported("sub_list"))
    }
}

impl<T: Clone> LiveSequence<T> for GrowableSequence<T> {
    fn size(&self) -> usize {
        self.len()
    }

    fn fetch(&self, index: usize) -> Result<T> {
        self.get(index).cloned()
    }
}

// ============================================================================
// Standard traits
// ============================================================================

impl<T> Default for GrowableSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for GrowableSequence<T> {
    fn clone(&self) -> Self {
        Self::from_source_with_policy(self.storage.iter().cloned(), self.policy)
    }
}

impl<T: PartialEq> PartialEq for GrowableSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl<T: Eq> Eq for GrowableSequence<T> {}

impl<T> Index<usize> for GrowableSequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.storage[index]
    }
}

impl<T> AsRef<[T]> for GrowableSequence<T> {
    fn as_ref(&self) -> &[T] {
        &self.storage
    }
}

impl<T> Extend<T> for GrowableSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        // buffered so the whole batch is placed with a single reallocation
        let buffered: Vec<T> = iter.into_iter().collect();
        self.append_all(buffered);
    }
}

impl<T> FromIterator<T> for GrowableSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T> From<Vec<T>> for GrowableSequence<T> {
    fn from(value: Vec<T>) -> Self {
        Self::from_source(value)
    }
}

impl<T: Clone> From<&[T]> for GrowableSequence<T> {
    fn from(value: &[T]) -> Self {
        Self::from_source(value.iter().cloned())
    }
}

impl<'a, T> IntoIterator for &'a GrowableSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.iter()
    }
}

impl<T> IntoIterator for GrowableSequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.into_iter()
    }
}
