//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::io;
use std::sync::{Arc, Mutex};

use blockseq::{Error, LiveSequence, Result};

/// Stand-in sequence with a scripted size and a fetch counter.
///
/// The reported size can differ from the stored elements, which lets tests
/// drive a cursor against a sequence that lies about its length.
pub struct FakeSequence {
    pub size: Cell<usize>,
    pub elements: Vec<&'static str>,
    pub fetches: Cell<usize>,
    pub last_fetch: Cell<Option<usize>>,
}

impl FakeSequence {
    pub fn new(size: usize, elements: &[&'static str]) -> Self {
        Self {
            size: Cell::new(size),
            elements: elements.to_vec(),
            fetches: Cell::new(0),
            last_fetch: Cell::new(None),
        }
    }
}

impl LiveSequence<&'static str> for FakeSequence {
    fn size(&self) -> usize {
        self.size.get()
    }

    fn fetch(&self, index: usize) -> Result<&'static str> {
        self.fetches.set(self.fetches.get() + 1);
        self.last_fetch.set(Some(index));
        self.elements
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.elements.len(),
            })
    }
}

/// The four-element fixture used by the traversal scenarios.
pub fn stored() -> Vec<&'static str> {
    vec!["A", "B", "A", "C"]
}

/// In-memory log sink shared between a subscriber and the test body.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
