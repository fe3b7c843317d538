//! Pagination envelope returned by list endpoints.

use serde::{Deserialize, Serialize};

/// A window of results plus the bounds of that window.
///
/// `count` is the total number of items available on the server;
/// `start` and `end` bound the slice carried in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The items in this window.
    pub data: Vec<T>,
    /// Offset of the first item in `data`.
    #[serde(default)]
    pub start: u64,
    /// Offset one past the last item in `data`.
    #[serde(default)]
    pub end: u64,
    /// Total number of items available.
    #[serde(default)]
    pub count: u64,
}

impl<T> Envelope<T> {
    /// Creates an envelope covering `data` from offset zero.
    #[must_use]
    pub fn new(data: Vec<T>, count: u64) -> Self {
        let end = data.len() as u64;
        Self {
            data,
            start: 0,
            end,
            count,
        }
    }

    /// Returns the number of items in this window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the window carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if the server holds items past this window.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.end < self.count
    }

    /// Unwraps the items.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Maps the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Envelope<U> {
        Envelope {
            data: self.data.into_iter().map(f).collect(),
            start: self.start,
            end: self.end,
            count: self.count,
        }
    }
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self::new(Vec::new(), 0)
    }
}

impl<T> IntoIterator for Envelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
