//! Source locations.
//!
//! A `Span` is the location value attached to tokens and diagnostics. The
//! core never interprets it beyond equality and printing; mapping offsets
//! back to files and lines belongs to whoever owns the source text.

use std::fmt;
use std::ops::Range;

/// A byte offset that does not fit in a [`Span`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("byte offset {offset} does not fit in a 32-bit span")]
pub struct SpanError {
    pub offset: usize,
}

/// Byte range `start..end` into a source buffer, 8 bytes.
///
/// `Span::DUMMY` (`0..0`) stands for "no location".
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Span { start, end }
    }

    /// Convert a `usize` range, failing on offsets past `u32::MAX`.
    pub fn try_from_range(range: Range<usize>) -> Result<Self, SpanError> {
        let narrow = |offset: usize| u32::try_from(offset).map_err(|_| SpanError { offset });
        Ok(Span::new(narrow(range.start)?, narrow(range.end)?))
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}
