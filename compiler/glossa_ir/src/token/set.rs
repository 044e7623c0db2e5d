//! Client token sets.

use super::{KindRange, TokenKind};

/// Resolver for the kinds a client language adds to the shared kind space.
///
/// A token set claims one contiguous [`KindRange`] at install time. The
/// registry only asks it about kinds inside that range.
pub trait TokenSet {
    /// The kind values this set owns.
    fn kinds(&self) -> KindRange;

    /// Human-readable name of `kind`, used in debug output.
    fn name(&self, kind: TokenKind) -> Option<&str>;

    /// Canonical source spelling of `kind`, used in diagnostics.
    fn spelling(&self, kind: TokenKind) -> Option<&str>;
}

/// Table-driven [`TokenSet`].
///
/// Entry `i` of the table describes kind `start + i`. An empty spelling
/// marks a kind with no fixed source text (a client literal class, say);
/// such a kind reports its name as its spelling and is left out of
/// [`spellings`](Self::spellings).
#[derive(Clone, Debug)]
pub struct StaticTokenSet {
    range: KindRange,
    entries: &'static [(&'static str, &'static str)],
}

impl StaticTokenSet {
    /// Build a set owning `[start, start + entries.len())`.
    ///
    /// # Panics
    /// Panics if the range would run past `u16::MAX`.
    pub fn new(start: u16, entries: &'static [(&'static str, &'static str)]) -> Self {
        let end = u16::try_from(entries.len())
            .ok()
            .and_then(|len| start.checked_add(len))
            .unwrap_or_else(|| {
                panic!(
                    "token set starting at {start} with {} entries overflows the kind space",
                    entries.len()
                )
            });
        StaticTokenSet {
            range: KindRange::new(start, end),
            entries,
        }
    }

    fn entry(&self, kind: TokenKind) -> Option<(&'static str, &'static str)> {
        if !self.range.contains(kind) {
            return None;
        }
        self.entries
            .get(usize::from(kind.raw() - self.range.start))
            .copied()
    }

    /// Kind of the entry named `name`, if any.
    pub fn kind_named(&self, name: &str) -> Option<TokenKind> {
        let offset = self.entries.iter().position(|&(n, _)| n == name)?;
        let offset = u16::try_from(offset).ok()?;
        Some(self.range.kind(offset))
    }

    /// `(spelling, kind)` pairs for every entry with a fixed spelling.
    pub fn spellings(&self) -> impl Iterator<Item = (&'static str, TokenKind)> + '_ {
        (self.range.start..self.range.end)
            .zip(self.entries)
            .filter(|(_, (_, spelling))| !spelling.is_empty())
            .map(|(raw, &(_, spelling))| (spelling, TokenKind::new(raw)))
    }
}

impl TokenSet for StaticTokenSet {
    fn kinds(&self) -> KindRange {
        self.range
    }

    fn name(&self, kind: TokenKind) -> Option<&str> {
        self.entry(kind).map(|(name, _)| name)
    }

    fn spelling(&self, kind: TokenKind) -> Option<&str> {
        self.entry(kind)
            .map(|(name, spelling)| if spelling.is_empty() { name } else { spelling })
    }
}
