//! Token kind registry.
//!
//! Resolves names and spellings for the shared kind space. Built-in kinds
//! resolve from static tables; client kinds resolve through the installed
//! [`TokenSet`] whose range contains them. Ranges are validated when a set
//! is installed, so a lookup never has to pick between two owners.
//!
//! The registry also owns the spelling table scanners use to turn source
//! text into a kind (`"+"` to `PLUS`, `"let"` to a client keyword, ...).

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::kind::punctuation_spellings;
use super::{KindRange, StaticTokenSet, TokenKind, TokenSet};

/// Handle returned by [`TokenKindRegistry::install`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TokenSetId(u32);

impl fmt::Display for TokenSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Misuse of the registry while configuring a client language.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("token set claims an empty kind range {0}")]
    EmptyRange(KindRange),
    #[error("token set range {0} overlaps the built-in kinds below {base}", base = TokenKind::CLIENT_BASE)]
    ReservedRange(KindRange),
    #[error("token set range {requested} overlaps range {existing} of installed token set {owner}")]
    Overlap {
        requested: KindRange,
        existing: KindRange,
        owner: TokenSetId,
    },
    #[error("no installed token set {0}")]
    UnknownTokenSet(TokenSetId),
    #[error("cannot map '{spelling}' to kind {kind}: no installed token set owns it")]
    KindNotOwned { spelling: String, kind: TokenKind },
    #[error("'{spelling}' is already mapped to kind {existing}, cannot map it to kind {requested}")]
    SpellingConflict {
        spelling: String,
        existing: TokenKind,
        requested: TokenKind,
    },
}

/// Why a kind has no name or spelling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("unknown token kind {0}")]
    Unknown(TokenKind),
    #[error("token kind {0} belongs to an uninstalled token set")]
    Uninstalled(TokenKind),
}

struct InstalledSet {
    id: TokenSetId,
    range: KindRange,
    set: Box<dyn TokenSet>,
}

/// Shared table of token kinds.
///
/// One registry is created per compilation driver and passed by reference
/// to scanners and printers. Independent drivers use independent
/// registries.
pub struct TokenKindRegistry {
    sets: SmallVec<[InstalledSet; 4]>,
    /// Ranges whose owner was uninstalled.
    retired: SmallVec<[KindRange; 4]>,
    spellings: FxHashMap<Box<str>, TokenKind>,
    next_id: u32,
}

impl TokenKindRegistry {
    /// Returned by [`name`](Self::name) and [`spelling`](Self::spelling)
    /// for kinds nobody owns.
    pub const UNKNOWN: &'static str = "<unknown>";

    /// Create a registry with the built-in spellings installed.
    pub fn new() -> Self {
        let mut spellings: FxHashMap<Box<str>, TokenKind> = punctuation_spellings()
            .map(|(spelling, kind)| (Box::from(spelling), kind))
            .collect();
        spellings.insert(Box::from("true"), TokenKind::BOOLEAN);
        spellings.insert(Box::from("false"), TokenKind::BOOLEAN);

        TokenKindRegistry {
            sets: SmallVec::new(),
            retired: SmallVec::new(),
            spellings,
            next_id: 0,
        }
    }

    /// Name of `kind`, or [`UNKNOWN`](Self::UNKNOWN).
    pub fn name(&self, kind: TokenKind) -> &str {
        self.resolve_name(kind).unwrap_or(Self::UNKNOWN)
    }

    /// Spelling of `kind`, or [`UNKNOWN`](Self::UNKNOWN).
    pub fn spelling(&self, kind: TokenKind) -> &str {
        self.resolve_spelling(kind).unwrap_or(Self::UNKNOWN)
    }

    pub fn resolve_name(&self, kind: TokenKind) -> Result<&str, LookupError> {
        if let Some(name) = kind.builtin_name() {
            return Ok(name);
        }
        self.resolve(kind, |set, kind| set.name(kind))
    }

    pub fn resolve_spelling(&self, kind: TokenKind) -> Result<&str, LookupError> {
        if let Some(spelling) = kind.builtin_spelling() {
            return Ok(spelling);
        }
        self.resolve(kind, |set, kind| set.spelling(kind))
    }

    fn resolve<'a>(
        &'a self,
        kind: TokenKind,
        query: impl FnOnce(&'a dyn TokenSet, TokenKind) -> Option<&'a str>,
    ) -> Result<&'a str, LookupError> {
        if let Some(owner) = self.owner(kind) {
            return query(owner.set.as_ref(), kind).ok_or(LookupError::Unknown(kind));
        }
        if self.retired.iter().any(|range| range.contains(kind)) {
            Err(LookupError::Uninstalled(kind))
        } else {
            Err(LookupError::Unknown(kind))
        }
    }

    fn owner(&self, kind: TokenKind) -> Option<&InstalledSet> {
        if kind.is_builtin() {
            return None;
        }
        self.sets.iter().find(|entry| entry.range.contains(kind))
    }

    /// True if `kind` is a named built-in or lies in an installed set's range.
    pub fn is_owned(&self, kind: TokenKind) -> bool {
        if kind.is_builtin() {
            !kind.is_error() && kind.builtin_name().is_some()
        } else {
            self.owner(kind).is_some()
        }
    }

    /// Install a token set as the resolver for its kind range.
    pub fn install(&mut self, set: Box<dyn TokenSet>) -> Result<TokenSetId, RegistryError> {
        let range = set.kinds();
        if range.is_empty() {
            return Err(RegistryError::EmptyRange(range));
        }
        if range.start < TokenKind::CLIENT_BASE {
            return Err(RegistryError::ReservedRange(range));
        }
        if let Some(entry) = self.sets.iter().find(|entry| entry.range.overlaps(range)) {
            return Err(RegistryError::Overlap {
                requested: range,
                existing: entry.range,
                owner: entry.id,
            });
        }

        let id = TokenSetId(self.next_id);
        self.next_id += 1;
        self.retired.retain(|retired| !range.covers(*retired));
        self.sets.push(InstalledSet { id, range, set });
        tracing::debug!(%id, %range, "installed token set");
        Ok(id)
    }

    /// Remove an installed token set and every spelling mapped into its
    /// range. Lookups of its kinds report [`LookupError::Uninstalled`]
    /// until another set claims them.
    pub fn uninstall(&mut self, id: TokenSetId) -> Result<Box<dyn TokenSet>, RegistryError> {
        let entry = self.remove(id)?;
        self.retire(entry.range);
        tracing::debug!(%id, range = %entry.range, "uninstalled token set");
        Ok(entry.set)
    }

    /// Record `range` as retired, keeping the list free of ranges that
    /// another entry already covers.
    fn retire(&mut self, range: KindRange) {
        if self.retired.iter().any(|retired| retired.covers(range)) {
            return;
        }
        self.retired.retain(|retired| !range.covers(*retired));
        self.retired.push(range);
    }

    fn remove(&mut self, id: TokenSetId) -> Result<InstalledSet, RegistryError> {
        let index = self
            .sets
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(RegistryError::UnknownTokenSet(id))?;
        let entry = self.sets.remove(index);
        self.spellings.retain(|_, kind| !entry.range.contains(*kind));
        Ok(entry)
    }

    /// Install a table-driven set together with its spellings.
    ///
    /// Either both the set and every spelling are installed, or nothing is.
    pub fn install_static(&mut self, set: StaticTokenSet) -> Result<TokenSetId, RegistryError> {
        let spellings: Vec<_> = set.spellings().collect();
        let retired = self.retired.clone();
        let id = self.install(Box::new(set))?;
        if let Err(err) = self.install_tokens(&spellings) {
            // Nothing was mapped yet, so dropping the set restores the old state.
            let _ = self.remove(id);
            self.retired = retired;
            return Err(err);
        }
        Ok(id)
    }

    /// Map a source spelling to `kind`.
    ///
    /// Re-installing an identical pair is a no-op.
    pub fn install_token(&mut self, spelling: &str, kind: TokenKind) -> Result<(), RegistryError> {
        self.check_token(spelling, kind)?;
        self.spellings.insert(Box::from(spelling), kind);
        Ok(())
    }

    /// Map every `(spelling, kind)` pair, or none of them if any pair is invalid.
    pub fn install_tokens(&mut self, pairs: &[(&str, TokenKind)]) -> Result<(), RegistryError> {
        let mut batch: FxHashMap<&str, TokenKind> = FxHashMap::default();
        for &(spelling, kind) in pairs {
            self.check_token(spelling, kind)?;
            if let Some(&existing) = batch.get(spelling) {
                if existing != kind {
                    return Err(RegistryError::SpellingConflict {
                        spelling: spelling.to_owned(),
                        existing,
                        requested: kind,
                    });
                }
            }
            batch.insert(spelling, kind);
        }
        self.spellings.extend(
            batch
                .into_iter()
                .map(|(spelling, kind)| (Box::from(spelling), kind)),
        );
        Ok(())
    }

    fn check_token(&self, spelling: &str, kind: TokenKind) -> Result<(), RegistryError> {
        if !self.is_owned(kind) {
            return Err(RegistryError::KindNotOwned {
                spelling: spelling.to_owned(),
                kind,
            });
        }
        match self.spellings.get(spelling) {
            Some(&existing) if existing != kind => Err(RegistryError::SpellingConflict {
                spelling: spelling.to_owned(),
                existing,
                requested: kind,
            }),
            _ => Ok(()),
        }
    }

    /// Kind mapped to `spelling`, if any.
    pub fn lookup(&self, spelling: &str) -> Option<TokenKind> {
        self.spellings.get(spelling).copied()
    }

    /// Installed sets in installation order.
    pub fn installed(&self) -> impl Iterator<Item = (TokenSetId, KindRange)> + '_ {
        self.sets.iter().map(|entry| (entry.id, entry.range))
    }
}

impl Default for TokenKindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenKindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKindRegistry")
            .field("sets", &self.installed().collect::<Vec<_>>())
            .field("retired", &self.retired)
            .field("spellings", &self.spellings.len())
            .finish()
    }
}
