use core::num::NonZeroU8;
use serde::{Deserialize, Serialize};

/// Highest tile kind that still has a single-character symbol.
pub const MAX_KINDS: u8 = 52;

/// Type identifier of a tile; two tiles can only be matched when their kinds are equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileKind(NonZeroU8);

impl TileKind {
    pub const fn new(id: u8) -> Option<Self> {
        match NonZeroU8::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Kind number `index + 1`, so that `nth(0)` is the first kind.
    pub const fn nth(index: u8) -> Self {
        Self(NonZeroU8::MIN.saturating_add(index))
    }

    pub const fn id(self) -> u8 {
        self.0.get()
    }

    /// `A`..`Z` for the first 26 kinds, then `a`..`z`.
    pub fn symbol(self) -> char {
        match self.id() {
            id @ 1..=26 => char::from(b'A' + id - 1),
            id @ 27..=MAX_KINDS => char::from(b'a' + id - 27),
            _ => '#',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        let byte = u8::try_from(symbol).ok()?;
        match byte {
            b'A'..=b'Z' => Self::new(byte - b'A' + 1),
            b'a'..=b'z' => Self::new(byte - b'a' + 27),
            _ => None,
        }
    }
}

/// Content of a single board position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Occupied(TileKind),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_occupied(self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    pub const fn kind(self) -> Option<TileKind> {
        match self {
            Self::Empty => None,
            Self::Occupied(kind) => Some(kind),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Occupied(kind) => kind.symbol(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            other => TileKind::from_symbol(other).map(Self::Occupied),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}
