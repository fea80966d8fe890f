use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// The "type of a type".
///
/// `Star` classifies ordinary, fully applied types (e.g. `Num`, `Num -> Bool`),
/// `Arrow` classifies type constructors (e.g. `List : * -> *`).
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[default]
    Star,
    Arrow(Arc<Kind>, Arc<Kind>),
}

impl Kind {
    pub fn arrow(lhs: Kind, rhs: Kind) -> Self {
        Self::Arrow(Arc::new(lhs), Arc::new(rhs))
    }

    /// Kind of a constructor taking `arity` ordinary types, `* -> .. -> *`.
    pub fn constructor(arity: usize) -> Self {
        (0..arity).fold(Self::Star, |kind, _| Self::arrow(Self::Star, kind))
    }

    pub fn is_star(&self) -> bool {
        matches!(self, Self::Star)
    }

    /// The kind expected of an argument, if this is a constructor kind.
    pub fn param(&self) -> Option<&Kind> {
        match self {
            Self::Star => None,
            Self::Arrow(lhs, _) => Some(lhs),
        }
    }

    /// The kind produced by applying a constructor of this kind.
    pub fn result(&self) -> Option<&Kind> {
        match self {
            Self::Star => None,
            Self::Arrow(_, rhs) => Some(rhs),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Star => write!(f, "*"),
            Self::Arrow(lhs, rhs) if lhs.is_star() => write!(f, "* -> {rhs}"),
            Self::Arrow(lhs, rhs) => write!(f, "({lhs}) -> {rhs}"),
        }
    }
}
