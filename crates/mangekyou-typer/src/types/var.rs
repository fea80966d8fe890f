use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use crate::kind::Kind;

/// An unresolved type variable.
///
/// Identity is the id alone, the kind is metadata which by construction agrees
/// for equal ids. Fresh variables come from a [`VarSupply`](crate::supply::VarSupply).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeVar {
    id: u64,
    kind: Kind,
}

impl TypeVar {
    pub fn new(id: u64, kind: Kind) -> Self {
        Self { id, kind }
    }

    pub fn star(id: u64) -> Self {
        Self::new(id, Kind::Star)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }
}

impl PartialEq for TypeVar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeVar {}

impl Hash for TypeVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeVar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeVar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'t{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_the_id() {
        let a = TypeVar::new(7, Kind::Star);
        let b = TypeVar::new(7, Kind::constructor(1));

        assert_eq!(a, b);
        assert_ne!(a, TypeVar::star(8));
        assert!(a < TypeVar::star(8));
        assert_eq!(a.to_string(), "'t7");
    }
}
