use ecow::EcoString;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kind::Kind;

/// A named type head with a fixed kind, e.g. `Num : *` or `List : * -> *`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeCon {
    name: EcoString,
    kind: Kind,
}

impl TypeCon {
    pub fn new(name: impl Into<EcoString>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &EcoString {
        &self.name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }
}

impl fmt::Display for TypeCon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
