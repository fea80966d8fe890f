//! Hindley-Milner inference with kinds, Algorithm W over the expression tree.

pub mod env;
pub mod error;
pub mod kind;
pub mod options;
pub mod substitute;
pub mod supply;
pub mod typer;
pub mod types;
pub mod unify;

#[cfg(test)]
mod test;

pub mod prelude {
    pub use crate::env::{BoundVars, TypeConEnv, TypeEnv};
    pub use crate::error::{KindError, TypeError, TypeErrors, UnifyError};
    pub use crate::kind::Kind;
    pub use crate::options::{OpSignature, TyperOptions};
    pub use crate::substitute::{Substitutable, Substitution};
    pub use crate::supply::{Replay, TypeVarGen, VarSupply};
    pub use crate::typer::{CheckedProgram, InferResult, Typer, check};
    pub use crate::types::*;
    pub use crate::unify::{Unifiable, unify};
}
