use ecow::EcoString;
use mangekyou_span::{Diagnostic, IntoDiagnostic, Located, Span};
use mangekyou_tree::Symbol;
use mangekyou_utils::errors::Errors;
use thiserror::Error;

use crate::{
    kind::Kind,
    types::{Type, TypeCon, TypeVar},
};

pub type TypeErrors = Errors<Located<TypeError>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KindError {
    #[error("`{ty}` of kind `{kind}` cannot be applied to an argument")]
    NotAConstructor { ty: Type, kind: Kind },
    #[error("`{ty}` applies an argument of kind `{actual}` where `{expected}` is expected")]
    ArgumentMismatch {
        ty: Type,
        expected: Kind,
        actual: Kind,
    },
    #[error("generic `{0}` is not quantified by any scheme")]
    UnboundGen(u32),
    #[error("generic `{0}` is quantified but never used")]
    UnusedGen(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    #[error("Occurs: `{var}` occurs in `{ty}`, which would build an infinite type")]
    Occurs { var: TypeVar, ty: Type },
    #[error("Kind Mismatch: `{lhs}` has kind `{lhs_kind}` but `{rhs}` has kind `{rhs_kind}`")]
    KindMismatch {
        lhs: Type,
        lhs_kind: Kind,
        rhs: Type,
        rhs_kind: Kind,
    },
    #[error("Cannot Unify: Expected `{expected}` but got `{actual}`")]
    ConstructorMismatch { expected: TypeCon, actual: TypeCon },
    #[error("Cannot Unify: Expected `{expected}` but got `{actual}`")]
    Mismatch { expected: Type, actual: Type },
    #[error("Unexpected Generic: `{expected}` and `{actual}` must be instantiated before unification")]
    UnexpectedGen { expected: Type, actual: Type },
    #[error(transparent)]
    IllKinded(#[from] KindError),
}

impl UnifyError {
    /// Whether this failure signals a broken invariant of the checker itself
    /// rather than a mistake in the checked program.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::UnexpectedGen { .. } | Self::IllKinded(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("Unbound: `{0}` is not defined")]
    Unbound(Symbol),
    #[error("Unknown Operator: `{0}` has no signature")]
    UnknownOperator(char),
    #[error("Unknown Constructor: `{0}` is not a type")]
    UnknownConstructor(EcoString),
    #[error("Expected Type: `{name}` has kind `{kind}` but a type of kind `*` is expected")]
    ExpectedStar { name: EcoString, kind: Kind },
    #[error(transparent)]
    Unify(#[from] UnifyError),
    #[error(transparent)]
    Kind(#[from] KindError),
}

impl TypeError {
    pub fn is_internal(&self) -> bool {
        match self {
            Self::Unify(err) => err.is_internal(),
            Self::Kind(_) => true,
            _ => false,
        }
    }
}

impl IntoDiagnostic for TypeError {
    fn into_diagnostic(self, span: Span) -> Diagnostic {
        let internal = self.is_internal();
        let diag = Diagnostic::error(span, self.to_string());

        if internal {
            diag.with_note("internal error: the type checker reached an inconsistent state")
        } else {
            diag
        }
    }
}
