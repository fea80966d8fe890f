use mangekyou_utils::as_variant;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

use super::{TypeCon, TypeVar};
use crate::{
    error::KindError,
    kind::Kind,
    substitute::{Substitutable, Substitution, merge},
};

/// Application of a type constructor to one argument, e.g. `List Num`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeApp {
    pub lhs: Type,
    pub rhs: Type,
}

/// A type term.
///
/// Terms are immutable, applications are shared behind an [`Arc`] so the same
/// subterm may be reachable from many parents. Rewriting a term (e.g. through a
/// [`Substitution`]) only rebuilds the spine leading to the changed leaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Var(TypeVar),
    Con(TypeCon),
    App(Arc<TypeApp>),
    /// The i-th variable quantified by the enclosing [`Scheme`](super::Scheme).
    Gen(u32),
}

impl Type {
    pub fn con(name: &str, kind: Kind) -> Self {
        Self::Con(TypeCon::new(name, kind))
    }

    pub fn app(lhs: Self, rhs: Self) -> Self {
        Self::App(Arc::new(TypeApp { lhs, rhs }))
    }

    /// Kind of this term, generics are not allowed.
    pub fn kind(&self) -> Result<Kind, KindError> {
        self.kind_in(&[])
    }

    /// Kind of this term where `Gen(i)` has kind `gens[i]`.
    pub fn kind_in(&self, gens: &[Kind]) -> Result<Kind, KindError> {
        match self {
            Self::Var(var) => Ok(var.kind().clone()),
            Self::Con(con) => Ok(con.kind().clone()),
            Self::Gen(index) => gens
                .get(*index as usize)
                .cloned()
                .ok_or(KindError::UnboundGen(*index)),
            Self::App(app) => {
                let (param, result) = match app.lhs.kind_in(gens)? {
                    Kind::Arrow(param, result) => (param, result),
                    kind => {
                        return Err(KindError::NotAConstructor {
                            ty: app.lhs.clone(),
                            kind,
                        });
                    }
                };

                let actual = app.rhs.kind_in(gens)?;
                if *param != actual {
                    return Err(KindError::ArgumentMismatch {
                        ty: self.clone(),
                        expected: (*param).clone(),
                        actual,
                    });
                }

                Ok((*result).clone())
            }
        }
    }

    /// Replaces every `Gen(i)` with `args[i]`.
    pub fn instantiate_with(&self, args: &[Type]) -> Self {
        self.try_instantiate_with(args)
            .unwrap_or_else(|| self.clone())
    }

    fn try_instantiate_with(&self, args: &[Type]) -> Option<Self> {
        match self {
            Self::Gen(index) => args.get(*index as usize).cloned(),
            Self::Var(_) | Self::Con(_) => None,
            Self::App(app) => {
                let lhs = app.lhs.try_instantiate_with(args);
                let rhs = app.rhs.try_instantiate_with(args);

                merge(lhs, || app.lhs.clone(), rhs, || app.rhs.clone())
                    .map(|(lhs, rhs)| Self::app(lhs, rhs))
            }
        }
    }

    /// Whether this term prints without surrounding parentheses.
    pub fn is_atomic(&self) -> bool {
        !self.is_app()
    }
}

impl Type {
    pub fn as_var(&self) -> Option<&TypeVar> {
        as_variant!(self, Self::Var)
    }

    pub fn as_con(&self) -> Option<&TypeCon> {
        as_variant!(self, Self::Con)
    }

    pub fn as_app(&self) -> Option<&TypeApp> {
        as_variant!(self, Self::App).map(Arc::as_ref)
    }

    pub fn as_gen(&self) -> Option<u32> {
        as_variant!(self, Self::Gen).copied()
    }

    pub fn is_var(&self) -> bool {
        self.as_var().is_some()
    }

    pub fn is_con(&self) -> bool {
        self.as_con().is_some()
    }

    pub fn is_app(&self) -> bool {
        self.as_app().is_some()
    }

    pub fn is_gen(&self) -> bool {
        self.as_gen().is_some()
    }
}

impl Substitutable for Type {
    fn try_apply(&self, s: &Substitution) -> Option<Self> {
        if s.is_empty() {
            return None;
        }

        match self {
            Self::Var(var) => s.get(var).cloned(),
            Self::Con(_) | Self::Gen(_) => None,
            Self::App(app) => {
                let lhs = app.lhs.try_apply(s);
                let rhs = app.rhs.try_apply(s);

                merge(lhs, || app.lhs.clone(), rhs, || app.rhs.clone())
                    .map(|(lhs, rhs)| Self::app(lhs, rhs))
            }
        }
    }
}

/// Name of a scheme placeholder: `a`..`z`, then `a1`..`z1` and so on.
pub fn gen_name(index: u32) -> String {
    let letter = char::from(b'a' + (index % 26) as u8);
    match index / 26 {
        0 => letter.to_string(),
        round => format!("{letter}{round}"),
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(var) => fmt::Display::fmt(var, f),
            Self::Con(con) if con.is_arrow() => write!(f, "(->)"),
            Self::Con(con) => fmt::Display::fmt(con, f),
            Self::Gen(index) => f.write_str(&gen_name(*index)),
            Self::App(app) => {
                if let Some((input, output)) = self.as_func() {
                    return if input.is_func() {
                        write!(f, "({input}) -> {output}")
                    } else {
                        write!(f, "{input} -> {output}")
                    };
                }

                if app.lhs.is_func() {
                    write!(f, "({})", app.lhs)?;
                } else {
                    write!(f, "{}", app.lhs)?;
                }

                if app.rhs.is_atomic() {
                    write!(f, " {}", app.rhs)
                } else {
                    write!(f, " ({})", app.rhs)
                }
            }
        }
    }
}

impl From<TypeVar> for Type {
    fn from(value: TypeVar) -> Self {
        Self::Var(value)
    }
}

impl From<TypeCon> for Type {
    fn from(value: TypeCon) -> Self {
        Self::Con(value)
    }
}

impl From<TypeApp> for Type {
    fn from(value: TypeApp) -> Self {
        Self::App(Arc::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Typed;

    fn list_kind() -> Kind {
        Kind::constructor(1)
    }

    #[test]
    fn kind_of_application() {
        let list = Type::con("List", list_kind());
        let ty = Type::app(list.clone(), Type::num());

        assert_eq!(list.kind(), Ok(list_kind()));
        assert_eq!(ty.kind(), Ok(Kind::Star));
        assert_eq!(Type::func(Type::num(), Type::bool()).kind(), Ok(Kind::Star));
    }

    #[test]
    fn kind_of_ill_kinded_application() {
        let ty = Type::app(Type::num(), Type::bool());

        assert!(matches!(
            ty.kind(),
            Err(KindError::NotAConstructor { kind: Kind::Star, .. })
        ));

        let list = Type::con("List", list_kind());
        let ty = Type::app(list.clone(), list);
        assert!(matches!(
            ty.kind(),
            Err(KindError::ArgumentMismatch { .. })
        ));
    }

    #[test]
    fn kind_of_generic_needs_context() {
        let ty = Type::app(Type::con("List", list_kind()), Type::Gen(0));

        assert_eq!(ty.kind(), Err(KindError::UnboundGen(0)));
        assert_eq!(ty.kind_in(&[Kind::Star]), Ok(Kind::Star));
    }

    #[test]
    fn free_vars_in_first_occurrence_order() {
        let a = TypeVar::star(4);
        let b = TypeVar::star(2);
        let ty = Type::func(
            Type::Var(a.clone()),
            Type::func(Type::Var(b.clone()), Type::Var(a.clone())),
        );

        let vars: Vec<_> = ty.type_vars().into_iter().collect();
        assert_eq!(vars, vec![a.clone(), b.clone()]);
        assert!(ty.contains(&a));
        assert!(!ty.contains(&TypeVar::star(9)));
    }

    #[test]
    fn apply_chains_and_shares() {
        let a = TypeVar::star(0);
        let b = TypeVar::star(1);
        let s: Substitution = [
            (a.clone(), Type::list(Type::Var(b.clone()))),
            (b.clone(), Type::num()),
        ]
        .into_iter()
        .collect();

        let ty = Type::func(Type::Var(a), Type::bool());
        assert_eq!(ty.apply(&s), Type::func(Type::list(Type::num()), Type::bool()));

        let untouched = Type::func(Type::bool(), Type::Gen(0));
        assert!(untouched.try_apply(&s).is_none());
    }

    #[test]
    fn instantiate_replaces_generics() {
        let ty = Type::func(Type::Gen(0), Type::list(Type::Gen(1)));
        let args = [Type::num(), Type::bool()];

        assert_eq!(
            ty.instantiate_with(&args),
            Type::func(Type::num(), Type::list(Type::bool()))
        );
    }

    #[test]
    fn display() {
        let a = Type::Var(TypeVar::star(3));
        let list = Type::list(Type::list(Type::num()));
        let higher = Type::func(Type::func(a.clone(), Type::num()), Type::bool());
        let pair = Type::app(
            Type::app(Type::con("Pair", Kind::constructor(2)), Type::Gen(0)),
            Type::func(Type::Gen(1), Type::unit()),
        );
        let section = Type::app(Type::arrow(), Type::num());

        assert_eq!(a.to_string(), "'t3");
        assert_eq!(list.to_string(), "List (List Num)");
        assert_eq!(higher.to_string(), "('t3 -> Num) -> Bool");
        assert_eq!(
            Type::func(Type::num(), Type::func(Type::num(), Type::bool())).to_string(),
            "Num -> Num -> Bool"
        );
        assert_eq!(pair.to_string(), "Pair a (b -> Unit)");
        assert_eq!(section.to_string(), "(->) Num");
        assert_eq!(gen_name(27), "b1");
    }
}
