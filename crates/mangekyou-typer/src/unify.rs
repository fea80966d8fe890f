use log::trace;

use crate::{
    error::UnifyError,
    substitute::{Substitutable, Substitution},
    types::{Type, TypeVar, Typed},
};

/// Most general unifier, builds up a substitution S such that S(lhs) is congruent to S(rhs).
pub trait Unifiable<Rhs = Self> {
    /// Performs unification on the type with another type.
    /// If successful, results in a solution to the unification problem,
    /// in the form of a substitution. If there is no solution to the
    /// unification problem then unification fails and an error is reported.
    fn try_unify(&self, rhs: &Rhs) -> Result<Substitution, UnifyError>;
}

impl Unifiable for Type {
    fn try_unify(&self, rhs: &Self) -> Result<Substitution, UnifyError> {
        unify(self, rhs)
    }
}

impl Unifiable<Type> for TypeVar {
    fn try_unify(&self, rhs: &Type) -> Result<Substitution, UnifyError> {
        bind(self, rhs)
    }
}

/// Unifies `expected` with `actual`.
///
/// Only instantiated terms may be unified, a `Gen` on either side is an error.
pub fn unify(expected: &Type, actual: &Type) -> Result<Substitution, UnifyError> {
    trace!("UNIFY: {expected} ~ {actual}");

    match (expected, actual) {
        (Type::Gen(_), _) | (_, Type::Gen(_)) => Err(UnifyError::UnexpectedGen {
            expected: expected.clone(),
            actual: actual.clone(),
        }),
        (Type::Var(l), Type::Var(r)) if l == r => Ok(Substitution::empty()),
        (Type::Var(var), ty) | (ty, Type::Var(var)) => bind(var, ty),
        (Type::Con(l), Type::Con(r)) => {
            if l.name() != r.name() {
                Err(UnifyError::ConstructorMismatch {
                    expected: l.clone(),
                    actual: r.clone(),
                })
            } else if l.kind() != r.kind() {
                Err(UnifyError::KindMismatch {
                    lhs: expected.clone(),
                    lhs_kind: l.kind().clone(),
                    rhs: actual.clone(),
                    rhs_kind: r.kind().clone(),
                })
            } else {
                Ok(Substitution::empty())
            }
        }
        (Type::App(l), Type::App(r)) => {
            let s1 = unify(&l.lhs, &r.lhs)?;
            let s2 = unify(&l.rhs.apply(&s1), &r.rhs.apply(&s1))?;
            Ok(s2.compose(&s1))
        }
        _ => Err(UnifyError::Mismatch {
            expected: expected.clone(),
            actual: actual.clone(),
        }),
    }
}

/// Binds `var` to `ty` after the occurs and kind checks.
pub fn bind(var: &TypeVar, ty: &Type) -> Result<Substitution, UnifyError> {
    if ty.as_var() == Some(var) {
        return Ok(Substitution::empty());
    }

    if ty.has_generics() {
        return Err(UnifyError::UnexpectedGen {
            expected: Type::Var(var.clone()),
            actual: ty.clone(),
        });
    }

    if ty.contains(var) {
        return Err(UnifyError::Occurs {
            var: var.clone(),
            ty: ty.clone(),
        });
    }

    let kind = ty.kind()?;
    if &kind != var.kind() {
        return Err(UnifyError::KindMismatch {
            lhs: Type::Var(var.clone()),
            lhs_kind: var.kind().clone(),
            rhs: ty.clone(),
            rhs_kind: kind,
        });
    }

    trace!("BIND: {var} ↦ {ty}");
    Ok(Substitution::singleton(var.clone(), ty.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::KindError, kind::Kind};

    fn a() -> TypeVar {
        TypeVar::star(0)
    }

    fn b() -> TypeVar {
        TypeVar::star(1)
    }

    fn int() -> Type {
        Type::con("Int", Kind::Star)
    }

    #[test]
    fn var_with_con() {
        let s = unify(&Type::Var(a()), &int()).unwrap();

        assert_eq!(s, Substitution::singleton(a(), int()));
        assert_eq!(unify(&int(), &Type::Var(a())).unwrap(), s);
    }

    #[test]
    fn same_var_is_empty() {
        let s = unify(&Type::Var(a()), &Type::Var(a())).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn occurs_check() {
        let ty = Type::app(Type::Var(a()), Type::con("X", Kind::Star));
        let err = unify(&Type::Var(a()), &ty).unwrap_err();

        assert!(matches!(err, UnifyError::Occurs { .. }));
        assert!(!err.is_internal());
    }

    #[test]
    fn distinct_constructors() {
        let err = unify(&int(), &Type::con("Bool", Kind::Star)).unwrap_err();

        assert!(matches!(err, UnifyError::ConstructorMismatch { .. }));
    }

    #[test]
    fn same_name_different_kind() {
        let err = unify(&Type::con("T", Kind::Star), &Type::con("T", Kind::constructor(1)))
            .unwrap_err();

        assert!(matches!(err, UnifyError::KindMismatch { .. }));
    }

    #[test]
    fn binding_checks_kind() {
        let list = Type::con("List", Kind::constructor(1));
        let err = unify(&Type::Var(a()), &list).unwrap_err();

        assert!(matches!(
            err,
            UnifyError::KindMismatch {
                lhs_kind: Kind::Star,
                ..
            }
        ));

        let f = TypeVar::new(2, Kind::constructor(1));
        assert_eq!(
            unify(&Type::Var(f.clone()), &list).unwrap(),
            Substitution::singleton(f, list)
        );
    }

    #[test]
    fn binding_ill_kinded_term() {
        let ty = Type::app(int(), int());
        let err = unify(&Type::Var(a()), &ty).unwrap_err();

        assert!(matches!(
            err,
            UnifyError::IllKinded(KindError::NotAConstructor { .. })
        ));
        assert!(err.is_internal());
    }

    #[test]
    fn generics_never_unify() {
        let err = unify(&Type::Gen(0), &int()).unwrap_err();
        assert!(matches!(err, UnifyError::UnexpectedGen { .. }));
        assert!(err.is_internal());

        let err = unify(&Type::Var(a()), &Type::list(Type::Gen(0))).unwrap_err();
        assert!(matches!(err, UnifyError::UnexpectedGen { .. }));
    }

    #[test]
    fn structural_mismatch() {
        let err = unify(&int(), &Type::list(int())).unwrap_err();
        assert!(matches!(err, UnifyError::Mismatch { .. }));
    }

    #[test]
    fn application_threads_substitution() {
        // a -> a  ~  Int -> b
        let lhs = Type::func(Type::Var(a()), Type::Var(a()));
        let rhs = Type::func(int(), Type::Var(b()));

        let s = unify(&lhs, &rhs).unwrap();

        assert_eq!(s.apply(&Type::Var(a())), int());
        assert_eq!(s.apply(&Type::Var(b())), int());
        assert_eq!(lhs.apply(&s), rhs.apply(&s));
    }

    #[test]
    fn application_detects_shared_conflict() {
        // a -> a  ~  Int -> Bool
        let lhs = Type::func(Type::Var(a()), Type::Var(a()));
        let rhs = Type::func(int(), Type::bool());

        let err = unify(&lhs, &rhs).unwrap_err();
        assert!(matches!(err, UnifyError::ConstructorMismatch { .. }));
    }

    #[test]
    fn unifier_is_most_general() {
        let lhs = Type::list(Type::Var(a()));
        let rhs = Type::list(Type::Var(b()));

        let s = lhs.try_unify(&rhs).unwrap();

        assert_eq!(s.len(), 1);
        assert_eq!(lhs.apply(&s), rhs.apply(&s));
        assert!(lhs.apply(&s).is_app());
    }

    #[test]
    fn higher_kinded_application() {
        let f = TypeVar::new(0, Kind::constructor(1));
        let list = Type::con("List", Kind::constructor(1));
        let lhs = Type::app(Type::Var(f.clone()), Type::Var(b()));
        let rhs = Type::app(list.clone(), int());

        let s = unify(&lhs, &rhs).unwrap();

        assert_eq!(s.get(&f), Some(&list));
        assert_eq!(s.get(&b()), Some(&int()));
        assert_eq!(lhs.apply(&s), rhs);
    }

    #[test]
    fn var_unifiable_with_type() {
        let s = a().try_unify(&Type::list(int())).unwrap();
        assert_eq!(s.get(&a()), Some(&Type::list(int())));
    }
}
