use indexmap::IndexMap;
use owo_colors::OwoColorize;
use std::fmt;

use crate::types::{Type, TypeVar};

/// Mapping from type variables to the types they stand for.
///
/// Applying a substitution replaces every bound variable once, the replacement
/// is not substituted again. Tables handed to [`Substitution::from_iter`] may
/// chain (`'t0 ↦ 't1`, `'t1 ↦ Num`), such chains are resolved while the
/// substitution is built so each variable points at its final type. A variable
/// is never bound to itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    table: IndexMap<TypeVar, Type>,
}

impl Substitution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        let mut table = IndexMap::with_capacity(1);
        if !is_identity(&var, &ty) {
            table.insert(var, ty);
        }
        Self { table }
    }

    pub fn get(&self, var: &TypeVar) -> Option<&Type> {
        self.table.get(var)
    }

    pub fn contains(&self, var: &TypeVar) -> bool {
        self.table.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeVar, &Type)> {
        self.table.iter()
    }

    /// `self ∘ inner`: applying the result is the same as applying `inner`
    /// first and `self` afterwards.
    pub fn compose(&self, inner: &Self) -> Self {
        if inner.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return inner.clone();
        }

        let mut table = IndexMap::with_capacity(inner.len() + self.len());

        for (var, ty) in &inner.table {
            let ty = ty.apply(self);
            if !is_identity(var, &ty) {
                table.insert(var.clone(), ty);
            }
        }

        // `inner` decides for its whole domain, even where it collapsed to identity.
        for (var, ty) in &self.table {
            if !inner.contains(var) {
                table.insert(var.clone(), ty.clone());
            }
        }

        Self { table }
    }

    pub fn apply<T: Substitutable>(&self, t: &T) -> T {
        t.apply(self)
    }
}

fn is_identity(var: &TypeVar, ty: &Type) -> bool {
    ty.as_var() == Some(var)
}

/// Follows the bindings of `table` through `ty`.
/// Variables already on the path stay as they are, so cyclic tables terminate.
fn resolve(ty: &Type, table: &IndexMap<TypeVar, Type>, path: &mut Vec<TypeVar>) -> Type {
    match ty {
        Type::Var(var) if path.contains(var) => ty.clone(),
        Type::Var(var) => match table.get(var) {
            Some(next) => {
                path.push(var.clone());
                let resolved = resolve(next, table, path);
                path.pop();
                resolved
            }
            None => ty.clone(),
        },
        Type::Con(_) | Type::Gen(_) => ty.clone(),
        Type::App(app) => Type::app(
            resolve(&app.lhs, table, path),
            resolve(&app.rhs, table, path),
        ),
    }
}

impl FromIterator<(TypeVar, Type)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (TypeVar, Type)>>(iter: I) -> Self {
        let raw = iter.into_iter().collect::<IndexMap<_, _>>();
        let mut path = Vec::new();

        let table = raw
            .keys()
            .filter_map(|var| {
                let ty = resolve(&Type::Var(var.clone()), &raw, &mut path);
                (!is_identity(var, &ty)).then(|| (var.clone(), ty))
            })
            .collect();

        Self { table }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (var, ty) in &self.table {
            writeln!(f, "{var}\t↦\t{}", ty.green())?;
        }

        Ok(())
    }
}

/// A type is `Substitutable` if a substitution can be applied to it.
pub trait Substitutable: Sized + Clone {
    /// Apply a substitution without mutation.
    /// Returns `None` if there was nothing to apply,
    /// which lets callers keep sharing the original.
    fn try_apply(&self, s: &Substitution) -> Option<Self>;

    fn apply(&self, s: &Substitution) -> Self {
        self.try_apply(s).unwrap_or_else(|| self.clone())
    }
}

impl<T> Substitutable for Vec<T>
where
    T: Substitutable,
{
    fn try_apply(&self, s: &Substitution) -> Option<Self> {
        let mut result = None;

        for (i, item) in self.iter().enumerate() {
            if let Some(next) = item.try_apply(s) {
                result.get_or_insert_with(|| self.clone())[i] = next;
            }
        }

        result
    }
}

/// Combines two optional rewrites of a pair, `None` if neither side changed.
pub(crate) fn merge<A, B, DA, DB>(
    a: Option<A>,
    default_a: DA,
    b: Option<B>,
    default_b: DB,
) -> Option<(A, B)>
where
    DA: FnOnce() -> A,
    DB: FnOnce() -> B,
{
    match (a, b) {
        (Some(a), Some(b)) => Some((a, b)),
        (Some(a), None) => Some((a, default_b())),
        (None, Some(b)) => Some((default_a(), b)),
        (None, None) => None,
    }
}
