use ecow::EcoString;
use indexmap::{IndexMap, IndexSet};
use mangekyou_tree::Symbol;
use std::fmt;

use crate::{
    error::TypeError,
    kind::Kind,
    substitute::{Substitutable, Substitution},
    types::{Scheme, Type, TypeCon, TypeVar, Typed, builtins},
};

pub trait BoundVars {
    /// Extends the given set with the type variables that are bound in this type.
    fn extend_bound_vars(&self, vars: &mut IndexSet<TypeVar>);

    /// Returns the type variables that are bound in this type.
    fn bound_vars(&self) -> IndexSet<TypeVar> {
        let mut vars = IndexSet::new();
        self.extend_bound_vars(&mut vars);
        vars
    }
}

impl BoundVars for Scheme {
    fn extend_bound_vars(&self, vars: &mut IndexSet<TypeVar>) {
        self.extend_type_vars(vars);
    }
}

/// Value names in scope and their schemes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnv {
    values: IndexMap<Symbol, Scheme>,
}

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing an earlier binding of the same name.
    pub fn insert(&mut self, name: impl Into<Symbol>, scheme: Scheme) -> Option<Scheme> {
        self.values.insert(name.into(), scheme)
    }

    pub fn get(&self, name: &str) -> Option<&Scheme> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// A copy of this environment where `name` is bound to `scheme`.
    pub fn with(&self, name: impl Into<Symbol>, scheme: Scheme) -> Self {
        let mut env = self.clone();
        env.insert(name, scheme);
        env
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Scheme)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl BoundVars for TypeEnv {
    fn extend_bound_vars(&self, vars: &mut IndexSet<TypeVar>) {
        for scheme in self.values.values() {
            scheme.extend_bound_vars(vars);
        }
    }
}

impl Substitutable for TypeEnv {
    fn try_apply(&self, s: &Substitution) -> Option<Self> {
        let mut result: Option<Self> = None;

        for (name, scheme) in &self.values {
            if let Some(next) = scheme.try_apply(s) {
                result
                    .get_or_insert_with(|| self.clone())
                    .values
                    .insert(name.clone(), next);
            }
        }

        result
    }
}

impl fmt::Display for TypeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, scheme) in &self.values {
            writeln!(f, "{name} : {scheme}")?;
        }

        Ok(())
    }
}

/// Known type constructors and their kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConEnv {
    cons: IndexMap<EcoString, Kind>,
}

impl TypeConEnv {
    /// Environment holding the builtin constructors.
    pub fn builtin() -> Self {
        let cons = builtins()
            .into_iter()
            .map(|con| (con.name().clone(), con.kind().clone()))
            .collect();

        Self { cons }
    }

    pub fn insert(&mut self, name: impl Into<EcoString>, kind: Kind) -> Option<Kind> {
        self.cons.insert(name.into(), kind)
    }

    pub fn get(&self, name: &str) -> Option<&Kind> {
        self.cons.get(name)
    }

    pub fn lookup(&self, name: &str) -> Result<Type, TypeError> {
        self.get(name)
            .map(|kind| Type::Con(TypeCon::new(name, kind.clone())))
            .ok_or_else(|| TypeError::UnknownConstructor(name.into()))
    }

    /// Looks up a constructor that can be the type of a value.
    pub fn lookup_star(&self, name: &str) -> Result<Type, TypeError> {
        match self.get(name) {
            Some(kind) if kind.is_star() => Ok(Type::Con(TypeCon::new(name, Kind::Star))),
            Some(kind) => Err(TypeError::ExpectedStar {
                name: name.into(),
                kind: kind.clone(),
            }),
            None => Err(TypeError::UnknownConstructor(name.into())),
        }
    }
}

impl Default for TypeConEnv {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_vars_of_all_schemes() {
        let a = TypeVar::star(0);
        let b = TypeVar::star(1);
        let mut env = TypeEnv::new();
        env.insert("x", Scheme::mono(Type::Var(a.clone())));
        env.insert(
            "f",
            Scheme::new(
                vec![Kind::Star],
                Type::func(Type::Gen(0), Type::Var(b.clone())),
            )
            .unwrap(),
        );

        let vars: Vec<_> = env.bound_vars().into_iter().collect();
        assert_eq!(vars, vec![a, b]);
    }

    #[test]
    fn with_shadows_without_touching_original() {
        let mut env = TypeEnv::new();
        env.insert("x", Scheme::mono(Type::num()));

        let inner = env.with("x", Scheme::mono(Type::bool()));

        assert_eq!(env.get("x"), Some(&Scheme::mono(Type::num())));
        assert_eq!(inner.get("x"), Some(&Scheme::mono(Type::bool())));
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn substitution_reaches_every_scheme() {
        let a = TypeVar::star(0);
        let mut env = TypeEnv::new();
        env.insert("x", Scheme::mono(Type::Var(a.clone())));
        env.insert("y", Scheme::mono(Type::num()));

        let s = Substitution::singleton(a, Type::bool());
        let applied = env.apply(&s);

        assert_eq!(applied.get("x"), Some(&Scheme::mono(Type::bool())));
        assert_eq!(applied.get("y"), Some(&Scheme::mono(Type::num())));
        assert!(applied.bound_vars().is_empty());
    }

    #[test]
    fn display_in_insertion_order() {
        let mut env = TypeEnv::new();
        env.insert("b", Scheme::mono(Type::num()));
        env.insert("a", Scheme::any());

        assert_eq!(env.to_string(), "b : Num\na : forall a. a\n");
    }

    #[test]
    fn constructor_lookup() {
        let cons = TypeConEnv::builtin();

        assert_eq!(cons.lookup("Num"), Ok(Type::num()));
        assert_eq!(cons.lookup_star("Bool"), Ok(Type::bool()));
        assert!(matches!(
            cons.lookup("Str"),
            Err(TypeError::UnknownConstructor(name)) if name.as_str() == "Str"
        ));
        assert!(matches!(
            cons.lookup_star("List"),
            Err(TypeError::ExpectedStar { .. })
        ));
    }
}
