use std::{
    sync::atomic::{AtomicU64, Ordering},
    vec,
};

use crate::{kind::Kind, types::TypeVar};

/// Source of type variables that were never handed out before.
pub trait VarSupply {
    fn fresh(&mut self, kind: Kind) -> TypeVar;
}

impl<S: VarSupply + ?Sized> VarSupply for &mut S {
    fn fresh(&mut self, kind: Kind) -> TypeVar {
        (**self).fresh(kind)
    }
}

/// Monotonic counter for one inference run.
///
/// Ids are never reused while the generator lives, a new run starts with a new
/// generator. The counter is atomic so a shared reference is enough to draw from it,
/// and 64 bits wide so it cannot wrap within a run.
#[derive(Debug, Default)]
pub struct TypeVarGen {
    next: AtomicU64,
}

impl TypeVarGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(id: u64) -> Self {
        Self {
            next: AtomicU64::new(id),
        }
    }

    pub fn fresh_var(&self, kind: Kind) -> TypeVar {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        TypeVar::new(id, kind)
    }

    /// The id the next variable will get.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl VarSupply for TypeVarGen {
    fn fresh(&mut self, kind: Kind) -> TypeVar {
        self.fresh_var(kind)
    }
}

impl VarSupply for &TypeVarGen {
    fn fresh(&mut self, kind: Kind) -> TypeVar {
        self.fresh_var(kind)
    }
}

/// Hands out a fixed list of variables first, then defers to `fallback`.
///
/// Replayed variables keep their own kind, the requested kind only applies to
/// fallback variables.
#[derive(Debug)]
pub struct Replay<S> {
    vars: vec::IntoIter<TypeVar>,
    fallback: S,
}

impl<S> Replay<S> {
    pub fn new(vars: impl IntoIterator<Item = TypeVar>, fallback: S) -> Self {
        Self {
            vars: vars.into_iter().collect::<Vec<_>>().into_iter(),
            fallback,
        }
    }
}

impl<S: VarSupply> VarSupply for Replay<S> {
    fn fresh(&mut self, kind: Kind) -> TypeVar {
        match self.vars.next() {
            Some(var) => var,
            None => self.fallback.fresh(kind),
        }
    }
}
