use indexmap::IndexSet;
use std::{convert::Infallible, ops::ControlFlow};

mod builtin;
mod con;
mod scheme;
mod ty;
mod var;
mod visit;

pub use builtin::*;
pub use con::*;
pub use scheme::*;
pub use ty::*;
pub use var::*;
pub use visit::*;

/// Queries shared by everything that holds type terms.
pub trait Typed: TypeVisitable {
    /// occurs check
    fn contains(&self, var: &TypeVar) -> bool {
        struct Occured;
        struct OccursChecker<'t>(&'t TypeVar);

        impl TypeVisitor for OccursChecker<'_> {
            type BreakValue = Occured;

            fn visit_var(&mut self, var: &TypeVar) -> ControlFlow<Self::BreakValue> {
                if var == self.0 {
                    ControlFlow::Break(Occured)
                } else {
                    ControlFlow::Continue(())
                }
            }
        }

        let mut checker = OccursChecker(var);
        self.visit_type_by(&mut checker).is_break()
    }

    /// Whether a scheme placeholder is reachable from this term.
    fn has_generics(&self) -> bool {
        struct GenFinder;

        impl TypeVisitor for GenFinder {
            type BreakValue = u32;

            fn visit_gen(&mut self, index: u32) -> ControlFlow<Self::BreakValue> {
                ControlFlow::Break(index)
            }
        }

        self.visit_type_by(&mut GenFinder).is_break()
    }

    /// All type variables in order of their first occurrence.
    fn type_vars(&self) -> IndexSet<TypeVar> {
        let mut vars = IndexSet::new();
        self.extend_type_vars(&mut vars);
        vars
    }

    fn extend_type_vars(&self, vars: &mut IndexSet<TypeVar>) {
        struct VarsFinder<'t>(&'t mut IndexSet<TypeVar>);

        impl TypeVisitor for VarsFinder<'_> {
            type BreakValue = Infallible;

            fn visit_var(&mut self, var: &TypeVar) -> ControlFlow<Self::BreakValue> {
                if !self.0.contains(var) {
                    self.0.insert(var.clone());
                }
                ControlFlow::Continue(())
            }
        }

        let mut finder = VarsFinder(vars);
        match self.visit_type_by(&mut finder) {
            ControlFlow::Continue(()) => (),
            ControlFlow::Break(never) => match never {},
        }
    }
}

impl Typed for Type {}
