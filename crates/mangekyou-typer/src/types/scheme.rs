use indexmap::IndexSet;
use log::debug;
use serde::Serialize;
use std::{convert::Infallible, fmt, ops::ControlFlow};

use super::{Type, TypeVar, TypeVisitable, TypeVisitor, Typed, gen_name};
use crate::{
    error::KindError,
    kind::Kind,
    substitute::{Substitutable, Substitution},
    supply::VarSupply,
};

/// Type scheme
/// Types that quantify zero or more variables (e.g. `forall a. a -> a`).
///
/// The body refers to the quantified variables as `Gen(i)`,
/// whose kind is `kinds[i]`. Indices are dense and start at zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Scheme {
    kinds: Vec<Kind>,
    ty: Type,
}

impl Scheme {
    /// Quantifies `Gen(i)` in `ty` with kind `kinds[i]`.
    ///
    /// Every index of `kinds` must occur in `ty` and no other index may.
    pub fn new(kinds: Vec<Kind>, ty: Type) -> Result<Self, KindError> {
        let used = ty.gens();

        if let Some(&index) = used.iter().find(|&&index| index as usize >= kinds.len()) {
            return Err(KindError::UnboundGen(index));
        }
        if let Some(index) = (0..kinds.len() as u32).find(|index| !used.contains(index)) {
            return Err(KindError::UnusedGen(index));
        }

        Ok(Self { kinds, ty })
    }

    /// A scheme quantifying nothing.
    pub fn mono(ty: Type) -> Self {
        Self {
            kinds: Vec::new(),
            ty,
        }
    }

    /// `forall a. a`, unifies with everything once instantiated.
    pub fn any() -> Self {
        Self {
            kinds: vec![Kind::Star],
            ty: Type::Gen(0),
        }
    }

    pub fn is_mono(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Kinds of the quantified variables, `kinds()[i]` belongs to `Gen(i)`.
    pub fn kinds(&self) -> &[Kind] {
        &self.kinds
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Quantifies every variable of `ty` which is not in `bound`.
    ///
    /// Variables are numbered in order of their first occurrence in `ty`.
    pub fn generalize(bound: &IndexSet<TypeVar>, ty: &Type) -> Self {
        let mut vars = ty.type_vars();
        vars.retain(|var| !bound.contains(var));

        let kinds = vars.iter().map(|var| var.kind().clone()).collect();
        let s: Substitution = vars
            .into_iter()
            .enumerate()
            .map(|(index, var)| (var, Type::Gen(index as u32)))
            .collect();

        let scheme = Self {
            kinds,
            ty: ty.apply(&s),
        };

        debug!("GENERALIZE: {ty} as {scheme}");
        scheme
    }

    /// The procedure inst(σ) specializes the scheme σ by copying the term
    /// and replacing the quantified variables consistently by new type variables.
    pub fn instantiate(&self, mut supply: impl VarSupply) -> Type {
        if self.is_mono() {
            return self.ty.clone();
        }

        let fresh = self
            .kinds
            .iter()
            .map(|kind| Type::Var(supply.fresh(kind.clone())))
            .collect::<Vec<_>>();

        let ty = self.ty.instantiate_with(&fresh);

        debug!("INSTANTIATE: {self} as {ty}");
        ty
    }

    /// Kind of the body, which must be `*` for the type of a value.
    pub fn kind(&self) -> Result<Kind, KindError> {
        self.ty.kind_in(&self.kinds)
    }

    /// Variables of the body that are not quantified.
    pub fn free_vars(&self) -> IndexSet<TypeVar> {
        self.type_vars()
    }
}

impl Type {
    /// Scheme placeholders of this term.
    fn gens(&self) -> IndexSet<u32> {
        struct GenCollector(IndexSet<u32>);

        impl TypeVisitor for GenCollector {
            type BreakValue = Infallible;

            fn visit_gen(&mut self, index: u32) -> ControlFlow<Self::BreakValue> {
                self.0.insert(index);
                ControlFlow::Continue(())
            }
        }

        let mut collector = GenCollector(IndexSet::new());
        match self.visit_type_by(&mut collector) {
            ControlFlow::Continue(()) => collector.0,
            ControlFlow::Break(never) => match never {},
        }
    }
}

impl TypeVisitable for Scheme {
    fn visit_type_by<V>(&self, visitor: &mut V) -> ControlFlow<V::BreakValue>
    where
        V: TypeVisitor,
    {
        visitor.visit_type(&self.ty)
    }
}

impl Typed for Scheme {}

impl Substitutable for Scheme {
    fn try_apply(&self, s: &Substitution) -> Option<Self> {
        self.ty.try_apply(s).map(|ty| Self {
            kinds: self.kinds.clone(),
            ty,
        })
    }
}

impl From<Type> for Scheme {
    fn from(ty: Type) -> Self {
        Self::mono(ty)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { kinds, ty } = self;

        if !kinds.is_empty() {
            write!(f, "forall")?;

            for (index, kind) in kinds.iter().enumerate() {
                let name = gen_name(index as u32);
                if kind.is_star() {
                    write!(f, " {name}")?;
                } else {
                    write!(f, " ({name} : {kind})")?;
                }
            }

            write!(f, ". ")?;
        }

        fmt::Display::fmt(ty, f)
    }
}
