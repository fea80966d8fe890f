use std::ops::ControlFlow;

use super::{Type, TypeApp, TypeCon, TypeVar};

/// Read-only traversal over type terms.
///
/// Every method defaults to the matching `walk_*` function, so implementors
/// only override the nodes they care about.
pub trait TypeVisitor: Sized {
    type BreakValue;

    fn visit_type(&mut self, ty: &Type) -> ControlFlow<Self::BreakValue> {
        walk_type(self, ty)
    }

    fn visit_var(&mut self, _var: &TypeVar) -> ControlFlow<Self::BreakValue> {
        ControlFlow::Continue(())
    }

    fn visit_con(&mut self, _con: &TypeCon) -> ControlFlow<Self::BreakValue> {
        ControlFlow::Continue(())
    }

    fn visit_app(&mut self, app: &TypeApp) -> ControlFlow<Self::BreakValue> {
        walk_app(self, app)
    }

    fn visit_gen(&mut self, _index: u32) -> ControlFlow<Self::BreakValue> {
        ControlFlow::Continue(())
    }
}

pub trait TypeVisitable {
    fn visit_type_by<V>(&self, visitor: &mut V) -> ControlFlow<V::BreakValue>
    where
        V: TypeVisitor;
}

impl TypeVisitable for Type {
    fn visit_type_by<V>(&self, visitor: &mut V) -> ControlFlow<V::BreakValue>
    where
        V: TypeVisitor,
    {
        visitor.visit_type(self)
    }
}

pub fn walk_type<V>(visitor: &mut V, ty: &Type) -> ControlFlow<V::BreakValue>
where
    V: TypeVisitor,
{
    match ty {
        Type::Var(var) => visitor.visit_var(var),
        Type::Con(con) => visitor.visit_con(con),
        Type::App(app) => visitor.visit_app(app),
        Type::Gen(index) => visitor.visit_gen(*index),
    }
}

pub fn walk_app<V>(visitor: &mut V, app: &TypeApp) -> ControlFlow<V::BreakValue>
where
    V: TypeVisitor,
{
    visitor.visit_type(&app.lhs)?;
    visitor.visit_type(&app.rhs)?;
    ControlFlow::Continue(())
}
