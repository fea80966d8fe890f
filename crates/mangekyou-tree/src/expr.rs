use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::{Span, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct NumExpr {
    pub value: f64,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoolExpr {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarExpr {
    pub name: Symbol,
    pub span: Span,
}

/// `callee(args..)`, functions are called by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Symbol,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: char,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub span: Span,
}

/// `let name = value in body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetExpr {
    pub name: Symbol,
    pub value: Box<Expr>,
    pub body: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfExpr {
    pub predicate: Box<Expr>,
    pub then: Box<Expr>,
    pub or: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, From, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Num(NumExpr),
    Bool(BoolExpr),
    Var(VarExpr),
    Call(CallExpr),
    Binary(BinaryExpr),
    Let(LetExpr),
    If(IfExpr),
}

impl Expr {
    pub fn num(value: f64, span: Span) -> Self {
        Self::Num(NumExpr { value, span })
    }

    pub fn bool(value: bool, span: Span) -> Self {
        Self::Bool(BoolExpr { value, span })
    }

    pub fn var(name: impl Into<Symbol>, span: Span) -> Self {
        Self::Var(VarExpr {
            name: name.into(),
            span,
        })
    }

    pub fn call(callee: impl Into<Symbol>, args: Vec<Expr>, span: Span) -> Self {
        Self::Call(CallExpr {
            callee: callee.into(),
            args,
            span,
        })
    }

    pub fn binary(op: char, lhs: Expr, rhs: Expr, span: Span) -> Self {
        Self::Binary(BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        })
    }

    pub fn let_(name: impl Into<Symbol>, value: Expr, body: Expr, span: Span) -> Self {
        Self::Let(LetExpr {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
            span,
        })
    }

    pub fn if_(predicate: Expr, then: Expr, or: Expr, span: Span) -> Self {
        Self::If(IfExpr {
            predicate: Box::new(predicate),
            then: Box::new(then),
            or: Box::new(or),
            span,
        })
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Num(e) => e.span,
            Self::Bool(e) => e.span,
            Self::Var(e) => e.span,
            Self::Call(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Let(e) => e.span,
            Self::If(e) => e.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_of_nested() {
        let lhs = Expr::num(1.0, Span::new(0, 1));
        let rhs = Expr::var("x", Span::new(4, 5));
        let expr = Expr::binary('+', lhs, rhs, Span::new(0, 5));

        assert_eq!(expr.span(), Span::new(0, 5));

        let Expr::Binary(BinaryExpr { lhs, .. }) = expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(lhs.span(), Span::new(0, 1));
    }
}
