use serde::{Deserialize, Serialize};

use crate::{Expr, Span, Symbol};

/// `name(params..)`, shared by function definitions and extern declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prototype {
    pub name: Symbol,
    pub params: Vec<Symbol>,
    pub span: Span,
}

impl Prototype {
    /// Name given to the prototype wrapping an anonymous top level expression.
    pub const TOP_LEVEL: &'static str = "__auto__tle_";

    pub fn new(name: impl Into<Symbol>, params: Vec<Symbol>, span: Span) -> Self {
        Self {
            name: name.into(),
            params,
            span,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.name.as_str() == Self::TOP_LEVEL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub proto: Prototype,
    pub body: Expr,
    pub span: Span,
}

impl Function {
    pub fn new(proto: Prototype, body: Expr, span: Span) -> Self {
        Self { proto, body, span }
    }

    /// Wraps a top level expression into a parameterless anonymous function.
    pub fn top_level(body: Expr) -> Self {
        let span = body.span();
        Self {
            proto: Prototype::new(Prototype::TOP_LEVEL, Vec::new(), span),
            body,
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    Function(Function),
    Extern(Prototype),
    TopLevel(Function),
}

impl Item {
    pub fn span(&self) -> Span {
        match self {
            Self::Function(f) | Self::TopLevel(f) => f.span,
            Self::Extern(p) => p.span,
        }
    }

    pub fn name(&self) -> &Symbol {
        match self {
            Self::Function(f) | Self::TopLevel(f) => &f.proto.name,
            Self::Extern(p) => &p.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_wraps_expression() {
        let func = Function::top_level(Expr::num(4.0, Span::new(3, 4)));

        assert!(func.proto.is_top_level());
        assert!(func.proto.params.is_empty());
        assert_eq!(func.span, Span::new(3, 4));
    }

    #[test]
    fn program_from_json() {
        let program = Program::new(vec![
            Item::Extern(Prototype::new("sin", vec!["x".into()], Span::new(0, 13))),
            Item::Function(Function::new(
                Prototype::new("id", vec!["x".into()], Span::new(14, 19)),
                Expr::var("x", Span::new(20, 21)),
                Span::new(14, 21),
            )),
        ]);

        let json = program.to_json().unwrap();
        let parsed = Program::from_json(&json).unwrap();

        assert_eq!(parsed, program);
        assert_eq!(parsed.items[1].name().as_str(), "id");
    }
}
