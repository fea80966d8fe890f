use super::{Type, TypeCon};
use crate::kind::Kind;

pub const ARROW: &str = "->";
pub const NUM: &str = "Num";
pub const BOOL: &str = "Bool";
pub const UNIT: &str = "Unit";
pub const LIST: &str = "List";

/// Constructors every program starts with.
pub fn builtins() -> [TypeCon; 5] {
    [
        TypeCon::new(NUM, Kind::Star),
        TypeCon::new(BOOL, Kind::Star),
        TypeCon::new(UNIT, Kind::Star),
        TypeCon::new(LIST, Kind::constructor(1)),
        TypeCon::arrow(),
    ]
}

impl TypeCon {
    pub fn arrow() -> Self {
        Self::new(ARROW, Kind::constructor(2))
    }

    pub fn is_arrow(&self) -> bool {
        self.name().as_str() == ARROW
    }
}

impl Type {
    pub fn num() -> Self {
        Self::con(NUM, Kind::Star)
    }

    pub fn bool() -> Self {
        Self::con(BOOL, Kind::Star)
    }

    pub fn unit() -> Self {
        Self::con(UNIT, Kind::Star)
    }

    pub fn arrow() -> Self {
        Self::Con(TypeCon::arrow())
    }

    pub fn list(el: Self) -> Self {
        Self::app(Self::con(LIST, Kind::constructor(1)), el)
    }

    /// `input -> output`, i.e. `(->) input output`.
    pub fn func(input: Self, output: Self) -> Self {
        Self::app(Self::app(Self::arrow(), input), output)
    }

    /// Curried function type `p1 -> .. -> pn -> output`.
    /// Without parameters the function takes `Unit`.
    pub fn func_n(params: Vec<Self>, output: Self) -> Self {
        if params.is_empty() {
            return Self::func(Self::unit(), output);
        }

        params
            .into_iter()
            .rev()
            .fold(output, |output, input| Self::func(input, output))
    }

    /// Splits a saturated function type into its input and output.
    pub fn as_func(&self) -> Option<(&Type, &Type)> {
        let outer = self.as_app()?;
        let inner = outer.lhs.as_app()?;

        match inner.lhs.as_con() {
            Some(con) if con.is_arrow() => Some((&inner.rhs, &outer.rhs)),
            _ => None,
        }
    }

    pub fn is_func(&self) -> bool {
        self.as_func().is_some()
    }
}
