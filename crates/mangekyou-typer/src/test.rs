use mangekyou_span::Span;
use mangekyou_tree::{Expr, Function, Item, Prototype, Symbol};

pub fn mocked_span() -> Span {
    Span::new(0, 0)
}

pub fn num(value: f64) -> Expr {
    Expr::num(value, mocked_span())
}

pub fn bool(value: bool) -> Expr {
    Expr::bool(value, mocked_span())
}

pub fn var(name: &str) -> Expr {
    Expr::var(name, mocked_span())
}

pub fn call(callee: &str, args: Vec<Expr>) -> Expr {
    Expr::call(callee, args, mocked_span())
}

pub fn binary(op: char, lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(op, lhs, rhs, mocked_span())
}

pub fn let_(name: &str, value: Expr, body: Expr) -> Expr {
    Expr::let_(name, value, body, mocked_span())
}

pub fn if_(predicate: Expr, then: Expr, or: Expr) -> Expr {
    Expr::if_(predicate, then, or, mocked_span())
}

fn params(names: &[&str]) -> Vec<Symbol> {
    names.iter().copied().map(Symbol::from).collect()
}

pub fn func(name: &str, names: &[&str], body: Expr) -> Item {
    let proto = Prototype::new(name, params(names), mocked_span());
    Item::Function(Function::new(proto, body, mocked_span()))
}

pub fn extern_(name: &str, names: &[&str]) -> Item {
    Item::Extern(Prototype::new(name, params(names), mocked_span()))
}

pub fn top_level(body: Expr) -> Item {
    Item::TopLevel(Function::top_level(body))
}
