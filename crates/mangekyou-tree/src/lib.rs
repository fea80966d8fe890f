//! The expression tree handed to the type checker by the parser.
//!
//! Nodes carry no type information, only the [`Span`] they were parsed from.

mod expr;
mod item;

pub use expr::*;
pub use item::*;

pub use mangekyou_span::Span;

pub type Symbol = ecow::EcoString;
