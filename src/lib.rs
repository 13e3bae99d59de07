//! Formal grammars, symbolic derivations and finite automata.
//!
//! `glot` models grammars up to the unrestricted form: a [`Production`]
//! rewrites one word into another (multi-symbol left-hand sides included),
//! a [`Grammar`] bundles an ordered production list with the symbol
//! classification inferred from it, a [`Derivation`] applies productions to
//! the start symbol one validated step at a time, and an [`Automaton`] is
//! either written down as transitions or derived from a regular grammar.
//!
//! Productions and transitions have a line-oriented textual form that
//! round-trips through [`Display`](std::fmt::Display) and parsing. All
//! types are immutable values: stepping a derivation or restricting a
//! grammar returns a new value and never touches the receiver.

pub mod automaton;
pub mod derivation;
pub mod error;
pub mod grammar;
pub mod symbol;

pub use crate::automaton::{Automaton, Label, Transition, SINK};
pub use crate::derivation::{Derivation, Step};
pub use crate::error::{Error, Result};
pub use crate::grammar::{Grammar, Item, Production, SuchThat};
pub use crate::symbol::{Symbol, Word, EPSILON};
