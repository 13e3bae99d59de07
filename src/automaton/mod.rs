//! Finite automata and their transitions.

use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use log::debug;
use nom::combinator::all_consuming;

use crate::error::{Error, Result};
use crate::grammar::{parser as grammar_parser, Grammar};
use crate::symbol::{Symbol, EPSILON};

mod parser;

/// The dedicated sink state used when deriving an automaton from a regular
/// grammar.
pub const SINK: &str = "◇";

/// A transition label: one input symbol, or none at all.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Label {
    Epsilon,
    Symbol(Symbol),
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "{}", EPSILON),
            Label::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

impl From<&str> for Label {
    /// `ε` maps to [`Label::Epsilon`], anything else to a symbol label.
    fn from(s: &str) -> Self {
        if s == EPSILON {
            Label::Epsilon
        } else {
            Label::Symbol(Symbol::from(s))
        }
    }
}

impl From<Symbol> for Label {
    fn from(symbol: Symbol) -> Self {
        Label::Symbol(symbol)
    }
}

/// A labeled edge between two automaton states.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Transition {
    frm: Symbol,
    label: Label,
    to: Symbol,
}

impl Transition {
    pub fn new<F, L, T>(frm: F, label: L, to: T) -> Self
    where
        F: Into<Symbol>,
        L: Into<Label>,
        T: Into<Symbol>,
    {
        Self {
            frm: frm.into(),
            label: label.into(),
            to: to.into(),
        }
    }

    pub fn frm(&self) -> &Symbol {
        &self.frm
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn to(&self) -> &Symbol {
        &self.to
    }

    /// Parses one transition per non-blank, non-comment line, in the form
    /// `<from> <label> -> <to>`. The label `ε` denotes an unlabeled edge.
    pub fn from_string(text: &str) -> Result<Vec<Transition>> {
        let mut transitions = Vec::new();
        for line in text.lines() {
            if grammar_parser::blank(line) {
                continue;
            }
            let (_, parsed) = all_consuming(parser::transition)(line).map_err(|_| {
                Error::MalformedTransition(format!("cannot parse line `{}`", line.trim()))
            })?;
            transitions.push(Transition::new(
                parsed.frm,
                Label::from(parsed.label),
                parsed.to,
            ));
        }
        Ok(transitions)
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} -> {}", self.frm, self.label, self.to)
    }
}

impl FromStr for Transition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut transitions = Transition::from_string(s)?;
        let transition = transitions.pop().ok_or_else(|| {
            Error::MalformedTransition("expected a transition, found none".into())
        })?;
        if !transitions.is_empty() {
            return Err(Error::MalformedTransition(
                "expected a single transition".into(),
            ));
        }
        Ok(transition)
    }
}

/// A nondeterministic finite automaton.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Automaton {
    states: BTreeSet<Symbol>,
    transitions: BTreeSet<Transition>,
    initial: Symbol,
    accepting: BTreeSet<Symbol>,
}

impl Automaton {
    pub fn new(
        states: BTreeSet<Symbol>,
        transitions: BTreeSet<Transition>,
        initial: Symbol,
        accepting: BTreeSet<Symbol>,
    ) -> Result<Self> {
        if !states.contains(&initial) {
            return Err(Error::InvalidArgument(format!(
                "the initial state `{}` is not a state",
                initial
            )));
        }
        if let Some(state) = accepting.difference(&states).next() {
            return Err(Error::InvalidArgument(format!(
                "the accepting state `{}` is not a state",
                state
            )));
        }
        for transition in &transitions {
            if !states.contains(&transition.frm) || !states.contains(&transition.to) {
                return Err(Error::InvalidArgument(format!(
                    "`{}` joins states outside the automaton",
                    transition
                )));
            }
        }
        Ok(Self {
            states,
            transitions,
            initial,
            accepting,
        })
    }

    /// Builds an automaton from a block of transition lines.
    ///
    /// The states are the transition endpoints and the initial state
    /// defaults to the `from` endpoint of the first transition. Accepting
    /// states cannot be inferred from transitions and must be supplied.
    pub fn from_string<I, S>(text: &str, accepting: I, initial: Option<Symbol>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let transitions = Transition::from_string(text)?;
        let first = transitions.first().ok_or_else(|| {
            Error::MalformedTransition("no transitions to build an automaton from".into())
        })?;
        let initial = initial.unwrap_or_else(|| first.frm.clone());
        let states: BTreeSet<Symbol> = transitions
            .iter()
            .flat_map(|t| vec![t.frm.clone(), t.to.clone()])
            .collect();
        let accepting: BTreeSet<Symbol> = accepting.into_iter().map(Into::into).collect();
        Self::new(states, transitions.into_iter().collect(), initial, accepting)
    }

    /// Derives the automaton of a regular grammar.
    ///
    /// Every nonterminal becomes a state; a production `A -> a B` becomes
    /// the transition `A a -> B`, a production `A -> a` routes to the
    /// accepting sink `◇`, and a production `A -> ε` marks `A` itself
    /// accepting. The initial state is the grammar's start symbol.
    pub fn from_grammar(grammar: &Grammar) -> Result<Self> {
        let sink = Symbol::from(SINK);
        if grammar.is_nonterminal(&sink) || grammar.is_terminal(&sink) {
            return Err(Error::InvalidArgument(format!(
                "the sink marker `{}` already occurs in the grammar",
                sink
            )));
        }
        let mut transitions = BTreeSet::new();
        let mut accepting = BTreeSet::new();
        accepting.insert(sink.clone());
        for production in grammar.productions() {
            let lhs = production.lhs();
            if lhs.len() != 1 || !grammar.is_nonterminal(&lhs[0]) {
                return Err(Error::InvalidArgument(format!(
                    "`{}` does not rewrite a single nonterminal",
                    production
                )));
            }
            let state = lhs[0].clone();
            let rhs = production.rhs();
            match rhs.len() {
                0 => {
                    accepting.insert(state);
                }
                1 if grammar.is_terminal(&rhs[0]) => {
                    transitions.insert(Transition::new(state, rhs[0].clone(), sink.clone()));
                }
                2 if grammar.is_terminal(&rhs[0]) && grammar.is_nonterminal(&rhs[1]) => {
                    transitions.insert(Transition::new(state, rhs[0].clone(), rhs[1].clone()));
                }
                _ => {
                    return Err(Error::InvalidArgument(format!(
                        "`{}` is not a regular production",
                        production
                    )));
                }
            }
        }
        let mut states: BTreeSet<Symbol> = grammar.nonterminals().iter().cloned().collect();
        states.insert(sink);
        debug!(
            "derived automaton: {} states, {} transitions, {} accepting",
            states.len(),
            transitions.len(),
            accepting.len()
        );
        Self::new(states, transitions, grammar.start().clone(), accepting)
    }

    /// The transition function δ: the set of states reachable from `state`
    /// by consuming exactly `label`.
    pub fn delta(&self, state: &Symbol, label: &Label) -> BTreeSet<Symbol> {
        self.transitions
            .iter()
            .filter(|t| t.frm == *state && t.label == *label)
            .map(|t| t.to.clone())
            .collect()
    }

    /// The input alphabet: every non-epsilon label in use.
    pub fn alphabet(&self) -> BTreeSet<&Symbol> {
        self.transitions
            .iter()
            .filter_map(|t| match &t.label {
                Label::Symbol(symbol) => Some(symbol),
                Label::Epsilon => None,
            })
            .collect()
    }

    pub fn states(&self) -> &BTreeSet<Symbol> {
        &self.states
    }

    pub fn transitions(&self) -> &BTreeSet<Transition> {
        &self.transitions
    }

    pub fn initial(&self) -> &Symbol {
        &self.initial
    }

    pub fn accepting(&self) -> &BTreeSet<Symbol> {
        &self.accepting
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for transition in &self.transitions {
            writeln!(f, "{}", transition)?;
        }
        Ok(())
    }
}
