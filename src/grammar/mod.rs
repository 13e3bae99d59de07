//! Productions, items and grammars up to the unrestricted form.

use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use log::debug;
use nom::combinator::all_consuming;

use crate::error::{Error, Result};
use crate::symbol::{Symbol, Word, EPSILON};

pub(crate) mod parser;

/// A rewriting rule `lhs -> rhs` over words.
///
/// The left-hand side holds at least one symbol; the right-hand side may be
/// empty, in which case it renders as `ε`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Production {
    lhs: Word,
    rhs: Word,
}

impl Production {
    pub fn new<L, R>(lhs: L, rhs: R) -> Result<Self>
    where
        L: Into<Word>,
        R: Into<Word>,
    {
        let lhs = lhs.into();
        let rhs = rhs.into();
        if lhs.is_empty() {
            return Err(Error::MalformedProduction(
                "the left-hand side must hold at least one symbol".into(),
            ));
        }
        if lhs.iter().chain(rhs.iter()).any(|s| s.as_str() == EPSILON) {
            return Err(Error::MalformedProduction(
                "the empty marker ε cannot appear next to other symbols".into(),
            ));
        }
        Ok(Self { lhs, rhs })
    }

    pub fn lhs(&self) -> &Word {
        &self.lhs
    }

    pub fn rhs(&self) -> &Word {
        &self.rhs
    }

    /// Starts a predicate over productions; see [`SuchThat`].
    pub fn such_that() -> SuchThat {
        SuchThat::default()
    }

    /// Parses one production per non-blank, non-comment line.
    ///
    /// With `alternatives`, a right-hand side of the form `a | b` expands
    /// into one production per alternative, in textual order; without it,
    /// a `|` anywhere in a line is an error. A right-hand side that is a
    /// lone `ε` denotes the empty word.
    pub fn from_string(text: &str, alternatives: bool) -> Result<Vec<Production>> {
        let mut productions = Vec::new();
        for line in text.lines() {
            if parser::blank(line) {
                continue;
            }
            let (_, parsed) = all_consuming(parser::production)(line).map_err(|_| {
                Error::MalformedProduction(format!("cannot parse line `{}`", line.trim()))
            })?;
            if parsed.alternatives.len() > 1 && !alternatives {
                return Err(Error::MalformedProduction(format!(
                    "alternative syntax is not allowed here: `{}`",
                    line.trim()
                )));
            }
            let lhs = word_from_tokens(&parsed.lhs)?;
            for alternative in &parsed.alternatives {
                let rhs = word_from_tokens(alternative)?;
                productions.push(Production::new(lhs.clone(), rhs)?);
            }
        }
        Ok(productions)
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

impl FromStr for Production {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut productions = Production::from_string(s, false)?;
        let production = productions.pop().ok_or_else(|| {
            Error::MalformedProduction("expected a production, found none".into())
        })?;
        if !productions.is_empty() {
            return Err(Error::MalformedProduction(
                "expected a single production".into(),
            ));
        }
        Ok(production)
    }
}

/// Maps a token list to a word, treating a lone `ε` as the empty word.
fn word_from_tokens(tokens: &[&str]) -> Result<Word> {
    if tokens.len() == 1 && tokens[0] == EPSILON {
        return Ok(Word::empty());
    }
    if tokens.iter().any(|t| *t == EPSILON) {
        return Err(Error::MalformedProduction(
            "the empty marker ε cannot appear next to other symbols".into(),
        ));
    }
    Ok(tokens.iter().map(|t| Symbol::from(*t)).collect())
}

/// Builds a predicate selecting productions by exact or positional
/// constraints on their sides.
///
/// At least one constraint must be supplied before [`SuchThat::build`].
#[derive(Clone, Default, Debug)]
pub struct SuchThat {
    lhs: Option<Word>,
    rhs: Option<Word>,
    lhs_at: Option<(usize, Symbol)>,
    rhs_at: Option<(usize, Symbol)>,
}

impl SuchThat {
    /// Requires the left-hand side to equal `lhs`.
    pub fn lhs<W: Into<Word>>(mut self, lhs: W) -> Self {
        self.lhs = Some(lhs.into());
        self
    }

    /// Requires the right-hand side to equal `rhs`.
    pub fn rhs<W: Into<Word>>(mut self, rhs: W) -> Self {
        self.rhs = Some(rhs.into());
        self
    }

    /// Requires `symbol` at `position` of the left-hand side.
    pub fn lhs_at<S: Into<Symbol>>(mut self, position: usize, symbol: S) -> Self {
        self.lhs_at = Some((position, symbol.into()));
        self
    }

    /// Requires `symbol` at `position` of the right-hand side.
    pub fn rhs_at<S: Into<Symbol>>(mut self, position: usize, symbol: S) -> Self {
        self.rhs_at = Some((position, symbol.into()));
        self
    }

    /// Returns the predicate, failing when no constraint was supplied.
    pub fn build(self) -> Result<impl Fn(&Production) -> bool> {
        if self.lhs.is_none()
            && self.rhs.is_none()
            && self.lhs_at.is_none()
            && self.rhs_at.is_none()
        {
            return Err(Error::InvalidArgument(
                "at least one constraint is required".into(),
            ));
        }
        let SuchThat {
            lhs,
            rhs,
            lhs_at,
            rhs_at,
        } = self;
        Ok(move |p: &Production| {
            lhs.as_ref().map_or(true, |w| p.lhs == *w)
                && rhs.as_ref().map_or(true, |w| p.rhs == *w)
                && lhs_at
                    .as_ref()
                    .map_or(true, |(i, s)| p.lhs.get(*i) == Some(s))
                && rhs_at
                    .as_ref()
                    .map_or(true, |(i, s)| p.rhs.get(*i) == Some(s))
        })
    }
}

/// A production with a dot marking recognition progress through its
/// right-hand side.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Item {
    production: Production,
    dot: usize,
}

impl Item {
    /// Creates an item; the dot must lie within `[0, rhs.len()]`.
    pub fn new(production: Production, dot: usize) -> Result<Self> {
        if dot > production.rhs().len() {
            return Err(Error::InvalidArgument(format!(
                "dot position {} lies past the right-hand side of `{}`",
                dot, production
            )));
        }
        Ok(Self { production, dot })
    }

    pub fn production(&self) -> &Production {
        &self.production
    }

    pub fn dot(&self) -> usize {
        self.dot
    }

    /// The symbol right after the dot, or `None` when the item is reducible.
    pub fn expected(&self) -> Option<&Symbol> {
        self.production.rhs().get(self.dot)
    }

    /// Moves the dot over `symbol`, when that is the expected one.
    pub fn advance(&self, symbol: &Symbol) -> Option<Item> {
        if self.expected() == Some(symbol) {
            Some(Item {
                production: self.production.clone(),
                dot: self.dot + 1,
            })
        } else {
            None
        }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> ", self.production.lhs)?;
        for symbol in &self.production.rhs()[..self.dot] {
            write!(f, "{} ", symbol)?;
        }
        write!(f, "•")?;
        for symbol in &self.production.rhs()[self.dot..] {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// A formal grammar: nonterminals, terminals, an ordered production list
/// and a start symbol.
///
/// The production list is ordered and indexable — derivation steps refer to
/// productions by position, so the order is part of the grammar's identity.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Grammar {
    nonterminals: BTreeSet<Symbol>,
    terminals: BTreeSet<Symbol>,
    productions: Vec<Production>,
    start: Symbol,
}

impl Grammar {
    pub fn new(
        nonterminals: BTreeSet<Symbol>,
        terminals: BTreeSet<Symbol>,
        productions: Vec<Production>,
        start: Symbol,
    ) -> Result<Self> {
        if let Some(shared) = nonterminals.intersection(&terminals).next() {
            return Err(Error::InvalidArgument(format!(
                "`{}` is both a nonterminal and a terminal",
                shared
            )));
        }
        if !nonterminals.contains(&start) {
            return Err(Error::InvalidArgument(format!(
                "the start symbol `{}` is not a nonterminal",
                start
            )));
        }
        for production in &productions {
            for symbol in production.lhs().iter().chain(production.rhs().iter()) {
                if !nonterminals.contains(symbol) && !terminals.contains(symbol) {
                    return Err(Error::InvalidArgument(format!(
                        "`{}` in `{}` is neither a nonterminal nor a terminal",
                        symbol, production
                    )));
                }
            }
            if !production.lhs().iter().any(|s| nonterminals.contains(s)) {
                return Err(Error::InvalidArgument(format!(
                    "the left-hand side of `{}` holds no nonterminal",
                    production
                )));
            }
        }
        Ok(Self {
            nonterminals,
            terminals,
            productions,
            start,
        })
    }

    /// Parses a production block and infers the grammar components.
    ///
    /// With `context_free`, every left-hand side must be a single symbol and
    /// those symbols make up the nonterminals. Without it, any symbol that
    /// occurs in some left-hand side is a nonterminal. Either way the
    /// terminals are the remaining right-hand-side symbols and the start
    /// symbol is the first production's left-hand side, which must be a
    /// single symbol.
    pub fn from_string(text: &str, context_free: bool) -> Result<Self> {
        let productions = Production::from_string(text, true)?;
        let first = productions.first().ok_or_else(|| {
            Error::MalformedGrammar("no productions to infer a grammar from".into())
        })?;
        if context_free {
            if let Some(p) = productions.iter().find(|p| p.lhs().len() != 1) {
                return Err(Error::MalformedGrammar(format!(
                    "`{}` rewrites more than one symbol in a context-free grammar",
                    p
                )));
            }
        }
        if first.lhs().len() != 1 {
            return Err(Error::MalformedGrammar(format!(
                "cannot infer a start symbol from `{}`",
                first
            )));
        }
        let start = first.lhs()[0].clone();
        let nonterminals: BTreeSet<Symbol> = productions
            .iter()
            .flat_map(|p| p.lhs().iter().cloned())
            .collect();
        let terminals: BTreeSet<Symbol> = productions
            .iter()
            .flat_map(|p| p.rhs().iter().cloned())
            .filter(|s| !nonterminals.contains(s))
            .collect();
        debug!(
            "inferred grammar: {} nonterminals, {} terminals, {} productions, start `{}`",
            nonterminals.len(),
            terminals.len(),
            productions.len(),
            start
        );
        Self::new(nonterminals, terminals, productions, start).map_err(|e| match e {
            Error::InvalidArgument(msg) => Error::MalformedGrammar(msg),
            other => other,
        })
    }

    /// Every right-hand side of a production `x -> …`, in production order.
    pub fn alternatives(&self, x: &Symbol) -> Vec<&Word> {
        self.productions
            .iter()
            .filter(|p| p.lhs().len() == 1 && p.lhs()[0] == *x)
            .map(|p| p.rhs())
            .collect()
    }

    /// A new grammar keeping only productions written entirely over
    /// `symbols`, with the nonterminal and terminal sets intersected
    /// accordingly. The receiver is left untouched.
    pub fn restrict_to(&self, symbols: &BTreeSet<Symbol>) -> Result<Grammar> {
        if !symbols.contains(&self.start) {
            return Err(Error::InvalidArgument(format!(
                "the start symbol `{}` cannot be restricted away",
                self.start
            )));
        }
        let productions: Vec<Production> = self
            .productions
            .iter()
            .filter(|p| {
                p.lhs()
                    .iter()
                    .chain(p.rhs().iter())
                    .all(|s| symbols.contains(s))
            })
            .cloned()
            .collect();
        let nonterminals = self.nonterminals.intersection(symbols).cloned().collect();
        let terminals = self.terminals.intersection(symbols).cloned().collect();
        Self::new(nonterminals, terminals, productions, self.start.clone())
    }

    pub fn nonterminals(&self) -> &BTreeSet<Symbol> {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &BTreeSet<Symbol> {
        &self.terminals
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }

    pub fn is_nonterminal(&self, symbol: &Symbol) -> bool {
        self.nonterminals.contains(symbol)
    }

    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminals.contains(symbol)
    }

    /// Whether every production rewrites a single nonterminal.
    pub fn is_context_free(&self) -> bool {
        self.productions.iter().all(|p| p.lhs().len() == 1)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for production in &self.productions {
            writeln!(f, "{}", production)?;
        }
        Ok(())
    }
}
