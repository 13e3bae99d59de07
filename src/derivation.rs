//! Rewriting steps over a grammar's start symbol.

use std::fmt::{self, Display};
use std::sync::Arc;

use log::trace;

use crate::error::{Error, Result};
use crate::grammar::{Grammar, Production};
use crate::symbol::{Symbol, Word};

/// One rewriting step: which production was applied, and where in the
/// sentential form its left-hand side matched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Step {
    pub production: usize,
    pub position: usize,
}

/// An immutable, append-only sequence of rewriting steps applied to a
/// grammar's start symbol.
///
/// Every stepping operation validates first, then returns a fresh
/// derivation and leaves the receiver untouched. The sentential form is
/// replayed from the step log rather than stored, so the two can never
/// drift apart.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Derivation {
    grammar: Arc<Grammar>,
    steps: Vec<Step>,
}

impl Derivation {
    /// An empty derivation; its sentential form is the start symbol alone.
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar: Arc::new(grammar),
            steps: Vec::new(),
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The applied steps, oldest first.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The current sentential form.
    pub fn sentential_form(&self) -> Word {
        let mut form = vec![self.grammar.start().clone()];
        for step in &self.steps {
            apply(&mut form, &self.grammar.productions()[step.production], step.position);
        }
        Word::new(form)
    }

    /// Enumerates every legal `(production, position)` pair on the current
    /// form, ordered by increasing position and, within a position, by
    /// increasing production index. The optional arguments restrict the
    /// enumeration to one production and/or one position.
    pub fn possible_steps(
        &self,
        production: Option<usize>,
        position: Option<usize>,
    ) -> impl Iterator<Item = Step> + '_ {
        let form = self.sentential_form();
        let productions = self.grammar.productions();
        let count = productions.len();
        (0..form.len() * count).filter_map(move |k| {
            let pos = k / count;
            let idx = k % count;
            if production.map_or(false, |p| p != idx) {
                return None;
            }
            if position.map_or(false, |p| p != pos) {
                return None;
            }
            let lhs = productions[idx].lhs();
            if pos + lhs.len() <= form.len() && form[pos..pos + lhs.len()] == lhs[..] {
                Some(Step {
                    production: idx,
                    position: pos,
                })
            } else {
                None
            }
        })
    }

    /// Applies `production` at `position`, returning the grown derivation.
    ///
    /// The production's left-hand side must occur in the current form
    /// starting exactly at `position`.
    pub fn step(&self, production: usize, position: usize) -> Result<Derivation> {
        let form = self.sentential_form();
        let prod = self.grammar.productions().get(production).ok_or_else(|| {
            Error::IllegalStep(format!("no production with index {}", production))
        })?;
        let matches = position
            .checked_add(prod.lhs().len())
            .filter(|end| *end <= form.len())
            .map_or(false, |end| form[position..end] == prod.lhs()[..]);
        if !matches {
            return Err(Error::IllegalStep(format!(
                "`{}` does not occur at position {} of `{}`",
                prod.lhs(),
                position,
                form
            )));
        }
        trace!("applying production {} (`{}`) at {}", production, prod, position);
        let mut steps = self.steps.clone();
        steps.push(Step {
            production,
            position,
        });
        Ok(Derivation {
            grammar: Arc::clone(&self.grammar),
            steps,
        })
    }

    /// Applies `production` at the leftmost position where its left-hand
    /// side occurs.
    pub fn leftmost(&self, production: usize) -> Result<Derivation> {
        let step = self
            .possible_steps(Some(production), None)
            .next()
            .ok_or_else(|| self.no_occurrence(production))?;
        self.step(step.production, step.position)
    }

    /// Applies `production` at the rightmost position where its left-hand
    /// side occurs.
    pub fn rightmost(&self, production: usize) -> Result<Derivation> {
        let step = self
            .possible_steps(Some(production), None)
            .last()
            .ok_or_else(|| self.no_occurrence(production))?;
        self.step(step.production, step.position)
    }

    /// The derived sentence, once every symbol of the form is terminal.
    pub fn sentence(&self) -> Option<Word> {
        let form = self.sentential_form();
        if form.iter().all(|s| self.grammar.is_terminal(s)) {
            Some(form)
        } else {
            None
        }
    }

    fn no_occurrence(&self, production: usize) -> Error {
        Error::IllegalStep(format!(
            "production {} matches nowhere in `{}`",
            production,
            self.sentential_form()
        ))
    }
}

impl Display for Derivation {
    /// Renders the chain `form_0 -> form_1 -> ... -> form_n`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut form = vec![self.grammar.start().clone()];
        write!(f, "{}", Word::new(form.clone()))?;
        for step in &self.steps {
            apply(&mut form, &self.grammar.productions()[step.production], step.position);
            write!(f, " -> {}", Word::new(form.clone()))?;
        }
        Ok(())
    }
}

fn apply(form: &mut Vec<Symbol>, production: &Production, position: usize) {
    form.splice(
        position..position + production.lhs().len(),
        production.rhs().iter().cloned(),
    );
}
