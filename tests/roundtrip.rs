//! Property tests for the textual round-trip and the stepping laws.

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::Index;

use glot::{Derivation, Grammar, Production, Step, Symbol, Transition, Word};

const SYMBOL: &str = "[A-Za-z][A-Za-z0-9]{0,3}";

fn word(symbols: &[String]) -> Word {
    symbols.iter().map(|s| Symbol::from(s.as_str())).collect()
}

proptest! {
    #[test]
    fn production_roundtrips(
        lhs in vec(SYMBOL, 1..4),
        rhs in vec(SYMBOL, 0..5),
    ) {
        let production = Production::new(word(&lhs), word(&rhs)).unwrap();
        let rendered = production.to_string();
        let reparsed: Production = rendered.parse().unwrap();
        prop_assert_eq!(production, reparsed);
    }

    #[test]
    fn transition_roundtrips(
        frm in SYMBOL,
        label in prop_oneof![Just("ε".to_string()), SYMBOL],
        to in SYMBOL,
    ) {
        let transition = Transition::new(frm.as_str(), label.as_str(), to.as_str());
        let rendered = transition.to_string();
        let reparsed: Transition = rendered.parse().unwrap();
        prop_assert_eq!(transition, reparsed);
    }

    #[test]
    fn every_enumerated_step_substitutes(picks in vec(any::<Index>(), 0..6)) {
        let grammar = Grammar::from_string("E -> E + E\nE -> E * E\nE -> i", true).unwrap();
        let mut derivation = Derivation::new(grammar);
        for pick in picks {
            let steps: Vec<Step> = derivation.possible_steps(None, None).collect();
            if steps.is_empty() {
                break;
            }
            let step = steps[pick.index(steps.len())];
            let before = derivation.sentential_form();
            let next = derivation.step(step.production, step.position).unwrap();

            let production = &derivation.grammar().productions()[step.production];
            let mut expected: Vec<Symbol> = before[..step.position].to_vec();
            expected.extend(production.rhs().iter().cloned());
            expected.extend(
                before[step.position + production.lhs().len()..]
                    .iter()
                    .cloned(),
            );
            prop_assert_eq!(next.sentential_form(), Word::new(expected));
            // the receiver is untouched
            prop_assert_eq!(derivation.sentential_form(), before);
            derivation = next;
        }
    }

    #[test]
    fn leftmost_is_the_minimum_possible_position(picks in vec(any::<Index>(), 1..5)) {
        let grammar = Grammar::from_string("E -> E + E\nE -> E * E\nE -> i", true).unwrap();
        let mut derivation = Derivation::new(grammar);
        for pick in picks {
            let positions: Vec<usize> = derivation
                .possible_steps(Some(0), None)
                .map(|s| s.position)
                .collect();
            if positions.is_empty() {
                break;
            }
            let min = *positions.iter().min().unwrap();
            let max = *positions.iter().max().unwrap();
            let left = derivation.leftmost(0).unwrap();
            prop_assert_eq!(left.steps().last().map(|s| s.position), Some(min));
            let right = derivation.rightmost(0).unwrap();
            prop_assert_eq!(right.steps().last().map(|s| s.position), Some(max));
            // grow along some random branch before checking again
            let all: Vec<Step> = derivation.possible_steps(None, None).collect();
            let step = all[pick.index(all.len())];
            derivation = derivation.step(step.production, step.position).unwrap();
        }
    }

    #[test]
    fn alternatives_match_the_production_list(rhss in vec(vec(SYMBOL, 1..3), 1..5)) {
        let mut productions = Vec::new();
        for rhs in &rhss {
            productions.push(Production::new(Word::from("S"), word(rhs)).unwrap());
        }
        let text: Vec<String> = productions.iter().map(|p| p.to_string()).collect();
        let grammar = Grammar::from_string(&text.join("\n"), true).unwrap();
        let alternatives = grammar.alternatives(&Symbol::from("S"));
        prop_assert_eq!(alternatives.len(), productions.len());
        for (alternative, production) in alternatives.iter().zip(productions.iter()) {
            prop_assert_eq!(*alternative, production.rhs());
        }
    }
}
