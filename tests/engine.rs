//! End-to-end derivation and automaton scenarios.

use anyhow::Result;
use glot::{Automaton, Derivation, Grammar, Label, Production, Step, Symbol, Word, SINK};

fn expression_grammar() -> Result<Grammar> {
    Ok(Grammar::from_string(
        "E -> E + E\nE -> E * E\nE -> i",
        true,
    )?)
}

#[test]
fn unrestricted_derivation_reaches_the_sentence() -> Result<()> {
    let grammar = Grammar::from_string(
        "S -> a b c\nS -> a S Q\nb Q c -> b b c c\nc Q -> Q c",
        false,
    )?;
    let derivation = Derivation::new(grammar)
        .step(1, 0)?
        .step(0, 1)?
        .step(3, 3)?
        .step(2, 2)?;
    assert_eq!(derivation.sentential_form(), Word::from("a a b b c c"));
    assert_eq!(derivation.steps().len(), 4);
    Ok(())
}

#[test]
fn expression_grammar_enumerates_nine_steps() -> Result<()> {
    let derivation = Derivation::new(expression_grammar()?).step(0, 0)?.step(0, 0)?;
    assert_eq!(derivation.sentential_form(), Word::from("E + E + E"));
    let steps: Vec<Step> = derivation.possible_steps(None, None).collect();
    assert_eq!(steps.len(), 9);
    let positions: Vec<usize> = steps.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0, 0, 0, 2, 2, 2, 4, 4, 4]);
    Ok(())
}

#[test]
fn leftmost_picks_the_first_occurrence() -> Result<()> {
    let derivation = Derivation::new(expression_grammar()?).step(0, 0)?.step(0, 0)?;
    let stepped = derivation.leftmost(0)?;
    assert_eq!(stepped.steps().last().map(|s| s.position), Some(0));
    assert_eq!(stepped.sentential_form(), Word::from("E + E + E + E"));
    let stepped = derivation.rightmost(0)?;
    assert_eq!(stepped.steps().last().map(|s| s.position), Some(4));
    Ok(())
}

#[test]
fn stepping_never_mutates_the_receiver() -> Result<()> {
    let derivation = Derivation::new(expression_grammar()?).step(0, 0)?;
    let before = derivation.sentential_form();
    let _grown = derivation.step(2, 2)?;
    assert_eq!(derivation.sentential_form(), before);
    Ok(())
}

#[test]
fn regular_grammar_becomes_an_automaton() -> Result<()> {
    let grammar = Grammar::from_string("A -> a B\nB -> b\nB -> ε", true)?;
    let automaton = Automaton::from_grammar(&grammar)?;
    assert_eq!(automaton.states().len(), 3);
    assert!(automaton.states().contains(&Symbol::from(SINK)));
    assert_eq!(automaton.transitions().len(), 2);
    assert!(automaton.accepting().contains(&Symbol::from("B")));
    assert_eq!(
        automaton.delta(&Symbol::from("A"), &Label::from("a")),
        [Symbol::from("B")].iter().cloned().collect()
    );
    Ok(())
}

#[test]
fn delta_mirrors_the_start_alternatives() -> Result<()> {
    let grammar = Grammar::from_string("A -> a B\nA -> b\nB -> b", true)?;
    let automaton = Automaton::from_grammar(&grammar)?;
    assert!(!automaton.delta(grammar.start(), &Label::from("a")).is_empty());
    assert!(!automaton.delta(grammar.start(), &Label::from("b")).is_empty());
    assert!(automaton.delta(grammar.start(), &Label::from("c")).is_empty());
    Ok(())
}

#[test]
fn production_text_roundtrips() -> Result<()> {
    let production: Production = "S -> a b c".parse()?;
    let reparsed: Production = production.to_string().parse()?;
    assert_eq!(production, reparsed);
    Ok(())
}

#[test]
fn derivation_renders_every_form() -> Result<()> {
    let derivation = Derivation::new(expression_grammar()?)
        .step(0, 0)?
        .leftmost(2)?
        .rightmost(2)?;
    assert_eq!(derivation.to_string(), "E -> E + E -> i + E -> i + i");
    Ok(())
}
