//! This module provides the parser for transition-table programs, utilizing the `pest` crate.
//! The grammar lives in `grammar.pest`; this module turns the parse tree into a `Program`.

use crate::tape::Tape;
use crate::types::{Direction, Program, State, Symbol, Transition, TuringMachineError};
use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the program grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct ProgramParser;

/// Parses the given input string into a `Program`.
///
/// # Returns
///
/// * `Ok(Program)` if the input is well formed.
/// * `Err(TuringMachineError::ParseError)` on syntax errors.
/// * `Err(TuringMachineError::ValidationError)` if a section is missing or repeated.
/// * `Err(TuringMachineError::InvalidSymbol)` / `Err(TuringMachineError::InvalidState)` for
///   symbols or states outside the machine's fixed sets.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    let root = ProgramParser::parse(Rule::program, input.trim())
        .map_err(Box::new)?
        .next()
        .ok_or_else(|| TuringMachineError::ValidationError("Empty program".to_string()))?;

    parse_program(root)
}

fn parse_program(pair: Pair<Rule>) -> Result<Program, TuringMachineError> {
    let mut name: Option<String> = None;
    let mut tape: Option<String> = None;
    let mut transitions: Option<Vec<Transition>> = None;
    let mut seen = HashSet::new();

    for p in pair.into_inner() {
        let rule = p.as_rule();
        if rule == Rule::EOI {
            continue;
        }

        if !seen.insert(rule) {
            return Err(TuringMachineError::ValidationError(format!(
                "Section '{}' is defined more than once",
                section_name(rule)
            )));
        }

        match rule {
            Rule::name => name = Some(parse_name(p)),
            Rule::tape => tape = Some(parse_tape(p)?),
            Rule::rules => transitions = Some(parse_rules(p)?),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| missing_section(Rule::name))?;
    let transitions = transitions.ok_or_else(|| missing_section(Rule::rules))?;

    Ok(Program {
        name,
        tape: tape.unwrap_or_default(),
        transitions,
    })
}

fn parse_name(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|text| text.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Validates the tape literal against the alphabet and returns it unchanged.
fn parse_tape(pair: Pair<Rule>) -> Result<String, TuringMachineError> {
    let literal = pair
        .into_inner()
        .next()
        .map(|cells| cells.as_str().to_string())
        .unwrap_or_default();

    Tape::parse(&literal)?;

    Ok(literal)
}

fn parse_rules(pair: Pair<Rule>) -> Result<Vec<Transition>, TuringMachineError> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::transition)
        .map(parse_transition)
        .collect()
}

/// Parses `q0, B -> q1, B, R`.
fn parse_transition(pair: Pair<Rule>) -> Result<Transition, TuringMachineError> {
    let mut parts = pair.into_inner();
    let mut next = || {
        parts.next().map(|p| p.as_str()).ok_or_else(|| {
            TuringMachineError::ValidationError("Incomplete transition".to_string())
        })
    };

    let from = next()?.parse::<State>()?;
    let read = parse_symbol(next()?)?;
    let to = next()?.parse::<State>()?;
    let write = parse_symbol(next()?)?;
    let direction = parse_direction(next()?)?;

    Ok(Transition::new(from, read, to, write, direction))
}

fn parse_symbol(s: &str) -> Result<Symbol, TuringMachineError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Symbol::from_char(c),
        _ => Err(TuringMachineError::ValidationError(format!(
            "Expected a single symbol, found '{}'",
            s
        ))),
    }
}

fn parse_direction(s: &str) -> Result<Direction, TuringMachineError> {
    s.chars()
        .next()
        .and_then(Direction::from_char)
        .ok_or_else(|| TuringMachineError::ValidationError(format!("Invalid direction '{}'", s)))
}

fn section_name(rule: Rule) -> &'static str {
    match rule {
        Rule::name => "name",
        Rule::tape => "tape",
        Rule::rules => "rules",
        _ => "unknown",
    }
}

fn missing_section(rule: Rule) -> TuringMachineError {
    TuringMachineError::ValidationError(format!(
        "Missing required section '{}'",
        section_name(rule)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction::{Left, Right};
    use crate::types::State::{Q0, Q1, Q2};
    use crate::types::Symbol::{Blank, A, C};

    #[test]
    fn test_parse_program() {
        let input = r#"
name: Rewrite b to c
tape: Baabca
rules:
  q0, B -> q1, B, R
  q1, B -> q2, B, L
  q1, a -> q1, a, R
"#;

        let program = parse(input).unwrap();

        assert_eq!(program.name, "Rewrite b to c");
        assert_eq!(program.tape, "Baabca");
        assert_eq!(
            program.transitions,
            vec![
                Transition::new(Q0, Blank, Q1, Blank, Right),
                Transition::new(Q1, Blank, Q2, Blank, Left),
                Transition::new(Q1, A, Q1, A, Right),
            ]
        );
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let input = r#"
# leading comment
name: Commented   # trailing comment

rules:
  # a rule
  q0, a -> q1, c, S

  q1, c -> q0, a, L   # another
"#;

        let program = parse(input).unwrap();

        assert_eq!(program.name, "Commented");
        assert_eq!(program.tape, "");
        assert_eq!(program.transitions.len(), 2);
        assert_eq!(program.transitions[0].output.write, C);
    }

    #[test]
    fn test_parse_sections_in_any_order() {
        let input = "rules:\n  q0, a -> q1, a, R\ntape: a\nname: Reordered";

        let program = parse(input).unwrap();
        assert_eq!(program.name, "Reordered");
        assert_eq!(program.tape, "a");
    }

    #[test]
    fn test_parse_empty_rules() {
        let program = parse("name: Nothing\nrules:").unwrap();
        assert!(program.transitions.is_empty());
    }

    #[test]
    fn test_missing_name() {
        let result = parse("rules:\n  q0, a -> q1, a, R");
        assert!(matches!(result, Err(TuringMachineError::ValidationError(_))));
    }

    #[test]
    fn test_missing_rules() {
        let result = parse("name: No rules\ntape: a");
        assert!(matches!(result, Err(TuringMachineError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_section() {
        let result = parse("name: One\nname: Two\nrules:");
        match result {
            Err(TuringMachineError::ValidationError(msg)) => assert!(msg.contains("name")),
            other => panic!("Expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_tape_symbol() {
        let result = parse("name: Bad tape\ntape: Bad\nrules:");
        assert_eq!(result, Err(TuringMachineError::InvalidSymbol('d')));
    }

    #[test]
    fn test_invalid_rule_symbol() {
        let result = parse("name: Bad rule\nrules:\n  q0, q -> q1, a, R");
        assert_eq!(result, Err(TuringMachineError::InvalidSymbol('q')));
    }

    #[test]
    fn test_invalid_state() {
        let result = parse("name: Bad state\nrules:\n  q0, a -> q12, a, R");
        assert_eq!(
            result,
            Err(TuringMachineError::InvalidState("q12".to_string()))
        );
    }

    #[test]
    fn test_syntax_error() {
        let result = parse("name: Broken\nrules:\n  q0 a -> q1, a, R");
        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));
    }

    #[test]
    fn test_invalid_direction_is_syntax_error() {
        let result = parse("name: Broken\nrules:\n  q0, a -> q1, a, X");
        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));
    }
}
