//! Built-in example programs, embedded at compile time and parsed on first use.

use crate::types::{Program, TuringMachineError};

// Default embedded programs
const PROGRAM_TEXTS: [&str; 4] = [
    include_str!("../programs/rewrite-aabca.tm"),
    include_str!("../programs/rewrite-bcbc.tm"),
    include_str!("../programs/endless-writer.tm"),
    include_str!("../programs/left-edge.tm"),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = PROGRAM_TEXTS
        .iter()
        .filter_map(|text| match crate::parser::parse(text) {
            Ok(program) => Some(program),
            Err(e) => {
                log::error!("Failed to parse embedded program: {}", e);
                None
            }
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TuringMachineError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name, ignoring case
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }

    /// Get the source text of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, TuringMachineError> {
        PROGRAM_TEXTS.get(index).copied().ok_or_else(|| {
            TuringMachineError::ValidationError(format!(
                "Program text index {} out of range",
                index
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::TuringMachine;
    use crate::types::Halt;

    #[test]
    fn test_all_programs_parse() {
        assert_eq!(ProgramManager::get_program_count(), PROGRAM_TEXTS.len());
    }

    #[test]
    fn test_program_names() {
        let names = ProgramManager::list_program_names();

        assert!(names.contains(&"Rewrite aabca".to_string()));
        assert!(names.contains(&"Rewrite bcbc".to_string()));
        assert!(names.contains(&"Endless writer".to_string()));
        assert!(names.contains(&"Left edge".to_string()));
    }

    #[test]
    fn test_get_program_by_index() {
        assert!(ProgramManager::get_program_by_index(0).is_ok());
        assert!(ProgramManager::get_program_by_index(999).is_err());
        assert!(ProgramManager::get_program_text_by_index(0)
            .unwrap()
            .contains("Rewrite aabca"));
        assert!(ProgramManager::get_program_text_by_index(999).is_err());
    }

    #[test]
    fn test_get_program_by_name() {
        let program = ProgramManager::get_program_by_name("rewrite AABCA").unwrap();
        assert_eq!(program.tape, "Baabca");

        assert!(ProgramManager::get_program_by_name("Nonexistent").is_err());
    }

    #[test]
    fn test_programs_reach_their_halts() {
        let expected = [
            ("Rewrite aabca", "No transitions possible."),
            ("Rewrite bcbc", "No transitions possible."),
            ("Endless writer", "Iteration limit of 100 reached."),
            ("Left edge", "Execution fell off the tape."),
        ];

        for (name, message) in expected {
            let program = ProgramManager::get_program_by_name(name).unwrap();
            let mut machine = TuringMachine::from_program(&program);
            let execution = machine.run(program.initial_tape().unwrap());

            assert_eq!(execution.halt.to_string(), message, "program '{}'", name);
        }
    }

    #[test]
    fn test_left_edge_halts_at_minus_one() {
        let program = ProgramManager::get_program_by_name("Left edge").unwrap();
        let execution = TuringMachine::from_program(&program).run(program.initial_tape().unwrap());

        assert_eq!(execution.halt, Halt::OutOfBounds(-1));
        assert_eq!(execution.tape.to_string(), "YZ");
    }
}
