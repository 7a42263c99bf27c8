//! This module provides the `ProgramLoader` struct, responsible for loading programs from
//! files, strings, and directories.

use crate::parser::parse;
use crate::types::{Program, TuringMachineError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::{Path, PathBuf};

/// The file extension of program files.
pub const PROGRAM_EXTENSION: &str = "tm";

/// `ProgramLoader` is a utility struct for loading programs.
/// Files ending in `.json` are read as serialized `Program`s; everything else goes through the
/// text grammar.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single program from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read and parsed.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read or is too large.
    /// * Any error `parse` reports for malformed content.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::load_program_from_json(&content)
        } else {
            Self::load_program_from_string(&content)
        }
    }

    /// Loads a single program from text in the program grammar.
    pub fn load_program_from_string(content: &str) -> Result<Program, TuringMachineError> {
        Self::check_size(content)?;
        parse(content)
    }

    /// Loads a single program serialized as JSON.
    ///
    /// The tape literal is checked against the alphabet before the program is returned.
    pub fn load_program_from_json(content: &str) -> Result<Program, TuringMachineError> {
        Self::check_size(content)?;

        let program: Program = serde_json::from_str(content).map_err(|e| {
            TuringMachineError::ValidationError(format!("Invalid JSON program: {}", e))
        })?;
        program.initial_tape()?;

        Ok(program)
    }

    /// Loads every `.tm` file in `directory`.
    ///
    /// Directories and files with other extensions are skipped. Each element of the result is
    /// either the path and its program, or the error that prevented loading it.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, Program), TuringMachineError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                if path.is_dir() || path.extension().is_none_or(|ext| ext != PROGRAM_EXTENSION) {
                    return None;
                }

                Some(Self::load_program(&path).map(|program| (path, program)))
            })
            .collect()
    }

    fn check_size(content: &str) -> Result<(), TuringMachineError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TuringMachineError::FileError(format!(
                "Program is {} bytes, larger than the {} byte limit",
                content.len(),
                MAX_PROGRAM_SIZE
            )));
        }
        Ok(())
    }
}
