//! Execution traces. A `Frame` is a snapshot of the tape, head, and state taken before each
//! fetch-decide-apply cycle; a `TraceSink` receives every frame of a run and the halt that
//! ended it.

use crate::types::{Halt, State, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// A snapshot of the machine taken at the start of an iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// The rendered tape, blanks as spaces.
    pub tape: String,
    /// The head position. It is only negative when the head has just fallen off the tape.
    pub head: isize,
    pub state: State,
}

/// Draws the frame as four lines: a border, the tape followed by a blank and `...`, a row
/// marking the head with `_`, and the state label.
///
/// ```text
/// ##########
///  aabca ...
/// #_########
/// State: q1
/// ```
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.tape.chars().count() + 4;

        writeln!(f, "{}", "#".repeat(width))?;
        writeln!(f, "{}{}...", self.tape, Symbol::Blank.glyph())?;
        match usize::try_from(self.head) {
            Ok(head) => writeln!(
                f,
                "{}_{}",
                "#".repeat(head),
                "#".repeat(width.saturating_sub(head + 1))
            )?,
            Err(_) => writeln!(f, "{}", "#".repeat(width))?,
        }
        write!(f, "State: {}", self.state)
    }
}

/// Receives the observable side channel of an execution.
pub trait TraceSink {
    /// Called once per iteration, before the symbol under the head is read.
    fn frame(&mut self, frame: &Frame);

    /// Called once, after the loop, with the condition that ended the run.
    fn halt(&mut self, halt: &Halt);
}

/// Discards the trace.
impl TraceSink for () {
    fn frame(&mut self, _frame: &Frame) {}

    fn halt(&mut self, _halt: &Halt) {}
}

/// Keeps every frame and the final halt in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recorder {
    pub frames: Vec<Frame>,
    pub halt: Option<Halt>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraceSink for Recorder {
    fn frame(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn halt(&mut self, halt: &Halt) {
        self.halt = Some(halt.clone());
    }
}

/// Prints frames in the human-readable layout, each followed by an empty line, and the
/// halt message on its own line.
///
/// Write failures are logged and otherwise ignored; the trace never affects the run.
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for TextSink<W> {
    fn frame(&mut self, frame: &Frame) {
        if let Err(e) = writeln!(self.writer, "{}\n", frame) {
            log::warn!("Failed to write trace frame: {}", e);
        }
    }

    fn halt(&mut self, halt: &Halt) {
        if let Err(e) = writeln!(self.writer, "{}", halt).and_then(|_| self.writer.flush()) {
            log::warn!("Failed to write halt message: {}", e);
        }
    }
}

#[derive(Serialize)]
struct HaltRecord<'a> {
    halt: &'a Halt,
    message: String,
}

/// Writes one JSON object per line: every frame, then `{"halt": .., "message": ..}`.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record<T: Serialize>(&mut self, record: &T) {
        let result = serde_json::to_writer(&mut self.writer, record)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.writer));

        if let Err(e) = result {
            log::warn!("Failed to write JSON trace record: {}", e);
        }
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn frame(&mut self, frame: &Frame) {
        self.write_record(frame);
    }

    fn halt(&mut self, halt: &Halt) {
        self.write_record(&HaltRecord {
            halt,
            message: halt.to_string(),
        });
        if let Err(e) = self.writer.flush() {
            log::warn!("Failed to flush JSON trace: {}", e);
        }
    }
}
