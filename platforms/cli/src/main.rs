use clap::Parser;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tapeworm::{
    Frame, JsonLinesSink, Program, ProgramLoader, ProgramManager, StepMode, Tape, TextSink,
    TraceSink, TuringMachine, MAX_ITERATIONS,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tapeworm-cli programs/rewrite-aabca.tm
  tapeworm-cli --builtin 'Rewrite bcbc' --input Bcc
  tapeworm-cli --list")]
struct Cli {
    /// The program file to execute (.tm, or .json)
    program: Option<String>,

    /// Run a built-in program by name instead of a file
    #[clap(short, long, conflicts_with = "program")]
    builtin: Option<String>,

    /// Replace the program's initial tape, e.g. "Baabca"
    #[clap(short, long)]
    input: Option<String>,

    /// Maximum number of iterations before the run is stopped
    #[clap(short, long, default_value_t = MAX_ITERATIONS)]
    max_iterations: usize,

    /// Wait for enter after every frame
    #[clap(short, long)]
    step: bool,

    /// Print the trace as JSON lines
    #[clap(short, long)]
    json: bool,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        for name in ProgramManager::list_program_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let program = load_program(&cli)?;
    let tape = match &cli.input {
        Some(input) => Tape::parse(input)?,
        None => program.initial_tape()?,
    };
    log::info!("Running '{}' on tape '{}'", program.name, tape);

    let mut machine = TuringMachine::from_program(&program).with_max_iterations(cli.max_iterations);
    let stdout = io::stdout();
    let mut sink: Box<dyn TraceSink> = if cli.json {
        Box::new(JsonLinesSink::new(stdout.lock()))
    } else {
        Box::new(TextSink::new(stdout.lock()))
    };

    if cli.step && !atty::is(atty::Stream::Stdin) {
        log::warn!("Step mode reads from stdin, which is not a terminal");
    }

    let mut pause = |_: &Frame| wait_for_enter();
    let mode = if cli.step {
        StepMode::Manual(&mut pause)
    } else {
        StepMode::Continuous
    };

    let execution = machine.execute(tape, sink.as_mut(), mode);
    drop(sink);

    if !cli.json {
        println!("\nFinal tape: {}", execution.tape);
    }

    Ok(())
}

fn load_program(cli: &Cli) -> Result<Program, Box<dyn Error>> {
    match (&cli.program, &cli.builtin) {
        (Some(path), _) => Ok(ProgramLoader::load_program(Path::new(path))?),
        (None, Some(name)) => Ok(ProgramManager::get_program_by_name(name)?),
        (None, None) => Err("Either a program file or --builtin is required".into()),
    }
}

fn wait_for_enter() {
    let _ = io::stderr().write_all(b"[enter] ").and_then(|_| io::stderr().flush());
    let mut line = String::new();
    if let Err(e) = io::stdin().lock().read_line(&mut line) {
        log::warn!("Failed to read from stdin: {}", e);
    }
}
