//! Command line handling for the `bcc` binary.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use bc_codegen::CodegenConfig;
use bc_diagnostic::emitter::{ColorMode, TerminalEmitter};
use bc_parse::ParseConfig;
use tracing::debug;

use crate::{compile, CompileConfig};

/// Output path used when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "out.asm";

pub const USAGE: &str = "\
Usage: bcc <file.bc> [options]

Options:
  -o <path>                Write the assembly to <path> (default: out.asm)
  --stdout                 Print the assembly instead of writing a file
  --tokens                 Print the token stream
  --ast                    Print the parsed program
  --validate-nested-calls  Also validate calls inside blocks and functions
  --color=<when>           Color diagnostics: auto, always, never
  -h, --help               Print this help";

/// Why the command line could not be run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing input file")]
    MissingInput,
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("option `{0}` needs a value")]
    MissingValue(&'static str),
    #[error("invalid color mode `{0}` (expected auto, always or never)")]
    InvalidColor(String),
    #[error("cannot read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot write `{path}`: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Parsed command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Help,
    Compile(Options),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub to_stdout: bool,
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub validate_nested_calls: bool,
    pub color: ColorMode,
}

impl Options {
    fn new(input: PathBuf) -> Self {
        Options {
            input,
            output: PathBuf::from(DEFAULT_OUTPUT),
            to_stdout: false,
            dump_tokens: false,
            dump_ast: false,
            validate_nested_calls: false,
            color: ColorMode::Auto,
        }
    }
}

/// Parse the arguments that follow the program name.
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let mut input = None;
    let mut output = None;
    let mut options = Options::new(PathBuf::new());

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--color=") {
            options.color =
                ColorMode::from_flag(value).ok_or_else(|| CliError::InvalidColor(value.into()))?;
            continue;
        }
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-o" => {
                let path = args.next().ok_or(CliError::MissingValue("-o"))?;
                output = Some(PathBuf::from(path));
            }
            "--stdout" => options.to_stdout = true,
            "--tokens" => options.dump_tokens = true,
            "--ast" => options.dump_ast = true,
            "--validate-nested-calls" => options.validate_nested_calls = true,
            flag if flag.starts_with('-') => return Err(CliError::UnknownOption(flag.into())),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => return Err(CliError::UnexpectedArgument(extra.into())),
        }
    }

    options.input = input.ok_or(CliError::MissingInput)?;
    if let Some(output) = output {
        options.output = output;
    }
    Ok(Command::Compile(options))
}

/// Compile the input file. Returns whether compilation succeeded.
pub fn run(options: &Options) -> Result<bool, CliError> {
    let path = options.input.display().to_string();
    let source = fs::read_to_string(&options.input).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;

    let config = CompileConfig {
        file_path: path,
        parse: ParseConfig::default(),
        codegen: CodegenConfig {
            validate_nested_calls: options.validate_nested_calls,
        },
    };
    let output = compile(&source, &config);

    let mut stdout = io::stdout().lock();
    if options.dump_tokens {
        for token in &output.tokens {
            writeln!(stdout, "{token}").map_err(stdout_error)?;
        }
    }
    if options.dump_ast {
        if let Some(program) = &output.program {
            write!(stdout, "{}", program.render()).map_err(stdout_error)?;
        }
    }

    TerminalEmitter::stderr(options.color, io::stderr().is_terminal())
        .with_source(&config.file_path, &source)
        .emit_report(&output.diagnostics);

    if !output.assembly.is_empty() {
        if options.to_stdout {
            stdout
                .write_all(output.assembly.as_bytes())
                .map_err(stdout_error)?;
        } else {
            fs::write(&options.output, &output.assembly).map_err(|source| CliError::Write {
                path: options.output.display().to_string(),
                source,
            })?;
            debug!(path = %options.output.display(), "wrote assembly");
        }
    }
    stdout.flush().map_err(stdout_error)?;

    Ok(output.success)
}

fn stdout_error(source: io::Error) -> CliError {
    CliError::Write {
        path: "<stdout>".to_string(),
        source,
    }
}
