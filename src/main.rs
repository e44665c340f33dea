extern crate exitcode;

use std::error::Error;
use std::io::{self, IsTerminal};

use clap::Parser;
use simple_error::SimpleError;
use tracing::Level;

use tinyc_frontend::{
    DeclarationAnalyser,
    DiagnosticSink,
    Diagnostics,
    FrontEnd,
    PestTinyCParser,
    StderrSink
};

// Basic Front End Configuration
type PARSER = PestTinyCParser;
type ANALYSER = DeclarationAnalyser;


/// Command Line interface struct
/// Describes possible arguments using the clap library
#[derive(Parser)]
#[clap(version, about = "Parses and analyses a source file, dumping its syntax tree")]
struct FrontEndCLIOptions {
    /// Path of source file to analyse
    #[clap(parse(from_os_str))]
    path: std::path::PathBuf,

    // Flags

    /// Print the symbol table after analysis
    #[clap(long, action)]
    symbols: bool,

    /// Do not print the syntax tree
    #[clap(long, action)]
    no_ast: bool,

    /// Write diagnostics to stderr as they are reported instead of after the run
    #[clap(long, action)]
    stderr_diagnostics: bool,

    /// Increase logging verbosity, may be repeated
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64
}

impl FrontEndCLIOptions {
    /// Logging level selected by the number of verbose flags
    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE
        }
    }
}

/// Runs the front end over the source file and prints the requested dumps.
/// @return: number of diagnostics reported if the source parsed, otherwise the error.
fn run(cli_args: &FrontEndCLIOptions, diagnostics: &mut dyn DiagnosticSink) -> Result<usize, Box<dyn Error>> {
    let front_end: FrontEnd<PARSER, ANALYSER> = FrontEnd::default();
    let output = front_end.compile(cli_args.path.as_path(), diagnostics)?;

    if !cli_args.no_ast {
        output.tree.print();
    }
    if cli_args.symbols {
        print!("{}", output.symbol_table);
    }

    output.tree.destroy();
    Ok(diagnostics.reported())
}

/// Exit code for a run that failed before producing output.
/// Missing input is NOINPUT, other read failures IOERR, syntax errors DATAERR.
fn exit_code_for(error: &(dyn Error + 'static)) -> i32 {
    if let Some(io_error) = error.downcast_ref::<io::Error>() {
        return match io_error.kind() {
            io::ErrorKind::NotFound => exitcode::NOINPUT,
            _ => exitcode::IOERR
        };
    }
    match error.downcast_ref::<SimpleError>() {
        Some(_) => exitcode::DATAERR,
        None => exitcode::SOFTWARE
    }
}

fn main() {
    // Parse Command line arguments
    let cli_args = FrontEndCLIOptions::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(cli_args.log_level())
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let result = if cli_args.stderr_diagnostics {
        run(&cli_args, &mut StderrSink::new())
    } else {
        let mut diagnostics = Diagnostics::new();
        let result = run(&cli_args, &mut diagnostics);
        for diagnostic in &diagnostics {
            eprintln!("{}", diagnostic);
        }
        result
    };

    // Check result
    match result {
        Ok(0) => {
            std::process::exit(exitcode::OK);
        },
        Ok(reported) => {
            eprintln!("{} diagnostic(s) reported", reported);
            std::process::exit(exitcode::DATAERR);
        },
        Err(why) => {
            eprintln!("Front End Error: {}", why);
            std::process::exit(exit_code_for(&*why));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let cases: Vec<(Box<dyn Error>, i32)> = vec![
            (Box::new(io::Error::new(io::ErrorKind::NotFound, "no such file")), exitcode::NOINPUT),
            (Box::new(io::Error::new(io::ErrorKind::PermissionDenied, "denied")), exitcode::IOERR),
            (Box::new(io::Error::new(io::ErrorKind::Other, "is a directory")), exitcode::IOERR),
            (Box::new(SimpleError::new("Syntax Error")), exitcode::DATAERR),
            (Box::<dyn Error>::from("unexpected"), exitcode::SOFTWARE),
        ];
        for (error, expected) in &cases {
            assert_eq!(*expected, exit_code_for(&**error), "{}", error);
        }
    }

    #[test]
    fn test_directory_input_is_io_error() {
        let front_end: FrontEnd<PARSER, ANALYSER> = FrontEnd::default();
        let error = front_end.compile(std::path::Path::new(env!("CARGO_MANIFEST_DIR")), &mut Diagnostics::new())
            .unwrap_err();
        assert_eq!(exitcode::IOERR, exit_code_for(&*error));
    }
}
