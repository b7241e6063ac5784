//! esquash CLI — minify a single JavaScript file.

use clap::Parser as ClapParser;
use esquash_core::{minify, CompileError, MinifyOptions};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(
    name = "esquash",
    version,
    disable_version_flag = true,
    about = "Minify a JavaScript file: scope-aware local renaming and minimal-whitespace emission."
)]
struct Cli {
    /// Input file to minify
    filename: PathBuf,

    /// Enable the renaming pass
    #[arg(short = 'r', long = "rename-locals")]
    rename_locals: bool,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CompileError> {
    let mut source = String::new();
    File::open(&cli.filename)?.read_to_string(&mut source)?;

    let options = MinifyOptions {
        rename_locals: cli.rename_locals,
    };

    match cli.output {
        Some(path) => {
            let out = BufWriter::new(File::create(path)?);
            minify(&source, options, out)
        }
        None => {
            let out = io::stdout().lock();
            minify(&source, options, out)
        }
    }
}

fn report(err: &CompileError) {
    match err {
        CompileError::ParseError { message } => eprintln!("esquash: {message}"),
        CompileError::InternalError { .. } => eprintln!("esquash: internal error"),
        CompileError::IoError(e) => eprintln!("esquash: {e}"),
    }
    let _ = io::stderr().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_filename() {
        let cli = Cli::try_parse_from(["esquash", "input.js"]).expect("should parse");
        assert_eq!(cli.filename, PathBuf::from("input.js"));
        assert!(!cli.rename_locals);
        assert!(cli.output.is_none());
    }

    #[test]
    fn parses_rename_and_output_flags() {
        let cli = Cli::try_parse_from([
            "esquash",
            "input.js",
            "--rename-locals",
            "--output",
            "out.js",
        ])
        .expect("should parse");
        assert!(cli.rename_locals);
        assert_eq!(cli.output, Some(PathBuf::from("out.js")));
    }

    #[test]
    fn rejects_missing_filename() {
        assert!(Cli::try_parse_from(["esquash"]).is_err());
    }

    #[test]
    fn lowercase_v_triggers_version_display() {
        let err = Cli::try_parse_from(["esquash", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
