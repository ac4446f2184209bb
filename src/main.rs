// lox: scan and parse Lox expressions from a file or an interactive prompt

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::Parser as _;

use lox_syntax::parser::parse::DEFAULT_MAX_DEPTH;
use lox_syntax::{run_source, scan_source, AstPrinter, ParserConfig, Reporter};

/// Invalid command-line usage.
const EX_USAGE: i32 = 64;
/// The input contained lexical or syntax errors.
const EX_DATAERR: i32 = 65;
/// The script file could not be read.
const EX_NOINPUT: i32 = 66;

/// Parse a Lox expression and print its tree.
#[derive(clap::Parser, Debug)]
#[command(name = "lox", version)]
struct Cli {
    /// Script to run. Starts an interactive prompt when omitted.
    script: Option<PathBuf>,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Maximum nesting of groupings and prefix operators
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

struct Session {
    config: ParserConfig,
    dump_tokens: bool,
    reporter: Reporter<io::Stderr>,
}

impl Session {
    /// Scan, parse and print one unit of source. Diagnostics go to stderr and
    /// leave the reporter's flag set.
    fn run(&mut self, source: &str) -> io::Result<()> {
        if self.dump_tokens {
            let mut stdout = io::stdout().lock();
            for token in &scan_source(source).tokens {
                writeln!(stdout, "{}", token)?;
            }
        }

        if let Some(expr) = run_source(source, self.config, &mut self.reporter)? {
            println!("{}", AstPrinter::new().print(&expr));
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    return Ok(());
                }
                _ => process::exit(EX_USAGE),
            }
        }
    };

    let mut session = Session {
        config: ParserConfig {
            max_depth: cli.max_depth,
        },
        dump_tokens: cli.tokens,
        reporter: Reporter::stderr(),
    };

    match &cli.script {
        Some(path) => run_file(&mut session, path),
        None => run_prompt(&mut session),
    }
}

fn run_file(
    session: &mut Session,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path.display(), e);
            process::exit(EX_NOINPUT);
        }
    };

    session.run(&source)?;
    if session.reporter.had_error() {
        process::exit(EX_DATAERR);
    }
    Ok(())
}

fn run_prompt(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // Ctrl-D
            println!();
            break;
        }

        session.run(line.trim_end_matches(['\n', '\r']))?;
        session.reporter.reset();
    }

    Ok(())
}
