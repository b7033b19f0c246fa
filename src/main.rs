use std::{fs, path::PathBuf, process};

use clap::Parser;
use stackline::{
    StdHost,
    interpreter::evaluator::{DEFAULT_STACK_CAPACITY, Host, Options, Outcome},
    run_source, tokenize,
};
use tracing_subscriber::EnvFilter;

/// stackline runs line-oriented stack scripts straight from their tokens.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run.
    file: PathBuf,

    /// How many values the operand stack can hold.
    #[arg(long, default_value_t = DEFAULT_STACK_CAPACITY)]
    stack_capacity: usize,

    /// Print the token table instead of running the script.
    #[arg(long)]
    tokens: bool,

    /// Print what is left on the operand stack once the script completes.
    #[arg(long)]
    stack: bool,

    /// Log interpreter decisions to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "stackline=debug" } else { "stackline=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let script = fs::read_to_string(&args.file).unwrap_or_else(|e| {
                                                   eprintln!("CLI >> Failed to read '{}': {e}",
                                                             args.file.display());
                                                   process::exit(1);
                                               });

    if args.tokens {
        match tokenize(&script) {
            Ok(tokens) => tokens.iter().for_each(|token| println!("{token}")),
            Err(e) => {
                eprintln!("\n{e}");
                process::exit(1);
            },
        }
        return;
    }

    let options = Options { stack_capacity: args.stack_capacity };

    match run_source(&script, &options, StdHost) {
        Ok(Outcome::Exited { code }) => process::exit(code),
        Ok(Outcome::Completed { stack }) => {
            if args.stack {
                let mut host = StdHost;
                for value in &stack {
                    if let Err(e) = host.write_line(&value.to_string()) {
                        eprintln!("CLI >> Failed to write the stack: {e}");
                        process::exit(1);
                    }
                }
            }
        },
        Err(e) => {
            eprintln!("\n{e}");
            process::exit(1);
        },
    }
}
