//! Quine-McCluskey Logic Minimizer - Command Line Interface
//!
//! Reads function definitions such as `f(A, B, C) = m(2, 3, 4) + d(5)` from
//! a file and/or the command line and prints the minimized expressions.

use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use qm_logic::{
    minimize_shared_with_config, read_functions, shared_variables, FunctionSpec, FunctionTerms,
    Minimization, Notation, QmConfig,
};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, ValueEnum)]
enum NotationArg {
    /// A.B'+C
    Textbook,
    /// A * ~B + C
    Programming,
}

impl From<NotationArg> for Notation {
    fn from(val: NotationArg) -> Self {
        match val {
            NotationArg::Textbook => Notation::textbook(),
            NotationArg::Programming => Notation::programming(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qm")]
#[command(about = "Exact two-level logic minimizer (Quine-McCluskey with Petrick's method)", long_about = None)]
#[command(version)]
struct Args {
    /// File with one function definition per line
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Function definition given inline (repeatable)
    #[arg(short = 'e', long = "expr", value_name = "DEFINITION")]
    exprs: Vec<String>,

    /// Expression notation
    #[arg(short = 'n', long = "notation", value_enum, default_value = "textbook")]
    notation: NotationArg,

    /// Fix essential prime implicants before cover enumeration
    #[arg(long = "remove-essential")]
    remove_essential: bool,

    /// Minimize all functions jointly, sharing product terms
    #[arg(long = "shared")]
    shared: bool,

    /// List the prime implicants of every function
    #[arg(short = 'p', long = "primes")]
    primes: bool,

    /// List every inclusion-minimal cover with its cost
    #[arg(short = 'c', long = "covers")]
    covers: bool,

    /// Print cost and cover size
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn label(spec: &FunctionSpec, index: usize) -> String {
    spec.name.clone().unwrap_or_else(|| format!("f{}", index))
}

fn report(name: &str, result: &Minimization, args: &Args) {
    println!("{} = {}", name, result.expression());

    if args.summary {
        println!(
            "  cost {}, {} product term(s), {} prime implicant(s)",
            result.cost(),
            result.selected_cover().len(),
            result.prime_implicants().len()
        );
    }

    if args.primes {
        println!("  prime implicants:");
        for (i, imp) in result.prime_implicants().iter().enumerate() {
            println!("    [{}] {}", i, imp.to_pattern(result.width()));
        }
    }

    if args.covers {
        println!("  minimal covers:");
        for (i, cover) in result.candidate_covers().iter().enumerate() {
            let marker = if i == result.selected_index() { "*" } else { " " };
            let cost = result.candidate_cost(i).unwrap_or_default();
            println!("   {} {:?} cost {}", marker, cover, cost);
        }
    }
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: could not initialise logging: {}", e);
    }

    let mut functions = Vec::new();
    if let Some(ref path) = args.input {
        match read_functions(path) {
            Ok(mut specs) => functions.append(&mut specs),
            Err(e) => {
                eprintln!("Error reading '{}': {}", path.display(), e);
                process::exit(1);
            }
        }
    }
    for text in &args.exprs {
        match FunctionSpec::parse(text) {
            Ok(spec) => functions.push(spec),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
    if functions.is_empty() {
        eprintln!("Error: no functions given (pass a FILE or -e DEFINITION)");
        process::exit(2);
    }
    info!("minimizing {} function(s)", functions.len());

    let config = QmConfig {
        remove_essential: args.remove_essential,
        notation: args.notation.clone().into(),
    };

    if args.shared {
        let variables = match shared_variables(&functions) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        let terms: Vec<FunctionTerms> = functions.iter().map(|f| f.terms.clone()).collect();
        match minimize_shared_with_config(&terms, &variables, &config) {
            Ok(result) => {
                for (i, (spec, output)) in functions.iter().zip(result.outputs()).enumerate() {
                    report(&label(spec, i), output, &args);
                }
                println!(
                    "shared: {} product term(s), cost {}",
                    result.shared_cover().len(),
                    result.cost()
                );
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let mut failed = false;
    for (i, spec) in functions.iter().enumerate() {
        let name = label(spec, i);
        match spec.minimize_with_config(&config) {
            Ok(result) => report(&name, &result, &args),
            Err(e) => {
                eprintln!("Error minimizing {}: {}", name, e);
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}
