//! Pfusch CLI: load, check, and execute grid programs.
//!
//! Exit codes:
//! - 0: Success (halted, or stopped at the step ceiling)
//! - 1: Usage, input, or load error
//! - 2: Runtime error

mod commands;

use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "check" => commands::check(&args[2..]),
        "describe" => commands::describe(&args[2..]),
        "opcodes" => commands::opcodes(&args[2..]),
        "hash" => commands::hash(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Log to stderr so program output on stdout stays clean. `RUST_LOG`
/// overrides the default `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Usage: pfusch <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <file.pf> [--max-steps N] [--visual] [--delay-ms N]");
    eprintln!("                                   Load and execute a program");
    eprintln!("  check <file.pf>                  Load and validate a program");
    eprintln!("  describe <symbol|code>...        Describe what a grid symbol does");
    eprintln!("  opcodes                          List every opcode");
    eprintln!("  hash <file.pf>                   Fingerprint a loaded program");
}
