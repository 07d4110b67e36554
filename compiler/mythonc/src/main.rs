//! Mython interpreter CLI.

use mythonc::{lex_source, parse_source, run_source, tracing_setup, ProgramError};

fn main() {
    tracing_setup::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: mython run <file.my>");
                std::process::exit(1);
            }
            run_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: mython lex <file.my>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: mython parse <file.my>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Mython {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare source file path is shorthand for `run`.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("my"))
            {
                run_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cannot read {path}: {err}");
            std::process::exit(1);
        }
    }
}

fn run_file(path: &str) {
    let source = read_file(path);
    if let Err(err) = run_source(&source, mython_eval::stdout_handler()) {
        report_and_exit(&err, &source);
    }
}

fn lex_file(path: &str) {
    let source = read_file(path);
    match lex_source(&source) {
        Ok(listing) => print!("{listing}"),
        Err(err) => report_and_exit(&err, &source),
    }
}

fn parse_file(path: &str) {
    let source = read_file(path);
    match parse_source(&source) {
        Ok(summary) => print!("{summary}"),
        Err(err) => report_and_exit(&err, &source),
    }
}

fn report_and_exit(err: &ProgramError, source: &str) -> ! {
    eprintln!("{}", err.report(source));
    std::process::exit(1);
}

fn print_usage() {
    println!("Mython interpreter");
    println!();
    println!("Usage: mython <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.my>        Run a Mython program");
    println!("  lex <file.my>        Tokenize and display tokens");
    println!("  parse <file.my>      Parse and display AST info");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  MYTHON_LOG           Log filter (RUST_LOG syntax), default warn");
    println!("  MYTHON_LOG_TREE      Hierarchical log output");
    println!();
    println!("Examples:");
    println!("  mython run main.my");
    println!("  mython main.my       # Shorthand for 'run'");
    println!("  mython lex main.my");
}
