use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tower_lsp::{LspService, Server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use frostring_lsp::backend::FrostringBackend;
use frostring_lsp::check::{CheckOutcome, check_file, fix_file};

#[derive(Parser)]
#[command(name = "frostring-lsp")]
#[command(about = "Language server for frozen string literal magic comments", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the LSP server (default behavior)
    Lsp,
    /// Check files for the magic comment and exit with code 1 if any lack it
    Check {
        /// Ruby files to check (*.rb, *.rake, *.gemspec, Rakefile, Gemfile)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Insert the preferred comment into files that lack it
        #[arg(long)]
        fix: bool,

        /// Output format: json or summary
        #[arg(short, long, default_value = "summary")]
        output: String,

        /// Exit with code 1 if missing comments are found
        #[arg(long, default_value = "true")]
        fail_on_missing: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; stdout carries the LSP stream
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(Commands::Check {
            files,
            fix,
            output,
            fail_on_missing,
        }) => run_check(files, fix, output, fail_on_missing),
        Some(Commands::Lsp) | None => {
            run_lsp().await;
            ExitCode::SUCCESS
        }
    }
}

async fn run_lsp() {
    tracing::info!("Starting Frostring LSP server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(FrostringBackend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

fn run_check(files: Vec<PathBuf>, fix: bool, output: String, fail_on_missing: bool) -> ExitCode {
    let mut results: Vec<(PathBuf, CheckOutcome)> = Vec::with_capacity(files.len());
    let mut errored = false;

    for file in files {
        let result = if fix { fix_file(&file) } else { check_file(&file) };
        match result {
            Ok(outcome) => results.push((file, outcome)),
            Err(e) => {
                eprintln!("Error: {}", e);
                errored = true;
            }
        }
    }

    let missing = results
        .iter()
        .filter(|(_, o)| *o == CheckOutcome::Missing)
        .count();
    let fixed = results
        .iter()
        .filter(|(_, o)| *o == CheckOutcome::Fixed)
        .count();

    match output.as_str() {
        "json" => {
            let report = serde_json::json!({
                "summary": {
                    "checked": results.len(),
                    "missing": missing,
                    "fixed": fixed
                },
                "files": results
                    .iter()
                    .map(|(path, outcome)| {
                        serde_json::json!({
                            "path": path.display().to_string(),
                            "status": match outcome {
                                CheckOutcome::Present => "present",
                                CheckOutcome::Missing => "missing",
                                CheckOutcome::Fixed => "fixed",
                            }
                        })
                    })
                    .collect::<Vec<_>>()
            });
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to serialize report: {}", e),
            }
        }
        _ => {
            // Summary format
            for (path, outcome) in &results {
                let status = match outcome {
                    CheckOutcome::Present => "ok     ",
                    CheckOutcome::Missing => "missing",
                    CheckOutcome::Fixed => "fixed  ",
                };
                println!("  {} {}", status, path.display());
            }
            println!();
            if missing == 0 && !errored {
                println!("[OK] All checked files carry the frozen string literal comment.");
            } else {
                println!(
                    "{} of {} files lack the frozen string literal comment.",
                    missing,
                    results.len()
                );
            }
        }
    }

    if errored || (fail_on_missing && missing > 0) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
