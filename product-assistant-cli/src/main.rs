//! Product assistant binary: parses the question, runs the agent and prints the answer.

use std::path::PathBuf;

use clap::Parser;
use product_assistant_cli::{init_tracing, run_with_options, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "product-assistant")]
#[command(about = "Ask about product prices, reviews and ratings; answers come from the catalog or the web")]
struct Args {
    /// Question (can also be given as positional arguments)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Session id for checkpoints (default: THREAD_ID or "default")
    #[arg(long)]
    session: Option<String>,

    /// JSON catalog to load into the product index (default: CATALOG_PATH)
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Wall-clock limit in seconds, 0 for none (default: RUN_TIMEOUT_SECS or 60)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log node enter/exit and debug events to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Question, when -m/--message is not used
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,
}

fn get_message(args: &Args) -> Option<String> {
    if let Some(ref m) = args.message {
        return Some(m.clone());
    }
    let joined = args.rest.join(" ").trim().to_string();
    (!joined.is_empty()).then_some(joined)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let Some(input) = get_message(&args) else {
        eprintln!("error: no question given; pass it with -m or as arguments");
        std::process::exit(2);
    };

    let options = RunOptions {
        session: args.session.clone(),
        catalog: args.catalog.clone(),
        timeout_secs: args.timeout,
        verbose: args.verbose,
    };

    match run_with_options(&input, &options).await {
        Ok(answer) => println!("{}", answer),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
