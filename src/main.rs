mod commands;
mod config;
mod file_store;
mod stdin_prompt;

use std::io;
use std::process::ExitCode;

use canvas::engine::EngineCore;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::{CliError, Command};
use crate::config::GlobalArgs;
use crate::file_store::FileStore;
use crate::stdin_prompt::StdinPrompt;

#[derive(Parser, Debug)]
#[command(name = "stickyboard", about = "Sticky-note canvases from the command line", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error[{}]: {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { global, command } = cli;
    tracing::debug!(store = %global.store_path.display(), key = %global.storage_key, viewport = %global.viewport, "starting");

    let mut core = EngineCore::new(FileStore::new(&global.store_path), global.persistence());
    core.set_viewport(global.viewport.width, global.viewport.height);

    let (assume_yes, answer) = match &command {
        Command::Delete { yes, .. } => (*yes, None),
        Command::New { name } => (false, name.clone()),
        _ => (false, None),
    };
    let mut prompt = StdinPrompt::terminal().assume_yes(assume_yes).with_answer(answer);

    let stdout = io::stdout();
    commands::run(command, &mut core, &mut prompt, &mut rand::rng(), &mut stdout.lock())
}
