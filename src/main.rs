use std::io;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use spotube_plugin_spotify::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

/// Logs go to stderr so command output stays pipeable. `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name = "spotube-spotify",
  bin_name = "spotube-spotify",
  author = env!("CARGO_PKG_AUTHORS"),
  about = env!("CARGO_PKG_DESCRIPTION"),
  styles = styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage the Spotify web player session
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Check for a newer plugin release
    Update(UpdateOptions),

    /// Print the support text
    Support,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Log in through the browser
    Login,

    /// Forget the stored session
    Logout,

    /// Get a fresh access token from the stored cookies
    Refresh,

    /// Show the stored session
    Status,

    /// Print the current access token
    Token,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateOptions {
    /// Version to compare against (defaults to this build)
    #[clap(long)]
    current: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(AuthCommand::Login) => cli::login().await,
        Command::Auth(AuthCommand::Logout) => cli::logout().await,
        Command::Auth(AuthCommand::Refresh) => cli::refresh().await,
        Command::Auth(AuthCommand::Status) => cli::status().await,
        Command::Auth(AuthCommand::Token) => cli::token().await,
        Command::Update(opt) => cli::update(opt.current).await,
        Command::Support => cli::support(),
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut io::stdout())
        }
    }
}
