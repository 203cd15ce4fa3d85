#![doc = include_str!("../README.md")]

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use color_eyre::eyre::Result;
use corpus_core::Client;
use tracing_subscriber::{
    EnvFilter, prelude::__tracing_subscriber_SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::command::{Cli, Commands};

mod auth;
mod color;
mod command;
mod platform;
mod prompts;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // the log level hierarchy is determined by:
    //    - if RUST_LOG is detected at runtime
    //    - if RUST_LOG is provided at compile time
    //    - default to INFO
    let filter = EnvFilter::builder()
        .with_default_directive(
            option_env!("RUST_LOG")
                .unwrap_or("info")
                .parse()
                .expect("should provide valid log level at compile time."),
        )
        // parse directives from the RUST_LOG environment variable,
        // overriding the default directive for matching targets.
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    color::install_color_eyre(cli.color)?;

    let Some(command) = cli.command else {
        let mut cmd = Cli::command();
        cmd.print_help()?;
        return Ok(());
    };

    if let Commands::Completion { shell } = &command {
        let Some(shell) = (*shell).or_else(Shell::from_env) else {
            println!(
                "Couldn't autodetect a valid shell. Run `corpus completion --help` for more info."
            );
            return Ok(());
        };

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    process_commands(command).await
}

async fn process_commands(command: Commands) -> Result<()> {
    let client = Client::new(None);
    client.register_client_managed(platform::state::session_store());

    // Settle the persisted session before any command runs, like the web
    // client does on page load.
    client.restore_session().await;

    match command {
        Commands::Login(args) => auth::login(client, args).await,
        Commands::Logout => auth::logout(client).await,
        Commands::Register(args) => auth::register(client, args).await,
        Commands::Status => auth::status(&client),
        Commands::Completion { .. } => unreachable!("handled before session setup"),
    }
}
