use clap::{Parser, Subcommand};

use crate::{
    auth::{LoginArgs, RegisterArgs},
    color::Color,
};

#[derive(Parser, Clone)]
#[command(name = "Corpus CLI", version, about = "Swecha corpus platform CLI", long_about = None)]
pub struct Cli {
    // Optional as a workaround for https://github.com/clap-rs/clap/issues/3572
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short = 'c', long, global = true, value_enum, default_value_t = Color::Auto)]
    pub color: Color,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    #[command(long_about = "Log into a user account.")]
    Login(LoginArgs),

    #[command(long_about = "Log out of the current user account.")]
    Logout,

    #[command(long_about = "Register a new user account.")]
    Register(RegisterArgs),

    #[command(long_about = "Show session and user information.")]
    Status,

    #[command(long_about = "Generate shell completions.")]
    Completion {
        #[arg(long, help = "The shell to generate completions for.")]
        shell: Option<clap_complete::Shell>,
    },
}
