//! Root CLI structure for quake-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quake-rs")]
#[command(about = "Command-line tools for Quake II skins and models", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// PCX skin operations
    #[cfg(feature = "pcx")]
    Pcx {
        #[command(subcommand)]
        command: crate::commands::pcx::PcxCommands,
    },

    /// MD2 model operations
    #[cfg(feature = "md2")]
    Md2 {
        #[command(subcommand)]
        command: crate::commands::md2::Md2Commands,
    },

    /// Player directory operations (model plus skins)
    #[cfg(feature = "player")]
    Player {
        #[command(subcommand)]
        command: crate::commands::player::PlayerCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
