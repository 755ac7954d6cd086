//! Command line surface.

use std::path::PathBuf;

use ce_core::SyncSwitch;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "clipeditor", version)]
#[command(about = "Edit the clipboard as a label + content pair, mirrored both ways")]
pub struct Cli {
    /// TOML config file (`[storage] settings_path`, `[logging] filter`)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Mirror a process-local store instead of the system clipboard
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pull the clipboard into the fields and print them
    Show,

    /// Type into the fields; pushing follows the local-edit switch and delay
    Edit {
        #[arg(short, long)]
        label: Option<String>,
        #[arg(short = 't', long)]
        content: Option<String>,
    },

    /// Write a pair to the clipboard regardless of the sync switches
    Push {
        content: String,
        #[arg(short, long, default_value = "")]
        label: String,
    },

    /// Empty the clipboard
    Clear,

    /// Start a session with an explicit pair and print the resulting pair as JSON
    Open {
        content: String,
        #[arg(short, long, default_value = "")]
        label: String,
    },

    /// Mirror live: print clipboard changes, replace the content with each stdin line
    Watch {
        /// Stop after this many dispatched events
        #[arg(long)]
        max_events: Option<usize>,
    },

    /// Read or change the sync settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the settings as JSON
    Get,

    /// Turn one switch on or off, e.g. `set sync_on_focus_lost true`
    Set {
        switch: SyncSwitch,
        #[arg(action = ArgAction::Set)]
        value: bool,
    },

    /// Set the push debounce delay in milliseconds (0 pushes on every keystroke)
    Delay { ms: u64 },
}
