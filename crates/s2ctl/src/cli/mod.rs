//! CLI structure and command definitions
//!
//! Defines the command-line interface using clap. Resource groups with many
//! subcommands live in their own modules; the small ones are defined here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ssclient::VolumeSpec;

pub mod domain;
pub mod network;
pub mod server;

pub use domain::*;
pub use network::*;
pub use server::*;

pub use crate::output::OutputFormat;

/// Serverspace cloud from the command line
#[derive(Parser, Debug)]
#[command(name = "s2ctl")]
#[command(version, about = "Command-line client for the Serverspace cloud")]
#[command(long_about = "
Command-line client for the Serverspace cloud

Manage servers, volumes, network interfaces, isolated networks, DNS domains
and SSH keys of a Serverspace project.

EXAMPLES:
    # Save an API key as a named context (the first one becomes current)
    s2ctl context create --name work --key 04f1d...

    # List servers as a table
    s2ctl server list -o table

    # Create a server and wait until it is ready
    s2ctl server create --name web --location am2 --image Debian-12-X64 \\
        --cpu 1 --ram 1G --volume 25G --public-network 50 --wait

    # Filter output with JMESPath
    s2ctl server list -o json -q '[?state==`Active`].id'

    # Use a key for one command without a context
    S2CTL_APIKEY=04f1d... s2ctl project show

For more help on a specific command, run:
    s2ctl <command> --help
")]
pub struct Cli {
    /// Path to an alternate configuration file
    #[arg(long, short = 'c', global = true, env = "S2CTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// API key to use instead of the current context's
    #[arg(
        long = "apikey",
        short = 'k',
        global = true,
        env = "S2CTL_APIKEY",
        hide_env_values = true
    )]
    pub apikey: Option<String>,

    /// API endpoint, overriding the one picked from the key
    #[arg(long, global = true, env = "S2CTL_HOST")]
    pub host: Option<String>,

    /// Show full error chains and debug logs
    #[arg(long, global = true, hide = true)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "yaml")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage virtual servers inside your project
    #[command(subcommand)]
    Server(ServerCommands),

    /// Manage isolated networks without Internet access
    #[command(subcommand)]
    Network(NetworkCommands),

    /// Manage DNS domains and their records
    #[command(subcommand)]
    Domain(DomainCommands),

    /// SSH keys management
    #[command(subcommand, name = "ssh-key")]
    SshKey(SshKeyCommands),

    /// Inspect and wait for long-running tasks
    #[command(subcommand)]
    #[command(long_about = "Inspect and wait for long-running tasks

Many actions (creating a server, resizing a volume, ...) run asynchronously
and return a task id straight away. Pass --wait to those commands, or use
'task wait' later, to block until the task finishes.")]
    Task(TaskCommands),

    /// Information about the project the API key belongs to
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Named API keys, one per project
    #[command(subcommand)]
    #[command(after_help = "EXAMPLES:
    # Create a context (prompts for the key when --key is omitted)
    s2ctl context create --name work --key 04f1d...

    # Switch between projects
    s2ctl context select home

    # Show which context is active
    s2ctl context show
")]
    Context(ContextCommands),

    /// Locations where data centers are available
    Locations,

    /// OS images available for new servers
    Images,

    /// Ansible integration
    #[command(subcommand)]
    Ansible(AnsibleCommands),

    /// Show version information
    Version,

    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    # Bash
    s2ctl completions bash > ~/.local/share/bash-completion/completions/s2ctl

    # Zsh
    s2ctl completions zsh > ~/.zfunc/_s2ctl
")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Shell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Friendly Interactive Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    /// Elvish
    Elvish,
}

/// Flags shared by every command that starts a task
#[derive(Args, Debug, Clone, Default)]
pub struct WaitArgs {
    /// Wait for the task to complete and print the resulting object
    #[arg(long)]
    pub wait: bool,

    /// Maximum time to wait in seconds (defaults to the operation's own limit)
    #[arg(long, value_name = "SECS", requires = "wait")]
    pub wait_timeout: Option<u64>,
}

/// SSH key commands
#[derive(Subcommand, Debug)]
pub enum SshKeyCommands {
    /// Create new key
    #[command(group(
        clap::ArgGroup::new("source")
            .required(true)
            .args(["public_key", "file"]),
    ))]
    Create {
        /// Name of new key
        #[arg(long)]
        name: String,

        /// Key value in OpenSSH format ("ssh-rsa AAAA..." or "ssh-ed25519 AAAA...")
        #[arg(long)]
        public_key: Option<String>,

        /// Read the key from this file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Display all SSH keys of the project
    List,

    /// Get information about a key
    Get {
        /// Key identifier
        key_id: i64,
    },

    /// Delete a key from project
    Delete {
        /// Key identifier
        key_id: i64,
    },
}

/// Task commands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Get information about a task
    Get {
        /// Task identifier
        task_id: String,
    },

    /// Poll a task until it completes or fails
    Wait {
        /// Task identifier
        task_id: String,

        /// Maximum time to wait in seconds
        #[arg(long, value_name = "SECS")]
        wait_timeout: Option<u64>,
    },
}

/// Project commands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Display the project whose API key is bound to the current context
    Show,
}

/// Context commands
#[derive(Subcommand, Debug)]
pub enum ContextCommands {
    /// Create new context with an API key obtained from the control panel
    Create {
        /// Name of the context
        #[arg(long, short)]
        name: String,

        /// API key (prompted for when omitted)
        #[arg(long, short)]
        key: Option<String>,

        /// Store the key in the OS keyring instead of the config file
        #[cfg(feature = "secure-storage")]
        #[arg(long)]
        use_keyring: bool,
    },

    /// Make a context active for all following commands
    Select {
        /// Name of the context
        name: String,
    },

    /// List all contexts
    List,

    /// Display which context is active
    Show,

    /// Delete a context
    Delete {
        /// Name of the context
        name: String,
    },
}

/// Ansible commands
#[derive(Subcommand, Debug)]
pub enum AnsibleCommands {
    /// Print an Ansible inventory of the project's servers, grouped by tag
    GetInventory,
}

/// Parse a size in MiB: `1024`, `1024M` or `1G`
pub fn parse_size(value: &str) -> Result<u64, String> {
    let Some(last) = value.chars().last() else {
        return Err("size must not be empty".to_string());
    };

    let (digits, multiplier) = match last.to_ascii_lowercase() {
        'm' => (&value[..value.len() - 1], 1),
        'g' => (&value[..value.len() - 1], 1024),
        c if c.is_ascii_digit() => (value, 1),
        c => return Err(format!("{c} wrong size suffix (available only m, g)")),
    };

    let size = digits
        .parse::<u64>()
        .map_err(|_| format!("invalid size '{value}'"))?;
    size
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size '{value}' is too large"))
}

/// Parse a volume as `[NAME:]SIZE`; without a name the volume is called `boot`
pub fn parse_volume(value: &str) -> Result<VolumeSpec, String> {
    let (name, size) = match value.rsplit_once(':') {
        Some((name, size)) => (name.to_string(), size),
        None => ("boot".to_string(), value),
    };
    Ok(VolumeSpec {
        name,
        size_mb: parse_size(size)?,
    })
}
