use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use s2ctl_core::config::Config;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;
mod shape;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::S2ctlError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose, cli.debug);

    if let Err(e) = run(&cli).await {
        if cli.debug {
            // Full error chain, unformatted
            return Err(e.into());
        }
        e.print_diagnostic();
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(cli: &Cli) -> Result<(), S2ctlError> {
    // Load configuration from specified path or default location
    let (config, config_path) = if let Some(path) = &cli.config {
        debug!("Loading config from explicit path: {:?}", path);
        (Config::load_from_path(path)?, Some(path.clone()))
    } else {
        debug!("Loading config from default location");
        (Config::load()?, None)
    };

    let mut conn_mgr = ConnectionManager::new(config)
        .with_config_path(config_path)
        .with_api_key(cli.apikey.clone())
        .with_host(cli.host.clone());

    execute_command(cli, &mut conn_mgr).await
}

fn init_tracing(verbose: u8, debug: bool) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let verbose = if debug { verbose.max(2) } else { verbose };
        let level = match verbose {
            0 => "s2ctl=warn,s2ctl_core=warn,ssclient=warn",
            1 => "s2ctl=info,s2ctl_core=info,ssclient=info",
            2 => "s2ctl=debug,s2ctl_core=debug,ssclient=debug",
            _ => "s2ctl=trace,s2ctl_core=trace,ssclient=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &mut ConnectionManager) -> Result<(), S2ctlError> {
    info!("Command: {}", format_command(&cli.command));

    let output_format = cli.output;
    let query = cli.query.as_deref();

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            debug!("Showing version information");
            match output_format {
                cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    output::print_output(&output_data, output_format, None)?;
                }
                cli::OutputFormat::Table => {
                    println!("s2ctl {}", env!("CARGO_PKG_VERSION"));
                }
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }

        Commands::Context(cmd) => {
            commands::context::handle_context_command(conn_mgr, cmd, output_format, query)
        }
        Commands::Server(cmd) => {
            commands::server::handle_server_command(conn_mgr, cmd, output_format, query).await
        }
        Commands::Network(cmd) => {
            commands::network::handle_network_command(conn_mgr, cmd, output_format, query).await
        }
        Commands::Domain(cmd) => {
            commands::domain::handle_domain_command(conn_mgr, cmd, output_format, query).await
        }
        Commands::SshKey(cmd) => {
            commands::ssh_key::handle_ssh_key_command(conn_mgr, cmd, output_format, query).await
        }
        Commands::Task(cmd) => {
            commands::task::handle_task_command(conn_mgr, cmd, output_format, query).await
        }
        Commands::Project(cmd) => {
            commands::project::handle_project_command(conn_mgr, cmd, output_format, query).await
        }
        Commands::Locations => commands::metainfo::handle_locations(conn_mgr, output_format, query).await,
        Commands::Images => commands::metainfo::handle_images(conn_mgr, output_format, query).await,
        Commands::Ansible(cmd) => {
            commands::ansible::handle_ansible_command(conn_mgr, cmd, query).await
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Generate shell completions
fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without sensitive data)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Context(cmd) => {
            use cli::ContextCommands::*;
            match cmd {
                Create { name, .. } => format!("context create {} [key redacted]", name),
                Select { name } => format!("context select {}", name),
                List => "context list".to_string(),
                Show => "context show".to_string(),
                Delete { name } => format!("context delete {}", name),
            }
        }
        Commands::Server(cmd) => format!("server {:?}", cmd),
        Commands::Network(cmd) => format!("network {:?}", cmd),
        Commands::Domain(cmd) => format!("domain {:?}", cmd),
        Commands::SshKey(cmd) => {
            use cli::SshKeyCommands::*;
            match cmd {
                Create { name, file, .. } => match file {
                    Some(path) => format!("ssh-key create {} --file {}", name, path.display()),
                    None => format!("ssh-key create {}", name),
                },
                other => format!("ssh-key {:?}", other),
            }
        }
        Commands::Task(cmd) => format!("task {:?}", cmd),
        Commands::Project(cmd) => format!("project {:?}", cmd),
        Commands::Locations => "locations".to_string(),
        Commands::Images => "images".to_string(),
        Commands::Ansible(cmd) => format!("ansible {:?}", cmd),
    }
}
