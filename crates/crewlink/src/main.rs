// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crewlink - real-time chat core for airline crew.
//!
//! This is the binary entry point for the Crewlink chat service.

mod serve;

use clap::{Parser, Subcommand};

/// Crewlink - real-time chat core for airline crew.
#[derive(Parser, Debug)]
#[command(name = "crewlink", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Crewlink chat server.
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match crewlink_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            crewlink_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            serve::init_tracing(&config.service.log_level);
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("crewlink: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            println!("service.name        = {}", config.service.name);
            println!("service.log_level   = {}", config.service.log_level);
            println!("gateway.host        = {}", config.gateway.host);
            println!("gateway.port        = {}", config.gateway.port);
            println!("storage.database    = {}", config.storage.database_path);
            println!("storage.wal_mode    = {}", config.storage.wal_mode);
            println!(
                "concierge.api_key   = {}",
                if config.concierge.api_key.is_some() {
                    "[configured]"
                } else {
                    "[not set]"
                }
            );
            println!("concierge.model     = {}", config.concierge.model);
        }
        None => {
            println!("crewlink: use --help for available commands");
        }
    }
}
