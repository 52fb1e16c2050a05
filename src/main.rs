//! Parking client CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                        PARKING CLIENT                          │
//!   │                                                                │
//!   │  ┌──────────┐    ┌──────────────────┐    ┌──────────────────┐  │
//!   │  │  config  │───▶│  ClientRegistry  │───▶│ admin / auth /   │──┼──▶ Backend
//!   │  └──────────┘    │ attach_auth_policy│    │ parking instances│  │
//!   │        │         └────────┬─────────┘    └──────────────────┘  │
//!   │        │                  │ get("access_token")                │
//!   │        │                  ▼                                    │
//!   │        │         ┌──────────────────┐                          │
//!   │        │         │ CredentialStore  │ (file or memory)         │
//!   │        │         └──────────────────┘                          │
//!   │        ▼                                                       │
//!   │  ┌──────────┐    ┌──────────────────┐                          │
//!   │  │RouteTable│───▶│    Dispatcher    │ path → view              │
//!   │  └──────────┘    └──────────────────┘                          │
//!   └───────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use reqwest::Method;

use parking_client::api::Session;
use parking_client::client::{ApiResponse, ClientRegistry, Payload};
use parking_client::config::{load_config, AppConfig};
use parking_client::observability::logging::init_logging;
use parking_client::routing::{Dispatcher, MemoryHistory, RouteTable};
use parking_client::storage::{CredentialStore, FileStore, MemoryStore};

#[derive(Parser)]
#[command(name = "parking-client")]
#[command(about = "Command-line client for the parking backend", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Credential store file (overrides `credentials.store_path`).
    #[arg(short, long, conflicts_with = "ephemeral")]
    store: Option<PathBuf>,

    /// Keep credentials in memory only; nothing is written to disk.
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a path on a client instance
    Get { client: String, path: String },
    /// DELETE a path on a client instance
    Delete { client: String, path: String },
    /// POST a JSON body to a path
    Post {
        client: String,
        path: String,
        #[arg(short, long)]
        data: Option<String>,
    },
    /// PUT a JSON body to a path
    Put {
        client: String,
        path: String,
        #[arg(short, long)]
        data: Option<String>,
    },
    /// PATCH a JSON body to a path
    Patch {
        client: String,
        path: String,
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Log in and store the access token
    Login { email: String, password: String },
    /// Log out and clear the stored token
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Resolve a navigation path to its view
    Resolve { path: String },
    /// List the navigation table
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    init_logging(&config.observability);

    let store_path = if cli.ephemeral {
        None
    } else {
        cli.store
            .clone()
            .or_else(|| config.credentials.resolved_store_path())
    };
    let persistent = store_path.is_some();
    let store: Arc<dyn CredentialStore> = match store_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Using file credential store");
            Arc::new(FileStore::new(path))
        }
        None => Arc::new(MemoryStore::new()),
    };

    match &cli.command {
        Commands::Resolve { path } => {
            let dispatcher = Dispatcher::new(
                Arc::new(RouteTable::from_config(&config.routes)),
                MemoryHistory::default(),
            );
            let render = dispatcher.navigate(path);
            match render.view {
                Some(view) => println!("{} -> {}", render.path, view),
                None => {
                    eprintln!("No route matches {}", render.path);
                    std::process::exit(1);
                }
            }
            return Ok(());
        }
        Commands::Routes => {
            for route in &config.routes {
                println!("{:<24} {}", route.path, route.view);
            }
            return Ok(());
        }
        _ => {}
    }

    let registry = ClientRegistry::from_config(&config, store)?;
    let session = Session::new(&registry);

    match cli.command {
        Commands::Get { client, path } => {
            send(&registry, &client, Method::GET, &path, None).await?;
        }
        Commands::Delete { client, path } => {
            send(&registry, &client, Method::DELETE, &path, None).await?;
        }
        Commands::Post { client, path, data } => {
            send(&registry, &client, Method::POST, &path, data).await?;
        }
        Commands::Put { client, path, data } => {
            send(&registry, &client, Method::PUT, &path, data).await?;
        }
        Commands::Patch { client, path, data } => {
            send(&registry, &client, Method::PATCH, &path, data).await?;
        }
        Commands::Login { email, password } => {
            let response = session.login(&email, &password).await?;
            println!("Logged in as {} ({})", response.user.email, response.user.role);
            if !persistent {
                eprintln!("Warning: credentials are held in memory and end with this process");
            }
        }
        Commands::Logout => {
            session.logout().await?;
            println!("Logged out");
        }
        Commands::Whoami => {
            let user = session.whoami().await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Resolve { .. } | Commands::Routes => {}
    }

    Ok(())
}

async fn send(
    registry: &ClientRegistry,
    client: &str,
    method: Method,
    path: &str,
    data: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = match data {
        Some(raw) => Payload::Json(serde_json::from_str(&raw)?),
        None => Payload::Empty,
    };

    match registry.get(client)?.execute(method, path, payload).await {
        Ok(response) => print_response(&response),
        Err(e) => {
            if e.is_auth_failure() {
                eprintln!("Not authorized; run `parking-client login` first");
            }
            Err(e.into())
        }
    }
}

fn print_response(response: &ApiResponse) -> Result<(), Box<dyn std::error::Error>> {
    match response.json::<serde_json::Value>() {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", response.text()),
    }
    Ok(())
}
