use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use settee_core::{Config, DocResult, Staleness};
use settee_rs::Client;
use std::path::Path;

mod telemetry;

/// Command-line access to a CouchDB-style document server
#[derive(Debug, Parser)]
#[command(name = "settee", version, about)]
struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, default_value = "settee.json")]
    config: String,

    /// Database to use instead of the configured one
    #[arg(short, long)]
    database: Option<String>,

    /// Log request details
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the server welcome document
    Info,
    /// Fetch a document
    Get { id: String },
    /// Create a document from a JSON file, under a server-generated id unless --id is given
    Create {
        #[arg(long)]
        id: Option<String>,
        file: String,
    },
    /// Update a document from a JSON file; without --id the file's "_id" is used
    Update {
        #[arg(long)]
        id: Option<String>,
        file: String,
    },
    /// Delete one revision of a document
    Delete { id: String, rev: String },
    /// Ask the server for fresh ids
    Uuids {
        #[arg(long, default_value_t = 1)]
        count: i64,
    },
    /// Fetch an attachment
    Attachment {
        id: String,
        name: String,
        #[arg(long)]
        rev: Option<String>,
    },
    /// Query a view for a single key
    View {
        design: String,
        view: String,
        key: String,
        #[arg(long, default_value = "ok")]
        stale: Staleness,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;

    let guard = telemetry::init_telemetry(config.log_dir.as_deref(), cli.verbose)?;
    if !Path::new(&cli.config).exists() {
        tracing::debug!("No config at {}, using defaults", cli.config);
    }

    tracing::debug!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        authenticated = config.credentials().is_some(),
        "settee starting"
    );

    let client = Client::from_config(&config)?;
    let ok = run(&client, cli.command).await?;

    if !ok {
        // exit skips destructors, flush the file log first
        drop(guard);
        std::process::exit(1);
    }
    Ok(())
}

/// Config from the `--config` file, or defaults when the file does not exist.
///
/// A file that exists but does not parse is an error, so configured
/// credentials are never silently dropped.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_if_exists(&cli.config)?.unwrap_or_default();
    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    Ok(config)
}

/// Run one command, printing the response body. Returns false on an error result.
async fn run(client: &Client, command: Command) -> Result<bool> {
    let result = match command {
        Command::Info => client.server_info().await?,
        Command::Get { id } => client.get(&id).await?,
        Command::Create { id, file } => {
            let json = read_json(&file)?;
            match id {
                Some(id) => client.create(&json, &id).await?,
                None => client.create_generate(&json).await?,
            }
        }
        Command::Update { id, file } => {
            let json = read_json(&file)?;
            client.update(&json, id.as_deref()).await?
        }
        Command::Delete { id, rev } => client.destroy(&id, &rev).await?,
        Command::Uuids { count } => {
            println!("{}", client.fetch_uuids(count).await?);
            return Ok(true);
        }
        Command::Attachment { id, name, rev } => {
            client.get_attachment(&id, &name, rev.as_deref()).await?
        }
        Command::View {
            design,
            view,
            key,
            stale,
        } => client.query_view(&design, &view, &key, stale).await?,
    };

    Ok(report(&result))
}

fn read_json(path: &str) -> Result<String> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    // Fail early on files that are not JSON at all
    serde_json::from_str::<serde_json::Value>(&json)
        .with_context(|| format!("{} is not valid JSON", path))?;
    Ok(json)
}

fn report(result: &DocResult) -> bool {
    match result {
        DocResult::Ok(reply) => {
            println!("{}", reply.body);
            true
        }
        DocResult::Error(reply) => {
            tracing::error!(status = reply.status, "Request failed");
            println!("{}", reply.body);
            false
        }
    }
}
