use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dialoguer::Input;
use serde_json::Value;

use recipebook_cli::client::parse_payload;
use recipebook_cli::config::CONFIG_FILE;
use recipebook_cli::{ApiClient, CallConfig, Entity};

#[derive(Parser)]
#[command(name = "recipebook-cli")]
#[command(about = "Recipebook CLI - call the recipe service API", long_about = None)]
struct Cli {
    /// Path of the profile file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set API URL and token of the current profile
    Configure,
    /// Switch to another profile, creating it if needed
    SetProfile {
        /// Profile name (prompted if not provided)
        name: Option<String>,
    },
    /// Call the API for recipes or menus
    #[command(flatten)]
    Call(CallCommand),
}

#[derive(Subcommand)]
enum CallCommand {
    /// List one page of a collection
    List {
        entity: Entity,
        page: Option<u32>,
    },
    /// Fetch a single item
    Get { entity: Entity, id: i64 },
    /// Create an item from a JSON payload
    Add { entity: Entity, payload: String },
    /// Update an item from a JSON payload
    Update {
        entity: Entity,
        id: i64,
        payload: String,
    },
    /// Delete an item
    Delete { entity: Entity, id: i64 },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let stored = match CallConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    match cli.command {
        Commands::Configure => handle_configure(stored.unwrap_or_default(), &cli.config),
        Commands::SetProfile { name } => {
            handle_set_profile(stored.unwrap_or_default(), &cli.config, name)
        }
        Commands::Call(command) => {
            let Some(config) = stored else {
                eprintln!("❌ Call configure first");
                std::process::exit(1);
            };
            handle_call(&config, command).await
        }
    }
}

fn handle_configure(mut config: CallConfig, path: &Path) {
    println!("Profile {}", config.current_profile);
    let profile = config.profile_mut();

    let url: String = Input::new()
        .with_prompt(format!(
            "Enter API URL ({})",
            profile.url.as_deref().unwrap_or("-")
        ))
        .allow_empty(true)
        .interact_text()
        .unwrap_or_else(|e| fail(e));
    if !url.is_empty() {
        profile.url = Some(url);
    }

    let shown: String = profile
        .token
        .as_deref()
        .map(|t| format!("{}...", t.chars().take(10).collect::<String>()))
        .unwrap_or_else(|| "-".to_string());
    let token: String = Input::new()
        .with_prompt(format!("Enter token ({shown})"))
        .allow_empty(true)
        .interact_text()
        .unwrap_or_else(|e| fail(e));
    if !token.is_empty() {
        profile.token = Some(token);
    }

    match config.save(path) {
        Ok(()) => println!("✅ Profile {} saved", config.current_profile),
        Err(e) => fail(e),
    }
}

fn handle_set_profile(mut config: CallConfig, path: &Path, name: Option<String>) {
    let name = name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Enter profile name")
            .default(config.current_profile.clone())
            .interact_text()
            .unwrap_or_else(|e| fail(e))
    });

    config.switch_profile(&name);
    match config.save(path) {
        Ok(()) => println!("✅ Current profile is now {name}"),
        Err(e) => fail(e),
    }
}

async fn handle_call(config: &CallConfig, command: CallCommand) {
    let client = match config.profile().and_then(ApiClient::from_profile) {
        Ok(client) => client,
        Err(e) => fail(e),
    };

    let result = match command {
        CallCommand::List { entity, page } => client.get(&client.list_url(entity, page)).await,
        CallCommand::Get { entity, id } => client.get(&client.item_url(entity, id)).await,
        CallCommand::Add { entity, payload } => match parse_payload(&payload) {
            Ok(payload) => client.add(entity, &payload).await,
            Err(e) => Err(e),
        },
        CallCommand::Update {
            entity,
            id,
            payload,
        } => match parse_payload(&payload) {
            Ok(payload) => client.update(entity, id, &payload).await,
            Err(e) => Err(e),
        },
        CallCommand::Delete { entity, id } => client.delete(entity, id).await,
    };

    match result {
        Ok(body) => print_json(&body),
        Err(e) => fail(e),
    }
}

fn print_json(body: &Value) {
    match serde_json::to_string_pretty(body) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{body}"),
    }
}

fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("❌ Error: {error:#}");
    std::process::exit(1);
}
