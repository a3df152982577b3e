//! Storybell CLI - Webhook payload preview and delivery
//!
//! Format saved Clubhouse payloads locally, or send them to a running
//! relay, without wiring up a real webhook.

mod api;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use storybell::domain::entities::WebhookEvent;
use storybell::domain::value_objects::MemberDirectory;
use storybell::formatter::{EventFormatter, FormatterConfig};

use api::RelayClient;

#[derive(Parser)]
#[command(name = "storybell")]
#[command(about = "Storybell CLI - preview and send Clubhouse webhook payloads", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a saved payload locally and print the resulting message
    Preview {
        /// Path to a JSON file holding the webhook payload
        file: PathBuf,
        /// Channel to post into, without the leading `#`
        #[arg(short, long)]
        channel: Option<String>,
        /// Clubhouse workspace name for entity links
        #[arg(short, long, default_value = "workspace")]
        workspace: String,
        /// Member map TOML file ([members] uuid = "name")
        #[arg(short, long)]
        members: Option<PathBuf>,
        /// Print the raw message JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Send a saved payload to a running relay
    Send {
        /// Path to a JSON file holding the webhook payload
        file: PathBuf,
        /// Relay base URL (e.g., http://localhost:8080)
        #[arg(short, long)]
        url: String,
        /// Channel to post into, without the leading `#`
        #[arg(short, long)]
        channel: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview {
            file,
            channel,
            workspace,
            members,
            json,
        } => preview(&file, channel.as_deref(), &workspace, members.as_deref(), json),
        Commands::Send { file, url, channel } => send(&file, &url, channel.as_deref()).await,
    }
}

fn preview(
    file: &std::path::Path,
    channel: Option<&str>,
    workspace: &str,
    members: Option<&std::path::Path>,
    json: bool,
) -> Result<()> {
    let payload = fs::read_to_string(file)
        .with_context(|| format!("Failed to read payload from {:?}", file))?;
    let event: WebhookEvent =
        serde_json::from_str(&payload).with_context(|| format!("Failed to parse {:?}", file))?;

    let directory = match members {
        Some(path) => load_members(path)?,
        None => MemberDirectory::default(),
    };

    let formatter =
        EventFormatter::new(FormatterConfig::new(workspace).with_members(directory));
    let message = formatter.process(&event, channel);

    if json {
        println!("{}", serde_json::to_string_pretty(&message)?);
        return Ok(());
    }

    println!("{} {}", "username:".dimmed(), message.content.username.bold());
    if let Some(channel) = &message.content.channel {
        println!("{} {}", "channel: ".dimmed(), channel.cyan());
    }
    println!();
    println!("{}", message.content.text);
    for attachment in &message.content.attachments {
        if !attachment.title.is_empty() {
            println!();
            println!("{} {}", attachment.title.bold(), attachment.title_link.underline());
        } else if !attachment.text.is_empty() {
            println!();
            println!("{}", attachment.text.red());
        }
    }

    Ok(())
}

async fn send(file: &std::path::Path, url: &str, channel: Option<&str>) -> Result<()> {
    let payload = fs::read_to_string(file)
        .with_context(|| format!("Failed to read payload from {:?}", file))?;

    let client = RelayClient::new(url);
    let message = client.send_hook(&payload, channel).await?;

    println!("{}", "Relay answered:".green().bold());
    println!("{}", serde_json::to_string_pretty(&message)?);

    Ok(())
}

/// On-disk member map, same format the server reads.
#[derive(serde::Deserialize)]
struct MemberFile {
    #[serde(default)]
    members: HashMap<String, String>,
}

fn load_members(path: &std::path::Path) -> Result<MemberDirectory> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read member map from {:?}", path))?;
    let file: MemberFile =
        toml::from_str(&content).with_context(|| format!("Failed to parse member map {:?}", path))?;
    Ok(file.members.into_iter().collect())
}
