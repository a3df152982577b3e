//! Relay configuration
//!
//! Loaded from the environment (with dotenvy); the member map lives in a
//! small TOML file so display names can be edited without a rebuild.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use storybell::domain::value_objects::MemberDirectory;
use storybell::formatter::FormatterConfig;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address to bind the HTTP listener to
    pub bind_addr: String,
    /// Clubhouse workspace name, used to build entity links
    pub workspace_name: String,
    /// Secret for verifying the Clubhouse-Signature header; unset skips
    /// verification
    pub signing_secret: Option<String>,
    /// Rocket.Chat incoming webhook URL for direct delivery; unset means
    /// the relay only answers with the formatted message
    pub rocketchat_url: Option<String>,
    /// Path to the member map TOML file
    pub member_map_path: Option<PathBuf>,
    /// Whether @all mentions are permitted
    pub mention_all_allowed: bool,
}

/// On-disk member map: `[members]` table of uuid = "name" pairs.
#[derive(Debug, Deserialize)]
struct MemberFile {
    #[serde(default)]
    members: std::collections::HashMap<String, String>,
}

impl RelayConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let workspace_name = std::env::var("STORYBELL_WORKSPACE")
            .context("STORYBELL_WORKSPACE must name the Clubhouse workspace")?;

        Ok(Self {
            bind_addr: std::env::var("STORYBELL_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            workspace_name,
            signing_secret: std::env::var("STORYBELL_SIGNING_SECRET").ok(),
            rocketchat_url: std::env::var("STORYBELL_ROCKETCHAT_URL").ok(),
            member_map_path: std::env::var("STORYBELL_MEMBERS").ok().map(PathBuf::from),
            mention_all_allowed: std::env::var("STORYBELL_MENTION_ALL")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    /// Load the member directory, empty when no file is configured.
    pub fn load_members(&self) -> Result<MemberDirectory> {
        match &self.member_map_path {
            Some(path) => load_member_file(path),
            None => Ok(MemberDirectory::default()),
        }
    }

    /// Build the formatter configuration from this relay configuration.
    pub fn formatter_config(&self) -> Result<FormatterConfig> {
        Ok(FormatterConfig::new(&self.workspace_name)
            .with_members(self.load_members()?)
            .with_mention_all(self.mention_all_allowed))
    }
}

fn load_member_file(path: &Path) -> Result<MemberDirectory> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read member map from {:?}", path))?;

    let file: MemberFile =
        toml::from_str(&content).with_context(|| format!("Failed to parse member map {:?}", path))?;

    Ok(file.members.into_iter().collect())
}
