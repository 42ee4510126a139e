//! `airwave session`: inspect or clear persisted workflow sessions.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::adapters::sqlite::{create_pool, init_schema, PoolConfig, SqliteStateRepository};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::config::Config;
use crate::domain::models::step::{step_catalog, StepId};
use crate::domain::models::workflow_state::PersistedWorkflow;
use crate::domain::ports::StateRepository;

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Show the persisted workflow session
    Show {
        /// Session key (defaults to the configured key)
        #[arg(long)]
        key: Option<String>,
    },
    /// Delete the persisted workflow session
    Clear {
        /// Session key (defaults to the configured key)
        #[arg(long)]
        key: Option<String>,
    },
}

#[derive(Debug, serde::Serialize)]
struct SessionShowOutput {
    key: String,
    snapshot: Option<PersistedWorkflow>,
}

impl CommandOutput for SessionShowOutput {
    fn to_human(&self) -> String {
        let Some(snapshot) = &self.snapshot else {
            return format!("No persisted session under key '{}'", self.key);
        };
        let step_label = StepId::from_index(snapshot.active_step)
            .map(|id| step_catalog()[id.index()].label)
            .unwrap_or("?");
        let mut lines = vec![
            format!("Session '{}' ({})", self.key, snapshot.session_id),
            format!(
                "  Active step: {} ({}/{})",
                step_label,
                snapshot.active_step + 1,
                step_catalog().len()
            ),
            format!(
                "  Brief: {}{}",
                snapshot
                    .brief_data
                    .as_ref()
                    .map_or("none", |b| b.title.as_str()),
                if snapshot.brief_confirmed {
                    " (confirmed)"
                } else {
                    ""
                }
            ),
            format!(
                "  Motivations: {} ({} selected)",
                snapshot.motivations.len(),
                snapshot.motivations.iter().filter(|m| m.selected).count()
            ),
            format!(
                "  Copy variations: {} ({} selected)",
                snapshot.copy_variations.len(),
                snapshot
                    .copy_variations
                    .iter()
                    .filter(|c| c.selected)
                    .count()
            ),
            format!("  Assets: {}", snapshot.selected_assets.len()),
        ];
        if let Some(template) = &snapshot.selected_template {
            lines.push(format!("  Template: {template}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
struct SessionClearOutput {
    key: String,
}

impl CommandOutput for SessionClearOutput {
    fn to_human(&self) -> String {
        format!("Cleared persisted session under key '{}'", self.key)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SessionArgs, config: &Config, json: bool) -> Result<()> {
    let pool = create_pool(
        &format!("sqlite:{}", config.database.path),
        Some(PoolConfig {
            max_connections: config.database.max_connections,
            ..PoolConfig::default()
        }),
    )
    .await
    .context("failed to open session database")?;
    init_schema(&pool)
        .await
        .context("failed to initialize session schema")?;
    let repo = SqliteStateRepository::new(pool);

    match args.command {
        SessionCommands::Show { key } => {
            let key = key.unwrap_or_else(|| config.session_key.clone());
            let snapshot = repo
                .load(&key)
                .await
                .context("failed to load persisted session")?;
            output(&SessionShowOutput { key, snapshot }, json);
        }
        SessionCommands::Clear { key } => {
            let key = key.unwrap_or_else(|| config.session_key.clone());
            repo.clear(&key)
                .await
                .context("failed to clear persisted session")?;
            output(&SessionClearOutput { key }, json);
        }
    }
    Ok(())
}
