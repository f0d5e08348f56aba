//! Condition tracker - command-line host.
//!
//! Stands in for the virtual tabletop: tokens come from a JSON file, flags
//! and settings live in SQLite, and every command prints JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use condtrack_domain::{ConditionAction, TokenId};
use condtrack_engine::infrastructure::{
    clock::SystemClock,
    flags::SqliteFlagRepo,
    memory::InMemoryTokenRepo,
    ports::ClockPort,
    settings::SqliteSettingsRepo,
};
use condtrack_engine::use_cases::HostUser;
use condtrack_engine::App;

/// Per-token buildup condition tracker
#[derive(Parser)]
#[command(name = "condtrack-engine")]
#[command(about = "Track buildup conditions on tabletop tokens", long_about = None)]
#[command(version)]
struct Cli {
    /// Act as a non-GM user
    #[arg(long, global = true)]
    player: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Show module settings and their metadata
    Settings,

    /// Restrict the tracker to GMs (true/false)
    SetGmOnly {
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },

    /// Replace the condition definition list with a JSON array
    SetDefinitions { json: String },

    /// Render the tracker panel for a token
    Show { token: String },

    /// Apply a panel action, e.g. '{"action":"inc","key":"frostbite"}'
    Act { token: String, action: String },

    /// Show the token HUD button for the current user
    Button,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsReport<'a> {
    module_id: &'a str,
    values: condtrack_domain::ModuleSettings,
    fields: Vec<condtrack_domain::SettingsFieldMetadata>,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "condtrack_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let db_path = std::env::var("CONDTRACK_DB").unwrap_or_else(|_| "condtrack.db".into());
    let tokens_path = std::env::var("CONDTRACK_TOKENS").ok();

    let app = open_app(&db_path, tokens_path.as_deref()).await?;
    let output = run(&app, user_for(cli.player), cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Wire SQLite storage and the token directory into an [`App`] and register
/// setting defaults.
async fn open_app(db_path: &str, tokens_path: Option<&str>) -> Result<App> {
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    tracing::debug!(db_path = %db_path, "Opening SQLite storage");
    let flags = SqliteFlagRepo::new(db_path, clock.clone())
        .await
        .context("opening flag storage")?;
    let settings = SqliteSettingsRepo::new(db_path, clock)
        .await
        .context("opening settings storage")?;
    let tokens = match tokens_path {
        Some(path) => InMemoryTokenRepo::from_json_file(path)
            .await
            .with_context(|| format!("loading tokens from {path}"))?,
        None => {
            tracing::warn!("CONDTRACK_TOKENS not set, no tokens available");
            InMemoryTokenRepo::new()
        }
    };

    let app = App::new(Arc::new(flags), Arc::new(settings), Arc::new(tokens));
    app.entities.settings.register_defaults().await?;
    Ok(app)
}

fn user_for(player: bool) -> HostUser {
    if player {
        HostUser::new("player", "Player", false)
    } else {
        HostUser::new("gamemaster", "Gamemaster", true)
    }
}

/// Execute one command and return what it prints.
async fn run(app: &App, user: HostUser, command: Command) -> Result<Value> {
    let output = match command {
        Command::Settings => {
            let settings = &app.entities.settings;
            serde_json::to_value(SettingsReport {
                module_id: condtrack_domain::MODULE_ID,
                values: settings.get().await?,
                fields: settings.metadata(),
            })?
        }
        Command::SetGmOnly { value } => {
            app.entities.settings.set_gm_only(value).await?;
            serde_json::to_value(app.entities.settings.get().await?)?
        }
        Command::SetDefinitions { json } => {
            let value: Value = serde_json::from_str(&json).context("definitions must be JSON")?;
            app.entities.settings.set_definitions(&value).await?;
            serde_json::to_value(app.entities.settings.definitions().await?)?
        }
        Command::Show { token } => {
            let panel = app.open_panel(user, &TokenId::from(token)).await?;
            serde_json::json!({
                "options": panel.options(),
                "view": panel.render().await?,
            })
        }
        Command::Act { token, action } => {
            let action: ConditionAction =
                serde_json::from_str(&action).context("action must be a JSON object")?;
            let panel = app.open_panel(user, &TokenId::from(token)).await?;
            let outcome = panel.handle(&action).await?;
            if let Some(warning) = &outcome.warning {
                tracing::warn!(%warning, "Action rejected");
            }
            serde_json::to_value(outcome)?
        }
        Command::Button => serde_json::to_value(app.hud_button(&user).await?)?,
    };
    Ok(output)
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
