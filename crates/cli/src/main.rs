mod cli;
mod commands;
mod config;
mod error;
mod render;

use client::{ExpenseClient, Session};
use engine::Role;
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

fn session(settings: &AppConfig) -> Result<Session> {
    let role: Role = settings
        .role
        .parse()
        .map_err(|err: engine::EngineError| AppError::Usage(err.to_string()))?;
    let mut session = Session::new(role);
    if let Some(user_id) = settings.user_id {
        session = session.with_user_id(user_id);
    }
    if let Some(token) = settings.token.as_deref() {
        session = session.with_token(token);
    }
    Ok(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let (settings, cli) = config::load()?;

    let level = &settings.level;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(format!(
            "reimburse_cli={level},client={level}"
        )))
        .init();

    let client = ExpenseClient::new(&settings.base_url)?;
    let session = session(&settings)?;
    match commands::run(&client, &session, cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            tracing::error!("{err}");
            Err(err)
        }
    }
}
