use anyhow::{Context, Result};

use super::{
    config_model::{Database, DotEnvyConfig, Server},
    stage::Stage,
};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: required("SERVER_PORT")?
            .parse()
            .context("SERVER_PORT is invalid")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .context("DATABASE_MAX_CONNECTIONS is invalid")?,
        _ => DEFAULT_MAX_CONNECTIONS,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
        max_connections,
    };

    Ok(DotEnvyConfig { server, database })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or_default();
    Stage::try_from(&stage_str).unwrap_or_default()
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} is missing"))
}
