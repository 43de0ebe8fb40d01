use std::{env, path::PathBuf};
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/polls.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    /// Raw `token=user[:Display Name]` list, comma separated.
    pub session_tokens: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: port_from(env::var("PORT").ok()),
            data_path: env::var("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
            session_tokens: env::var("APP_SESSION_TOKENS").unwrap_or_default(),
        }
    }
}

fn port_from(value: Option<String>) -> u16 {
    let Some(value) = value else {
        info!("PORT not set, using default: {DEFAULT_PORT}");
        return DEFAULT_PORT;
    };
    value.trim().parse().unwrap_or_else(|err| {
        warn!("invalid PORT value {value:?}: {err}, using default: {DEFAULT_PORT}");
        DEFAULT_PORT
    })
}
