use std::env;

use crate::config::dto::AppConfig;
use crate::core::error::AppError;

const DEFAULT_PORT: &str = "8000";
const DEFAULT_DB_PATH: &str = "./data/polls.sled";
const DEFAULT_TEMPLATE_DIR: &str = "./templates";

pub fn load_config() -> Result<AppConfig, AppError> {
    dotenvy::dotenv().ok();

    let port = env::var("POLLS_PORT")
        .or_else(|_| env::var("PORT"))
        .unwrap_or_else(|_| DEFAULT_PORT.to_string());
    let port = parse_port(&port)?;

    let db_path = parse_string_env("POLLS_DB_PATH", DEFAULT_DB_PATH);
    let template_dir = parse_string_env("POLLS_TEMPLATE_DIR", DEFAULT_TEMPLATE_DIR);
    let fixture_path = env::var("POLLS_FIXTURE_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty());

    Ok(AppConfig {
        port,
        db_path,
        template_dir,
        fixture_path,
    })
}

fn parse_port(value: &str) -> Result<u16, AppError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|err| AppError::configuration(format!("invalid port {value:?}: {err}")))
}

fn parse_string_env(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
