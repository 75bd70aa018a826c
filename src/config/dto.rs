use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub db_path: String,
    pub template_dir: String,
    pub fixture_path: Option<String>,
}
