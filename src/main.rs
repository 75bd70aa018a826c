use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use polls_web::config::load_config;
use polls_web::core::error::AppError;
use polls_web::features::polls::{
    PollViews, QuestionStore, ResponseRenderer, SledQuestionStore, TeraRenderer, load_fixture,
};
use polls_web::server::{AppState, build_router};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let config = load_config()?;

    let sled_db = sled::open(&config.db_path).map_err(|err| {
        AppError::storage(format!(
            "failed to open sled database at {}: {err}",
            config.db_path
        ))
    })?;
    let store: Arc<dyn QuestionStore> = Arc::new(SledQuestionStore::open(&sled_db)?);

    if let Some(fixture_path) = &config.fixture_path {
        load_fixture(store.as_ref(), Path::new(fixture_path)).await?;
    }

    let renderer: Arc<dyn ResponseRenderer> = Arc::new(TeraRenderer::new(&config.template_dir)?);
    let views = Arc::new(PollViews::new(store, renderer));
    let app = build_router(AppState::new(views));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "starting server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::internal(format!("failed to bind: {err}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::internal(format!("server error: {err}")))?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with_target(false)
        .init();
}
