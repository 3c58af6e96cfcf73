mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::matching::analysis::LexiconAnalyzer;
use crate::matching::extractor::SkillExtractor;
use crate::matching::offers::PgJobOfferSource;
use crate::matching::pipeline::MatchingPipeline;
use crate::matching::recognizer::{DocumentRecognizer, TesseractRecognizer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobfinder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    std::fs::create_dir_all(&config.upload_dir)?;
    info!("Upload directory: {}", config.upload_dir);

    // Heavyweight backends are built once and shared by every request
    let ocr = TesseractRecognizer::new(&config.tesseract_cmd, &config.ocr_language, config.ocr_gpu);
    let recognizer = Arc::new(DocumentRecognizer::new(Arc::new(ocr)));
    let analyzer = LexiconAnalyzer::new().with_technologies(&config.extra_technologies);
    let extractor = Arc::new(SkillExtractor::new(Arc::new(analyzer))?);
    let offers = Arc::new(PgJobOfferSource::new(db.clone()));
    let pipeline = MatchingPipeline::new(recognizer, extractor, offers, config.offer_limit);
    info!(
        "Matching pipeline ready (ocr language: {}, offer limit: {})",
        config.ocr_language, config.offer_limit
    );

    let state = AppState {
        db,
        config: config.clone(),
        pipeline: Arc::new(pipeline),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
