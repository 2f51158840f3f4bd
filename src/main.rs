use clap::Parser;
use reelstore::api::routes::router;
use reelstore::config::{Config, load_env_file};
use reelstore::movies::gateway::MovieGateway;
use reelstore::movies::memory::InMemoryMovieStore;
use reelstore::movies::mongo::MongoMovieStore;
use reelstore::movies::store::MovieStore;
use reelstore::reconcile::service::Reconciler;
use reelstore::reviews::gateway::ReviewGateway;
use reelstore::reviews::memory::InMemoryGraphStore;
use reelstore::reviews::neo4j::Neo4jGraphStore;
use reelstore::reviews::store::GraphStore;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

async fn open_stores(
    config: &Config,
) -> anyhow::Result<(Arc<dyn MovieStore>, Arc<dyn GraphStore>)> {
    if config.in_memory {
        tracing::warn!("Running on empty in-memory stores; nothing is persisted");
        let movies: Arc<dyn MovieStore> = Arc::new(InMemoryMovieStore::new());
        let reviews: Arc<dyn GraphStore> = Arc::new(InMemoryGraphStore::new());
        return Ok((movies, reviews));
    }

    let mongo = config.mongo()?;
    let movies: Arc<dyn MovieStore> = Arc::new(
        MongoMovieStore::connect(mongo.uri, mongo.database, mongo.collection).await?,
    );

    let graph = config.graph()?;
    let reviews: Arc<dyn GraphStore> = Arc::new(Neo4jGraphStore::connect(&graph).await?);

    Ok((movies, reviews))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    tracing::info!("Shutdown requested, draining connections");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = load_env_file(Path::new(".env"));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match env_file {
        Ok(Some(path)) => tracing::info!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("Ignoring .env file: {}", e),
    }

    let config = Config::parse();

    // 1. Store clients, created once and shared by every request:
    let (movie_store, graph_store) = open_stores(&config).await?;

    // 2. Services:
    let movies = Arc::new(MovieGateway::new(movie_store.clone()));
    let reviews = Arc::new(ReviewGateway::new(graph_store.clone()));
    let reconciler = Arc::new(Reconciler::new(movie_store, graph_store));

    // 3. HTTP Router:
    let app = router(movies, reviews, reconciler);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
