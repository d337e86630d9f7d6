use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bus_router::graph::{GraphCache, GraphCacheConfig};
use bus_router::planner::SearchConfig;
use bus_router::repository::{CachedRepository, RepositoryCacheConfig, feed};
use bus_router::web::{AppState, create_router};

/// Default bind address.
const DEFAULT_ADDR: &str = "0.0.0.0:5000";

/// Settings read from the environment at startup.
struct ServerConfig {
    data_dir: PathBuf,
    graph_cache: GraphCacheConfig,
    use_cache: bool,
    addr: SocketAddr,
}

impl ServerConfig {
    fn from_env() -> Self {
        let data_dir = std::env::var("BUS_ROUTER_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let graph_cache = std::env::var("BUS_ROUTER_GRAPH_CACHE")
            .map(GraphCacheConfig::new)
            .unwrap_or_default();
        let use_cache = std::env::var_os("BUS_ROUTER_REBUILD_GRAPH").is_none();
        let addr = std::env::var("BUS_ROUTER_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .expect("BUS_ROUTER_ADDR is not a valid socket address");

        Self {
            data_dir: PathBuf::from(data_dir),
            graph_cache,
            use_cache,
            addr,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();

    // Fail fast if the feed is unavailable
    let memory = feed::load_dir(&config.data_dir).expect("Failed to load bus feed");
    let repository = CachedRepository::new(memory, &RepositoryCacheConfig::default());

    let graph = GraphCache::new(config.graph_cache)
        .load_or_build(&repository, config.use_cache)
        .expect("Failed to build connectivity graph");
    info!(
        stops = repository.inner().len(),
        services = repository.inner().service_count(),
        graph_stops = graph.node_count(),
        graph_edges = graph.edge_count(),
        "Network ready"
    );

    let state = AppState::new(repository, graph, SearchConfig::default());
    let app = create_router(state);

    info!(addr = %config.addr, "Bus route finder listening");
    info!("  GET /health                                   - Health check");
    info!("  GET /api/stops                                - All stops");
    info!("  GET /api/paths?origin=&destination=&criterion= - Ranked itineraries");
    info!("  GET /api/path?path=A+B+C&distance=            - Itineraries along a path");

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
