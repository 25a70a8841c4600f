use axum::serve;
use interfaces_instagram_media::index::{media_feed_url, BuildMediaFeedUrlError};
use projects_history::{
	config::{Config, ConfigError},
	db::{create_pool, CreatePoolError},
	endpoints::router,
	state::AppState,
};
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};
use utils_trace::init as tracing_init;

#[derive(Debug, Error)]
pub enum MainError {
	#[error("Config: {source}")]
	Config {
		#[source]
		source: ConfigError,
	},
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("MediaFeedUrl: {source}")]
	MediaFeedUrl {
		#[source]
		source: BuildMediaFeedUrlError,
	},
	#[error("HttpClient: {source}")]
	HttpClient {
		#[source]
		source: reqwest::Error,
	},
	#[error("CreatePool: {source}")]
	CreatePool {
		#[source]
		source: CreatePoolError,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	}
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	let config = Config::from_env()
		.map_err(|source| MainError::Config { source })?;

	tracing_init(&config.log_level, config.log_format)
		.map_err(|source| MainError::TracingInit { source })?;

	let feed_url = media_feed_url(&config.feed_base_url, &config.api_token)
		.map_err(|source| MainError::MediaFeedUrl { source })?;

	let client = Client::builder()
		.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
		.build()
		.map_err(|source| MainError::HttpClient { source })?;

	let pool = create_pool(&config.database_url, config.pool_size)
		.map_err(|source| MainError::CreatePool { source })?;

	let app = router(AppState::new(pool, client, feed_url));

	let listener = tokio::net::TcpListener::bind(config.bind_addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}", config.bind_addr);

	serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.map_err(|source| MainError::Serve { source })?;

	info!("Server stopped");

	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		warn!("Failed to listen for ctrl-c: {err}");
		std::future::pending::<()>().await;
	}
}
