use crate::api::{ApiClient, ApiTransport};
use crate::commands::CommandContext;
use crate::config::Config;
use crate::error::Error;
use crate::repository::{CacheStore, InMemoryStore, RedisStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        // stdout carries command output
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Pick the fallback cache: Redis when configured and reachable, memory otherwise
pub async fn build_store(config: &Config) -> Arc<dyn CacheStore> {
    let Some(redis_url) = &config.redis_url else {
        info!("No Redis configured, using in-memory fallback cache");
        return Arc::new(InMemoryStore::default());
    };

    let redis = match RedisStore::new(redis_url) {
        Ok(redis) => redis,
        Err(e) => {
            warn!("Redis unusable, using in-memory fallback cache: {:?}", e);
            return Arc::new(InMemoryStore::default());
        }
    };
    match redis.ping().await {
        Ok(()) => Arc::new(redis),
        Err(e) => {
            warn!("Redis not reachable, using in-memory fallback cache: {:?}", e);
            Arc::new(InMemoryStore::default())
        }
    }
}

/// Wire the API client and cache into a command context
pub async fn build_context(config: Arc<RwLock<Config>>) -> miette::Result<CommandContext> {
    let (transport, store) = {
        let config_read = config.read().await;
        let transport: Arc<dyn ApiTransport> = Arc::new(ApiClient::new(&config_read)?);
        (transport, build_store(&config_read).await)
    };

    Ok(CommandContext::new(config, transport, store))
}
