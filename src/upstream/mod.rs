//! Process-wide outbound connection pool
//!
//! The pool is built once at startup and handed to every service that talks
//! to the upstream API. It must be shut down explicitly before the process
//! exits so idle keep-alive sockets are released.

use std::time::Duration;

use reqwest::Client;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// How long an idle keep-alive connection is kept before being closed
    pub idle_timeout: Duration,
    pub max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_millis(1000),
            max_idle_per_host: 32,
            user_agent: concat!("pokedex-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Shared keep-alive pool backed by a `reqwest::Client`.
///
/// Clones of the inner client share the same connections. After
/// [`UpstreamPool::shutdown`] no new clients are handed out, so once in-flight
/// requests finish every pooled socket is dropped.
pub struct UpstreamPool {
    client: RwLock<Option<Client>>,
}

impl UpstreamPool {
    pub fn new(config: PoolConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(config.idle_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(config.user_agent)
            .build()?;

        tracing::debug!(
            idle_timeout_ms = config.idle_timeout.as_millis() as u64,
            max_idle_per_host = config.max_idle_per_host,
            "Upstream connection pool initialised"
        );

        Ok(Self {
            client: RwLock::new(Some(client)),
        })
    }

    /// Get a handle to the pooled client
    pub async fn client(&self) -> Result<Client> {
        self.client.read().await.clone().ok_or(Error::PoolClosed)
    }

    pub async fn is_closed(&self) -> bool {
        self.client.read().await.is_none()
    }

    /// Release the pool. Safe to call more than once.
    pub async fn shutdown(&self) {
        let released = self.client.write().await.take();
        if released.is_some() {
            tracing::info!("Upstream connection pool closed");
        }
    }
}
