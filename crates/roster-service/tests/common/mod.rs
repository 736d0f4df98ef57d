//! Redis test container shared by the integration tests.

use deadpool_redis::{Config, Pool, Runtime};
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::{Redis, REDIS_PORT};

/// A throwaway Redis server with a connection pool.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    pool: Arc<Pool>,
}

impl TestRedis {
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get Redis port");

        let pool = Config::from_url(format!("redis://127.0.0.1:{port}"))
            .create_pool(Some(Runtime::Tokio1))
            .expect("Failed to create Redis pool");

        Self {
            _container: container,
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> Arc<Pool> {
        Arc::clone(&self.pool)
    }

    /// Remaining lifetime of `key` in seconds, as reported by `TTL`.
    pub async fn ttl(&self, key: &str) -> i64 {
        let mut conn = self.pool.get().await.expect("Redis connection");
        redis::cmd("TTL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .expect("TTL failed")
    }
}
