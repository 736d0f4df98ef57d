//! Dependency injection module using Shaku.
//!
//! `RosterModule` wires the MySQL store, the response cache and the employee
//! service. The cache component is chosen by `cache.backend`: Redis uses the
//! registered `RedisCacheService`, the other backends override it.

use deadpool_redis::{Config as RedisPoolConfig, PoolConfig, Runtime};
use roster_config::{AppConfig, CacheBackend, CacheConfig, RedisConfig};
use roster_core::{HasComponent, RosterError, RosterResult};
use roster_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, MySqlEmployeeStore,
};
use roster_service::{
    CacheInterface, CachePolicy, EmployeeService, EmployeeServiceImpl,
    EmployeeServiceImplParameters, InMemoryCache, RedisCacheService, RedisCacheServiceParameters,
};
use shaku::module;
use sqlx::mysql::MySqlPool;
use std::sync::Arc;
use tracing::info;

module! {
    pub RosterModule {
        components = [
            DatabasePool,
            MySqlEmployeeStore,
            RedisCacheService,
            EmployeeServiceImpl,
        ],
        providers = [],
    }
}

/// Connects the backing services and builds the module.
pub async fn build_module(config: &AppConfig) -> RosterResult<Arc<RosterModule>> {
    let db_pool = DatabasePool::connect(&config.database).await?;

    let redis_pool = match config.cache.backend {
        CacheBackend::Redis => Some(create_redis_pool(&config.redis)?),
        CacheBackend::Memory | CacheBackend::Disabled => None,
    };

    Ok(Arc::new(assemble_module(db_pool.into_inner(), &config.cache, redis_pool)))
}

/// Builds the module from already-created pools.
pub fn assemble_module(
    pool: MySqlPool,
    cache: &CacheConfig,
    redis_pool: Option<Arc<deadpool_redis::Pool>>,
) -> RosterModule {
    info!(
        "Cache backend: {:?}, ttl: {}s, invalidation: {:?}",
        cache.backend, cache.ttl_secs, cache.invalidation
    );

    let builder = RosterModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters { pool })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: redis_pool,
        })
        .with_component_parameters::<EmployeeServiceImpl>(EmployeeServiceImplParameters {
            policy: CachePolicy::from(cache),
        });

    match cache.backend {
        CacheBackend::Redis => builder.build(),
        CacheBackend::Memory => builder
            .with_component_override::<dyn CacheInterface>(Box::new(InMemoryCache::new()))
            .build(),
        CacheBackend::Disabled => builder
            .with_component_override::<dyn CacheInterface>(Box::new(RedisCacheService::disabled()))
            .build(),
    }
}

fn create_redis_pool(config: &RedisConfig) -> RosterResult<Arc<deadpool_redis::Pool>> {
    let mut pool_config = RedisPoolConfig::from_url(&config.url);
    pool_config.pool = Some(PoolConfig::new(config.pool_size as usize));

    let pool = pool_config
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| RosterError::cache(format!("Failed to create Redis pool: {}", e)))?;
    Ok(Arc::new(pool))
}

/// Typed access to the components the server needs.
pub trait ServiceResolver {
    /// Resolves the employee service.
    fn employee_service(&self) -> Arc<dyn EmployeeService>;

    /// Resolves the database pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    /// Resolves the cache.
    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl ServiceResolver for RosterModule {
    fn employee_service(&self) -> Arc<dyn EmployeeService> {
        self.resolve()
    }

    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}
