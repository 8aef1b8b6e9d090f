// Side cache untuk payment detail view di Redis.
// Cache hanyalah optimisasi: ledger selalu menjadi source of truth, dan
// Redis yang mati diperlakukan sebagai permanent miss, bukan fatal error.

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;

// Key dan TTL untuk cached payment detail
pub const PAYMENT_DETAIL_TTL_SECONDS: u64 = 30 * 60;

pub fn payment_detail_key(payment_id: i64) -> String {
    format!("payment:detail:{}", payment_id)
}

// Error types untuk cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(redis::RedisError),

    #[error("Redis operation error: {0}")]
    Operation(redis::RedisError),

    #[error("Invalid Redis URL: {0}")]
    InvalidUrl(redis::RedisError),
}

// Port untuk key-value side cache dengan time-based expiry
#[async_trait]
pub trait PaymentCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

// Cache client berbasis Redis, connection di-multiplex per operasi
#[derive(Clone)]
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    pub fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url).map_err(CacheError::InvalidUrl)?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, CacheError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(CacheError::Connection)
    }
}

#[async_trait]
impl PaymentCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await.map_err(CacheError::Operation)?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(key, value, ttl_seconds)
            .await
            .map_err(CacheError::Operation)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(key).await.map_err(CacheError::Operation)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_detail_key_shape() {
        assert_eq!(payment_detail_key(3), "payment:detail:3");
        assert_eq!(payment_detail_key(99123), "payment:detail:99123");
    }

    #[test]
    fn test_ttl_is_thirty_minutes() {
        assert_eq!(PAYMENT_DETAIL_TTL_SECONDS, 1800);
    }

    #[test]
    fn test_invalid_redis_url_rejected() {
        assert!(matches!(
            RedisCache::new("not a url"),
            Err(CacheError::InvalidUrl(_))
        ));
        assert!(RedisCache::new("redis://127.0.0.1:6379").is_ok());
    }
}
