//! Cache infrastructure - keyed store implementations

mod factory;
mod in_memory;
mod redis;

pub use factory::CacheFactory;
pub use in_memory::InMemoryCache;
pub use self::redis::{RedisCache, RedisCacheConfig};
