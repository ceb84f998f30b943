pub mod memory;
pub mod redis;

pub use self::memory::MemoryLinkStore;
pub use self::redis::RedisLinkStore;
