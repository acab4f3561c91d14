pub mod hashmap_login_token_store;
pub mod redis_login_token_store;

pub use hashmap_login_token_store::HashMapLoginTokenStore;
pub use redis_login_token_store::RedisLoginTokenStore;
