// Cache module for local filesystem caching.
// Stores each user's fetched events so repeat runs skip the network.

pub mod paths;
pub mod store;

pub use paths::DEFAULT_CACHE_DIR;
pub use store::CacheStore;
