// Activity module.
// Cache-first feed fetching and line rendering.

pub mod fetcher;
pub mod render;

pub use fetcher::ActivityFetcher;
pub use render::render;
