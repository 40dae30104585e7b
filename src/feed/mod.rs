#[cfg(feature = "ssr")]
mod client;
mod error;
mod model;
mod parse;
mod query;

#[cfg(feature = "ssr")]
pub use client::FeedClient;
pub use error::FeedError;
pub use model::*;
pub use parse::parse_feed;
pub use query::{FeedKind, FeedQuery};
