//! Built-in [`MapDataProvider`](crate::api::MapDataProvider) implementations.
mod fixture;
mod http;

pub use fixture::{ProviderCall, StaticMapProvider};
pub use http::HttpMapProvider;
