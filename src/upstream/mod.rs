pub mod client;
pub mod translate;

pub use client::{Endpoint, FetchError, UpstreamClient, UpstreamError, UpstreamQuery};
pub use translate::translate;
