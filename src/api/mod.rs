pub mod client;
pub mod endpoints;
pub mod models;

pub use client::{StatsSource, ToxicApiClient};
pub use endpoints::Resource;
