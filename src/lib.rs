//! Client for the custom-games stats API: fetches season stats, ratings and
//! match history, and merges them into player, champion and match views.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod service;

pub use config::Config;
pub use error::AppError;
pub use service::ToxicDataService;
