//! Application services built on the ports.

pub mod cat_service;

pub use cat_service::{CatService, ClearSummary};
