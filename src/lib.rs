pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod preferences;
pub mod store;
pub mod tmdb;

pub use catalog::Catalog;
pub use error::{CatalogError, FetchError};
pub use store::{Slot, Store};
