#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod plan;
pub mod seed;
pub mod sql;

pub use catalog::{load_catalog, parse_catalog, read_catalog};
pub use seed::{SeedData, SeedRepository, Source};
pub use sql::SqlScript;
