// src/models/mod.rs

//! Domain models for the award site.

mod award;
mod config;
mod row;

pub use award::{Award, Winner, YearData};
pub use config::{CarouselConfig, Config, FetchConfig, ServerConfig, SiteConfig, SourceConfig};
pub use row::Row;
