// src/lib.rs

//! AwardHub Library

pub mod error;
pub mod models;
pub mod router;
pub mod server;
pub mod services;
pub mod session;
pub mod utils;
pub mod views;
