mod app;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod kv;
pub mod model;
pub mod persistence;
pub mod store;
mod utils;


pub use app::{App, Insert};
pub use config::Config;
pub use error::Error;
pub use error::Result;
