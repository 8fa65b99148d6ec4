pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use errors::AppError;
