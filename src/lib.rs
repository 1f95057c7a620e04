pub mod app;
pub mod camera;
pub mod common;
pub mod config;
pub mod error;
pub mod intake;
pub mod pipeline;
pub mod session;

#[cfg(test)]
mod testing;

pub use app::ScanController;
pub use config::Settings;
pub use error::AppError;
