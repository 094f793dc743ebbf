pub mod coach;
pub mod config;
pub mod error;
pub mod pose;

pub use error::PoseError;
