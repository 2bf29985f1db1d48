pub mod apod;
pub mod config;
pub mod error;
pub mod facts;
pub mod media;
pub mod model;
pub mod network;
pub mod page;
pub mod range;
pub mod render;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
