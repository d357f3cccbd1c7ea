pub mod app;
pub mod chat;
pub mod error;
pub mod export;
pub mod storage;
pub mod ui;
pub mod utils;

pub use error::{ChatError, Result};
