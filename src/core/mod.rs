pub mod app;
pub mod completion;
pub mod config;
pub mod credentials;
pub mod export;
pub mod message;
pub mod models;
pub mod session;
