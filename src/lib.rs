pub mod cli;
pub mod commands;
pub mod config;
pub mod converter;
pub mod error;
pub mod export;
pub mod extractor;
pub mod session;
