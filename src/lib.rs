pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod renamer;
pub mod scanner;
