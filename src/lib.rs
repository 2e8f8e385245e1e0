pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod run;
pub mod telegram;
pub mod zammad;
