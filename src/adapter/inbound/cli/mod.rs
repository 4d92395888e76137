//! CLI module graph.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod meta;
pub mod output;
pub mod popularity;
pub mod run;
pub mod serve;
pub mod show;
