pub mod config;
pub mod plan;
pub mod quest;
pub mod serve;
