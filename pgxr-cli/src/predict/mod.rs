pub mod cli;
pub mod handlers;
