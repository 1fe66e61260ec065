pub mod config;
pub mod input;
pub mod lookup;
pub mod shell;
