pub mod commands;
pub mod config_io;
