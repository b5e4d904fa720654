// Each module handles one family of CLI subcommands; main.rs only parses and dispatches.

pub mod directory;
pub mod route;
