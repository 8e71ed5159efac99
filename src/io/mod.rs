pub mod config_io;
pub mod project_io;
pub mod state;
