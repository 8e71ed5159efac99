pub mod asset;
pub mod config;
pub mod instance;
pub mod page;
pub mod project;

pub use asset::*;
pub use config::*;
pub use instance::*;
pub use page::*;
pub use project::*;
