pub mod config;
pub mod flights;
pub mod labels;

pub use config::*;
pub use flights::*;
pub use labels::*;
