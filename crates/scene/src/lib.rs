pub mod animator;
pub mod flights;
pub mod temporal;
pub mod visibility;

pub use animator::*;
pub use flights::*;
