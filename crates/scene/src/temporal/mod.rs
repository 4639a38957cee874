pub mod arc_groups;

pub use arc_groups::*;
