pub mod airplanes;
pub mod arcs;
pub mod labels;
pub mod layer;
pub mod lines;
pub mod symbology;

pub use layer::*;
