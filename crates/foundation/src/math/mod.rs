pub mod antimeridian;
pub mod arc_height;
pub mod densify;
pub mod geodesy;
pub mod precision;
pub mod projection;
pub mod vec;

pub use antimeridian::*;
pub use arc_height::*;
pub use densify::*;
pub use geodesy::*;
pub use precision::*;
pub use projection::*;
pub use vec::*;
