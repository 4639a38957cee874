pub mod clock;
pub mod frame;
pub mod orbit;

pub use clock::*;
pub use frame::*;
pub use orbit::*;
