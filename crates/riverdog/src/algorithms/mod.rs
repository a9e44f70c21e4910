pub mod classification;
pub mod preprocessing;
pub mod contour;
pub mod rendering;

pub use classification::*;
pub use preprocessing::*;
pub use contour::*;
pub use rendering::*;
