pub mod annotations;
pub mod axis;
pub mod error_point;
pub mod peak;
pub mod state;
pub mod viewport;

pub use annotations::*;
pub use axis::*;
pub use error_point::*;
pub use peak::*;
pub use state::*;
pub use viewport::*;
