pub mod error;
pub mod macros;
pub mod structs;

pub use error::Error;
pub use error::Result;
pub use structs::CarEvent;
pub use structs::CarState;
pub use structs::ControllerSnapshot;
pub use structs::Direction;
pub use structs::Request;
