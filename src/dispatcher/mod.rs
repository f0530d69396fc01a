pub mod cabin;
pub mod registry;
pub mod strategy;

pub use cabin::CabinDispatcher;
pub use cabin::CabinPanel;
pub use registry::Registry;
pub use strategy::DispatchStrategy;
pub use strategy::ExternalDispatcher;
