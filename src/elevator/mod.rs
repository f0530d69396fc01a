pub mod car;
pub mod controller;
pub mod controller_tests;

pub use car::ElevatorCar;
pub use car::ElevatorDisplay;
pub use car::ElevatorDoor;
pub use controller::spawn_worker;
pub use controller::ElevatorController;
