/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::info;
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorConfig;
use crate::elevator::{ElevatorCar, ElevatorController};
use crate::shared::{CarEvent, ControllerSnapshot, Direction};

/**
 * Fleet of controllers, fixed at startup.
 *
 * The registry is built once by whoever composes the system and then shared
 * read-only (`Arc<Registry>`) with both dispatchers. There is no runtime
 * add or remove, so reads need no lock.
 */
pub struct Registry {
    controllers: Vec<Arc<ElevatorController>>,
}

impl Registry {
    pub fn new(controllers: Vec<Arc<ElevatorController>>) -> Registry {
        Registry { controllers }
    }

    /// Creates cars `1..=n_elevators`, each at `start_floor` facing up, all
    /// publishing on `events_tx`.
    pub fn from_config(config: &ElevatorConfig, events_tx: &cbc::Sender<CarEvent>) -> Registry {
        let cars = (1..=config.n_elevators)
            .map(|id| ElevatorCar::new(id, config.start_floor, Direction::Up, events_tx.clone()))
            .collect();
        Registry::from_cars(cars, config)
    }

    /// Wraps already placed cars in controllers. Positions are fixed here;
    /// from then on only each controller's drive loop moves its car.
    pub fn from_cars(cars: Vec<ElevatorCar>, config: &ElevatorConfig) -> Registry {
        let controllers = cars
            .into_iter()
            .map(|car| Arc::new(ElevatorController::new(car, config)))
            .collect::<Vec<_>>();

        info!("Registry initialized with {} elevators", controllers.len());
        Registry::new(controllers)
    }

    pub fn controllers(&self) -> &[Arc<ElevatorController>] {
        &self.controllers
    }

    /// Linear scan for the controller owning `car_id`.
    pub fn find(&self, car_id: u32) -> Option<&Arc<ElevatorController>> {
        self.controllers
            .iter()
            .find(|controller| controller.car_id() == car_id)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn snapshots(&self) -> Vec<ControllerSnapshot> {
        self.controllers
            .iter()
            .map(|controller| controller.snapshot())
            .collect()
    }
}
