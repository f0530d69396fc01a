/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use std::ops::RangeInclusive;
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::Registry;

/// Routes cabin presses to the controller that owns the car.
#[derive(Clone)]
pub struct CabinDispatcher {
    registry: Arc<Registry>,
}

impl CabinDispatcher {
    pub fn new(registry: Arc<Registry>) -> CabinDispatcher {
        CabinDispatcher { registry }
    }

    /// Returns false when no controller owns `car_id`; the press is dropped.
    pub fn submit_internal_request(&self, floor: i32, car_id: u32) -> bool {
        match self.registry.find(car_id) {
            Some(controller) => {
                controller.submit_internal_request(floor, controller.current_direction());
                true
            }
            None => {
                debug!("No controller owns elevator {}, request for floor {} dropped", car_id, floor);
                false
            }
        }
    }
}

/**
 * Destination buttons inside one car.
 *
 * Only floors inside `available_buttons` exist on the panel; anything else is
 * rejected here and never reaches a controller.
 */
pub struct CabinPanel {
    car_id: u32,
    available_buttons: RangeInclusive<i32>,
    dispatcher: CabinDispatcher,
}

impl CabinPanel {
    pub fn new(car_id: u32, available_buttons: RangeInclusive<i32>, dispatcher: CabinDispatcher) -> CabinPanel {
        CabinPanel {
            car_id,
            available_buttons,
            dispatcher,
        }
    }

    pub fn car_id(&self) -> u32 {
        self.car_id
    }

    pub fn press_button(&self, destination: i32) -> bool {
        info!("Internal button pressed in elevator {} for floor: {}", self.car_id, destination);

        if !self.available_buttons.contains(&destination) {
            warn!("Invalid floor selection: {}", destination);
            return false;
        }
        self.dispatcher.submit_internal_request(destination, self.car_id)
    }
}
