/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CarEvent, CarState, Direction};

/**
 * Floor indicator mounted in the car.
 *
 * `set_display` only stores the values, `show_display` renders them. Rendering
 * is a log line plus a `CarEvent::Display` on the event channel. Nothing is
 * ever read back from the display.
 */
pub struct ElevatorDisplay {
    car_id: u32,
    floor: i32,
    direction: Direction,
    events_tx: cbc::Sender<CarEvent>,
}

impl ElevatorDisplay {
    pub fn new(car_id: u32, events_tx: cbc::Sender<CarEvent>) -> ElevatorDisplay {
        ElevatorDisplay {
            car_id,
            floor: 0,
            direction: Direction::Up,
            events_tx,
        }
    }

    pub fn set_display(&mut self, floor: i32, direction: Direction) {
        self.floor = floor;
        self.direction = direction;
    }

    pub fn show_display(&self) {
        info!(
            "Elevator {} current floor: {} going in direction: {}",
            self.car_id, self.floor, self.direction
        );
        let _ = self.events_tx.send(CarEvent::Display {
            car_id: self.car_id,
            floor: self.floor,
            direction: self.direction,
        });
    }
}

pub struct ElevatorDoor {
    car_id: u32,
    events_tx: cbc::Sender<CarEvent>,
}

impl ElevatorDoor {
    pub fn new(car_id: u32, events_tx: cbc::Sender<CarEvent>) -> ElevatorDoor {
        ElevatorDoor { car_id, events_tx }
    }

    pub fn open_door(&self, floor: i32) {
        debug!("Opening the door of elevator {} at floor {}", self.car_id, floor);
        let _ = self.events_tx.send(CarEvent::DoorOpened {
            car_id: self.car_id,
            floor,
        });
    }

    pub fn close_door(&self, floor: i32) {
        debug!("Closing the door of elevator {} at floor {}", self.car_id, floor);
        let _ = self.events_tx.send(CarEvent::DoorClosed {
            car_id: self.car_id,
            floor,
        });
    }
}

/**
 * # Elevator Car
 * Position and motion state of one physical car.
 *
 * A car is owned by exactly one `ElevatorController`, which is the only code
 * that mutates it.
 *
 * # Fields
 *
 * - `id`:              Unique car id. Parity of the id matters to the odd/even dispatch strategy.
 * - `current_floor`:   Last floor the car passed or stopped at.
 * - `direction`:       Direction of the last movement, or the one given at startup.
 * - `state`:           Idle or moving.
 * - `display`:         Floor indicator updated at every floor passed.
 * - `door`:            Door actuator cycled at every serviced stop.
 */
pub struct ElevatorCar {
    pub id: u32,
    pub current_floor: i32,
    pub direction: Direction,
    pub state: CarState,
    display: ElevatorDisplay,
    door: ElevatorDoor,
    events_tx: cbc::Sender<CarEvent>,
}

impl ElevatorCar {
    pub fn new(
        id: u32,
        start_floor: i32,
        direction: Direction,
        events_tx: cbc::Sender<CarEvent>,
    ) -> ElevatorCar {
        let mut display = ElevatorDisplay::new(id, events_tx.clone());
        display.set_display(start_floor, direction);

        ElevatorCar {
            id,
            current_floor: start_floor,
            direction,
            state: CarState::Idle,
            display,
            door: ElevatorDoor::new(id, events_tx.clone()),
            events_tx,
        }
    }

    pub fn set_display(&mut self) {
        self.display.set_display(self.current_floor, self.direction);
    }

    pub fn show_display(&self) {
        self.display.show_display();
    }

    /// Moves the car one floor towards `destination` and refreshes the display.
    /// Returns the new floor, or `None` if the car is already there.
    pub fn step_toward(&mut self, destination: i32) -> Option<i32> {
        if self.current_floor == destination {
            return None;
        }

        if self.current_floor < destination {
            self.direction = Direction::Up;
            self.current_floor += 1;
        } else {
            self.direction = Direction::Down;
            self.current_floor -= 1;
        }

        self.set_display();
        self.show_display();
        Some(self.current_floor)
    }

    pub fn open_door(&self) {
        self.door.open_door(self.current_floor);
    }

    pub fn close_door(&self) {
        self.door.close_door(self.current_floor);
    }

    pub fn announce_idle(&self) {
        let _ = self.events_tx.send(CarEvent::Idle {
            car_id: self.id,
            floor: self.current_floor,
        });
    }
}
