/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarState {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
}

/**
 * A single floor call or cabin destination.
 *
 * Requests are plain values. Two requests for the same floor land on the same
 * queue entry, so a request carries no identity of its own.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub floor: i32,
    pub direction: Direction,
}

impl Request {
    pub fn new(floor: i32, direction: Direction) -> Request {
        debug!("Request created for floor: {} direction: {}", floor, direction);
        Request { floor, direction }
    }
}

/// One-way notifications published by a car to whoever renders it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CarEvent {
    Display {
        car_id: u32,
        floor: i32,
        direction: Direction,
    },
    DoorOpened {
        car_id: u32,
        floor: i32,
    },
    DoorClosed {
        car_id: u32,
        floor: i32,
    },
    Idle {
        car_id: u32,
        floor: i32,
    },
}

/// Point-in-time copy of a controller, queues listed in service order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub car_id: u32,
    pub floor: i32,
    pub direction: Direction,
    pub state: CarState,
    #[serde(rename = "upQueue")]
    pub up_queue: Vec<i32>,
    #[serde(rename = "downQueue")]
    pub down_queue: Vec<i32>,
    pub staged: Vec<Request>,
}

impl ControllerSnapshot {
    pub fn is_empty(&self) -> bool {
        self.up_queue.is_empty() && self.down_queue.is_empty() && self.staged.is_empty()
    }
}
