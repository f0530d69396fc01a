/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::Registry;
use crate::shared::{Direction, Error};

/// How a hall call is spread over the fleet.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    /// Every controller gets every call and judges it on its own.
    #[default]
    AssignToAll,
    /// First controller whose car id has the parity of the floor. No match, no dispatch.
    OddEvenPartition,
}

impl DispatchStrategy {
    /// Forwards the call to the selected controllers and returns their car ids.
    /// An empty result is a silent drop, not an error.
    pub fn allocate(&self, registry: &Registry, floor: i32, direction: Direction) -> Vec<u32> {
        let mut allocated = Vec::new();

        match self {
            DispatchStrategy::AssignToAll => {
                for controller in registry.controllers() {
                    controller.submit_external_request(floor, direction);
                    allocated.push(controller.car_id());
                }
            }
            DispatchStrategy::OddEvenPartition => {
                let parity = floor.rem_euclid(2) as u32;
                if let Some(controller) = registry
                    .controllers()
                    .iter()
                    .find(|controller| controller.car_id() % 2 == parity)
                {
                    controller.submit_external_request(floor, direction);
                    allocated.push(controller.car_id());
                }
            }
        }

        if allocated.is_empty() {
            debug!(
                "No elevator matched floor {} ({}) under {}, request dropped",
                floor, direction, self
            );
        }
        for id in &allocated {
            info!("Allocated elevator {} to floor {} ({})", id, floor, direction);
        }
        allocated
    }
}

impl fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchStrategy::AssignToAll => write!(f, "assign_to_all"),
            DispatchStrategy::OddEvenPartition => write!(f, "odd_even_partition"),
        }
    }
}

impl FromStr for DispatchStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assign_to_all" => Ok(DispatchStrategy::AssignToAll),
            "odd_even_partition" => Ok(DispatchStrategy::OddEvenPartition),
            other => Err(Error::InvalidConfig(format!("unknown strategy '{}'", other))),
        }
    }
}

/**
 * Entry point for hall calls.
 *
 * Pairs the strategy chosen at startup with the shared registry. Floors hold a
 * clone of this and call `submit_external_request` when a hall button is pressed.
 */
#[derive(Clone)]
pub struct ExternalDispatcher {
    strategy: DispatchStrategy,
    registry: Arc<Registry>,
}

impl ExternalDispatcher {
    pub fn new(strategy: DispatchStrategy, registry: Arc<Registry>) -> ExternalDispatcher {
        ExternalDispatcher { strategy, registry }
    }

    pub fn strategy(&self) -> DispatchStrategy {
        self.strategy
    }

    pub fn submit_external_request(&self, floor: i32, direction: Direction) -> Vec<u32> {
        self.strategy.allocate(&self.registry, floor, direction)
    }
}
