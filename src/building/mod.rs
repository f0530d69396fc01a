/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::ExternalDispatcher;
use crate::shared::Direction;

/// One landing with its pair of hall buttons.
#[derive(Clone)]
pub struct Floor {
    pub floor_number: i32,
    dispatcher: ExternalDispatcher,
}

impl Floor {
    pub fn new(floor_number: i32, dispatcher: ExternalDispatcher) -> Floor {
        Floor {
            floor_number,
            dispatcher,
        }
    }

    /// Hall button press. Returns the ids of the cars the call went to.
    pub fn press_button(&self, direction: Direction) -> Vec<u32> {
        info!(
            "Floor {} button pressed for direction: {}",
            self.floor_number, direction
        );
        self.dispatcher
            .submit_external_request(self.floor_number, direction)
    }
}

/**
 * Bookkeeping of the landings in the building.
 *
 * Floors are kept sorted by number. Adding a floor that already exists
 * replaces it.
 */
pub struct Building {
    floors: Vec<Floor>,
}

impl Building {
    pub fn new(mut floors: Vec<Floor>) -> Building {
        floors.sort_by_key(|floor| floor.floor_number);
        floors.dedup_by_key(|floor| floor.floor_number);
        Building { floors }
    }

    pub fn with_floor_range(min_floor: i32, max_floor: i32, dispatcher: &ExternalDispatcher) -> Building {
        let floors = (min_floor..=max_floor)
            .map(|number| Floor::new(number, dispatcher.clone()))
            .collect();
        Building::new(floors)
    }

    pub fn add_floor(&mut self, new_floor: Floor) {
        info!("Floor added: {}", new_floor.floor_number);
        match self
            .floors
            .binary_search_by_key(&new_floor.floor_number, |floor| floor.floor_number)
        {
            Ok(index) => self.floors[index] = new_floor,
            Err(index) => self.floors.insert(index, new_floor),
        }
    }

    pub fn remove_floor(&mut self, floor_number: i32) -> Option<Floor> {
        let index = self
            .floors
            .binary_search_by_key(&floor_number, |floor| floor.floor_number)
            .ok()?;
        info!("Floor removed: {}", floor_number);
        Some(self.floors.remove(index))
    }

    pub fn floor(&self, floor_number: i32) -> Option<&Floor> {
        self.floors
            .binary_search_by_key(&floor_number, |floor| floor.floor_number)
            .ok()
            .map(|index| &self.floors[index])
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
