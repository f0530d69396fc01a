/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::DispatchStrategy;
use crate::shared::{Error, Result};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub building: BuildingConfig,
    pub elevator: ElevatorConfig,
    pub dispatch: DispatchConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BuildingConfig {
    pub min_floor: i32,
    pub max_floor: i32,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    pub n_elevators: u32,
    pub start_floor: i32,
    pub floor_travel_time: u64,
    pub door_open_time: u64,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    pub strategy: DispatchStrategy,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            min_floor: 1,
            max_floor: 10,
        }
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            n_elevators: 1,
            start_floor: 0,
            floor_travel_time: 500,
            door_open_time: 1000,
        }
    }
}

impl ElevatorConfig {
    pub fn floor_travel_duration(&self) -> Duration {
        Duration::from_millis(self.floor_travel_time)
    }

    pub fn door_open_duration(&self) -> Duration {
        Duration::from_millis(self.door_open_time)
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.building.min_floor > self.building.max_floor {
            return Err(Error::InvalidConfig(format!(
                "min_floor {} is above max_floor {}",
                self.building.min_floor, self.building.max_floor
            )));
        }
        if self.elevator.n_elevators == 0 {
            return Err(Error::InvalidConfig(
                "at least one elevator is required".to_string(),
            ));
        }
        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&config_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/
