/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Direction, Error};

/// One line typed on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Hall { floor: i32, direction: Direction },
    Cab { car_id: u32, floor: i32 },
    Status,
    Quit,
}

fn parse_number<T: FromStr>(word: Option<&str>, what: &str) -> Result<T, Error> {
    let word = word.ok_or_else(|| Error::Command(format!("missing {}", what)))?;
    word.parse::<T>()
        .map_err(|_| Error::Command(format!("'{}' is not a valid {}", word, what)))
}

impl FromStr for ConsoleCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words.next().map(str::to_ascii_lowercase);

        let command = match keyword.as_deref() {
            Some("hall") => {
                let floor = parse_number(words.next(), "floor")?;
                let direction = match words.next().map(str::to_ascii_lowercase).as_deref() {
                    Some("up") => Direction::Up,
                    Some("down") => Direction::Down,
                    Some(other) => {
                        return Err(Error::Command(format!("'{}' is not a direction", other)))
                    }
                    None => return Err(Error::Command("missing direction".to_string())),
                };
                ConsoleCommand::Hall { floor, direction }
            }
            Some("cab") => {
                let car_id = parse_number(words.next(), "car id")?;
                let floor = parse_number(words.next(), "floor")?;
                ConsoleCommand::Cab { car_id, floor }
            }
            Some("status") => ConsoleCommand::Status,
            Some("quit") | Some("exit") => ConsoleCommand::Quit,
            Some(other) => return Err(Error::Command(format!("unknown command '{}'", other))),
            None => return Err(Error::Command("empty line".to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(Error::Command(format!("unexpected argument '{}'", extra)));
        }
        Ok(command)
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
