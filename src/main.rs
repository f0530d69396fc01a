/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::collections::BTreeSet;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};

/* Custom libraries */
use elevator_dispatch::building::Building;
use elevator_dispatch::cli::ConsoleCommand;
use elevator_dispatch::config::{self, Config, ElevatorConfig};
use elevator_dispatch::dispatcher::{
    CabinDispatcher, CabinPanel, DispatchStrategy, ExternalDispatcher, Registry,
};
use elevator_dispatch::elevator::{spawn_worker, ElevatorCar};
use elevator_dispatch::shared::{CarEvent, Direction};
use elevator_dispatch::unwrap_or_exit;

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("elevator_dispatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("SCAN elevator dispatcher")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("strategy")
                .short('s')
                .long("strategy")
                .takes_value(true)
                .possible_values(["assign_to_all", "odd_even_partition"])
                .help("Overrides the dispatch strategy from the configuration"),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Run the scripted scenario instead of reading commands from stdin"),
        )
        .get_matches();

    // Load the configuration
    let config_path = Path::new(matches.value_of("config").unwrap_or("config.toml"));
    let mut config = if config_path.exists() {
        unwrap_or_exit!(config::load_config(config_path))
    } else {
        warn!("{} not found, using default configuration", config_path.display());
        Config::default()
    };
    if let Some(strategy) = matches.value_of("strategy") {
        config.dispatch.strategy = unwrap_or_exit!(strategy.parse::<DispatchStrategy>());
    }

    // Initialize channels
    let (events_tx, events_rx) = cbc::unbounded::<CarEvent>();

    // Compose the fleet
    let demo = matches.is_present("demo");
    let registry = if demo {
        Arc::new(demo_registry(&config.elevator, &events_tx))
    } else {
        Arc::new(Registry::from_config(&config.elevator, &events_tx))
    };
    drop(events_tx);

    let external_dispatcher = ExternalDispatcher::new(config.dispatch.strategy, Arc::clone(&registry));
    let cabin_dispatcher = CabinDispatcher::new(Arc::clone(&registry));
    info!("Dispatch strategy: {}", external_dispatcher.strategy());

    let (min_floor, max_floor) = (config.building.min_floor, config.building.max_floor);
    let building = Building::with_floor_range(min_floor, max_floor, &external_dispatcher);
    let panels: Vec<CabinPanel> = registry
        .controllers()
        .iter()
        .map(|controller| {
            CabinPanel::new(controller.car_id(), min_floor..=max_floor, cabin_dispatcher.clone())
        })
        .collect();

    if demo {
        run_demo(&registry, &building, &panels, events_rx);
    } else {
        run_console(&registry, &building, &panels, &cabin_dispatcher, events_rx);
    }
}

fn start_workers(registry: &Registry) -> Vec<(cbc::Sender<()>, JoinHandle<()>)> {
    registry
        .controllers()
        .iter()
        .map(|controller| {
            let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
            let worker = unwrap_or_exit!(spawn_worker(Arc::clone(controller), terminate_rx));
            (terminate_tx, worker)
        })
        .collect()
}

fn stop_workers(workers: Vec<(cbc::Sender<()>, JoinHandle<()>)>) {
    for (terminate_tx, worker) in workers {
        let _ = terminate_tx.send(());
        if worker.join().is_err() {
            error!("Elevator worker panicked");
        }
    }
}

fn print_event(event: &CarEvent) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{}", line),
        Err(e) => error!("Failed to serialize car event: {}", e),
    }
}

fn press_hall(building: &Building, floor: i32, direction: Direction) {
    match building.floor(floor) {
        Some(floor) => {
            floor.press_button(direction);
        }
        None => warn!("Floor {} does not exist in this building", floor),
    }
}

fn press_cab(panels: &[CabinPanel], cabin_dispatcher: &CabinDispatcher, car_id: u32, floor: i32) {
    match panels.iter().find(|panel| panel.car_id() == car_id) {
        Some(panel) => {
            panel.press_button(floor);
        }
        // No panel means no car; the dispatcher drops the press.
        None => {
            cabin_dispatcher.submit_internal_request(floor, car_id);
        }
    }
}

// Same fleet as the configuration, but car 1 starts at floor 2 heading up.
fn demo_registry(config: &ElevatorConfig, events_tx: &cbc::Sender<CarEvent>) -> Registry {
    let cars = (1..=config.n_elevators)
        .map(|id| {
            let start_floor = if id == 1 { 2 } else { config.start_floor };
            ElevatorCar::new(id, start_floor, Direction::Up, events_tx.clone())
        })
        .collect();
    Registry::from_cars(cars, config)
}

fn run_demo(registry: &Registry, building: &Building, panels: &[CabinPanel], events_rx: cbc::Receiver<CarEvent>) {
    // Simulating multiple external requests
    press_hall(building, 1, Direction::Up);
    press_hall(building, 4, Direction::Down);
    press_hall(building, 6, Direction::Up);
    press_hall(building, 9, Direction::Down);

    // Simulating multiple internal requests
    if let Some(panel) = panels.first() {
        for floor in [5, 7, 2, 8] {
            panel.press_button(floor);
        }
    }

    let mut busy: BTreeSet<u32> = registry
        .snapshots()
        .iter()
        .filter(|snapshot| !snapshot.is_empty())
        .map(|snapshot| snapshot.car_id)
        .collect();

    let workers = start_workers(registry);

    while !busy.is_empty() {
        match events_rx.recv() {
            Ok(event) => {
                print_event(&event);
                if let CarEvent::Idle { car_id, .. } = event {
                    busy.remove(&car_id);
                }
            }
            Err(e) => {
                error!("Car event channel closed: {}", e);
                break;
            }
        }
    }

    stop_workers(workers);
    info!("Demo finished");
}

fn run_console(
    registry: &Registry,
    building: &Building,
    panels: &[CabinPanel],
    cabin_dispatcher: &CabinDispatcher,
    events_rx: cbc::Receiver<CarEvent>,
) {
    let display_thread = Builder::new().name("display".into());
    let _display = unwrap_or_exit!(display_thread.spawn(move || {
        for event in events_rx.iter() {
            print_event(&event);
        }
    }));

    let workers = start_workers(registry);
    info!("Commands: hall <floor> <up|down>, cab <car> <floor>, status, quit");

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Hall { floor, direction }) => press_hall(building, floor, direction),
            Ok(ConsoleCommand::Cab { car_id, floor }) => press_cab(panels, cabin_dispatcher, car_id, floor),
            Ok(ConsoleCommand::Status) => match serde_json::to_string_pretty(&registry.snapshots()) {
                Ok(status) => println!("{}", status),
                Err(e) => error!("Failed to serialize status: {}", e),
            },
            Ok(ConsoleCommand::Quit) => break,
            Err(e) => warn!("{}", e),
        }
    }

    stop_workers(workers);
}
