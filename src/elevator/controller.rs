/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, trace};
use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::thread::{self, Builder, JoinHandle};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::ElevatorConfig;
use crate::elevator::ElevatorCar;
use crate::lock;
use crate::shared::{CarState, ControllerSnapshot, Direction, Request};

/***************************************/
/*           Request queues            */
/***************************************/

/// Pending work of one car. All three collections live behind one lock so
/// admission, promotion and pop are observed atomically.
#[derive(Default)]
struct RequestQueues {
    up: BTreeSet<i32>,
    down: BTreeSet<i32>,
    staging: VecDeque<Request>,
}

impl RequestQueues {
    fn add_to_queue(&mut self, request: Request) -> bool {
        let inserted = match request.direction {
            Direction::Up => self.up.insert(request.floor),
            Direction::Down => self.down.insert(request.floor),
        };

        if inserted {
            debug!(
                "Request added to {} queue: floor {}",
                request.direction, request.floor
            );
        }
        inserted
    }

    /// Promotes staged requests, but only once both direction queues are
    /// empty. Returns the number drained, duplicates included.
    fn process_staged_requests(&mut self) -> usize {
        if !self.up.is_empty() || !self.down.is_empty() {
            return 0;
        }

        let mut promoted = 0;
        while let Some(request) = self.staging.pop_front() {
            self.add_to_queue(request);
            promoted += 1;
        }
        promoted
    }

    /// Picks the next stop in SCAN order, promoting staged requests first
    /// if both direction queues have run dry.
    fn next_stop(&mut self) -> Option<(Direction, i32)> {
        if !self.staging.is_empty() {
            let promoted = self.process_staged_requests();
            if promoted > 0 {
                debug!("Promoted {} staged requests", promoted);
            }
        }

        if let Some(floor) = self.up.pop_first() {
            return Some((Direction::Up, floor));
        }
        self.down.pop_last().map(|floor| (Direction::Down, floor))
    }
}

/// True when serving `request` would mean reversing the sweep the car is on.
fn is_behind_sweep(request: &Request, car_floor: i32, car_direction: Direction) -> bool {
    match (request.direction, car_direction) {
        (Direction::Up, Direction::Up) => request.floor < car_floor,
        (Direction::Down, Direction::Down) => request.floor > car_floor,
        _ => false,
    }
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Per-car SCAN scheduler.
 *
 * Submissions may arrive from any thread while the car is driving. The drive
 * loop (`control_elevator`) is the single consumer; a drive guard keeps a
 * second invocation from interleaving with a running one.
 *
 * Lock order is car, then queues. The drive loop never holds both.
 *
 * # Fields
 * - `car_id`:              Id of the owned car, fixed for the controller's lifetime.
 * - `car`:                 The owned car.
 * - `queues`:              Up queue, down queue and staging buffer.
 * - `drive_guard`:         Held for the duration of one drive loop.
 * - `wake_tx`/`wake_rx`:   Bounded(1) doorbell rung after every submission.
 * - `floor_travel_time`:   Time spent passing one floor.
 * - `door_open_time`:      Time the door stays open at a stop.
 */
pub struct ElevatorController {
    car_id: u32,
    car: Mutex<ElevatorCar>,
    queues: Mutex<RequestQueues>,
    drive_guard: Mutex<()>,
    wake_tx: cbc::Sender<()>,
    wake_rx: cbc::Receiver<()>,
    floor_travel_time: Duration,
    door_open_time: Duration,
}

impl ElevatorController {
    pub fn new(car: ElevatorCar, config: &ElevatorConfig) -> ElevatorController {
        let (wake_tx, wake_rx) = cbc::bounded::<()>(1);
        info!("ElevatorController initialized for elevator: {}", car.id);

        ElevatorController {
            car_id: car.id,
            car: Mutex::new(car),
            queues: Mutex::new(RequestQueues::default()),
            drive_guard: Mutex::new(()),
            wake_tx,
            wake_rx,
            floor_travel_time: config.floor_travel_duration(),
            door_open_time: config.door_open_duration(),
        }
    }

    pub fn car_id(&self) -> u32 {
        self.car_id
    }

    pub fn current_direction(&self) -> Direction {
        lock!(self.car).direction
    }

    /// Hall call. Requests behind the current sweep are staged until the
    /// sweep ends, everything else goes straight to a direction queue.
    pub fn submit_external_request(&self, floor: i32, direction: Direction) {
        let request = Request::new(floor, direction);
        {
            let car = lock!(self.car);
            let mut queues = lock!(self.queues);

            if is_behind_sweep(&request, car.current_floor, car.direction) {
                info!(
                    "Elevator {}: request staged for floor: {} direction: {}",
                    self.car_id, floor, direction
                );
                queues.staging.push_back(request);
            } else {
                queues.add_to_queue(request);
            }
        }
        self.wake();
    }

    /// Cabin request. Riders are never behind their own car, so no staging.
    pub fn submit_internal_request(&self, floor: i32, direction: Direction) {
        info!(
            "Elevator {}: internal request submitted for floor: {}",
            self.car_id, floor
        );
        let request = Request::new(floor, direction);
        lock!(self.queues).add_to_queue(request);
        self.wake();
    }

    /// Drains the staging buffer into the direction queues once both are
    /// empty. A no-op returning 0 while either queue still holds a floor.
    pub fn process_staged_requests(&self) -> usize {
        info!("Elevator {}: processing staged requests", self.car_id);
        lock!(self.queues).process_staged_requests()
    }

    /**
     * Drive loop.
     *
     * Serves stops in SCAN order until the up queue, down queue and staging
     * buffer are all empty, then marks the car idle and returns. Requests that
     * arrive mid-loop are picked up on the next iteration; a single
     * move-to-floor always runs to completion.
     */
    pub fn control_elevator(&self) {
        let _driving = lock!(self.drive_guard);
        let mut serviced = 0;

        loop {
            let next = lock!(self.queues).next_stop();
            let (direction, floor) = match next {
                Some(stop) => stop,
                None => break,
            };

            self.move_elevator(direction, floor);
            self.service_stop();
            serviced += 1;
        }

        let mut car = lock!(self.car);
        car.state = CarState::Idle;
        if serviced > 0 {
            car.announce_idle();
            info!(
                "All requests processed. Elevator {} is idle at floor {}.",
                self.car_id, car.current_floor
            );
        }
    }

    /// Sweeps the car floor by floor to `destination`. Not preemptible.
    pub fn move_elevator(&self, direction: Direction, destination: i32) {
        {
            let mut car = lock!(self.car);
            info!(
                "Elevator {} moving from floor: {} to floor: {} ({} queue)",
                self.car_id, car.current_floor, destination, direction
            );

            if car.current_floor == destination {
                info!("Elevator {} already at the destination floor.", self.car_id);
                return;
            }
            car.state = CarState::Moving;
        }

        loop {
            if !self.floor_travel_time.is_zero() {
                thread::sleep(self.floor_travel_time);
            }

            let mut car = lock!(self.car);
            match car.step_toward(destination) {
                Some(floor) if floor != destination => {
                    trace!("Elevator {} passing floor {}", self.car_id, floor);
                }
                _ => break,
            }
        }
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        let car = lock!(self.car);
        let queues = lock!(self.queues);

        ControllerSnapshot {
            car_id: self.car_id,
            floor: car.current_floor,
            direction: car.direction,
            state: car.state,
            up_queue: queues.up.iter().copied().collect(),
            down_queue: queues.down.iter().rev().copied().collect(),
            staged: queues.staging.iter().copied().collect(),
        }
    }

    /// Blocks until woken by a submission or told to terminate. Each wake
    /// runs one fresh drive loop. A disconnected terminate channel also stops
    /// the worker.
    pub fn run(&self, terminate_rx: cbc::Receiver<()>) {
        loop {
            cbc::select! {
                recv(self.wake_rx) -> _ => self.control_elevator(),
                recv(terminate_rx) -> _ => {
                    debug!("Elevator {} worker terminated", self.car_id);
                    break;
                }
            }
        }
    }

    fn wake(&self) {
        // A full doorbell already guarantees one more drive loop.
        let _ = self.wake_tx.try_send(());
    }

    fn service_stop(&self) {
        lock!(self.car).open_door();
        if !self.door_open_time.is_zero() {
            thread::sleep(self.door_open_time);
        }
        lock!(self.car).close_door();
    }
}

/// Spawns the worker thread that drives `controller` until `terminate_rx` fires.
pub fn spawn_worker(
    controller: Arc<ElevatorController>,
    terminate_rx: cbc::Receiver<()>,
) -> std::io::Result<JoinHandle<()>> {
    Builder::new()
        .name(format!("elevator_{}", controller.car_id()))
        .spawn(move || controller.run(terminate_rx))
}

/***************************************/
/*             Unit tests              */
/***************************************/
