/*
 * Unit tests for the elevator controller
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_external_request_dedupe
 *  - test_queues_yield_scan_order
 *  - test_request_behind_up_sweep_is_staged
 *  - test_request_behind_down_sweep_is_staged
 *  - test_opposite_direction_request_is_queued
 *  - test_internal_request_is_never_staged
 *  - test_process_staged_requests_dedupes
 *  - test_staged_requests_wait_while_queue_pending
 *  - test_cabin_request_moves_car_floor_by_floor
 *  - test_request_for_current_floor_is_noop_move
 *  - test_staged_requests_served_after_sweep
 *  - test_running_move_is_not_preempted
 *  - test_full_scan_sequence
 *  - test_concurrent_submissions_keep_every_floor_once
 *  - test_worker_services_requests_while_running
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod controller_tests {
    use crate::config::ElevatorConfig;
    use crate::elevator::{spawn_worker, ElevatorCar, ElevatorController};
    use crate::shared::Direction::{Down, Up};
    use crate::shared::{CarEvent, CarState, Direction, Request};
    use crossbeam_channel::{unbounded, Receiver};
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn setup_timed_controller(
        floor: i32,
        direction: Direction,
        floor_travel_time: u64,
    ) -> (Arc<ElevatorController>, Receiver<CarEvent>) {
        // Arrange mock channels
        let (events_tx, events_rx) = unbounded::<CarEvent>();

        let config = ElevatorConfig {
            n_elevators: 1,
            start_floor: floor,
            floor_travel_time,
            door_open_time: 0,
        };

        let car = ElevatorCar::new(1, floor, direction, events_tx);
        (Arc::new(ElevatorController::new(car, &config)), events_rx)
    }

    // Instant travel and doors
    fn setup_controller(
        floor: i32,
        direction: Direction,
    ) -> (Arc<ElevatorController>, Receiver<CarEvent>) {
        setup_timed_controller(floor, direction, 0)
    }

    fn display_floors(events: &[CarEvent]) -> Vec<i32> {
        events
            .iter()
            .filter_map(|event| match event {
                CarEvent::Display { floor, .. } => Some(*floor),
                _ => None,
            })
            .collect()
    }

    fn stop_floors(events: &[CarEvent]) -> Vec<i32> {
        events
            .iter()
            .filter_map(|event| match event {
                CarEvent::DoorOpened { floor, .. } => Some(*floor),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_external_request_dedupe() {
        // Arrange
        let (controller, _events_rx) = setup_controller(0, Up);

        // Act
        controller.submit_external_request(6, Up);
        controller.submit_external_request(6, Up);
        controller.submit_external_request(3, Down);
        controller.submit_external_request(3, Down);

        // Assert
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.up_queue, vec![6]);
        assert_eq!(snapshot.down_queue, vec![3]);
        assert!(snapshot.staged.is_empty());
    }

    #[test]
    fn test_queues_yield_scan_order() {
        let (controller, _events_rx) = setup_controller(0, Up);

        for floor in [7, 3, 5] {
            controller.submit_external_request(floor, Up);
        }
        for floor in [2, 8, 4] {
            controller.submit_external_request(floor, Down);
        }

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.up_queue, vec![3, 5, 7]);
        assert_eq!(snapshot.down_queue, vec![8, 4, 2]);
    }

    #[test]
    fn test_request_behind_up_sweep_is_staged() {
        // Arrange
        let (controller, _events_rx) = setup_controller(5, Up);

        // Act
        controller.submit_external_request(3, Up);

        // Assert
        let snapshot = controller.snapshot();
        assert!(snapshot.up_queue.is_empty());
        assert_eq!(snapshot.staged, vec![Request { floor: 3, direction: Up }]);
    }

    #[test]
    fn test_request_behind_down_sweep_is_staged() {
        let (controller, _events_rx) = setup_controller(5, Down);

        controller.submit_external_request(8, Down);
        controller.submit_external_request(8, Up);
        controller.submit_external_request(2, Down);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.staged, vec![Request { floor: 8, direction: Down }]);
        assert_eq!(snapshot.up_queue, vec![8]);
        assert_eq!(snapshot.down_queue, vec![2]);
    }

    #[test]
    fn test_opposite_direction_request_is_queued() {
        // Purpose: car at 2 heading up, hall call DOWN at 4 is ahead of the car,
        // so it is queued rather than staged even though serving it needs a reversal later.

        // Arrange
        let (controller, _events_rx) = setup_controller(2, Up);

        // Act
        controller.submit_external_request(6, Up);
        controller.submit_external_request(4, Down);

        // Assert
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.up_queue, vec![6]);
        assert_eq!(snapshot.down_queue, vec![4]);
        assert!(snapshot.staged.is_empty());
    }

    #[test]
    fn test_internal_request_is_never_staged() {
        let (controller, _events_rx) = setup_controller(5, Up);

        controller.submit_internal_request(2, Up);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.up_queue, vec![2]);
        assert!(snapshot.staged.is_empty());
    }

    #[test]
    fn test_process_staged_requests_dedupes() {
        // Arrange
        let (controller, _events_rx) = setup_controller(5, Up);
        controller.submit_external_request(3, Up);
        controller.submit_external_request(3, Up);
        assert_eq!(controller.snapshot().staged.len(), 2);

        // Act
        let drained = controller.process_staged_requests();

        // Assert
        let snapshot = controller.snapshot();
        assert_eq!(drained, 2);
        assert_eq!(snapshot.up_queue, vec![3]);
        assert!(snapshot.staged.is_empty());
    }

    #[test]
    fn test_staged_requests_wait_while_queue_pending() {
        // Arrange
        let (controller, _events_rx) = setup_controller(5, Up);
        controller.submit_external_request(8, Up);
        controller.submit_external_request(3, Up);

        // Act
        let drained = controller.process_staged_requests();

        // Assert
        let snapshot = controller.snapshot();
        assert_eq!(drained, 0);
        assert_eq!(snapshot.up_queue, vec![8]);
        assert_eq!(snapshot.staged, vec![Request { floor: 3, direction: Up }]);
    }

    #[test]
    fn test_cabin_request_moves_car_floor_by_floor() {
        // Arrange
        let (controller, events_rx) = setup_controller(2, Up);

        // Act
        controller.submit_internal_request(5, controller.current_direction());
        assert_eq!(controller.snapshot().up_queue, vec![5]);
        controller.control_elevator();

        // Assert
        let events: Vec<CarEvent> = events_rx.try_iter().collect();
        assert_eq!(display_floors(&events), vec![3, 4, 5]);
        assert_eq!(
            &events[3..],
            &[
                CarEvent::DoorOpened { car_id: 1, floor: 5 },
                CarEvent::DoorClosed { car_id: 1, floor: 5 },
                CarEvent::Idle { car_id: 1, floor: 5 },
            ]
        );

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.floor, 5);
        assert_eq!(snapshot.state, CarState::Idle);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_request_for_current_floor_is_noop_move() {
        let (controller, events_rx) = setup_controller(4, Down);

        controller.submit_internal_request(4, Down);
        controller.control_elevator();

        let events: Vec<CarEvent> = events_rx.try_iter().collect();
        assert!(display_floors(&events).is_empty());
        assert_eq!(stop_floors(&events), vec![4]);
        assert_eq!(controller.snapshot().floor, 4);
        assert_eq!(controller.snapshot().direction, Down);
    }

    #[test]
    fn test_staged_requests_served_after_sweep() {
        // Arrange
        let (controller, events_rx) = setup_controller(5, Up);
        controller.submit_external_request(3, Up);
        controller.submit_external_request(8, Up);

        // Act
        controller.control_elevator();

        // Assert
        let events: Vec<CarEvent> = events_rx.try_iter().collect();
        assert_eq!(stop_floors(&events), vec![8, 3]);
        assert_eq!(display_floors(&events), vec![6, 7, 8, 7, 6, 5, 4, 3]);
        assert!(controller.snapshot().is_empty());
    }

    #[test]
    fn test_running_move_is_not_preempted() {
        // Purpose: requests arriving mid-move wait for the move in flight to finish

        // Arrange
        let (controller, events_rx) = setup_timed_controller(0, Up, 30);
        controller.submit_internal_request(5, Up);
        let driver = {
            let controller = Arc::clone(&controller);
            thread::spawn(move || controller.control_elevator())
        };

        // Act
        let mut events = Vec::new();
        let mut submitted_ahead = false;
        let mut submitted_behind = false;
        loop {
            let event = match events_rx.recv_timeout(Duration::from_secs(3)) {
                Ok(event) => event,
                Err(e) => panic!("Timed out waiting for car events: {:?}", e),
            };
            match event {
                // Ahead of the car, but in the other direction
                CarEvent::Display { floor: 1, .. } if !submitted_ahead => {
                    controller.submit_external_request(3, Down);
                    submitted_ahead = true;
                }
                // Behind the car on its upward sweep
                CarEvent::Display { floor: 3, direction: Up, .. } if !submitted_behind => {
                    controller.submit_external_request(2, Up);
                    submitted_behind = true;
                }
                _ => {}
            }
            let idle = matches!(event, CarEvent::Idle { .. });
            events.push(event);
            if idle {
                break;
            }
        }
        driver.join().unwrap();

        // Assert
        assert_eq!(display_floors(&events), vec![1, 2, 3, 4, 5, 4, 3, 2]);
        assert_eq!(stop_floors(&events), vec![5, 3, 2]);
        assert!(controller.snapshot().is_empty());
    }

    #[test]
    fn test_full_scan_sequence() {
        // Arrange
        let (controller, events_rx) = setup_controller(2, Up);
        controller.submit_external_request(1, Up);
        controller.submit_external_request(4, Down);
        controller.submit_external_request(6, Up);
        controller.submit_external_request(9, Down);
        for floor in [5, 7, 2, 8] {
            controller.submit_internal_request(floor, controller.current_direction());
        }

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.up_queue, vec![2, 5, 6, 7, 8]);
        assert_eq!(snapshot.down_queue, vec![9, 4]);
        assert_eq!(snapshot.staged, vec![Request { floor: 1, direction: Up }]);

        // Act
        controller.control_elevator();

        // Assert
        let events: Vec<CarEvent> = events_rx.try_iter().collect();
        assert_eq!(stop_floors(&events), vec![2, 5, 6, 7, 8, 9, 4, 1]);
        assert_eq!(events.last(), Some(&CarEvent::Idle { car_id: 1, floor: 1 }));
        assert!(controller.snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_submissions_keep_every_floor_once() {
        // Arrange
        let (controller, _events_rx) = setup_controller(0, Up);

        // Act
        let producers: Vec<_> = (0..8)
            .map(|producer| {
                let controller = Arc::clone(&controller);
                thread::spawn(move || {
                    for floor in 1..=20 {
                        if producer % 2 == 0 {
                            controller.submit_external_request(floor, Up);
                            controller.submit_external_request(floor, Down);
                        } else {
                            controller.submit_internal_request(floor, Up);
                        }
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        // Assert
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.up_queue, (1..=20).collect::<Vec<i32>>());
        assert_eq!(snapshot.down_queue, (1..=20).rev().collect::<Vec<i32>>());
        assert!(snapshot.staged.is_empty());
    }

    #[test]
    fn test_worker_services_requests_while_running() {
        // Purpose: producers race the drive loop; every submitted floor must be served

        // Arrange
        let (controller, events_rx) = setup_controller(0, Up);
        let (terminate_tx, terminate_rx) = unbounded::<()>();
        let worker = spawn_worker(Arc::clone(&controller), terminate_rx).unwrap();

        // Act
        let producers: Vec<_> = (0..4)
            .map(|producer| {
                let controller = Arc::clone(&controller);
                thread::spawn(move || {
                    for floor in (1..=10).map(|f| f + producer) {
                        controller.submit_external_request(floor, Up);
                        controller.submit_internal_request(-floor, Down);
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        // Assert
        let mut pending: BTreeSet<i32> = (1..=13).chain(-13..=-1).collect();
        while !pending.is_empty() {
            match events_rx.recv_timeout(Duration::from_secs(3)) {
                Ok(CarEvent::DoorOpened { floor, .. }) => {
                    pending.remove(&floor);
                }
                Ok(_) => {}
                Err(e) => panic!("Floors never served {:?}: {:?}", pending, e),
            }
        }

        // Cleanup
        terminate_tx.send(()).unwrap();
        worker.join().unwrap();
        controller.control_elevator();
        assert!(controller.snapshot().is_empty());
    }
}
