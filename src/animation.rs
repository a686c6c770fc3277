//! Depth-reveal scheduling for the slowly drawn tree.
//!
//! `Scheduler` decides when the next depth level is due. `spawn` runs it on a
//! timing thread that hands each due level to the render loop over a channel;
//! the timing thread never draws.

use crate::config::constants::SLOW_DRAW_INTERVAL;
use std::io;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Message from the timing thread asking for a repaint at a depth
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepaintRequest {
    pub depth: u32,
}

/// Fires one depth level per interval of elapsed time
#[derive(Clone, Debug)]
pub struct Scheduler {
    start: Instant,
    interval: Duration,
    steps_completed: u32,
}

impl Scheduler {
    pub fn new(start: Instant) -> Self {
        Self::with_interval(start, SLOW_DRAW_INTERVAL)
    }

    pub fn with_interval(start: Instant, interval: Duration) -> Self {
        Self {
            start,
            interval,
            steps_completed: 0,
        }
    }

    pub fn steps_completed(&self) -> u32 {
        self.steps_completed
    }

    /// When the next level becomes due
    pub fn next_due(&self) -> Instant {
        self.start + self.interval * self.steps_completed()
    }

    /// Fire the next level if it is due at `now`. The returned depth always
    /// equals the step count before it is bumped.
    pub fn step(&mut self, now: Instant) -> Option<u32> {
        if now.saturating_duration_since(self.start) < self.interval * self.steps_completed {
            return None;
        }

        let depth = self.steps_completed;
        self.steps_completed += 1;
        Some(depth)
    }

    /// Evaluate `steps` checks back to back, collecting every level fired
    pub fn tick(&mut self, now: Instant, steps: u32) -> Vec<u32> {
        (0..steps).filter_map(|_| self.step(now)).collect()
    }
}

/// Run `scheduler` on a timing thread. Each fired level is sent as a
/// `RepaintRequest`; the thread sleeps until the next level is due and exits
/// once the receiving side is gone.
pub fn spawn(
    mut scheduler: Scheduler,
    steps_per_tick: u32,
    requests: Sender<RepaintRequest>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tree-timer".into())
        .spawn(move || loop {
            let now = Instant::now();
            for depth in scheduler.tick(now, steps_per_tick) {
                log::debug!("depth {} due after {:?}", depth, now - scheduler.start);
                if requests.send(RepaintRequest { depth }).is_err() {
                    log::debug!("repaint channel closed, stopping timer");
                    return;
                }
            }

            let wait = scheduler.next_due().saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                thread::sleep(wait);
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_level_fires_immediately() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(t0);
        assert_eq!(scheduler.step(t0), Some(0));
        assert_eq!(scheduler.steps_completed(), 1);
        assert_eq!(scheduler.step(t0), None);
    }

    #[test]
    fn levels_follow_the_interval() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(t0);
        assert_eq!(scheduler.step(t0), Some(0));

        assert_eq!(scheduler.step(t0 + ms(49)), None);
        assert_eq!(scheduler.step(t0 + ms(50)), Some(1));
        assert_eq!(scheduler.step(t0 + ms(99)), None);
        assert_eq!(scheduler.step(t0 + ms(100)), Some(2));

        // level n is due at n * 50ms
        for n in 3..20u32 {
            assert_eq!(scheduler.next_due(), t0 + ms(50) * n);
            assert_eq!(scheduler.step(t0 + ms(50) * n), Some(n));
        }
    }

    #[test]
    fn double_tick_catches_up_one_extra_level() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(t0);

        // at t=60ms levels 0 and 1 are both due
        assert_eq!(scheduler.tick(t0 + ms(60), 2), vec![0, 1]);
        // level 2 is due at 100ms, a second check in the same tick finds nothing
        assert_eq!(scheduler.tick(t0 + ms(100), 2), vec![2]);
        assert_eq!(scheduler.tick(t0 + ms(120), 2), Vec::<u32>::new());
    }

    #[test]
    fn single_tick_fires_at_most_once() {
        let t0 = Instant::now();
        let mut scheduler = Scheduler::new(t0);
        assert_eq!(scheduler.tick(t0 + ms(500), 1), vec![0]);
        assert_eq!(scheduler.tick(t0 + ms(500), 1), vec![1]);
    }

    #[test]
    fn timer_thread_sends_increasing_depths() {
        let (tx, rx) = mpsc::channel();
        let scheduler = Scheduler::with_interval(Instant::now(), ms(1));
        let handle = spawn(scheduler, 2, tx).expect("spawn timer");

        let depths: Vec<u32> = (0..5)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).expect("repaint request").depth)
            .collect();
        assert_eq!(depths, vec![0, 1, 2, 3, 4]);

        drop(rx);
        handle.join().expect("timer thread panicked");
    }
}
