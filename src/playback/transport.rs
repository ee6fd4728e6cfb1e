//! Transport: the crate's real [`PlaybackClock`].
//!
//! A dedicated worker thread sleeps on a condvar until the earliest pending
//! entry is due, then fires it with the lock released. Entries are ordered by
//! (time, registration sequence), so equal onsets fire in schedule order.
//! `stop` blocks until any in-flight callback returns; afterwards nothing
//! fires until the next `start`.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration as StdDuration, Instant};

use super::engine::{EventCallback, PlaybackClock, ScheduleHandle};

struct Pending {
    at: f64,
    seq: u64,
    callback: EventCallback,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.total_cmp(&other.at).then(self.seq.cmp(&other.seq))
    }
}

struct State {
    pending: BinaryHeap<Reverse<Pending>>,
    cancelled: HashSet<u64>,
    next_seq: u64,
    /// Wall-clock instant of the last `start` call; `None` while stopped.
    origin: Option<Instant>,
    /// Seconds between `origin` and the clock's time zero.
    lead: f64,
    /// True while the worker runs a callback outside the lock.
    firing: bool,
    shutdown: bool,
    bpm: f64,
}

struct Shared {
    state: Mutex<State>,
    cv: Condvar,
}

/// Thread-backed playback clock.
pub struct Transport {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Transport {
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                pending: BinaryHeap::new(),
                cancelled: HashSet::new(),
                next_seq: 0,
                origin: None,
                lead: 0.0,
                firing: false,
                shutdown: false,
                bpm: 120.0,
            }),
            cv: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("edgetone-transport".into())
            .spawn(move || Transport::run(worker_shared))
            .expect("spawn transport worker thread");

        Self {
            shared,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Number of callbacks still waiting to fire.
    pub fn pending_count(&self) -> usize {
        let state = self.shared.state.lock().unwrap();
        state.pending.len() - state.cancelled.len()
    }

    /// Last tempo given to [`PlaybackClock::set_bpm`].
    pub fn bpm(&self) -> f64 {
        self.shared.state.lock().unwrap().bpm
    }

    fn run(shared: Arc<Shared>) {
        let mut state = shared.state.lock().unwrap();
        loop {
            if state.shutdown {
                return;
            }

            // Discard cancelled entries sitting at the head.
            while let Some(Reverse(top)) = state.pending.peek() {
                if state.cancelled.contains(&top.seq) {
                    let Reverse(entry) = state.pending.pop().unwrap();
                    state.cancelled.remove(&entry.seq);
                } else {
                    break;
                }
            }

            let Some(origin) = state.origin else {
                state = shared.cv.wait(state).unwrap();
                continue;
            };

            let Some(Reverse(top)) = state.pending.peek() else {
                state = shared.cv.wait(state).unwrap();
                continue;
            };

            let now = origin.elapsed().as_secs_f64() - state.lead;
            let due_in = top.at - now;

            if due_in <= 0.0 {
                let Reverse(entry) = state.pending.pop().unwrap();
                state.firing = true;
                drop(state);

                (entry.callback)(entry.at);

                state = shared.state.lock().unwrap();
                state.firing = false;
                shared.cv.notify_all();
            } else {
                let wait = StdDuration::from_secs_f64(due_in.min(0.25));
                let (guard, _timeout) = shared.cv.wait_timeout(state, wait).unwrap();
                state = guard;
            }
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackClock for Transport {
    fn schedule(&self, at: f64, callback: EventCallback) -> ScheduleHandle {
        let mut state = self.shared.state.lock().unwrap();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push(Reverse(Pending { at, seq, callback }));
        self.shared.cv.notify_all();
        ScheduleHandle(seq)
    }

    fn cancel(&self, handle: ScheduleHandle) {
        let mut state = self.shared.state.lock().unwrap();
        if state
            .pending
            .iter()
            .any(|Reverse(p)| p.seq == handle.0)
        {
            state.cancelled.insert(handle.0);
        }
    }

    fn cancel_all(&self) {
        let mut state = self.shared.state.lock().unwrap();
        state.pending.clear();
        state.cancelled.clear();
    }

    fn start(&self, lead: f64) {
        let mut state = self.shared.state.lock().unwrap();
        state.origin = Some(Instant::now());
        state.lead = lead.max(0.0);
        self.shared.cv.notify_all();
    }

    fn stop(&self) {
        let mut state = self.shared.state.lock().unwrap();
        state.origin = None;
        // An entry popped just before the stop must finish before we return.
        while state.firing {
            state = self.shared.cv.wait(state).unwrap();
        }
        self.shared.cv.notify_all();
    }

    fn reset(&self) {
        let mut state = self.shared.state.lock().unwrap();
        if state.origin.is_some() {
            state.origin = Some(Instant::now());
        }
        self.shared.cv.notify_all();
    }

    fn set_bpm(&self, bpm: f64) {
        self.shared.state.lock().unwrap().bpm = bpm;
    }

    fn now(&self) -> f64 {
        let state = self.shared.state.lock().unwrap();
        match state.origin {
            Some(origin) => origin.elapsed().as_secs_f64() - state.lead,
            None => 0.0,
        }
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.shutdown = true;
            self.shared.cv.notify_all();
        }
        if let Some(worker) = self.worker.lock().unwrap().take() {
            let _ = worker.join();
        }
    }
}
