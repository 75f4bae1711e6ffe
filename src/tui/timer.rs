//! Single-shot timer service.
//!
//! One background thread owns a min-heap of pending deliveries. Callers
//! send `(delay, Msg)` requests; each message is forwarded to the event
//! channel exactly once, no earlier than its delay. There is no
//! cancellation: a chain of ticks stops simply by not being rescheduled.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use super::state::Msg;

/// A pending delivery, ordered by deadline then by request order.
#[derive(Debug)]
struct Pending {
    deadline: Instant,
    seq: u64,
    msg: Msg,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

/// Handle for scheduling deliveries.
///
/// Dropping every handle stops the timer thread once it next wakes.
#[derive(Debug, Clone)]
pub struct Timer {
    requests: mpsc::Sender<(Duration, Msg)>,
}

impl Timer {
    /// Spawn the timer thread, delivering into `events`.
    pub fn spawn(events: mpsc::Sender<Msg>) -> Self {
        let (requests, rx) = mpsc::channel();
        thread::spawn(move || run(rx, events));
        Self { requests }
    }

    /// Request one delivery of `msg` after `delay`.
    ///
    /// Fire-and-forget: returns immediately. Silently dropped if the
    /// timer thread has already stopped.
    pub fn schedule(&self, delay: Duration, msg: Msg) {
        let _ = self.requests.send((delay, msg));
    }
}

fn run(requests: mpsc::Receiver<(Duration, Msg)>, events: mpsc::Sender<Msg>) {
    let mut pending: BinaryHeap<Reverse<Pending>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    loop {
        // Deliver everything that is due
        let now = Instant::now();
        while pending.peek().is_some_and(|Reverse(p)| p.deadline <= now) {
            if let Some(Reverse(due)) = pending.pop() {
                trace!(msg = ?due.msg, "timer fired");
                if events.send(due.msg).is_err() {
                    return; // event loop is gone
                }
            }
        }

        // Sleep until the next deadline or the next request
        let request = match pending.peek() {
            Some(Reverse(next)) => {
                let wait = next.deadline.saturating_duration_since(Instant::now());
                match requests.recv_timeout(wait) {
                    Ok(request) => Some(request),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            }
            None => match requests.recv() {
                Ok(request) => Some(request),
                Err(_) => return,
            },
        };

        if let Some((delay, msg)) = request {
            pending.push(Reverse(Pending {
                deadline: Instant::now() + delay,
                seq,
                msg,
            }));
            seq += 1;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
