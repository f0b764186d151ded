use std::time::{Duration, Instant};

use crate::global_constants::{LOG_TAG_POLLER, POLL_READ_ABANDON_AFTER_INTERVALS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTicket(u64);

/// Decides when a clipboard read may start and which completion to trust.
///
/// At most one read is outstanding. A completion is accepted only when it
/// carries the ticket of the outstanding read; anything else is stale. A read
/// that has not completed after `POLL_READ_ABANDON_AFTER_INTERVALS` intervals
/// is abandoned so a hung clipboard owner cannot stop polling for good.
#[derive(Debug, Default)]
pub struct Poller {
    last_started: Option<Instant>,
    in_flight: Option<PollTicket>,
    next_ticket: u64,
    stopped: bool,
}

impl Poller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a poll cycle when `interval` has elapsed since the previous
    /// one and no read is outstanding. `interval` is passed on every call so
    /// setting changes apply to the very next tick.
    pub fn begin_poll(&mut self, now: Instant, interval: Duration) -> Option<PollTicket> {
        if self.stopped {
            return None;
        }

        if let Some(ticket) = self.in_flight {
            let started = self.last_started.unwrap_or(now);
            let abandon_after = interval * POLL_READ_ABANDON_AFTER_INTERVALS;
            if now.saturating_duration_since(started) < abandon_after {
                log::trace!("{} read {:?} still in flight, skipping tick", LOG_TAG_POLLER, ticket);
                return None;
            }
            log::warn!(
                "{} abandoning clipboard read {:?}, no result after {:?}",
                LOG_TAG_POLLER,
                ticket,
                now.saturating_duration_since(started)
            );
            self.in_flight = None;
        }

        if let Some(last_started) = self.last_started {
            if now.saturating_duration_since(last_started) < interval {
                return None;
            }
        }

        let ticket = PollTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.last_started = Some(now);

        log::trace!("{} starting clipboard read {:?}", LOG_TAG_POLLER, ticket);
        Some(ticket)
    }

    /// Closes the poll cycle. Returns false for stale tickets, whose results
    /// must be discarded.
    pub fn complete_poll(&mut self, ticket: PollTicket) -> bool {
        if self.in_flight != Some(ticket) {
            log::debug!("{} discarding stale read {:?}", LOG_TAG_POLLER, ticket);
            return false;
        }

        self.in_flight = None;
        !self.stopped
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Cancels the repeating poll and invalidates any outstanding read.
    pub fn stop(&mut self) {
        if !self.stopped {
            log::info!("{} poller stopped", LOG_TAG_POLLER);
        }
        self.stopped = true;
        self.in_flight = None;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
