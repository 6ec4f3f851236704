use std::time::{Duration, Instant};

pub const DEFAULT_PREVIEW_DELAY: Duration = Duration::from_millis(250);

/// Identifies one preview request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PreviewTicket {
    generation: u64,
}

impl PreviewTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Trailing debounce for preview renders.
///
/// Every input change calls [`request`](Self::request); only the most recent request
/// becomes due, once `delay` has passed without another one. A finished render is
/// kept only if [`accept`](Self::accept) says its ticket is still the latest.
#[derive(Clone, Debug)]
pub struct PreviewScheduler {
    delay: Duration,
    generation: u64,
    pending: Option<(PreviewTicket, Instant)>,
}

impl Default for PreviewScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_DELAY)
    }
}

impl PreviewScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an input change at `now`, superseding any earlier request.
    pub fn request(&mut self, now: Instant) -> PreviewTicket {
        self.generation += 1;
        let ticket = PreviewTicket {
            generation: self.generation,
        };
        self.pending = Some((ticket, now + self.delay));
        ticket
    }

    /// The pending request, once its quiet period has elapsed. Returned at most once.
    pub fn due(&mut self, now: Instant) -> Option<PreviewTicket> {
        match self.pending {
            Some((ticket, at)) if now >= at => {
                self.pending = None;
                Some(ticket)
            }
            _ => None,
        }
    }

    /// When the pending request becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at)
    }

    /// Whether a render started for `ticket` may be shown.
    pub fn accept(&self, ticket: PreviewTicket) -> bool {
        let latest = ticket.generation == self.generation;
        if !latest {
            tracing::debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "discarding superseded preview"
            );
        }
        latest
    }

    /// Drop the pending request and invalidate every issued ticket.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
