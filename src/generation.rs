use std::fmt;

/// Tag attached to an outgoing request so its completion can be matched
/// against the slot that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-slot request tracker. Only the most recently issued request is ever
/// accepted, and only while it has not been abandoned.
#[derive(Debug, Default)]
pub struct Tracker {
    issued: u64,
    in_flight: Option<Generation>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding whatever was in flight.
    pub fn begin(&mut self) -> Generation {
        self.issued += 1;
        let generation = Generation(self.issued);
        self.in_flight = Some(generation);
        generation
    }

    /// Returns true when `generation` is the live request, and retires it.
    pub fn accept(&mut self, generation: Generation) -> bool {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Stops tracking the live request; its completion will be ignored.
    pub fn abandon(&mut self) {
        self.in_flight = None;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}
