//! Blink state machine definition

use crate::config::DEFAULT_BLINK_INTERVAL_MS;

/// Blink states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkState {
    /// Not blinking; the pixel shows whatever was last rendered
    #[default]
    Idle,
    /// Blinking; `elapsed_ms` is the time since the last flip
    Blinking { elapsed_ms: u32 },
}

/// Events that drive the blink machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkEvent {
    /// Start blinking (no-op if already blinking)
    Start,
    /// Stop blinking (no-op if idle)
    Stop,
    /// Time has passed
    Elapsed(u32),
}

/// What the owner of the machine has to do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkAction {
    /// Nothing to draw
    None,
    /// Flip the pixel: lit if currently unlit, unlit if currently lit
    Toggle,
    /// Force the pixel unlit (blink cancelled)
    ForceOff,
}

impl BlinkState {
    /// Check if the machine is blinking
    pub fn is_blinking(&self) -> bool {
        matches!(self, BlinkState::Blinking { .. })
    }

    /// Process an event and return the next state and the action to take
    ///
    /// `interval_ms` is the time between flips and must be non-zero.
    pub fn transition(self, event: BlinkEvent, interval_ms: u32) -> (Self, BlinkAction) {
        use BlinkEvent::*;
        use BlinkState::*;

        match (self, event) {
            (Idle, Start) => (Blinking { elapsed_ms: 0 }, BlinkAction::None),
            (Blinking { .. }, Stop) => (Idle, BlinkAction::ForceOff),

            (Blinking { elapsed_ms }, Elapsed(delta_ms)) => {
                let interval = interval_ms.max(1) as u64;
                let total = elapsed_ms as u64 + delta_ms as u64;
                let flips = total / interval;
                let remainder = (total % interval) as u32;

                // An even number of flips lands back on the same state
                let action = if flips % 2 == 1 {
                    BlinkAction::Toggle
                } else {
                    BlinkAction::None
                };
                (Blinking { elapsed_ms: remainder }, action)
            }

            // Start while blinking, stop while idle, time while idle
            (state, _) => (state, BlinkAction::None),
        }
    }
}

/// Blink state machine bound to an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blinker {
    state: BlinkState,
    interval_ms: u32,
}

impl Default for Blinker {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_INTERVAL_MS)
    }
}

impl Blinker {
    /// Create an idle blinker; a zero interval is treated as 1 ms
    pub fn new(interval_ms: u32) -> Self {
        Self {
            state: BlinkState::Idle,
            interval_ms: interval_ms.max(1),
        }
    }

    /// Current state
    pub fn state(&self) -> BlinkState {
        self.state
    }

    /// Time between flips
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Check if blinking
    pub fn is_blinking(&self) -> bool {
        self.state.is_blinking()
    }

    /// Feed an event to the machine
    pub fn handle(&mut self, event: BlinkEvent) -> BlinkAction {
        let (next, action) = self.state.transition(event, self.interval_ms);
        self.state = next;
        action
    }

    /// Start blinking
    pub fn start(&mut self) -> BlinkAction {
        self.handle(BlinkEvent::Start)
    }

    /// Stop blinking
    pub fn stop(&mut self) -> BlinkAction {
        self.handle(BlinkEvent::Stop)
    }

    /// Advance the clock
    pub fn advance(&mut self, delta_ms: u32) -> BlinkAction {
        self.handle(BlinkEvent::Elapsed(delta_ms))
    }
}
