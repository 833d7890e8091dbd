//! Status LED blink patterns
//!
//! A [`Blinker`] walks a cyclic list of (level, duration) steps. The
//! firmware task asks for the [`next_step`](Blinker::next_step), drives the
//! LED and sleeps for the step's duration; [`advance`](Blinker::advance)
//! models the same cycle against elapsed time for testing and reporting.

/// LED drive level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Off,
    On,
}

impl Level {
    pub const fn is_on(self) -> bool {
        matches!(self, Level::On)
    }

    /// Pin state that shows this level on an LED wired active-low or
    /// active-high
    pub const fn pin_high(self, active_low: bool) -> bool {
        self.is_on() != active_low
    }
}

/// One step of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub level: Level,
    pub duration_ms: u32,
}

impl Step {
    pub const fn new(level: Level, duration_ms: u32) -> Self {
        Self { level, duration_ms }
    }
}

/// Heartbeat: long pause then a double flash
pub const HEARTBEAT: &[Step] = &[
    Step::new(Level::Off, 1000),
    Step::new(Level::On, 100),
    Step::new(Level::Off, 100),
    Step::new(Level::On, 100),
];

/// Rapid blink signalling an unrecoverable startup failure
pub const DIAGNOSTIC: &[Step] = &[Step::new(Level::On, 50), Step::new(Level::Off, 50)];

/// Position within a blink pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blinker {
    pattern: &'static [Step],
    index: usize,
    elapsed_ms: u32,
}

impl Default for Blinker {
    fn default() -> Self {
        Self::new()
    }
}

impl Blinker {
    /// Heartbeat pattern, at the end of its final "on" step
    pub const fn new() -> Self {
        Self::with_pattern(HEARTBEAT)
    }

    /// Start at the end of the last step of `pattern`
    ///
    /// The first [`next_step`](Self::next_step) yields the pattern's first
    /// step. `pattern` must be non-empty.
    pub const fn with_pattern(pattern: &'static [Step]) -> Self {
        let index = pattern.len() - 1;
        Self {
            pattern,
            index,
            elapsed_ms: pattern[index].duration_ms,
        }
    }

    /// Current LED level
    pub fn level(&self) -> Level {
        self.pattern[self.index].level
    }

    /// Time already spent in the current step
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Total duration of one cycle
    pub fn period_ms(&self) -> u32 {
        self.pattern.iter().map(|s| s.duration_ms).sum()
    }

    /// Move to the start of the following step and return it
    pub fn next_step(&mut self) -> Step {
        self.index = (self.index + 1) % self.pattern.len();
        self.elapsed_ms = 0;
        self.pattern[self.index]
    }

    /// Let `ms` of time pass
    ///
    /// A step that runs out exactly at the end of `ms` is kept (elapsed
    /// equals its duration); the switch to the next step happens only once
    /// more time passes.
    pub fn advance(&mut self, ms: u32) {
        let mut remaining = ms;

        let left = self.pattern[self.index].duration_ms - self.elapsed_ms;
        if remaining <= left {
            self.elapsed_ms += remaining;
            return;
        }
        remaining -= left;
        self.elapsed_ms += left;

        // Whole cycles from the end of a step land at the end of that step
        let period = self.period_ms();
        if period == 0 {
            return;
        }
        if remaining > period {
            remaining = (remaining - 1) % period + 1;
        }

        while remaining > 0 {
            let step = self.next_step();
            let take = remaining.min(step.duration_ms);
            self.elapsed_ms = take;
            remaining -= take;
        }
    }
}
