use serde::Serialize;
use swcommonlib::{Accumulator, MonotonicClock, StringUtils, SystemClock, TimeUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Offline,
    Online,
    Paused,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Offline => "OFFLINE",
            Status::Online => "ONLINE",
            Status::Paused => "PAUSED",
        }
    }
}

/// The stopwatch application state: one accumulator, the run flag and what
/// is currently displayed
pub struct App<C: MonotonicClock = SystemClock> {
    accumulator: Accumulator<C>,
    running: bool,
    unit: TimeUnit,
    status: Status,
    readout: String,
    ticks: u64,
}

impl App<SystemClock> {
    pub fn new(unit: TimeUnit) -> Self {
        Self::with_accumulator(Accumulator::new(), unit)
    }
}

impl<C: MonotonicClock> App<C> {
    pub fn with_accumulator(accumulator: Accumulator<C>, unit: TimeUnit) -> Self {
        App {
            accumulator,
            running: false,
            unit,
            status: Status::Offline,
            readout: StringUtils::format_reading(0.0, unit),
            ticks: 0,
        }
    }

    /// Resume refreshing. The first refresh measures from the previous tick (or
    /// reset), so idle and paused time is included. Return `false` if the
    /// stopwatch was already running
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.status = Status::Online;
        tracing::debug!("stopwatch started");
        true
    }

    /// Stop refreshing. The readout keeps the value of the last refresh
    pub fn pause(&mut self) {
        self.running = false;
        self.status = Status::Paused;
        tracing::debug!("stopwatch paused at {}", self.readout);
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.accumulator.reset();
        self.ticks = 0;
        self.readout = StringUtils::format_reading(0.0, self.unit);
        self.status = Status::Offline;
        tracing::debug!("stopwatch reset");
    }

    /// Change the display unit. The readout is refreshed without taking a new measurement
    pub fn select_unit(&mut self, unit: TimeUnit) {
        self.unit = unit;
        self.update_readout();
    }

    /// Select the next unit in the selector list
    pub fn cycle_unit(&mut self) -> TimeUnit {
        self.select_unit(self.unit.next_selectable());
        self.unit
    }

    /// Called on every redraw. When running, measure then update the readout.
    /// Return `true` if the readout has changed
    pub fn refresh(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let before = self.accumulator.elapsed_nanos();
        self.tick();
        before != self.accumulator.elapsed_nanos()
    }

    fn tick(&mut self) {
        self.accumulator.tick();
        self.ticks = self.ticks.saturating_add(1);
        self.update_readout();
    }

    fn update_readout(&mut self) {
        let value = self.accumulator.elapsed_in(self.unit);
        self.readout = StringUtils::format_reading(value, self.unit);
    }

    pub fn readout(&self) -> &str {
        &self.readout
    }

    /// Current reading in the selected unit
    pub fn reading(&self) -> f64 {
        self.accumulator.elapsed_in(self.unit)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_nanos(&self) -> u64 {
        self.accumulator.elapsed_nanos()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
