use crate::app::{App, Status};
use crate::Options;
use colored::Colorize;
use serde::Serialize;
use swcommonlib::{MonotonicClock, TimeUnit};

/// Summary of a stopwatch session
#[derive(Serialize, Debug)]
pub struct Report {
    elapsed_ns: u64,
    unit: TimeUnit,
    reading: f64,
    readout: String,
    status: Status,
    ticks: u64,
    options: Options,
}

impl Report {
    pub fn collect<C: MonotonicClock>(app: &App<C>, opts: &Options) -> Self {
        Report {
            elapsed_ns: app.elapsed_nanos(),
            unit: app.unit(),
            reading: app.reading(),
            readout: app.readout().to_string(),
            status: app.status(),
            ticks: app.ticks(),
            options: opts.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {} ({} ns, {} ticks)",
            "Total:".bold(),
            self.readout.bold(),
            self.elapsed_ns,
            self.ticks
        )
    }
}
