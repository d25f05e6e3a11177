use crate::app::{App, Status};
use crate::commands::HELP;
use colored::{Color, ColoredString, Colorize};
use swcommonlib::{CommonError, MonotonicClock, TimeUnit};

/// Look and texts of the stopwatch screen
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub title: &'static str,
    pub header: &'static str,
    pub footer: &'static str,
    pub accent: &'static str,
    pub readout: &'static str,
    pub status_offline: &'static str,
    pub status_online: &'static str,
    pub status_paused: &'static str,
    pub muted: &'static str,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            title: "⚡ Tech Timer",
            header: "SYSTEM TIMER",
            footer: "SYSTEM READY • v1.0",
            accent: "#00f0ff",
            readout: "#ffffff",
            status_offline: "#888888",
            status_online: "#00ff88",
            status_paused: "#ffaa00",
            muted: "#444444",
        }
    }
}

/// Parse "#rrggbb" into a true color
pub fn parse_hex_color(hex: &str) -> Result<Color, CommonError> {
    let invalid = || CommonError::InvalidArgument(format!("invalid color `{}`", hex));
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel =
        |pos: usize| u8::from_str_radix(&digits[pos..pos + 2], 16).map_err(|_| invalid());
    Ok(Color::TrueColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

impl ViewConfig {
    fn paint(&self, text: &str, hex: &str) -> ColoredString {
        match parse_hex_color(hex) {
            Ok(color) => text.color(color),
            Err(e) => {
                tracing::warn!("{}", e);
                text.normal()
            }
        }
    }

    fn status_color(&self, status: Status) -> &'static str {
        match status {
            Status::Offline => self.status_offline,
            Status::Online => self.status_online,
            Status::Paused => self.status_paused,
        }
    }

    pub fn status_text(status: Status) -> String {
        format!("STATUS: {}", status.label())
    }

    /// Title, header and the unit selector, printed once at startup
    pub fn banner(&self, unit: TimeUnit) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.paint(self.title, self.accent).bold(),
            self.paint(self.header, self.accent).bold(),
            self.units_line(unit),
            self.paint(self.footer, self.muted),
        )
    }

    /// The selector choices, `selected` highlighted
    pub fn units_line(&self, selected: TimeUnit) -> String {
        let units: Vec<String> = TimeUnit::SELECTABLE
            .iter()
            .map(|unit| {
                if *unit == selected {
                    format!("[{}]", self.paint(unit.as_str(), self.accent).bold())
                } else {
                    unit.as_str().to_string()
                }
            })
            .collect();
        format!("units: {}", units.join(" "))
    }

    /// The live readout line: "<value> <unit>  STATUS: <status>"
    pub fn live_line<C: MonotonicClock>(&self, app: &App<C>) -> String {
        format!(
            "{}  {}",
            self.paint(app.readout(), self.readout).bold(),
            self.paint(&Self::status_text(app.status()), self.status_color(app.status())),
        )
    }

    pub fn help(&self) -> String {
        let width = HELP.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);
        HELP.iter()
            .map(|(cmd, desc)| {
                let cmd = format!("{:width$}", cmd);
                format!("  {}  {}", self.paint(&cmd, self.accent), desc)
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn error(&self, msg: &str) -> String {
        format!("{}: {}", "error".red().bold(), msg)
    }
}
