use std::str::FromStr;
use swcommonlib::{CommonError, TimeUnit};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`. Type `help` for the list of commands")]
    Unknown(String),
    #[error("command `{0}` is missing an argument")]
    MissingArgument(String),
    #[error("{0}")]
    Unit(#[from] CommonError),
}

/// A command typed by the user on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Reset,
    Unit(TimeUnit),
    NextUnit,
    Units,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match word.to_lowercase().as_str() {
            "start" => Command::Start,
            "pause" => Command::Pause,
            "reset" => Command::Reset,
            "next" => Command::NextUnit,
            "units" => Command::Units,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "unit" => {
                let Some(unit) = words.next() else {
                    return Err(CommandError::MissingArgument(word.to_string()));
                };
                Command::Unit(unit.parse()?)
            }
            // a bare unit identifier selects that unit
            _ => match word.parse::<TimeUnit>() {
                Ok(unit) => Command::Unit(unit),
                Err(_) => return Err(CommandError::Unknown(word.to_string())),
            },
        };
        Ok(command)
    }
}

/// Command summary printed by `help`
pub const HELP: &[(&str, &str)] = &[
    ("start", "start or resume measuring"),
    ("pause", "pause measuring"),
    ("reset", "stop and zero the stopwatch"),
    ("unit <id>", "display in unit <id> (ns, us, ms, s, min, h, d)"),
    ("<id>", "same as \"unit <id>\""),
    ("next", "switch to the next display unit"),
    ("units", "list the display units"),
    ("status", "print the current reading"),
    ("help", "print this help"),
    ("quit", "exit"),
];
