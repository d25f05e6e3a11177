use clap::Parser;
use colored::Colorize;
use ini::Ini;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use swcommonlib::TimeUnit;

lazy_static::lazy_static! {
    static ref PRESETS: RwLock<HashMap<String, String>> =
        RwLock::<HashMap<String, String>>::default();
}

pub const DEFAULT_REFRESH_MS: u64 = 16;
const PRESETS_FILE: &str = ".sw.ini";

#[derive(Parser, Debug, Clone, Serialize)]
#[clap(disable_help_flag = true)]
pub struct Options {
    /// Print this help message and exit
    #[arg(long, action = clap::ArgAction::HelpLong)]
    #[serde(skip)]
    help: Option<bool>,

    /// Initial display unit
    #[arg(short, long, value_enum, default_value = "s")]
    pub unit: TimeUnit,

    /// Readout refresh interval, in milliseconds. While the stopwatch is running,
    /// it is measured and redrawn once per interval
    #[arg(short, long, default_value = "16", verbatim_doc_comment)]
    pub refresh_ms: u64,

    /// Log level
    #[arg(short, long, default_value = "error")]
    pub log_level: String,

    /// Start measuring immediately instead of waiting for the "start" command
    #[arg(short, long, default_value = "false")]
    pub autostart: bool,

    /// If set, a JSON report of the session is printed to stdout on exit
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Use preset command line. If set, "sw" will search for the preset name
    /// in the configuration file "$HOME/.sw.ini" with that exact name and use the command line
    /// set there.
    #[arg(short = 's', long, verbatim_doc_comment)]
    pub preset: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            help: None,
            unit: TimeUnit::Seconds,
            refresh_ms: DEFAULT_REFRESH_MS,
            log_level: "error".into(),
            autostart: false,
            json: false,
            no_color: false,
            preset: None,
        }
    }
}

impl Options {
    /// Finalise the values provided by the user
    pub fn finalise(&mut self) {
        if self.refresh_ms == 0 {
            self.refresh_ms = DEFAULT_REFRESH_MS;
        }

        if self.no_color {
            colored::control::set_override(false);
        }
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.refresh_ms)
    }

    /// Return true if the session report should be printed as JSON
    pub fn is_json_output(&self) -> bool {
        self.json
    }

    pub fn get_log_level(&self) -> tracing::Level {
        let log_level = self.log_level.to_lowercase();
        match log_level.as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }

    /// Initialise the options from the command line arguments + configuration file (if one exists)
    pub fn initialise() -> (Self, String) {
        let args: Vec<String> = std::env::args().collect();
        match Self::preset_name(&args) {
            Err(msg) => {
                eprintln!("{}: {}", "error".red().bold(), msg);
                std::process::exit(1);
            }
            Ok(None) => {
                // No preset is requested
                let cmdline = args.join(" ");
                (Self::parse_from(args), cmdline)
            }
            Ok(Some(preset)) => {
                let command = match Self::load_preset(&preset) {
                    Ok(command) => command,
                    Err(msg) => {
                        eprintln!("{}: {}", "error".red().bold(), msg);
                        std::process::exit(1);
                    }
                };
                let preset_args = Self::merge_preset_args(&command, args);
                let cmdline = preset_args.join(" ");
                (Self::parse_from(preset_args), cmdline)
            }
        }
    }

    /// Look for "--preset <name>" or "-s <name>" in `args`
    fn preset_name(args: &[String]) -> Result<Option<String>, String> {
        let mut iter = args.iter();
        while let Some(argument) = iter.next() {
            if argument.eq("--preset") || argument.eq("-s") {
                return match iter.next() {
                    Some(value) => Ok(Some(value.clone())),
                    None => Err(format!("{} is missing a value", argument)),
                };
            }
        }
        Ok(None)
    }

    /// Read the "command" line of preset `name` from "$HOME/.sw.ini"
    fn load_preset(name: &str) -> Result<String, String> {
        #[cfg(windows)]
        let home = "USERPROFILE";
        #[cfg(not(windows))]
        let home = "HOME";
        let Ok(homedir) = std::env::var(home) else {
            return Err(format!("could not locate environment variable {}", home));
        };

        let mut filepath = std::path::PathBuf::from(homedir);
        filepath.push(PRESETS_FILE);
        let Ok(content) = std::fs::read_to_string(&filepath) else {
            return Err(format!(
                "could not read configuration file '{}'",
                filepath.display()
            ));
        };

        Self::parse_presets(&content)
            .map_err(|e| format!("{} ('{}')", e, filepath.display()))?;

        let presets = PRESETS.read().expect("preset lock error");
        let Some(command) = presets.get(name) else {
            return Err(format!(
                "preset name '{}' could not be found in configuration file: '{}'",
                name.bold(),
                filepath.display()
            ));
        };
        Ok(command.trim().to_string())
    }

    /// Parse INI `content` and register every section holding a "command" key as a preset
    fn parse_presets(content: &str) -> Result<usize, String> {
        let Ok(config) = Ini::load_from_str(content) else {
            return Err("failed to parse INI file".to_string());
        };

        let mut count = 0usize;
        let mut presets = PRESETS.write().expect("preset lock error");
        // Each section is the name of the preset
        for (name, props) in &config {
            let Some(name) = name else {
                continue;
            };
            if let Some(command) = props.get("command") {
                presets.insert(name.to_string(), command.to_string());
                count += 1;
            }
        }
        Ok(count)
    }

    /// Build the command line: exe <preset args> <cmd line args>
    fn merge_preset_args(command: &str, mut args: Vec<String>) -> Vec<String> {
        let mut preset_args: Vec<String> = command
            .split_whitespace()
            .map(|s| s.to_string())
            .collect();
        if !args.is_empty() {
            let exe = args.remove(0);
            preset_args.insert(0, exe);
        }
        preset_args.extend(args);
        preset_args
    }
}
