mod app;
mod commands;
mod report;
mod sw_options;
mod view;

pub use sw_options::Options;

use app::App;
use colored::Colorize;
use commands::Command;
use indicatif::{ProgressBar, ProgressStyle};
use report::Report;
use swcommonlib::MonotonicClock;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use view::ViewConfig;

#[derive(Error, Debug)]
enum ShellError {
    #[error("I/O error. {0}")]
    StdIoError(#[from] std::io::Error),
    #[error("Failed to install Ctrl-C handler. {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("Failed to build the JSON report. {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid progress template. {0}")]
    Template(#[from] indicatif::style::TemplateError),
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Apply `command` to `app`. Any text to show the user is returned in `out`
fn handle_command<C: MonotonicClock>(
    app: &mut App<C>,
    view: &ViewConfig,
    command: Command,
    out: &mut Vec<String>,
) -> Flow {
    match command {
        Command::Start => {
            if !app.start() {
                out.push("already running".to_string());
            }
        }
        Command::Pause => app.pause(),
        Command::Reset => app.reset(),
        Command::Unit(unit) => app.select_unit(unit),
        Command::NextUnit => {
            app.cycle_unit();
        }
        Command::Units => out.push(view.units_line(app.unit())),
        Command::Status => out.push(view.live_line(app)),
        Command::Help => out.push(view.help()),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// What to do once stdin is closed: a running stopwatch keeps going until
/// Ctrl-C, otherwise there is nothing left to wait for
fn on_stdin_closed<C: MonotonicClock>(app: &App<C>) -> Flow {
    if app.is_running() {
        Flow::Continue
    } else {
        Flow::Quit
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
}

/// Where user messages go. With JSON output stdout carries only the report
fn message_output(options: &Options) -> Output {
    if options.is_json_output() {
        Output::Stderr
    } else {
        Output::Stdout
    }
}

fn say(options: &Options, msg: &str) {
    match message_output(options) {
        Output::Stdout => println!("{}", msg),
        Output::Stderr => eprintln!("{}", msg),
    }
}

fn new_spinner() -> Result<ProgressBar, ShellError> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    Ok(pb)
}

async fn run(options: &Options) -> Result<(), ShellError> {
    let view = ViewConfig::default();
    let mut app = App::new(options.unit);

    let (stop_tx, mut stop_rx) = tokio::sync::mpsc::unbounded_channel::<()>();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })?;

    say(options, &view.banner(app.unit()));
    say(options, &format!("Type {} for the list of commands", "help".bold()));

    let pb = new_spinner()?;
    if options.autostart {
        app.start();
    }
    pb.set_message(view.live_line(&app));

    let mut interval = tokio::time::interval(options.refresh_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            // a paused stopwatch schedules no redraws
            _ = interval.tick(), if app.is_running() => {
                if app.refresh() {
                    pb.set_message(view.live_line(&app));
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    stdin_open = false;
                    if on_stdin_closed(&app) == Flow::Quit {
                        break;
                    }
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let mut out = Vec::<String>::new();
                let flow = match line.parse::<Command>() {
                    Ok(command) => {
                        tracing::debug!("command: {:?}", command);
                        handle_command(&mut app, &view, command, &mut out)
                    }
                    Err(e) => {
                        out.push(view.error(&e.to_string()));
                        Flow::Continue
                    }
                };
                pb.suspend(|| {
                    for msg in &out {
                        say(options, msg);
                    }
                });
                pb.set_message(view.live_line(&app));
                if flow == Flow::Quit {
                    break;
                }
            }
            _ = stop_rx.recv() => {
                tracing::debug!("interrupted");
                break;
            }
        }
    }

    if app.is_running() {
        app.refresh();
        app.pause();
    }
    pb.finish_and_clear();

    let report = Report::collect(&app, options);
    if options.is_json_output() {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (mut options, cmdline) = Options::initialise();
    options.finalise();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(options.get_log_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing::info!("{}", cmdline);

    run(&options).await?;
    Ok(())
}
