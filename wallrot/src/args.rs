use clap::Parser;
use common::Mode;
use std::ffi::OsStr;
use std::time::Duration;

/// Daemon rotation interval when none (or garbage) is given
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Environment variable i3blocks sets to the clicked mouse button
pub const BLOCK_BUTTON_VAR: &str = "BLOCK_BUTTON";

/// Random wallpaper rotation for swww, driven from a status bar or a daemon.
///
/// Only the first argument selects the command; anything after it is ignored
/// except for the daemon interval.
#[derive(Parser, Debug)]
#[command(name = "wallrot")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// `--daemon [INTERVAL]`, `--static` or `--dynamic`; none prints the status glyph
    #[arg(
        value_name = "OPTION",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// What a single invocation should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the status glyph, rotating first if the bar reported a click
    Status { clicked: bool },
    Daemon { interval: Duration },
    SetMode(Mode),
    Invalid,
}

impl Action {
    /// Whether the action reads the config or calls any external tool
    pub fn needs_desktop(&self) -> bool {
        !matches!(self, Self::Status { clicked: false } | Self::Invalid)
    }
}

impl Cli {
    /// Dispatch on the first argument. `block_button` is the value of
    /// [`BLOCK_BUTTON_VAR`], consulted only when no argument was given.
    pub fn action(&self, block_button: Option<&OsStr>) -> Action {
        let Some(first) = self.args.first() else {
            return Action::Status {
                clicked: block_button.is_some_and(|b| !b.is_empty()),
            };
        };

        match first.as_str() {
            "--daemon" => Action::Daemon {
                interval: parse_interval(self.args.get(1).map(String::as_str)),
            },
            "--static" => Action::SetMode(Mode::Static),
            "--dynamic" => Action::SetMode(Mode::Dynamic),
            _ => Action::Invalid,
        }
    }
}

/// Interval in whole seconds; anything unparseable falls back to the default
pub fn parse_interval(arg: Option<&str>) -> Duration {
    match arg.map(|a| a.trim().parse::<u64>()) {
        Some(Ok(0)) => {
            log::warn!(
                "Interval must be positive, using {}s",
                DEFAULT_INTERVAL.as_secs()
            );
            DEFAULT_INTERVAL
        }
        Some(Ok(secs)) => Duration::from_secs(secs),
        Some(Err(_)) | None => DEFAULT_INTERVAL,
    }
}
