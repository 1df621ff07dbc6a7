//! Random wallpaper rotation for swww on wlroots compositors.
//!
//! [`Rotator`] is the dispatcher behind the `wallrot` binary. It is generic
//! over its [`common::ConfigStore`] and [`Desktop`] so the whole command flow
//! can run against in-memory fakes.

pub mod args;
pub mod desktop;
pub mod rotator;

pub use args::{Action, Cli, DEFAULT_INTERVAL};
pub use desktop::{Desktop, SystemDesktop};
pub use rotator::{RotationReport, Rotator, STATUS_GLYPH, print_reply};
