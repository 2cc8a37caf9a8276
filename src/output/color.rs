//! Color mode selection

use std::io::IsTerminal;

use clap::ValueEnum;
use termcolor::ColorChoice;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Resolve to a termcolor choice for stdout.
    pub fn choice(self) -> ColorChoice {
        if should_use_color(self) {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        }
    }
}

/// Determine whether to use color output based on mode and environment.
pub fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => auto_color(
            std::env::var_os("NO_COLOR").is_some(),
            std::env::var_os("FORCE_COLOR").is_some(),
            std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false),
            std::io::stdout().is_terminal(),
        ),
    }
}

fn auto_color(no_color: bool, force_color: bool, dumb_term: bool, is_tty: bool) -> bool {
    // https://no-color.org/ wins over everything
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    !dumb_term && is_tty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_ignore_environment() {
        assert!(should_use_color(ColorMode::Always));
        assert!(!should_use_color(ColorMode::Never));
        assert_eq!(ColorMode::Never.choice(), ColorChoice::Never);
    }

    #[test]
    fn auto_detection_precedence() {
        assert!(!auto_color(true, true, false, true));
        assert!(auto_color(false, true, true, false));
        assert!(!auto_color(false, false, true, true));
        assert!(auto_color(false, false, false, true));
        assert!(!auto_color(false, false, false, false));
    }
}
