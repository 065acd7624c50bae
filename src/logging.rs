//! Display threshold for worker events.
//!
//! `COLLEGE_PULSE_LOG` wins over `RUST_LOG`. Both accept either a bare level or
//! `target=level` directives; a directive for this crate beats the global one.

pub use crate::error_classifier::LogLevel;
use std::env;

pub const LOG_ENV_VAR: &str = "COLLEGE_PULSE_LOG";

const CRATE_TARGET: &str = "college_pulse";

pub fn get_log_level() -> LogLevel {
    let directives = env::var(LOG_ENV_VAR)
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    parse_log_directives(&directives)
}

pub fn parse_log_directives(directives: &str) -> LogLevel {
    let mut global = None;
    let mut ours = None;

    for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        match directive.split_once('=') {
            Some((target, level)) => {
                if target.trim() == CRATE_TARGET || target.trim().starts_with("college_pulse::") {
                    ours = ours.or_else(|| level.parse().ok());
                }
            }
            None => global = global.or_else(|| directive.parse().ok()),
        }
    }

    ours.or(global).unwrap_or(LogLevel::Info)
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, get_log_level())
}
