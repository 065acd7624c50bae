//! Session start and stop lines

use crate::environment::Environment;
use std::time::Duration;

const CYAN: &str = "\x1b[1;36m";
const GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Success,
}

fn announce(tone: Tone, msg: &str) {
    let (color, tag) = match tone {
        Tone::Info => (CYAN, "INFO"),
        Tone::Success => (GREEN, "SUCCESS"),
    };
    println!("{}[{}]{} {}", color, tag, RESET, msg);
}

pub fn session_banner(mode: &str, environment: &Environment, interval: Duration) -> String {
    format!(
        "Starting {} mode against {} (dashboard every {}ms)",
        mode,
        environment,
        interval.as_millis()
    )
}

pub fn print_session_starting(mode: &str, environment: &Environment, interval: Duration) {
    announce(Tone::Info, &session_banner(mode, environment, interval));
}

pub fn print_session_shutdown() {
    announce(Tone::Info, "Shutting down...");
}

pub fn print_session_exit_success() {
    announce(Tone::Success, "College Pulse exited successfully");
}
