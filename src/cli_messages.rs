//! One-shot command output
//!
//! Tagged, colored lines for `status`, `attendance`, `locate`, `chat` and the
//! config commands.

const INFO: &str = "\x1b[1;33m";
const WARN: &str = "\x1b[1;91m";
const ERROR: &str = "\x1b[1;31m";
const SUCCESS: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

fn print_tagged(color: &str, tag: &str, title: &str, details: &str) {
    if details.is_empty() {
        println!("{}[{}]{} {}", color, tag, RESET, title);
    } else {
        println!("{}[{}]{} {}\t {}", color, tag, RESET, title, details);
    }
}

pub fn print_info(title: &str, details: &str) {
    print_tagged(INFO, "INFO", title, details);
}

pub fn print_warn(title: &str, details: &str) {
    print_tagged(WARN, "WARN", title, details);
}

/// Errors print the details on a second line.
pub fn print_error(title: &str, details: Option<&str>) {
    println!("{}[ERROR]{} {}", ERROR, RESET, title);
    if let Some(details) = details {
        println!("{}[ERROR]{} Details: {}", ERROR, RESET, details);
    }
}

pub fn print_success(title: &str, details: &str) {
    print_tagged(SUCCESS, "SUCCESS", title, details);
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
