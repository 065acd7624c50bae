pub mod cli_consts {
    //! Client Configuration Constants
    //!
    //! All tunables for polling, HTTP and the campus pickers, grouped by
    //! functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events between workers and the UI loop
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum number of chat messages kept on screen
    pub const MAX_CHAT_HISTORY: usize = 200;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Dashboard poller timing
    pub mod polling {
        /// Period between dashboard refreshes (milliseconds)
        pub const DASHBOARD_INTERVAL_MS: u64 = 2_000;

        /// Lowest interval accepted from flags or the config file (milliseconds)
        pub const MIN_INTERVAL_MS: u64 = 250;
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod http {
        use std::time::Duration;

        pub const CONNECT_TIMEOUT_SECS: u64 = 5;
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // CAMPUS DATA
    // =============================================================================

    /// Static roster data mirrored from the backend simulator
    pub mod campus {
        /// Wire value of a class that is running
        pub const ONGOING: &str = "ONGOING";

        /// Students are numbered S01..=S30
        pub const STUDENT_COUNT: usize = 30;

        /// Teachers known to the backend
        pub const TEACHERS: [&str; 2] = ["Prof. Smith", "Dr. Rao"];

        /// Student identifiers in roster order.
        pub fn student_ids() -> Vec<String> {
            (1..=STUDENT_COUNT).map(|i| format!("S{:02}", i)).collect()
        }
    }

    /// Attendance percentage bands
    pub mod attendance {
        /// At or above this percentage attendance is healthy
        pub const HEALTHY_PCT: f64 = 85.0;
        /// Below this percentage attendance is critical
        pub const CRITICAL_PCT: f64 = 75.0;
    }

    /// Inline texts shown by lookups
    pub mod messages {
        pub const FETCH_ERROR: &str = "Error fetching data.";
        pub const CHAT_UNREACHABLE: &str = "Sorry, I couldn't reach the server.";
        pub const CLASS_CANCELLED: &str = "Class Cancelled";
        pub const FREE_PERIOD: &str = "Not in a class currently (Free Period)";
        pub const LOADING: &str = "Loading...";
        pub const LOCATING: &str = "Locating...";
    }
}
