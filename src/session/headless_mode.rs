//! Headless mode execution
//!
//! Expects a session started with the admin section visible. Every
//! displayable event and every snapshot is printed to stdout until Ctrl+C.

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::{Event, EventType};
use std::error::Error;

fn should_print(event: &Event) -> bool {
    event.event_type == EventType::Snapshot || event.should_display()
}

pub async fn run_headless_mode(session: SessionData) -> Result<(), Box<dyn Error>> {
    let SessionData {
        mut event_receiver,
        mut poller,
        shutdown_sender,
        settings,
        ..
    } = session;

    print_session_starting("headless", &settings.environment, settings.poll_interval);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = shutdown_sender.subscribe();

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = event_receiver.recv() => {
                if should_print(&event) {
                    println!("{}", event);
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    // Unblock the poller if it is waiting on a full queue
    drop(event_receiver);
    poller.stop().await?;
    print_session_exit_success();

    Ok(())
}
