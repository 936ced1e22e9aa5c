//! Ctrl+C handling
//!
//! The first Ctrl+C only raises a flag. The session polls it between states,
//! so the ticker is always joined before the process exits. A second Ctrl+C
//! exits at once, since by then the session is usually blocked on stdin.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::status::ExitStatus;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Whether Ctrl+C has been pressed
#[inline]
pub fn was_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

#[cfg(test)]
fn reset_interrupted() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Raise the flag; report whether this was the second press
fn on_interrupt() -> bool {
    INTERRUPTED.swap(true, Ordering::SeqCst)
}

/// Install the process-wide Ctrl+C handler
pub fn install_handler() {
    // Fails only when another handler is already installed
    ctrlc::set_handler(|| {
        let repeated = on_interrupt();
        eprintln!("\nInterrupted");
        if repeated {
            std::process::exit(ExitStatus::Interrupted as i32);
        }
    })
    .ok();
}
