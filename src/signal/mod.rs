//! Operator interrupt handling (SIGINT/SIGTERM)
//!
//! On the first signal the interrupt flag is raised; the pipeline checks it
//! between stages and stops with an `Interrupted` error. A second signal
//! exits the process immediately. Both paths exit with code 1.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// Exit code for interrupted runs
pub const EXIT_CODE_INTERRUPTED: i32 = 1;

/// Signal handler state
#[derive(Debug, Default)]
pub struct SignalState {
    interrupt_requested: AtomicBool,
    signal_count: AtomicU8,
}

impl SignalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the operator asked to stop
    pub fn is_interrupt_requested(&self) -> bool {
        self.interrupt_requested.load(Ordering::SeqCst)
    }

    /// Get the number of signals received
    pub fn signal_count(&self) -> u8 {
        self.signal_count.load(Ordering::SeqCst)
    }

    /// Handle a signal, returning the action to take
    pub fn handle_signal(&self) -> SignalAction {
        let count = self.signal_count.fetch_add(1, Ordering::SeqCst);

        if count == 0 {
            self.interrupt_requested.store(true, Ordering::SeqCst);
            SignalAction::StopAtNextStage
        } else if count == 1 {
            SignalAction::ImmediateExit
        } else {
            SignalAction::Ignore
        }
    }
}

/// Action to take after receiving a signal.
///
/// The handler stays silent on the first signal; the pipeline reports the
/// interruption once it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    /// First signal: stop before the next pipeline stage
    StopAtNextStage,
    /// Second signal: exit now
    ImmediateExit,
    /// Further signals
    Ignore,
}

impl SignalAction {
    /// Line the handler prints for this action, if any
    pub fn message(self) -> Option<&'static str> {
        match self {
            SignalAction::ImmediateExit => Some("Received second interrupt, exiting immediately."),
            SignalAction::StopAtNextStage | SignalAction::Ignore => None,
        }
    }
}

/// Installs the process signal handler around a shared [`SignalState`]
pub struct SignalHandler {
    state: Arc<SignalState>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            state: Arc::new(SignalState::new()),
        }
    }

    /// Get a reference to the signal state
    pub fn state(&self) -> Arc<SignalState> {
        Arc::clone(&self.state)
    }

    /// Install the handler. Must be called once at program startup.
    pub fn install(&self) -> Result<(), ctrlc::Error> {
        let state = Arc::clone(&self.state);
        ctrlc::set_handler(move || {
            let action = state.handle_signal();
            if let Some(message) = action.message() {
                eprintln!("\n{}", message);
            }
            if action == SignalAction::ImmediateExit {
                std::process::exit(EXIT_CODE_INTERRUPTED);
            }
        })
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}
