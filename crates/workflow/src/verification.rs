//! Verification lifecycle of a user-entered value.
//!
//! # State Transitions
//!
//! ```text
//! Unchecked
//!     ↓ (begin)
//! Checking
//!     ↓ (finish)
//! Valid | Invalid
//! ```
//!
//! Any input change returns the cell to `Unchecked`. A check started for an
//! older input carries a stale [`CheckTicket`]; its result is dropped when it
//! arrives.

use crate::error::{DnsError, DnsResult};

/// Where a verification currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationState<T> {
    /// Input not checked yet
    Unchecked,
    /// Check in flight
    Checking,
    /// Check passed
    Valid(T),
    /// Check failed
    Invalid(DnsError),
}

/// Proof that a check was started for a particular input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTicket {
    epoch: u64,
    input: String,
}

impl CheckTicket {
    /// Input the check was started for.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// An input field together with its verification state.
#[derive(Debug, Clone)]
pub struct Verification<T> {
    input: String,
    epoch: u64,
    state: VerificationState<T>,
}

impl<T: Clone> Verification<T> {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            epoch: 0,
            state: VerificationState::Unchecked,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &VerificationState<T> {
        &self.state
    }

    /// Verified value, if any.
    pub fn valid(&self) -> Option<&T> {
        match &self.state {
            VerificationState::Valid(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_checking(&self) -> bool {
        matches!(self.state, VerificationState::Checking)
    }

    /// Replace the input. A different value resets the state.
    pub fn set_input(&mut self, input: impl Into<String>) {
        let input = input.into();
        if input != self.input {
            self.input = input;
            self.reset();
        }
    }

    /// Forget the input and any result.
    pub fn clear(&mut self) {
        self.input.clear();
        self.reset();
    }

    /// Drop any result but keep the input, e.g. when a dependency changed.
    pub fn invalidate(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.epoch += 1;
        self.state = VerificationState::Unchecked;
    }

    /// Ticket for the current input, without starting a check.
    pub fn ticket(&self) -> CheckTicket {
        CheckTicket {
            epoch: self.epoch,
            input: self.input.clone(),
        }
    }

    /// Enter `Checking` for the current input.
    pub fn begin(&mut self, what: &'static str) -> DnsResult<CheckTicket> {
        if self.is_checking() {
            return Err(DnsError::Busy(what));
        }
        self.state = VerificationState::Checking;
        Ok(self.ticket())
    }

    /// Record the outcome of a check. Returns `false` if the ticket is stale
    /// and the outcome was discarded.
    pub fn finish(&mut self, ticket: &CheckTicket, outcome: &DnsResult<T>) -> bool {
        if ticket.epoch != self.epoch {
            tracing::debug!(input = %ticket.input, "Discarding stale verification result");
            return false;
        }
        self.state = match outcome {
            Ok(value) => VerificationState::Valid(value.clone()),
            Err(err) => VerificationState::Invalid(err.clone()),
        };
        true
    }

    /// Whether `ticket` still refers to the current input.
    pub fn is_current(&self, ticket: &CheckTicket) -> bool {
        ticket.epoch == self.epoch
    }
}

impl<T: Clone> Default for Verification<T> {
    fn default() -> Self {
        Self::new()
    }
}
