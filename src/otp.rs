//! One-time passcode entry and the resend countdown.

use std::time::{Duration, Instant};

use crate::error::{AppError, Result};

/// Number of digits in a passcode.
pub const OTP_LENGTH: usize = 6;

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Six single-digit cells with keyboard focus tracking.
#[derive(Debug, Clone, Default)]
pub struct OtpInput {
    cells: [String; OTP_LENGTH],
    focus_request: Option<usize>,
}

impl OtpInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[String; OTP_LENGTH] {
        &self.cells
    }

    pub fn has_focus_request(&self) -> bool {
        self.focus_request.is_some()
    }

    /// Cell that should receive keyboard focus next frame, if any.
    pub fn take_focus_request(&mut self) -> Option<usize> {
        self.focus_request.take()
    }

    /// Typed input in cell `index`.
    ///
    /// Non-digit input is ignored and leaves the cell as it was. A non-empty
    /// value moves focus to the next cell.
    pub fn set_cell(&mut self, index: usize, value: &str) {
        if index >= OTP_LENGTH {
            return;
        }
        if !value.is_empty() && !all_digits(value) {
            return;
        }

        // keep only the most recent keystroke
        self.cells[index] = value.chars().last().map(String::from).unwrap_or_default();

        if !value.is_empty() && index < OTP_LENGTH - 1 {
            self.focus_request = Some(index + 1);
        }
    }

    /// Backspace pressed in cell `index` while it was already empty.
    pub fn backspace_on_empty(&mut self, index: usize) {
        if index > 0 && index < OTP_LENGTH && self.cells[index].is_empty() {
            self.focus_request = Some(index - 1);
        }
    }

    /// Paste a code starting at the first cell.
    ///
    /// Returns `false` and changes nothing unless every character is a digit.
    pub fn paste(&mut self, text: &str) -> bool {
        let text = text.trim();
        if !all_digits(text) {
            return false;
        }

        let digits: Vec<char> = text.chars().take(OTP_LENGTH).collect();
        for (cell, digit) in self.cells.iter_mut().zip(&digits) {
            *cell = digit.to_string();
        }

        if digits.len() < OTP_LENGTH {
            self.focus_request = Some(digits.len());
        }
        true
    }

    /// Concatenated cell contents.
    pub fn code(&self) -> String {
        self.cells.concat()
    }

    /// The complete code, or a validation error if any cell is blank.
    pub fn complete_code(&self) -> Result<String> {
        let code = self.code();
        if code.len() != OTP_LENGTH {
            return Err(AppError::validation("Please enter the complete 6-digit OTP"));
        }
        Ok(code)
    }
}

/// Countdown gating the "Resend" action, one tick per second.
#[derive(Debug, Clone)]
pub struct ResendCountdown {
    duration_secs: u32,
    remaining: u32,
    last_tick: Instant,
}

impl ResendCountdown {
    /// Start a countdown of `duration_secs` at `now`.
    pub fn start(duration_secs: u32, now: Instant) -> Self {
        Self {
            duration_secs,
            remaining: duration_secs,
            last_tick: now,
        }
    }

    /// Seconds left before resend is allowed.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Resend is allowed once the countdown reaches zero.
    pub fn resend_enabled(&self) -> bool {
        self.remaining == 0
    }

    /// Advance by one second.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Apply every whole second elapsed since the last tick.
    ///
    /// Returns `true` if the remaining time changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.resend_enabled() {
            return false;
        }

        let mut changed = false;
        while !self.resend_enabled() && now.duration_since(self.last_tick) >= Duration::from_secs(1) {
            self.last_tick += Duration::from_secs(1);
            self.tick();
            changed = true;
        }
        changed
    }

    /// Restart from the full duration, e.g. after a successful resend.
    pub fn restart(&mut self, now: Instant) {
        self.remaining = self.duration_secs;
        self.last_tick = now;
    }

    /// Time until the next tick, for scheduling a repaint.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        if self.resend_enabled() {
            return None;
        }
        let next = self.last_tick + Duration::from_secs(1);
        Some(next.saturating_duration_since(now))
    }
}
