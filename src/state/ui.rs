// UI state - status messages and the activation log
use crate::layout::LOG_CAPACITY;
use crate::style::Theme;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct ActivationRecord {
    pub at: DateTime<Local>,
    pub tag: String,
    pub text: String,
    pub outcome: String,
}

pub struct UIState {
    pub theme: Theme,
    pub error_message: Option<(String, Instant)>,
    pub info_message: Option<(String, Instant)>,
    pub activation_log: VecDeque<ActivationRecord>,
    pub show_log: bool,
}

impl UIState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            error_message: None,
            info_message: None,
            activation_log: VecDeque::new(),
            show_log: true,
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some((message, Instant::now()));
    }

    pub fn set_info(&mut self, message: String) {
        self.info_message = Some((message, Instant::now()));
    }

    /// Newest first, bounded.
    pub fn record(&mut self, record: ActivationRecord) {
        self.activation_log.push_front(record);
        self.activation_log.truncate(LOG_CAPACITY);
    }

    pub fn clear_expired_messages(&mut self, timeout_secs: u64) {
        if let Some((_, time)) = &self.error_message {
            if time.elapsed().as_secs() >= timeout_secs {
                self.error_message = None;
            }
        }
        if let Some((_, time)) = &self.info_message {
            if time.elapsed().as_secs() >= timeout_secs {
                self.info_message = None;
            }
        }
    }
}
