//! Transient status messages ("toasts").
//!
//! A notification is plain data: the `View` decides how to show it and is
//! expected to remove it after `timeout` plus the fade.

use std::time::Duration;

use crate::render::escape_html;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);
pub const FADE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Severity::Info => "#6a0dad",
            Severity::Success => "#3aa35a",
            Severity::Error => "#c92a2a",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub timeout: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn class_name(&self) -> String {
        format!("toast toast-{}", self.severity.as_str())
    }

    /// Time from display until the element should be removed.
    pub fn lifetime(&self) -> Duration {
        self.timeout + FADE_DURATION
    }

    /// The toast element. Positioning lives in the stylesheet; only the
    /// severity colour is set inline.
    pub fn render(&self) -> String {
        format!(
            r#"<div class="{}" role="status" style="background:{};color:#fff">{}</div>"#,
            self.class_name(),
            self.severity.background(),
            escape_html(&self.message),
        )
    }
}
