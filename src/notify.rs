use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A blocking, user-facing message such as a validation warning or a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.level {
            NoticeLevel::Warning => "Warning",
            NoticeLevel::Error => "Error",
        }
    }
}

/// Alert channel injected into the trade checker.
pub trait Notifier: Send {
    fn notify(&self, notice: Notice);
}

impl Notifier for mpsc::UnboundedSender<Notice> {
    fn notify(&self, notice: Notice) {
        if self.send(notice).is_err() {
            tracing::debug!("Notice dropped, alert receiver is closed");
        }
    }
}
