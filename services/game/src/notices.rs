//! The feedback-display collaborator: an expiring queue of notices.
//!
//! The core's only contract is one posted line per pipeline invocation;
//! how long a line stays visible is decided entirely here.

use blindfold_core::FeedbackSink;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub posted_at: Instant,
}

/// Holds posted notices until their time-to-live elapses.
pub struct NoticeBoard {
    ttl: Duration,
    entries: Mutex<VecDeque<Notice>>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Drops expired entries and returns the still-visible notices,
    /// oldest first. `now` is passed in so display sweeps and tests share
    /// one clock.
    pub fn active(&self, now: Instant) -> Vec<Notice> {
        let mut entries = self.entries.lock().unwrap();
        while entries
            .front()
            .is_some_and(|notice| now.duration_since(notice.posted_at) >= self.ttl)
        {
            entries.pop_front();
        }
        entries.iter().cloned().collect()
    }
}

impl FeedbackSink for NoticeBoard {
    fn post(&self, message: &str) {
        info!(notice = %message, "feedback posted");
        self.entries.lock().unwrap().push_back(Notice {
            text: message.to_string(),
            posted_at: Instant::now(),
        });
    }
}
