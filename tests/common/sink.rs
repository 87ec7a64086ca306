//! Reply sink that records everything it is given.

use slirc_bot::handlers::ReplySink;
use std::sync::{Arc, Mutex};

/// Records `(target, message)` pairs in emission order.
#[derive(Clone, Default)]
pub struct RecordingSink {
    replies: Arc<Mutex<Vec<(String, String)>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every recorded reply, leaving the sink empty.
    pub fn take(&self) -> Vec<(String, String)> {
        std::mem::take(&mut *self.replies.lock().unwrap())
    }

    /// Take only the messages.
    pub fn take_messages(&self) -> Vec<String> {
        self.take().into_iter().map(|(_, message)| message).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.lock().unwrap().is_empty()
    }
}

impl ReplySink for RecordingSink {
    fn reply(&self, target: &str, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push((target.to_string(), message.to_string()));
    }
}
