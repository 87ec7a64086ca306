//! Reply sinks for routing handler output.
//!
//! A sink is injected into the dispatcher at construction. Emission is a
//! plain synchronous call, made once per reply line, in order.

use slirc_line::Line;
use tokio::sync::mpsc;
use tracing::warn;

/// Destination for reply lines.
pub trait ReplySink: Send + Sync {
    /// Send `message` to `target` (a channel or a nickname).
    fn reply(&self, target: &str, message: &str);
}

impl<F> ReplySink for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn reply(&self, target: &str, message: &str) {
        self(target, message)
    }
}

/// Forwards each reply as a `PRIVMSG` line to the connection writer.
impl ReplySink for mpsc::UnboundedSender<Line> {
    fn reply(&self, target: &str, message: &str) {
        if self.send(Line::privmsg(target, message)).is_err() {
            warn!(reply_target = %target, "Reply channel closed, dropping reply");
        }
    }
}

/// Default sink when no reply function is configured: logs and drops.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReplySink for LogSink {
    fn reply(&self, target: &str, message: &str) {
        warn!(
            reply_target = %target,
            message = %message,
            "No reply function for command"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |target: &str, message: &str| {
            seen.lock().unwrap().push(format!("{target}:{message}"));
        };
        sink.reply("#chan", "hi");
        ReplySink::reply(&sink, "nick", "there");
        assert_eq!(*seen.lock().unwrap(), vec!["#chan:hi", "nick:there"]);
    }

    #[test]
    fn test_channel_sink_builds_privmsg() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.reply("#chan", "a b");
        let line = rx.try_recv().unwrap();
        assert_eq!(line, Line::privmsg("#chan", "a b"));
    }

    #[test]
    fn test_channel_sink_tolerates_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel::<Line>();
        drop(rx);
        tx.reply("#chan", "lost");
    }
}
