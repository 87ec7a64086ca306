//! Timing and tracing spans for dispatch.

use std::time::{Duration, Instant};

/// Times one handler call.
///
/// The latency is recorded under the command's registry key when the guard
/// drops, so failed calls are measured too.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    pub fn start(command: &str) -> Self {
        Self {
            command: command.to_owned(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        crate::metrics::record_command(&self.command, self.elapsed().as_secs_f64());
    }
}

/// Span constructors shared by the dispatcher and the host.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    /// Span around one handler call.
    pub fn command(name: &str, source: &str, reply_target: &str) -> Span {
        info_span!("command", command = %name, source = %source, reply_target = %reply_target)
    }

    /// Span around one received line, before it is known to be a command.
    pub fn line(verb: &str, sender: Option<&str>) -> Span {
        match sender {
            Some(sender) => debug_span!("line", verb = %verb, sender = %sender),
            None => debug_span!("line", verb = %verb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_records_on_drop() {
        crate::metrics::init();
        {
            let timer = CommandTimer::start("TIMED");
            assert!(timer.elapsed() < Duration::from_secs(60));
        }
        assert!(crate::metrics::gather_metrics().contains("command=\"TIMED\""));
    }
}
