//! Toolbox - small utility commands.
//!
//! Handles:
//! - PING - Liveness check
//! - ECHO <text> - Repeat text back verbatim
//! - WHOAMI - Show the sender's hostmask and oper status
//! - UPTIME - Time since the toolbox was created

use crate::error::HandlerError;
use crate::handlers::core::context::Value;
use crate::handlers::{
    Bound, CommandHandler, CommandSet, CommandTag, HandlerResult, Signature, sync_handler,
};
use crate::security::masks::OPER_TAG;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Toolbox command set.
pub struct Toolbox {
    started: Instant,
    pings: AtomicU64,
}

impl Toolbox {
    /// Create a new toolbox; uptime counts from here.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            pings: AtomicU64::new(0),
        }
    }

    /// Number of pings answered.
    pub fn pings(&self) -> u64 {
        self.pings.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for Toolbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle PING.
struct Ping(Arc<Toolbox>);

#[async_trait]
impl CommandHandler for Ping {
    async fn call(&self, _args: Bound<'_>) -> HandlerResult {
        let count = self.0.pings.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(count, "Answered ping");
        Ok("pong".into())
    }
}

/// Handle ECHO, bound to `args_str` positionally.
fn echo(args: Bound<'_>) -> HandlerResult {
    let text = match args {
        Bound::Positional(values) => values.first().and_then(Value::as_str).unwrap_or_default(),
        _ => "",
    };
    if text.trim().is_empty() {
        return Ok("Syntax: ECHO <text>".into());
    }
    Ok(text.into())
}

/// Handle WHOAMI, bound to `raw_line` by name.
fn whoami(args: Bound<'_>) -> HandlerResult {
    let Bound::Named(named) = args else {
        return Err(HandlerError::Internal("whoami expects named arguments".into()));
    };
    let line = named.raw_line()?;
    let source = line.source().unwrap_or_else(|| "an unknown sender".into());

    let reply = match line.tag(OPER_TAG) {
        Some(Some(name)) if !name.is_empty() => format!("You are {source}, oper \x02{name}\x02"),
        Some(_) => format!("You are {source}, an oper"),
        None => format!("You are {source}"),
    };
    Ok(reply.into())
}

fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (mins, secs) = (rem / 60, rem % 60);
    if days > 0 {
        format!("up {days}d {hours}h {mins}m {secs}s")
    } else if hours > 0 {
        format!("up {hours}h {mins}m {secs}s")
    } else {
        format!("up {mins}m {secs}s")
    }
}

impl CommandSet for Toolbox {
    fn commands(self: Arc<Self>) -> Vec<(CommandTag, Arc<dyn CommandHandler>)> {
        let toolbox = Arc::clone(&self);
        let uptime = sync_handler(Signature::Named(&[]), move |_| {
            Ok(format_uptime(toolbox.uptime()).into())
        });

        vec![
            (
                CommandTag::new(["ping"], "ping -- Replies with pong."),
                Arc::new(Ping(Arc::clone(&self))),
            ),
            (
                CommandTag::new(["echo", "say"], "echo <text> -- Repeats text back.")
                    .arg_count(1)
                    .override_params(["args_str"]),
                sync_handler(Signature::Named(&[]), echo),
            ),
            (
                CommandTag::new(["whoami"], "whoami -- Shows how the bot sees you."),
                sync_handler(Signature::Named(&["raw_line"]), whoami),
            ),
            (
                CommandTag::new(["uptime"], "uptime -- Time since startup.").raw(),
                uptime,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{Dispatcher, Outcome};
    use slirc_line::Line;
    use std::sync::Mutex;

    fn dispatcher(toolbox: Arc<Toolbox>) -> (Dispatcher, Arc<Mutex<Vec<(String, String)>>>) {
        let replies = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&replies);
        let mut dispatcher = Dispatcher::new("~").with_sink(move |target: &str, message: &str| {
            sink.lock().unwrap().push((target.to_string(), message.to_string()));
        });
        dispatcher.add_commands(toolbox).unwrap();
        (dispatcher, replies)
    }

    async fn send(dispatcher: &Dispatcher, raw: &str) -> Outcome {
        let line: Line = raw.parse().unwrap();
        dispatcher.on_line(&line, Some("bot")).await.unwrap()
    }

    #[tokio::test]
    async fn test_ping_counts() {
        let toolbox = Arc::new(Toolbox::new());
        let (dispatcher, replies) = dispatcher(Arc::clone(&toolbox));

        assert_eq!(send(&dispatcher, ":a!b@c PRIVMSG #chan :~ping").await, Outcome::Completed);
        send(&dispatcher, ":a!b@c PRIVMSG bot :bot: PING").await;

        assert_eq!(toolbox.pings(), 2);
        assert_eq!(
            *replies.lock().unwrap(),
            vec![
                ("#chan".to_string(), "pong".to_string()),
                ("a".to_string(), "pong".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_echo_keeps_spacing() {
        let (dispatcher, replies) = dispatcher(Arc::new(Toolbox::new()));
        send(&dispatcher, ":a!b@c PRIVMSG #chan :~say  spaced   out").await;
        send(&dispatcher, ":a!b@c PRIVMSG #chan :~echo").await;
        assert_eq!(
            *replies.lock().unwrap(),
            vec![
                ("#chan".to_string(), " spaced   out".to_string()),
                ("#chan".to_string(), "Syntax: ECHO <text>".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_whoami_reports_oper() {
        let (dispatcher, replies) = dispatcher(Arc::new(Toolbox::new()));
        send(&dispatcher, "@oper=ad :a!b@c PRIVMSG #chan :~whoami").await;
        send(&dispatcher, ":a!b@c PRIVMSG #chan :~whoami").await;
        let replies = replies.lock().unwrap();
        assert_eq!(replies[0].1, "You are a!b@c, oper \x02ad\x02");
        assert_eq!(replies[1].1, "You are a!b@c");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(59)), "up 0m 59s");
        assert_eq!(format_uptime(Duration::from_secs(3_661)), "up 1h 1m 1s");
        assert_eq!(format_uptime(Duration::from_secs(90_061)), "up 1d 1h 1m 1s");
    }

    #[test]
    fn test_uptime_uses_raw_binding() {
        let commands = crate::handlers::scan(Arc::new(Toolbox::new())).unwrap();
        let uptime = commands.iter().find(|c| c.name() == "uptime").unwrap();
        assert_eq!(uptime.binding(), &crate::handlers::Binding::Raw);
    }
}
