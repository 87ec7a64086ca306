//! Dispatcher fixture.

#![allow(dead_code)]

use super::sink::RecordingSink;
use slirc_bot::handlers::{Bound, Command, Dispatcher, Signature, sync_handler};
use slirc_bot::security::MaskPermissions;
use slirc_bot::Line;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Prefix of a private message from `test!test@test` to `bot`.
pub const PFX: &str = ":test!test@test PRIVMSG bot :";

/// Parse a raw line.
pub fn line(raw: &str) -> Line {
    raw.parse().expect("test line parses")
}

/// A dispatcher with prefix `~`, nickname `bot` and four commands:
///
/// - `noperms`: no requirement, replies with its arguments joined by spaces
/// - `oper`: requires `{oper}`, replies with its raw argument string
/// - `operad`: requires `{oper, oper.derg, test}`
/// - `simpleperm`: requires `{test}`
pub struct Fixture {
    pub dispatcher: Dispatcher,
    pub sink: RecordingSink,
    pub oper_calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        let sink = RecordingSink::new();
        let resolver = MaskPermissions::new(
            [("*!*@derg", vec!["test".to_string()])],
            [("derg", vec!["test".to_string()])],
            true,
        )
        .expect("fixture patterns are valid");

        let mut dispatcher = Dispatcher::new("~")
            .with_sink(sink.clone())
            .with_permissions(resolver);

        let oper_calls = Arc::new(AtomicUsize::new(0));
        for command in commands(Arc::clone(&oper_calls)) {
            dispatcher.add_command(command).expect("fixture commands are unique");
        }

        Self {
            dispatcher,
            sink,
            oper_calls,
        }
    }

    /// Dispatch `raw` as the bot `bot` and return every reply it produced.
    pub async fn send(&self, raw: &str) -> Vec<(String, String)> {
        self.dispatcher
            .on_line(&line(raw), Some("bot"))
            .await
            .expect("dispatch succeeds");
        self.sink.take()
    }

    /// Send `text` privately from `test!test@test`.
    pub async fn privmsg(&self, text: &str) -> Vec<(String, String)> {
        self.send(&format!("{PFX}{text}")).await
    }

    pub fn oper_calls(&self) -> usize {
        self.oper_calls.load(Ordering::SeqCst)
    }
}

fn commands(oper_calls: Arc<AtomicUsize>) -> Vec<Command> {
    let noperms = sync_handler(Signature::Named(&["args"]), |bound| match bound {
        Bound::Named(named) => Ok(named.args()?.join(" ").into()),
        _ => Ok(().into()),
    });

    let oper = sync_handler(Signature::Named(&["args_str"]), move |bound| {
        oper_calls.fetch_add(1, Ordering::SeqCst);
        match bound {
            Bound::Named(named) => Ok(named.args_str()?.into()),
            _ => Ok(().into()),
        }
    });

    let ok = sync_handler(Signature::Named(&[]), |_| Ok("ok".into()));

    vec![
        Command::builder(["noperms"], noperms)
            .help("noperms <words> -- Echoes words.")
            .build()
            .unwrap(),
        Command::builder(["oper"], oper)
            .help("oper <text> -- Echoes text to opers.")
            .permission("oper")
            .build()
            .unwrap(),
        Command::builder(["operad"], Arc::clone(&ok))
            .help("operad -- Needs a named oper.")
            .permissions(["oper", "oper.derg", "test"])
            .build()
            .unwrap(),
        Command::builder(["simpleperm"], ok)
            .help("simpleperm -- Needs the test label.")
            .permission("test")
            .build()
            .unwrap(),
    ]
}
