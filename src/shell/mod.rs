//! Interactive triage over a finished registry.
//!
//! One request per line: an action token and an optional count, e.g. `o 3`
//! opens the next three suspects in the browser. The queue starts as the
//! registry's authors in discovery order and only shrinks via `n`.

use crate::browser::BrowserLauncher;
use crate::spam::SpamBotRegistry;
use anyhow::Result;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::warn;

pub const USAGE: &str = "Interactive Options:
    o (#) - Open Bot in webbrowser
    p (#) - Print bot summary
    n (#) - Next bot
    r     - Print the number of bots remaining
    h     - Print this help
    q     - Quit interactive mode
    (#)   - Perform the given action for the specified number of bots
";

// ── Requests ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open,
    Print,
    Next,
    Remaining,
    Help,
    Quit,
}

impl Action {
    fn takes_count(self) -> bool {
        matches!(self, Action::Open | Action::Print | Action::Next)
    }
}

/// Token → action. Anything not listed here is invalid input.
pub const DISPATCH: &[(&str, Action)] = &[
    ("o", Action::Open),
    ("p", Action::Print),
    ("n", Action::Next),
    ("r", Action::Remaining),
    ("h", Action::Help),
    ("q", Action::Quit),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub action: Action,
    /// How many queued suspects the action applies to. Always 1 for actions
    /// that don't take a count.
    pub count: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Invalid input")]
    InvalidInput,
}

/// Parse one input line. Blank lines are `Ok(None)`.
pub fn parse_request(line: &str) -> Result<Option<Request>, ShellError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let (token, arg) = match words.as_slice() {
        [] => return Ok(None),
        [token] => (*token, None),
        [token, arg] => (*token, Some(*arg)),
        _ => return Err(ShellError::InvalidInput),
    };

    let action = DISPATCH
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, a)| *a)
        .ok_or(ShellError::InvalidInput)?;

    let count = match arg {
        Some(n) if action.takes_count() => n.parse().map_err(|_| ShellError::InvalidInput)?,
        _ => 1,
    };

    Ok(Some(Request { action, count }))
}

// ── Shell ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a> {
    registry: &'a SpamBotRegistry,
    browser: &'a dyn BrowserLauncher,
    queue: VecDeque<String>,
}

impl<'a> Shell<'a> {
    pub fn new(registry: &'a SpamBotRegistry, browser: &'a dyn BrowserLauncher) -> Self {
        Self {
            registry,
            browser,
            queue: registry.keys().into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Print usage, then serve requests until `q` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "{}", USAGE)?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next() else { break };
            let request = match parse_request(&line?) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    Request { action: Action::Help, count: 1 }
                }
            };

            if self.handle(request, out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle<W: Write>(&mut self, request: Request, out: &mut W) -> Result<Flow> {
        let Request { action, count } = request;
        match action {
            Action::Open => {
                for author in self.queue.iter().take(count) {
                    let profile = self.registry.get(author)?;
                    if let Err(e) = profile.open_in_browser(self.browser) {
                        warn!("{}", e);
                    }
                }
            }
            Action::Print => {
                for author in self.queue.iter().take(count) {
                    writeln!(out, "{}", self.registry.get(author)?.summary())?;
                }
            }
            Action::Next => {
                let n = count.min(self.queue.len());
                self.queue.drain(..n);
            }
            Action::Remaining => writeln!(out, "{}", self.remaining())?,
            Action::Help => writeln!(out, "{}", USAGE)?,
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use crate::browser::testing::{BrokenBrowser, RecordingBrowser};
    use super::*;
    use crate::models::ForumThread;

    const USER_BASE: &str = "http://roosterteeth.com/user/";

    fn registry() -> SpamBotRegistry {
        SpamBotRegistry::build(
            USER_BASE,
            vec![
                ForumThread::new("/t/1", "\u{b100} one", "bot_a"),
                ForumThread::new("/t/2", "\u{b200} two", "bot_b"),
                ForumThread::new("/t/3", "\u{b300} three", "bot_c"),
            ],
        )
    }

    fn run_script(reg: &SpamBotRegistry, browser: &dyn BrowserLauncher, script: &str) -> String {
        let mut out = Vec::new();
        Shell::new(reg, browser).run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_request() {
        let req = |action, count| -> Result<Option<Request>, ShellError> {
            Ok(Some(Request { action, count }))
        };
        assert_eq!(parse_request("o"), req(Action::Open, 1));
        assert_eq!(parse_request("  p 3 "), req(Action::Print, 3));
        assert_eq!(parse_request("n 2"), req(Action::Next, 2));
        assert_eq!(parse_request("r 5"), req(Action::Remaining, 1));
        assert_eq!(parse_request("q"), req(Action::Quit, 1));
        assert_eq!(parse_request("   "), Ok(None));
    }

    #[test]
    fn test_parse_request_rejects_bad_input() {
        assert_eq!(parse_request("x"), Err(ShellError::InvalidInput));
        assert_eq!(parse_request("o many"), Err(ShellError::InvalidInput));
        assert_eq!(parse_request("o -1"), Err(ShellError::InvalidInput));
        assert_eq!(parse_request("o 1 2"), Err(ShellError::InvalidInput));
    }

    #[test]
    fn test_print_next_remaining() {
        let reg = registry();
        let browser = RecordingBrowser::default();
        let out = run_script(&reg, &browser, "p\nn 2\nr\np 5\nq\n");

        assert!(out.starts_with(USAGE));
        assert!(out.contains("bot_a - http://roosterteeth.com/user/bot_a\n    \u{b100} one"));
        assert!(out.contains("> 1\n"));
        assert!(out.contains("bot_c - "));
        assert!(!out.contains("bot_b - "));
    }

    #[test]
    fn test_open_uses_browser_for_queue_head() {
        let reg = registry();
        let browser = RecordingBrowser::default();
        run_script(&reg, &browser, "o 2\nq\n");
        assert_eq!(
            *browser.opened.borrow(),
            [
                "http://roosterteeth.com/user/bot_a",
                "http://roosterteeth.com/user/bot_b",
            ]
        );
    }

    #[test]
    fn test_browser_failure_keeps_shell_running() {
        let reg = registry();
        let out = run_script(&reg, &BrokenBrowser, "o\nr\nq\n");
        assert!(out.contains("> 3\n"));
    }

    #[test]
    fn test_invalid_input_prints_help() {
        let reg = registry();
        let browser = RecordingBrowser::default();
        let out = run_script(&reg, &browser, "zap\nq\n");
        assert!(out.contains("Invalid input\n"));
        assert_eq!(out.matches("Interactive Options:").count(), 2);
    }

    #[test]
    fn test_end_of_input_quits() {
        let reg = registry();
        let browser = RecordingBrowser::default();
        let mut shell = Shell::new(&reg, &browser);
        let mut out = Vec::new();
        shell.run("\n\nn\n".as_bytes(), &mut out).unwrap();
        assert_eq!(shell.remaining(), 2);
    }

    #[test]
    fn test_next_past_end_empties_queue() {
        let reg = registry();
        let browser = RecordingBrowser::default();
        let mut shell = Shell::new(&reg, &browser);
        let mut out = Vec::new();
        shell.handle(Request { action: Action::Next, count: 10 }, &mut out).unwrap();
        assert_eq!(shell.remaining(), 0);
    }
}
