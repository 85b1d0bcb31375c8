//! Handing profile URLs to whatever the desktop uses to open links.

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to launch {opener} for {url}: {source}")]
    Launch {
        opener: String,
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("{opener} could not open {url} ({status})")]
    Exit {
        opener: String,
        url: String,
        status: ExitStatus,
    },
}

/// Opens a URL somewhere a human can look at it.
pub trait BrowserLauncher {
    fn open(&self, url: &str) -> Result<(), BrowserError>;
}

/// Runs an opener program with the URL as its last argument and waits for it.
///
/// `xdg-open`, `open` and `cmd /C start` all return as soon as the browser has
/// been handed the URL, so waiting only costs the opener's own startup.
pub struct SystemBrowser {
    program: String,
    args: Vec<String>,
}

impl SystemBrowser {
    pub fn with_opener(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn opener(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for SystemBrowser {
    #[cfg(target_os = "macos")]
    fn default() -> Self {
        Self::with_opener("open", &[])
    }

    #[cfg(target_os = "windows")]
    fn default() -> Self {
        Self::with_opener("cmd", &["/C", "start", ""])
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn default() -> Self {
        Self::with_opener("xdg-open", &[])
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        debug!("{} {}", self.opener(), url);

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| BrowserError::Launch {
                opener: self.opener(),
                url: url.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(BrowserError::Exit {
                opener: self.opener(),
                url: url.to_string(),
                status,
            });
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://roosterteeth.com/user/bot42";

    #[cfg(unix)]
    #[test]
    fn test_failing_opener_is_an_error() {
        let browser = SystemBrowser::with_opener("sh", &["-c", "exit 3", "opener"]);
        let err = browser.open(URL).unwrap_err();
        match err {
            BrowserError::Exit { status, url, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(url, URL);
            }
            other => panic!("expected exit error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_opener_is_ok() {
        let browser = SystemBrowser::with_opener("sh", &["-c", "exit 0", "opener"]);
        assert!(browser.open(URL).is_ok());
    }

    #[test]
    fn test_missing_opener_is_launch_error() {
        let browser = SystemBrowser::with_opener("bothunter-no-such-opener", &[]);
        assert!(matches!(browser.open(URL), Err(BrowserError::Launch { .. })));
    }
}
