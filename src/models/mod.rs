use crate::browser::{BrowserError, BrowserLauncher};

// ── Forum thread ──────────────────────────────────────────────────────────────

/// One topic from a forum listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumThread {
    pub url: String,
    pub title: String,
    pub author: String,
}

impl ForumThread {
    pub fn new(url: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            author: author.into(),
        }
    }
}

// ── Spam profile ──────────────────────────────────────────────────────────────

/// Every spam thread attributed to a single author, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpamProfile {
    author: String,
    user_base: String,
    threads: Vec<ForumThread>,
}

impl SpamProfile {
    pub(crate) fn new(author: impl Into<String>, user_base: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            user_base: user_base.into(),
            threads: Vec::new(),
        }
    }

    /// Only the registry appends, and only threads it has already keyed to this author.
    pub(crate) fn push(&mut self, thread: ForumThread) {
        debug_assert_eq!(thread.author, self.author);
        self.threads.push(thread);
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn threads(&self) -> &[ForumThread] {
        &self.threads
    }

    /// e.g. "SomeBot" → http://roosterteeth.com/user/SomeBot
    pub fn profile_url(&self) -> String {
        format!("{}{}", self.user_base, self.author)
    }

    /// Titles indented four spaces, one per line.
    pub fn thread_list(&self) -> String {
        self.threads
            .iter()
            .map(|t| format!("    {}", t.title))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn summary(&self) -> String {
        format!(
            "{} - {}\n{}\n\n",
            self.author,
            self.profile_url(),
            self.thread_list()
        )
    }

    pub fn open_in_browser(&self, launcher: &dyn BrowserLauncher) -> Result<(), BrowserError> {
        launcher.open(&self.profile_url())
    }
}
