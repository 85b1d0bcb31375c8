use crate::models::{ForumThread, SpamProfile};
use indexmap::IndexMap;
use thiserror::Error;

use super::is_spam;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no spam profile for {0:?}")]
    UnknownAuthor(String),
}

/// Suspected bots keyed by author, in the order they were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpamBotRegistry {
    user_base: String,
    profiles: IndexMap<String, SpamProfile>,
}

impl SpamBotRegistry {
    pub fn new(user_base: impl Into<String>) -> Self {
        Self {
            user_base: user_base.into(),
            profiles: IndexMap::new(),
        }
    }

    /// Keep the spam threads and group them by author, preserving input order.
    pub fn build<I>(user_base: impl Into<String>, threads: I) -> Self
    where
        I: IntoIterator<Item = ForumThread>,
    {
        let mut registry = Self::new(user_base);
        for thread in threads.into_iter().filter(|t| is_spam(&t.title)) {
            registry.add_thread(thread);
        }
        registry
    }

    /// Append a spam thread to its author's profile, creating it if needed.
    /// Returns `false` (and drops the thread) if the title isn't spam.
    pub fn add_thread(&mut self, thread: ForumThread) -> bool {
        if !is_spam(&thread.title) {
            return false;
        }
        let user_base = &self.user_base;
        self.profiles
            .entry(thread.author.clone())
            .or_insert_with_key(|author| SpamProfile::new(author.as_str(), user_base.as_str()))
            .push(thread);
        true
    }

    pub fn summary(&self) -> String {
        self.iter().map(SpamProfile::summary).collect()
    }

    pub fn keys(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    pub fn get(&self, author: &str) -> Result<&SpamProfile, RegistryError> {
        self.profiles
            .get(author)
            .ok_or_else(|| RegistryError::UnknownAuthor(author.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpamProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn spam_thread_count(&self) -> usize {
        self.profiles.values().map(|p| p.threads().len()).sum()
    }
}
