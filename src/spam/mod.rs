//! Spam detection: the title heuristic and the per-author registry built on it.

pub mod registry;

use std::ops::RangeInclusive;

pub use self::registry::SpamBotRegistry;

/// Code points bot titles are padded with. Legit posters on an English
/// forum practically never type these.
pub const SPAM_RANGE: RangeInclusive<u32> = 0xB000..=0xDFFF;

/// True if any character of `title` falls in [`SPAM_RANGE`].
pub fn is_spam(title: &str) -> bool {
    title.chars().any(|c| SPAM_RANGE.contains(&u32::from(c)))
}

#[cfg(test)]
pub(crate) mod strategies {
    use super::SPAM_RANGE;
    use proptest::prelude::*;

    pub fn clean_char() -> impl Strategy<Value = char> {
        any::<char>().prop_filter("outside the spam range", |c| !SPAM_RANGE.contains(&u32::from(*c)))
    }

    /// The part of the range a `char` can actually hold.
    pub fn spam_char() -> impl Strategy<Value = char> {
        (0xB000u32..=0xD7FF).prop_filter_map("scalar value", char::from_u32)
    }

    pub fn clean_title() -> impl Strategy<Value = String> {
        prop::collection::vec(clean_char(), 0..40).prop_map(|cs| cs.into_iter().collect())
    }

    /// Clean or spam, roughly half and half.
    pub fn any_title() -> impl Strategy<Value = String> {
        prop_oneof![
            clean_title(),
            (clean_title(), spam_char()).prop_map(|(mut t, c)| {
                t.push(c);
                t
            }),
        ]
    }
}
