//! Property tags that rules attach to names.
//!
//! A sentence like `WALL IS STOP` attaches [`Properties::STOP`] to every
//! gameplay entity named "Wall". Properties are a small closed set, so they
//! are stored as bit flags rather than strings.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of property tags carried by a name.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Properties: u8 {
        /// Player-controllable.
        const YOU  = 1 << 0;
        /// Reaching it with a You entity wins the level.
        const WIN  = 1 << 1;
        /// Blocks movement unless also Push.
        const STOP = 1 << 2;
        /// Can be shoved along by a mover.
        const PUSH = 1 << 3;
        /// Destroys co-located gameplay entities.
        const SINK = 1 << 4;
        /// Destroys co-located You entities.
        const KILL = 1 << 5;
    }
}

const WORDS: [(Properties, &str); 6] = [
    (Properties::YOU, "You"),
    (Properties::WIN, "Win"),
    (Properties::STOP, "Stop"),
    (Properties::PUSH, "Push"),
    (Properties::SINK, "Sink"),
    (Properties::KILL, "Kill"),
];

impl Properties {
    /// Parse a property word as it appears on a word tile ("Stop", "You").
    ///
    /// Returns `None` for words that are not properties.
    ///
    /// ```
    /// use rule_grid::core::Properties;
    ///
    /// assert_eq!(Properties::from_word("Stop"), Some(Properties::STOP));
    /// assert_eq!(Properties::from_word("Wall"), None);
    /// ```
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        WORDS.iter().find(|(_, w)| *w == word).map(|(flag, _)| *flag)
    }

    /// Check whether `word` names a property.
    #[must_use]
    pub fn is_property_word(word: &str) -> bool {
        Self::from_word(word).is_some()
    }

    /// The tile words for every flag in this set, in declaration order.
    pub fn words(self) -> impl Iterator<Item = &'static str> {
        WORDS
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, word)| *word)
    }
}

impl std::fmt::Display for Properties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let words: Vec<&str> = self.words().collect();
        write!(f, "{{{}}}", words.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_word() {
        assert_eq!(Properties::from_word("You"), Some(Properties::YOU));
        assert_eq!(Properties::from_word("Kill"), Some(Properties::KILL));
        assert_eq!(Properties::from_word("Is"), None);
        // Tile words are case-sensitive.
        assert_eq!(Properties::from_word("stop"), None);
    }

    #[test]
    fn test_words_in_order() {
        let set = Properties::PUSH | Properties::YOU;
        assert_eq!(set.words().collect::<Vec<_>>(), vec!["You", "Push"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Properties::STOP | Properties::SINK), "{Stop, Sink}");
        assert_eq!(format!("{}", Properties::empty()), "{}");
    }

    #[test]
    fn test_serialization() {
        let set = Properties::WIN | Properties::PUSH;
        let json = serde_json::to_string(&set).unwrap();
        let back: Properties = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }
}
