//! Component types attached to entities.
//!
//! There are exactly three kinds of component:
//! - [`Position`](super::Position): where the entity sits on the grid
//! - [`Name`]: the identity rules refer to ("Wall", "Rock")
//! - [`RuleWord`]: marks a word tile and records its grammatical role
//!
//! An entity holds at most one of each. Components are plain values; the
//! store hands out copies or borrows, never shared mutable aliases.

use serde::{Deserialize, Serialize};

use super::properties::Properties;

/// The identity of an entity, used as the key into the active rules.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    /// Create a new name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grammatical role of a word tile within a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WordRole {
    /// A noun: "Wall", "Rock", "BigBlue".
    Subject,
    /// The linking verb, "Is".
    Operator,
    /// An adjective: "Stop", "You", "Win".
    Property,
}

impl WordRole {
    /// Derive the role of a word from its text.
    ///
    /// The operator word is an Operator, recognised property words are
    /// Properties, and everything else is a Subject.
    ///
    /// ```
    /// use rule_grid::core::WordRole;
    ///
    /// assert_eq!(WordRole::classify("Is", "Is"), WordRole::Operator);
    /// assert_eq!(WordRole::classify("Push", "Is"), WordRole::Property);
    /// assert_eq!(WordRole::classify("Lava", "Is"), WordRole::Subject);
    /// ```
    #[must_use]
    pub fn classify(word: &str, operator_word: &str) -> Self {
        if word == operator_word {
            WordRole::Operator
        } else if Properties::is_property_word(word) {
            WordRole::Property
        } else {
            WordRole::Subject
        }
    }
}

/// Marks an entity as a word tile.
///
/// Word tiles are always pushable and are never destroyed by Sink or Kill.
/// They are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleWord {
    word: String,
    role: WordRole,
}

impl RuleWord {
    /// Create a word tile component.
    pub fn new(word: impl Into<String>, role: WordRole) -> Self {
        Self {
            word: word.into(),
            role,
        }
    }

    /// The word text.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The grammatical role.
    #[must_use]
    pub fn role(&self) -> WordRole {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_comparisons() {
        let name = Name::new("Wall");
        assert_eq!(name, "Wall");
        assert_eq!(name.as_str(), "Wall");
        assert_eq!(format!("{}", name), "Wall");
        assert_eq!(Name::from("Rock"), Name::new(String::from("Rock")));
    }

    #[test]
    fn test_classify_with_custom_operator() {
        assert_eq!(WordRole::classify("Be", "Be"), WordRole::Operator);
        assert_eq!(WordRole::classify("Is", "Be"), WordRole::Subject);
        assert_eq!(WordRole::classify("Kill", "Be"), WordRole::Property);
    }

    #[test]
    fn test_rule_word_accessors() {
        let word = RuleWord::new("Stop", WordRole::Property);
        assert_eq!(word.word(), "Stop");
        assert_eq!(word.role(), WordRole::Property);
    }
}
