//! Character → tile lookup.
//!
//! Every character in a level grid stands for one kind of tile. The core
//! only cares about the tile's name and whether it is a word; the sprite
//! path is carried through for renderers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Template for the entity a level character produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blueprint {
    /// Entity name, or the word text for word tiles.
    pub name: String,
    /// Sprite path relative to the renderer's asset root.
    pub sprite: String,
    /// Whether the tile is a word.
    pub is_word: bool,
}

impl Blueprint {
    /// A gameplay tile.
    #[must_use]
    pub fn thing(name: impl Into<String>, sprite: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sprite: sprite.into(),
            is_word: false,
        }
    }

    /// A word tile.
    #[must_use]
    pub fn word(text: impl Into<String>, sprite: impl Into<String>) -> Self {
        Self {
            name: text.into(),
            sprite: sprite.into(),
            is_word: true,
        }
    }
}

/// Maps level characters to blueprints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintTable {
    entries: BTreeMap<char, Blueprint>,
}

impl BlueprintTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard tile set: lowercase for gameplay tiles, uppercase for
    /// words.
    #[must_use]
    pub fn standard() -> Self {
        let things = [
            ('h', "Hedge", "hedge.png"),
            ('w', "Wall", "wall.png"),
            ('r', "Rock", "rock.png"),
            ('b', "BigBlue", "bigblue.png"),
            ('f', "Flag", "flag.png"),
            ('l', "Floor", "floor.png"),
            ('g', "Grass", "grass.png"),
            ('a', "Water", "water.png"),
            ('v', "Lava", "lava.png"),
        ];
        let words = [
            ('W', "Wall", "word-wall.png"),
            ('R', "Rock", "word-rock.png"),
            ('F', "Flag", "word-flag.png"),
            ('B', "BigBlue", "word-bigblue.png"),
            ('I', "Is", "word-is.png"),
            ('S', "Stop", "word-stop.png"),
            ('P', "Push", "word-push.png"),
            ('V', "Lava", "word-lava.png"),
            ('A', "Water", "word-water.png"),
            ('Y', "You", "word-you.png"),
            ('X', "Win", "word-win.png"),
            ('N', "Sink", "word-sink.png"),
            ('K', "Kill", "word-kill.png"),
        ];

        let mut table = Self::new();
        for (c, name, sprite) in things {
            table.insert(c, Blueprint::thing(name, sprite));
        }
        for (c, text, sprite) in words {
            table.insert(c, Blueprint::word(text, sprite));
        }
        table
    }

    /// Add or replace the blueprint for `c`.
    pub fn insert(&mut self, c: char, blueprint: Blueprint) -> Option<Blueprint> {
        self.entries.insert(c, blueprint)
    }

    /// Look up the blueprint for `c`.
    #[must_use]
    pub fn get(&self, c: char) -> Option<&Blueprint> {
        self.entries.get(&c)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the character a blueprint is registered under.
    #[must_use]
    pub fn char_for(&self, name: &str, is_word: bool) -> Option<char> {
        self.entries
            .iter()
            .find(|(_, bp)| bp.name == name && bp.is_word == is_word)
            .map(|(c, _)| *c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = BlueprintTable::standard();
        assert_eq!(table.len(), 22);

        let blue = table.get('b').unwrap();
        assert_eq!(blue.name, "BigBlue");
        assert!(!blue.is_word);

        let is = table.get('I').unwrap();
        assert_eq!(is.name, "Is");
        assert!(is.is_word);

        assert!(table.get('?').is_none());
        assert!(table.get(' ').is_none());
    }

    #[test]
    fn test_char_for() {
        let table = BlueprintTable::standard();
        assert_eq!(table.char_for("Rock", false), Some('r'));
        assert_eq!(table.char_for("Rock", true), Some('R'));
        assert_eq!(table.char_for("Floor", true), None);
    }

    #[test]
    fn test_custom_entry() {
        let mut table = BlueprintTable::standard();
        table.insert('k', Blueprint::thing("Key", "key.png"));
        assert_eq!(table.get('k').unwrap().name, "Key");
    }
}
