//! Story configuration, loadable from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```toml
//! title = "The Swallows"
//! chapters = 18
//! events_per_chapter = 810
//! seed = 1234
//!
//! [editor]
//! min_paragraph = 10
//! max_paragraph = 25
//!
//! [weights]
//! nostalgia_one_in = 11
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{NarrativeError, Result};

/// Top-level configuration for publishing a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub title: String,
    pub chapters: u32,
    /// A chapter's simulation stops once its log holds at least this many events.
    pub events_per_chapter: usize,
    /// Seed for the random source; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub editor: EditorConfig,
    pub weights: Weights,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            chapters: 18,
            events_per_chapter: 810,
            seed: None,
            editor: EditorConfig::default(),
            weights: Weights::default(),
        }
    }
}

impl StoryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: StoryConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The random source for a run: seeded if a seed is configured, from OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chapters == 0 {
            return Err(NarrativeError::InvalidConfig("chapters must be at least 1".into()));
        }
        if self.events_per_chapter == 0 {
            return Err(NarrativeError::InvalidConfig(
                "events_per_chapter must be at least 1".into(),
            ));
        }
        self.editor.validate()?;
        self.weights.validate()
    }
}

/// Paragraph sizing for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub min_paragraph: usize,
    pub max_paragraph: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_paragraph: 10,
            max_paragraph: 25,
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_paragraph == 0 || self.min_paragraph > self.max_paragraph {
            return Err(NarrativeError::InvalidConfig(format!(
                "paragraph range {}..={} is empty",
                self.min_paragraph, self.max_paragraph
            )));
        }
        Ok(())
    }
}

/// Behaviour probabilities, as named weights.
///
/// A turn with nothing more pressing rolls once in `0..turn_roll`: the first `hide_and_seek`
/// values hide or search (only when alone), the next `wander` values wander, and the rest
/// pick an idle gesture, falling back to wandering past the end of the gesture list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub turn_roll: u32,
    pub hide_and_seek: u32,
    pub wander: u32,
    /// Chance of fixating on a carried weapon when no treasure is carried.
    pub weapon_fixation_one_in: u32,
    /// Chance of a fond remark on arriving somewhere.
    pub nostalgia_one_in: u32,
    /// Chance of ignoring what we remember about a container and searching it afresh.
    pub ignore_memory_one_in: u32,
    /// Chance of taking a remembered item out rather than just checking on it.
    pub retrieve_one_in: u32,
    /// Chance of picking the first course of action when forming a goal.
    pub first_course_one_in: u32,
    /// Chance of asking where the remedy is after lamenting its absence.
    pub ask_where_one_in: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            turn_roll: 26,
            hide_and_seek: 10,
            wander: 10,
            weapon_fixation_one_in: 21,
            nostalgia_one_in: 11,
            ignore_memory_one_in: 4,
            retrieve_one_in: 6,
            first_course_one_in: 2,
            ask_where_one_in: 2,
        }
    }
}

impl Weights {
    pub fn validate(&self) -> Result<()> {
        let odds = [
            ("weapon_fixation_one_in", self.weapon_fixation_one_in),
            ("nostalgia_one_in", self.nostalgia_one_in),
            ("ignore_memory_one_in", self.ignore_memory_one_in),
            ("retrieve_one_in", self.retrieve_one_in),
            ("first_course_one_in", self.first_course_one_in),
            ("ask_where_one_in", self.ask_where_one_in),
        ];
        if let Some((name, _)) = odds.iter().find(|(_, value)| *value == 0) {
            return Err(NarrativeError::InvalidConfig(format!("{} must be at least 1", name)));
        }
        if self.turn_roll == 0 || self.hide_and_seek + self.wander > self.turn_roll {
            return Err(NarrativeError::InvalidConfig(
                "turn_roll must cover the hide_and_seek and wander bands".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = StoryConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoryConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = StoryConfig::from_toml_str(
            r#"
            title = "Not the Swallows"
            chapters = 2
            seed = 7

            [editor]
            max_paragraph = 12

            [weights]
            nostalgia_one_in = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.title, "Not the Swallows");
        assert_eq!(config.chapters, 2);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.editor.min_paragraph, 10);
        assert_eq!(config.editor.max_paragraph, 12);
        assert_eq!(config.weights.nostalgia_one_in, 3);
        assert_eq!(config.weights.turn_roll, 26);
    }

    #[test]
    fn test_rejects_inverted_paragraph_range() {
        let err = StoryConfig::from_toml_str("[editor]\nmin_paragraph = 30\n").unwrap_err();
        assert!(matches!(err, NarrativeError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_odds() {
        let err = StoryConfig::from_toml_str("[weights]\nretrieve_one_in = 0\n").unwrap_err();
        assert!(err.to_string().contains("retrieve_one_in"));
    }

    #[test]
    fn test_seeded_rng_repeats() {
        use rand::Rng;

        let config = StoryConfig {
            seed: Some(99),
            ..StoryConfig::default()
        };
        let mut first = config.rng();
        let mut second = config.rng();
        let a: Vec<u32> = (0..8).map(|_| first.gen()).collect();
        let b: Vec<u32> = (0..8).map(|_| second.gen()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = StoryConfig::from_toml_str("chapters = \"many\"").unwrap_err();
        assert!(matches!(err, NarrativeError::Toml(_)));
    }
}
