//! Grammatical agreement for actor names.

use serde::{Deserialize, Serialize};

/// Grammatical gender, which selects the pronoun set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    Neuter,
    Masculine,
    Feminine,
}

/// Grammatical number. Plural overrides gender for pronouns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Number {
    #[default]
    Singular,
    Plural,
}

/// How an actor's name agrees with the words around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Grammar {
    /// Proper nouns take no article ("Alice", "Main Street").
    pub proper: bool,
    pub gender: Gender,
    pub number: Number,
}

impl Grammar {
    /// A common, singular, neuter noun: "the kitchen".
    pub fn common() -> Self {
        Self::default()
    }

    /// A proper noun with no article.
    pub fn proper() -> Self {
        Self {
            proper: true,
            ..Self::default()
        }
    }

    /// A proper, masculine name.
    pub fn masculine() -> Self {
        Self {
            proper: true,
            gender: Gender::Masculine,
            number: Number::Singular,
        }
    }

    /// A proper, feminine name.
    pub fn feminine() -> Self {
        Self {
            proper: true,
            gender: Gender::Feminine,
            number: Number::Singular,
        }
    }

    /// A common plural noun: "the stolen jewels".
    pub fn plural() -> Self {
        Self {
            number: Number::Plural,
            ..Self::default()
        }
    }

    pub fn is_plural(&self) -> bool {
        self.number == Number::Plural
    }

    /// The definite article, if the noun takes one.
    pub fn article(&self) -> Option<&'static str> {
        if self.proper {
            None
        } else {
            Some("the")
        }
    }

    pub fn possessive(&self) -> &'static str {
        match (self.number, self.gender) {
            (Number::Plural, _) => "their",
            (_, Gender::Masculine) => "his",
            (_, Gender::Feminine) => "her",
            (_, Gender::Neuter) => "its",
        }
    }

    pub fn accusative(&self) -> &'static str {
        match (self.number, self.gender) {
            (Number::Plural, _) => "them",
            (_, Gender::Masculine) => "him",
            (_, Gender::Feminine) => "her",
            (_, Gender::Neuter) => "it",
        }
    }

    pub fn pronoun(&self) -> &'static str {
        match (self.number, self.gender) {
            (Number::Plural, _) => "they",
            (_, Gender::Masculine) => "he",
            (_, Gender::Feminine) => "she",
            (_, Gender::Neuter) => "it",
        }
    }

    /// Past-tense copula: "was" / "were".
    pub fn was(&self) -> &'static str {
        if self.is_plural() {
            "were"
        } else {
            "was"
        }
    }

    /// Present-tense copula: "is" / "are".
    pub fn is(&self) -> &'static str {
        if self.is_plural() {
            "are"
        } else {
            "is"
        }
    }

    /// The name with an indefinite article: "a revolver", "an urn", "some stolen jewels".
    pub fn indefinite(&self, name: &str) -> String {
        if self.proper {
            return name.to_string();
        }
        if self.is_plural() {
            return format!("some {}", name);
        }
        let article = if name.starts_with(['a', 'e', 'i', 'o', 'u']) {
            "an"
        } else {
            "a"
        };
        format!("{} {}", article, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pronoun_sets() {
        let bob = Grammar::masculine();
        assert_eq!(
            (bob.pronoun(), bob.accusative(), bob.possessive()),
            ("he", "him", "his")
        );

        let alice = Grammar::feminine();
        assert_eq!(
            (alice.pronoun(), alice.accusative(), alice.possessive()),
            ("she", "her", "her")
        );

        let falcon = Grammar::common();
        assert_eq!(falcon.pronoun(), "it");
    }

    #[test]
    fn test_plural_agreement() {
        let jewels = Grammar::plural();
        assert_eq!(jewels.pronoun(), "they");
        assert_eq!(jewels.was(), "were");
        assert_eq!(jewels.is(), "are");
        assert_eq!(jewels.indefinite("stolen jewels"), "some stolen jewels");
    }

    #[test]
    fn test_indefinite_article() {
        let common = Grammar::common();
        assert_eq!(common.indefinite("revolver"), "a revolver");
        assert_eq!(common.indefinite("old urn"), "an old urn");
        assert_eq!(Grammar::proper().indefinite("Main Street"), "Main Street");
    }

    #[test]
    fn test_article() {
        assert_eq!(Grammar::common().article(), Some("the"));
        assert_eq!(Grammar::masculine().article(), None);
    }
}
