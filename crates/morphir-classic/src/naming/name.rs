//! Name - a list of lower-case words
//!
//! Case conventions are views over the word list, never storage:
//! `["value", "in", "u", "s", "d"]` renders as `valueInUSD`, `ValueInUSD` or
//! `value_in_USD` on demand.

use super::interner::{Word, intern, resolve};
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Name - a list of words, serialized as ["word1", "word2"]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub words: Vec<Word>,
}

impl std::str::FromStr for Name {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Words follow the pattern ([a-zA-Z][a-z]*|[0-9]+), everything else separates.
        let mut words = Vec::new();
        let chars: Vec<(usize, char)> = s.char_indices().collect();
        let mut i = 0;
        let len = chars.len();
        let end_of = |i: usize| chars.get(i).map_or(s.len(), |(pos, _)| *pos);

        while i < len {
            let (start, c) = chars[i];

            if c.is_ascii_alphabetic() {
                i += 1;
                while i < len && chars[i].1.is_ascii_lowercase() {
                    i += 1;
                }
                words.push(intern(&s[start..end_of(i)].to_ascii_lowercase()));
            } else if c.is_ascii_digit() {
                i += 1;
                while i < len && chars[i].1.is_ascii_digit() {
                    i += 1;
                }
                words.push(intern(&s[start..end_of(i)]));
            } else {
                i += 1;
            }
        }

        Ok(Name { words })
    }
}

impl Name {
    /// Builds a name from words that are already split and lower-cased.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| intern(w.as_ref())).collect(),
        }
    }

    /// Splits free-form text into words, see [`std::str::FromStr`].
    ///
    /// Words are interned for the life of the process.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match <Self as std::str::FromStr>::from_str(s) {
            Ok(name) => name,
            Err(never) => match never {},
        }
    }

    /// The words as plain strings.
    pub fn parts(&self) -> Vec<&'static str> {
        self.words.iter().map(|w| resolve(*w)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `["value", "in", "u", "s", "d"]` -> `ValueInUSD`
    pub fn to_title_case(&self) -> String {
        self.words.iter().map(|w| capitalize(resolve(*w))).collect()
    }

    /// `["value", "in", "u", "s", "d"]` -> `valueInUSD`
    pub fn to_camel_case(&self) -> String {
        let mut out = String::new();
        for (i, word) in self.words.iter().enumerate() {
            if i == 0 {
                out.push_str(resolve(*word));
            } else {
                out.push_str(&capitalize(resolve(*word)));
            }
        }
        out
    }

    /// `["value", "in", "u", "s", "d"]` -> `value_in_USD`
    pub fn to_snake_case(&self) -> String {
        self.to_human_words().join("_")
    }

    /// Like [`Name::parts`], except that a run of single-letter words becomes one
    /// upper-case abbreviation: `["value", "in", "u", "s", "d"]` -> `["value", "in", "USD"]`.
    pub fn to_human_words(&self) -> Vec<String> {
        let words = self.parts();
        if words.len() == 1 {
            return vec![words[0].to_string()];
        }

        let mut out = Vec::with_capacity(words.len());
        let mut abbrev = String::new();
        for word in words {
            if word.chars().count() == 1 {
                abbrev.push_str(&word.to_uppercase());
                continue;
            }
            if !abbrev.is_empty() {
                out.push(std::mem::take(&mut abbrev));
            }
            out.push(word.to_string());
        }
        if !abbrev.is_empty() {
            out.push(abbrev);
        }
        out
    }

    /// [`Name::to_human_words`] with the first word capitalized.
    pub fn to_human_words_title(&self) -> Vec<String> {
        let mut words = self.to_human_words();
        if let Some(first) = words.first_mut() {
            *first = capitalize(first);
        }
        words
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{}", resolve(*word))?;
        }
        Ok(())
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.words.iter().map(|w| resolve(*w)))
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NameVisitor;

        impl<'de> Visitor<'de> for NameVisitor {
            type Value = Name;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array of strings [\"word1\", \"word2\"]")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let mut words = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(word) = seq.next_element::<std::borrow::Cow<'de, str>>()? {
                    words.push(intern(&word));
                }
                Ok(Name { words })
            }
        }

        deserializer.deserialize_seq(NameVisitor)
    }
}
