//! Verse records and the collections built from them
//!
//! Upstream editions are JSON documents of the form
//! `{"quran": [{"chapter": 1, "verse": 1, "text": "..."}, ...]}`.
//! Parsing is strict: a record with a missing field or a zero index fails
//! the whole edition instead of leaking half-formed verses into the UI.

use serde::{Deserialize, Serialize};

use crate::error::EditionError;

/// One verse in one edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl VerseRecord {
    pub fn new(chapter: u32, verse: u32, text: impl Into<String>) -> Self {
        Self {
            chapter,
            verse,
            text: text.into(),
        }
    }

    /// `chapter:verse`, as printed next to a verse
    pub fn reference(&self) -> String {
        format!("{}:{}", self.chapter, self.verse)
    }
}

#[derive(Deserialize)]
struct EditionDocument {
    quran: Vec<VerseRecord>,
}

/// Every verse of one language or translation, in canonical order
#[derive(Debug, Clone)]
pub struct LanguageEdition {
    label: String,
    verses: Vec<VerseRecord>,
}

impl LanguageEdition {
    pub fn new(label: impl Into<String>, verses: Vec<VerseRecord>) -> Result<Self, EditionError> {
        if verses.is_empty() {
            return Err(EditionError::EmptyEdition);
        }

        if let Some((index, bad)) = verses
            .iter()
            .enumerate()
            .find(|(_, v)| v.chapter == 0 || v.verse == 0)
        {
            return Err(EditionError::InvalidRecord {
                index,
                chapter: bad.chapter,
                verse: bad.verse,
            });
        }

        Ok(Self {
            label: label.into(),
            verses,
        })
    }

    pub fn from_json(label: impl Into<String>, json: &str) -> Result<Self, EditionError> {
        let document: EditionDocument = serde_json::from_str(json)?;
        Self::new(label, document.quran)
    }

    pub fn from_slice(label: impl Into<String>, bytes: &[u8]) -> Result<Self, EditionError> {
        let document: EditionDocument = serde_json::from_slice(bytes)?;
        Self::new(label, document.quran)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn verses(&self) -> &[VerseRecord] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Verses of a single chapter, in edition order
    pub fn chapter(&self, chapter: u32) -> impl Iterator<Item = &VerseRecord> {
        self.verses.iter().filter(move |v| v.chapter == chapter)
    }
}

/// The three editions shown side by side
#[derive(Debug, Clone)]
pub struct Editions {
    pub original: LanguageEdition,
    pub translation_a: LanguageEdition,
    pub translation_b: LanguageEdition,
}

/// One verse as it reads in all three editions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedVerseTriple {
    pub original: VerseRecord,
    pub translation_a: VerseRecord,
    pub translation_b: VerseRecord,
}

/// Up to three consecutive verses from one chapter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionWindow {
    pub chapter: u32,
    pub start_index: usize,
    pub verses: Vec<AlignedVerseTriple>,
}

impl SelectionWindow {
    pub fn empty(chapter: u32) -> Self {
        Self {
            chapter,
            start_index: 0,
            verses: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AlignedVerseTriple> {
        self.verses.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlignedVerseTriple> {
        self.verses.iter()
    }
}
