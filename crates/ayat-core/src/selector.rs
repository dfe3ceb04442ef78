//! Random selection of a small window of aligned verses
//!
//! The selector picks a chapter, then a contiguous run of up to
//! `window_size` verses inside it. Windows never cross a chapter boundary:
//! short chapters give short windows.

use std::collections::HashMap;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::verse::{AlignedVerseTriple, Editions, SelectionWindow, VerseRecord};

/// Number of chapters (surahs) in the Quran
pub const DEFAULT_MAX_CHAPTER: u32 = 114;

/// Verses shown per window
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Source of uniform random integers
pub trait RandomSource {
    /// A uniform integer in `[low, high]`, both inclusive.
    fn next_in_range(&mut self, low: usize, high: usize) -> usize;
}

/// Thread-local RNG from `rand`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Reproducible RNG for a fixed seed
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Picks a chapter, then up to `window_size` consecutive aligned verses in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseWindowSelector {
    max_chapter: u32,
    window_size: usize,
}

impl Default for VerseWindowSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHAPTER, DEFAULT_WINDOW_SIZE)
    }
}

impl VerseWindowSelector {
    pub fn new(max_chapter: u32, window_size: usize) -> Self {
        Self {
            max_chapter: max_chapter.max(1),
            window_size: window_size.max(1),
        }
    }

    pub fn max_chapter(&self) -> u32 {
        self.max_chapter
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Pick a random chapter in `[1, max_chapter]`, then a window inside it.
    pub fn select_window<R>(&self, editions: &Editions, rng: &mut R) -> SelectionWindow
    where
        R: RandomSource + ?Sized,
    {
        let chapter = rng.next_in_range(1, self.max_chapter as usize) as u32;
        self.select_window_in_chapter(editions, chapter, rng)
    }

    /// Pick a window inside a fixed chapter.
    ///
    /// An empty window is a normal result when any edition lacks the chapter.
    pub fn select_window_in_chapter<R>(
        &self,
        editions: &Editions,
        chapter: u32,
        rng: &mut R,
    ) -> SelectionWindow
    where
        R: RandomSource + ?Sized,
    {
        let aligned = align_chapter(editions, chapter);
        if aligned.is_empty() {
            debug!("chapter {} has no aligned verses, window is empty", chapter);
            return SelectionWindow::empty(chapter);
        }

        let max_start = aligned.len().saturating_sub(self.window_size);
        let start_index = rng.next_in_range(0, max_start).min(max_start);

        let verses: Vec<AlignedVerseTriple> = aligned
            .into_iter()
            .skip(start_index)
            .take(self.window_size)
            .map(|(original, a, b)| AlignedVerseTriple {
                original: original.clone(),
                translation_a: a.clone(),
                translation_b: b.clone(),
            })
            .collect();

        debug!(
            "selected chapter {} start {} ({} verses)",
            chapter,
            start_index,
            verses.len()
        );

        SelectionWindow {
            chapter,
            start_index,
            verses,
        }
    }
}

type AlignedRefs<'a> = (&'a VerseRecord, &'a VerseRecord, &'a VerseRecord);

/// Join the three editions on verse number within one chapter.
///
/// Walks the original edition in order and keeps the verses present in both
/// translations, so records are never paired across different verses.
fn align_chapter(editions: &Editions, chapter: u32) -> Vec<AlignedRefs<'_>> {
    let original: Vec<&VerseRecord> = editions.original.chapter(chapter).collect();
    let by_verse_a: HashMap<u32, &VerseRecord> = editions
        .translation_a
        .chapter(chapter)
        .map(|v| (v.verse, v))
        .collect();
    let by_verse_b: HashMap<u32, &VerseRecord> = editions
        .translation_b
        .chapter(chapter)
        .map(|v| (v.verse, v))
        .collect();

    if original.is_empty() || by_verse_a.is_empty() || by_verse_b.is_empty() {
        return Vec::new();
    }

    let aligned: Vec<AlignedRefs<'_>> = original
        .iter()
        .filter_map(|o| {
            let a = by_verse_a.get(&o.verse)?;
            let b = by_verse_b.get(&o.verse)?;
            Some((*o, *a, *b))
        })
        .collect();

    if aligned.len() != original.len()
        || aligned.len() != by_verse_a.len()
        || aligned.len() != by_verse_b.len()
    {
        warn!(
            "editions disagree on chapter {}: {} / {} / {} verses, {} aligned",
            chapter,
            original.len(),
            by_verse_a.len(),
            by_verse_b.len(),
            aligned.len()
        );
    }

    aligned
}
