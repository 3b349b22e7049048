//! Chapter detection over a generated card deck.
//!
//! A chapter is a run of consecutive cards sharing the breadcrumb entry at the
//! chapter level: the shallowest level where breadcrumbs disagree.

use std::cell::OnceCell;

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::cards::SpeechCard;

/// A run of consecutive cards with the same chapter key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub key: String,
    pub start: usize,
    pub len: usize,
}

/// Chapter navigation for one card deck.
///
/// The chapter level is computed on first use and cached for the life of
/// this instance. A regenerated deck needs a new navigator.
#[derive(Debug, Clone)]
pub struct ChapterNavigator {
    cards: Vec<SpeechCard>,
    level: OnceCell<usize>,
}

impl ChapterNavigator {
    pub fn new(cards: Vec<SpeechCard>) -> Self {
        Self {
            cards,
            level: OnceCell::new(),
        }
    }

    pub fn cards(&self) -> &[SpeechCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn chapter_level(&self) -> usize {
        *self.level.get_or_init(|| find_chapter_level(&self.cards))
    }

    /// Breadcrumb entry at the chapter level, or the topic for shallower cards.
    ///
    /// # Panics
    /// When `index` is out of range.
    pub fn chapter_key(&self, index: usize) -> &str {
        let card = &self.cards[index];
        card.breadcrumb
            .get(self.chapter_level())
            .unwrap_or(&card.topic)
            .as_str()
    }

    /// First card after `current` that starts a different chapter.
    pub fn next_chapter_index(&self, current: usize) -> Option<usize> {
        if current >= self.cards.len() {
            return None;
        }
        let key = self.chapter_key(current);
        (current + 1..self.cards.len()).find(|&i| self.chapter_key(i) != key)
    }

    /// Start of the current chapter, or of the previous chapter when
    /// `current` already is a chapter start. Stays at 0 on the first card.
    pub fn previous_chapter_index(&self, current: usize) -> usize {
        if current >= self.cards.len() {
            return current;
        }
        let start = self.chapter_start(current);
        if current > start {
            start
        } else if start > 0 {
            self.chapter_start(start - 1)
        } else {
            current
        }
    }

    pub fn can_go_next_chapter(&self, current: usize) -> bool {
        self.next_chapter_index(current).is_some()
    }

    fn chapter_start(&self, index: usize) -> usize {
        let key = self.chapter_key(index);
        let mut start = index;
        while start > 0 && self.chapter_key(start - 1) == key {
            start -= 1;
        }
        start
    }

    /// All chapters in deck order.
    #[instrument(level = "debug", skip(self))]
    pub fn chapters(&self) -> Vec<Chapter> {
        let chapters: Vec<Chapter> = (0..self.cards.len())
            .chunk_by(|&i| self.chapter_key(i))
            .into_iter()
            .map(|(key, run)| {
                let run: Vec<usize> = run.collect();
                Chapter {
                    key: key.to_string(),
                    start: run[0],
                    len: run.len(),
                }
            })
            .collect();
        debug!(count = chapters.len(), "chapters");
        chapters
    }
}

/// Shallowest breadcrumb level with more than one distinct value; one past
/// the deepest breadcrumb when there is none, so keys fall back to topics.
fn find_chapter_level(cards: &[SpeechCard]) -> usize {
    let max_depth = cards.iter().map(|c| c.breadcrumb.len()).max().unwrap_or(0);
    let level = (0..max_depth)
        .find(|&level| {
            cards
                .iter()
                .filter_map(|c| c.breadcrumb.get(level))
                .unique()
                .count()
                > 1
        })
        .unwrap_or(max_depth);
    debug!(level, max_depth, "chapter level");
    level
}
