//! Immutable chunk collection with scored free-text search.

use std::collections::{HashMap, HashSet};

use crate::chunk::{Chunk, ChunkCategory, chunks_from_content};
use crate::content::CourseContent;
use crate::error::{KnowledgeError, Result};
use crate::scoring::{Query, ScoringWeights, score};

/// A chunk paired with its relevance score for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub score: u64,
}

#[derive(Debug)]
struct Entry {
    chunk: Chunk,
    content_lower: String,
    source_lower: String,
}

/// Fixed collection of chunks built once at startup.
///
/// There is no mutation API: search is a pure read, so a single store can be
/// shared between concurrent requests.
#[derive(Debug)]
pub struct KnowledgeStore {
    entries: Vec<Entry>,
    weights: ScoringWeights,
}

impl KnowledgeStore {
    /// Build a store from course content with default scoring weights.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::DuplicateId`] if two content keys produce the same chunk id.
    pub fn build(content: &CourseContent) -> Result<Self> {
        Self::from_chunks(chunks_from_content(content))
    }

    /// Build a store from pre-made chunks, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::DuplicateId`] if any id appears twice.
    pub fn from_chunks(chunks: Vec<Chunk>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(chunks.len());
        for chunk in &chunks {
            if !seen.insert(chunk.id.as_str()) {
                return Err(KnowledgeError::DuplicateId(chunk.id.clone()));
            }
        }

        let entries: Vec<Entry> = chunks
            .into_iter()
            .map(|chunk| Entry {
                content_lower: chunk.content.to_lowercase(),
                source_lower: chunk.source.to_lowercase(),
                chunk,
            })
            .collect();

        let mut by_category: HashMap<ChunkCategory, usize> = HashMap::new();
        for entry in &entries {
            *by_category.entry(entry.chunk.category).or_default() += 1;
        }
        tracing::debug!(
            total = entries.len(),
            pages = by_category.get(&ChunkCategory::Page).copied().unwrap_or(0),
            sections = by_category.get(&ChunkCategory::Section).copied().unwrap_or(0),
            quizzes = by_category.get(&ChunkCategory::Quiz).copied().unwrap_or(0),
            explanations = by_category
                .get(&ChunkCategory::Explanation)
                .copied()
                .unwrap_or(0),
            "knowledge store built"
        );

        Ok(Self {
            entries,
            weights: ScoringWeights::default(),
        })
    }

    #[must_use]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Chunk> {
        self.entries
            .iter()
            .map(|e| &e.chunk)
            .find(|c| c.id == id)
    }

    /// All chunks in build order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|e| &e.chunk)
    }

    /// Return at most `limit` chunks relevant to `query`, best first.
    ///
    /// Chunks scoring zero are never returned. Equal scores keep build order.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Chunk> {
        self.search_scored(query, limit)
            .into_iter()
            .map(|s| s.chunk)
            .collect()
    }

    /// Same as [`search`](Self::search) but keeps each chunk's score.
    #[must_use]
    pub fn search_scored(&self, query: &str, limit: usize) -> Vec<ScoredChunk<'_>> {
        if limit == 0 || self.entries.is_empty() {
            return Vec::new();
        }

        let query = Query::parse(query, self.weights.min_token_chars);

        let mut scored: Vec<ScoredChunk<'_>> = self
            .entries
            .iter()
            .filter_map(|e| {
                let s = score(&query, &e.content_lower, &e.source_lower, &self.weights);
                (s > 0).then_some(ScoredChunk {
                    chunk: &e.chunk,
                    score: s,
                })
            })
            .collect();

        // Stable: ties stay in build order.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);
        scored
    }
}
