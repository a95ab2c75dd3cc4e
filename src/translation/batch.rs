/*!
 * Batching of translatable fragments.
 *
 * Fragments are grouped by count only, in input order. Positional
 * reconciliation after translation depends on that order being kept.
 */

use anyhow::{Result, anyhow};

use crate::document::TextLocation;

/// One unit of translatable text tied to a single document location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub location: TextLocation,
    pub source_text: String,
}

impl Fragment {
    pub fn new(location: TextLocation, source_text: impl Into<String>) -> Self {
        Self {
            location,
            source_text: source_text.into(),
        }
    }
}

/// A non-empty, order-preserving group of fragments sent in one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Position of this batch within its document, starting at 0
    pub index: usize,
    fragments: Vec<Fragment>,
}

impl Batch {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Always false for batches built by `Batcher`
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn source_texts(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.source_text.as_str())
    }
}

/// Splits fragment sequences into batches of at most `batch_size`
#[derive(Debug, Clone, Copy)]
pub struct Batcher {
    batch_size: usize,
}

impl Batcher {
    /// Create a batcher; `batch_size` must be positive
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(anyhow!("Batch size must be a positive integer"));
        }
        Ok(Self { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches `batches` would produce for `fragment_count` fragments
    pub fn batch_count(&self, fragment_count: usize) -> usize {
        fragment_count.div_ceil(self.batch_size)
    }

    /// Group fragments into batches, keeping their order
    ///
    /// Every batch but possibly the last holds exactly `batch_size`
    /// fragments. No fragments, no batches.
    pub fn batches(&self, fragments: Vec<Fragment>) -> Vec<Batch> {
        let mut batches = Vec::with_capacity(self.batch_count(fragments.len()));
        let mut current = Vec::with_capacity(self.batch_size.min(fragments.len()));

        for fragment in fragments {
            current.push(fragment);
            if current.len() == self.batch_size {
                let index = batches.len();
                batches.push(Batch {
                    index,
                    fragments: std::mem::take(&mut current),
                });
            }
        }

        if !current.is_empty() {
            let index = batches.len();
            batches.push(Batch {
                index,
                fragments: current,
            });
        }

        batches
    }
}
