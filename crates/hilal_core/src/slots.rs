//! Fixed-size slot grids and fallback back-filling.
//!
//! The trending feed for mixed publications arrives as blocks of two
//! articles per category, `[in-focus, in-focus, national-news,
//! national-news, misc, misc]`, and is shown as a three-column grid with one
//! column per category. [`SlotLayout`] names that mapping instead of relying
//! on bare indices, and [`arrange_slots`] fills whatever the feed left empty.

use std::collections::HashSet;

use crate::types::{Article, ArticleId};

/// Content category a grid slot is bound to, in upstream feed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotCategory {
    InFocus,
    NationalNews,
    Misc,
}

impl SlotCategory {
    pub const FEED_ORDER: [SlotCategory; 3] = [
        SlotCategory::InFocus,
        SlotCategory::NationalNews,
        SlotCategory::Misc,
    ];

    /// Articles each category contributes to the trending feed.
    pub const ENTRIES_PER_CATEGORY: usize = 2;

    /// Index of this category's first entry in the trending feed.
    pub fn feed_offset(self) -> usize {
        let block = Self::FEED_ORDER
            .iter()
            .position(|category| *category == self)
            .unwrap_or_default();
        block * Self::ENTRIES_PER_CATEGORY
    }

    pub fn slug(self) -> &'static str {
        match self {
            SlotCategory::InFocus => "in-focus",
            SlotCategory::NationalNews => "national-news",
            SlotCategory::Misc => "misc",
        }
    }
}

/// One grid position: the `rank`-th (0-based) article of `category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub category: SlotCategory,
    pub rank: usize,
}

impl SlotSpec {
    pub fn new(category: SlotCategory, rank: usize) -> Self {
        Self { category, rank }
    }

    pub fn feed_index(&self) -> usize {
        self.category.feed_offset() + self.rank
    }
}

/// Ordered slot table rendered row by row, `columns` slots per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    columns: usize,
    slots: Vec<SlotSpec>,
}

impl SlotLayout {
    pub fn new(columns: usize, slots: Vec<SlotSpec>) -> Self {
        Self {
            columns: columns.max(1),
            slots,
        }
    }

    /// Two rows, one column per category: first-ranked entries on top.
    pub fn trending_mixed() -> Self {
        let slots = (0..SlotCategory::ENTRIES_PER_CATEGORY)
            .flat_map(|rank| {
                SlotCategory::FEED_ORDER
                    .into_iter()
                    .map(move |category| SlotSpec::new(category, rank))
            })
            .collect();
        Self::new(SlotCategory::FEED_ORDER.len(), slots)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn slots(&self) -> &[SlotSpec] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Picks each slot's article out of a (date-filtered) trending feed.
    pub fn assign<'a>(&self, feed: &[&'a Article]) -> Vec<Option<&'a Article>> {
        self.slots
            .iter()
            .map(|slot| feed.get(slot.feed_index()).copied())
            .collect()
    }

    pub fn rows<'c, T>(&self, cells: &'c [T]) -> std::slice::Chunks<'c, T> {
        cells.chunks(self.columns)
    }
}

/// Back-fills the empty slots of `primary` from `fallback`.
///
/// Ids already in `already_used` or anywhere in `primary` are never placed
/// again. `fallback` is consumed left to right and never rewound; once it
/// runs out the remaining empty slots stay empty. A missing fallback counts
/// as an empty one.
pub fn arrange_slots<'a, 'u, I>(
    primary: &[Option<&'a Article>],
    fallback: Option<&'a [Article]>,
    already_used: I,
) -> Vec<Option<&'a Article>>
where
    I: IntoIterator<Item = &'u Article>,
{
    let mut used: HashSet<&ArticleId> = already_used.into_iter().map(|article| &article.id).collect();
    used.extend(primary.iter().flatten().map(|article| &article.id));

    let mut remaining = fallback.unwrap_or_default().iter();

    primary
        .iter()
        .map(|slot| match slot {
            Some(article) => Some(*article),
            None => {
                let found = remaining
                    .by_ref()
                    .find(|candidate| !used.contains(&candidate.id));
                if let Some(article) = found {
                    used.insert(&article.id);
                }
                found
            }
        })
        .collect()
}
