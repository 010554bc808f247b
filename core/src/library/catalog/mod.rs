//! Header-grouped, searchable catalog
//!
//! Entries live in two dense backing lists, one per kind. What a front end
//! sees is a *projection*: an ordered list of [`EntryRef`]s into those lists.
//! Filtering only ever rebuilds the projection, so backing indices stay
//! stable for the lifetime of the data.
//!
//! ```text
//! headers:    ["NROs"]
//! leaves:     [Mario Kart, Zelda]
//! projection: [Header#0, Leaf#0, Leaf#1]      (unfiltered)
//! filtered:   [Leaf#0]                        (query "mario")
//! ```

mod cache;
pub mod fuzzy;


use serde::{Deserialize, Serialize};

pub use cache::CacheError;

/// Items that can be matched against a search query.
pub trait CatalogLeaf {
    /// Text the fuzzy search ranks this item by.
    fn key(&self) -> String;
}

/// Discriminant of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Group label, never selectable or searchable
    Header,
    /// Selectable item
    Leaf,
}

/// Tagged reference into one of the backing lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryRef {
    pub kind: EntryKind,
    pub index: usize,
}

/// An entry to append with [`Catalog::add`].
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem<T> {
    Header(String),
    Leaf(T),
}

/// Borrowed view of a visible entry.
#[derive(Debug, PartialEq)]
pub enum CatalogEntry<'a, T> {
    Header(&'a str),
    Leaf(&'a T),
}

impl<T> Clone for CatalogEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CatalogEntry<'_, T> {}

impl<'a, T> CatalogEntry<'a, T> {
    pub fn kind(&self) -> EntryKind {
        match self {
            CatalogEntry::Header(_) => EntryKind::Header,
            CatalogEntry::Leaf(_) => EntryKind::Leaf,
        }
    }

    /// The leaf payload, or `None` for headers.
    pub fn leaf(&self) -> Option<&'a T> {
        match self {
            CatalogEntry::Leaf(leaf) => Some(leaf),
            CatalogEntry::Header(_) => None,
        }
    }
}

/// Search tuning.
///
/// The defaults reproduce the long-standing search behaviour; both values
/// can be overridden from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Minimum similarity score (0-100) a candidate needs to be shown
    #[serde(default = "default_min_score")]
    pub min_score: u8,
    /// Candidate count is `max(1, limit_base - query length)`
    #[serde(default = "default_limit_base")]
    pub limit_base: usize,
}

fn default_min_score() -> u8 {
    35
}
fn default_limit_base() -> usize {
    10
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            limit_base: default_limit_base(),
        }
    }
}

impl FilterConfig {
    /// Number of ranked candidates requested for a normalised query.
    pub fn candidate_limit(&self, query_len: usize) -> usize {
        self.limit_base.saturating_sub(query_len).max(1)
    }
}

/// Lower-case the query and drop every whitespace character.
pub fn normalize_query(query: &str) -> String {
    query
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Catalog of header labels and leaf items.
///
/// Not internally synchronised: callers serialise mutations against each
/// other and against [`filter`](Catalog::filter).
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    leaves: Vec<T>,
    headers: Vec<String>,
    projection: Vec<EntryRef>,
    /// `None` while the query is empty
    filtered: Option<Vec<EntryRef>>,
    query: String,
    config: FilterConfig,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Catalog<T> {
    /// Create an empty catalog with default search tuning.
    pub fn new() -> Self {
        Self::with_config(FilterConfig::default())
    }

    pub fn with_config(config: FilterConfig) -> Self {
        Self {
            leaves: Vec::new(),
            headers: Vec::new(),
            projection: Vec::new(),
            filtered: None,
            query: String::new(),
            config,
        }
    }

    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// The last applied query, normalised.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Remove every entry. The active query is kept.
    pub fn clear(&mut self) {
        self.leaves.clear();
        self.headers.clear();
        self.projection.clear();
        self.filtered = if self.query.is_empty() {
            None
        } else {
            Some(Vec::new())
        };
    }

    /// Number of visible entries.
    pub fn len(&self) -> usize {
        self.visible().len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }

    /// Kind of the visible entry at `index`.
    pub fn entry_kind(&self, index: usize) -> Option<EntryKind> {
        self.visible().get(index).map(|r| r.kind)
    }

    /// The visible entry at `index`.
    pub fn entry_at(&self, index: usize) -> Option<CatalogEntry<'_, T>> {
        self.visible().get(index).and_then(|r| self.resolve(*r))
    }

    /// Visible entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = CatalogEntry<'_, T>> + '_ {
        self.visible().iter().filter_map(move |r| self.resolve(*r))
    }

    /// The visible projection.
    pub fn visible(&self) -> &[EntryRef] {
        self.filtered.as_deref().unwrap_or(&self.projection)
    }

    /// The unfiltered projection.
    pub fn projection(&self) -> &[EntryRef] {
        &self.projection
    }

    /// Leaf backing list.
    pub fn leaves(&self) -> &[T] {
        &self.leaves
    }

    /// Header backing list.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Look up a reference in the backing lists.
    pub fn resolve(&self, r: EntryRef) -> Option<CatalogEntry<'_, T>> {
        match r.kind {
            EntryKind::Header => self.headers.get(r.index).map(|h| CatalogEntry::Header(h.as_str())),
            EntryKind::Leaf => self.leaves.get(r.index).map(CatalogEntry::Leaf),
        }
    }

    fn push(&mut self, item: CatalogItem<T>) {
        let r = match item {
            CatalogItem::Header(label) => {
                self.headers.push(label);
                EntryRef {
                    kind: EntryKind::Header,
                    index: self.headers.len() - 1,
                }
            }
            CatalogItem::Leaf(leaf) => {
                self.leaves.push(leaf);
                EntryRef {
                    kind: EntryKind::Leaf,
                    index: self.leaves.len() - 1,
                }
            }
        };
        self.projection.push(r);
    }
}

impl<T: CatalogLeaf> Catalog<T> {
    /// Append an entry.
    ///
    /// With an active query the whole catalog is filtered again so the
    /// visible projection stays consistent.
    pub fn add(&mut self, item: CatalogItem<T>) {
        self.push(item);
        self.refilter();
    }

    pub fn add_header(&mut self, label: impl Into<String>) {
        self.add(CatalogItem::Header(label.into()));
    }

    pub fn add_leaf(&mut self, leaf: T) {
        self.add(CatalogItem::Leaf(leaf));
    }

    /// Append many entries, filtering once at the end.
    pub fn extend(&mut self, items: impl IntoIterator<Item = CatalogItem<T>>) {
        for item in items {
            self.push(item);
        }
        self.refilter();
    }

    /// Replace the search tuning and re-apply the active query.
    pub fn set_config(&mut self, config: FilterConfig) {
        self.config = config;
        self.refilter();
    }

    /// Apply `query` and return the visible entries.
    ///
    /// An empty (or all-whitespace) query shows everything in insertion
    /// order. Otherwise only leaves are ranked, best match first; see
    /// [`fuzzy::extract_top`] for scoring and tie-breaking.
    pub fn filter(&mut self, query: &str) -> Vec<CatalogEntry<'_, T>> {
        self.query = normalize_query(query);
        self.refilter();
        self.iter().collect()
    }

    /// Recompute the filtered projection from scratch.
    fn refilter(&mut self) {
        if self.query.is_empty() {
            self.filtered = None;
            return;
        }

        let mut keys = Vec::new();
        let mut key_refs = Vec::new();
        for r in &self.projection {
            if r.kind == EntryKind::Leaf
                && let Some(leaf) = self.leaves.get(r.index)
            {
                keys.push(leaf.key().to_lowercase());
                key_refs.push(*r);
            }
        }

        let limit = self.config.candidate_limit(self.query.chars().count());
        let min_score = self.config.min_score;
        let filtered: Vec<EntryRef> = fuzzy::extract_top(&self.query, &keys, limit)
            .into_iter()
            .filter(|m| m.score >= min_score)
            .filter_map(|m| key_refs.get(m.index).copied())
            .collect();

        tracing::debug!(
            "Query '{}' matched {} of {} entries",
            self.query,
            filtered.len(),
            keys.len()
        );
        self.filtered = Some(filtered);
    }

    /// Install restored backing data and re-apply the active query.
    fn replace(&mut self, leaves: Vec<T>, headers: Vec<String>, projection: Vec<EntryRef>) {
        self.leaves = leaves;
        self.headers = headers;
        self.projection = projection;
        self.refilter();
    }
}
