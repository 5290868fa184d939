//! Published filter chains.

use std::sync::Arc;

use crate::filter::instance::Filter;

/// An initialized filter together with the name it was configured under.
#[derive(Clone)]
pub struct LoadedFilter {
    name: String,
    filter: Arc<dyn Filter>,
}

impl LoadedFilter {
    pub(crate) fn new(name: impl Into<String>, filter: Box<dyn Filter>) -> Self {
        Self {
            name: name.into(),
            filter: Arc::from(filter),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filter(&self) -> &Arc<dyn Filter> {
        &self.filter
    }
}

impl std::fmt::Debug for LoadedFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFilter").field("name", &self.name).finish()
    }
}

/// An ordered, immutable sequence of initialized filters.
///
/// Every entry went through a successful `init`. A chain is never modified
/// after publication; reloads publish a new one.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    generation: u64,
    filters: Vec<LoadedFilter>,
}

impl FilterChain {
    /// The chain active before the first load.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(generation: u64, filters: Vec<LoadedFilter>) -> Self {
        Self {
            generation,
            filters,
        }
    }

    /// Number of the publish that produced this chain. Zero for the initial empty chain.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LoadedFilter> {
        self.filters.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoadedFilter> {
        self.filters.iter()
    }

    /// Configured names in chain order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(LoadedFilter::name).collect()
    }
}

impl<'a> IntoIterator for &'a FilterChain {
    type Item = &'a LoadedFilter;
    type IntoIter = std::slice::Iter<'a, LoadedFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
