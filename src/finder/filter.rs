//! File filtering functionality
//!
//! This module provides the filter predicates a `Finder` accumulates before a
//! scan: inode numbers, exact base names, size comparisons and hard-link
//! counts. Every non-empty filter narrows the result set; an entry must pass
//! all of them to be reported.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};

/// Comparison mode for a size filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    /// File size strictly less than the threshold
    Less,
    /// File size strictly greater than the threshold
    Greater,
    /// File size equal to the threshold
    Equal,
}

/// A single size predicate: threshold plus comparison mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFilter {
    threshold: u64,
    cmp: Cmp,
}

impl SizeFilter {
    /// Create a new SizeFilter with the given threshold and comparison mode
    pub fn new(threshold: u64, cmp: Cmp) -> Self {
        Self { threshold, cmp }
    }

    /// Check whether a file of `size` bytes satisfies this predicate
    pub fn matches(&self, size: u64) -> bool {
        match self.cmp {
            Cmp::Less => size < self.threshold,
            Cmp::Greater => size > self.threshold,
            Cmp::Equal => size == self.threshold,
        }
    }
}

/// The accumulated filter registry for one scan.
///
/// Mutated only through the registration methods before traversal begins and
/// read-only afterwards. Set-typed filters deduplicate; size filters form an
/// AND-composed sequence so that `+100 -1000` expresses a range.
#[derive(Debug, Default)]
pub(crate) struct FilterSet {
    inums: HashSet<u64>,
    names: HashSet<OsString>,
    sizes: Vec<SizeFilter>,
    nlinks: HashSet<u64>,
}

impl FilterSet {
    pub fn add_inum(&mut self, inum: u64) {
        self.inums.insert(inum);
    }

    pub fn add_name(&mut self, name: OsString) {
        self.names.insert(name);
    }

    pub fn add_size(&mut self, filter: SizeFilter) {
        self.sizes.push(filter);
    }

    pub fn add_nlinks(&mut self, nlinks: u64) {
        self.nlinks.insert(nlinks);
    }

    /// Empty inode filter matches everything
    pub fn accepts_inum(&self, inum: u64) -> bool {
        self.inums.is_empty() || self.inums.contains(&inum)
    }

    /// Exact match on the base name only, not the full path
    pub fn accepts_name(&self, name: &OsStr) -> bool {
        self.names.is_empty() || self.names.contains(name)
    }

    /// Whether evaluating this registry requires a metadata query at all
    pub fn needs_metadata(&self) -> bool {
        !self.sizes.is_empty() || !self.nlinks.is_empty()
    }

    /// Evaluate the metadata-dependent filters: all size predicates must hold
    /// and the link count must be a member of the nlinks set
    pub fn accepts_metadata(&self, size: u64, nlinks: u64) -> bool {
        self.sizes.iter().all(|filter| filter.matches(size))
            && (self.nlinks.is_empty() || self.nlinks.contains(&nlinks))
    }
}
