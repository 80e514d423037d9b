//! Shared list plumbing: sort direction, pagination and case-insensitive search.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::{AppError, Result};

/// Upper bound for `per_page`
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// One page of a filtered list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Everything on one page, for callers that did not ask for pagination
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len();
        Self {
            items,
            total,
            page: 1,
            per_page: total,
            total_pages: usize::from(total > 0),
        }
    }
}

/// Slice `items` into the requested 1-based page.
///
/// Page 0 is treated as page 1. A page past the end yields no items but
/// still reports the full `total`.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Result<Page<T>> {
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(AppError::validation(format!(
            "per_page must be between 1 and {}",
            MAX_PER_PAGE
        )));
    }

    let page = page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page);

    let items = items.into_iter().skip(start).take(per_page).collect();

    Ok(Page {
        items,
        total,
        page,
        per_page,
        total_pages,
    })
}

/// Lowercase substring match; an empty needle matches everything
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
