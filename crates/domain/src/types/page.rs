//! Listing envelope shared by paginated endpoints.

use serde::{Deserialize, Serialize};

/// One page of a `{count, results}` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items on the server, not the page length.
    pub count: usize,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { count: 0, results: Vec::new() }
    }
}
