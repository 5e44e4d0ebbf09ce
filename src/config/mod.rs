//! Configuration loading and management

use crate::core::error::PagingError;
use crate::core::ordering::SortOptions;
use crate::core::paginate::Paginator;
use crate::core::query::PaginationOptions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Complete paging configuration
///
/// # Example
/// ```yaml
/// pagination:
///   max_page_size: 100
///   concurrent_count: false
/// resources:
///   cars:
///     whitelist: [Name, EnginePower, Id]
///     default_sort_by: Id
///     default_descending: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Global pagination bounds; defaults apply when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationOptions>,

    /// Sorting policy per resource (e.g. "cars")
    #[serde(default)]
    pub resources: IndexMap<String, SortOptions>,
}

impl PagingConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, PagingError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PagingError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Pagination bounds in effect
    pub fn pagination(&self) -> PaginationOptions {
        self.pagination.clone().unwrap_or_default()
    }

    /// Sorting policy for a resource, or the default policy if none is configured
    pub fn sort_options(&self, resource: &str) -> SortOptions {
        self.resources.get(resource).cloned().unwrap_or_default()
    }

    /// Paginator for a resource
    pub fn paginator(&self, resource: &str) -> Paginator {
        Paginator::new(self.pagination()).with_sort(self.sort_options(resource))
    }

    /// Merge several configurations
    ///
    /// Later configurations win: a resource defined twice keeps the last
    /// definition, and the last explicit `pagination` block applies.
    pub fn merge(configs: Vec<PagingConfig>) -> Self {
        let mut merged = Self::default();

        for config in configs {
            if config.pagination.is_some() {
                merged.pagination = config.pagination;
            }
            for (resource, options) in config.resources {
                if merged.resources.contains_key(&resource) {
                    tracing::debug!(resource = %resource, "sort options overridden during merge");
                }
                merged.resources.insert(resource, options);
            }
        }

        merged
    }
}
