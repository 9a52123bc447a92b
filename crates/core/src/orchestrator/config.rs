//! Orchestrator configuration.

use serde::{Deserialize, Serialize};

use crate::place::Category;

/// Which categories a location search covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Categories fetched, in order, by a location search.
    /// Each gets a durable artifact named `<category>.json`.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Search term used when an on-demand fetch names no amenity.
    #[serde(default = "default_category")]
    pub default_category: String,
}

fn default_categories() -> Vec<String> {
    vec![Category::RESTAURANT.to_string(), Category::HOTEL.to_string()]
}

fn default_category() -> String {
    Category::RESTAURANT.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            default_category: default_category(),
        }
    }
}

impl SearchConfig {
    /// Location search categories. Blank entries are skipped.
    pub fn categories(&self) -> Vec<Category> {
        self.categories
            .iter()
            .filter_map(|c| Category::new(c).ok())
            .collect()
    }

    /// Fallback category for on-demand fetches.
    pub fn default_category(&self) -> Category {
        Category::new(&self.default_category).unwrap_or_else(|_| Category::restaurant())
    }

    /// Whether `category` comes from this config rather than client input.
    pub fn is_configured(&self, category: &Category) -> bool {
        *category == self.default_category() || self.categories().contains(category)
    }
}
