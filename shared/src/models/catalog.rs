//! Product catalog entry used to attribute line items

use serde::{Deserialize, Serialize};

/// Display and classification data for one product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    /// Category display name
    pub category: String,
    /// Subcategory display name (falls back to category when empty)
    #[serde(default)]
    pub subcategory: String,
}
