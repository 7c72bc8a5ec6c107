use std::collections::HashMap;

use thiserror::Error;
use ventabot_core::{Document, Value};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("blank product name")]
    BlankProduct,
    #[error("duplicate product name: {0:?}")]
    DuplicateProduct(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub product: String,
    pub units_sold: u64,
}

/// Product-name to unit-sales mapping, fixed for the process lifetime.
/// Entries keep their insertion order; product names are unique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut seen = Vec::new();
        for (product, units_sold) in entries {
            let product = product.into();
            if product.trim().is_empty() {
                return Err(CatalogError::BlankProduct);
            }
            if seen.iter().any(|entry: &CatalogEntry| entry.product == product) {
                return Err(CatalogError::DuplicateProduct(product));
            }
            seen.push(CatalogEntry {
                product,
                units_sold,
            });
        }
        Ok(Self { entries: seen })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with the fewest units sold. The first such entry wins ties.
    pub fn least_sold(&self) -> Option<&CatalogEntry> {
        let mut best: Option<&CatalogEntry> = None;
        for entry in &self.entries {
            match best {
                Some(current) if entry.units_sold >= current.units_sold => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// Entry with the most units sold. The first such entry wins ties.
    pub fn most_sold(&self) -> Option<&CatalogEntry> {
        let mut best: Option<&CatalogEntry> = None;
        for entry in &self.entries {
            match best {
                Some(current) if entry.units_sold <= current.units_sold => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// One document per entry, in catalog order, ready for indexing.
    pub fn to_documents(&self) -> Vec<Document> {
        self.entries
            .iter()
            .map(|entry| {
                let mut metadata = HashMap::new();
                metadata.insert("product".to_string(), Value::from(entry.product.clone()));
                metadata.insert("units".to_string(), Value::from(entry.units_sold));
                Document {
                    id: entry.product.clone(),
                    content: format!("Product: {}, Sales: {}", entry.product, entry.units_sold),
                    metadata,
                    embedding: None,
                }
            })
            .collect()
    }
}

/// The catalog this bot answers questions about.
pub fn sales_catalog() -> Catalog {
    Catalog {
        entries: vec![
            CatalogEntry {
                product: "Shoes".to_string(),
                units_sold: 120,
            },
            CatalogEntry {
                product: "Shirts".to_string(),
                units_sold: 75,
            },
            CatalogEntry {
                product: "Pants".to_string(),
                units_sold: 50,
            },
            CatalogEntry {
                product: "Hats".to_string(),
                units_sold: 30,
            },
        ],
    }
}
