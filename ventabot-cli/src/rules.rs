//! Local shortcut rules answered straight from the catalog, bypassing
//! retrieval. The patterns form a small closed set evaluated in a fixed
//! order; anything else falls through to the chain.

use crate::catalog::Catalog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalRule {
    LeastSales,
    MostSales,
}

/// Matches the case-folded question against the fixed patterns.
pub fn match_rule(question: &str) -> Option<LocalRule> {
    let folded = question.to_lowercase();
    if folded.contains("least sales") {
        Some(LocalRule::LeastSales)
    } else if folded.contains("most sales") || folded.contains("highest sale") {
        Some(LocalRule::MostSales)
    } else {
        None
    }
}

impl LocalRule {
    /// Formats the answer from the catalog extremum. Declines on an empty
    /// catalog, since there is no extremum to report.
    pub fn answer(self, catalog: &Catalog) -> Option<String> {
        match self {
            LocalRule::LeastSales => catalog.least_sold().map(|entry| {
                format!(
                    "The product with the least sales was {}, with {} units sold.",
                    entry.product, entry.units_sold
                )
            }),
            LocalRule::MostSales => catalog.most_sold().map(|entry| {
                format!(
                    "The product with the most sales was {}, with {} units sold.",
                    entry.product, entry.units_sold
                )
            }),
        }
    }
}

/// Answers locally when a pattern matches, `None` otherwise.
pub fn resolve(question: &str, catalog: &Catalog) -> Option<String> {
    match_rule(question).and_then(|rule| rule.answer(catalog))
}
