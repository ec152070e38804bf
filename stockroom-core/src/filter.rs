//! The filter engine: turns a product collection plus the current search
//! criteria into the ordered row sequence a renderer draws.
//!
//! Single pass over the source collection, tracking the current category
//! run. A category header is emitted tentatively when a new run starts and
//! popped again if no product row survived the filter before the run
//! closed - an empty category run never reaches the output.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Transient search criteria, owned by the view state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring to look for in product names.
    /// Empty matches everything.
    pub search_text: String,
    /// When set, only stocked products survive.
    pub in_stock_only: bool,
}

impl FilterCriteria {
    pub fn new(search_text: impl Into<String>, in_stock_only: bool) -> Self {
        Self {
            search_text: search_text.into(),
            in_stock_only,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        if self.in_stock_only && !product.stocked {
            return false;
        }
        self.search_text.is_empty()
            || find_ignore_case(&product.name, &self.search_text).is_some()
    }
}

/// Feature flags distinguishing the listing variants. One engine, one
/// store; the variants differ only in what they switch on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Wrap the first search-text occurrence in each surviving name in a
    /// highlight span.
    pub highlight_matches: bool,
    /// Expose the delete action (and, renderer-side, the admin column
    /// that carries it).
    pub allow_delete: bool,
}

/// Three-part decomposition of a product name around the first
/// case-insensitive occurrence of the search text. Original casing is
/// preserved in all pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub prefix: String,
    pub matched: String,
    pub suffix: String,
}

/// One output row. Produced fresh on every evaluation, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Row {
    CategoryHeader {
        category: String,
    },
    Product {
        product: Product,
        highlight: Option<HighlightSpan>,
    },
}

impl Row {
    fn header(category: &str) -> Self {
        Row::CategoryHeader {
            category: category.to_string(),
        }
    }
}

/// What the renderer receives. An empty *source* collection is a
/// distinguished state ("no products yet"), not merely an empty row list:
/// a non-empty collection whose every product was filtered out yields
/// `Rows([])` and renders as an empty table body instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableContent {
    NoProducts,
    Rows(Vec<Row>),
}

impl TableContent {
    pub fn rows(&self) -> &[Row] {
        match self {
            TableContent::NoProducts => &[],
            TableContent::Rows(rows) => rows,
        }
    }
}

/// Build the ordered row sequence for the given collection and criteria.
///
/// Pure and deterministic: same inputs always yield the same output. The
/// collection must already be grouped contiguously by category; the engine
/// does not sort.
pub fn build_table(
    products: &[Product],
    criteria: &FilterCriteria,
    options: &TableOptions,
) -> TableContent {
    if products.is_empty() {
        return TableContent::NoProducts;
    }

    let mut rows: Vec<Row> = Vec::new();
    let mut current_category: Option<&str> = None;
    let mut rows_in_run = 0usize;

    for product in products {
        if current_category != Some(product.category.as_str()) {
            // Close the previous run; its header only stays if at least
            // one product row survived.
            if current_category.is_some() && rows_in_run == 0 {
                rows.pop();
            }
            rows.push(Row::header(&product.category));
            current_category = Some(product.category.as_str());
            rows_in_run = 0;
        }

        if !criteria.matches(product) {
            continue;
        }

        let highlight = if options.highlight_matches {
            highlight_name(&product.name, &criteria.search_text)
        } else {
            None
        };
        rows.push(Row::Product {
            product: product.clone(),
            highlight,
        });
        rows_in_run += 1;
    }

    // Final run closes under the same empty-run rule.
    if current_category.is_some() && rows_in_run == 0 {
        rows.pop();
    }

    TableContent::Rows(rows)
}

/// Split `name` around the first case-insensitive occurrence of
/// `search_text`. `None` when the search text is empty or absent from the
/// name.
pub fn highlight_name(name: &str, search_text: &str) -> Option<HighlightSpan> {
    if search_text.is_empty() {
        return None;
    }
    let (start, end) = find_ignore_case(name, search_text)?;
    Some(HighlightSpan {
        prefix: name[..start].to_string(),
        matched: name[start..end].to_string(),
        suffix: name[end..].to_string(),
    })
}

/// Byte range of the first case-insensitive occurrence of `needle` in
/// `haystack`. Char-level lowercase folding, so non-ASCII names compare
/// the same way the rest of the engine does.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let folded_needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();

    for (start, _) in haystack.char_indices() {
        let mut consumed = 0usize;
        let mut end = start;
        for ch in haystack[start..].chars() {
            let mut still_matching = true;
            for low in ch.to_lowercase() {
                match folded_needle.get(consumed) {
                    Some(&expected) if expected == low => consumed += 1,
                    // Either a mismatch, or the needle ends mid-way
                    // through this char's lowercase expansion; that would
                    // split a character, so the match fails here.
                    _ => {
                        still_matching = false;
                        break;
                    }
                }
            }
            if !still_matching {
                break;
            }
            end += ch.len_utf8();
            if consumed == folded_needle.len() {
                return Some((start, end));
            }
        }
    }
    None
}
