//! Core of the stockroom product listing: the data model, the in-memory
//! store, the filter/grouping engine, and the view state that ties user
//! input to recomputed rows.
//!
//! Everything here is renderer-agnostic. A renderer consumes
//! [`view::Snapshot`] and calls back into [`view::TableView`]; how the
//! table is drawn is out of scope.

pub mod filter;
pub mod product;
pub mod source;
pub mod store;
pub mod view;

pub use filter::{build_table, FilterCriteria, HighlightSpan, Row, TableContent, TableOptions};
pub use product::{seed_products, Product, ProductKey};
pub use source::{FetchError, ProductSource};
pub use store::ProductStore;
pub use view::{DeleteConfirmation, LoadPhase, Snapshot, TableView, ViewState};
