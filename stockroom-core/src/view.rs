//! Transient UI state and the wiring between user input, the store, and
//! the filter engine.
//!
//! Every state transition runs to completion on the single control thread
//! before the next begins (`&mut self` everywhere); the only async
//! operation is the remote fetch, which is bracketed by an explicit
//! begin/complete pair so overlapping reloads can be resolved by sequence
//! number instead of last-to-resolve-wins.

use tracing::{debug, warn};

use crate::filter::{build_table, FilterCriteria, TableContent, TableOptions};
use crate::product::{Product, ProductKey};
use crate::source::{FetchError, ProductSource};
use crate::store::ProductStore;

/// Where the remote-backed listing is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Remote-backed view constructed, nothing requested yet.
    Idle,
    /// A fetch is in flight; the renderer shows the loading placeholder.
    Loading,
    /// The store holds a fetched (or construction-time) collection.
    Loaded,
    /// The last fetch failed; the prior collection is still held.
    LoadFailed,
}

/// The transient state a renderer reads back: search text, stock toggle,
/// load phase.
#[derive(Debug, Clone)]
pub struct ViewState {
    criteria: FilterCriteria,
    phase: LoadPhase,
}

impl ViewState {
    pub fn search_text(&self) -> &str {
        &self.criteria.search_text
    }

    pub fn in_stock_only(&self) -> bool {
        self.criteria.in_stock_only
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }
}

/// Yes/no prompt presented before a delete goes through. The listing only
/// cares about the answer; how the question is asked is the collaborator's
/// business.
pub trait DeleteConfirmation {
    fn confirm(&self, product: &Product) -> bool;
}

/// What a renderer draws on each pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot<'a> {
    /// Fetch in flight; show the placeholder instead of the table.
    Loading,
    Table {
        content: &'a TableContent,
        /// Whether rows carry a delete affordance (the admin column).
        allow_delete: bool,
    },
}

/// The filterable product table: store + criteria + cached rows.
///
/// Criteria setters recompute the row sequence immediately (no
/// debouncing); the renderer pulls [`TableView::snapshot`] after any
/// mutation.
#[derive(Debug)]
pub struct TableView {
    store: ProductStore,
    state: ViewState,
    options: TableOptions,
    content: TableContent,
    fetch_seq: u64,
}

impl TableView {
    /// Listing over a collection supplied synchronously at construction.
    /// Considered already loaded; no fetch lifecycle.
    pub fn with_products(products: Vec<Product>, options: TableOptions) -> Self {
        let mut view = Self {
            store: ProductStore::with_products(products),
            state: ViewState {
                criteria: FilterCriteria::default(),
                phase: LoadPhase::Loaded,
            },
            options,
            content: TableContent::NoProducts,
            fetch_seq: 0,
        };
        view.recompute();
        view
    }

    /// Remote-backed listing. Starts idle with an empty store; the first
    /// reload request moves it to `Loading`.
    pub fn remote(options: TableOptions) -> Self {
        Self {
            store: ProductStore::new(),
            state: ViewState {
                criteria: FilterCriteria::default(),
                phase: LoadPhase::Idle,
            },
            options,
            content: TableContent::NoProducts,
            fetch_seq: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn content(&self) -> &TableContent {
        &self.content
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        if self.state.is_loading() {
            Snapshot::Loading
        } else {
            Snapshot::Table {
                content: &self.content,
                allow_delete: self.options.allow_delete,
            }
        }
    }

    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        self.state.criteria.search_text = search_text.into();
        self.recompute();
    }

    pub fn set_in_stock_only(&mut self, in_stock_only: bool) {
        self.state.criteria.in_stock_only = in_stock_only;
        self.recompute();
    }

    /// Delete the product with the given key, gated by the confirmation
    /// collaborator. Returns whether a product was removed. Declining the
    /// confirmation and deleting a missing key are both silent no-ops.
    pub fn delete_product(
        &mut self,
        key: &ProductKey,
        confirmation: &dyn DeleteConfirmation,
    ) -> bool {
        if !self.options.allow_delete {
            debug!(?key, "delete ignored, not enabled for this listing");
            return false;
        }
        let Some(product) = self.store.get(key) else {
            return false;
        };
        if !confirmation.confirm(product) {
            debug!(?key, "delete declined");
            return false;
        }
        let removed = self.store.delete(key);
        if removed {
            self.recompute();
        }
        removed
    }

    /// Fetch a fresh collection from the source, bracketing it with the
    /// `Loading` phase. On failure the previously held collection stays
    /// put and only the phase changes.
    pub async fn reload(&mut self, source: &dyn ProductSource) {
        let seq = self.begin_reload();
        let result = source.fetch_all().await;
        self.complete_reload(seq, result);
    }

    /// Start a reload: enter `Loading` and hand back the sequence number
    /// the eventual completion must present.
    pub fn begin_reload(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.state.phase = LoadPhase::Loading;
        debug!(seq = self.fetch_seq, "reload started");
        self.fetch_seq
    }

    /// Apply a fetch result. Completions carrying a superseded sequence
    /// number are discarded, so of overlapping reloads only the most
    /// recently requested one can land.
    pub fn complete_reload(&mut self, seq: u64, result: Result<Vec<Product>, FetchError>) {
        if seq != self.fetch_seq {
            debug!(seq, current = self.fetch_seq, "stale fetch discarded");
            return;
        }
        match result {
            Ok(products) => {
                self.store.load(products);
                self.state.phase = LoadPhase::Loaded;
                self.recompute();
            }
            Err(error) => {
                warn!(%error, "product fetch failed, keeping prior collection");
                self.state.phase = LoadPhase::LoadFailed;
            }
        }
    }

    fn recompute(&mut self) {
        self.content = build_table(self.store.products(), &self.state.criteria, &self.options);
        debug!(rows = self.content.rows().len(), "rows recomputed");
    }
}
