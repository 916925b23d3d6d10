//! Client state store: named result slots plus persisted preferences.
//!
//! Slot writes are last-write-wins. Callers that care about stale results take
//! a [`Ticket`] before fetching and commit with it; a commit whose ticket has
//! been superseded by a newer `begin_*` is dropped.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::models::{ChartKind, SearchResults, SearchScope, TitleRecord, TitleSummary};
use crate::preferences::{self, FavoritesSet, Preferences, PreferencesBackend};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Slot<T> {
    Empty,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Slot<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Slot::Ready(v) => Some(v),
            _ => None,
        }
    }

    fn from_result(result: &Result<T, CatalogError>) -> Self
    where
        T: Clone,
    {
        match result {
            Ok(v) => Slot::Ready(v.clone()),
            Err(e) => Slot::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Tracked<T> {
    generation: u64,
    slot: Slot<T>,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            slot: Slot::Empty,
        }
    }
}

impl<T> Tracked<T> {
    fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.slot = Slot::Loading;
        Ticket(self.generation)
    }

    fn commit(&mut self, ticket: Ticket, slot: Slot<T>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.slot = slot;
        true
    }

    fn set(&mut self, slot: Slot<T>) {
        self.generation += 1;
        self.slot = slot;
    }
}

#[derive(Default)]
struct StoreState {
    search_query: String,
    search: Tracked<SearchResults>,
    title: Tracked<TitleRecord>,
    charts: BTreeMap<ChartKind, Tracked<Vec<TitleSummary>>>,
    prefs: Preferences,
}

pub struct Store {
    state: Mutex<StoreState>,
    backend: Arc<dyn PreferencesBackend>,
}

impl Store {
    /// Build a store with preferences restored from `backend`.
    pub fn new(backend: Arc<dyn PreferencesBackend>) -> Self {
        let prefs = preferences::restore(backend.as_ref());
        Self {
            state: Mutex::new(StoreState {
                prefs,
                ..StoreState::default()
            }),
            backend,
        }
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Selected title

    pub fn begin_title(&self) -> Ticket {
        self.state().title.begin()
    }

    pub fn commit_title(&self, ticket: Ticket, slot: Slot<TitleRecord>) -> bool {
        let committed = self.state().title.commit(ticket, slot);
        if !committed {
            debug!("Discarding superseded title result");
        }
        committed
    }

    pub fn set_selected_title(&self, slot: Slot<TitleRecord>) {
        self.state().title.set(slot);
    }

    pub fn selected_title(&self) -> Slot<TitleRecord> {
        self.state().title.slot.clone()
    }

    /// Resolve `id` and write the outcome into the selected-title slot.
    pub async fn load_title(
        &self,
        catalog: &Catalog,
        id: &str,
    ) -> Result<TitleRecord, CatalogError> {
        let ticket = self.begin_title();
        let result = catalog.resolve_title(id).await;
        self.commit_title(ticket, Slot::from_result(&result));
        result
    }

    // Search

    pub fn search_query(&self) -> String {
        self.state().search_query.clone()
    }

    pub fn begin_search(&self, query: &str) -> Ticket {
        let mut state = self.state();
        state.search_query = query.to_string();
        state.search.begin()
    }

    pub fn commit_search(&self, ticket: Ticket, slot: Slot<SearchResults>) -> bool {
        self.state().search.commit(ticket, slot)
    }

    pub fn search_results(&self) -> Slot<SearchResults> {
        self.state().search.slot.clone()
    }

    pub async fn load_search(
        &self,
        catalog: &Catalog,
        query: &str,
        scope: SearchScope,
    ) -> Result<SearchResults, CatalogError> {
        let ticket = self.begin_search(query);
        let result = catalog.search(query, scope).await;
        self.commit_search(ticket, Slot::from_result(&result));
        result
    }

    // Chart lists

    pub fn begin_chart(&self, chart: ChartKind) -> Ticket {
        self.state().charts.entry(chart).or_default().begin()
    }

    pub fn commit_chart(&self, chart: ChartKind, ticket: Ticket, slot: Slot<Vec<TitleSummary>>) -> bool {
        self.state()
            .charts
            .entry(chart)
            .or_default()
            .commit(ticket, slot)
    }

    pub fn chart(&self, chart: ChartKind) -> Slot<Vec<TitleSummary>> {
        self.state()
            .charts
            .get(&chart)
            .map(|t| t.slot.clone())
            .unwrap_or(Slot::Empty)
    }

    pub async fn load_chart(
        &self,
        catalog: &Catalog,
        chart: ChartKind,
    ) -> Result<Vec<TitleSummary>, CatalogError> {
        let ticket = self.begin_chart(chart);
        let result = catalog.resolve_chart_list(chart).await;
        self.commit_chart(chart, ticket, Slot::from_result(&result));
        result
    }

    /// Refresh every chart slot concurrently. A failed list leaves its own
    /// slot `Failed` and does not touch the others.
    pub async fn load_home(&self, catalog: &Catalog) -> BTreeMap<ChartKind, Slot<Vec<TitleSummary>>> {
        let tickets: Vec<(ChartKind, Ticket)> = ChartKind::ALL
            .into_iter()
            .map(|chart| (chart, self.begin_chart(chart)))
            .collect();
        let results = catalog.resolve_charts(&ChartKind::ALL).await;

        let mut slots = BTreeMap::new();
        for ((chart, ticket), (_, result)) in tickets.into_iter().zip(results) {
            if let Err(e) = &result {
                warn!(%chart, "Chart list failed: {}", e);
            }
            let slot = Slot::from_result(&result);
            self.commit_chart(chart, ticket, slot.clone());
            slots.insert(chart, slot);
        }
        slots
    }

    // Preferences

    pub fn preferences(&self) -> Preferences {
        self.state().prefs.clone()
    }

    pub fn favorites(&self) -> FavoritesSet {
        self.state().prefs.favorites.clone()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state().prefs.favorites.contains(id)
    }

    /// Returns whether the set changed. The in-memory set is updated even if
    /// persisting fails.
    pub fn add_favorite(&self, id: &str) -> Result<bool> {
        self.mutate_prefs(|prefs| prefs.favorites.add(id))
    }

    pub fn remove_favorite(&self, id: &str) -> Result<bool> {
        self.mutate_prefs(|prefs| prefs.favorites.remove(id))
    }

    pub fn dark_mode(&self) -> bool {
        self.state().prefs.dark_mode
    }

    /// Returns the new flag value.
    pub fn toggle_dark_mode(&self) -> Result<bool> {
        let mut dark_mode = false;
        self.mutate_prefs(|prefs| {
            prefs.dark_mode = !prefs.dark_mode;
            dark_mode = prefs.dark_mode;
            true
        })?;
        Ok(dark_mode)
    }

    /// The backend save runs synchronously under the state lock, on the
    /// caller's thread. A save is one small file write plus a rename.
    fn mutate_prefs(&self, change: impl FnOnce(&mut Preferences) -> bool) -> Result<bool> {
        let mut state = self.state();
        let changed = change(&mut state.prefs);
        if changed {
            // Saved under the lock so concurrent writers persist in order.
            if let Err(e) = self.backend.save(&state.prefs) {
                warn!("Failed to persist preferences: {:#}", e);
                return Err(e);
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryBackend;

    fn store() -> (Store, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        (Store::new(backend.clone()), backend)
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let (store, _) = store();
        let old = store.begin_title();
        let new = store.begin_title();
        assert!(store.commit_title(new, Slot::Failed("newer".to_string())));
        assert!(!store.commit_title(old, Slot::Failed("stale".to_string())));
        assert_eq!(store.selected_title(), Slot::Failed("newer".to_string()));
    }

    #[test]
    fn plain_set_is_last_write_wins() {
        let (store, _) = store();
        store.set_selected_title(Slot::Failed("first".to_string()));
        store.set_selected_title(Slot::Empty);
        assert_eq!(store.selected_title(), Slot::Empty);
    }

    #[test]
    fn favorites_flush_on_every_change_only() {
        let (store, backend) = store();
        assert!(store.add_favorite("27205").unwrap());
        let first = backend.raw().expect("flushed");
        assert!(!store.add_favorite("27205").unwrap());
        assert_eq!(backend.raw().unwrap(), first);
        assert!(!store.remove_favorite("1399").unwrap());
        assert!(store.is_favorite("27205"));
        assert!(store.remove_favorite("27205").unwrap());
        assert!(!store.is_favorite("27205"));
    }

    #[test]
    fn preferences_survive_a_restart() {
        let (store, backend) = store();
        store.add_favorite("27205").unwrap();
        store.add_favorite("1399").unwrap();
        assert!(store.toggle_dark_mode().unwrap());
        let before = store.preferences();

        let reopened = Store::new(backend);
        assert_eq!(reopened.preferences(), before);
        assert!(reopened.dark_mode());
    }

    #[test]
    fn concurrent_toggles_each_see_their_own_flip() {
        let (store, _) = store();
        let results: Vec<bool> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| store.toggle_dark_mode().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results.iter().filter(|on| **on).count(), 4);
        assert!(!store.dark_mode());
    }

    #[test]
    fn untouched_chart_slot_is_empty() {
        let (store, _) = store();
        assert_eq!(store.chart(ChartKind::Upcoming), Slot::Empty);
        store.begin_chart(ChartKind::Upcoming);
        assert_eq!(store.chart(ChartKind::Upcoming), Slot::Loading);
    }
}
