//! Reactive session state.
//!
//! `SessionState` is the single mutable aggregate of the controller. It is
//! created from the registry when the UI session starts, written only by the
//! controller's protocols (schema switch, toggles, variant cycling, inbound
//! sync) and dropped with the session.
//!
//! Every field is a `tokio::sync::watch` cell: getters return the current
//! value, `subscribe_*` hands the UI a receiver that is notified on change.

use crate::options::BasicOption;
use crate::registry::{MenuEntry, SchemaRegistry};
use std::collections::HashMap;
use tokio::sync::watch;

#[derive(Debug)]
pub struct SessionState {
    /// Selected schema id
    schema_id: watch::Sender<String>,
    /// Schema confirmed active at the engine; empty while a switch is in flight
    ime: watch::Sender<String>,
    loading: watch::Sender<bool>,
    deployed: watch::Sender<bool>,
    show_variant: watch::Sender<bool>,
    options: [watch::Sender<bool>; 5],
    /// Variant cursor per registered schema id
    cursors: HashMap<String, watch::Sender<usize>>,
    select_options: watch::Sender<Vec<MenuEntry>>,
}

impl SessionState {
    /// Fresh state: first schema selected, loading, variant UI hidden, every
    /// cursor at 0 and every option at its default.
    pub fn new(registry: &SchemaRegistry, deployed: bool) -> Self {
        let cursors = registry
            .schema_ids()
            .iter()
            .map(|id| (id.clone(), watch::Sender::new(0)))
            .collect();
        Self {
            schema_id: watch::Sender::new(registry.first_schema_id().to_string()),
            ime: watch::Sender::new(String::new()),
            loading: watch::Sender::new(true),
            deployed: watch::Sender::new(deployed),
            show_variant: watch::Sender::new(false),
            options: BasicOption::ALL.map(|option| watch::Sender::new(option.default_value())),
            cursors,
            select_options: watch::Sender::new(registry.menu().to_vec()),
        }
    }

    pub fn schema_id(&self) -> String {
        self.schema_id.borrow().clone()
    }

    pub fn subscribe_schema_id(&self) -> watch::Receiver<String> {
        self.schema_id.subscribe()
    }

    pub(crate) fn set_schema_id(&self, id: &str) {
        self.schema_id.send_replace(id.to_string());
    }

    pub fn ime(&self) -> String {
        self.ime.borrow().clone()
    }

    pub fn subscribe_ime(&self) -> watch::Receiver<String> {
        self.ime.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Enter or leave loading. While loading, `ime` is cleared; on leaving
    /// it mirrors the selected schema id.
    pub fn set_loading(&self, value: bool) {
        self.loading.send_replace(value);
        let ime = if value {
            String::new()
        } else {
            self.schema_id()
        };
        self.ime.send_replace(ime);
    }

    pub fn is_deployed(&self) -> bool {
        *self.deployed.borrow()
    }

    pub fn subscribe_deployed(&self) -> watch::Receiver<bool> {
        self.deployed.subscribe()
    }

    /// Mark variant selection as pinned by deployment (or not).
    pub fn set_deployed(&self, value: bool) {
        self.deployed.send_replace(value);
    }

    pub fn show_variant(&self) -> bool {
        *self.show_variant.borrow()
    }

    pub fn subscribe_show_variant(&self) -> watch::Receiver<bool> {
        self.show_variant.subscribe()
    }

    pub(crate) fn set_show_variant(&self, value: bool) {
        self.show_variant.send_replace(value);
    }

    /// Local value of a named option.
    pub fn option(&self, option: BasicOption) -> bool {
        *self.options[option.index()].borrow()
    }

    pub fn subscribe_option(&self, option: BasicOption) -> watch::Receiver<bool> {
        self.options[option.index()].subscribe()
    }

    pub(crate) fn set_option(&self, option: BasicOption, value: bool) {
        self.options[option.index()].send_replace(value);
    }

    /// Variant cursor of `schema_id`, `None` for unregistered ids.
    pub fn variant_index(&self, schema_id: &str) -> Option<usize> {
        self.cursors.get(schema_id).map(|cell| *cell.borrow())
    }

    pub fn subscribe_variant_index(&self, schema_id: &str) -> Option<watch::Receiver<usize>> {
        self.cursors.get(schema_id).map(watch::Sender::subscribe)
    }

    /// Move the cursor of `schema_id`. Unregistered ids are ignored.
    pub(crate) fn set_variant_index(&self, schema_id: &str, index: usize) {
        if let Some(cell) = self.cursors.get(schema_id) {
            cell.send_replace(index);
        }
    }

    /// The schema menu as currently shown by the UI.
    pub fn select_options(&self) -> Vec<MenuEntry> {
        self.select_options.borrow().clone()
    }

    pub fn subscribe_select_options(&self) -> watch::Receiver<Vec<MenuEntry>> {
        self.select_options.subscribe()
    }

    /// Replace the displayed menu (e.g. a filtered view of the registry menu).
    pub fn set_select_options(&self, entries: Vec<MenuEntry>) {
        self.select_options.send_replace(entries);
    }
}
