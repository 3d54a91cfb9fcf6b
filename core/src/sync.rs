//! Folding engine-originated option changes back into local state.
//!
//! The engine reports option changes it made on its own (hotkeys, schema
//! switches, deployment) as batches of ids: `id` means "turned on", `!id`
//! means "turned off". Reconciling only writes local state and never calls
//! back into the engine, so there is no feedback loop.
//!
//! Matching is first-match-wins in a fixed order, and ids this controller
//! does not track are ignored.

use crate::controller::Controller;
use crate::engine::EngineBoundary;
use crate::options::BasicOption;
use crate::registry::Variant;
use tokio::sync::mpsc;
use tracing::debug;

impl<E: EngineBoundary> Controller<E> {
    /// Apply one batch of changed option ids.
    ///
    /// A single id is matched against the named options first (in
    /// [`BasicOption::ALL`] order), then, for a non-deployed schema with
    /// exactly two variants, against the binary variant pair. A longer
    /// batch is an n-ary variant change: the first positive id (in batch
    /// order) that names a variant of the selected schema moves the cursor.
    pub fn sync_options<S: AsRef<str>>(&self, updated: &[S]) {
        let matched = match updated {
            [single] => self.sync_single(single.as_ref()),
            _ => self.sync_variant_group(updated),
        };
        if !matched {
            debug!(
                updates = ?updated.iter().map(AsRef::as_ref).collect::<Vec<_>>(),
                "option update does not concern tracked state"
            );
        }
    }

    fn sync_single(&self, update: &str) -> bool {
        let negated = update.strip_prefix('!');

        for option in BasicOption::ALL {
            if update == option.id() {
                self.state().set_option(option, true);
                return true;
            }
            if negated == Some(option.id()) {
                self.state().set_option(option, false);
                return true;
            }
        }

        if self.state().is_deployed() {
            return false;
        }
        let variants = self.variants();
        if variants.len() != 2 {
            return false;
        }
        let binary_match = |v: &Variant| {
            (v.id == update && v.value) || (negated == Some(v.id.as_str()) && !v.value)
        };
        match variants.iter().position(binary_match) {
            Some(index) => {
                debug!(index, update, "binary variant synced");
                self.set_variant_index(index);
                true
            }
            None => false,
        }
    }

    fn sync_variant_group<S: AsRef<str>>(&self, updated: &[S]) -> bool {
        let variants = self.variants();
        let found = updated
            .iter()
            .map(AsRef::as_ref)
            .filter(|update| !update.starts_with('!'))
            .find_map(|update| variants.iter().position(|v| v.id == update));
        match found {
            Some(index) => {
                debug!(index, "variant synced");
                self.set_variant_index(index);
                true
            }
            None => false,
        }
    }

    /// Consume inbound notification batches until every sender is dropped.
    pub async fn run_sync(&self, mut updates: mpsc::UnboundedReceiver<Vec<String>>) {
        while let Some(batch) = updates.recv().await {
            self.sync_options(&batch);
        }
    }
}
