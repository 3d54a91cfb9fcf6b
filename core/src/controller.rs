//! Schema, variant and option protocols.
//!
//! The `Controller` owns the [`SessionState`] and is the only writer to it.
//! Every operation that talks to the engine is an `async fn` taking `&self`:
//! the UI can keep reading (and subscribing to) the state while a call is
//! suspended at the engine boundary.
//!
//! Error policy differs per operation:
//! - [`Controller::select_ime`] is best effort. Any engine failure is logged
//!   and swallowed, and the UI is always returned to an interactive state.
//! - Toggles and variant operations return the engine error to the caller.
//!   A failed toggle leaves the local value untouched; a failed
//!   [`Controller::set_variant`] stops mid-list.
//!
//! Overlapping calls are not serialized. A second `select_ime` may start
//! while the first is still waiting on the engine, and a toggle may race a
//! switch. Input comes from a single user at a low rate, so no queue is kept.

use crate::config::{CommentPolicy, SchemaConfig};
use crate::engine::EngineBoundary;
use crate::options::BasicOption;
use crate::registry::{SchemaRegistry, Variant};
use crate::state::SessionState;
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct Controller<E> {
    registry: Arc<SchemaRegistry>,
    state: SessionState,
    engine: E,
}

impl<E: EngineBoundary> Controller<E> {
    /// Create a controller with fresh session state.
    pub fn new(registry: Arc<SchemaRegistry>, engine: E, deployed: bool) -> Self {
        let state = SessionState::new(&registry, deployed);
        Self {
            registry,
            state,
            engine,
        }
    }

    /// Build the registry from `config` and create a controller over it.
    pub fn from_config(config: &SchemaConfig, engine: E) -> Result<Self> {
        let registry = SchemaRegistry::new(&config.schemas)?;
        Ok(Self::new(Arc::new(registry), engine, config.deployed))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    // ========== Derived accessors ==========

    /// Variant list of the selected schema (empty if the id is unregistered).
    pub fn variants(&self) -> Arc<[Variant]> {
        self.registry
            .variants(&self.state.schema_id())
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Cursor of the selected schema.
    pub fn variant_index(&self) -> usize {
        self.state
            .variant_index(&self.state.schema_id())
            .unwrap_or(0)
    }

    pub(crate) fn set_variant_index(&self, index: usize) {
        self.state
            .set_variant_index(&self.state.schema_id(), index);
    }

    /// The selected variant of the selected schema.
    pub fn variant(&self) -> Option<Variant> {
        self.variants().get(self.variant_index()).cloned()
    }

    /// Comment policy of the selected schema.
    pub fn hide_comment(&self) -> CommentPolicy {
        self.registry.comment_policy(&self.state.schema_id())
    }

    /// Whether the selected schema belongs to the extended set.
    pub fn is_extended(&self) -> bool {
        self.registry.is_extended(&self.state.schema_id())
    }

    // ========== Startup ==========

    /// Resolve the startup selection and run the first schema switch.
    ///
    /// An unknown or missing `schema_id` falls back to the first configured
    /// schema. The cursor is reset to 0 and then moved to the first variant
    /// whose display name equals `variant_name`, if any.
    pub async fn init(&self, schema_id: Option<&str>, variant_name: Option<&str>) {
        let target = match schema_id {
            Some(id) if self.registry.contains(id) => id.to_string(),
            other => {
                if let Some(id) = other {
                    debug!(schema = id, "unknown startup schema, using first schema");
                }
                self.registry.first_schema_id().to_string()
            }
        };
        self.state.set_schema_id(&target);

        self.set_variant_index(0);
        if let Some(name) = variant_name {
            match self.variants().iter().position(|v| v.name == name) {
                Some(index) => self.set_variant_index(index),
                None => debug!(schema = %target, variant = name, "startup variant not found"),
            }
        }

        self.select_ime(&target).await
    }

    // ========== Schema switch ==========

    /// Switch the engine to `target`.
    ///
    /// Hides the variant UI and enters loading, activates the schema, re-applies
    /// the local variant (unless deployed) and re-asserts the schema-independent
    /// options. ASCII mode is forced off locally, since the engine drops back to
    /// the schema's language on every switch. Loading and variant visibility
    /// are restored whether or not the engine calls succeed.
    pub async fn select_ime(&self, target: &str) {
        self.state.set_show_variant(false);
        self.state.set_loading(true);

        if let Err(err) = self.switch_schema(target).await {
            error!(schema = target, "schema switch failed: {:#}", err);
        }

        self.state.set_show_variant(true);
        self.state.set_loading(false);
    }

    async fn switch_schema(&self, target: &str) -> Result<()> {
        debug!(schema = target, "engine set_ime");
        self.engine
            .set_ime(target)
            .await
            .with_context(|| format!("engine rejected schema {}", target))?;
        self.state.set_schema_id(target);

        if !self.state.is_deployed() {
            self.set_variant().await?;
        }

        for option in BasicOption::ALL {
            if option == BasicOption::AsciiMode {
                self.state.set_option(option, false);
                continue;
            }
            self.push_option(option.id(), self.state.option(option))
                .await?;
        }

        info!(schema = target, "schema switched");
        Ok(())
    }

    // ========== Variants ==========

    /// Push the selected variant of the selected schema to the engine.
    ///
    /// Every other variant id in the list is disabled first, one call at a
    /// time in list order, then the selected id is set to its own polarity.
    /// The first failing call aborts the rest.
    pub async fn set_variant(&self) -> Result<()> {
        let schema_id = self.state.schema_id();
        let variants = self
            .registry
            .variants(&schema_id)
            .cloned()
            .ok_or_else(|| anyhow!("schema {} is not registered", schema_id))?;
        let index = self.state.variant_index(&schema_id).unwrap_or(0);
        let selected = variants
            .get(index)
            .ok_or_else(|| anyhow!("variant index {} out of range for {}", index, schema_id))?;

        for other in variants.iter().filter(|v| v.id != selected.id) {
            self.push_option(&other.id, false).await?;
        }
        self.push_option(&selected.id, selected.value).await
    }

    /// Advance the cursor by one, wrapping at the end of the list, and push
    /// the new selection.
    pub async fn change_variant(&self) -> Result<()> {
        let len = self.variants().len();
        if len > 0 {
            self.set_variant_index((self.variant_index() + 1) % len);
        }
        self.set_variant().await
    }

    // ========== Option toggles ==========

    /// Flip a named option at the engine, then locally.
    ///
    /// The local cell only changes after the engine call resolves; if the
    /// call fails the cell keeps its old value.
    pub async fn toggle(&self, option: BasicOption) -> Result<()> {
        let value = !self.state.option(option);
        self.push_option(option.id(), value).await?;
        self.state.set_option(option, value);
        Ok(())
    }

    pub async fn change_language(&self) -> Result<()> {
        self.toggle(BasicOption::AsciiMode).await
    }

    pub async fn change_width(&self) -> Result<()> {
        self.toggle(BasicOption::FullShape).await
    }

    pub async fn change_charset(&self) -> Result<()> {
        self.toggle(BasicOption::ExtendedCharset).await
    }

    pub async fn change_punctuation(&self) -> Result<()> {
        self.toggle(BasicOption::AsciiPunct).await
    }

    pub async fn change_emoji(&self) -> Result<()> {
        self.toggle(BasicOption::EmojiSuggestion).await
    }

    async fn push_option(&self, option: &str, value: bool) -> Result<()> {
        debug!(option, value, "engine set_option");
        self.engine
            .set_option(option, value)
            .await
            .with_context(|| format!("engine rejected {}={}", option, value))
    }
}
