//! imecontrol-core
//!
//! Front-end state controller for an IME UI. It owns the local view of which
//! schema is active, which variant of that schema is selected and which
//! schema-independent options are on, and keeps that view consistent with an
//! asynchronous engine that has the final say.
//!
//! Public API:
//! - `SchemaConfig` - Schema descriptors loaded from JSON or TOML
//! - `SchemaRegistry` - Menu, variant, extended and comment tables
//! - `SessionState` - Reactive cells observed by the UI
//! - `Controller` - Schema switch, variant and toggle protocols, inbound sync
//! - `EngineBoundary` - Outbound calls to the engine
//! - `BasicOption` - The five named options
//!
//! # Example
//!
//! ```
//! use anyhow::Result;
//! use async_trait::async_trait;
//! use imecontrol_core::{Controller, EngineBoundary, SchemaConfig};
//!
//! struct Engine;
//!
//! #[async_trait]
//! impl EngineBoundary for Engine {
//!     async fn set_option(&self, _option: &str, _value: bool) -> Result<()> {
//!         Ok(())
//!     }
//!     async fn set_ime(&self, _schema_id: &str) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> Result<()> {
//! let config = SchemaConfig::from_json_str(r#"[{ "id": "luna_pinyin", "name": "朙月拼音" }]"#)?;
//! let controller = Controller::from_config(&config, Engine)?;
//! controller.init(None, Some("繁")).await;
//! assert_eq!(controller.state().ime(), "luna_pinyin");
//! assert_eq!(controller.variant_index(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub use config::{CommentPolicy, FamilyMember, SchemaConfig, SchemaDescriptor, VariantDescriptor};

pub mod registry;
pub use registry::{convert_variants, MenuEntry, MenuItem, SchemaRegistry, Variant, SIMPLIFICATION};

pub mod options;
pub use options::BasicOption;

pub mod state;
pub use state::SessionState;

pub mod engine;
pub use engine::EngineBoundary;

pub mod controller;
pub use controller::Controller;

mod sync;
