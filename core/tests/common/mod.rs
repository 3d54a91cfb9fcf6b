//! Shared fixtures for controller integration tests.

#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use imecontrol_core::{EngineBoundary, FamilyMember, SchemaConfig, SchemaDescriptor, VariantDescriptor};
use std::sync::Mutex;

/// One outbound engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetOption(String, bool),
    SetIme(String),
}

pub fn opt(id: &str, value: bool) -> Call {
    Call::SetOption(id.to_string(), value)
}

pub fn ime(id: &str) -> Call {
    Call::SetIme(id.to_string())
}

/// Engine fake that records every call and can reject a chosen one.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    reject: Mutex<Option<Call>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every future call equal to `call`.
    pub fn reject(&self, call: Call) {
        *self.reject.lock().unwrap() = Some(call);
    }

    pub fn accept_all(&self) {
        *self.reject.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.reject.lock().unwrap().as_ref() == Some(&call) {
            bail!("engine rejected {:?}", call);
        }
        Ok(())
    }
}

#[async_trait]
impl EngineBoundary for RecordingEngine {
    async fn set_option(&self, option: &str, value: bool) -> Result<()> {
        self.record(opt(option, value))
    }

    async fn set_ime(&self, schema_id: &str) -> Result<()> {
        self.record(ime(schema_id))
    }
}

pub fn variants(ids: &[&str]) -> Vec<VariantDescriptor> {
    ids.iter()
        .map(|id| VariantDescriptor {
            id: id.to_string(),
            name: format!("name_{}", id),
        })
        .collect()
}

/// A small configuration covering every variant shape:
///
/// - `luna_pinyin`: no variants field (simplified/traditional pair), extended
/// - `cangjie5`: three variants, hides emoji comments, with family member
///   `cangjie3` sharing the list
/// - `jyutping`: empty variant list, grouped with `cangjie5`
/// - `disabled_schema`: disabled
pub fn sample_config() -> SchemaConfig {
    let mut luna = SchemaDescriptor::new("luna_pinyin", "朙月拼音");
    luna.extended = true;

    let mut cangjie = SchemaDescriptor::new("cangjie5", "倉頡五代");
    cangjie.group = Some("形码".into());
    cangjie.hide_comment = Some(imecontrol_core::CommentPolicy::HideEmoji);
    cangjie.variants = Some(variants(&["v0", "v1", "v2"]));
    cangjie.family = vec![FamilyMember {
        id: "cangjie3".into(),
        name: "倉頡三代".into(),
        disabled: false,
        variants: None,
    }];

    let mut jyutping = SchemaDescriptor::new("jyutping", "粤拼");
    jyutping.group = Some("形码".into());
    jyutping.variants = Some(vec![]);

    let mut disabled = SchemaDescriptor::new("disabled_schema", "Disabled");
    disabled.disabled = true;

    SchemaConfig::new(vec![luna, cangjie, jyutping, disabled])
}
