//! Schema registry: static lookup tables built once from configuration.
//!
//! The registry turns the ordered [`SchemaDescriptor`] list into:
//! - the selection menu (flat entries and label groups, configuration order)
//! - a variant list per schema id (family members included)
//! - the set of extended schemas
//! - the comment policy per schema
//!
//! Disabled schemas and disabled family members are left out of every table.
//! Nothing here talks to the engine, and the tables never change after
//! [`SchemaRegistry::new`] returns.

use crate::config::{CommentPolicy, SchemaDescriptor, VariantDescriptor};
use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Option id shared by the synthesized simplified/traditional pair.
pub const SIMPLIFICATION: &str = "simplification";

/// One selectable variant of a schema.
///
/// `value` is the polarity the variant's option id is set to when the
/// variant is selected. For configured variants it is always `true`; the
/// synthesized traditional entry uses `false` so that choosing it turns
/// `simplification` off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub id: String,
    pub name: String,
    pub value: bool,
}

impl Variant {
    fn new(id: &str, name: &str, value: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            value,
        }
    }
}

/// Derive the variant list for a schema's `variants` field.
///
/// - `None`: a simplified (`true`) / traditional (`false`) pair on [`SIMPLIFICATION`]
/// - `Some([])`: a single placeholder with empty id and name
/// - `Some(list)`: each entry with `value: true`
pub fn convert_variants(variants: Option<&[VariantDescriptor]>) -> Vec<Variant> {
    match variants {
        Some([]) => vec![Variant::new("", "", true)],
        Some(list) => list
            .iter()
            .map(|v| Variant::new(&v.id, &v.name, true))
            .collect(),
        None => vec![
            Variant::new(SIMPLIFICATION, "简", true),
            Variant::new(SIMPLIFICATION, "繁", false),
        ],
    }
}

/// A selectable schema in the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: String,
    pub value: String,
}

/// Top-level menu entry: a schema, or a labelled group of schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MenuEntry {
    Schema(MenuItem),
    Group {
        label: String,
        key: String,
        children: Vec<MenuItem>,
    },
}

impl MenuEntry {
    /// Iterate over every schema item in this entry.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        match self {
            MenuEntry::Schema(item) => std::slice::from_ref(item).iter(),
            MenuEntry::Group { children, .. } => children.iter(),
        }
    }
}

/// Immutable lookup tables derived from the schema configuration.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    /// Registered ids in registration order (parents before their family)
    ids: Vec<String>,
    menu: Vec<MenuEntry>,
    /// Family members without their own variants share the parent's list.
    variants: HashMap<String, Arc<[Variant]>>,
    extended: HashSet<String>,
    comments: HashMap<String, CommentPolicy>,
}

impl SchemaRegistry {
    /// Build the registry from an ordered descriptor list.
    ///
    /// Fails only when no enabled schema is left, because startup selection
    /// needs a first schema to fall back to.
    pub fn new(schemas: &[SchemaDescriptor]) -> Result<Self> {
        let mut registry = Self {
            ids: Vec::new(),
            menu: Vec::new(),
            variants: HashMap::new(),
            extended: HashSet::new(),
            comments: HashMap::new(),
        };

        for schema in schemas.iter().filter(|s| !s.disabled) {
            // an empty label lists the schema flat, like a missing one
            let group = schema.group.as_deref().filter(|g| !g.is_empty());
            registry.register(
                &schema.id,
                &schema.name,
                group,
                schema.extended,
                schema.hide_comment,
            );
            let parent: Arc<[Variant]> = convert_variants(schema.variants.as_deref()).into();
            registry.variants.insert(schema.id.clone(), parent.clone());

            for member in schema.family.iter().filter(|m| !m.disabled) {
                registry.register(
                    &member.id,
                    &member.name,
                    group,
                    schema.extended,
                    schema.hide_comment,
                );
                let list = match member.variants.as_deref() {
                    Some(own) => convert_variants(Some(own)).into(),
                    None => parent.clone(),
                };
                registry.variants.insert(member.id.clone(), list);
            }
        }

        if registry.ids.is_empty() {
            bail!("schema configuration has no enabled schema");
        }
        Ok(registry)
    }

    fn register(
        &mut self,
        id: &str,
        name: &str,
        group: Option<&str>,
        extended: bool,
        hide_comment: Option<CommentPolicy>,
    ) {
        let item = MenuItem {
            label: name.to_string(),
            value: id.to_string(),
        };
        match group {
            Some(group) => {
                let existing = self.menu.iter_mut().find_map(|entry| match entry {
                    MenuEntry::Group {
                        label, children, ..
                    } if label.as_str() == group => Some(children),
                    _ => None,
                });
                match existing {
                    Some(children) => children.push(item),
                    None => self.menu.push(MenuEntry::Group {
                        label: group.to_string(),
                        key: group.to_string(),
                        children: vec![item],
                    }),
                }
            }
            None => self.menu.push(MenuEntry::Schema(item)),
        }

        self.ids.push(id.to_string());
        if extended {
            self.extended.insert(id.to_string());
        }
        if let Some(policy) = hide_comment.filter(|p| p.hides_anything()) {
            self.comments.insert(id.to_string(), policy);
        }
    }

    /// The first enabled schema in configuration order.
    pub fn first_schema_id(&self) -> &str {
        &self.ids[0]
    }

    /// All registered ids, parents followed by their family members.
    pub fn schema_ids(&self) -> &[String] {
        &self.ids
    }

    /// Whether `id` names a registered schema or family member.
    pub fn contains(&self, id: &str) -> bool {
        self.variants.contains_key(id)
    }

    /// The selection menu in configuration order.
    pub fn menu(&self) -> &[MenuEntry] {
        &self.menu
    }

    /// Variant list of a schema, `None` for unregistered ids.
    pub fn variants(&self, id: &str) -> Option<&Arc<[Variant]>> {
        self.variants.get(id)
    }

    pub fn is_extended(&self, id: &str) -> bool {
        self.extended.contains(id)
    }

    /// Comment policy of a schema; [`CommentPolicy::Show`] when unset.
    pub fn comment_policy(&self, id: &str) -> CommentPolicy {
        self.comments.get(id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FamilyMember;

    fn variant(id: &str, name: &str) -> VariantDescriptor {
        VariantDescriptor {
            id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn missing_variants_synthesize_binary_pair() {
        let list = convert_variants(None);
        assert_eq!(
            list,
            vec![
                Variant::new(SIMPLIFICATION, "简", true),
                Variant::new(SIMPLIFICATION, "繁", false),
            ]
        );
    }

    #[test]
    fn empty_variants_yield_placeholder() {
        let list = convert_variants(Some(&[]));
        assert_eq!(list, vec![Variant::new("", "", true)]);
    }

    #[test]
    fn configured_variants_default_to_on() {
        let list = convert_variants(Some(&[variant("x", "y")]));
        assert_eq!(list, vec![Variant::new("x", "y", true)]);
    }

    #[test]
    fn groups_merge_in_configuration_order() {
        let mut a = SchemaDescriptor::new("a", "A");
        a.group = Some("G".into());
        let b = SchemaDescriptor::new("b", "B");
        let mut c = SchemaDescriptor::new("c", "C");
        c.group = Some("G".into());
        let registry = SchemaRegistry::new(&[a, b, c]).unwrap();

        let menu = registry.menu();
        assert_eq!(menu.len(), 2);
        match &menu[0] {
            MenuEntry::Group {
                label,
                key,
                children,
            } => {
                assert_eq!(label, "G");
                assert_eq!(key, "G");
                let values: Vec<_> = children.iter().map(|i| i.value.as_str()).collect();
                assert_eq!(values, vec!["a", "c"]);
            }
            other => panic!("expected group, got {:?}", other),
        }
        assert_eq!(
            menu[1],
            MenuEntry::Schema(MenuItem {
                label: "B".into(),
                value: "b".into()
            })
        );
    }

    #[test]
    fn disabled_entries_are_excluded_everywhere() {
        let mut off = SchemaDescriptor::new("off", "Off");
        off.disabled = true;
        off.extended = true;
        let mut parent = SchemaDescriptor::new("p", "P");
        parent.family = vec![
            FamilyMember {
                id: "m1".into(),
                name: "M1".into(),
                disabled: false,
                variants: None,
            },
            FamilyMember {
                id: "m2".into(),
                name: "M2".into(),
                disabled: true,
                variants: None,
            },
        ];
        let registry = SchemaRegistry::new(&[off, parent]).unwrap();

        assert_eq!(registry.schema_ids(), &["p".to_string(), "m1".to_string()]);
        assert!(!registry.contains("off"));
        assert!(!registry.contains("m2"));
        assert!(!registry.is_extended("off"));
        let values: Vec<_> = registry
            .menu()
            .iter()
            .flat_map(|e| e.items())
            .map(|i| i.value.as_str())
            .collect();
        assert_eq!(values, vec!["p", "m1"]);
        assert_eq!(registry.first_schema_id(), "p");
    }

    #[test]
    fn family_inherits_attributes_and_shares_variants() {
        let mut parent = SchemaDescriptor::new("p", "P");
        parent.group = Some("G".into());
        parent.extended = true;
        parent.hide_comment = Some(CommentPolicy::HideEmoji);
        parent.variants = Some(vec![variant("v1", "One"), variant("v2", "Two")]);
        parent.family = vec![
            FamilyMember {
                id: "shared".into(),
                name: "Shared".into(),
                disabled: false,
                variants: None,
            },
            FamilyMember {
                id: "own".into(),
                name: "Own".into(),
                disabled: false,
                variants: Some(vec![]),
            },
        ];
        let registry = SchemaRegistry::new(&[parent]).unwrap();

        for id in ["p", "shared", "own"] {
            assert!(registry.is_extended(id));
            assert_eq!(registry.comment_policy(id), CommentPolicy::HideEmoji);
        }
        let parent_list = registry.variants("p").unwrap();
        let shared_list = registry.variants("shared").unwrap();
        assert!(Arc::ptr_eq(parent_list, shared_list));
        assert_eq!(registry.variants("own").unwrap().len(), 1);
        assert_eq!(registry.menu().len(), 1);
    }

    #[test]
    fn show_policy_is_not_recorded() {
        let mut a = SchemaDescriptor::new("a", "A");
        a.hide_comment = Some(CommentPolicy::Show);
        let registry = SchemaRegistry::new(&[a]).unwrap();
        assert_eq!(registry.comment_policy("a"), CommentPolicy::Show);
        assert_eq!(registry.comment_policy("unknown"), CommentPolicy::Show);
    }

    #[test]
    fn all_disabled_is_an_error() {
        let mut a = SchemaDescriptor::new("a", "A");
        a.disabled = true;
        assert!(SchemaRegistry::new(&[a]).is_err());
        assert!(SchemaRegistry::new(&[]).is_err());
    }

    #[test]
    fn empty_group_label_lists_schema_flat() {
        let mut a = SchemaDescriptor::new("a", "A");
        a.group = Some(String::new());
        let registry = SchemaRegistry::new(&[a]).unwrap();
        assert_eq!(
            registry.menu(),
            &[MenuEntry::Schema(MenuItem {
                label: "A".into(),
                value: "a".into()
            })]
        );
    }
}
