//! Block descriptors.
//!
//! [`BlockDesc`] is the immutable record an editor, code generator and graph
//! serializer share for one block implementation. Sub-modules hold the
//! individual derivation steps:
//!
//! - [`naming`] – shader function names from the type identity
//! - [`source`] – source template normalization
//! - [`flags`] – capability flags inferred from the normalized source
//! - [`slot_hash`] – structural hash over property types
//! - [`data_block`] – descriptor for standalone data blocks

pub mod data_block;
pub mod flags;
pub mod naming;
pub mod slot_hash;
pub mod source;

pub use data_block::DataBlockDesc;
pub use flags::{BlockFlags, infer_flags};
pub use naming::function_name;
pub use slot_hash::{compute_slot_hash, string_hash};
pub use source::normalize_source;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeUsage, accumulate_usage};
use crate::builtin::{BuiltInExpression, common_built_ins};
use crate::error::Result;
use crate::model::{BlockType, ContextType, ParticleAttribute, Property};

/// Settings applied when building descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDescOptions {
    /// `false`: short type names, readable but may collide across namespaces.
    /// `true`: fully-qualified names with separators replaced, never collide.
    pub use_collision_safe_names: bool,
}

impl BlockDescOptions {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Immutable descriptor of a block implementation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockDesc {
    id: String,
    function_name: String,
    name: String,
    icon: String,
    category: String,
    description: String,
    properties: Vec<Property>,
    attributes: Vec<ParticleAttribute>,
    source: String,
    flags: BlockFlags,
    slot_hash: i32,
    compatible_contexts: ContextType,
}

impl BlockDesc {
    /// Derive a descriptor from `block_type`, inferring flags against
    /// `built_ins`.
    pub fn new(
        block_type: &BlockType,
        options: &BlockDescOptions,
        built_ins: &[BuiltInExpression],
    ) -> Self {
        let function_name =
            function_name(&block_type.type_identity, options.use_collision_safe_names);
        let source = normalize_source(&block_type.source);
        let flags = infer_flags(&source, built_ins);
        let slot_hash = compute_slot_hash(&block_type.properties);

        Self {
            id: block_type.type_identity.clone(),
            function_name,
            name: block_type.name.clone(),
            icon: block_type.icon.clone(),
            category: block_type.category.clone(),
            description: block_type.description.clone(),
            properties: block_type.properties.clone(),
            attributes: block_type.attributes.clone(),
            source,
            flags,
            slot_hash,
            compatible_contexts: block_type.compatible_contexts,
        }
    }

    /// Descriptor with default options and the [`common_built_ins`] registry.
    pub fn from_block_type(block_type: &BlockType) -> Self {
        Self::new(block_type, &BlockDescOptions::default(), common_built_ins())
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn function_name(&self) -> &str {
        &self.function_name
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn icon(&self) -> &str {
        &self.icon
    }
    pub fn category(&self) -> &str {
        &self.category
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
    pub fn attributes(&self) -> &[ParticleAttribute] {
        &self.attributes
    }
    pub fn source(&self) -> &str {
        &self.source
    }
    pub fn flags(&self) -> BlockFlags {
        self.flags
    }
    pub fn slot_hash(&self) -> i32 {
        self.slot_hash
    }
    pub fn compatible_contexts(&self) -> ContextType {
        self.compatible_contexts
    }

    /// True if every bit of `flags` is set.
    pub fn is_set(&self, flags: BlockFlags) -> bool {
        self.flags.contains(flags)
    }

    /// True if slot data persisted under `stored_hash` can still be loaded.
    pub fn slots_compatible(&self, stored_hash: i32) -> bool {
        self.slot_hash == stored_hash
    }

    /// True if the block may be placed in any of the stages in `context`.
    pub fn is_compatible_with(&self, context: ContextType) -> bool {
        self.compatible_contexts.intersects(context)
    }

    /// Usage mask of each attribute when the block runs in `context`.
    pub fn attribute_usages(&self, context: ContextType) -> Result<IndexMap<String, AttributeUsage>> {
        let mut usages = IndexMap::new();
        accumulate_usage(&mut usages, &self.attributes, context)?;
        Ok(usages)
    }

    /// Case-insensitive substring match on name, category or description.
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.category.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q)
    }
}
