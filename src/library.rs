//! Registered block descriptors, keyed by id.
//!
//! The library keeps descriptors in registration order and offers the
//! lookups an editor palette and a graph loader need: by id, by category,
//! by compatible stage, by search query, and slot-hash checks for persisted
//! slot data.
//!
//! ```rust
//! use vfx_blockdesc::{BlockLibrary, BlockDescOptions};
//! use vfx_blockdesc::model::BlockType;
//!
//! let mut library = BlockLibrary::new(BlockDescOptions::default());
//! let desc = library.register(&BlockType {
//!     type_identity: "forces::Gravity".into(),
//!     name: "Gravity".into(),
//!     icon: String::new(),
//!     category: "Forces".into(),
//!     description: String::new(),
//!     source: "velocity += gravity * deltaTime;".into(),
//!     properties: vec![],
//!     attributes: vec![],
//!     compatible_contexts: Default::default(),
//! }).unwrap();
//! assert_eq!(desc.function_name(), "Gravity");
//! ```

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::builtin::{BuiltInExpression, common_built_ins};
use crate::desc::{BlockDesc, BlockDescOptions};
use crate::error::{BlockDescError, Result};
use crate::model::{BlockType, ContextType};

/// Descriptors sharing a category, in registration order.
#[derive(Debug, Clone)]
pub struct BlockCategory<'a> {
    pub name: String,
    pub blocks: Vec<&'a BlockDesc>,
}

#[derive(Debug, Clone)]
pub struct BlockLibrary {
    options: BlockDescOptions,
    built_ins: Vec<BuiltInExpression>,
    blocks: IndexMap<String, BlockDesc>,
}

impl BlockLibrary {
    /// Library inferring flags against [`common_built_ins`].
    pub fn new(options: BlockDescOptions) -> Self {
        Self::with_built_ins(options, common_built_ins().to_vec())
    }

    pub fn with_built_ins(options: BlockDescOptions, built_ins: Vec<BuiltInExpression>) -> Self {
        Self {
            options,
            built_ins,
            blocks: IndexMap::new(),
        }
    }

    pub fn options(&self) -> &BlockDescOptions {
        &self.options
    }

    fn describe(&self, block_type: &BlockType) -> BlockDesc {
        BlockDesc::new(block_type, &self.options, &self.built_ins)
    }

    /// Describe and register one block type. A second block with an id already
    /// present is rejected and the first registration is kept.
    pub fn register(&mut self, block_type: &BlockType) -> Result<&BlockDesc> {
        let desc = self.describe(block_type);
        self.insert(desc)
    }

    fn insert(&mut self, desc: BlockDesc) -> Result<&BlockDesc> {
        use indexmap::map::Entry;
        match self.blocks.entry(desc.id().to_string()) {
            Entry::Occupied(entry) => Err(BlockDescError::DuplicateId(entry.key().clone())),
            Entry::Vacant(entry) => Ok(entry.insert(desc)),
        }
    }

    /// Describe many block types in parallel and register them in input
    /// order. Returns the errors of rejected duplicates.
    pub fn extend(&mut self, block_types: &[BlockType]) -> Vec<BlockDescError> {
        let this = &*self;
        let descs: Vec<BlockDesc> = block_types
            .par_iter()
            .map(|block_type| this.describe(block_type))
            .collect();
        descs
            .into_iter()
            .filter_map(|desc| self.insert(desc).err())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&BlockDesc> {
        self.blocks.get(id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockDesc> {
        self.blocks.values()
    }

    /// `Some(true)` if slot data stored under `stored_hash` still matches the
    /// block `id`, `None` if no such block is registered.
    pub fn slot_hash_matches(&self, id: &str, stored_hash: i32) -> Option<bool> {
        self.get(id).map(|desc| desc.slots_compatible(stored_hash))
    }

    /// Blocks that may be placed in `context`.
    pub fn compatible_with(&self, context: ContextType) -> impl Iterator<Item = &BlockDesc> {
        self.iter().filter(move |desc| desc.is_compatible_with(context))
    }

    /// Blocks matching `query`, see [`BlockDesc::matches_query`].
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a BlockDesc> + 'a {
        self.iter().filter(move |desc| desc.matches_query(query))
    }

    /// Blocks grouped by category, categories in first-seen order.
    pub fn by_category(&self) -> Vec<BlockCategory<'_>> {
        let mut cat_map: IndexMap<&str, Vec<&BlockDesc>> = IndexMap::new();
        for desc in self.iter() {
            cat_map.entry(desc.category()).or_default().push(desc);
        }
        cat_map
            .into_iter()
            .map(|(name, blocks)| BlockCategory {
                name: name.to_string(),
                blocks,
            })
            .collect()
    }
}
