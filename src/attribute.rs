//! Per-stage attribute access masks.
//!
//! Every simulation stage gets one read bit and one write bit. The helpers
//! below map a stage to its mask and test usage values against it. Passing
//! anything other than a single known stage is an
//! [`BlockDescError::InvalidArgument`].

use bitflags::bitflags;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BlockDescError, Result};
use crate::model::{ContextType, ParticleAttribute};

bitflags! {
    /// How an attribute is accessed, per stage.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct AttributeUsage: u32 {
        const INIT_READ = 1 << 0;
        const INIT_WRITE = 1 << 1;
        const UPDATE_READ = 1 << 2;
        const UPDATE_WRITE = 1 << 3;
        const OUTPUT_READ = 1 << 4;
        const OUTPUT_WRITE = 1 << 5;

        const INIT_READ_WRITE = Self::INIT_READ.bits() | Self::INIT_WRITE.bits();
        const UPDATE_READ_WRITE = Self::UPDATE_READ.bits() | Self::UPDATE_WRITE.bits();
        const OUTPUT_READ_WRITE = Self::OUTPUT_READ.bits() | Self::OUTPUT_WRITE.bits();
    }
}

/// Usage mask of `context`: read-only, or read-write when `rw` is set.
pub fn context_to_usage(context: ContextType, rw: bool) -> Result<AttributeUsage> {
    let (read, read_write) = if context == ContextType::INIT {
        (AttributeUsage::INIT_READ, AttributeUsage::INIT_READ_WRITE)
    } else if context == ContextType::UPDATE {
        (AttributeUsage::UPDATE_READ, AttributeUsage::UPDATE_READ_WRITE)
    } else if context == ContextType::OUTPUT {
        (AttributeUsage::OUTPUT_READ, AttributeUsage::OUTPUT_READ_WRITE)
    } else {
        return Err(BlockDescError::InvalidArgument(context));
    };
    Ok(if rw { read_write } else { read })
}

/// True if `usage` reads or writes the attribute in `context`.
pub fn is_used(usage: AttributeUsage, context: ContextType) -> Result<bool> {
    Ok(usage.intersects(context_to_usage(context, true)?))
}

/// True if `usage` writes the attribute in `context`.
pub fn is_writable(usage: AttributeUsage, context: ContextType) -> Result<bool> {
    let write_only = context_to_usage(context, true)?.difference(context_to_usage(context, false)?);
    Ok(usage.intersects(write_only))
}

/// Merge the usage of `attributes` in `context` into `usages`, keyed by
/// attribute name. First-seen order is kept.
pub fn accumulate_usage(
    usages: &mut IndexMap<String, AttributeUsage>,
    attributes: &[ParticleAttribute],
    context: ContextType,
) -> Result<()> {
    for attribute in attributes {
        let mask = context_to_usage(context, attribute.writable)?;
        *usages.entry(attribute.name.clone()).or_default() |= mask;
    }
    Ok(())
}
