//! Particle-simulation block descriptors.
//!
//! This crate turns a [`model::BlockType`] record into an immutable
//! [`BlockDesc`]: shader function name, normalized source template,
//! capability flags inferred from that source, and a structural slot hash
//! over the block's property types.
//!
//! The binary `vfx-blockdesc` loads JSON block manifests and prints the
//! resulting descriptors.

pub mod attribute;
pub mod builtin;
pub mod desc;
pub mod error;
pub mod library;
pub mod loader;
pub mod model;

pub use attribute::{AttributeUsage, context_to_usage, is_used, is_writable};
pub use builtin::{BuiltInExpression, common_built_ins};
pub use desc::{BlockDesc, BlockDescOptions, BlockFlags, DataBlockDesc};
pub use error::BlockDescError;
pub use library::{BlockCategory, BlockLibrary};
