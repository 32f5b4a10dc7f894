//! Registry of named built-in shader expressions.
//!
//! A block whose source mentions a built-in by name needs the capability
//! flag attached to it. New built-ins are added by appending entries; flag
//! inference never changes.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::desc::BlockFlags;

/// A named built-in and the capability it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltInExpression {
    pub name: String,
    pub flag: BlockFlags,
}

impl BuiltInExpression {
    pub fn new(name: impl Into<String>, flag: BlockFlags) -> Self {
        Self {
            name: name.into(),
            flag,
        }
    }
}

/// Built-ins every simulation exposes.
///
/// Lazily initialized on first access and read-only afterwards.
pub fn common_built_ins() -> &'static [BuiltInExpression] {
    static BUILT_INS: Lazy<Vec<BuiltInExpression>> = Lazy::new(|| {
        vec![
            BuiltInExpression::new("deltaTime", BlockFlags::NEEDS_DELTA_TIME),
            BuiltInExpression::new("totalTime", BlockFlags::NEEDS_TOTAL_TIME),
        ]
    });
    &BUILT_INS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_built_ins_have_unique_names() {
        let mut seen = std::collections::HashSet::new();
        for built_in in common_built_ins() {
            assert!(!built_in.name.is_empty());
            assert!(seen.insert(&built_in.name), "Duplicate built-in: {}", built_in.name);
        }
    }

    #[test]
    fn time_built_ins_are_registered() {
        let flags = common_built_ins()
            .iter()
            .fold(BlockFlags::empty(), |acc, b| acc | b.flag);
        assert!(flags.contains(BlockFlags::NEEDS_DELTA_TIME | BlockFlags::NEEDS_TOTAL_TIME));
    }
}
