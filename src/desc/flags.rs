//! Capability flags inferred from a block's source text.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::builtin::BuiltInExpression;

bitflags! {
    /// Shader capabilities a block needs from the generated code.
    ///
    /// Bits outside the named set may be contributed by the built-in
    /// registry and are kept as-is.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct BlockFlags: u32 {
        const HAS_RAND = 1 << 0;
        const HAS_KILL = 1 << 1;
        const NEEDS_INVERSE_TRANSFORM = 1 << 2;
        const NEEDS_DELTA_TIME = 1 << 3;
        const NEEDS_TOTAL_TIME = 1 << 4;
    }
}

const KEYWORDS: [(&str, BlockFlags); 3] = [
    ("RAND", BlockFlags::HAS_RAND),
    ("KILL", BlockFlags::HAS_KILL),
    ("INVERSE", BlockFlags::NEEDS_INVERSE_TRANSFORM),
];

/// Scan `src` for keywords and built-in names.
///
/// Plain case-sensitive substring search: `RAND` also matches inside
/// `OPERAND`, and a built-in named `TIME` matches `TOTALTIME`. Downstream code
/// relies on this looser matching, so there is no tokenization here.
pub fn infer_flags(src: &str, built_ins: &[BuiltInExpression]) -> BlockFlags {
    let mut flags = BlockFlags::empty();
    for (keyword, flag) in KEYWORDS {
        if src.contains(keyword) {
            flags |= flag;
        }
    }
    for built_in in built_ins {
        if src.contains(built_in.name.as_str()) {
            flags |= built_in.flag;
        }
    }
    flags
}
