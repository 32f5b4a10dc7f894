use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Simulation stages
// ────────────────────────────────────────────────────────────────────────────

bitflags! {
    /// Set of simulation stages (contexts) a block can be placed in.
    ///
    /// A value holding exactly one bit names a single stage. Any other value is
    /// a set of stages, as used by [`BlockType::compatible_contexts`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ContextType: u32 {
        const INIT = 1 << 0;
        const UPDATE = 1 << 1;
        const OUTPUT = 1 << 2;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Properties
// ────────────────────────────────────────────────────────────────────────────

/// Stable identifier of a property's semantic type (e.g. `"float3"`,
/// `"position"`, `"color"`). Only the identifier takes part in slot hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemanticTypeId(pub String);

impl SemanticTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SemanticTypeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A named, typed input slot of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub semantics: SemanticTypeId,
}

impl Property {
    pub fn new(name: impl Into<String>, semantics: impl Into<SemanticTypeId>) -> Self {
        Self {
            name: name.into(),
            semantics: semantics.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Particle attributes
// ────────────────────────────────────────────────────────────────────────────

/// Value type stored in a particle attribute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Float,
    Float2,
    Float3,
    Float4,
    Int,
    Uint,
    Texture2d,
    Texture3d,
    Transform,
    Curve,
    ColorGradient,
    Mesh,
    Spline,
}

/// A per-particle field a block reads, and possibly writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub writable: bool,
}

impl ParticleAttribute {
    pub fn new(name: impl Into<String>, value_type: ValueType, writable: bool) -> Self {
        Self {
            name: name.into(),
            value_type,
            writable,
        }
    }

    /// Same attribute with different access rights.
    pub fn with_writable(&self, writable: bool) -> Self {
        Self {
            name: self.name.clone(),
            value_type: self.value_type,
            writable,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block type record
// ────────────────────────────────────────────────────────────────────────────

/// Fully resolved description of a block implementation, as supplied by the
/// registration layer. [`crate::BlockDesc`] is derived from it.
///
/// `type_identity` is the fully-qualified type path, with `::` or `.`
/// separating namespace segments (e.g. `particles::init::SetLifetime`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockType {
    pub type_identity: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub source: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub attributes: Vec<ParticleAttribute>,
    #[serde(default = "all_contexts")]
    pub compatible_contexts: ContextType,
}

fn all_contexts() -> ContextType {
    ContextType::all()
}

impl BlockType {
    /// Build the record for a type that describes itself via [`BlockTypeInfo`].
    pub fn of<T: BlockTypeInfo>() -> Self {
        Self {
            type_identity: T::type_identity(),
            name: T::NAME.to_string(),
            icon: T::ICON.to_string(),
            category: T::CATEGORY.to_string(),
            description: T::DESCRIPTION.to_string(),
            source: T::SOURCE.to_string(),
            properties: T::properties(),
            attributes: T::attributes(),
            compatible_contexts: T::COMPATIBLE_CONTEXTS,
        }
    }
}

/// Static description of a block implemented as a Rust type.
///
/// The type identity defaults to [`std::any::type_name`], so two blocks with
/// the same short name in different modules stay distinct.
///
/// ```rust
/// use vfx_blockdesc::model::{BlockType, BlockTypeInfo, ParticleAttribute, ValueType};
///
/// struct SetLifetime;
///
/// impl BlockTypeInfo for SetLifetime {
///     const NAME: &'static str = "Set Lifetime";
///     const SOURCE: &'static str = "lifetime = 1.0;";
///     fn attributes() -> Vec<ParticleAttribute> {
///         vec![ParticleAttribute::new("lifetime", ValueType::Float, true)]
///     }
/// }
///
/// let record = BlockType::of::<SetLifetime>();
/// assert!(record.type_identity.ends_with("SetLifetime"));
/// ```
pub trait BlockTypeInfo: 'static {
    const NAME: &'static str;
    const ICON: &'static str = "";
    const CATEGORY: &'static str = "";
    const DESCRIPTION: &'static str = "";
    const SOURCE: &'static str;
    const COMPATIBLE_CONTEXTS: ContextType = ContextType::all();

    fn properties() -> Vec<Property> {
        Vec::new()
    }

    fn attributes() -> Vec<ParticleAttribute> {
        Vec::new()
    }

    fn type_identity() -> String {
        std::any::type_name::<Self>().to_string()
    }
}
