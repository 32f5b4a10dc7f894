use serde::Serialize;

use crate::model::{Property, SemanticTypeId};

/// Descriptor of a standalone data-only block: a single property shown with
/// an icon under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataBlockDesc {
    property: Property,
    icon: String,
    category: String,
}

impl DataBlockDesc {
    pub fn new(property: Property, icon: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            property,
            icon: icon.into(),
            category: category.into(),
        }
    }

    pub fn property(&self) -> &Property {
        &self.property
    }
    pub fn semantics(&self) -> &SemanticTypeId {
        &self.property.semantics
    }
    pub fn name(&self) -> &str {
        &self.property.name
    }
    pub fn icon(&self) -> &str {
        &self.icon
    }
    pub fn category(&self) -> &str {
        &self.category
    }
}
