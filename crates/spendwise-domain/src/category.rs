//! Spending categories. Default categories are immutable in the CRUD layer but
//! aggregate exactly like custom ones.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

const FALLBACK_COLOR: &str = "#6B7280";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "Category::default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: Self::default_color(),
            description: None,
            is_default: false,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName {
                entity: "category",
                id: self.id,
            });
        }
        if !is_hex_color(&self.color) {
            return Err(ModelError::InvalidColor {
                category_id: self.id,
                value: self.color.clone(),
            });
        }
        Ok(())
    }

    pub fn default_color() -> String {
        FALLBACK_COLOR.into()
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
        }
        None => false,
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}
