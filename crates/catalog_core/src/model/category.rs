//! Category domain model.
//!
//! # Responsibility
//! - Define the persisted category record returned by reads.
//! - Define the caller-supplied field set used by create/update.
//!
//! # Invariants
//! - `category_id` is assigned by storage on create and never changes.
//! - Only the repository can build a `Category` carrying an id.
//! - `name` and `description` are nullable; `None` is stored as SQL NULL.

use serde::{Deserialize, Serialize};

/// Primary key of a row in `Categories`.
pub type CategoryId = i64;

/// Category record decoded from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    category_id: CategoryId,
    name: Option<String>,
    description: Option<String>,
}

impl Category {
    pub(crate) fn from_parts(
        category_id: CategoryId,
        name: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            category_id,
            name,
            description,
        }
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Copies the editable fields into a draft, e.g. to feed `update`.
    pub fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Editable category fields, without an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryDraft {
    /// Creates a draft with both fields set.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<&Category> for CategoryDraft {
    fn from(value: &Category) -> Self {
        value.to_draft()
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryDraft};

    #[test]
    fn default_draft_has_null_fields() {
        let draft = CategoryDraft::default();
        assert_eq!(draft.name, None);
        assert_eq!(draft.description, None);
    }

    #[test]
    fn builder_sets_only_requested_fields() {
        let draft = CategoryDraft::default().with_name("Bakery");
        assert_eq!(draft.name.as_deref(), Some("Bakery"));
        assert_eq!(draft.description, None);
    }

    #[test]
    fn to_draft_drops_the_id() {
        let category = Category::from_parts(4, Some("Dairy".to_string()), None);
        assert_eq!(
            category.to_draft(),
            CategoryDraft {
                name: Some("Dairy".to_string()),
                description: None,
            }
        );
    }
}
