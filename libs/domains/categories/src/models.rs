use axum_helpers::validation::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Category entity, stored in the `categories` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: Option<String>,
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, input: UpdateCategory) {
        if let Some(name) = input.name {
            self.name = name.trim().to_string();
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_name() {
        let category = Category::new(CreateCategory {
            name: "  Electronics ".to_string(),
        });
        assert_eq!(category.name, "Electronics");
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let input = CreateCategory {
            name: "   ".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_serializes_mongo_id_and_camel_case() {
        let category = Category::new(CreateCategory {
            name: "Books".to_string(),
        });
        let value = serde_json::to_value(&category).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("createdAt").is_some());
    }
}
