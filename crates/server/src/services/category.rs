//! Category use cases

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use todo_core::category::{Category, CategoryRepository};
use todo_core::codec::Decoded;

use super::{is_zero, ServiceError, ServiceResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateCategoryRequest {
    pub title: String,
    pub color: String,
    #[serde(rename = "AuthenticatedUserID")]
    pub authenticated_user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCategoryResponse {
    pub category: Category,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListCategoriesRequest {
    #[serde(rename = "UserID")]
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCategoriesResponse {
    pub categories: Vec<Category>,
    /// Lines of the category file that could not be decoded
    #[serde(default, skip_serializing_if = "is_zero")]
    pub skipped_lines: usize,
}

#[derive(Clone)]
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        req: CreateCategoryRequest,
    ) -> ServiceResult<CreateCategoryResponse> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(ServiceError::InvalidInput(
                "can't create new category: title is required".to_string(),
            ));
        }

        let category = self
            .repository
            .create_new_category(Category::new(title, req.color, req.authenticated_user_id))
            .await
            .map_err(ServiceError::repository("can't create new category"))?;

        info!("Created category {} for user {}", category.id, category.user_id);
        Ok(CreateCategoryResponse { category })
    }

    pub async fn list(
        &self,
        req: ListCategoriesRequest,
    ) -> ServiceResult<ListCategoriesResponse> {
        let Decoded { records, skipped } = self
            .repository
            .list_user_categories(req.user_id)
            .await
            .map_err(ServiceError::repository("can't list user categories"))?;

        if !skipped.is_empty() {
            warn!("Listing categories for user {} skipped {} lines", req.user_id, skipped.len());
        }
        Ok(ListCategoriesResponse {
            categories: records,
            skipped_lines: skipped.len(),
        })
    }
}
