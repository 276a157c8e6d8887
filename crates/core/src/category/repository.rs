use async_trait::async_trait;

use super::model::Category;
use crate::codec::Decoded;
use crate::repository::FileRepository;
use crate::Result;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a new category; the repository assigns its ID
    async fn create_new_category(&self, category: Category) -> Result<Category>;

    async fn list_user_categories(&self, user_id: i64) -> Result<Decoded<Category>>;
}

#[async_trait]
impl CategoryRepository for FileRepository<Category> {
    async fn create_new_category(&self, category: Category) -> Result<Category> {
        self.create_new(category).await
    }

    async fn list_user_categories(&self, user_id: i64) -> Result<Decoded<Category>> {
        self.list_by_report(|category| category.user_id == user_id).await
    }
}
