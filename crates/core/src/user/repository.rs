//! User repository trait

use async_trait::async_trait;

use super::model::User;
use crate::codec::Decoded;
use crate::repository::FileRepository;
use crate::Result;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; the repository assigns its ID
    async fn create_new_user(&self, user: User) -> Result<User>;

    /// Get all users, in file order, plus the lines that could not be decoded
    async fn list_users(&self) -> Result<Decoded<User>>;

    /// Every user whose stored email equals `email`, in file order.
    ///
    /// Emails are not unique, so more than one user may come back.
    async fn list_users_by_email(&self, email: &str) -> Result<Vec<User>>;
}

#[async_trait]
impl UserRepository for FileRepository<User> {
    async fn create_new_user(&self, user: User) -> Result<User> {
        self.create_new(user).await
    }

    async fn list_users(&self) -> Result<Decoded<User>> {
        self.list_report().await
    }

    async fn list_users_by_email(&self, email: &str) -> Result<Vec<User>> {
        self.list_by(|user| user.email == email).await
    }
}
