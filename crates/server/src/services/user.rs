//! User use cases

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use todo_core::codec::Decoded;
use todo_core::user::{User, UserRepository};

use super::{is_zero, ServiceError, ServiceResult};
use crate::auth::{hash_password, normalize_email, verify_password};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Carries the stored user with its password cleared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginResponse {
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    /// Lines of the user file that could not be decoded
    #[serde(default, skip_serializing_if = "is_zero")]
    pub skipped_lines: usize,
}

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Register a user. The password is salted and hashed before it is stored.
    ///
    /// Emails are not required to be unique.
    pub async fn create(&self, req: CreateUserRequest) -> ServiceResult<CreateUserResponse> {
        let email = normalize_email(&req.email)
            .ok_or_else(|| ServiceError::InvalidInput("can't create new user: invalid email".to_string()))?;
        if req.password.is_empty() {
            return Err(ServiceError::InvalidInput(
                "can't create new user: password is required".to_string(),
            ));
        }

        let user = User::new(req.name.trim(), email, hash_password(&req.password));
        let user = self
            .repository
            .create_new_user(user)
            .await
            .map_err(ServiceError::repository("can't create new user"))?;

        info!("Created user {}", user.id);
        Ok(CreateUserResponse {
            user: user.without_password(),
        })
    }

    /// First user whose email matches and whose stored hash verifies.
    pub async fn login(&self, req: LoginRequest) -> ServiceResult<LoginResponse> {
        let Some(email) = normalize_email(&req.email) else {
            return Err(ServiceError::InvalidCredentials);
        };

        let candidates = self
            .repository
            .list_users_by_email(&email)
            .await
            .map_err(ServiceError::repository("can't list users"))?;

        let user = candidates
            .iter()
            .find(|user| verify_password(&user.password, &req.password))
            .ok_or(ServiceError::InvalidCredentials)?;

        debug!("User {} logged in", user.id);
        Ok(LoginResponse {
            user: user.without_password(),
        })
    }

    pub async fn list(&self, _req: ListUsersRequest) -> ServiceResult<ListUsersResponse> {
        let Decoded { records, skipped } = self
            .repository
            .list_users()
            .await
            .map_err(ServiceError::repository("can't list users"))?;

        if !skipped.is_empty() {
            warn!("Listing users skipped {} lines", skipped.len());
        }
        Ok(ListUsersResponse {
            users: records.iter().map(User::without_password).collect(),
            skipped_lines: skipped.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MockUserRepository {
        data: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create_new_user(&self, mut user: User) -> todo_core::Result<User> {
            let mut data = self.data.lock().await;
            user.id = data.len() as i64 + 1;
            data.push(user.clone());
            Ok(user)
        }

        async fn list_users(&self) -> todo_core::Result<Decoded<User>> {
            Ok(Decoded {
                records: self.data.lock().await.clone(),
                ..Decoded::default()
            })
        }

        async fn list_users_by_email(&self, email: &str) -> todo_core::Result<Vec<User>> {
            let data = self.data.lock().await;
            Ok(data.iter().filter(|u| u.email == email).cloned().collect())
        }
    }

    async fn seeded_service() -> (UserService, Arc<MockUserRepository>) {
        let repo = Arc::new(MockUserRepository::default());
        let service = UserService::new(repo.clone());
        for (name, email, password) in [
            ("Alice", "alice@example.com", "123456"),
            ("Bob", "bob@example.com", "654321"),
            ("Charlie", "charlie@example.com", "abcdef"),
        ] {
            service
                .create(CreateUserRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap();
        }
        (service, repo)
    }

    #[tokio::test]
    async fn test_create() {
        let (service, repo) = seeded_service().await;

        let res = service
            .create(CreateUserRequest {
                name: "David".to_string(),
                email: "david@example.com".to_string(),
                password: "123456".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            res.user,
            User::new("David", "david@example.com", "").with_id(4)
        );

        let stored = repo
            .list_users_by_email("david@example.com")
            .await
            .unwrap()
            .remove(0);
        assert_ne!(stored.password, "123456");
        assert!(verify_password(&stored.password, "123456"));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let (service, _repo) = seeded_service().await;

        let err = service
            .create(CreateUserRequest {
                name: "Eve".to_string(),
                email: "eve".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let (service, _repo) = seeded_service().await;

        let res = service
            .login(LoginRequest {
                email: "Bob@Example.com".to_string(),
                password: "654321".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(res.user, User::new("Bob", "bob@example.com", "").with_id(2));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let (service, _repo) = seeded_service().await;

        let err = service
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "the email or password is not correct");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let (service, _repo) = seeded_service().await;

        let err = service
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "123456".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_checks_every_user_with_the_email() {
        let (service, _repo) = seeded_service().await;
        service
            .create(CreateUserRequest {
                name: "Alice Two".to_string(),
                email: "alice@example.com".to_string(),
                password: "second".to_string(),
            })
            .await
            .unwrap();

        let res = service
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "second".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(res.user.id, 4);
    }

    #[tokio::test]
    async fn test_list_clears_passwords() {
        let (service, _repo) = seeded_service().await;

        let res = service.list(ListUsersRequest::default()).await.unwrap();

        assert_eq!(res.users.len(), 3);
        assert!(res.users.iter().all(|u| u.password.is_empty()));
    }
}
