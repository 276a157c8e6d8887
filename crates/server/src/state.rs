//! Application state

use std::sync::Arc;

use todo_core::category::Category;
use todo_core::task::Task;
use todo_core::user::User;
use todo_core::FileRepository;

use crate::config::ServerConfig;
use crate::services::{CategoryService, TaskService, UserService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    tasks: TaskService,
    categories: CategoryService,
    users: UserService,
}

impl AppState {
    /// Wire file repositories under `config.data_dir`, creating the directory.
    pub async fn new(config: &ServerConfig) -> todo_core::Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let tasks: FileRepository<Task> =
            FileRepository::new(config.task_path(), config.serialization_mode)
                .with_id_strategy(config.id_strategy);
        let categories: FileRepository<Category> =
            FileRepository::new(config.category_path(), config.serialization_mode)
                .with_id_strategy(config.id_strategy);
        let users: FileRepository<User> =
            FileRepository::new(config.user_path(), config.serialization_mode)
                .with_id_strategy(config.id_strategy);

        Ok(Self::from_services(
            TaskService::new(Arc::new(tasks)),
            CategoryService::new(Arc::new(categories)),
            UserService::new(Arc::new(users)),
        ))
    }

    pub fn from_services(
        tasks: TaskService,
        categories: CategoryService,
        users: UserService,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                tasks,
                categories,
                users,
            }),
        }
    }

    pub fn tasks(&self) -> &TaskService {
        &self.inner.tasks
    }

    pub fn categories(&self) -> &CategoryService {
        &self.inner.categories
    }

    pub fn users(&self) -> &UserService {
        &self.inner.users
    }
}
