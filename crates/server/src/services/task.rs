//! Task use cases

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use todo_core::codec::Decoded;
use todo_core::task::{Task, TaskRepository};

use super::{is_zero, ServiceError, ServiceResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateTaskRequest {
    pub title: String,
    pub due_date: String,
    #[serde(rename = "CategoryID")]
    pub category_id: i64,
    #[serde(rename = "AuthenticatedUserID")]
    pub authenticated_user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTaskResponse {
    pub task: Task,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListTasksRequest {
    #[serde(rename = "UserID")]
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTasksResponse {
    pub tasks: Vec<Task>,
    /// Lines of the task file that could not be decoded
    #[serde(default, skip_serializing_if = "is_zero")]
    pub skipped_lines: usize,
}

#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, req: CreateTaskRequest) -> ServiceResult<CreateTaskResponse> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(ServiceError::InvalidInput(
                "can't create new task: title is required".to_string(),
            ));
        }

        let task = Task::new(title)
            .with_due_date(req.due_date)
            .with_category_id(req.category_id)
            .with_user_id(req.authenticated_user_id);

        let task = self
            .repository
            .create_new_task(task)
            .await
            .map_err(ServiceError::repository("can't create new task"))?;

        info!("Created task {} for user {}", task.id, task.user_id);
        Ok(CreateTaskResponse { task })
    }

    pub async fn list(&self, req: ListTasksRequest) -> ServiceResult<ListTasksResponse> {
        let Decoded { records, skipped } = self
            .repository
            .list_user_tasks(req.user_id)
            .await
            .map_err(ServiceError::repository("can't list user tasks"))?;

        if !skipped.is_empty() {
            warn!("Listing tasks for user {} skipped {} lines", req.user_id, skipped.len());
        }
        Ok(ListTasksResponse {
            tasks: records,
            skipped_lines: skipped.len(),
        })
    }
}
