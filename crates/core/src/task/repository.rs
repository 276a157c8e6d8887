//! Task repository trait
//!
//! Defines the interface the task service depends on.

use async_trait::async_trait;

use super::model::Task;
use crate::codec::Decoded;
use crate::repository::FileRepository;
use crate::Result;

/// Repository interface for task storage
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task; the repository assigns its ID
    async fn create_new_task(&self, task: Task) -> Result<Task>;

    /// Get all tasks owned by `user_id`, in file order, plus the lines
    /// that could not be decoded
    async fn list_user_tasks(&self, user_id: i64) -> Result<Decoded<Task>>;
}

#[async_trait]
impl TaskRepository for FileRepository<Task> {
    async fn create_new_task(&self, task: Task) -> Result<Task> {
        self.create_new(task).await
    }

    async fn list_user_tasks(&self, user_id: i64) -> Result<Decoded<Task>> {
        self.list_by_report(|task| task.user_id == user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Format;
    use tempfile::TempDir;

    fn create_test_repo(format: Format) -> (FileRepository<Task>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRepository::new(temp_dir.path().join("task.txt"), format);
        (repo, temp_dir)
    }

    #[tokio::test]
    async fn test_create_new_task_assigns_sequential_ids() {
        let (repo, _temp) = create_test_repo(Format::Text);

        let first = repo
            .create_new_task(Task::new("First").with_user_id(1))
            .await
            .unwrap();
        let second = repo
            .create_new_task(Task::new("Second").with_user_id(1))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_list_user_tasks_filters_by_owner() {
        let (repo, _temp) = create_test_repo(Format::Text);
        std::fs::write(
            repo.path(),
            "id: 1, title: Test Task 1, dueDate: 2021-12-31, categoryID: 1, isDone: false, userID: 1\n\
             id: 2, title: Test Task 2, dueDate: 2021-12-31, categoryID: 1, isDone: true, userID: 2\n\
             id: 3, title: Test Task 3, dueDate: 2022-01-15, categoryID: 2, isDone: false, userID: 1\n",
        )
        .unwrap();

        let tasks = repo.list_user_tasks(1).await.unwrap();

        assert!(tasks.is_clean());
        assert_eq!(
            tasks.records,
            vec![
                Task::new("Test Task 1")
                    .with_id(1)
                    .with_due_date("2021-12-31")
                    .with_category_id(1)
                    .with_user_id(1),
                Task::new("Test Task 3")
                    .with_id(3)
                    .with_due_date("2022-01-15")
                    .with_category_id(2)
                    .with_user_id(1),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_user_tasks_unknown_user() {
        let (repo, _temp) = create_test_repo(Format::Json);
        repo.create_new_task(Task::new("Mine").with_user_id(1))
            .await
            .unwrap();

        assert!(repo.list_user_tasks(42).await.unwrap().records.is_empty());
    }

    #[tokio::test]
    async fn test_used_through_trait_object() {
        let (repo, _temp) = create_test_repo(Format::Json);
        let repo: Box<dyn TaskRepository> = Box::new(repo);

        let task = repo
            .create_new_task(Task::new("Boxed").with_user_id(5))
            .await
            .unwrap();

        assert_eq!(repo.list_user_tasks(5).await.unwrap().records, vec![task]);
    }
}
