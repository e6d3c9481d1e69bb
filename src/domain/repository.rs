use async_trait::async_trait;
use super::error::TodoResult;
use super::todo::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Persistence collaborator. Implementations stamp `created_at`/`updated_at`
/// themselves; callers never pass timestamps in.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> TodoResult<()>;
    async fn insert(&self, input: CreateTodo) -> TodoResult<Todo>;
    async fn get(&self, id: TodoId) -> TodoResult<Option<Todo>>;
    /// All rows, newest `created_at` first.
    async fn list(&self) -> TodoResult<Vec<Todo>>;
    /// Applies the patch and bumps `updated_at`. `None` when the id is unknown.
    async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Option<Todo>>;
    /// Flips `completed` and bumps `updated_at`. `None` when the id is unknown.
    async fn toggle(&self, id: TodoId) -> TodoResult<Option<Todo>>;
    /// `false` when no row matched.
    async fn delete(&self, id: TodoId) -> TodoResult<bool>;
}
