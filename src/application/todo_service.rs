use crate::domain::error::{TodoError, TodoResult};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Deleted, Todo, TodoId, UpdateTodo};
use async_trait::async_trait;
use tracing::instrument;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> TodoResult<Todo>;
    async fn get(&self, id: TodoId) -> TodoResult<Todo>;
    async fn list(&self) -> TodoResult<Vec<Todo>>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Todo>;
    async fn toggle(&self, id: TodoId) -> TodoResult<Todo>;
    async fn delete(&self, id: TodoId) -> TodoResult<Deleted>;
}

/// Validates input, turns missing rows into `NotFound`, and hands
/// everything else to the repository untouched.
#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

fn log_store_failure(op: &'static str) -> impl Fn(&TodoError) {
    move |e| {
        if let TodoError::Store(err) = e {
            tracing::error!(error = %err, op, "todo store failure");
        }
    }
}

fn found(id: TodoId, todo: Option<Todo>) -> TodoResult<Todo> {
    todo.ok_or_else(|| {
        tracing::warn!(%id, "todo not found");
        TodoError::NotFound { id }
    })
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateTodo) -> TodoResult<Todo> {
        let input = input.validate()?;
        let todo = self.repo.insert(input).await.inspect_err(log_store_failure("create"))?;
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: TodoId) -> TodoResult<Todo> {
        let todo = self.repo.get(id).await.inspect_err(log_store_failure("get"))?;
        found(id, todo)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> TodoResult<Vec<Todo>> {
        self.repo.list().await.inspect_err(log_store_failure("list"))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Todo> {
        input.validate()?;
        let todo = self.repo.update(id, input).await.inspect_err(log_store_failure("update"))?;
        let todo = found(id, todo)?;
        tracing::info!(%id, "todo updated");
        Ok(todo)
    }

    #[instrument(skip(self))]
    async fn toggle(&self, id: TodoId) -> TodoResult<Todo> {
        let todo = self.repo.toggle(id).await.inspect_err(log_store_failure("toggle"))?;
        let todo = found(id, todo)?;
        tracing::info!(%id, completed = todo.completed, "todo toggled");
        Ok(todo)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: TodoId) -> TodoResult<Deleted> {
        let removed = self.repo.delete(id).await.inspect_err(log_store_failure("delete"))?;
        if !removed {
            tracing::warn!(%id, "todo not found");
            return Err(TodoError::NotFound { id });
        }
        tracing::info!(%id, "todo deleted");
        Ok(Deleted { success: true })
    }
}
