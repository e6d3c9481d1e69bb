#[cfg(test)]
mod tests {
    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::{error::{TodoError, TodoResult}, repository::TodoRepository, todo::{CreateTodo, Todo, TodoId, UpdateTodo}};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct InMemoryRepo {
        items: Arc<Mutex<BTreeMap<i64, Todo>>>,
        next_id: Arc<Mutex<i64>>,
    }

    #[async_trait]
    impl TodoRepository for InMemoryRepo {
        async fn init(&self) -> TodoResult<()> { Ok(()) }
        async fn insert(&self, input: CreateTodo) -> TodoResult<Todo> {
            let now = Utc::now();
            let id = {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                TodoId(*next)
            };
            let todo = Todo { id, title: input.title, description: input.description, completed: false, created_at: now, updated_at: now };
            self.items.lock().unwrap().insert(id.0, todo.clone());
            Ok(todo)
        }
        async fn get(&self, id: TodoId) -> TodoResult<Option<Todo>> { Ok(self.items.lock().unwrap().get(&id.0).cloned()) }
        async fn list(&self) -> TodoResult<Vec<Todo>> {
            let mut todos: Vec<Todo> = self.items.lock().unwrap().values().cloned().collect();
            todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(todos)
        }
        async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Option<Todo>> {
            let mut map = self.items.lock().unwrap();
            let Some(todo) = map.get_mut(&id.0) else { return Ok(None) };
            input.apply(todo);
            todo.updated_at = Utc::now();
            Ok(Some(todo.clone()))
        }
        async fn toggle(&self, id: TodoId) -> TodoResult<Option<Todo>> {
            let mut map = self.items.lock().unwrap();
            let Some(todo) = map.get_mut(&id.0) else { return Ok(None) };
            todo.completed = !todo.completed;
            todo.updated_at = Utc::now();
            Ok(Some(todo.clone()))
        }
        async fn delete(&self, id: TodoId) -> TodoResult<bool> { Ok(self.items.lock().unwrap().remove(&id.0).is_some()) }
    }

    fn service() -> (InMemoryRepo, TodoServiceImpl<InMemoryRepo>) {
        let repo = InMemoryRepo::default();
        (repo.clone(), TodoServiceImpl::new(repo))
    }

    async fn tick() { tokio::time::sleep(Duration::from_millis(5)).await; }

    #[tokio::test]
    async fn unit_create_and_get() {
        let (_, service) = service();
        let created = service.create(CreateTodo::new("X")).await.unwrap();
        assert_eq!(created.title, "X");
        assert_eq!(created.description, None);
        assert!(!created.completed);
        assert_eq!(created.created_at, created.updated_at);
        let got = service.get(created.id).await.unwrap();
        assert_eq!(got, created);
    }

    #[tokio::test]
    async fn create_rejects_empty_title_without_touching_store() {
        let (repo, service) = service();
        let err = service.create(CreateTodo::new("")).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation { .. }));
        assert!(repo.items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_empty_title() {
        let (_, service) = service();
        let todo = service.create(CreateTodo::new("keep")).await.unwrap();
        let err = service.update(todo.id, UpdateTodo::default().title("")).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation { .. }));
        assert_eq!(service.get(todo.id).await.unwrap().title, "keep");
    }

    #[tokio::test]
    async fn update_with_only_id_bumps_updated_at() {
        let (_, service) = service();
        let todo = service.create(CreateTodo::new("t").with_description("d")).await.unwrap();
        tick().await;
        let updated = service.update(todo.id, UpdateTodo::default()).await.unwrap();
        assert_eq!(updated.title, todo.title);
        assert_eq!(updated.description, todo.description);
        assert_eq!(updated.completed, todo.completed);
        assert_eq!(updated.created_at, todo.created_at);
        assert!(updated.updated_at > todo.updated_at);
    }

    #[tokio::test]
    async fn update_clears_description_on_explicit_null() {
        let (_, service) = service();
        let todo = service.create(CreateTodo::new("t").with_description("d")).await.unwrap();
        let updated = service.update(todo.id, UpdateTodo::default().description(None)).await.unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.title, "t");
    }

    #[tokio::test]
    async fn toggle_twice_restores_completed() {
        let (_, service) = service();
        let todo = service.create(CreateTodo::new("t")).await.unwrap();
        tick().await;
        let once = service.toggle(todo.id).await.unwrap();
        assert!(once.completed);
        assert!(once.updated_at > todo.updated_at);
        tick().await;
        let twice = service.toggle(todo.id).await.unwrap();
        assert!(!twice.completed);
        assert!(twice.updated_at > once.updated_at);
        assert_eq!(twice.created_at, todo.created_at);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let (_, service) = service();
        let id = TodoId(999);
        for err in [
            service.get(id).await.unwrap_err(),
            service.update(id, UpdateTodo::default().title("x")).await.unwrap_err(),
            service.toggle(id).await.unwrap_err(),
            service.delete(id).await.unwrap_err(),
        ] {
            assert!(matches!(err, TodoError::NotFound { id: TodoId(999) }));
            assert_eq!(err.to_string(), "Todo with id 999 not found");
        }
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let (_, service) = service();
        let a = service.create(CreateTodo::new("a")).await.unwrap();
        let b = service.create(CreateTodo::new("b")).await.unwrap();
        assert!(service.delete(a.id).await.unwrap().success);
        let remaining = service.list().await.unwrap();
        assert_eq!(remaining, vec![b]);
    }
}
