use axum::{extract::{rejection::JsonRejection, Path, State}, routing::{get, post}, Router, Json};
use axum::http::StatusCode;

use crate::{
    application::todo_service::TodoService,
    domain::todo::{CreateTodo, Deleted, Todo, TodoId, UpdateTodo},
    http::types::{ApiError, TodoList},
};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", post(create_todo::<S>).get(list_todos::<S>))
        .route(
            "/todos/:id",
            get(get_todo::<S>).put(update_todo::<S>).patch(update_todo::<S>).delete(delete_todo::<S>),
        )
        .route("/todos/:id/toggle", post(toggle_todo::<S>))
        .with_state(state)
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, payload: Result<Json<CreateTodo>, JsonRejection>) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(payload) = payload?;
    let todo = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<TodoList>, ApiError> {
    let items = state.service.list().await?;
    Ok(Json(TodoList { items }))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id: TodoId = id.parse()?;
    Ok(Json(state.service.get(id).await?))
}

async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>, payload: Result<Json<UpdateTodo>, JsonRejection>) -> Result<Json<Todo>, ApiError> {
    let id: TodoId = id.parse()?;
    let Json(payload) = payload?;
    Ok(Json(state.service.update(id, payload).await?))
}

async fn toggle_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id: TodoId = id.parse()?;
    Ok(Json(state.service.toggle(id).await?))
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Deleted>, ApiError> {
    let id: TodoId = id.parse()?;
    Ok(Json(state.service.delete(id).await?))
}
