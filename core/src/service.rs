//! Todo operations executed through a transport stack.
//!
//! `TodoService` pairs the sans-IO `TodoClient` with a `Transport`. Pass it
//! the stack from `middleware::authorized` to get bearer auth and the 401
//! policy on every call.

use tracing::debug;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

pub struct TodoService<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoService<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn list(&self) -> Result<Vec<Todo>, ApiError> {
        debug!("fetching todos");
        let response = self.transport.execute(self.client.build_list_todos())?;
        self.client.parse_list_todos(response)
    }

    pub fn get(&self, id: &TodoId) -> Result<Todo, ApiError> {
        debug!(%id, "fetching todo");
        let response = self.transport.execute(self.client.build_get_todo(id))?;
        self.client.parse_get_todo(response)
    }

    pub fn create(&self, input: &CreateTodo) -> Result<Todo, ApiError> {
        debug!(title = %input.title, "adding todo");
        let response = self.transport.execute(self.client.build_create_todo(input)?)?;
        self.client.parse_create_todo(response)
    }

    pub fn update(&self, id: &TodoId, input: &UpdateTodo) -> Result<Todo, ApiError> {
        debug!(%id, "updating todo");
        let response = self.transport.execute(self.client.build_update_todo(id, input)?)?;
        self.client.parse_update_todo(response)
    }

    pub fn delete(&self, id: &TodoId) -> Result<(), ApiError> {
        debug!(%id, "deleting todo");
        let response = self.transport.execute(self.client.build_delete_todo(id))?;
        self.client.parse_delete_todo(response)
    }

    /// Flip `completed`. Two requests: a fetch, then an update of that flag.
    pub fn toggle(&self, id: &TodoId) -> Result<Todo, ApiError> {
        let current = self.get(id)?;
        self.update(
            id,
            &UpdateTodo {
                title: None,
                completed: Some(!current.completed),
            },
        )
    }
}
