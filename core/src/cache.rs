//! The client's in-memory mirror of the remote collection.
//!
//! Only server-returned representations ever enter the cache. Order is the
//! server's list order, with newly created records pushed to the front.

use crate::types::{RecordFields, Todo, TodoId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoCache {
    todos: Vec<Todo>,
}

impl TodoCache {
    pub fn new(todos: Vec<Todo>) -> Self {
        Self { todos }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    pub fn prepend(&mut self, todo: Todo) {
        self.todos.insert(0, todo);
    }

    /// Merge `fields` over the cached record in place. Returns `Ok(false)`
    /// if no record has that id.
    pub fn merge(&mut self, id: TodoId, fields: RecordFields) -> Result<bool, serde_json::Error> {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.merge_fields(fields)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop every record with `id`; returns how many were removed.
    pub fn remove(&mut self, id: TodoId) -> usize {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        before - self.todos.len()
    }
}
