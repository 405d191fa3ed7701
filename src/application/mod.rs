//! Application layer - Use cases and orchestration

pub mod add_todo;
pub mod agenda;
pub mod capture;
pub mod complete_todo;
pub mod edit_entry;
pub mod input;
pub mod list_tags;
pub mod list_todos;
pub mod manage_config;

pub use add_todo::{AddTodoOptions, AddTodoService, NewTodo};
pub use agenda::{Agenda, AgendaOptions, AgendaService};
pub use capture::{CaptureOptions, CaptureService};
pub use complete_todo::CompleteTodoService;
pub use edit_entry::{EditEntryService, EntryEdit};
pub use list_tags::ListTagsService;
pub use list_todos::{ListTodosOptions, ListTodosService};
pub use manage_config::{ConfigService, PathChange};
