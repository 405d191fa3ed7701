//! Domain layer - outline document engine and queries

pub mod agenda_range;
pub mod document;
pub mod entry;
pub mod location;
pub mod mutator;
pub mod navigator;
pub mod query;
pub mod template;
pub mod tokenizer;

pub use agenda_range::AgendaRange;
pub use document::Document;
pub use entry::{Entry, PlanningKeyword, Priority, SourceLocation, TodoState};
pub use mutator::{CaptureTarget, Mutation};
pub use query::{SortKey, TodoFilter};
pub use template::CaptureTemplate;
