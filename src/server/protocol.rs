//! Wire types for the line-delimited JSON tool protocol

use crate::error::{OrgendaError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One request per input line
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Value,
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

/// One response per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: Value,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Response {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: impl Into<String>) -> Self {
        Response {
            id,
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoArgs {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListTodosArgs {
    pub status: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddTodoArgs {
    pub title: String,
    pub file: Option<String>,
    pub priority: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
    pub schedule: Option<String>,
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkDoneArgs {
    /// `FILE:LINE`
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetAgendaArgs {
    pub date: Option<String>,
    pub range: Option<String>,
}

/// A validated tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    ListTools,
    ListTodos(ListTodosArgs),
    AddTodo(AddTodoArgs),
    MarkDone(MarkDoneArgs),
    GetAgenda(GetAgendaArgs),
    ListTags,
}

fn arguments<T: DeserializeOwned>(tool: &str, raw: Value) -> Result<T> {
    let raw = if raw.is_null() {
        Value::Object(Default::default())
    } else {
        raw
    };
    serde_json::from_value(raw)
        .map_err(|e| OrgendaError::InvalidArgument(format!("{}: {}", tool, e)))
}

impl ToolCall {
    /// Check the tool name and shape the loose argument object into typed fields.
    pub fn parse(tool: &str, raw: Value) -> Result<Self> {
        let call = match tool {
            "list_tools" => {
                arguments::<NoArgs>(tool, raw)?;
                ToolCall::ListTools
            }
            "list_todos" => ToolCall::ListTodos(arguments(tool, raw)?),
            "add_todo" => ToolCall::AddTodo(arguments(tool, raw)?),
            "mark_done" => ToolCall::MarkDone(arguments(tool, raw)?),
            "get_agenda" => ToolCall::GetAgenda(arguments(tool, raw)?),
            "list_tags" => {
                arguments::<NoArgs>(tool, raw)?;
                ToolCall::ListTags
            }
            _ => {
                return Err(OrgendaError::InvalidArgument(format!(
                    "Unknown tool: {}",
                    tool
                )))
            }
        };
        Ok(call)
    }
}

/// Tool listing entry
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

pub const TOOLS: [ToolInfo; 6] = [
    ToolInfo {
        name: "list_tools",
        description: "List the available tools",
        required: &[],
        optional: &[],
    },
    ToolInfo {
        name: "list_todos",
        description: "List tasks, optionally filtered by status (TODO, WAITING, DONE) and tag",
        required: &[],
        optional: &["status", "tag"],
    },
    ToolInfo {
        name: "add_todo",
        description: "Add a new TODO; dates are YYYY-MM-DD and tags comma-separated",
        required: &["title"],
        optional: &["file", "priority", "tags", "schedule", "deadline"],
    },
    ToolInfo {
        name: "mark_done",
        description: "Mark the task at FILE:LINE as DONE",
        required: &["id"],
        optional: &[],
    },
    ToolInfo {
        name: "get_agenda",
        description: "Dated entries for a day, week or month around a date (default: today)",
        required: &[],
        optional: &["date", "range"],
    },
    ToolInfo {
        name: "list_tags",
        description: "List all tags in use",
        required: &[],
        optional: &[],
    },
];
