//! Tool server: one JSON request per stdin line, one JSON response per stdout line.
//!
//! Per-request failures become error responses and the loop continues; only
//! transport failures on stdin/stdout end the server. EOF ends it normally.

pub mod protocol;

use crate::application::input::{parse_date_arg, parse_priority_arg, parse_status_arg, parse_tags_arg};
use crate::application::{
    AddTodoOptions, AddTodoService, AgendaOptions, AgendaService, CompleteTodoService,
    ListTagsService, ListTodosOptions, ListTodosService, NewTodo,
};
use crate::cli::output::EntryView;
use crate::domain::location::parse_location;
use crate::domain::{AgendaRange, TodoFilter};
use crate::error::{OrgendaError, Result};
use crate::infrastructure::FileSystemRepository;
use anyhow::Context;
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use protocol::{AddTodoArgs, GetAgendaArgs, ListTodosArgs, Request, Response, ToolCall, TOOLS};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

pub struct ToolServer {
    repository: FileSystemRepository,
    today: NaiveDate,
}

impl ToolServer {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self::with_today(repository, Local::now().date_naive())
    }

    /// Server whose default agenda date is fixed
    pub fn with_today(repository: FileSystemRepository, today: NaiveDate) -> Self {
        ToolServer { repository, today }
    }

    /// Handle one raw request line.
    pub fn handle_line(&self, line: &str) -> Response {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("event=tool_request module=server status=malformed error={}", e);
                return Response::failure(Value::Null, format!("Malformed request: {}", e));
            }
        };

        let tool = request.tool.clone();
        let outcome = ToolCall::parse(&request.tool, request.arguments)
            .and_then(|call| self.dispatch(call));

        match outcome {
            Ok(result) => {
                debug!("event=tool_call module=server status=ok tool={}", tool);
                Response::success(request.id, result)
            }
            Err(e) => {
                warn!(
                    "event=tool_call module=server status=error tool={} error={}",
                    tool, e
                );
                Response::failure(request.id, e.to_string())
            }
        }
    }

    fn dispatch(&self, call: ToolCall) -> Result<Value> {
        match call {
            ToolCall::ListTools => Ok(serde_json::to_value(TOOLS)?),
            ToolCall::ListTodos(args) => self.list_todos(args),
            ToolCall::AddTodo(args) => self.add_todo(args),
            ToolCall::MarkDone(args) => {
                let location = parse_location(&args.id)?;
                let entry = CompleteTodoService::new(self.repository.clone()).execute(&location)?;
                Ok(serde_json::to_value(EntryView::new(&entry))?)
            }
            ToolCall::GetAgenda(args) => self.get_agenda(args),
            ToolCall::ListTags => {
                let tags = ListTagsService::new(self.repository.clone()).execute()?;
                Ok(json!(tags))
            }
        }
    }

    fn list_todos(&self, args: ListTodosArgs) -> Result<Value> {
        let state = args
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(parse_status_arg)
            .transpose()?;
        let options = ListTodosOptions {
            filter: TodoFilter {
                state,
                tag: args.tag.filter(|t| !t.is_empty()),
            },
            ..Default::default()
        };

        let todos = ListTodosService::new(self.repository.clone()).execute(&options)?;
        Ok(serde_json::to_value(EntryView::list(&todos))?)
    }

    fn add_todo(&self, args: AddTodoArgs) -> Result<Value> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let todo = NewTodo {
            title: args.title,
            priority: non_empty(args.priority)
                .as_deref()
                .map(parse_priority_arg)
                .transpose()?,
            tags: args.tags.as_deref().map(parse_tags_arg).unwrap_or_default(),
            scheduled: non_empty(args.schedule)
                .as_deref()
                .map(parse_date_arg)
                .transpose()?,
            deadline: non_empty(args.deadline)
                .as_deref()
                .map(parse_date_arg)
                .transpose()?,
        };
        let options = AddTodoOptions {
            file: non_empty(args.file),
            ..Default::default()
        };

        let path = AddTodoService::new(self.repository.clone()).execute(&todo, &options)?;
        Ok(json!({ "file": path.display().to_string() }))
    }

    fn get_agenda(&self, args: GetAgendaArgs) -> Result<Value> {
        let date = match args.date.as_deref().filter(|d| !d.is_empty()) {
            Some(raw) => parse_date_arg(raw)?,
            None => self.today,
        };
        let range = match args.range.as_deref().filter(|r| !r.is_empty()) {
            Some(raw) => raw
                .parse::<AgendaRange>()
                .map_err(OrgendaError::InvalidArgument)?,
            None => AgendaRange::Day,
        };

        let options = AgendaOptions {
            range,
            ..AgendaOptions::new(date)
        };
        let agenda = AgendaService::new(self.repository.clone()).execute(&options)?;
        Ok(serde_json::to_value(agenda)?)
    }

    /// Serve until EOF.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> anyhow::Result<()> {
        info!("event=serve module=server status=started");
        for line in input.lines() {
            let line = line.context("failed to read request from stdin")?;
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line);
            serde_json::to_writer(&mut output, &response).context("failed to encode response")?;
            output
                .write_all(b"\n")
                .and_then(|_| output.flush())
                .context("failed to write response to stdout")?;
        }
        info!("event=serve module=server status=stopped");
        Ok(())
    }
}

/// Serve on the process's stdin and stdout.
pub fn serve_stdio(repository: FileSystemRepository) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    ToolServer::new(repository).run(stdin.lock(), stdout.lock())
}
