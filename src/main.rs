use chrono::Local;
use clap::Parser;
use orgenda::application::input::{
    parse_date_arg, parse_priority_arg, parse_priority_update, parse_status_arg,
    parse_status_update, parse_tags_arg,
};
use orgenda::application::{
    AddTodoOptions, AddTodoService, AgendaOptions, AgendaService, CaptureOptions,
    CaptureService, CompleteTodoService, ConfigService, EditEntryService, EntryEdit,
    ListTagsService, ListTodosOptions, ListTodosService, NewTodo, PathChange,
};
use orgenda::cli::output::EntryView;
use orgenda::cli::{
    format_agenda, format_config, format_tag_list, format_todo_list, Cli, Commands,
    ConfigCommand, PlacementArgs, SortArgs, TodoCommand,
};
use orgenda::domain::location::parse_location;
use orgenda::domain::{AgendaRange, CaptureTarget, SortKey, TodoFilter};
use orgenda::error::{OrgendaError, Result};
use orgenda::infrastructure::config::resolve_config_path;
use orgenda::infrastructure::logging::init_logging;
use orgenda::infrastructure::FileSystemRepository;
use orgenda::server;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let repository = match resolve_config_path(cli.config.as_deref()) {
        Ok(path) => FileSystemRepository::new(path),
        Err(e) => exit_with(e),
    };

    match run(cli.command, repository) {
        Ok(_) => std::process::exit(0),
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: OrgendaError) -> ! {
    eprintln!("Error: {}", e.display_with_suggestions());
    std::process::exit(e.exit_code());
}

fn sort_key(sort: &SortArgs, default: SortKey) -> SortKey {
    sort.sort
        .as_deref()
        .map_or(default, |raw| raw.parse().unwrap_or_default())
}

fn placement_target(placement: &PlacementArgs) -> CaptureTarget {
    CaptureTarget::from_parts(placement.heading.clone(), placement.olp.clone())
}

fn optional_date(raw: Option<&str>) -> Result<Option<chrono::NaiveDate>> {
    raw.map(parse_date_arg).transpose()
}

fn run(command: Commands, repo: FileSystemRepository) -> Result<()> {
    match command {
        Commands::Todo { command } => run_todo(command, repo),
        Commands::Agenda {
            range,
            date,
            tag,
            sort,
            json,
        } => {
            let date = match date.as_deref() {
                Some(raw) => parse_date_arg(raw)?,
                None => Local::now().date_naive(),
            };
            let range: AgendaRange = range.parse().map_err(OrgendaError::InvalidArgument)?;
            let options = AgendaOptions {
                range,
                tag,
                sort: sort_key(&sort, SortKey::Date),
                descending: sort.desc,
                ..AgendaOptions::new(date)
            };

            let agenda = AgendaService::new(repo).execute(&options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&agenda)?);
            } else {
                print!("{}", format_agenda(&agenda));
            }
            Ok(())
        }
        Commands::Capture { content, placement } => {
            let options = CaptureOptions {
                file: placement.file,
                heading: placement.heading,
                olp: placement.olp,
                prepend: placement.prepend,
            };
            let now = Local::now().naive_local();
            let path = CaptureService::new(repo).execute(&content.join(" "), &options, now)?;
            println!("Captured to {}", path.display());
            Ok(())
        }
        Commands::Tags => {
            let tags = ListTagsService::new(repo).execute()?;
            let output = format_tag_list(&tags);
            if tags.is_empty() {
                println!("{}", output);
            } else {
                print!("{}", output);
            }
            Ok(())
        }
        Commands::Config { command } => run_config(command, repo),
        Commands::Serve => server::serve_stdio(repo)
            .map_err(|e| OrgendaError::Io(std::io::Error::other(format!("{:#}", e)))),
    }
}

fn run_todo(command: TodoCommand, repo: FileSystemRepository) -> Result<()> {
    match command {
        TodoCommand::List {
            status,
            tag,
            sort,
            json,
        } => {
            let options = ListTodosOptions {
                filter: TodoFilter {
                    state: status.as_deref().map(parse_status_arg).transpose()?,
                    tag,
                },
                sort: sort_key(&sort, SortKey::None),
                descending: sort.desc,
            };

            let todos = ListTodosService::new(repo).execute(&options)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&EntryView::list(&todos))?
                );
            } else if todos.is_empty() {
                println!("{}", format_todo_list(&todos));
            } else {
                print!("{}", format_todo_list(&todos));
            }
            Ok(())
        }
        TodoCommand::Add {
            title,
            priority,
            tags,
            schedule,
            deadline,
            placement,
        } => {
            let todo = NewTodo {
                title,
                priority: priority.as_deref().map(parse_priority_arg).transpose()?,
                tags: tags.as_deref().map(parse_tags_arg).unwrap_or_default(),
                scheduled: optional_date(schedule.as_deref())?,
                deadline: optional_date(deadline.as_deref())?,
            };
            let options = AddTodoOptions {
                target: placement_target(&placement),
                file: placement.file,
                prepend: placement.prepend,
            };

            let path = AddTodoService::new(repo).execute(&todo, &options)?;
            println!("Added TODO to {}", path.display());
            Ok(())
        }
        TodoCommand::Done { location } => {
            let location = parse_location(&location)?;
            let entry = CompleteTodoService::new(repo).execute(&location)?;
            println!("Marked as DONE: {}", entry.title);
            Ok(())
        }
        TodoCommand::Edit {
            location,
            status,
            priority,
            title,
            tags,
            schedule,
            deadline,
        } => {
            let location = parse_location(&location)?;
            let edit = EntryEdit {
                status: status.as_deref().map(parse_status_update).transpose()?,
                priority: priority.as_deref().map(parse_priority_update).transpose()?,
                title,
                tags: tags.as_deref().map(parse_tags_arg),
                scheduled: optional_date(schedule.as_deref())?,
                deadline: optional_date(deadline.as_deref())?,
            };

            let entry = EditEntryService::new(repo).execute(&location, &edit)?;
            println!("Updated: {}", entry.title);
            Ok(())
        }
    }
}

fn print_path_change(change: PathChange) {
    match change {
        PathChange::Added(p) => println!("Added {}", p),
        PathChange::AlreadyPresent(p) => println!("Path {} is already in the list.", p),
        PathChange::Removed(p) => println!("Removed {}", p),
        PathChange::NotPresent(p) => println!("Path {} not found in the list.", p),
    }
}

fn run_config(command: ConfigCommand, repo: FileSystemRepository) -> Result<()> {
    let service = ConfigService::new(repo);
    match command {
        ConfigCommand::List => {
            println!("# {}", service.config_path().display());
            print!("{}", format_config(&service.list()?));
        }
        ConfigCommand::AddPath { path } => print_path_change(service.add_path(&path)?),
        ConfigCommand::RemovePath { path } => print_path_change(service.remove_path(&path)?),
        ConfigCommand::Get { key } => println!("{}", service.get(&key)?),
        ConfigCommand::Set { key, value } => {
            service.set(&key, &value)?;
            println!("Set {} = {}", key, value);
        }
    }
    Ok(())
}
