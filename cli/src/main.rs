mod render;
mod transport;

use std::io::{self, Write};
use std::num::NonZeroU32;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use todo_core::view::{DEFAULT_PAGE_SIZE, DEFAULT_USER_ID};
use todo_core::{Session, TodoClient, TodoId, Transport, ViewState};
use tracing::Level;

use crate::transport::UreqTransport;

const DEFAULT_BASE_URL: &str = "https://dummyjson.com/todos";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("todo text must not be blank")]
    BlankText,
    #[error("todo {0} is not on the loaded page; adjust --skip or --page-size")]
    NotLoaded(TodoId),
    #[error("{0}")]
    Remote(String),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "todo", about = "List and edit todos on a remote todo list API")]
struct Cli {
    /// Collection URL, e.g. https://dummyjson.com/todos
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "TODO_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: NonZeroU32,

    #[arg(long, env = "TODO_SKIP", default_value_t = 0)]
    skip: u32,

    /// Log every request to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show the current page.
    List,
    /// Create a todo; it is shown first.
    Add {
        text: String,
        #[arg(long)]
        completed: bool,
        #[arg(long, default_value_t = DEFAULT_USER_ID)]
        user_id: i64,
    },
    /// Replace the text of a todo on the current page.
    Edit {
        id: TodoId,
        text: String,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Flip the completion flag of a todo on the current page.
    Toggle { id: TodoId },
    /// Delete a todo by id.
    Delete { id: TodoId },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match run(cli, UreqTransport::new(), &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load the configured page, apply `cli.command`, and render the result.
fn run<T: Transport>(cli: Cli, transport: T, out: &mut impl Write) -> Result<(), CliError> {
    let view = ViewState::new(TodoClient::new(&cli.base_url)).with_page(cli.page_size, cli.skip);
    let mut session = Session::new(view, transport);

    session.load();
    remote_outcome(&session)?;

    match cli.command {
        Command::List => {}
        Command::Add {
            text,
            completed,
            user_id,
        } => {
            let form = session.view_mut().new_todo_mut();
            form.text = text;
            form.completed = completed;
            form.user_id = user_id;
            if !session.add() {
                return Err(CliError::BlankText);
            }
        }
        Command::Edit { id, text, completed } => {
            let view = session.view_mut();
            if !view.begin_edit_by_id(id) {
                return Err(CliError::NotLoaded(id));
            }
            if let Some(draft) = view.draft_mut() {
                draft.text = text;
                if let Some(completed) = completed {
                    draft.completed = completed;
                }
            }
            if !session.save_edit() {
                return Err(CliError::BlankText);
            }
        }
        Command::Toggle { id } => {
            if !session.toggle_complete(id) {
                return Err(CliError::NotLoaded(id));
            }
        }
        Command::Delete { id } => {
            session.delete(id);
        }
    }

    render::render(session.view(), out)?;
    remote_outcome(&session)
}

fn remote_outcome<T: Transport>(session: &Session<T>) -> Result<(), CliError> {
    match session.view().error_message() {
        "" => Ok(()),
        message => Err(CliError::Remote(message.to_string())),
    }
}
