//! Line-oriented terminal front end.
//!
//! Each input line is one [`Command`]. The shell awaits every operation
//! before reading the next line, so there is at most one request in flight.

use std::ops::ControlFlow;
use std::str::FromStr;
use std::sync::Arc;

use movietrack_client::backend::{MovieBackend, SessionBackend};
use movietrack_core::error::CoreError;
use movietrack_core::filter::MovieFilter;
use movietrack_core::movie::MovieForm;
use movietrack_core::route::RouteName;
use movietrack_core::types::MovieId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::MovieController;
use crate::router::{Navigation, Router};
use crate::session::SessionController;
use crate::storage::LocalStorage;
use crate::view::MovieView;

pub const HELP: &str = "\
Commands:
  goto <path>                                  navigate to /, /login or /movies
  signup <username> <email> <password>         create an account
  login <username> <password>                  sign in and open /movies
  logout                                       end the session and forget the token
  load                                         refetch all movies
  filter <all|watched|unwatched>               change the list filter
  add <title> | <director> | <year> [| watched]
  edit <id>                                    load a movie into the edit form
  save <title> | <director> | <year> [| watched]
  toggle <id>                                  flip watched / to watch
  delete <id>
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Goto(String),
    Signup {
        username: String,
        email: String,
        password: String,
    },
    Login { username: String, password: String },
    Logout,
    Load,
    Filter(MovieFilter),
    Add(MovieForm),
    Edit(MovieId),
    Save(MovieForm),
    Toggle(MovieId),
    Delete(MovieId),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{command}' takes {expected}, unexpected '{extra}'")]
    UnexpectedArgument {
        command: &'static str,
        expected: &'static str,
        extra: String,
    },

    #[error("'{0}' is not a movie id")]
    InvalidId(String),

    #[error("Unknown watched value '{0}'. Use 'watched' or 'unwatched'")]
    InvalidWatched(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl Command {
    /// Whether the command acts on the movie list and needs the movies route.
    pub fn needs_movies_route(&self) -> bool {
        matches!(
            self,
            Command::Load
                | Command::Filter(_)
                | Command::Add(_)
                | Command::Edit(_)
                | Command::Save(_)
                | Command::Toggle(_)
                | Command::Delete(_)
        )
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "goto" => {
                let path = required(rest, "goto", "a path")?;
                Ok(Command::Goto(path.to_string()))
            }
            "signup" => {
                let [username, email, password] =
                    words(rest, "signup", "a username, an email and a password")?;
                Ok(Command::Signup {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                })
            }
            "login" => {
                let [username, password] = words(rest, "login", "a username and a password")?;
                Ok(Command::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                })
            }
            "logout" => Ok(Command::Logout),
            "load" => Ok(Command::Load),
            "filter" => {
                let filter = required(rest, "filter", "all, watched or unwatched")?;
                Ok(Command::Filter(filter.parse()?))
            }
            "add" => Ok(Command::Add(parse_form(rest)?)),
            "save" => Ok(Command::Save(parse_form(rest)?)),
            "edit" => Ok(Command::Edit(parse_id(rest, "edit")?)),
            "toggle" => Ok(Command::Toggle(parse_id(rest, "toggle")?)),
            "delete" => Ok(Command::Delete(parse_id(rest, "delete")?)),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

/// Split `rest` into exactly `N` whitespace-separated words.
fn words<'a, const N: usize>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<[&'a str; N], CommandError> {
    let mut parts = rest.split_whitespace();
    let mut found = [""; N];
    for slot in found.iter_mut() {
        *slot = parts
            .next()
            .ok_or(CommandError::MissingArgument { command, expected })?;
    }
    match parts.next() {
        Some(extra) => Err(CommandError::UnexpectedArgument {
            command,
            expected,
            extra: extra.to_string(),
        }),
        None => Ok(found),
    }
}

fn parse_id(rest: &str, command: &'static str) -> Result<MovieId, CommandError> {
    let raw = required(rest, command, "a movie id")?;
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

/// Parse `title | director | year [| watched]`.
///
/// Missing fields stay empty so form validation reports them. Without a
/// fourth field the form has no watched control.
fn parse_form(rest: &str) -> Result<MovieForm, CommandError> {
    let mut fields = rest.split('|').map(str::trim);
    let title = fields.next().unwrap_or_default();
    let director = fields.next().unwrap_or_default();
    let release_year = fields.next().unwrap_or_default();
    let watched = match fields.next() {
        None => None,
        Some("watched" | "yes" | "true" | "y") => Some(true),
        Some("unwatched" | "no" | "false" | "n" | "") => Some(false),
        Some(other) => return Err(CommandError::InvalidWatched(other.to_string())),
    };
    Ok(MovieForm::new(title, director, release_year, watched))
}

pub struct Shell<B, V> {
    router: Router<LocalStorage>,
    session: SessionController<B, V>,
    movies: MovieController<B, V>,
    view: Arc<V>,
}

impl<B, V> Shell<B, V>
where
    B: MovieBackend + SessionBackend + Clone,
    V: MovieView + 'static,
{
    pub fn new(backend: B, storage: LocalStorage, view: Arc<V>) -> Self {
        Self {
            router: Router::new(storage.clone()),
            session: SessionController::new(backend.clone(), storage, Arc::clone(&view)),
            movies: MovieController::new(backend, Arc::clone(&view)),
            view,
        }
    }

    pub fn current_route(&self) -> Option<RouteName> {
        self.router.current()
    }

    pub fn movies(&self) -> &MovieController<B, V> {
        &self.movies
    }

    /// Navigate to `path` and load the list when the movies route is entered.
    pub async fn goto(&mut self, path: &str) {
        match self.router.navigate(path) {
            Navigation::Entered(route) => {
                self.view.show_notice(&format!("-> {} ({})", route, route.path()));
                if route == RouteName::Movies {
                    self.movies.load().await;
                }
            }
            Navigation::Redirected { requested, to } => {
                self.view.show_notice(&format!(
                    "{requested} requires sign-in -> {to} ({})",
                    to.path()
                ));
            }
            Navigation::NotFound(path) => {
                self.view.show_notice(&format!("No page at {path}"));
            }
        }
    }

    /// Run one command. Returns `Break` when the shell should exit.
    pub async fn execute(&mut self, command: Command) -> ControlFlow<()> {
        if command.needs_movies_route() && self.router.current() != Some(RouteName::Movies) {
            self.view
                .show_notice("Open the movie list first: goto /movies");
            return ControlFlow::Continue(());
        }

        match command {
            Command::Goto(path) => self.goto(&path).await,
            Command::Login { username, password } => {
                if self.session.sign_in(&username, &password).await {
                    self.goto(RouteName::Movies.path()).await;
                }
            }
            Command::Signup {
                username,
                email,
                password,
            } => {
                self.session.sign_up(&username, &email, &password).await;
            }
            Command::Logout => {
                self.session.sign_out().await;
                self.goto(RouteName::Home.path()).await;
            }
            Command::Load => self.movies.load().await,
            Command::Filter(filter) => self.movies.set_filter(filter),
            Command::Add(form) => {
                self.movies.open_add_form();
                self.movies.create(&form).await;
            }
            Command::Edit(id) => self.movies.begin_edit(id),
            Command::Save(form) => self.movies.submit_edit(&form).await,
            Command::Toggle(id) => self.movies.toggle_watched(id).await,
            Command::Delete(id) => self.movies.remove(id).await,
            Command::Help => self.view.show_notice(HELP),
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Read commands from `input` until it ends or `quit` is entered.
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command).await.is_break() {
                        break;
                    }
                }
                Err(e) => self.view.show_notice(&e.to_string()),
            }
        }
        Ok(())
    }
}
