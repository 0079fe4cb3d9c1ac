mod saved;

use std::path::{Path, PathBuf};

use catalog::session::{NotificationLevel, clear_cookie_effects};
use catalog::{Credentials, Dispatch, HttpAuthGateway, MovieLists, NewUser, Notification, SessionStore};
use clap::{Parser, Subcommand};
use saved::{SavedSession, notification_line};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("auth gateway: {0}")]
    Gateway(#[from] catalog::GatewayError),
    #[error("server returned {status} for {path}")]
    Status { status: u16, path: String },
    #[error("session file {path}: {source}")]
    SessionFile { path: String, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "movie-cli", about = "Movie catalog session CLI")]
struct Cli {
    #[arg(long, env = "MOVIE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "MOVIE_SESSION_FILE", default_value = ".movie-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "MOVIE_PASSWORD")]
        password: String,
    },
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MOVIE_PASSWORD")]
        password: String,
        #[arg(long, default_value_t = false)]
        remember_me: bool,
    },
    /// Forget the session and clear its cookies.
    Logout,
    /// Print the saved session.
    Whoami,
    /// List the catalog.
    Movies,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let base_url = cli.base_url.trim_end_matches('/').to_owned();
    let mut saved = SavedSession::load(&cli.session_file)?;

    match cli.command {
        Command::Ping => run_ping(&base_url).await,
        Command::Register { name, email, password } => {
            let user = NewUser { name, email, password };
            run_register(&base_url, &mut saved, &cli.session_file, &user).await
        }
        Command::Login { email, password, remember_me } => {
            let credentials = Credentials { email, password, remember_me };
            run_login(&base_url, &mut saved, &cli.session_file, &credentials).await
        }
        Command::Logout => {
            run_logout(&base_url, &mut saved).await;
            saved.save(&cli.session_file)
        }
        Command::Whoami => print_json(&serde_json::to_value(&saved.session)?),
        Command::Movies => {
            let lists = fetch_movies(&base_url).await?;
            print_json(&serde_json::to_value(&lists)?)
        }
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let path = "/healthz";
    let response = reqwest::get(format!("{base_url}{path}")).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Status { status: status.as_u16(), path: path.to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_register(
    base_url: &str,
    saved: &mut SavedSession,
    session_file: &Path,
    user: &NewUser,
) -> Result<(), CliError> {
    let gateway = HttpAuthGateway::new(base_url)?;
    let mut store = SessionStore::from_state(std::mem::take(&mut saved.session));
    let dispatch = store.register(&gateway, user).await;
    saved.session = store.into_state();
    finish(base_url, saved, session_file, dispatch).await
}

async fn run_login(
    base_url: &str,
    saved: &mut SavedSession,
    session_file: &Path,
    credentials: &Credentials,
) -> Result<(), CliError> {
    let gateway = HttpAuthGateway::new(base_url)?;
    let mut store = SessionStore::from_state(std::mem::take(&mut saved.session));
    let dispatch = store.login(&gateway, credentials).await;
    saved.session = store.into_state();
    finish(base_url, saved, session_file, dispatch).await
}

/// Clear local state first; the server call only expires the http-only token.
async fn run_logout(base_url: &str, saved: &mut SavedSession) {
    let mut store = SessionStore::from_state(std::mem::take(&mut saved.session));
    store.logout();
    saved.session = store.into_state();
    saved.apply(clear_cookie_effects());

    let client = match reqwest::Client::builder().redirect(reqwest::redirect::Policy::none()).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "sign-out skipped");
            return;
        }
    };
    if let Err(e) = client.post(format!("{base_url}/auth/sign-out")).send().await {
        tracing::warn!(error = %e, "server sign-out failed");
    }
    println!("signed out");
}

/// Execute reducer effects, persist the session, then run the movie refresh.
/// A failed refresh is reported but leaves the saved session in place.
async fn finish(
    base_url: &str,
    saved: &mut SavedSession,
    session_file: &Path,
    dispatch: Dispatch,
) -> Result<(), CliError> {
    let applied = saved.apply(dispatch.effects);
    for notification in &applied.notifications {
        print_notification(notification);
    }
    saved.save(session_file)?;

    if applied.refresh_movies {
        match fetch_movies(base_url).await {
            Ok(lists) => println!("signed in as {}; {} movies available", saved.session.name, lists.len()),
            Err(e) => {
                tracing::warn!(error = %e, "movie refresh failed");
                eprintln!("signed in as {}, but the movie list could not be loaded", saved.session.name);
            }
        }
    }

    dispatch.result.map(|_| ()).map_err(CliError::from)
}

fn print_notification(notification: &Notification) {
    let line = notification_line(notification);
    match notification.level {
        NotificationLevel::Success => println!("{line}"),
        NotificationLevel::Error => eprintln!("{line}"),
    }
}

async fn fetch_movies(base_url: &str) -> Result<MovieLists, CliError> {
    let path = "/api/movies";
    let response = reqwest::get(format!("{base_url}{path}")).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Status { status: status.as_u16(), path: path.to_owned() });
    }
    Ok(response.json().await?)
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
