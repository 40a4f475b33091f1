//! CLI entry and dispatch.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use blogapp_core::config::{self, Config};
use blogapp_core::context::AppContext;
use blogapp_core::session::{FileStore, UserType};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod navigator;

use navigator::TerminalNavigator;

/// Env var holding the tracing filter directive.
const LOG_ENV: &str = "BLOGAPP_LOG";

#[derive(Parser)]
#[command(name = "blogapp")]
#[command(version)]
#[command(about = "Terminal client for the BlogApp education blog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Also write logs to $BLOGAPP_HOME/logs
    #[arg(long, global = true)]
    log_file: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    #[command(flatten)]
    Session(SessionCommands),
}

/// Commands that run against a rehydrated session.
#[derive(clap::Subcommand)]
enum SessionCommands {
    /// Log in and store the session
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
        /// Account password (prompted when omitted)
        #[arg(long, env = "BLOGAPP_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log out and forget the stored session
    Logout {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the logged-in user
    Whoami,
    /// Read and manage posts
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Manage teachers
    Teachers {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Manage students
    Students {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

#[derive(clap::Subcommand)]
enum PostCommands {
    /// Lists posts
    List {
        /// Keep posts whose title or excerpt contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Shows a post
    Show {
        #[arg(value_name = "POST_ID")]
        id: String,
    },
    /// Publishes a new post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        excerpt: String,
        #[arg(long)]
        content: String,
    },
    /// Edits a post; omitted fields keep their current value
    Edit {
        #[arg(value_name = "POST_ID")]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Deletes a post
    Delete {
        #[arg(value_name = "POST_ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Form fields shared by create and edit.
#[derive(clap::Args, Debug, Clone, Default)]
pub(crate) struct UserFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub school: Option<String>,
    #[arg(long)]
    pub age: Option<String>,
    /// Students only
    #[arg(long)]
    pub guardian: Option<String>,
    /// Students only
    #[arg(long = "class")]
    pub student_class: Option<String>,
}

#[derive(clap::Subcommand)]
enum UserCommands {
    /// Lists active users
    List,
    /// Shows a user
    Show {
        #[arg(value_name = "USER_ID")]
        id: String,
    },
    /// Registers a new user
    Create {
        #[arg(long)]
        password: Option<String>,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Edits a user; omitted fields keep their current value
    Edit {
        #[arg(value_name = "USER_ID")]
        id: String,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Deletes a user
    Delete {
        #[arg(value_name = "USER_ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.log_file)?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

/// Installs the subscriber: stderr always, plus a daily file when asked.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(log_file: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = if log_file {
        let dir = config::paths::logs_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create log directory {}", dir.display()))?;
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, "blogapp.log"));
        let layer = fmt::layer().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;
    Ok(guard)
}

async fn dispatch(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Commands::Config { command } => {
            return match command {
                ConfigCommands::Path => {
                    commands::config::path();
                    Ok(())
                }
                ConfigCommands::Init => commands::config::init(),
            };
        }
        Commands::Session(command) => command,
    };

    let config = Config::load().context("load config")?;
    let mut ctx = AppContext::new(
        &config,
        Arc::new(FileStore::default_location()),
        Arc::new(TerminalNavigator::new()),
    )?;
    ctx.start();

    match command {
        SessionCommands::Login { email, password } => {
            commands::auth::login(&ctx, email.as_deref(), password.as_deref()).await
        }
        SessionCommands::Logout { yes } => commands::auth::logout(&ctx, yes),
        SessionCommands::Whoami => {
            commands::auth::whoami(&ctx);
            Ok(())
        }
        SessionCommands::Posts { command } => match command {
            PostCommands::List { search } => {
                commands::posts::list(&ctx, search.as_deref().unwrap_or("")).await
            }
            PostCommands::Show { id } => commands::posts::show(&ctx, &id).await,
            PostCommands::Create {
                title,
                excerpt,
                content,
            } => commands::posts::create(&ctx, &title, &excerpt, &content).await,
            PostCommands::Edit {
                id,
                title,
                excerpt,
                content,
            } => commands::posts::edit(&ctx, &id, title, excerpt, content).await,
            PostCommands::Delete { id, yes } => commands::posts::delete(&ctx, &id, yes).await,
        },
        SessionCommands::Teachers { command } => run_users(&ctx, UserType::Teacher, command).await,
        SessionCommands::Students { command } => run_users(&ctx, UserType::Student, command).await,
    }
}

async fn run_users(ctx: &AppContext, role: UserType, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List => commands::users::list(ctx, role).await,
        UserCommands::Show { id } => commands::users::show(ctx, role, &id).await,
        UserCommands::Create { password, fields } => {
            commands::users::create(ctx, role, password, fields).await
        }
        UserCommands::Edit { id, fields } => commands::users::edit(ctx, role, &id, fields).await,
        UserCommands::Delete { id, yes } => commands::users::delete(ctx, role, &id, yes).await,
    }
}
