//! trel - fetch Trello cards as conversational context, create cards, and
//! manage them from the command line

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use trel_commands::CommandStatus;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a card with comments and attachments for use as context
    Fetch(FetchArgs),
    /// Create a card on a board and list
    Create(CreateArgs),
    /// Comment on, attach files to, or complete a card
    Manage(ManageArgs),
    /// Manage Trello authorization
    Auth(AuthArgs),
}

// Simple command wrappers - just forward arguments

#[derive(Debug, Args)]
struct FetchArgs {
    /// Card short link or full card id
    card: String,
    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    format: FetchFormat,
    /// Maximum number of comment actions to fetch
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=1000))]
    actions_limit: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FetchFormat {
    Markdown,
    Json,
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Board short link or full id
    #[arg(long)]
    board: String,
    /// List name (case-insensitive) or list id on the board
    #[arg(long)]
    list: String,
    /// Title for the new card
    #[arg(long)]
    name: String,
    /// Card description
    #[arg(long)]
    desc: Option<String>,
    /// ISO-8601 due date/time
    #[arg(long)]
    due: Option<String>,
    /// Card position: top, bottom, or a fractional value
    #[arg(long, default_value = "bottom")]
    pos: String,
    /// Label id to attach (repeatable)
    #[arg(long = "label", value_name = "LABEL_ID")]
    labels: Vec<String>,
    /// Member id to assign (repeatable)
    #[arg(long = "member", value_name = "MEMBER_ID")]
    members: Vec<String>,
    /// URL to attach to the card when creating it
    #[arg(long)]
    url_source: Option<String>,
    /// Output format for the created card
    #[arg(short, long, value_enum, default_value = "summary")]
    format: CreateFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CreateFormat {
    Summary,
    Json,
}

#[derive(Debug, Args)]
struct ManageArgs {
    /// Card short link or full id
    #[arg(long)]
    card: String,
    /// Text to add as a comment on the card
    #[arg(long)]
    comment: Option<String>,
    /// Path to a file to upload (repeatable)
    #[arg(long = "attachment", value_name = "PATH")]
    attachments: Vec<PathBuf>,
    /// Mark the card as complete (sets dueComplete)
    #[arg(long)]
    complete: bool,
}

#[derive(Debug, Args)]
struct AuthArgs {
    #[command(subcommand)]
    command: AuthCommand,
}

#[derive(Debug, Clone, Subcommand)]
enum AuthCommand {
    /// Print the authorization URL used to mint a token
    Url {
        /// Open the URL in the system browser
        #[arg(long)]
        open: bool,
    },
    /// Show the credential configuration
    Status,
}

// Conversion implementations

impl From<FetchFormat> for trel_commands::fetch::FetchFormat {
    fn from(format: FetchFormat) -> Self {
        match format {
            FetchFormat::Markdown => Self::Markdown,
            FetchFormat::Json => Self::Json,
        }
    }
}

impl From<FetchArgs> for trel_commands::fetch::FetchArgs {
    fn from(args: FetchArgs) -> Self {
        Self {
            card: args.card,
            format: args.format.into(),
            actions_limit: args.actions_limit,
        }
    }
}

impl From<CreateFormat> for trel_commands::create::CreateFormat {
    fn from(format: CreateFormat) -> Self {
        match format {
            CreateFormat::Summary => Self::Summary,
            CreateFormat::Json => Self::Json,
        }
    }
}

impl From<CreateArgs> for trel_commands::create::CreateArgs {
    fn from(args: CreateArgs) -> Self {
        Self {
            board: args.board,
            list: args.list,
            name: args.name,
            desc: args.desc,
            due: args.due,
            pos: args.pos,
            labels: args.labels,
            members: args.members,
            url_source: args.url_source,
            format: args.format.into(),
        }
    }
}

impl From<ManageArgs> for trel_commands::manage::ManageArgs {
    fn from(args: ManageArgs) -> Self {
        Self {
            card: args.card,
            comment: args.comment,
            attachments: args.attachments,
            complete: args.complete,
        }
    }
}

impl From<AuthCommand> for trel_commands::auth::AuthCommand {
    fn from(cmd: AuthCommand) -> Self {
        match cmd {
            AuthCommand::Url { open } => Self::Url { open },
            AuthCommand::Status => Self::Status,
        }
    }
}

impl From<AuthArgs> for trel_commands::auth::AuthArgs {
    fn from(args: AuthArgs) -> Self {
        Self {
            command: args.command.into(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch(args) => trel_commands::fetch::execute(args.into()).await,
        Commands::Create(args) => trel_commands::create::execute(args.into()).await,
        Commands::Manage(args) => trel_commands::manage::execute(args.into()).await,
        Commands::Auth(args) => trel_commands::auth::execute(args.into()).await,
    };

    match result {
        Ok(CommandStatus::Completed) => ExitCode::SUCCESS,
        // Authorization is pending: the instructions were printed and no
        // request was made. Distinct from failure so scripts can branch.
        Ok(CommandStatus::AuthPending) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
