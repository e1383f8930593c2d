use clap::{Args, Parser, Subcommand};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "epigram", bin_name = "epigram", version = get_version())]
#[command(about = "Search, browse and share short quotes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search epigrams by content, author or tag
    #[command(alias = "s", display_order = 1)]
    Search {
        /// Search term words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,

        /// Number of result pages to reveal
        #[arg(long, short = 'p', default_value_t = 1)]
        pages: usize,
    },

    /// Show, re-run or clear recent searches
    #[command(display_order = 2)]
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// List all epigrams
    #[command(alias = "ls", display_order = 3)]
    List,

    /// Show today's epigram
    #[command(display_order = 4)]
    Today,

    /// Show a single epigram
    #[command(display_order = 5)]
    Show { id: u64 },

    /// Create an account
    #[command(display_order = 10)]
    Signup(SignUpArgs),

    /// Sign in and remember the session
    #[command(display_order = 11)]
    Login(SignInArgs),

    /// Forget the stored session
    #[command(display_order = 12)]
    Logout,

    /// Post a new epigram
    #[command(display_order = 13)]
    Write(WriteArgs),

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (e.g., base_url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Delete every stored search term
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Search again for a history entry
    Run {
        /// Position in `epigram history` (1 is the most recent)
        index: usize,
    },
}

/// Fields not given as flags are prompted for on stdin.
#[derive(Args, Debug, Default)]
pub struct SignUpArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub nickname: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub password_confirmation: Option<String>,

    /// Validate only, send nothing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Default)]
pub struct SignInArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Validate only, send nothing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Default)]
pub struct WriteArgs {
    /// Epigram text
    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    /// Title of the source (book, talk, ...)
    #[arg(long)]
    pub reference_title: Option<String>,

    #[arg(long)]
    pub reference_url: Option<String>,

    /// Tags separated by commas or spaces
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Validate only, send nothing
    #[arg(long)]
    pub dry_run: bool,
}
