//! Command-line interface for `ct`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use contacts_lib::{FileBackend, InteractionType, Saved, SystemClock, Tracker};

use crate::config::{self, CliOverrides, TrackerConfig};
use crate::logging;

/// `ct` - local-first contact and interaction tracker.
#[derive(Parser, Debug)]
#[command(name = "ct")]
#[command(
    author,
    version,
    about = "Local-first contact and interaction tracker",
    long_about = None,
    after_help = "State is kept as JSON snapshots in the data directory (default: .contacts)."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Data directory holding snapshots and config.yaml
    #[arg(long, global = true, env = "CT_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Contacts per page
    #[arg(long, global = true, env = "CT_PAGE_SIZE", value_name = "N")]
    pub page_size: Option<usize>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration values supplied through flags or the environment.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            data_dir: self.data_dir.clone(),
            config: self.config.clone(),
            page_size: self.page_size,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory and a default config file
    Init(InitArgs),

    /// Add a contact
    Add(AddArgs),

    /// Edit a contact; omitted fields keep their current values
    Edit(EditArgs),

    /// Delete a contact and all of its interactions
    Delete {
        /// Contact ID
        id: String,
    },

    /// Show a contact with its interaction history
    Show {
        /// Contact ID
        id: String,
    },

    /// List the current page of contacts
    List(ListArgs),

    /// Set the search query (omit to clear) and list matches
    Search {
        /// Text matched against name, email, company and phone
        query: Option<String>,
    },

    /// Manage tag filters
    Filter(FilterCommand),

    /// List all tags in use
    Tags,

    /// Count loaded contacts, interactions and tags
    Stats,

    /// Jump to a page of the contact list
    Page {
        /// Page number, starting at 1
        page: usize,
    },

    /// Manage interactions (alias: ix)
    #[command(alias = "ix")]
    Interaction(InteractionCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Overwrite an existing config.yaml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Company or organization
    #[arg(long)]
    pub company: Option<String>,

    /// Tag (repeatable, or comma-separated)
    #[arg(long = "tag", short = 't', value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Contact ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Phone number (empty string clears it)
    #[arg(long)]
    pub phone: Option<String>,

    /// Company (empty string clears it)
    #[arg(long)]
    pub company: Option<String>,

    /// Replace the tag set (repeatable, or comma-separated)
    #[arg(long = "tag", short = 't', value_delimiter = ',', conflicts_with = "clear_tags")]
    pub tags: Vec<String>,

    /// Remove every tag
    #[arg(long)]
    pub clear_tags: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Jump to this page first
    #[arg(long)]
    pub page: Option<usize>,
}

#[derive(Args, Debug)]
pub struct FilterCommand {
    /// Filter subcommand
    #[command(subcommand)]
    pub command: FilterSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FilterSubcommand {
    /// Require a tag
    Add {
        tag: String,
    },

    /// Stop requiring a tag
    Remove {
        tag: String,
    },

    /// Clear search and tag filters
    Clear,
}

#[derive(Args, Debug)]
pub struct InteractionCommand {
    /// Interaction subcommand
    #[command(subcommand)]
    pub command: InteractionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum InteractionSubcommand {
    /// Log an interaction with a contact
    Add(InteractionAddArgs),

    /// Edit an interaction; omitted fields keep their current values
    Edit(InteractionEditArgs),

    /// Delete an interaction
    Delete {
        /// Interaction ID
        id: String,
    },

    /// List a contact's interactions, newest first
    List {
        /// Contact ID
        contact_id: String,
    },
}

#[derive(Args, Debug)]
pub struct InteractionAddArgs {
    /// Contact ID
    pub contact_id: String,

    /// call, email, meeting or note
    #[arg(long = "type", default_value = "note")]
    pub kind: InteractionType,

    /// What happened
    #[arg(long)]
    pub content: String,
}

#[derive(Args, Debug)]
pub struct InteractionEditArgs {
    /// Interaction ID
    pub id: String,

    /// call, email, meeting or note
    #[arg(long = "type")]
    pub kind: Option<InteractionType>,

    #[arg(long)]
    pub content: Option<String>,
}

/// State shared by commands that work on the stores.
pub struct CommandContext {
    pub tracker: Tracker,
    pub config: TrackerConfig,
    pub json: bool,
    /// Colour tags in text output.
    pub colored: bool,
}

impl CommandContext {
    /// Resolve configuration and load the tracker from the data directory.
    ///
    /// Load problems are printed as warnings; the affected store starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn open(overrides: &CliOverrides, json: bool) -> Result<Self> {
        let config = config::load(overrides).context("Failed to load configuration")?;
        tracing::debug!(data_dir = %config.data_dir.display(), "opening tracker");

        let mut tracker = Tracker::open(
            Box::new(FileBackend::new(config.data_dir.clone())),
            Arc::new(SystemClock::new()),
        );
        for warning in tracker.load_warnings() {
            eprintln!("Warning: {warning}");
        }
        if tracker.contacts().filters().limit != config.page_size {
            settle(tracker.set_page_size(config.page_size));
        }

        Ok(Self {
            tracker,
            config,
            json,
            colored: !json && std::io::stdout().is_terminal(),
        })
    }
}

/// Unwrap a store result, printing any persistence warning to stderr.
pub fn settle<T>(saved: Saved<T>) -> T {
    if let Some(warning) = &saved.warning {
        eprintln!("Warning: changes not saved: {warning}");
    }
    saved.into_inner()
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_json)?;
    let overrides = cli.overrides();

    match cli.command {
        Commands::Init(args) => commands::init::execute(&args, &overrides, cli.json),
        Commands::Completions { shell } => {
            commands::completions::execute(shell);
            Ok(())
        }
        command => {
            let mut ctx = CommandContext::open(&overrides, cli.json)?;
            dispatch(command, &mut ctx)
        }
    }
}

/// Route a store command to its implementation.
///
/// # Errors
///
/// Returns whatever error the command reports.
pub fn dispatch(command: Commands, ctx: &mut CommandContext) -> Result<()> {
    match command {
        Commands::Add(args) => commands::add::execute(args, ctx),
        Commands::Edit(args) => commands::edit::execute(args, ctx),
        Commands::Delete { id } => commands::delete::execute(&id, ctx),
        Commands::Show { id } => commands::show::execute(&id, ctx),
        Commands::List(args) => commands::list::execute(&args, ctx),
        Commands::Page { page } => commands::list::execute_page(page, ctx),
        Commands::Search { query } => commands::filter::execute_search(query, ctx),
        Commands::Filter(filter) => commands::filter::execute(filter.command, ctx),
        Commands::Tags => commands::filter::execute_tags(ctx),
        Commands::Stats => commands::stats::execute(ctx),
        Commands::Interaction(interaction) => {
            commands::interaction::execute(interaction.command, ctx)
        }
        Commands::Init(_) | Commands::Completions { .. } => {
            anyhow::bail!("{} does not operate on the tracker", command.name())
        }
    }
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Add(_) => "add",
            Self::Edit(_) => "edit",
            Self::Delete { .. } => "delete",
            Self::Show { .. } => "show",
            Self::List(_) => "list",
            Self::Search { .. } => "search",
            Self::Filter(filter) => match filter.command {
                FilterSubcommand::Add { .. } => "filter add",
                FilterSubcommand::Remove { .. } => "filter remove",
                FilterSubcommand::Clear => "filter clear",
            },
            Self::Tags => "tags",
            Self::Stats => "stats",
            Self::Page { .. } => "page",
            Self::Interaction(interaction) => match interaction.command {
                InteractionSubcommand::Add(_) => "interaction add",
                InteractionSubcommand::Edit(_) => "interaction edit",
                InteractionSubcommand::Delete { .. } => "interaction delete",
                InteractionSubcommand::List { .. } => "interaction list",
            },
            Self::Completions { .. } => "completions",
        }
    }
}
