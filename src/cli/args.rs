//! Command line arguments definition using clap.

use crate::config::{ConnectionArgs, Defaults};
use crate::media::Paging;
use chrono::NaiveDate;
use clap::{ArgGroup, Args, Command, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Radarr/Sonarr client
#[derive(Parser, Debug)]
#[command(name = "cliarr", author, version, about, long_about = None)]
pub struct Cli {
    /// Host url, e.g. 'http://192.168.0.1:7878'
    #[arg(short = 't', long, global = true)]
    pub host: Option<String>,

    /// API key, e.g. '5f5e32xf3ff8463d9f1d2u88ef0fd3e8'
    #[arg(short = 'k', long, global = true)]
    pub api_key: Option<String>,

    /// Username if using basic authentication
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Password if using basic authentication
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Path to a YAML file holding connection settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging and print full error traces
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Use the radarr client
    Radarr {
        #[command(subcommand)]
        command: RadarrCommand,
    },

    /// Use the sonarr client
    Sonarr {
        #[command(subcommand)]
        command: SonarrCommand,
    },

    /// Manage persisted default values of flags
    Defaults {
        #[command(subcommand)]
        command: DefaultsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RadarrCommand {
    /// Get info on a movie, or all of them
    Get {
        /// ID of the movie to get info on
        #[arg(short = 'i', long)]
        mid: Option<u64>,
    },

    /// Search for movies by keywords or imdb/tmdb id
    Lookup {
        /// Keywords to search for
        #[arg(long)]
        terms: Option<String>,

        /// IMDB ID of the movie
        #[arg(long)]
        imdb: Option<String>,

        /// TheMovieDatabase ID of the movie
        #[arg(long)]
        tmdb: Option<u64>,
    },

    /// Add a movie from the imdb/tmdb id, or look for keywords
    Add(AddMovieArgs),

    /// Edit a movie
    Edit(EditMovieArgs),

    /// Delete a movie
    Delete {
        /// ID of the movie to delete
        #[arg(short = 'i', long)]
        mid: u64,

        /// Also delete files on disk
        #[arg(short = 'f', long)]
        delfiles: bool,

        /// Prevent the movie from being added again by import lists
        #[arg(long)]
        exclude: bool,
    },

    /// Refresh movies
    Refresh {
        /// Movie ID, all movies when omitted
        #[arg(short = 'i', long)]
        mid: Option<u64>,
    },

    /// Rescan movies
    Rescan {
        /// Movie ID, all movies when omitted
        #[arg(short = 'i', long)]
        mid: Option<u64>,
    },

    /// Search for all missing movies
    MissingSearch,

    /// List the renames the server would apply to a movie
    RenamePreview {
        #[arg(short = 'i', long)]
        mid: u64,
    },

    /// Rename movie files
    Rename {
        /// Comma separated list of movie file ids
        #[arg(long, value_delimiter = ',', required = true)]
        files: Vec<u64>,
    },

    /// Exclude a movie from import lists
    AddExclusion {
        #[arg(long)]
        title: String,

        #[arg(long)]
        tmdb: u64,

        #[arg(long)]
        year: u32,
    },

    /// Get list of language profiles
    LanguageProfiles,

    #[command(flatten)]
    Common(CommonCommand),
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("search").required(true).args(["tmdb", "imdb", "terms"])))]
pub struct AddMovieArgs {
    /// TheMovieDatabase ID of the movie to add
    #[arg(long)]
    pub tmdb: Option<u64>,

    /// IMDB ID of the movie to add
    #[arg(long)]
    pub imdb: Option<String>,

    /// Keywords to search for the movie to add
    #[arg(long)]
    pub terms: Option<String>,

    /// Quality profile to use, prompted for when omitted
    #[arg(short, long)]
    pub quality: Option<u32>,

    /// Full path where the movie should be stored
    #[arg(long)]
    pub path: Option<String>,

    /// Root folder id, or 'auto' to pick from the server list
    #[arg(short, long, default_value = "0")]
    pub root: RootFolderChoice,

    /// Do not search for the movie once added
    #[arg(long)]
    pub no_search: bool,

    /// Add the movie without monitoring it
    #[arg(long)]
    pub unmonitored: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EditMovieArgs {
    /// ID of the movie to edit
    #[arg(short = 'i', long)]
    pub mid: u64,

    /// New quality profile
    #[arg(short, long)]
    pub quality: Option<u32>,

    /// New path of the movie folder
    #[arg(long)]
    pub path: Option<String>,

    /// Whether the movie is monitored
    #[arg(long)]
    pub monitored: Option<bool>,

    /// Move existing files to the new path
    #[arg(long)]
    pub move_files: bool,
}

#[derive(Subcommand, Debug)]
pub enum SonarrCommand {
    /// Get info on a serie, or all of them
    Get {
        /// ID of the serie to get info on
        #[arg(short = 'i', long)]
        sid: Option<u64>,
    },

    /// Search for series by keywords or tvdb id
    Lookup {
        /// Keywords to search for
        #[arg(long)]
        terms: Option<String>,

        /// TheTVDB ID of the serie
        #[arg(long)]
        tvdb: Option<u64>,
    },

    /// Add a serie from the tvdb id, or look for keywords
    Add(AddSerieArgs),

    /// Edit a serie
    Edit(EditSerieArgs),

    /// Delete a serie
    Delete {
        /// ID of the serie to delete
        #[arg(short = 'i', long)]
        sid: u64,

        /// Also delete files on disk
        #[arg(short = 'f', long)]
        delfiles: bool,

        /// Prevent the serie from being added again by import lists
        #[arg(long)]
        exclude: bool,
    },

    /// Refresh series
    Refresh {
        /// Serie ID, all series when omitted
        #[arg(short = 'i', long)]
        sid: Option<u64>,
    },

    /// Rescan series
    Rescan {
        /// Serie ID, all series when omitted
        #[arg(short = 'i', long)]
        sid: Option<u64>,
    },

    /// Get info on the episodes of a serie, or on one episode
    GetEpisode {
        #[arg(short = 'i', long)]
        sid: Option<u64>,

        #[arg(short = 'e', long)]
        epid: Option<u64>,
    },

    /// Get info on the episode files of a serie, or on one episode file
    GetEpisodeFile {
        #[arg(short = 'i', long)]
        sid: Option<u64>,

        #[arg(short = 'e', long)]
        epid: Option<u64>,
    },

    /// Delete an episode file
    DeleteEpisodeFile {
        /// ID of the episode file to delete
        #[arg(short = 'e', long)]
        epid: u64,
    },

    /// Search for all missing episodes
    MissingSearch,

    /// List the renames the server would apply to a serie
    RenamePreview {
        #[arg(short = 'i', long)]
        sid: u64,
    },

    /// Rename episode files of a serie
    Rename {
        #[arg(short = 'i', long)]
        sid: u64,

        /// Comma separated list of episode file ids
        #[arg(long, value_delimiter = ',', required = true)]
        files: Vec<u64>,
    },

    /// Exclude a serie from import lists
    AddExclusion {
        #[arg(long)]
        title: String,

        #[arg(long)]
        tvdb: u64,
    },

    #[command(flatten)]
    Common(CommonCommand),
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("search").required(true).args(["tvdb", "terms"])))]
pub struct AddSerieArgs {
    /// TheTVDB ID of the serie to add
    #[arg(long)]
    pub tvdb: Option<u64>,

    /// Keywords to search for the serie to add
    #[arg(long)]
    pub terms: Option<String>,

    /// Quality profile to use, prompted for when omitted
    #[arg(short, long)]
    pub quality: Option<u32>,

    /// Comma separated list of seasons numbers to monitor
    #[arg(short, long, value_delimiter = ',', value_parser = parse_season)]
    pub seasons: Vec<i64>,

    /// Create a folder for each season
    #[arg(short = 'f', long)]
    pub season_folders: bool,

    /// Full path where the serie should be stored
    #[arg(long)]
    pub path: Option<String>,

    /// Root folder id, or 'auto' to pick from the server list
    #[arg(short, long, default_value = "0")]
    pub root: RootFolderChoice,

    /// Do not search for missing episodes once added
    #[arg(long)]
    pub no_search: bool,

    /// Add the serie without monitoring it
    #[arg(long)]
    pub unmonitored: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EditSerieArgs {
    /// ID of the serie to edit
    #[arg(short = 'i', long)]
    pub sid: u64,

    /// New quality profile
    #[arg(short, long)]
    pub quality: Option<u32>,

    /// New path of the serie folder
    #[arg(long)]
    pub path: Option<String>,

    /// Whether the serie is monitored
    #[arg(long)]
    pub monitored: Option<bool>,

    /// Whether episodes are stored in season folders
    #[arg(long)]
    pub season_folders: Option<bool>,
}

/// Commands available on both servers.
#[derive(Subcommand, Debug)]
pub enum CommonCommand {
    /// Get list of quality profiles
    Profiles,

    /// Get system status
    SystemStatus,

    /// Get disk space
    DiskSpace,

    /// Get list of root folders
    RootFolders,

    /// Get current downloading queue
    Queue {
        #[command(flatten)]
        paging: PagingArgs,

        /// Leave out downloads the server could not match
        #[arg(long)]
        hide_unknown: bool,
    },

    /// Remove an item from the downloading queue
    Delqueue {
        /// Queue item ID
        #[arg(short, long)]
        id: u64,

        /// Also add the release to the blocklist
        #[arg(long)]
        blocklist: bool,
    },

    /// Get events from calendar
    Calendar {
        /// Start date, format like 2018-06-29
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,

        /// End date, format like 2018-06-29
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
    },

    /// List wanted/missing
    Wanted {
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Get history of grabs, failures and imports
    History {
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Get server logs
    Log {
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Get blocklisted releases
    Blocklist {
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Remove a release from the blocklist, or all of them
    Delblocklist {
        #[arg(short, long)]
        id: Option<u64>,
    },

    /// Get status of 1 or all currently running commands
    Status {
        /// Command ID
        #[arg(short, long)]
        id: Option<u64>,
    },

    /// Run an RSS sync on all enabled indexers
    RssSync,

    /// List backups
    Backup,

    /// Manage tags
    Tag {
        #[command(subcommand)]
        command: TagCommand,
    },

    /// Manage import list exclusions
    Exclusion {
        #[command(subcommand)]
        command: ExclusionCommand,
    },

    /// Manage notifications
    Notification {
        #[command(subcommand)]
        command: NotificationCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Get a tag, or all of them
    List {
        #[arg(short, long)]
        id: Option<u64>,
    },

    /// Get the items using a tag, or all tags
    Detail {
        #[arg(short, long)]
        id: Option<u64>,
    },

    /// Create a tag
    Create { label: String },

    /// Rename a tag
    Edit {
        #[arg(short, long)]
        id: u64,

        label: String,
    },

    /// Delete a tag
    Delete {
        #[arg(short, long)]
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExclusionCommand {
    /// Get an exclusion, or all of them
    List {
        #[arg(short, long)]
        id: Option<u64>,
    },

    /// Delete an exclusion
    Delete {
        #[arg(short, long)]
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    /// Get a notification, or all of them
    List {
        #[arg(short, long)]
        id: Option<u64>,
    },

    /// Delete a notification
    Delete {
        #[arg(short, long)]
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum DefaultsCommand {
    /// Set the default value of a flag, e.g. 'radarr.add.quality 4' or 'host http://nas:7878'
    Set { key: String, value: String },

    /// Show the default value of a flag
    Get { key: String },

    /// Remove the default value of a flag
    Unset { key: String },

    /// List all defaults
    List,
}

/// Paging flags; unset ones keep the endpoint defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct PagingArgs {
    /// Page to get
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Sort key
    #[arg(long)]
    pub sort_key: Option<String>,

    /// Sort direction
    #[arg(long)]
    pub sort_dir: Option<String>,
}

impl PagingArgs {
    pub fn over(&self, base: Paging) -> Paging {
        Paging {
            page: self.page.unwrap_or(base.page),
            page_size: self.page_size.unwrap_or(base.page_size),
            sort_key: self.sort_key.clone().unwrap_or(base.sort_key),
            sort_dir: self.sort_dir.clone().unwrap_or(base.sort_dir),
        }
    }
}

/// Root folder selection of the add commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootFolderChoice {
    /// Ask the user to pick one of the server root folders.
    Auto,
    Id(u32),
    /// The configured root folder, else the first one of the server.
    #[default]
    Default,
}

impl FromStr for RootFolderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(RootFolderChoice::Auto),
            "0" => Ok(RootFolderChoice::Default),
            other => other
                .parse::<u32>()
                .map(RootFolderChoice::Id)
                .map_err(|_| format!("invalid root folder '{}', expected an id or 'auto'", other)),
        }
    }
}

fn parse_season(s: &str) -> Result<i64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("invalid season number '{}'", s.trim()))
}

impl Cli {
    /// Parse the process arguments with persisted defaults applied.
    pub fn parse_with_defaults(defaults: &Defaults) -> Self {
        let matches = with_defaults(Cli::command(), defaults).get_matches();
        Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    pub fn try_parse_from_with_defaults<I, T>(args: I, defaults: &Defaults) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = with_defaults(Cli::command(), defaults).try_get_matches_from(args)?;
        Cli::from_arg_matches(&matches)
    }

    pub fn connection_args(&self) -> ConnectionArgs {
        ConnectionArgs {
            host: self.host.clone(),
            api_key: self.api_key.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

/// Install persisted defaults as the default values of the matching arguments.
///
/// Unknown keys and members of a required flag group are skipped with a warning.
pub fn with_defaults(cmd: Command, defaults: &Defaults) -> Command {
    defaults.iter().fold(cmd, |cmd, (key, value)| {
        if !is_known_key(&cmd, key) {
            warn!("Ignoring default for unknown flag '{}'", key);
            return cmd;
        }
        if is_grouped_key(&cmd, key) {
            warn!("Ignoring default for '{}': it belongs to a group of exclusive flags", key);
            return cmd;
        }
        let segments: Vec<&str> = key.split('.').collect();
        match segments.split_last() {
            Some((flag, path)) => set_default(cmd, path, flag, Defaults::arg_value(value)),
            None => cmd,
        }
    })
}

/// Whether `key` names a flag of `cmd`, as `<subcommand>...<flag>`.
pub fn is_known_key(cmd: &Command, key: &str) -> bool {
    resolve(cmd, key).is_some()
}

/// Whether `key` names a member of a required argument group, such as the
/// search flags of `add`. A default there would always collide with the group.
pub fn is_grouped_key(cmd: &Command, key: &str) -> bool {
    resolve(cmd, key).map_or(false, |(cmd, id)| {
        cmd.get_groups()
            .filter(|group| group.is_required_set())
            .any(|group| group.get_args().any(|arg| arg.as_str() == id))
    })
}

fn resolve<'a>(cmd: &'a Command, key: &str) -> Option<(&'a Command, String)> {
    let segments: Vec<&str> = key.split('.').collect();
    let (flag, path) = segments.split_last()?;
    let cmd = path.iter().try_fold(cmd, |cmd, name| cmd.find_subcommand(name))?;
    arg_id(cmd, flag).map(|id| (cmd, id))
}

fn set_default(cmd: Command, path: &[&str], flag: &str, value: String) -> Command {
    match path.split_first() {
        Some((name, rest)) => cmd.mut_subcommand(*name, |sub| set_default(sub, rest, flag, value)),
        None => match arg_id(&cmd, flag) {
            Some(id) => cmd.mut_arg(id, |arg| arg.default_value(value).required(false)),
            None => cmd,
        },
    }
}

fn arg_id(cmd: &Command, flag: &str) -> Option<String> {
    cmd.get_arguments()
        .find(|arg| arg.get_long() == Some(flag) || arg.get_id() == flag)
        .map(|arg| arg.get_id().as_str().to_string())
}
