// Command-line arguments.
// Parses the username, optional event filter, and cache/HTTP settings.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};

use crate::cache::DEFAULT_CACHE_DIR;
use crate::github::DEFAULT_TIMEOUT;

#[derive(Parser, Debug)]
#[command(name = "ghfeed")]
#[command(version, about = "Show a GitHub user's recent activity", long_about = None)]
pub struct Cli {
    /// GitHub username
    pub username: String,

    /// Only show events of this type, e.g. PushEvent (case-insensitive)
    #[arg(long, value_name = "EventType")]
    pub filter: Option<String>,

    /// Directory holding cached feeds
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse_ordered() -> Result<Self, clap::Error> {
        Self::parse_ordered_from(std::env::args_os())
    }

    /// Parse arguments, rejecting a `--filter` placed before the username.
    pub fn parse_ordered_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = Self::command();
        let matches = command.try_get_matches_from_mut(args)?;

        if let (Some(filter), Some(username)) =
            (matches.index_of("filter"), matches.index_of("username"))
        {
            if filter < username {
                return Err(command.error(
                    ErrorKind::ArgumentConflict,
                    "--filter <EventType> must come after <USERNAME>",
                ));
            }
        }

        Self::from_arg_matches(&matches)
    }
}
