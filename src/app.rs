// Entry-point orchestration.
// Fetches a user's feed, renders it, and reports handled failures.

use std::io::Write;

use log::debug;

use crate::activity::{ActivityFetcher, render};
use crate::cache::CacheStore;
use crate::cli::Cli;
use crate::error::Result;
use crate::github::EventSource;

/// Header printed above a non-empty feed.
pub const HEADER: &str = "Recent GitHub Activity:";

/// Run one invocation, writing user-facing output to `out`.
///
/// A note on where the feed came from precedes it. Fetch failures are
/// printed and swallowed; only a failed cache write or a
/// failed write to `out` comes back as an error.
pub async fn run<S: EventSource>(cli: &Cli, source: S, out: &mut impl Write) -> Result<()> {
    let cache = CacheStore::new(&cli.cache_dir);
    debug!("using cache directory {}", cache.dir().display());

    let mut fetcher = ActivityFetcher::new(source, cache);
    let activity = match fetcher.fetch(&cli.username).await {
        Ok(activity) => activity,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            debug!("fetch for {} failed: {:?}", cli.username, e);
            writeln!(out, "{}", e)?;
            return Ok(());
        }
    };
    debug!(
        "{} events for {} from {:?}",
        activity.events.len(),
        cli.username,
        activity.origin
    );

    writeln!(out, "{}", activity.origin.notice())?;
    if !activity.events.is_empty() {
        writeln!(out, "\n{}", HEADER)?;
    }
    for line in render(&activity.events, cli.filter.as_deref()) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
