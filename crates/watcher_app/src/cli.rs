use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::persistence::FormState;

#[derive(Debug, Parser)]
#[command(
    name = "site-watch",
    version,
    about = "Poll a web page and report when an element's text changes"
)]
pub struct Args {
    /// Page to poll.
    #[arg(long)]
    pub url: Option<String>,

    /// Element to watch: CSS, or a path expression such as //p[@id='status'].
    #[arg(long, short)]
    pub selector: Option<String>,

    /// Seconds to wait between checks.
    #[arg(long, short)]
    pub interval: Option<u64>,

    /// Watch the first matching element instead of the last.
    #[arg(long)]
    pub first: bool,

    /// Only notify when the changed text matches this regular expression.
    #[arg(long, short, conflicts_with = "no_filter")]
    pub filter: Option<String>,

    /// Forget a remembered filter pattern.
    #[arg(long)]
    pub no_filter: bool,

    /// Where engine logs go.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log debug detail.
    #[arg(long, short)]
    pub verbose: bool,

    /// File remembering the last used inputs.
    #[arg(long, default_value = ".watcher_state.ron")]
    pub state_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl Args {
    /// Command line values override the remembered ones.
    pub fn merge_into(&self, mut form: FormState) -> FormState {
        if let Some(url) = &self.url {
            form.url = url.clone();
        }
        if let Some(selector) = &self.selector {
            form.selector = selector.clone();
        }
        if let Some(interval) = self.interval {
            form.interval_seconds = Some(interval);
        }
        if self.first {
            form.select_first = true;
        }
        if self.no_filter {
            form.filter_pattern = None;
        } else if let Some(filter) = &self.filter {
            form.filter_pattern = Some(filter.clone());
        }
        form
    }
}
