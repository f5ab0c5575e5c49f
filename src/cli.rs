use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use rs_doctagger::{Format, MatchMode, Options};

#[derive(Parser, Debug)]
#[command(name = "doctagger")]
#[command(about = "Tag documentation pages with deployment type, roles, areas, topics and keywords")]
#[command(version)]
pub struct Cli {
    /// File with one page URL per line
    #[arg(long, value_name = "FILE")]
    pub urls: PathBuf,

    /// User-role vocabulary (one term per line)
    #[arg(long, value_name = "FILE")]
    pub roles: Option<PathBuf>,

    /// Functional-area vocabulary (one term per line)
    #[arg(long, value_name = "FILE")]
    pub areas: Option<PathBuf>,

    /// Topic vocabulary (one term per line)
    #[arg(long, value_name = "FILE")]
    pub topics: Option<PathBuf>,

    /// Report path
    #[arg(short, long, default_value = "report.csv")]
    pub output: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pages processed at once (report order is unaffected)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Ask an LLM to classify pages without deployment markers
    #[arg(long)]
    pub llm_fallback: bool,

    /// Per-request fetch timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Report only the N most frequent roles
    #[arg(long, value_name = "N")]
    pub roles_top: Option<NonZeroUsize>,

    /// Report only the N most frequent topics
    #[arg(long, value_name = "N")]
    pub topics_top: Option<NonZeroUsize>,

    /// Skip the Keywords column
    #[arg(long)]
    pub no_keywords: bool,

    /// Add the extracted page text as a column
    #[arg(long)]
    pub include_content: bool,

    /// Verbose logging (use -v for INFO, -vv for DEBUG)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Overlay command-line flags onto `options`.
    pub fn apply(&self, mut options: Options) -> Options {
        if let Some(secs) = self.timeout {
            options.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = self.concurrency {
            options.concurrency = n;
        }
        if self.llm_fallback {
            options.run_llm_fallback = true;
        }
        if let Some(n) = self.roles_top {
            options.roles_mode = MatchMode::TopN(n.get());
        }
        if let Some(n) = self.topics_top {
            options.topics_mode = MatchMode::TopN(n.get());
        }
        if self.no_keywords {
            options.generate_keywords = false;
        }
        if self.include_content {
            options.include_content = true;
        }
        options
    }

    /// Log filter for the `-v` count; `RUST_LOG` takes precedence.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        match Cli::try_parse_from(args.iter().copied()) {
            Ok(cli) => cli,
            Err(err) => panic!("expected Ok(_), got Err({err})"),
        }
    }

    #[test]
    fn flags_override_options() {
        let cli = parse(&[
            "doctagger", "--urls", "urls.txt", "--timeout", "3", "-j", "4", "--roles-top", "2",
            "--llm-fallback", "--no-keywords",
        ]);
        let options = cli.apply(Options::default());
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert_eq!(options.concurrency, 4);
        assert_eq!(options.roles_mode, MatchMode::TopN(2));
        assert_eq!(options.topics_mode, MatchMode::All);
        assert!(options.run_llm_fallback);
        assert!(!options.generate_keywords);
    }

    #[test]
    fn defaults_leave_options_untouched() {
        let cli = parse(&["doctagger", "--urls", "urls.txt"]);
        assert_eq!(cli.output, PathBuf::from("report.csv"));
        assert_eq!(cli.format, OutputFormat::Csv);
        let options = cli.apply(Options::default());
        assert_eq!(options.concurrency, 1);
        assert!(!options.run_llm_fallback);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn urls_flag_is_required() {
        assert!(Cli::try_parse_from(["doctagger"]).is_err());
    }

    #[test]
    fn zero_top_limits_are_rejected() {
        for flag in ["--roles-top", "--topics-top"] {
            let result = Cli::try_parse_from(["doctagger", "--urls", "u", flag, "0"]);
            assert!(result.is_err(), "{flag} 0 should not parse");
        }
        let cli = parse(&["doctagger", "--urls", "u", "--topics-top", "1"]);
        assert_eq!(cli.apply(Options::default()).topics_mode, MatchMode::TopN(1));
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["doctagger", "--urls", "u", "-vv"]).log_filter(), "debug");
    }
}
