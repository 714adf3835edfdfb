use std::fs::{self, File};
use std::path::PathBuf;
use std::{env, io};

use bid_scraper::{
    parse_bids, scrap_bids, FileMode, HandlerConfig, HttpPage, LogScheduler, PageLocation,
    RecordWriter, TaskWriter,
};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use tokio::runtime;

/// Warnings from the library, plus the details tasks `LogScheduler` reports.
const DEFAULT_LOG_FILTER: &str = "bid_scraper=warn,bid_scraper::scheduler=info";

fn init_logger() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", DEFAULT_LOG_FILTER);
    }
    env_logger::init();
}

/// Etowah County bids scraper
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Args {
    #[clap(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    #[clap(name = "scrap")]
    Scrap(ScrapArgs),
    #[clap(name = "parse")]
    Parse(ParseArgs),
    #[clap(hide = true)]
    Completion,
}

/// Scrap the live bids listing and schedule details tasks
#[derive(Debug, clap::Args)]
pub struct ScrapArgs {
    /// Override the listing page url
    #[clap(long)]
    pub url: Option<String>,
    /// Optional yaml configuration file
    #[clap(env = "BID_SCRAPER_CONFIG", parse(from_os_str), long)]
    pub config: Option<PathBuf>,
    /// Override the user agent used to download pages
    #[clap(long)]
    pub user_agent: Option<String>,
    /// Path to the output file that will contain bids as json, stdout otherwise
    #[clap(parse(from_os_str), long, short)]
    pub output_file: Option<PathBuf>,
    /// Path to the file receiving details tasks as json lines, logged otherwise
    #[clap(parse(from_os_str), long, short)]
    pub tasks_file: Option<PathBuf>,
    /// How output files are opened
    #[clap(arg_enum, long, default_value = "truncate")]
    pub file_mode: FileMode,
    /// When quiet no logs are outputted
    #[clap(long, short)]
    pub quiet: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<HandlerConfig> {
    match path {
        Some(path) => Ok(serde_yaml::from_reader(File::open(path)?)?),
        None => Ok(HandlerConfig::default()),
    }
}

impl TryFrom<&ScrapArgs> for HandlerConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ScrapArgs) -> Result<Self, Self::Error> {
        let mut conf = load_config(args.config.as_ref())?;
        if let Some(url) = &args.url {
            conf.listing_url = url.to_string();
        }
        if let Some(user_agent) = &args.user_agent {
            conf.user_agent = user_agent.to_string();
        }
        Ok(conf)
    }
}

pub fn scrap(args: ScrapArgs) -> anyhow::Result<()> {
    let conf: HandlerConfig = (&args).try_into()?;
    let mut page = HttpPage::new(&conf.user_agent)?;

    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    let bids = match &args.tasks_file {
        Some(path) => {
            let tasks = TaskWriter::new(path, args.file_mode)?;
            let bids = rt.block_on(scrap_bids(&mut page, &tasks, &conf));
            tasks.finish()?;
            bids?
        }
        None => rt.block_on(scrap_bids(&mut page, &LogScheduler, &conf))?,
    };

    RecordWriter::open(args.output_file.as_deref(), args.file_mode)?.write_bids(&bids)
}

/// Extract bids from a saved listing page, without network access
#[derive(Debug, clap::Args)]
pub struct ParseArgs {
    /// A local html page to parse
    #[clap(parse(from_os_str), long)]
    pub file: PathBuf,
    /// Optional yaml configuration file
    #[clap(env = "BID_SCRAPER_CONFIG", parse(from_os_str), long)]
    pub config: Option<PathBuf>,
    /// Path to the output file that will contain bids as json, stdout otherwise
    #[clap(parse(from_os_str), long, short)]
    pub output_file: Option<PathBuf>,
    /// How the output file is opened
    #[clap(arg_enum, long, default_value = "truncate")]
    pub file_mode: FileMode,
}

pub fn parse(args: ParseArgs) -> anyhow::Result<()> {
    let conf = load_config(args.config.as_ref())?;
    let page = fs::read_to_string(&args.file)?;
    let bids = parse_bids(&page, &conf.extractor);
    log::info!(
        "Found {} bids in {}",
        bids.len(),
        PageLocation::Path(args.file)
    );
    RecordWriter::open(args.output_file.as_deref(), args.file_mode)?.write_bids(&bids)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        SubCommand::Scrap(args) => {
            if !args.quiet {
                init_logger();
            }
            scrap(args)
        }
        SubCommand::Parse(args) => {
            init_logger();
            parse(args)
        }
        SubCommand::Completion => {
            generate(Shell::Bash, &mut Args::command(), "bid-scraper", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, Log, Metadata};

    use super::*;

    fn enabled(filter: &str, target: &str, level: Level) -> bool {
        let logger = env_logger::Builder::new().parse_filters(filter).build();
        logger.enabled(&Metadata::builder().level(level).target(target).build())
    }

    #[test]
    fn default_filter_shows_scheduled_tasks() {
        assert!(enabled(DEFAULT_LOG_FILTER, "bid_scraper::scheduler", Level::Info));
        assert!(!enabled(DEFAULT_LOG_FILTER, "bid_scraper::handler", Level::Info));
        assert!(enabled(DEFAULT_LOG_FILTER, "bid_scraper::extractor", Level::Warn));
    }

    #[test]
    fn parse_accepts_file_mode() {
        let args = Args::try_parse_from([
            "bid-scraper",
            "parse",
            "--file",
            "listing.html",
            "--file-mode",
            "append",
        ])
        .unwrap();
        match args.cmd {
            SubCommand::Parse(args) => assert_eq!(args.file_mode, FileMode::Append),
            cmd => panic!("Unexpected subcommand {cmd:?}"),
        }
    }
}
