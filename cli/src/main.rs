use clap::Parser;

use filesys_db::FileSysDb;
use filesys_db_cli::commands::{Command, run};
use filesys_db_core::config::StoreConfig;

#[derive(Debug, Parser)]
#[command(name = "filesys-db")]
struct Args {
    /// SQLite database file path (created if missing)
    #[arg(long)]
    db: std::path::PathBuf,

    /// Store config file path (.toml or .json), parsed as filesys_db_core::config::StoreConfig.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => filesys_db_cli::config_io::load_config(path)?,
        None => StoreConfig::default(),
    };

    tracing::debug!(db = %args.db.display(), "opening store");
    let mut fs = FileSysDb::open_or_create_with_config(&args.db, &config)?;
    let mut stdout = std::io::stdout().lock();
    let result = run(&mut fs, args.command, &mut stdout);
    fs.close()?;
    result
}
