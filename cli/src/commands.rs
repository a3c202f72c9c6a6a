use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use filesys_db::store::Store;
use filesys_db::{DeleteOutcome, FileSysDb};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create or replace a file
    Write {
        path: String,
        /// Store this string as a text file
        #[arg(long, conflicts_with = "from")]
        text: Option<String>,
        /// Store the bytes of this local file as a binary file
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Print a file
    Read {
        path: String,
        /// Write the raw bytes instead of decoding UTF-8
        #[arg(long)]
        bytes: bool,
    },
    /// List paths under a prefix, optionally filtered by a pattern
    Ls {
        prefix: String,
        #[arg(default_value = "")]
        pattern: String,
    },
    Cp {
        source: String,
        dest: String,
    },
    Mv {
        source: String,
        dest: String,
        #[arg(long)]
        overwrite: bool,
    },
    Rm {
        path: String,
    },
    /// Print path, size and binary flag as JSON
    Stat {
        path: String,
    },
}

pub fn run<S: Store>(
    fs: &mut FileSysDb<S>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Write { path, text, from } => match (text, from) {
            (Some(text), None) => fs.write_text(&path, &text)?,
            (None, Some(from)) => {
                let bytes = std::fs::read(&from)?;
                fs.write_bytes(&path, &bytes)?;
            }
            (None, None) => anyhow::bail!("write needs --text or --from"),
            (Some(_), Some(_)) => anyhow::bail!("--text and --from are mutually exclusive"),
        },
        Command::Read { path, bytes } => {
            if bytes {
                out.write_all(&fs.read_bytes(&path)?)?;
            } else {
                writeln!(out, "{}", fs.read_text(&path)?)?;
            }
        }
        Command::Ls { prefix, pattern } => {
            for path in fs.list(&prefix, &pattern)? {
                writeln!(out, "{path}")?;
            }
        }
        Command::Cp { source, dest } => fs.copy(&source, &dest)?,
        Command::Mv {
            source,
            dest,
            overwrite,
        } => fs.move_file(&source, &dest, overwrite)?,
        Command::Rm { path } => {
            if fs.delete(&path)? == DeleteOutcome::NotFound {
                writeln!(out, "no file found with the path: {path}")?;
            }
        }
        Command::Stat { path } => {
            let Some(meta) = fs.stat(&path)? else {
                anyhow::bail!("file not found: {path}");
            };
            writeln!(out, "{}", serde_json::to_string(&meta)?)?;
        }
    }
    Ok(())
}
