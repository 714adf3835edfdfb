use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bid::BidItem;
use crate::scheduler::TaskRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ArgEnum))]
pub enum FileMode {
    /// Fails if the file already exists
    Create,
    #[default]
    Truncate,
    Append,
}

impl From<FileMode> for fs::OpenOptions {
    fn from(mode: FileMode) -> Self {
        let mut opts = fs::OpenOptions::new();
        match mode {
            FileMode::Create => opts.write(true).create_new(true),
            FileMode::Truncate => opts.write(true).create(true).truncate(true),
            FileMode::Append => opts.append(true).create(true),
        };
        opts
    }
}

pub enum RecordWriter {
    File(BufWriter<fs::File>),
    Stdout(io::Stdout),
}

impl RecordWriter {
    /// Opens `path` with `mode`, or stdout when there is no path.
    pub fn open(path: Option<&Path>, mode: FileMode) -> io::Result<Self> {
        match path {
            Some(path) => {
                let opts: fs::OpenOptions = mode.into();
                Ok(Self::File(BufWriter::new(opts.open(path)?)))
            }
            None => Ok(Self::Stdout(io::stdout())),
        }
    }

    /// Writes the bids as one pretty JSON array.
    pub fn write_bids(&mut self, bids: &[BidItem]) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *self, bids)?;
        self.write_all(b"\n")?;
        self.flush()?;
        Ok(())
    }

    /// Writes the task as a single JSON line.
    pub fn write_task(&mut self, task: &TaskRequest) -> anyhow::Result<()> {
        serde_json::to_writer(&mut *self, task)?;
        self.write_all(b"\n")?;
        Ok(())
    }
}

impl Write for RecordWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File(wtr) => wtr.write(buf),
            Self::Stdout(wtr) => wtr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File(wtr) => wtr.flush(),
            Self::Stdout(wtr) => wtr.flush(),
        }
    }
}
