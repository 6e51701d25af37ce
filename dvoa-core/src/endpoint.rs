//! Input source and output sink. A path of `-` selects stdin / stdout.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

const STD_STREAM: &str = "-";

/// Where the input payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    Path(PathBuf),
}

impl Source {
    pub fn parse(arg: impl AsRef<Path>) -> Self {
        let p = arg.as_ref();
        if p.as_os_str() == STD_STREAM {
            Source::Stdin
        } else {
            Source::Path(p.to_path_buf())
        }
    }

    /// Read the whole input.
    pub fn read_all(&self) -> Result<Vec<u8>, EndpointError> {
        let mut buf = Vec::new();
        let res = match self {
            Source::Stdin => io::stdin().lock().read_to_end(&mut buf).map(|_| ()),
            Source::Path(p) => fs::File::open(p).and_then(|mut f| f.read_to_end(&mut buf).map(|_| ())),
        };
        res.map_err(|source| EndpointError::Read {
            endpoint: self.to_string(),
            source,
        })?;
        Ok(buf)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Where the prediction text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    Path(PathBuf),
}

impl Sink {
    pub fn parse(arg: impl AsRef<Path>) -> Self {
        let p = arg.as_ref();
        if p.as_os_str() == STD_STREAM {
            Sink::Stdout
        } else {
            Sink::Path(p.to_path_buf())
        }
    }

    /// Create (or truncate) the sink and write `text` in full.
    pub fn write_all(&self, text: &str) -> Result<(), EndpointError> {
        let res = match self {
            Sink::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes()).and_then(|_| out.flush())
            }
            Sink::Path(p) => fs::File::create(p).and_then(|mut f| {
                f.write_all(text.as_bytes())?;
                f.flush()
            }),
        };
        res.map_err(|source| EndpointError::Write {
            endpoint: self.to_string(),
            source,
        })
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => f.write_str("<stdout>"),
            Sink::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// I/O failure on the input or output side.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("cannot read input {endpoint}: {source}")]
    Read {
        endpoint: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot write output {endpoint}: {source}")]
    Write {
        endpoint: String,
        #[source]
        source: io::Error,
    },
}
