use super::*;
use anyhow::Context;
use std::io::{Read, Write};

/// A file path, or '-' for stdin.
#[derive(Debug, Clone)]
pub enum Input {
    StdIn,
    Path(PathBuf),
}

impl Input {
    pub fn read_all(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Self::StdIn => {
                let mut buffer = Vec::new();
                std::io::stdin()
                    .lock()
                    .read_to_end(&mut buffer)
                    .context("Failed to read from stdin")?;
                Ok(buffer)
            }
            Self::Path(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read from '{}'", path.display())),
        }
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StdIn => f.write_str("stdin"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl std::str::FromStr for Input {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => Self::StdIn,
            path => Self::Path(path.into()),
        })
    }
}

/// Where to write a bundle: a file, or stdout when no path is given.
#[derive(Debug, Clone, Default)]
pub struct Output(Option<PathBuf>);

impl Output {
    pub fn write_all(&self, buf: &[u8]) -> anyhow::Result<()> {
        match &self.0 {
            Some(path) => std::fs::write(path, buf)
                .with_context(|| format!("Failed to write to '{}'", path.display())),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(buf)
                    .and_then(|_| stdout.flush())
                    .context("Failed to write to stdout")
            }
        }
    }
}

impl std::str::FromStr for Output {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(match s {
            "" | "-" => None,
            path => Some(path.into()),
        }))
    }
}
