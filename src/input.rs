//! Collects the markdown manuscript from the files named on the command line,
//! or from standard input when there are none.

use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reads the whole manuscript. When `paths` is non-empty, the result is the
/// concatenation of each file's contents in order; otherwise it is everything
/// read from `stdin`. A path of `-` reads `stdin` in place; once drained it
/// contributes nothing further. The bytes are decoded as UTF-8 only after
/// concatenation.
pub fn read_input<P: AsRef<Path>, R: Read>(
    paths: &[P],
    mut stdin: R,
) -> Result<String> {
    let mut contents: Vec<u8> = Vec::new();
    if paths.is_empty() {
        read_stdin(&mut stdin, &mut contents)?;
    } else {
        for path in paths {
            let path = path.as_ref();
            if path == Path::new(STDIN_PATH) {
                read_stdin(&mut stdin, &mut contents)?;
                continue;
            }
            let read = read_file(path, &mut contents)?;
            debug!("read {} bytes from `{}`", read, path.display());
        }
    }
    Ok(String::from_utf8(contents)?)
}

const STDIN_PATH: &str = "-";

fn read_stdin<R: Read>(stdin: &mut R, contents: &mut Vec<u8>) -> Result<usize> {
    let read = stdin.read_to_end(contents).map_err(|err| Error::Read {
        source: Source::Stdin,
        err,
    })?;
    debug!("read {} bytes from standard input", read);
    Ok(read)
}

// The file is closed when it goes out of scope, including on error.
fn read_file(path: &Path, contents: &mut Vec<u8>) -> Result<usize> {
    let mut file = File::open(path).map_err(|err| Error::Open {
        path: path.to_owned(),
        err,
    })?;
    file.read_to_end(contents).map_err(|err| Error::Read {
        source: Source::File(path.to_owned()),
        err,
    })
}

/// Where input was being read from when an error occurred.
#[derive(Debug)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("standard input"),
            Source::File(path) => write!(f, "input file '{}'", path.display()),
        }
    }
}

/// The result of a fallible input operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error collecting input.
#[derive(Debug)]
pub enum Error {
    /// Returned when an input file can't be opened (e.g., it doesn't exist).
    Open { path: PathBuf, err: io::Error },

    /// Returned when reading from an input file or standard input fails.
    Read { source: Source, err: io::Error },

    /// Returned when the collected input isn't valid UTF-8.
    InvalidUtf8(std::string::FromUtf8Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening input file '{}': {}", path.display(), err)
            }
            Error::Read { source, err } => {
                write!(f, "Reading {}: {}", source, err)
            }
            Error::InvalidUtf8(err) => write!(f, "Decoding input: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Read { source: _, err } => Some(err),
            Error::InvalidUtf8(err) => Some(err),
        }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    /// Converts a [`std::string::FromUtf8Error`] into an [`Error`]. It allows
    /// us to use the `?` operator when decoding the collected bytes.
    fn from(err: std::string::FromUtf8Error) -> Error {
        Error::InvalidUtf8(err)
    }
}
