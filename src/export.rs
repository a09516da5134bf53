//! Exports the [`export`] function which stitches together the steps of
//! producing the HTML document: collecting the manuscript ([`crate::input`]),
//! rendering it ([`crate::markdown`]), tagging chapter headings
//! ([`crate::chapter`]), and wrapping the result in the document shell
//! ([`crate::document`]).

use crate::chapter::tag_chapters;
use crate::config::Metadata;
use crate::document::{Error as DocumentError, Shell};
use crate::input::{self, Error as InputError};
use crate::markdown::Render;
use log::debug;
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

/// Renders `markdown` with `renderer`, tags the chapter headings, and wraps
/// the result in `shell` using `metadata`.
pub fn export_html<R: Render + ?Sized>(
    renderer: &R,
    shell: &Shell,
    metadata: &Metadata,
    markdown: &str,
) -> Result<String> {
    let fragment = tag_chapters(&renderer.render(markdown));
    Ok(shell.assemble(metadata, &fragment)?)
}

/// Reads the manuscript from `paths` (or `stdin` if there are none), exports
/// it with [`export_html`], and writes the document to `out` in a single
/// write. Nothing is written if any step fails.
pub fn export<R, P, I, W>(
    renderer: &R,
    shell: &Shell,
    metadata: &Metadata,
    paths: &[P],
    stdin: I,
    mut out: W,
) -> Result<()>
where
    R: Render + ?Sized,
    P: AsRef<Path>,
    I: Read,
    W: Write,
{
    let markdown = input::read_input(paths, stdin)?;
    let document = export_html(renderer, shell, metadata, &markdown)?;
    debug!("writing {} bytes of HTML", document.len());
    out.write_all(document.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// The result of a fallible export operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for exporting a document. Errors can occur while
/// collecting input, assembling the document, or writing the output.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors reading the manuscript.
    Input(InputError),

    /// Returned for errors assembling the document.
    Document(DocumentError),

    /// Returned for I/O problems while writing the document.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Input(err) => err.fmt(f),
            Error::Document(err) => err.fmt(f),
            Error::Io(err) => write!(f, "Writing document: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Input(err) => Some(err),
            Error::Document(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<InputError> for Error {
    /// Converts [`InputError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: InputError) -> Error {
        Error::Input(err)
    }
}

impl From<DocumentError> for Error {
    /// Converts [`DocumentError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: DocumentError) -> Error {
        Error::Document(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
