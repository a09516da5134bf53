//! Converts markdown to HTML. The pipeline only depends on the [`Render`]
//! trait; [`Markdown`] is the real implementation backed by
//! [`pulldown_cmark`].
//!
//! CommonMark requires whitespace between the `#` run and the heading text,
//! so `#hashtag` at the start of a line renders as a paragraph rather than a
//! heading. Bare URLs aren't links in CommonMark, so [`Markdown`] intercepts
//! the text events and rewrites them with [`Autolinker`].

use crate::autolink::{Autolinker, Segment};
use log::debug;
use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag};
use std::fmt;

/// Renders markdown text into an HTML fragment.
pub trait Render {
    fn render(&self, markdown: &str) -> String;
}

/// Options for [`Markdown`].
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Convert bare URLs and e-mail addresses into links.
    pub autolink: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { autolink: true }
    }
}

/// A [`Render`] implementation backed by [`pulldown_cmark`].
pub struct Markdown {
    autolinker: Option<Autolinker>,
}

impl Markdown {
    pub fn new(options: RenderOptions) -> Result<Markdown, Error> {
        Ok(Markdown {
            autolinker: match options.autolink {
                true => Some(Autolinker::new()?),
                false => None,
            },
        })
    }
}

impl Render for Markdown {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::empty());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        match &self.autolinker {
            Some(autolinker) => {
                let converter = EventConverter { autolinker };
                html::push_html(&mut out, converter.convert(parser).into_iter())
            }
            None => html::push_html(&mut out, parser),
        }
        debug!(
            "rendered {} bytes of markdown into {} bytes of HTML",
            markdown.len(),
            out.len()
        );
        out
    }
}

struct EventConverter<'r> {
    autolinker: &'r Autolinker,
}

impl<'r> EventConverter<'r> {
    /// Rewrites the text events of `events` so bare URLs become links.
    /// Adjacent text events are merged first since the parser may split a
    /// single URL across several of them (e.g., at `_` or `&`). Text nested in
    /// links, images, and code blocks is passed through untouched.
    fn convert<'a>(
        &self,
        events: impl Iterator<Item = Event<'a>>,
    ) -> Vec<Event<'a>> {
        let mut out = Vec::new();
        let mut pending = String::new();
        let mut opaque = 0usize;
        for ev in events {
            if opaque == 0 {
                if let Event::Text(text) = &ev {
                    pending.push_str(text);
                    continue;
                }
            }
            self.flush(&mut pending, &mut out);

            match &ev {
                Event::Start(Tag::Link(..))
                | Event::Start(Tag::Image(..))
                | Event::Start(Tag::CodeBlock(_)) => opaque += 1,
                Event::End(Tag::Link(..))
                | Event::End(Tag::Image(..))
                | Event::End(Tag::CodeBlock(_)) => {
                    opaque = opaque.saturating_sub(1)
                }
                _ => {}
            }
            out.push(ev);
        }
        self.flush(&mut pending, &mut out);
        out
    }

    fn flush<'a>(&self, pending: &mut String, out: &mut Vec<Event<'a>>) {
        if pending.is_empty() {
            return;
        }
        for segment in self.autolinker.split(pending.as_str()) {
            match segment {
                Segment::Text(text) => out.push(text_event(text)),
                Segment::Link { text, href } => {
                    let tag = Tag::Link(
                        LinkType::Autolink,
                        CowStr::from(href),
                        CowStr::Borrowed(""),
                    );
                    out.push(Event::Start(tag.clone()));
                    out.push(text_event(text));
                    out.push(Event::End(tag));
                }
                Segment::Email(address) => {
                    let tag = Tag::Link(
                        LinkType::Email,
                        CowStr::from(address.to_owned()),
                        CowStr::Borrowed(""),
                    );
                    out.push(Event::Start(tag.clone()));
                    out.push(text_event(address));
                    out.push(Event::End(tag));
                }
            }
        }
        pending.clear();
    }
}

fn text_event<'a>(text: &str) -> Event<'a> {
    Event::Text(CowStr::from(text.to_owned()))
}

/// Represents an error constructing a [`Markdown`] renderer.
#[derive(Debug)]
pub enum Error {
    /// Returned when the autolink pattern fails to compile.
    Autolink(regex::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Autolink(err) => write!(f, "Compiling autolink pattern: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Autolink(err) => Some(err),
        }
    }
}

impl From<regex::Error> for Error {
    /// Converts a [`regex::Error`] into an [`Error`]. It allows us to use the
    /// `?` operator when compiling patterns.
    fn from(err: regex::Error) -> Error {
        Error::Autolink(err)
    }
}
