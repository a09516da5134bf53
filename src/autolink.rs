//! Detects bare URLs and e-mail addresses in text so they can be turned into
//! links. See [`Autolinker::split`].

use regex::Regex;

// URL bodies are limited to printable ASCII minus `<` and `>` so that a URL
// directly followed by Japanese text doesn't swallow it. Case folding is
// ASCII-only so e.g. the Kelvin sign doesn't match `k`.
const PATTERN: &str = concat!(
    r"(?i-u)(?P<url>\b(?:https?|ftp)://[!-;=?-~]+|\bwww\.[!-;=?-~]+)",
    r"|(?P<email>[a-z0-9._%+\-]+@[a-z0-9\-]+(?:\.[a-z0-9\-]+)+)",
);

const WWW: &str = "www.";

/// Characters which are never the last character of a link.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?', '\'', '"'];

/// A piece of text as split by [`Autolinker::split`].
#[derive(Debug, PartialEq)]
pub enum Segment<'a> {
    /// Plain text which should be rendered as-is.
    Text(&'a str),

    /// A link. `text` is the text as it appeared in the input; `href` is the
    /// link destination.
    Link { text: &'a str, href: String },

    /// An e-mail address. The destination is `mailto:{address}`.
    Email(&'a str),
}

/// Finds linkable spans in plain text.
pub struct Autolinker {
    pattern: Regex,
}

impl Autolinker {
    /// Constructs a new [`Autolinker`].
    pub fn new() -> Result<Autolinker, regex::Error> {
        Ok(Autolinker {
            pattern: Regex::new(PATTERN)?,
        })
    }

    /// Splits `text` into plain-text and link [`Segment`]s. Concatenating the
    /// text of all segments yields `text` again.
    pub fn split<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut last = 0;
        for caps in self.pattern.captures_iter(text) {
            let (m, is_email) = match (caps.name("url"), caps.name("email")) {
                (Some(m), _) => (m, false),
                (None, Some(m)) => (m, true),
                (None, None) => continue,
            };

            let candidate = match is_email {
                true => m.as_str(),
                false => trim_trailing(m.as_str()),
            };
            if !is_email && !has_host(candidate) {
                continue;
            }

            if m.start() > last {
                segments.push(Segment::Text(&text[last..m.start()]));
            }
            segments.push(match is_email {
                true => Segment::Email(candidate),
                false => Segment::Link {
                    text: candidate,
                    href: href(candidate),
                },
            });
            last = m.start() + candidate.len();
        }

        if last < text.len() {
            segments.push(Segment::Text(&text[last..]));
        }
        segments
    }
}

fn trim_trailing(candidate: &str) -> &str {
    let mut end = candidate.len();
    loop {
        let s = &candidate[..end];
        match s.chars().last() {
            Some(c) if TRAILING_PUNCTUATION.contains(&c) => end -= c.len_utf8(),
            Some(')') if s.matches('(').count() < s.matches(')').count() => {
                end -= 1
            }
            _ => return s,
        }
    }
}

fn is_www(candidate: &str) -> bool {
    candidate
        .get(..WWW.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(WWW))
}

// False when everything after the scheme (or `www.`) was trimmed away, e.g.
// `http://.`
fn has_host(candidate: &str) -> bool {
    let prefix = match is_www(candidate) {
        true => WWW.len(),
        false => match candidate.find("://") {
            Some(i) => i + "://".len(),
            None => return false,
        },
    };
    candidate.len() > prefix
}

fn href(candidate: &str) -> String {
    match is_www(candidate) {
        true => format!("http://{}", candidate),
        false => candidate.to_owned(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn link<'a>(text: &'a str, href: &str) -> Segment<'a> {
        Segment::Link {
            text,
            href: href.to_owned(),
        }
    }

    #[test]
    fn test_split_no_links() -> Result<(), regex::Error> {
        assert_eq!(
            vec![Segment::Text("nothing to see here")],
            Autolinker::new()?.split("nothing to see here")
        );
        Ok(())
    }

    #[test]
    fn test_split_schemes() -> Result<(), regex::Error> {
        let autolinker = Autolinker::new()?;
        for url in &["http://example.com", "https://example.com/a?b=c#d", "ftp://example.com/x"] {
            assert_eq!(vec![link(url, url)], autolinker.split(url));
        }
        Ok(())
    }

    #[test]
    fn test_split_surrounding_text() -> Result<(), regex::Error> {
        assert_eq!(
            vec![
                Segment::Text("Hello "),
                link("http://example.com", "http://example.com"),
                Segment::Text(" world."),
            ],
            Autolinker::new()?.split("Hello http://example.com world.")
        );
        Ok(())
    }

    #[test]
    fn test_split_trailing_punctuation() -> Result<(), regex::Error> {
        assert_eq!(
            vec![
                Segment::Text("See "),
                link("http://example.com/docs", "http://example.com/docs"),
                Segment::Text("!?."),
            ],
            Autolinker::new()?.split("See http://example.com/docs!?.")
        );
        Ok(())
    }

    #[test]
    fn test_split_parentheses() -> Result<(), regex::Error> {
        let autolinker = Autolinker::new()?;
        assert_eq!(
            vec![
                Segment::Text("(see "),
                link("http://example.com", "http://example.com"),
                Segment::Text(")"),
            ],
            autolinker.split("(see http://example.com)")
        );
        assert_eq!(
            vec![link(
                "https://en.wikipedia.org/wiki/Rust_(language)",
                "https://en.wikipedia.org/wiki/Rust_(language)"
            )],
            autolinker.split("https://en.wikipedia.org/wiki/Rust_(language)")
        );
        Ok(())
    }

    #[test]
    fn test_split_www() -> Result<(), regex::Error> {
        assert_eq!(
            vec![
                Segment::Text("visit "),
                link("www.example.com", "http://www.example.com"),
            ],
            Autolinker::new()?.split("visit www.example.com")
        );
        Ok(())
    }

    #[test]
    fn test_split_email() -> Result<(), regex::Error> {
        assert_eq!(
            vec![
                Segment::Text("mail "),
                Segment::Email("someone@example.com"),
                Segment::Text("."),
            ],
            Autolinker::new()?.split("mail someone@example.com.")
        );
        Ok(())
    }

    #[test]
    fn test_split_stops_at_non_ascii() -> Result<(), regex::Error> {
        assert_eq!(
            vec![
                Segment::Text("詳細は"),
                link("http://scalikejdbc.org/", "http://scalikejdbc.org/"),
                Segment::Text("を参照。"),
            ],
            Autolinker::new()?.split("詳細はhttp://scalikejdbc.org/を参照。")
        );
        Ok(())
    }

    #[test]
    fn test_split_email_ascii_only() -> Result<(), regex::Error> {
        let autolinker = Autolinker::new()?;
        assert_eq!(
            vec![Segment::Text("Kelvin \u{212A}@a.co")],
            autolinker.split("Kelvin \u{212A}@a.co")
        );
        assert_eq!(
            vec![Segment::Text("\u{017F}@a.co")],
            autolinker.split("\u{017F}@a.co")
        );
        Ok(())
    }

    #[test]
    fn test_split_bare_scheme() -> Result<(), regex::Error> {
        assert_eq!(
            vec![Segment::Text("http://.")],
            Autolinker::new()?.split("http://.")
        );
        Ok(())
    }
}
