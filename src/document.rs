//! Wraps a rendered HTML fragment in the document shell expected by the
//! e-book build: edition metadata in the `<head>` and a link to
//! `styles/epub.css`. Metadata is inserted verbatim; it comes from trusted
//! constants (or the author's own overrides file) so nothing is escaped.

use crate::config::Metadata;
use gtmpl::{Context, Template, Value};
use std::collections::HashMap;
use std::fmt;

const DOCUMENT_SHELL: &str = r#"<html>
<head>
<title>{{.title}}</title>
<meta name="Author" content="{{.author}}">
<meta name="DC.date.publication" content="{{.publication_date}}">
<meta name="DC.rights" content="{{.rights}}">
<link rel="stylesheet" href="styles/epub.css" type="text/css" class="horizontal" title="Horizontal Layout" />
</head>
<body>
{{.body}}</body></html>
"#;

/// The parsed document shell template.
pub struct Shell {
    template: Template,
}

impl Shell {
    /// Parses the built-in document shell.
    pub fn new() -> Result<Shell> {
        let mut template = Template::default();
        template.parse(DOCUMENT_SHELL).map_err(Error::Parse)?;
        Ok(Shell { template })
    }

    /// Produces the final document: the header carrying `metadata`, then
    /// `fragment` unchanged, then the closing tags.
    pub fn assemble(&self, metadata: &Metadata, fragment: &str) -> Result<String> {
        let context = Context::from(to_value(metadata, fragment))
            .map_err(|err| Error::Execute(err.to_string()))?;
        let mut out: Vec<u8> = Vec::with_capacity(fragment.len() + 512);
        self.template
            .execute(&mut out, &context)
            .map_err(Error::Execute)?;
        Ok(String::from_utf8(out)?)
    }
}

fn to_value(metadata: &Metadata, fragment: &str) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("title".to_owned(), Value::String(metadata.title.clone()));
    m.insert("author".to_owned(), Value::String(metadata.author.clone()));
    m.insert(
        "publication_date".to_owned(),
        Value::String(metadata.publication_date.clone()),
    );
    m.insert("rights".to_owned(), Value::String(metadata.rights.clone()));
    m.insert("body".to_owned(), Value::String(fragment.to_owned()));
    Value::Object(m)
}

/// The result of a fallible document operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error assembling the document.
#[derive(Debug)]
pub enum Error {
    /// Returned when the shell template fails to parse.
    Parse(String),

    /// Returned when the shell template fails to execute.
    Execute(String),

    /// Returned when the template output isn't valid UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "Parsing document shell: {}", err),
            Error::Execute(err) => {
                write!(f, "Executing document shell: {}", err)
            }
            Error::Utf8(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(_) => None,
            Error::Execute(_) => None,
            Error::Utf8(err) => Some(err),
        }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Error {
        Error::Utf8(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Edition;

    const EN_HEADER: &str = r#"<html>
<head>
<title>ScalikeJDBC Cookbook</title>
<meta name="Author" content="Kazuhiro Sera">
<meta name="DC.date.publication" content="2017-07">
<meta name="DC.rights" content="2017 Kazuhiro Sera">
<link rel="stylesheet" href="styles/epub.css" type="text/css" class="horizontal" title="Horizontal Layout" />
</head>
<body>
"#;

    const JA_HEADER: &str = r#"<html>
<head>
<title>ScalikeJDBC Cookbook 日本語版</title>
<meta name="Author" content="Kazuhiro Sera">
<meta name="DC.date.publication" content="2013-01">
<meta name="DC.rights" content="2013 Kazuhiro Sera">
<link rel="stylesheet" href="styles/epub.css" type="text/css" class="horizontal" title="Horizontal Layout" />
</head>
<body>
"#;

    const FOOTER: &str = "</body></html>\n";

    #[test]
    fn test_assemble_empty_fragment() -> Result<()> {
        let shell = Shell::new()?;
        assert_eq!(
            format!("{}{}", EN_HEADER, FOOTER),
            shell.assemble(&Edition::En.metadata(), "")?
        );
        assert_eq!(
            format!("{}{}", JA_HEADER, FOOTER),
            shell.assemble(&Edition::Ja.metadata(), "")?
        );
        Ok(())
    }

    #[test]
    fn test_assemble_fragment_verbatim() -> Result<()> {
        let fragment = "<h1 class=\"chapter\">Title</h1>\n<p>a &amp; b {{.title}}</p>\n";
        assert_eq!(
            format!("{}{}{}", EN_HEADER, fragment, FOOTER),
            Shell::new()?.assemble(&Edition::En.metadata(), fragment)?
        );
        Ok(())
    }

    #[test]
    fn test_assemble_does_not_escape_metadata() -> Result<()> {
        let metadata = Metadata {
            title: "A & B <draft>".to_owned(),
            ..Edition::En.metadata()
        };
        let document = Shell::new()?.assemble(&metadata, "")?;
        assert!(document.contains("<title>A & B <draft></title>\n"));
        Ok(())
    }
}
