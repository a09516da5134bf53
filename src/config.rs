//! Defines the [`Edition`] and [`Metadata`] types. An edition is nothing more
//! than a fixed [`Metadata`] record; the pipeline itself is identical for all
//! of them. A YAML file may override individual fields of an edition (see
//! [`Overrides`]).

use serde::Deserialize;
use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const AUTHOR: &str = "Kazuhiro Sera";

/// The metadata embedded into the document header.
#[derive(Clone, Debug, PartialEq)]
pub struct Metadata {
    /// The document `<title>`.
    pub title: String,

    /// The `Author` meta tag.
    pub author: String,

    /// The `DC.date.publication` meta tag, e.g. `2017-07`.
    pub publication_date: String,

    /// The `DC.rights` meta tag, e.g. `2017 Kazuhiro Sera`.
    pub rights: String,
}

/// The built-in editions of the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edition {
    /// The English edition, published 2017-07.
    En,

    /// The Japanese edition, published 2013-01.
    Ja,
}

impl Edition {
    /// The names accepted by [`Edition::from_str`], in declaration order.
    pub const NAMES: &'static [&'static str] = &["en", "ja"];

    /// Returns the fixed metadata record for this edition.
    pub fn metadata(self) -> Metadata {
        match self {
            Edition::En => Metadata {
                title: "ScalikeJDBC Cookbook".to_owned(),
                author: AUTHOR.to_owned(),
                publication_date: "2017-07".to_owned(),
                rights: format!("2017 {}", AUTHOR),
            },
            Edition::Ja => Metadata {
                title: "ScalikeJDBC Cookbook 日本語版".to_owned(),
                author: AUTHOR.to_owned(),
                publication_date: "2013-01".to_owned(),
                rights: format!("2013 {}", AUTHOR),
            },
        }
    }
}

impl Default for Edition {
    fn default() -> Self {
        Edition::En
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Edition::En => "en",
            Edition::Ja => "ja",
        })
    }
}

impl FromStr for Edition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "en" => Ok(Edition::En),
            "ja" => Ok(Edition::Ja),
            _ => Err(Error::UnknownEdition(s.to_owned())),
        }
    }
}

/// Field-wise overrides for an edition's [`Metadata`], loaded from YAML:
///
/// ```yaml
/// title: ScalikeJDBC Cookbook (draft)
/// publication_date: 2018-01
/// ```
///
/// Missing keys keep the edition's value.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub publication_date: Option<String>,

    #[serde(default)]
    pub rights: Option<String>,
}

impl Overrides {
    /// Loads overrides from the YAML file at `path`.
    pub fn from_file(path: &Path) -> Result<Overrides> {
        let yaml = read_to_string(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        Overrides::from_yaml(&yaml)
    }

    /// Parses overrides from a YAML string. A document with no keys (empty,
    /// or only comments) overrides nothing.
    pub fn from_yaml(yaml: &str) -> Result<Overrides> {
        if is_blank(yaml) {
            return Ok(Overrides::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Applies the overrides on top of `base`.
    pub fn apply(self, base: Metadata) -> Metadata {
        Metadata {
            title: self.title.unwrap_or(base.title),
            author: self.author.unwrap_or(base.author),
            publication_date: self
                .publication_date
                .unwrap_or(base.publication_date),
            rights: self.rights.unwrap_or(base.rights),
        }
    }
}

fn is_blank(yaml: &str) -> bool {
    yaml.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// Represents the result of a configuration operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error selecting an edition or loading metadata overrides.
#[derive(Debug)]
pub enum Error {
    /// Returned when an edition name isn't one of [`Edition::NAMES`].
    UnknownEdition(String),

    /// Returned when the overrides file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the overrides file isn't valid YAML or has unknown
    /// keys.
    Yaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownEdition(name) => write!(
                f,
                "unknown edition `{}` (expected one of: {})",
                name,
                Edition::NAMES.join(", "),
            ),
            Error::Open { path, err } => {
                write!(f, "Opening metadata file '{}': {}", path.display(), err)
            }
            Error::Yaml(err) => write!(f, "Parsing metadata: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UnknownEdition(_) => None,
            Error::Open { path: _, err } => Some(err),
            Error::Yaml(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_edition_metadata() {
        let en = Edition::En.metadata();
        assert_eq!("ScalikeJDBC Cookbook", en.title);
        assert_eq!("Kazuhiro Sera", en.author);
        assert_eq!("2017-07", en.publication_date);
        assert_eq!("2017 Kazuhiro Sera", en.rights);

        let ja = Edition::Ja.metadata();
        assert_eq!("ScalikeJDBC Cookbook 日本語版", ja.title);
        assert_eq!("Kazuhiro Sera", ja.author);
        assert_eq!("2013-01", ja.publication_date);
        assert_eq!("2013 Kazuhiro Sera", ja.rights);
    }

    #[test]
    fn test_edition_names_round_trip() -> Result<()> {
        for name in Edition::NAMES {
            assert_eq!(*name, name.parse::<Edition>()?.to_string());
        }
        Ok(())
    }

    #[test]
    fn test_unknown_edition() {
        match "fr".parse::<Edition>() {
            Err(Error::UnknownEdition(name)) => assert_eq!("fr", name),
            other => panic!("wanted UnknownEdition, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides_partial() -> Result<()> {
        let metadata = Overrides::from_yaml("title: Draft\nrights: none\n")?
            .apply(Edition::Ja.metadata());
        assert_eq!(
            Metadata {
                title: "Draft".to_owned(),
                author: "Kazuhiro Sera".to_owned(),
                publication_date: "2013-01".to_owned(),
                rights: "none".to_owned(),
            },
            metadata
        );
        Ok(())
    }

    #[test]
    fn test_overrides_empty() -> Result<()> {
        for yaml in &["", "\n  \n", "# nothing to override\n", "---\n# still nothing\n"] {
            assert_eq!(Overrides::default(), Overrides::from_yaml(yaml)?);
            assert_eq!(
                Edition::En.metadata(),
                Overrides::from_yaml(yaml)?.apply(Edition::En.metadata())
            );
        }
        Ok(())
    }

    #[test]
    fn test_overrides_empty_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let file = tempfile::NamedTempFile::new()?;
        assert_eq!(Overrides::default(), Overrides::from_file(file.path())?);
        Ok(())
    }

    #[test]
    fn test_overrides_reject_unknown_keys() {
        assert!(matches!(
            Overrides::from_yaml("subtitle: nope\n"),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn test_overrides_missing_file() {
        let path = Path::new("./does/not/exist.yaml");
        match Overrides::from_file(path) {
            Err(Error::Open { path: p, .. }) => assert_eq!(path, p.as_path()),
            other => panic!("wanted Open, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides_from_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"publication_date: 2018-02\n")?;
        let metadata = Overrides::from_file(file.path())?.apply(Edition::En.metadata());
        assert_eq!("2018-02", metadata.publication_date);
        assert_eq!("ScalikeJDBC Cookbook", metadata.title);
        Ok(())
    }
}
