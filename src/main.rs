use anyhow::{Context, Result};
use clap::{crate_version, App, Arg, ArgMatches};
use export_html::config::{Edition, Metadata, Overrides};
use export_html::document::Shell;
use export_html::export::export;
use export_html::markdown::{Markdown, RenderOptions};
use log::info;
use std::io;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("export-html")
        .version(crate_version!())
        .about(
            "Renders a markdown manuscript into a standalone HTML document \
             for e-book packaging. Reads FILEs in order, or stdin if none \
             are given, and writes the document to stdout.",
        )
        .arg(
            Arg::with_name("edition")
                .short("e")
                .long("edition")
                .value_name("EDITION")
                .takes_value(true)
                .possible_values(Edition::NAMES)
                .default_value("en")
                .help("The edition whose metadata goes into the header"),
        )
        .arg(
            Arg::with_name("metadata")
                .short("m")
                .long("metadata")
                .value_name("FILE")
                .takes_value(true)
                .help("YAML file overriding the edition's metadata fields"),
        )
        .arg(
            Arg::with_name("no-autolink")
                .long("no-autolink")
                .help("Don't turn bare URLs into links"),
        )
        .arg(
            Arg::with_name("files")
                .value_name("FILE")
                .multiple(true)
                .help("Markdown files to concatenate; `-` reads stdin"),
        )
        .get_matches();

    let metadata = metadata(&matches)?;
    let renderer = Markdown::new(RenderOptions {
        autolink: !matches.is_present("no-autolink"),
    })?;
    let shell = Shell::new()?;
    let paths: Vec<PathBuf> = match matches.values_of_os("files") {
        Some(values) => values.map(PathBuf::from).collect(),
        None => Vec::new(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    export(
        &renderer,
        &shell,
        &metadata,
        &paths,
        stdin.lock(),
        stdout.lock(),
    )?;
    Ok(())
}

fn metadata(matches: &ArgMatches) -> Result<Metadata> {
    let edition = match matches.value_of("edition") {
        Some(name) => name.parse()?,
        None => Edition::default(),
    };
    info!("exporting the `{}` edition", edition);
    match matches.value_of_os("metadata") {
        None => Ok(edition.metadata()),
        Some(path) => {
            let path = Path::new(path);
            let overrides = Overrides::from_file(path).with_context(|| {
                format!("Loading metadata overrides for the `{}` edition", edition)
            })?;
            Ok(overrides.apply(edition.metadata()))
        }
    }
}
