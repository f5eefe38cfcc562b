//! Command-line interface for pagesmith
//! Parses a content brief, enhances it with images and affiliate links, and prints the result.
//!
//! Usage:
//!   pagesmith `<path>` [--images `<json>`] [--links `<json>`] [--config `<toml>`] [--format `<format>`]
//!
//! Formats:
//!   json           enhanced document with all annotations (default)
//!   document-json  parsed document only
//!   treeviz        one line per node, for debugging the structure

mod library;

use clap::{Arg, Command};
use pagesmith::page::enhancing::{Enhancer, ImageLibrary, LinkTable};
use pagesmith::page::formats::{enhanced_to_json_str, to_json_str, to_treeviz_str};
use pagesmith::parse_document;
use pagesmith_config::Loader;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("pagesmith")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse content briefs and place images and affiliate links")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the brief")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("images")
                .long("images")
                .short('i')
                .help("Image library JSON ({\"attachments\": [...]})"),
        )
        .arg(
            Arg::new("links")
                .long("links")
                .short('l')
                .help("Affiliate link JSON ({\"affiliate_links\": [...]})"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: json, document-json, treeviz")
                .default_value("json"),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("json");

    let source = library::read_text(Path::new(path)).unwrap_or_else(|e| fail(e));
    let document = parse_document(&source);

    let output = match format {
        "treeviz" => to_treeviz_str(&document),
        "document-json" => to_json_str(&document).unwrap_or_else(|e| fail(e)),
        "json" => {
            let mut loader = Loader::new();
            if let Some(config) = matches.get_one::<String>("config") {
                loader = loader.with_file(config);
            }
            let options = loader
                .build()
                .and_then(|config| config.enhance_options())
                .unwrap_or_else(|e| fail(e));

            let images = match matches.get_one::<String>("images") {
                Some(p) => library::load_images(Path::new(p)).unwrap_or_else(|e| fail(e)),
                None => ImageLibrary::default(),
            };
            let links = match matches.get_one::<String>("links") {
                Some(p) => {
                    let records = library::load_links(Path::new(p)).unwrap_or_else(|e| fail(e));
                    LinkTable::new(&records, &options.links).unwrap_or_else(|e| fail(e))
                }
                None => LinkTable::default(),
            };

            let enhanced = Enhancer::new(&images, &options.images, &links).enhance(document);
            enhanced_to_json_str(&enhanced).unwrap_or_else(|e| fail(e))
        }
        other => {
            eprintln!("Format '{}' not supported", other);
            eprintln!("Available formats: json, document-json, treeviz");
            std::process::exit(1);
        }
    };

    println!("{}", output);
}

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}
