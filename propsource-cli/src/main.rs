mod view;

use std::process;

use clap::{Parser, Subcommand};
use propsource::{
    Charset, Error, EscapePolicy, FileResource, FormatType, LoadOptions, LoaderRegistry,
    PropertiesPropertySourceLoader, convert, convert_auto, infer_format_from_extension,
};

use crate::view::{OutputFormat, print_view};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert between .properties and .xml property files.
    Convert {
        /// The input file to process
        #[arg(short, long)]
        input: String,
        /// The output file to write the results to
        #[arg(short, long)]
        output: String,
        /// Input format (properties or xml); inferred from the extension if omitted
        #[arg(long)]
        input_format: Option<String>,
        /// Output format (properties or xml); inferred from the extension if omitted
        #[arg(long)]
        output_format: Option<String>,
    },

    /// View the property source loaded from a file, with value origins.
    View {
        /// The input file to view
        #[arg(short, long)]
        input: String,

        /// Name given to the loaded property source (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Print the sources as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Display full value without truncation
        #[arg(long)]
        full: bool,

        /// Decode .properties files as ISO-8859-1 instead of UTF-8
        #[arg(long)]
        latin1: bool,

        /// Keep malformed \uXXXX escapes literally instead of failing
        #[arg(long)]
        lenient: bool,
    },
}

fn main() {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.commands {
        Commands::Convert {
            input,
            output,
            input_format,
            output_format,
        } => run_convert(input, output, input_format, output_format),
        Commands::View {
            input,
            name,
            json,
            full,
            latin1,
            lenient,
        } => {
            let options = LoadOptions::new()
                .with_charset(if latin1 { Charset::Latin1 } else { Charset::Utf8 })
                .with_escape_policy(if lenient {
                    EscapePolicy::Lenient
                } else {
                    EscapePolicy::Strict
                });
            let mut registry = LoaderRegistry::new();
            registry.register(PropertiesPropertySourceLoader::with_options(options));

            let resource = FileResource::new(&input);
            let name = name.unwrap_or_else(|| {
                resource
                    .path()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("properties")
                    .to_string()
            });
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            registry
                .load(&name, &resource)
                .map(|sources| print_view(&sources, format, full))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_convert(
    input: String,
    output: String,
    input_format: Option<String>,
    output_format: Option<String>,
) -> Result<(), Error> {
    if input_format.is_none() && output_format.is_none() {
        return convert_auto(input, output);
    }
    let input_format = resolve_format(&input, input_format.as_deref())?;
    let output_format = resolve_format(&output, output_format.as_deref())?;
    convert(input, input_format, output, output_format)
}

/// An explicit `--*-format` wins over the file extension.
fn resolve_format(path: &str, explicit: Option<&str>) -> Result<FormatType, Error> {
    match explicit {
        Some(name) => name.parse(),
        None => infer_format_from_extension(path).ok_or_else(|| {
            Error::UnsupportedFormat(format!("Cannot infer format from extension: {}", path))
        }),
    }
}
