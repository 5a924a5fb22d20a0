//! Command-line front end for the EBNF railroad diagram toolkit.
//!
//! Reads an EBNF grammar file and writes either its XML syntax tree or a
//! rendered railroad diagram image.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use ebnf_core::{dump, parse, render_with_config, scan_file, to_xml, Config, RasterFormat, TokenStream};

#[derive(Parser)]
#[command(name = "ebnf", version, about = "EBNF grammar parser and railroad diagram generator")]
struct Args {
    /// Grammar file to read
    input: PathBuf,

    /// Output file; XML goes to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Xml)]
    format: Format,

    /// Also print the syntax tree as an indented text outline to stdout
    #[arg(short, long)]
    textual: bool,

    /// Font size index (1-5) for diagram text
    #[arg(long, default_value_t = 4)]
    font_size: usize,

    /// Base spacing unit in pixels
    #[arg(long, default_value_t = 16)]
    unit: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Xml,
    Png,
    Jpg,
    Gif,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let file = args.input.display().to_string();
    let source =
        fs::read_to_string(&args.input).map_err(|err| format!("Can't read '{file}': {err}"))?;

    let tokens = scan_file(&source, Some(&file)).map_err(|err| err.to_string())?;
    let syntax = parse(&mut TokenStream::new(tokens)).map_err(|err| err.to_string())?;

    if args.textual {
        print!("{}", dump(&syntax));
    }

    match args.format {
        Format::Xml => {
            let xml = to_xml(&syntax);
            match &args.output {
                Some(path) => fs::write(path, xml)
                    .map_err(|err| format!("Can't write '{}': {err}", path.display()))?,
                None => print!("{xml}"),
            }
        }
        Format::Png => write_image(&syntax, args, RasterFormat::Png)?,
        Format::Jpg => write_image(&syntax, args, RasterFormat::Jpg)?,
        Format::Gif => write_image(&syntax, args, RasterFormat::Gif)?,
    }

    Ok(())
}

fn write_image(syntax: &ebnf_core::Syntax, args: &Args, format: RasterFormat) -> Result<(), String> {
    let output = args
        .output
        .as_ref()
        .ok_or("An output file is required for image formats (use --output)")?;
    let config = Config::default()
        .with_unit(args.unit)
        .with_font_size(args.font_size);
    let canvas = render_with_config(syntax, &config);
    canvas
        .save(output, format)
        .map_err(|err| format!("Can't write '{}': {err}", output.display()))
}
