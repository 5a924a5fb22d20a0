use ebnf_core::{parse_str, render, RasterFormat};
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();
    let input_file = args.get(1).expect("Usage: gen_png <grammar.ebnf> [out.png]");
    let output_file = args.get(2).map(String::as_str).unwrap_or("out.png");
    let input = fs::read_to_string(input_file).expect("Failed to read grammar file");
    let syntax = parse_str(&input).expect("Failed to parse grammar");
    let canvas = render(&syntax);
    canvas
        .save(output_file, RasterFormat::Png)
        .expect("Failed to write image");
    println!("{} ({}x{})", output_file, canvas.width(), canvas.height());
}
