use ebnf_core::{dump, parse_str, to_xml};
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();
    let input_file = args.get(1).expect("Usage: dump_tree <grammar.ebnf>");
    let input = fs::read_to_string(input_file).expect("Failed to read grammar file");
    let syntax = parse_str(&input).expect("Failed to parse grammar");
    print!("{}", dump(&syntax));
    print!("{}", to_xml(&syntax));
}
