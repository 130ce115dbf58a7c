//! Scale ingredient lines read from stdin
//! Usage: cargo run --bin scale_ingredients -- <original_servings> <servings> < ingredients.txt

use std::io::{self, BufRead, Write};

fn parse_servings(arg: Option<&String>, what: &str) -> Result<f64, Box<dyn std::error::Error>> {
    let arg = arg.ok_or_else(|| format!("missing {}", what))?;
    arg.trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid {} '{}': {}", what, arg, e).into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: scale_ingredients <original_servings> <servings> < ingredients.txt");
        std::process::exit(2);
    }

    let original_servings = parse_servings(args.get(1), "original servings")?;
    let servings = parse_servings(args.get(2), "servings")?;

    let lines = io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()?;

    let scaled = ladle::scaling::scale_ingredients(&lines, Some(original_servings), servings);

    let mut out = io::stdout().lock();
    for line in scaled {
        writeln!(out, "{}", line)?;
    }

    Ok(())
}
