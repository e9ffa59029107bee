//! Validation example

use ixcheck::{render, EntitySize};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <filing.html> [entity-size]", args[0]);
        std::process::exit(1);
    }

    let size: EntitySize = args.get(2).map(String::as_str).unwrap_or("micro").parse()?;

    let result = ixcheck::validate_file(&args[1], size)?;
    print!("{}", render(&result));

    if !result.is_valid {
        std::process::exit(1);
    }
    Ok(())
}
