//! Line-oriented input helpers for the interactive shell.

use std::io::{self, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

fn read_line() -> anyhow::Result<String> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt for a non-empty line.
pub fn input(message: &str) -> anyhow::Result<String> {
    loop {
        print!("{} ", message);
        io::stdout().flush()?;
        let line = read_line()?;
        if !line.is_empty() {
            return Ok(line);
        }
        println!("Please enter a value.");
    }
}

/// Prompt for an optional line; empty input means none.
pub fn input_optional(message: &str) -> anyhow::Result<Option<String>> {
    print!("{} ", message);
    io::stdout().flush()?;
    let line = read_line()?;
    Ok((!line.is_empty()).then_some(line))
}

/// Prompt for a positive decimal, re-asking until one parses.
pub fn input_positive_decimal(message: &str) -> anyhow::Result<Decimal> {
    loop {
        let line = input(message)?;
        match Decimal::from_str(&line) {
            Ok(value) if value > Decimal::ZERO => return Ok(value),
            _ => println!("Please enter a positive number."),
        }
    }
}

/// Present a numbered list and return the chosen index.
pub fn select(message: &str, choices: &[String]) -> anyhow::Result<usize> {
    println!("{}", message);
    for (i, choice) in choices.iter().enumerate() {
        println!("  {}. {}", i + 1, choice);
    }
    loop {
        print!("> ");
        io::stdout().flush()?;
        let line = read_line()?;
        if let Ok(n) = line.parse::<usize>() {
            if (1..=choices.len()).contains(&n) {
                return Ok(n - 1);
            }
        }
        println!("Please enter a number between 1 and {}.", choices.len());
    }
}

/// Yes/no prompt with a default.
pub fn confirm(message: &str, default: bool) -> anyhow::Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    print!("{} ({}) ", message, hint);
    io::stdout().flush()?;
    let line = read_line()?;
    Ok(match line.to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    })
}

/// Collect free text until a blank line is entered twice in a row.
pub fn input_multiline(message: &str) -> anyhow::Result<String> {
    println!("{} (press Enter twice to finish):", message);
    let mut text = String::new();
    let mut last_line_empty = false;
    loop {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            if last_line_empty {
                break;
            }
            last_line_empty = true;
        } else {
            text.push_str(line);
            text.push('\n');
            last_line_empty = false;
        }
    }
    Ok(text.trim().to_string())
}

/// Comma-separated tags, trimmed, empties dropped.
pub fn input_tags(message: &str) -> anyhow::Result<Vec<String>> {
    print!("{} ", message);
    io::stdout().flush()?;
    let line = read_line()?;
    Ok(line
        .split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect())
}
