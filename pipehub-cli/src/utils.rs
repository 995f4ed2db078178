use std::io::{BufRead, Write};

use anyhow::Result;
use pipehub_api::reqwest::Url;

/// Turns a `Location` value into something a user can open.
pub fn resolve_location(base_url: &str, location: &str) -> String {
    Url::parse(base_url)
        .and_then(|base| base.join(location))
        .map(String::from)
        .unwrap_or_else(|_| location.into())
}

/// Asks a y/N question. Anything but yes, including EOF, declines.
pub fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Keeps the last four characters of a secret visible.
pub fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}
