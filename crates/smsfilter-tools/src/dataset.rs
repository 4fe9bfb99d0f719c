//! Quick look at the SMS Spam Collection dataset

use std::io::{BufRead, Write};

/// Location of the dataset, relative to the working directory
pub const DATA_PATH: &str = "smsspamcollection/SMSSpamCollection";

/// Number of messages printed
pub const PREVIEW_LIMIT: usize = 100;

/// Print the message count, then the first `limit` messages with their index.
///
/// Returns the total number of messages read.
pub fn inspect<R: BufRead, W: Write>(reader: R, mut out: W, limit: usize) -> std::io::Result<usize> {
    let messages = reader
        .lines()
        .map(|line| line.map(|l| l.trim_end().to_string()))
        .collect::<std::io::Result<Vec<_>>>()?;

    writeln!(out, "\nTotal number of messages:{}", messages.len())?;
    writeln!(out, "\n")?;

    for (index, message) in messages.iter().take(limit).enumerate() {
        writeln!(out, "{} {}", index, message)?;
        writeln!(out, "\n")?;
    }

    Ok(messages.len())
}
