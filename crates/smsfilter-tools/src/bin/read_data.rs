//! Print the size of the SMS Spam Collection and its first messages.

use anyhow::Context;
use smsfilter_tools::dataset::{self, DATA_PATH, PREVIEW_LIMIT};
use std::fs::File;
use std::io::{self, BufReader};

fn main() -> anyhow::Result<()> {
    smsfilter_tools::init_logging(false);

    let file = File::open(DATA_PATH).with_context(|| format!("failed to open {}", DATA_PATH))?;
    let stdout = io::stdout();
    dataset::inspect(BufReader::new(file), stdout.lock(), PREVIEW_LIMIT)?;

    Ok(())
}
