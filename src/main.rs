use std::fs::File;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;

use crate::{cli::Cli, dedupe::TitleRegistry, project::project_record, source::CsvSource, wxr::WxrDocument};

mod cli;
mod dedupe;
mod project;
mod source;
mod transform;
mod wxr;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let input = File::open(&args.input)
        .with_context(|| format!("cannot open input CSV {}", args.input.display()))?;
    let source = CsvSource::new(input)
        .with_context(|| format!("unusable CSV header in {}", args.input.display()))?;

    let mut titles = TitleRegistry::new();
    let mut doc = WxrDocument::new();
    for record in source {
        let record = record?;
        doc.push(project_record(&record, &mut titles));
    }
    if titles.had_collisions() {
        eprintln!(
            "{}",
            "(renamed duplicate titles can be changed back after WordPress import)".yellow()
        );
    }

    // The output file is only created once every record projected cleanly.
    let output = File::create(&args.output)
        .with_context(|| format!("cannot create output file {}", args.output.display()))?;
    doc.write_to(output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("{} publications written to {}", doc.len(), args.output.display());
    Ok(())
}
