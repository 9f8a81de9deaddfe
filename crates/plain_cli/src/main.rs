/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod cli;
mod io;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, RenderFormat};
use colored::Colorize;
use plain_factory::{write_artifacts, BuildStatus, FactorySettings, LicenseContent};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = io::load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Process {
            inputs,
            output,
            format,
            expect,
        } => process(&inputs, output, format, &expect, &settings),
        Command::Plaintext { input } => {
            let license = assemble(&input, &settings)?;
            print!("{}", license.plaintext_content());
            Ok(())
        }
        Command::Meta { input } => {
            let license = assemble(&input, &settings)?;
            println!("{}", serde_json::to_string_pretty(&license.attributes())?);
            Ok(())
        }
        Command::Validate { inputs } => validate(&inputs, &settings),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn assemble(input: &Path, settings: &FactorySettings) -> Result<LicenseContent> {
    let meta = io::load_metadata(input)?;
    LicenseContent::new(meta, settings.clone())
        .with_context(|| format!("failed to assemble {}", input.display()))
}

fn process(
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    format: RenderFormat,
    expect: &[String],
    settings: &FactorySettings,
) -> Result<()> {
    let licenses = inputs
        .iter()
        .map(|input| assemble(input, settings))
        .collect::<Result<Vec<_>>>()?;

    if format != RenderFormat::All {
        for license in &licenses {
            match format.tab() {
                Some(tab) => print!("{}", license.tab(tab)),
                None => print!("{}", license.license_content()),
            }
        }
        return Ok(());
    }

    let mut status = if expect.is_empty() {
        BuildStatus::new(licenses.iter().map(|l| l.meta().spdx_id.as_str()))
    } else {
        BuildStatus::new(expect)
    };

    let root = output.unwrap_or_else(|| settings.output_dir.clone());
    for license in &licenses {
        let written = write_artifacts(license, &root)
            .with_context(|| format!("failed to write artifacts for {}", license.meta().spdx_id))?;
        status.record(license);
        println!(
            "{} {} ({} files)",
            "wrote".green(),
            license.meta().spdx_id.bold(),
            written.len()
        );
    }
    status.check()?;
    Ok(())
}

fn validate(inputs: &[PathBuf], settings: &FactorySettings) -> Result<()> {
    let mut failures = 0usize;
    for input in inputs {
        match assemble(input, settings).and_then(|license| {
            license.paragraphs()?;
            Ok(license)
        }) {
            Ok(license) => println!(
                "{} {} ({})",
                "ok".green(),
                input.display(),
                license.meta().spdx_id
            ),
            Err(err) => {
                failures += 1;
                println!("{} {}: {err:#}", "error".red(), input.display());
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {} license files failed validation", inputs.len());
    }
    Ok(())
}
