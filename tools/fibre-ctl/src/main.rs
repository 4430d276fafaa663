// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! fibre-ctl - Property tree explorer for fibre-micro
//!
//! Drives the introspection API against a simulated two-axis motor
//! controller, either one command at a time or through the ASCII line
//! protocol on stdin.

mod device;
mod protocol;

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use fibre_micro::{Handle, MAX_TEXT_LEN};

use device::Device;

#[derive(Parser, Debug)]
#[command(name = "fibre-ctl")]
#[command(version)]
#[command(about = "Read, write and browse a fibre-micro property tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the value of a leaf
    Get {
        /// Dotted property path, e.g. axis0.motor.config.pole_pairs
        path: String,
    },

    /// Write a leaf, then print the value read back
    Set {
        /// Dotted property path
        path: String,

        /// Value text
        value: String,
    },

    /// List the members of a node (root when omitted)
    List {
        /// Dotted property path
        path: Option<String>,
    },

    /// Serve the ASCII line protocol on stdin/stdout
    Shell,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let device = Device::power_on();
    let root = Handle::new(&device);
    log::debug!("fibre-ctl {} on {:?}", fibre_micro::VERSION, root.registry());

    match cli.command {
        Commands::Get { path } => cmd_get(&root, &path),
        Commands::Set { path, value } => cmd_set(&root, &path, &value),
        Commands::List { path } => cmd_list(&root, path.as_deref()),
        Commands::Shell => cmd_shell(&root),
    }
}

fn read_leaf(root: &Handle<'_>, path: &str) -> anyhow::Result<String> {
    let leaf = root
        .lookup(path)
        .with_context(|| format!("cannot resolve '{path}'"))?;
    let text = leaf
        .get_string::<MAX_TEXT_LEN>()
        .with_context(|| format!("cannot read '{path}'"))?;
    Ok(text.as_str().to_owned())
}

fn cmd_get(root: &Handle<'_>, path: &str) -> anyhow::Result<()> {
    println!("{}", read_leaf(root, path)?);
    Ok(())
}

fn cmd_set(root: &Handle<'_>, path: &str, value: &str) -> anyhow::Result<()> {
    root.lookup(path)
        .with_context(|| format!("cannot resolve '{path}'"))?
        .set_from_text(value.as_bytes())
        .with_context(|| format!("cannot write '{value}' to '{path}'"))?;
    println!("{path} = {}", read_leaf(root, path)?);
    Ok(())
}

fn cmd_list(root: &Handle<'_>, path: Option<&str>) -> anyhow::Result<()> {
    let node = match path {
        Some(path) => root
            .lookup(path)
            .with_context(|| format!("cannot resolve '{path}'"))?,
        None => *root,
    };
    let registry = node
        .registry()
        .ok_or_else(|| anyhow!("handle is not bound to a registry"))?;

    for entry in registry.entries() {
        let member = entry.registry();
        let kind = if member.is_leaf() { "leaf" } else { "node" };
        println!("{:<24} {:<6} {}", entry.name(), kind, member.name());
    }
    Ok(())
}

fn cmd_shell(root: &Handle<'_>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(reply) = protocol::handle_line(root, &line) {
            writeln!(stdout, "{reply}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
