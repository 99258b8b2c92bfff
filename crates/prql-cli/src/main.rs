// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! PRQL parser command-line interface.
//!
//! Reads a PRQL pipeline from standard input, parses it, and pretty-prints
//! the tree. The first lexical or syntactic failure is rendered as a
//! miette report on stderr with exit code 1.

use std::io::Read;

use clap::Parser;
use miette::{IntoDiagnostic, Result};

/// Parse a pipelined relational query from standard input
#[derive(Debug, Parser)]
#[command(name = "prql")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Parse a single expression instead of a full pipeline
    #[arg(long)]
    expr: bool,

    /// Emit parser trace events (combine with RUST_LOG=trace)
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Initialize the tracing subscriber only if RUST_LOG is explicitly set,
    // so stdout stays clean for the printed tree.
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .try_init();
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .into_diagnostic()?;

    let mut parser = prql_core::parse::Parser::new(&source);
    parser.set_debug(cli.debug);

    if cli.expr {
        let expr = parser.parse_expr()?;
        println!("{expr:#?}");
    } else {
        let root = parser.parse()?;
        println!("{root:#?}");
    }

    Ok(())
}
