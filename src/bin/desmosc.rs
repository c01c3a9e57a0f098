use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use desmosc_rs::{assemble, desmap, latex, Expr};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble a .des program into Desmos graph expressions"
)]
struct Opts {
    /// Prelude template (desmap) prepended to the output
    #[arg(long, value_name = "FILE")]
    desmap: Option<PathBuf>,
    /// Write the expression list as JSON to this file
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
    /// Input assembly file
    #[arg(value_name = "SOURCE")]
    input: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct Export<'a> {
    exprs: &'a [Expr],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let Some(input) = opts.input else {
        Opts::command().print_help()?;
        return Ok(());
    };

    let prelude = match &opts.desmap {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading desmap {}", path.display()))?;
            desmap::parse_blocks(&text)
        }
        None => Vec::new(),
    };

    let source = fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let assembly = assemble(&source, prelude)?;

    println!("{}", assembly.latex());

    if let Some(path) = &opts.export {
        let json = serde_json::to_string_pretty(&Export {
            exprs: &assembly.exprs,
        })?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    println!("==== SYMBOL TABLE ====");
    for name in &assembly.registers {
        println!("{}", latex::register(name));
    }

    println!("==== LABELS ====");
    let mut labels: Vec<_> = assembly.labels.iter().collect();
    labels.sort_by_key(|&(_, lineno)| *lineno);
    for (name, lineno) in labels {
        println!("{} -> {}", name, lineno);
    }

    println!("==== LINENO ====");
    for (action, lineno) in &assembly.action_lines {
        println!("{} -> {}", action, lineno);
    }

    Ok(())
}
