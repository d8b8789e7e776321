mod cli;
mod commands;
mod config;
mod file_utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::*;
use config::Config;

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "dexforge=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Configure {
            reference_dir,
            num_start,
            search_limit,
            show,
        } => {
            commands::configure::handle(reference_dir, num_start, search_limit, show)?;
        }

        Commands::Extract {
            corpus,
            kind,
            output,
            compact,
        } => {
            let config = Config::load()?;
            commands::corpus::extract(
                corpus.as_deref(),
                kind.into(),
                output.as_deref(),
                compact,
                &config,
            )?;
        }

        Commands::Search {
            corpus,
            filters,
            effect,
            json,
        } => {
            let config = Config::load()?;
            match effect {
                Some(effect) => {
                    commands::corpus::reference(corpus.as_deref(), &effect, json, &config)?
                }
                None => commands::corpus::search(corpus.as_deref(), &filters, json, &config)?,
            }
        }

        Commands::Stats { corpus, kind, json } => {
            let config = Config::load()?;
            commands::corpus::stats(corpus.as_deref(), kind.into(), json, &config)?;
        }

        Commands::Compile {
            intent_args,
            intent,
            num,
            json,
        } => {
            let config = Config::load()?;
            let intent = match intent {
                Some(path) => commands::compile::load_intent(&path)?,
                None => intent_args.into_intent()?,
            };
            commands::compile::compile(&intent, num.unwrap_or(config.custom_num_start), json)?;
        }

        Commands::Batch {
            file,
            num_start,
            output,
            json,
        } => {
            let config = Config::load()?;
            commands::compile::batch(
                &file,
                num_start.unwrap_or(config.custom_num_start),
                output.as_deref(),
                json,
            )?;
        }

        Commands::Reflow { text, script } => {
            commands::reflow::handle(text, script)?;
        }

        Commands::Validate { file } => {
            commands::validate::handle(file.as_deref())?;
        }
    }

    Ok(())
}
