//! VoiceRelay CLI
//!
//! Runs conversation turns against the configured providers and manages
//! preferences and encrypted configuration values.

#![allow(clippy::print_stdout)]

mod cli;
mod commands;

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppSettings, init_logging};

use crate::cli::{Cli, Commands, PrefsAction};
use crate::commands::{PreferenceChanges, Runtime, TurnArgs};

fn read_stdin() -> anyhow::Result<String> {
    let mut value = String::new();
    std::io::stdin()
        .read_to_string(&mut value)
        .context("Failed to read value from stdin")?;
    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = AppSettings::load_from(cli.config.as_deref())?;
    init_logging(&settings.logging, cli.verbose)?;

    let env_file = cli.env_file.clone().or_else(|| settings.env_file.clone());
    let source = commands::config_source(env_file.as_deref())?;
    let runtime = Runtime::new(settings, Arc::new(source))?;

    let output = match cli.command {
        Commands::Turn {
            audio,
            transcript,
            output,
            stt,
            ai,
            tts,
            say,
        } => {
            commands::turn(
                &runtime,
                TurnArgs {
                    audio,
                    transcript,
                    output,
                    stt,
                    ai,
                    tts,
                    say,
                },
            )
            .await?
        },

        Commands::Providers => commands::providers(&runtime),

        Commands::Encrypt { value } => {
            let plaintext = match value {
                Some(value) => value,
                None => read_stdin()?,
            };
            commands::encrypt(&runtime, &plaintext)?
        },

        Commands::Prefs { action } => match action.unwrap_or(PrefsAction::Show) {
            PrefsAction::Show => commands::show_preferences(&runtime).await?,
            PrefsAction::Set {
                name,
                providers,
                elevenlabs_voice,
                murf_voice,
            } => {
                commands::update_preferences(
                    &runtime,
                    PreferenceChanges {
                        name,
                        providers,
                        elevenlabs_voice,
                        murf_voice,
                    },
                )
                .await?
            },
        },
    };

    println!("{}", output.trim_end());
    Ok(())
}
