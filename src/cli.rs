//! Command-line surface: one subcommand per service operation.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;

use crate::api::payload::{SignalStatus, Speaker};
use crate::api::AgentClient;
use crate::output;
use crate::utils::config::Config;

#[derive(Parser)]
#[command(name = "ontoctl")]
#[command(about = "Inspect and drive an OntoAgent reasoning service", version)]
pub struct Cli {
    /// Agent service endpoint (overrides config and ONTOCTL_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print raw response JSON instead of the rendered view
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch a memory frame
    Frame {
        /// Frame id, e.g. @TEST.FRAME.1
        id: String,
    },

    /// Fetch an impasse and its resolutions
    Impasse {
        /// Impasse frame id
        id: String,
    },

    /// Fetch one signal with its content frames
    Signal {
        /// Signal anchor id
        id: String,
    },

    /// List signal anchors by lifecycle status
    Signals {
        /// received or consumed
        #[arg(long, default_value = "received")]
        status: SignalStatus,
    },

    /// Fetch an executable report
    Report {
        /// Report anchor id
        id: String,
    },

    /// Show the goal tree and decision options
    Agenda,

    /// Release a reserved effector
    Release {
        /// Effector frame id
        effector: String,
    },

    /// Send a speech signal to the agent
    Speech {
        /// What was said
        text: String,

        /// Speaker frame id; falls back to default_speaker from the config
        #[arg(long)]
        speaker: Option<String>,
    },

    /// Load a knowledge file into agent memory
    Load {
        /// Package the file ships in
        package: String,

        /// File name within the package
        file: String,
    },

    /// Execute OntoLang statements from a file, or stdin when no file is given
    Exec {
        /// Path to an OntoLang source file
        file: Option<PathBuf>,
    },

    /// Control the agent's background heartbeat
    Heartbeat {
        #[command(subcommand)]
        action: HeartbeatAction,
    },

    /// Add a goal directly to the agenda (demo service builds only)
    #[cfg(feature = "demo")]
    AddGoal {
        /// Goal definition frame id, e.g. @EXE.FIND-SOMETHING-TO-DO
        definition: String,

        /// Variable binding as NAME=VALUE; repeatable
        #[arg(long = "var", value_name = "NAME=VALUE")]
        variables: Vec<String>,

        /// Parent goal id; repeatable
        #[arg(long = "subgoal-of", value_name = "GOAL")]
        subgoal_of: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum HeartbeatAction {
    /// Run a single agenda iteration
    Pulse,
    /// Start the background heartbeat loop
    Start,
    /// Stop the background heartbeat loop
    Stop,
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default()?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_seconds = timeout;
    }

    let client = AgentClient::from_config(&config);
    let as_json = cli.json;

    match cli.command {
        Command::Frame { id } => {
            let frame = client.frame(&id).await?;
            if as_json {
                output::print_json(&frame)?;
            } else {
                output::print_frame(&frame);
            }
        }

        Command::Impasse { id } => {
            let impasse = client.impasse(&id).await?;
            if as_json {
                output::print_json(&impasse)?;
            } else {
                output::print_impasse(&impasse);
            }
        }

        Command::Signal { id } => {
            let signal = client.signal(&id).await?;
            if as_json {
                output::print_json(&signal)?;
            } else {
                output::print_signal(&signal);
            }
        }

        Command::Signals { status } => {
            let signals = client.signals(status).await?;
            if as_json {
                output::print_json(&signals)?;
            } else {
                output::print_signals(&signals);
            }
        }

        Command::Report { id } => {
            let report = client.report(&id).await?;
            if as_json {
                output::print_json(&report)?;
            } else {
                output::print_report(&report);
            }
        }

        Command::Agenda => {
            let agenda = client.agenda().await?;
            if as_json {
                output::print_json(&agenda)?;
            } else {
                output::print_agenda(&agenda);
            }
        }

        Command::Release { effector } => {
            let reply = client.release_effector(&effector).await?;
            if as_json {
                output::print_json(&reply)?;
            } else {
                println!("{} {}", style("Released").green(), effector);
            }
        }

        Command::Speech { text, speaker } => {
            let speaker_id = speaker
                .or_else(|| config.default_speaker.clone())
                .context("No speaker given; pass --speaker or set default_speaker in the config")?;
            let reply = client.signal_speech(&text, &Speaker::from(speaker_id)).await?;
            if as_json {
                output::print_json(&reply)?;
            } else {
                println!("{}", style("Speech delivered").green());
            }
        }

        Command::Load { package, file } => {
            let pb = output::spinner(&format!("Loading {}/{}", package, file));
            let result = client.load_knowledge(&package, &file).await;
            pb.finish_and_clear();

            let resources = result?;
            if as_json {
                output::print_json(&resources)?;
            } else {
                output::print_resources(&resources);
            }
        }

        Command::Exec { file } => {
            let source = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read OntoLang source from stdin")?;
                    buffer
                }
            };

            let pb = output::spinner("Executing OntoLang");
            let result = client.execute_ontolang(&source).await;
            pb.finish_and_clear();

            let outcome = result?;
            if as_json {
                output::print_json(&outcome)?;
            } else {
                output::print_ontolang_result(&outcome);
            }
        }

        Command::Heartbeat { action } => match action {
            HeartbeatAction::Pulse => {
                client.heartbeat_pulse().await?;
                println!("{}", style("Pulse complete").green());
            }
            HeartbeatAction::Start => {
                client.heartbeat_start().await?;
                println!("{}", style("Heartbeat started").green());
            }
            HeartbeatAction::Stop => {
                client.heartbeat_stop().await?;
                println!("{}", style("Heartbeat stopped").green());
            }
        },

        #[cfg(feature = "demo")]
        Command::AddGoal {
            definition,
            variables,
            subgoal_of,
        } => {
            let mut bindings = std::collections::HashMap::new();
            for pair in &variables {
                let (name, value) = pair.split_once('=').with_context(|| {
                    format!("Invalid variable binding '{}'; expected NAME=VALUE", pair)
                })?;
                bindings.insert(name.to_string(), value.to_string());
            }

            let reply = client.demo_add_goal(&definition, &bindings, &subgoal_of).await?;
            if as_json {
                output::print_json(&reply)?;
            } else {
                println!("{} {}", style("Goal added").green(), definition);
            }
        }
    }

    Ok(())
}
