//! Console engine boundary and the interactive command set.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use imecontrol_core::{BasicOption, EngineBoundary};
use std::str::FromStr;
use tokio::sync::mpsc;
use tracing::debug;

/// Engine boundary that prints every call and accepts it.
pub struct ConsoleEngine;

#[async_trait]
impl EngineBoundary for ConsoleEngine {
    async fn set_option(&self, option: &str, value: bool) -> Result<()> {
        debug!(option, value, "console set_option");
        println!("  → set_option({:?}, {})", option, value);
        Ok(())
    }

    async fn set_ime(&self, schema_id: &str) -> Result<()> {
        debug!(schema = schema_id, "console set_ime");
        println!("  → set_ime({:?})", schema_id);
        Ok(())
    }
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Cycle,
    Toggle(BasicOption),
    /// Simulated engine notification (`id` on, `!id` off)
    Sync(Vec<String>),
    Deploy(bool),
    State,
    Menu,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };
        let rest: Vec<String> = words.map(str::to_string).collect();

        let command = match (head, rest.as_slice()) {
            ("select", [id]) => Command::Select(id.clone()),
            ("cycle", []) => Command::Cycle,
            ("toggle", [option]) => match BasicOption::from_id(option) {
                Some(option) => Command::Toggle(option),
                None => bail!("unknown option {:?}", option),
            },
            ("sync", ids) if !ids.is_empty() => Command::Sync(ids.to_vec()),
            ("deploy", [flag]) => match flag.as_str() {
                "on" => Command::Deploy(true),
                "off" => Command::Deploy(false),
                _ => bail!("deploy expects on|off"),
            },
            ("state", []) => Command::State,
            ("menu", []) => Command::Menu,
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => bail!("unrecognized command: {}", line.trim()),
        };
        Ok(command)
    }
}

/// Hand a simulated notification to the sync loop. Fails once the loop is gone.
pub fn forward_sync(tx: &mpsc::UnboundedSender<Vec<String>>, ids: Vec<String>) -> Result<()> {
    tx.send(ids)
        .map_err(|e| anyhow!("sync channel closed, dropped {:?}", e.0))
}

pub const HELP: &str = "\
Commands:
  select <schema_id>     switch schema
  cycle                  select the next variant
  toggle <option>        flip ascii_mode | full_shape | extended_charset | ascii_punct | emoji_suggestion
  sync <id> [<id>...]    simulate an engine notification (!id = off)
  deploy on|off          pin variants to deployment config
  state                  print current state
  menu                   print the schema menu as JSON
  quit";
