mod console;

use anyhow::Result;
use clap::Parser;
use console::{forward_sync, Command, ConsoleEngine, HELP};
use imecontrol_core::{BasicOption, Controller, SchemaConfig};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imecontrol")]
#[command(about = "Drive the IME schema/variant/option controller from the terminal")]
struct Args {
    /// Schema configuration (.json array or .toml document)
    #[arg(short, long)]
    config: PathBuf,

    /// Schema to select at startup (falls back to the first schema)
    #[arg(long)]
    schema_id: Option<String>,

    /// Variant display name to select at startup
    #[arg(long)]
    variant_name: Option<String>,

    /// Variants are pinned by deployment config
    #[arg(long)]
    deployed: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = SchemaConfig::load(&args.config)?;
    config.deployed |= args.deployed;
    let controller = Controller::from_config(&config, ConsoleEngine)?;

    controller
        .init(args.schema_id.as_deref(), args.variant_name.as_deref())
        .await;
    print_state(&controller);
    println!("Type `help` for commands.");

    let (notify_tx, notify_rx) = mpsc::unbounded_channel();
    let (result, ()) = tokio::join!(repl(&controller, notify_tx), controller.run_sync(notify_rx));
    result
}

/// Read commands until `quit` or end of input. Dropping `notify_tx` on
/// return ends the sync loop.
async fn repl(
    controller: &Controller<ConsoleEngine>,
    notify_tx: mpsc::UnboundedSender<Vec<String>>,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let outcome = match command {
            Command::Select(id) => {
                controller.select_ime(&id).await;
                Ok(())
            }
            Command::Cycle => controller.change_variant().await,
            Command::Toggle(option) => controller.toggle(option).await,
            // received by run_sync on the next suspension point
            Command::Sync(ids) => forward_sync(&notify_tx, ids),
            Command::Deploy(value) => {
                controller.state().set_deployed(value);
                Ok(())
            }
            Command::State => {
                print_state(controller);
                Ok(())
            }
            Command::Menu => {
                println!("{}", serde_json::to_string_pretty(&controller.state().select_options())?);
                Ok(())
            }
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => break,
        };
        if let Err(e) = outcome {
            warn!("{:#}", e);
        }
    }
    Ok(())
}

fn print_state(controller: &Controller<ConsoleEngine>) {
    let state = controller.state();
    let variants: Vec<String> = controller
        .variants()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let marker = if i == controller.variant_index() { "*" } else { " " };
            format!("{}{}", marker, if v.name.is_empty() { "-" } else { v.name.as_str() })
        })
        .collect();

    println!("schema:   {} (engine: {:?})", state.schema_id(), state.ime());
    println!("variants: {}", variants.join(" "));
    println!("comments: {:?}, extended: {}", controller.hide_comment(), controller.is_extended());
    for option in BasicOption::ALL {
        println!("  {:<18} {}", option.id(), state.option(option));
    }
}
