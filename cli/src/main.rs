mod scene;

use std::fs::File;
use std::io::{self, BufReader, Read};

use board_layout::config::ConfigError;
use board_layout::doc::{AnchorDescriptor, ShapeId};
use board_layout::{
    ConnectorOffsetMode, ConnectorOptions, ErrorCode, LayoutConfig, LayoutError, create_connector,
    create_placeholder, place_shape,
};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::scene::Scene;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read scene {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{code}: {0}", code = .0.error_code())]
    Layout(#[from] LayoutError),
}

#[derive(Parser, Debug)]
#[command(name = "layoutctl", about = "Run board layout operations against a JSON scene")]
struct Cli {
    /// Scene snapshot to load; `-` reads stdin.
    #[arg(long, env = "LAYOUT_SCENE", default_value = "-")]
    scene: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shift a shape right until it clears its siblings.
    Place { id: ShapeId },
    /// Connect two shapes with a bound connector.
    Connect {
        start: ShapeId,
        end: ShapeId,
        #[arg(long)]
        parent: Option<ShapeId>,
        /// Normalized `x,y` anchor on the start shape.
        #[arg(long, value_parser = parse_anchor)]
        start_anchor: Option<AnchorDescriptor>,
        /// Normalized `x,y` anchor on the end shape.
        #[arg(long, value_parser = parse_anchor)]
        end_anchor: Option<AnchorDescriptor>,
        #[arg(long)]
        literal_offsets: bool,
    },
    /// Drop a labeled placeholder below the selection.
    Placeholder { message: String },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).inspect_err(|err| {
        if let CliError::Layout(layout) = err {
            error!(code = layout.error_code(), error = %layout, "layout operation failed");
        }
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = LayoutConfig::from_env()?;
    let scene = read_scene(&cli.scene)?;
    info!(path = %cli.scene, shapes = scene.shapes.len(), "scene loaded");
    let mut model = scene.into_model();

    let result = match cli.command {
        Command::Place { id } => {
            let offset = place_shape(&mut model, id, config.spacing)?;
            json!({ "id": id, "offset": offset })
        }
        Command::Connect { start, end, parent, start_anchor, end_anchor, literal_offsets } => {
            if literal_offsets {
                config.offset_mode = ConnectorOffsetMode::Literal;
            }
            let options = ConnectorOptions { parent_id: parent, start: start_anchor, end: end_anchor };
            let created = create_connector(&mut model, start, end, options, &config)?;
            json!({ "connector_id": created.connector_id, "bindings": created.bindings })
        }
        Command::Placeholder { message } => {
            let ids = create_placeholder(&mut model, &message, &config)?;
            json!({ "group": ids.group, "geo": ids.geo, "text": ids.text })
        }
    };

    print_json(&json!({ "result": result, "scene": Scene::from_model(&model) }))
}

fn read_scene(path: &str) -> Result<Scene, CliError> {
    let io_err = |source: io::Error| CliError::Io { path: path.to_owned(), source };
    let mut raw = String::new();
    if path == "-" {
        io::stdin().read_to_string(&mut raw).map_err(io_err)?;
    } else {
        let file = File::open(path).map_err(io_err)?;
        BufReader::new(file).read_to_string(&mut raw).map_err(io_err)?;
    }
    if raw.trim().is_empty() {
        return Ok(Scene::default());
    }
    Ok(serde_json::from_str(&raw)?)
}

fn parse_anchor(raw: &str) -> Result<AnchorDescriptor, String> {
    let Some((x, y)) = raw.split_once(',') else {
        return Err(format!("expected `x,y`, got {raw:?}"));
    };
    let parse = |part: &str| part.trim().parse::<f64>().map_err(|e| format!("{part:?}: {e}"));
    Ok(AnchorDescriptor::at(parse(x)?, parse(y)?))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
