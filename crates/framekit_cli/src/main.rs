//! framekit command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, open the store and run one use case.
//! - Print the JSON response body; exit non-zero on 4xx/5xx.

use clap::{Args, Parser, Subcommand};
use framekit_core::api::{circles, frames};
use framekit_core::{init_logging, open_db, ApiResponse, AppConfig, SearchParams};
use log::error;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "framekit")]
#[command(about = "Manage non-overlapping frames and the circles placed inside them")]
#[command(version)]
struct Cli {
    /// SQLite database file (overrides FRAMEKIT_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides FRAMEKIT_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides FRAMEKIT_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Frame operations
    Frame {
        #[command(subcommand)]
        command: FrameCommands,
    },

    /// Circle operations
    Circle {
        #[command(subcommand)]
        command: CircleCommands,
    },
}

#[derive(Subcommand)]
enum FrameCommands {
    /// Create a frame, optionally with an initial batch of circles
    Create {
        #[arg(long)]
        x: String,
        #[arg(long)]
        y: String,
        #[arg(long)]
        width: String,
        #[arg(long)]
        height: String,

        /// Nested circle as `x,y,diameter`; repeatable
        #[arg(long = "circle", value_name = "X,Y,DIAMETER")]
        circles: Vec<String>,
    },

    /// Show a frame with its circle metrics
    Show { id: String },

    /// Delete a frame that owns no circles
    Delete { id: String },
}

#[derive(Subcommand)]
enum CircleCommands {
    /// Create a circle inside a frame
    Create {
        frame_id: String,
        #[command(flatten)]
        fields: CircleFields,
    },

    /// Update a circle; omitted fields keep their value
    Update {
        id: String,
        #[command(flatten)]
        fields: CircleFields,
    },

    /// Delete a circle
    Delete { id: String },

    /// List circles fully inside a search disk
    Search {
        #[arg(long)]
        center_x: Option<String>,
        #[arg(long)]
        center_y: Option<String>,
        #[arg(long)]
        radius: Option<String>,

        /// Restrict results to one frame
        #[arg(long)]
        frame_id: Option<String>,
    },
}

#[derive(Args)]
struct CircleFields {
    #[arg(long)]
    x: Option<String>,
    #[arg(long)]
    y: Option<String>,
    #[arg(long)]
    diameter: Option<String>,
}

impl CircleFields {
    fn into_body(self) -> Value {
        let mut object = Map::new();
        for (key, value) in [("x", self.x), ("y", self.y), ("diameter", self.diameter)] {
            if let Some(value) = value {
                object.insert(key.to_string(), Value::String(value));
            }
        }
        json!({ "circle": object })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::from_env().and_then(|config| {
        config.with_overrides(cli.db, cli.log_level.as_deref(), cli.log_dir)
    }) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("framekit: {err}");
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("framekit: {err}");
            return ExitCode::from(2);
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=cli_open module=cli status=error path={} error={err}",
                config.db_path.display()
            );
            eprintln!("framekit: cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let response = match cli.command {
        Commands::Frame { command } => run_frame(&conn, command),
        Commands::Circle { command } => run_circle(&conn, command),
    };
    print_response(&response)
}

fn run_frame(conn: &rusqlite::Connection, command: FrameCommands) -> ApiResponse {
    match command {
        FrameCommands::Create {
            x,
            y,
            width,
            height,
            circles,
        } => {
            let nested: Vec<Value> = circles
                .iter()
                .map(String::as_str)
                .map(parse_circle_spec)
                .collect();
            let body = json!({
                "frame": { "x": x, "y": y, "width": width, "height": height, "circles": nested }
            });
            frames::create_frame(conn, &body)
        }
        FrameCommands::Show { id } => frames::show_frame(conn, &id),
        FrameCommands::Delete { id } => frames::destroy_frame(conn, &id),
    }
}

fn run_circle(conn: &rusqlite::Connection, command: CircleCommands) -> ApiResponse {
    match command {
        CircleCommands::Create { frame_id, fields } => {
            circles::create_circle(conn, &frame_id, &fields.into_body())
        }
        CircleCommands::Update { id, fields } => {
            circles::update_circle(conn, &id, &fields.into_body())
        }
        CircleCommands::Delete { id } => circles::destroy_circle(conn, &id),
        CircleCommands::Search {
            center_x,
            center_y,
            radius,
            frame_id,
        } => circles::search_circles(
            conn,
            &SearchParams {
                center_x,
                center_y,
                radius,
                frame_id,
            },
        ),
    }
}

/// Splits `x,y,diameter` into a circle object; missing parts stay absent.
fn parse_circle_spec(spec: &str) -> Value {
    let mut object = Map::new();
    for (key, part) in ["x", "y", "diameter"].into_iter().zip(spec.split(',')) {
        object.insert(key.to_string(), Value::String(part.trim().to_string()));
    }
    Value::Object(object)
}

fn print_response(response: &ApiResponse) -> ExitCode {
    match &response.body {
        Some(body) => {
            let rendered =
                serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
            if response.is_success() {
                println!("{rendered}");
            } else {
                eprintln!("{rendered}");
            }
        }
        None => println!("{{}}"),
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(u8::try_from(response.status / 100).unwrap_or(1))
    }
}
