//! `corebox` command line: thin wrappers over the toolkit helpers plus a
//! demo run of the composed facades.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use corebox::core::collection::jsonify;
use corebox::core::identity::{id, timestamp, timestamp_compact};
use corebox::core::merge::{ArrayMerge, merge_with};
use corebox::event::{EventBus, handler};
use corebox::exit_codes;
use corebox::io::config::{CoreboxConfig, load_config, write_config};
use corebox::io::env::env_name;
use corebox::io::fs::{ListOptions, globify, load, ls};
use corebox::log::Logger;
use corebox::logging;
use corebox::state::StateStore;
use corebox::toolkit::Corebox;
use serde_json::{Map, Value, json};

#[derive(Parser)]
#[command(name = "corebox", version, about = "Small utility toolkit")]
struct Cli {
    /// Path to the TOML config file. Missing files mean defaults.
    #[arg(long, global = true, default_value = "corebox.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a random UUID v4.
    Id,
    /// Print the current UTC timestamp.
    Timestamp {
        /// Use the compact `YYYYMMDD_HHMMSS_mmm` form.
        #[arg(long)]
        compact: bool,
    },
    /// Print the environment name (`COREBOX_ENV`, default `development`).
    Env,
    /// Deep-merge two JSON object files and print the result.
    Merge {
        left: PathBuf,
        right: PathBuf,
        /// Replace arrays instead of concatenating them.
        #[arg(long)]
        overwrite_arrays: bool,
        /// Indent the output.
        #[arg(long)]
        pretty: bool,
    },
    /// List directory entries.
    Ls {
        dir: PathBuf,
        #[arg(long)]
        only_dir: bool,
        #[arg(long)]
        only_file: bool,
    },
    /// Print every path matching the glob patterns (`!pattern` excludes).
    Glob {
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// Write the default config to `--config`.
    Init {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Exercise events, logging and state, then exit through `fatal`.
    Demo,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    logging::init(config.log.level.tracing_directive());

    match cli.command {
        Command::Id => {
            println!("{}", id());
            Ok(())
        }
        Command::Timestamp { compact } => {
            if compact {
                println!("{}", timestamp_compact(None));
            } else {
                println!("{}", timestamp());
            }
            Ok(())
        }
        Command::Env => {
            println!("{}", env_name());
            Ok(())
        }
        Command::Merge {
            left,
            right,
            overwrite_arrays,
            pretty,
        } => cmd_merge(&left, &right, overwrite_arrays, pretty),
        Command::Ls {
            dir,
            only_dir,
            only_file,
        } => cmd_ls(&dir, ListOptions { only_dir, only_file }),
        Command::Glob { patterns } => {
            let patterns: Vec<&str> = patterns.iter().map(String::as_str).collect();
            for path in globify(&patterns)? {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Demo => cmd_demo(&config),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (pass --force to replace it)", path.display());
    }
    write_config(path, &CoreboxConfig::default())?;
    println!("wrote {}", path.display());
    Ok(())
}

fn cmd_merge(left: &Path, right: &Path, overwrite_arrays: bool, pretty: bool) -> Result<()> {
    let arrays = if overwrite_arrays {
        ArrayMerge::Overwrite
    } else {
        ArrayMerge::Concat
    };
    let merged = merge_with(&read_object(left)?, &read_object(right)?, arrays);
    println!("{}", jsonify(&merged, pretty).context("serialize merged json")?);
    Ok(())
}

fn cmd_ls(dir: &Path, options: ListOptions) -> Result<()> {
    for path in ls(dir, options)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn cmd_demo(config: &CoreboxConfig) -> Result<()> {
    let mut corebox = Corebox::from_config(config);

    corebox.events().on(
        "hello",
        handler(|args| println!("event hello {}", render_args(args))),
    );
    corebox.events().emit("hello", &[json!("world")]);

    println!("id {}", corebox.id());
    println!("env {}", corebox.env());

    corebox.log().info("info message").warn("warning message");
    println!("any_error() {}", corebox.log().any_error());
    corebox.log().error("error message");
    println!("any_error() {}", corebox.log().any_error());

    println!("state empty {}", jsonify(&corebox.state().read(), false)?);
    for partial in [
        json!({ "counter": 0 }),
        json!({ "counter": 1 }),
        json!({ "name": "foobar" }),
    ] {
        let partial = as_object(partial, "demo state")?;
        let snapshot = corebox.state_mut().append(&partial);
        println!("state {}", jsonify(&snapshot, false)?);
    }
    corebox.state_mut().reset();
    println!("state was reset {}", jsonify(&corebox.state().read(), false)?);

    std::io::stdout().flush().context("flush stdout")?;
    corebox
        .log()
        .fatal("fake fatal error that exits the process")
}

fn read_object(path: &Path) -> Result<Map<String, Value>> {
    let raw = load(path)?;
    let value: Value =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    as_object(value, &path.display().to_string())
}

fn as_object(value: Value, what: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("{what} must contain a JSON object, found {other}"),
    }
}

fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
