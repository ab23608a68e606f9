use std::{io::IsTerminal, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orgtm_core::{load_config_from_file, load_config_from_user, Config, MappingCategory};
use serde::Serialize;
use time::{macros::format_description, Date, OffsetDateTime};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (.lua, .yaml or .json); defaults to ~/.config/orgtm/config.lua
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging (ORGTM_LOG / RUST_LOG take precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Classified TODO keywords
    Keywords,
    /// Next (or previous) keyword after CURRENT; no CURRENT starts the cycle
    Cycle { current: Option<String>, #[arg(long)] prev: bool },
    /// Agenda span in days, starting at FROM (default: today)
    Span { #[arg(long)] from: Option<String> },
    /// Archive file for FILE
    Archive { file: PathBuf, #[arg(long)] location: Option<String> },
    /// Tags a child heading inherits from TAGS
    Tags { tags: Vec<String> },
    /// Highest, default and lowest priority letters
    Priorities,
    /// Keybindings, optionally for one category: global|agenda|capture|org
    Mappings { category: Option<MappingCategory> },
    /// Dump the resolved options
    Config,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "orgtm=debug,orgtm_core=debug" } else { "orgtm=warn,orgtm_core=warn" };
    let filter = EnvFilter::try_from_env("ORGTM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time();
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::debug!(path = ?cli.config, "loading configuration");
    let cfg: Config = match &cli.config {
        Some(path) => load_config_from_file(path)?,
        None => load_config_from_user(),
    };
    let json = cli.json;

    match cli.command.unwrap_or(Cmd::Keywords) {
        Cmd::Keywords => {
            let kw = cfg.todo_keywords()?;
            emit(json, &*kw, |kw| {
                println!("active: {}", kw.active.join(" "));
                println!("done:   {}", kw.done.join(" "));
                for e in &kw.fast_access {
                    let key = e.shortcut.map(String::from).unwrap_or_default();
                    println!("  [{key}] {} ({})", e.value, e.category.as_str());
                }
            })?;
        }
        Cmd::Cycle { current, prev } => {
            let kw = cfg.todo_keywords()?;
            let next = kw.cycle(current.as_deref(), if prev { -1 } else { 1 });
            emit(json, &next, |n| println!("{}", n.unwrap_or("")))?;
        }
        Cmd::Span { from } => {
            let start = match from {
                Some(s) => Date::parse(&s, format_description!("[year]-[month]-[day]"))
                    .with_context(|| format!("invalid date '{s}' (use YYYY-MM-DD)"))?,
                None => OffsetDateTime::now_utc().date(),
            };
            let days = cfg.agenda_span().days_from(start);
            emit(json, &days, |d| println!("{d}"))?;
        }
        Cmd::Archive { file, location } => {
            let out = cfg.archive_file(&file, location.as_deref())?;
            emit(json, &out, |p| println!("{}", p.display()))?;
        }
        Cmd::Tags { tags } => {
            let inherited = cfg.inheritable_tags(&tags[..]);
            emit(json, &inherited, |t| println!("{}", t.join(" ")))?;
        }
        Cmd::Priorities => {
            let p = cfg.priorities()?;
            emit(json, &p, |p| {
                println!("highest: {}", p.highest);
                println!("default: {}", p.default);
                println!("lowest:  {}", p.lowest);
            })?;
        }
        Cmd::Mappings { category } => {
            let categories = match category {
                Some(c) => vec![c],
                None => MappingCategory::ALL.to_vec(),
            };
            let bindings: Vec<_> = categories.into_iter().flat_map(|c| cfg.bindings(c)).collect();
            emit(json, &bindings, |bs| {
                for b in bs {
                    println!("{:<8} {:<14} {}", b.action.category, b.lhs, b.action.command());
                }
            })?;
        }
        Cmd::Config => {
            if json {
                println!("{}", serde_json::to_string_pretty(cfg.options())?);
            } else {
                print!("{}", serde_yaml::to_string(cfg.options())?);
            }
        }
    }
    Ok(())
}
