//! Command line interface for the `hooksheet` binary

use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use hooksheet_catalog::{builtin, catalog_to_json, load_catalog, visible_set, Catalog};
use hooksheet_config::{ConfigLayer, ConfigLoader, SheetConfig};

use crate::{
    app::App,
    clipboard::SystemClipboard,
    logging::{init_logging, LogTarget},
    sheet::CheatSheet,
};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "hooksheet")]
#[command(about = "Searchable, collapsible cheat sheet in the terminal")]
#[command(version)]
pub struct Cli {
    /// Catalog file (JSON, YAML or TOML) replacing the built-in React hooks
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Extra config file, applied over user and project config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Initial search query
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Print the matching cards to stdout and exit
    #[arg(short, long)]
    pub print: bool,

    /// With --print, write the matching cards as a JSON catalog
    #[arg(long, requires = "print")]
    pub json: bool,

    /// Disable mouse capture
    #[arg(long)]
    pub no_mouse: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log file used while the interactive sheet is open
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Settings given on the command line, applied over every config source
    pub fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            catalog: self.catalog.clone(),
            mouse: self.no_mouse.then_some(false),
            ..ConfigLayer::default()
        }
    }

    /// Effective log level: `-v` flags win over the configured level
    pub fn log_level(&self, config: &SheetConfig) -> String {
        match self.verbose {
            0 => config.log_level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }

    pub fn log_target(&self) -> LogTarget {
        if self.print {
            LogTarget::Stderr
        } else {
            LogTarget::File(
                self.log_file
                    .clone()
                    .unwrap_or_else(SheetConfig::default_log_path),
            )
        }
    }
}

/// The configured catalog file, or the built-in one
pub fn load_configured_catalog(config: &SheetConfig) -> Result<Catalog> {
    match &config.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(builtin::react_hooks()),
    }
}

/// Write the cards matching `query` as plain text; returns how many matched
pub fn print_visible<W: Write>(
    catalog: &Catalog,
    query: &str,
    out: &mut W,
    show_numbers: bool,
) -> io::Result<usize> {
    let visible = visible_set(catalog, query);
    if visible.is_empty() {
        writeln!(out, "No results for \"{}\"", query)?;
        return Ok(0);
    }

    for (index, entry) in visible.iter_indexed() {
        if show_numbers {
            writeln!(out, "{:02}  {}", index + 1, entry.label())?;
        } else {
            writeln!(out, "{}", entry.label())?;
        }
        if !entry.description().is_empty() {
            writeln!(out, "    {}", entry.description())?;
        }
        writeln!(out)?;
        for line in entry.code().lines() {
            writeln!(out, "    {}", line)?;
        }
        if !entry.note().is_empty() {
            writeln!(out)?;
            writeln!(out, "    Tip: {}", entry.note())?;
        }
        writeln!(out)?;
    }

    Ok(visible.len())
}

/// Write the cards matching `query` as a JSON catalog
pub fn print_visible_json<W: Write>(catalog: &Catalog, query: &str, out: &mut W) -> Result<usize> {
    let visible = visible_set(catalog, query);
    let subset = Catalog::new(visible.iter().cloned().collect())?;
    writeln!(out, "{}", catalog_to_json(&subset)?)?;
    Ok(subset.len())
}

/// Load configuration and the catalog, then print or open the sheet
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::new()
        .explicit(cli.config.clone())
        .overrides(cli.overrides())
        .load()
        .context("Failed to load configuration")?;

    init_logging(&cli.log_level(&config), &cli.log_target())
        .context("Failed to initialise logging")?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting hooksheet");

    let catalog = load_configured_catalog(&config)?;
    let query = cli.query.clone().unwrap_or_default();
    tracing::info!(entries = catalog.len(), "Catalog loaded");

    if cli.print {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let matched = if cli.json {
            print_visible_json(&catalog, &query, &mut out)?
        } else {
            print_visible(&catalog, &query, &mut out, config.show_numbers)?
        };
        tracing::debug!(matched, "Printed cards");
        return Ok(());
    }

    let sheet = CheatSheet::from_config(Arc::new(catalog), Box::new(SystemClipboard::new()), &config)
        .with_query(query);
    App::new(sheet, config.tick_interval()).run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "hooksheet",
            "--catalog",
            "hooks.yaml",
            "-q",
            "memo",
            "--print",
            "--no-mouse",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.catalog, Some(PathBuf::from("hooks.yaml")));
        assert_eq!(cli.query.as_deref(), Some("memo"));
        assert!(cli.print);
        assert!(cli.no_mouse);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_json_requires_print() {
        assert!(Cli::try_parse_from(["hooksheet", "--json"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli {
            no_mouse: true,
            ..Cli::default()
        };
        let layer = cli.overrides();
        assert_eq!(layer.mouse, Some(false));
        assert_eq!(layer.catalog, None);

        assert!(Cli::default().overrides().is_empty());
    }

    #[test]
    fn test_log_level_and_target() {
        let config = SheetConfig::default();
        assert_eq!(Cli::default().log_level(&config), "info");

        let cli = Cli {
            verbose: 1,
            print: true,
            ..Cli::default()
        };
        assert_eq!(cli.log_level(&config), "debug");
        assert_eq!(cli.log_target(), LogTarget::Stderr);

        let cli = Cli {
            log_file: Some(PathBuf::from("/tmp/sheet.log")),
            ..Cli::default()
        };
        assert_eq!(
            cli.log_target(),
            LogTarget::File(PathBuf::from("/tmp/sheet.log"))
        );
    }

    #[test]
    fn test_print_visible() {
        let catalog = builtin::react_hooks();
        let mut out = Vec::new();
        let matched = print_visible(&catalog, "usememo", &mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(matched, 2);
        assert!(text.contains("05  useCallback"));
        assert!(text.contains("06  useMemo"));
    }

    #[test]
    fn test_print_visible_no_results() {
        let catalog = builtin::react_hooks();
        let mut out = Vec::new();
        assert_eq!(print_visible(&catalog, "zzz", &mut out, false).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "No results for \"zzz\"\n");
    }

    #[test]
    fn test_print_visible_json() {
        let catalog = builtin::react_hooks();
        let mut out = Vec::new();
        assert_eq!(print_visible_json(&catalog, "useReducer", &mut out).unwrap(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"useReducer\""));
        assert!(!text.contains("\"useState\""));
    }

    #[test]
    fn test_load_configured_catalog_defaults_to_builtin() {
        let catalog = load_configured_catalog(&SheetConfig::default()).unwrap();
        assert_eq!(catalog.len(), builtin::REACT_HOOKS_LEN);
    }

    #[test]
    fn test_load_configured_catalog_reports_path() {
        let config = SheetConfig {
            catalog: Some(PathBuf::from("/no/such/catalog.json")),
            ..SheetConfig::default()
        };
        let err = load_configured_catalog(&config).unwrap_err();
        assert!(err.to_string().contains("/no/such/catalog.json"));
    }
}
