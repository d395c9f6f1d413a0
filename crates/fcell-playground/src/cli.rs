#![forbid(unsafe_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::color::Rgb;
use crate::config::PlaygroundConfig;
use crate::data_uri::encode_data_uri;
use crate::error::{PlaygroundError, Result};
use crate::theme::QuickTheme;

#[derive(Debug, Parser)]
#[command(
    name = "fcell-playground",
    about = "Quick-theme and data-URI tooling for fcell stylesheets",
    version
)]
pub struct Cli {
    /// Playground config file (TOML, or JSON for a `.json` extension).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print quick-theme CSS.
    Quick(QuickArgs),

    /// Encode CSS as a `data:text/css;base64,` URI.
    Encode(EncodeArgs),

    /// Print the font-size ladder.
    Ladder,

    /// Print the effective config as TOML.
    #[command(name = "show-config")]
    ShowConfig,
}

#[derive(Debug, Clone, Default, Args)]
pub struct QuickArgs {
    /// Base color as `#RRGGBB`. Defaults to the configured background.
    #[arg(long)]
    pub background: Option<String>,

    /// Starting font size. Defaults to the ladder default.
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Ladder steps from the starting size; negative values shrink.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub step: i32,

    /// Print the encoded data URI instead of the CSS.
    #[arg(long)]
    pub data_uri: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct EncodeArgs {
    /// Read the CSS from this file.
    #[arg(long, conflicts_with = "css")]
    pub file: Option<PathBuf>,

    /// CSS text.
    pub css: Option<String>,
}

pub fn run_from_env() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Quick(args) => run_quick(&config, &args, out),
        Commands::Encode(args) => run_encode(&args, out),
        Commands::Ladder => {
            let ladder = config.ladder();
            for size in ladder.sizes() {
                let marker = if *size == ladder.default_size() { " *" } else { "" };
                writeln!(out, "{size}{marker}")?;
            }
            Ok(())
        }
        Commands::ShowConfig => show_config(&config, out),
    }
}

fn load_config(path: Option<&Path>) -> Result<PlaygroundConfig> {
    let Some(path) = path else {
        return Ok(PlaygroundConfig::default());
    };
    debug!(path = %path.display(), "loading playground config");
    read_config(path)
}

#[cfg(feature = "config")]
fn read_config(path: &Path) -> Result<PlaygroundConfig> {
    Ok(PlaygroundConfig::from_file(path)?.validated()?)
}

#[cfg(not(feature = "config"))]
fn read_config(path: &Path) -> Result<PlaygroundConfig> {
    Err(PlaygroundError::Usage(format!(
        "cannot load {}: built without the `config` feature",
        path.display()
    )))
}

#[cfg(feature = "config")]
fn show_config(config: &PlaygroundConfig, out: &mut impl Write) -> Result<()> {
    out.write_all(config.to_toml_string()?.as_bytes())?;
    Ok(())
}

#[cfg(not(feature = "config"))]
fn show_config(config: &PlaygroundConfig, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{config:#?}")?;
    Ok(())
}

fn run_quick(config: &PlaygroundConfig, args: &QuickArgs, out: &mut impl Write) -> Result<()> {
    let ladder = config.ladder();
    let background = match &args.background {
        Some(hex) => Some(Rgb::parse_hex(hex)?),
        None => config.background,
    };
    let start = args.font_size.unwrap_or(ladder.default_size());
    if start == 0 {
        return Err(PlaygroundError::Usage("--font-size must be > 0".into()));
    }
    let font_size = ladder.step_by(start, args.step);
    debug!(start, step = args.step, font_size, "quick theme font size");

    let css = QuickTheme {
        background,
        font_size,
        base_font_size: ladder.default_size(),
    }
    .generate();
    if args.data_uri {
        writeln!(out, "{}", encode_data_uri(&css))?;
    } else {
        out.write_all(css.as_bytes())?;
    }
    Ok(())
}

fn run_encode(args: &EncodeArgs, out: &mut impl Write) -> Result<()> {
    let css = match (&args.file, &args.css) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(css)) => css.clone(),
        (None, None) => {
            return Err(PlaygroundError::Usage("pass CSS text or --file <PATH>".into()));
        }
    };
    writeln!(out, "{}", encode_data_uri(&css))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn run_to_string(cli: Cli) -> Result<String> {
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    fn quick(args: QuickArgs) -> Cli {
        Cli {
            config: None,
            command: Commands::Quick(args),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn quick_defaults() {
        let out = run_to_string(quick(QuickArgs::default())).expect("quick");
        assert_eq!(
            out,
            ".root {\n -fc-base: #FFFFFF;\n-fc-font-size: 100.0%;\n}\n"
        );
    }

    #[test]
    fn quick_steps_and_encodes() {
        let out = run_to_string(quick(QuickArgs {
            background: Some("#336699".into()),
            step: 3,
            data_uri: true,
            ..QuickArgs::default()
        }))
        .expect("quick");
        let css = crate::data_uri::decode_data_uri(out.trim_end()).expect("data uri");
        assert!(css.contains("#336699"));
        assert!(css.contains("133.33333333333334%"));
    }

    #[test]
    fn quick_rejects_bad_color() {
        let err = run_to_string(quick(QuickArgs {
            background: Some("teal".into()),
            ..QuickArgs::default()
        }))
        .expect_err("bad color");
        assert!(matches!(err, PlaygroundError::Color(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn encode_requires_input() {
        let err = run_to_string(Cli {
            config: None,
            command: Commands::Encode(EncodeArgs::default()),
        })
        .expect_err("no input");
        assert!(matches!(err, PlaygroundError::Usage(_)));
    }

    #[test]
    fn ladder_marks_default() {
        let out = run_to_string(Cli {
            config: None,
            command: Commands::Ladder,
        })
        .expect("ladder");
        assert!(out.lines().any(|l| l == "12 *"));
        assert_eq!(out.lines().count(), 12);
    }

    #[test]
    fn parses_negative_step() {
        let cli = Cli::try_parse_from(["fcell-playground", "quick", "--step", "-2", "--data-uri"])
            .expect("parse");
        match cli.command {
            Commands::Quick(args) => {
                assert_eq!(args.step, -2);
                assert!(args.data_uri);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
