use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codesync_core::fonts::collect_fonts;
use codesync_core::types::FontName;
use codesync_core::walker::count_nodes;
use codesync_core::{MemoryCanvas, PluginMessage, Session, SessionConfig, UiMessage};
use codesync_ir::IrNode;
use serde_json::json;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Shared-data namespace (overrides CODESYNC_NAMESPACE)
    #[arg(long, global = true)]
    namespace: Option<String>,

    /// Fallback font as FAMILY:STYLE
    #[arg(long, global = true, value_name = "FAMILY:STYLE", value_parser = parse_font)]
    default_font: Option<FontName>,

    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Materialize an IR document and print the export readback
    Import {
        #[arg(value_name = "IR")]
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Installed font as FAMILY:STYLE; repeatable. All fonts are available when omitted.
        #[arg(long = "font", value_name = "FAMILY:STYLE", value_parser = parse_font)]
        fonts: Vec<FontName>,
    },
    /// Print the number of nodes in an IR document
    Count {
        #[arg(value_name = "IR")]
        input: PathBuf,
    },
    /// Print the fonts an IR document needs
    Fonts {
        #[arg(value_name = "IR")]
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn parse_font(value: &str) -> Result<FontName, String> {
    match value.split_once(':') {
        Some((family, style)) if !family.is_empty() && !style.is_empty() => {
            Ok(FontName::new(family, style))
        }
        _ => Err(format!("expected FAMILY:STYLE, got \"{value}\"")),
    }
}

fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.to_string().parse()?)
        .from_env_lossy();

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    }
    .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

fn read_ir(path: &Path) -> Result<IrNode> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse IR from {}", path.display()))
}

fn session_config(cli: &Cli) -> SessionConfig {
    let mut config = SessionConfig::from_env();
    if let Some(namespace) = &cli.namespace {
        config.namespace = namespace.clone();
    }
    if let Some(font) = &cli.default_font {
        config.default_font = font.clone();
    }
    config
}

fn import(config: SessionConfig, input: &Path, output: Option<&Path>, fonts: &[FontName]) -> Result<()> {
    let ir = read_ir(input)?;
    info!("Input: {:?}", input);

    let canvas = if fonts.is_empty() {
        MemoryCanvas::new()
    } else {
        MemoryCanvas::with_fonts(fonts.iter().cloned())
    };

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut session = Session::new(canvas, config, tx);
    info!("Namespace: {}", session.config().namespace);
    session.handle(PluginMessage::ImportIr {
        payload: Box::new(ir),
    })?;
    let messages: Vec<UiMessage> = rx.try_iter().collect();

    let export = session.export()?;
    let rendered = serde_json::to_string_pretty(&json!({
        "export": export,
        "messages": messages,
    }))?;

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Output: {:?}", path);
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = session_config(&cli);
    match &cli.command {
        Command::Import {
            input,
            output,
            fonts,
        } => import(config, input, output.as_deref(), fonts),
        Command::Count { input } => {
            println!("{}", count_nodes(&read_ir(input)?));
            Ok(())
        }
        Command::Fonts { input } => {
            let plan = collect_fonts(&read_ir(input)?);
            println!("{}", serde_json::to_string_pretty(plan.fonts())?);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level, cli.log_format) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_font() {
        assert_eq!(parse_font("Inter:Bold"), Ok(FontName::new("Inter", "Bold")));
        assert_eq!(
            parse_font("Source Sans Pro:Semi Bold"),
            Ok(FontName::new("Source Sans Pro", "Semi Bold"))
        );
        assert!(parse_font("Inter").is_err());
        assert!(parse_font(":Bold").is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "codesync",
            "import",
            "card.json",
            "--font",
            "Inter:Regular",
            "--font",
            "Inter:Bold",
            "--namespace",
            "acme",
        ])
        .unwrap();
        assert_eq!(cli.namespace.as_deref(), Some("acme"));
        match cli.command {
            Command::Import { fonts, output, .. } => {
                assert_eq!(fonts.len(), 2);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_session_config_overrides() {
        let cli = Cli::try_parse_from([
            "codesync",
            "count",
            "card.json",
            "--namespace",
            "acme",
            "--default-font",
            "Roboto:Regular",
        ])
        .unwrap();
        let config = session_config(&cli);
        assert_eq!(config.namespace, "acme");
        assert_eq!(config.default_font, FontName::new("Roboto", "Regular"));
    }
}
