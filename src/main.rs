use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use sweepbox::cli::session::resolve_mode;
use sweepbox::cli::{SweepContext, run_session};
use sweepbox::domain::{ClassifierStrategy, NameClassifier};
use sweepbox::infra::config::{AppConfig, default_config_dir, load_app_config};
use sweepbox::infra::{DisplayMode, log_writer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sweepbox",
    version,
    about = "Remove containers que ainda usam o nome gerado automaticamente"
)]
struct Cli {
    /// Diretório de configuração (default: ~/.config/sweepbox)
    #[arg(long, env = "SWEEPBOX_CONFIG_DIR", default_value_os_t = default_config_dir())]
    config_dir: PathBuf,

    /// Endpoint do engine (unix:///caminho/do.sock ou tcp://host:porta)
    #[arg(long, env = "SWEEPBOX_HOST")]
    host: Option<String>,

    /// Interface de confirmação
    #[arg(long, value_enum)]
    mode: Option<DisplayMode>,

    /// Critério para reconhecer nomes gerados
    #[arg(long, value_enum)]
    classifier: Option<ClassifierStrategy>,

    /// Apenas lista os candidatos, sem remover nada
    #[arg(long)]
    dry_run: bool,

    /// Aumenta o nível de log (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Mostra se cada nome seria considerado gerado automaticamente
    Check {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Cli {
    fn overrides(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.runtime.host = self.host.clone();
        config.classifier.strategy = self.classifier;
        config.display.mode = self.mode;
        config
    }
}

fn init_tracing(verbose: u8, interactive: bool, config_dir: &Path) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_writer(interactive, config_dir))
        .with_ansi(!interactive)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_app_config(&cli.config_dir)?;
    config.merge(cli.overrides());

    if let Some(Commands::Check { names }) = &cli.command {
        init_tracing(cli.verbose, false, &cli.config_dir);
        return check(names, config.strategy());
    }

    let mode = resolve_mode(config.mode());
    init_tracing(
        cli.verbose,
        mode == DisplayMode::Interactive,
        &cli.config_dir,
    );

    let ctx = SweepContext::connect(config).await?;
    let result = run_session(
        &ctx,
        mode,
        cli.dry_run,
        io::stdin().lock(),
        &mut io::stdout(),
    )
    .await;
    ctx.close().await;

    result.map(|_| ())
}

fn check(names: &[String], strategy: ClassifierStrategy) -> Result<()> {
    let classifier = NameClassifier::new(strategy);
    for name in names {
        let name = name.strip_prefix('/').unwrap_or(name);
        let verdict = if classifier.is_auto_generated(name) {
            "automático"
        } else {
            "personalizado"
        };
        println!("{name}: {verdict}");
    }
    Ok(())
}
