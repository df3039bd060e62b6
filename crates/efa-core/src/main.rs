//! efa-core: serve or render the "endpoints available for apps" reference page.

use clap::{Args, Parser, Subcommand, ValueEnum};
use efa_common::{Error, Result};
use efa_config::{load_config, resolve_config, resolve_data_path, Config, ConfigPaths};
use efa_core::exit_codes::ExitCode;
use efa_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use efa_core::{AvailabilityProvider, JsonFileSource, PageRequest, PageServer, PageService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "efa-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the page over HTTP
    Serve(ServeArgs),
    /// Render the page for one version to stdout or a file
    Render(RenderArgs),
    /// List versions in the availability data
    Versions(DataArgs),
    /// Validate configuration and availability data
    Check(DataArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Path to the availability JSON (overrides EFA_DATA and config)
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Bind address (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Worker threads (overrides config)
    #[arg(long)]
    workers: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RenderFormat {
    Html,
    Json,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Version id to render, e.g. free-pro-team@latest
    #[arg(long = "page-version")]
    page_version: String,

    /// Locale for link targets (defaults to the site default)
    #[arg(long)]
    locale: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "html")]
    format: RenderFormat,

    /// Write to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.global.quiet {
        LogLevel::Error
    } else {
        match cli.global.verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    };
    let cli_level = (cli.global.quiet || cli.global.verbose > 0).then_some(level);
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let result = match &cli.command {
        Commands::Serve(args) => run_serve(&cli.global, args),
        Commands::Render(args) => run_render(&cli.global, args),
        Commands::Versions(args) => run_versions(&cli.global, args),
        Commands::Check(args) => run_check(&cli.global, args),
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Clean,
        Err(e) => {
            eprintln!("{}", e.format_human());
            ExitCode::from_error(&e)
        }
    };
    std::process::exit(exit_code.as_i32());
}

fn load(global: &GlobalOpts) -> Result<(ConfigPaths, Config)> {
    let paths = resolve_config(global.config.as_deref());
    let config = load_config(&paths)?;
    info!(
        source = %paths.source,
        path = ?paths.config,
        "configuration loaded"
    );
    Ok((paths, config))
}

fn build_service(config: &Config, data: &Path) -> PageService {
    let provider = AvailabilityProvider::new(JsonFileSource::new(data));
    PageService::new(provider, &config.site)
}

fn run_serve(global: &GlobalOpts, args: &ServeArgs) -> Result<()> {
    let (_, mut config) = load(global)?;
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(workers) = args.workers {
        config.server.workers = workers;
    }
    efa_config::validate_config(&config)?;

    let data = resolve_data_path(args.data.data.as_deref(), &config);
    let service = Arc::new(build_service(&config, &data));

    let server = PageServer::start(&config.listen_addr(), config.server.workers, service)?;
    println!("serving on http://{}", server.addr());
    server.wait();
    Ok(())
}

fn run_render(global: &GlobalOpts, args: &RenderArgs) -> Result<()> {
    let (_, config) = load(global)?;
    let data = resolve_data_path(args.data.data.as_deref(), &config);
    let service = build_service(&config, &data);

    let mut request = PageRequest::for_version(&args.page_version, args.locale.clone());
    if matches!(args.format, RenderFormat::Json) {
        request.query = Some("format=json".to_string());
    }
    let response = service.handle(&request)?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, &response.body)?;
            info!(path = %path.display(), bytes = response.body.len(), "page written");
        }
        None => println!("{}", response.body),
    }
    Ok(())
}

fn run_versions(global: &GlobalOpts, args: &DataArgs) -> Result<()> {
    let (_, config) = load(global)?;
    let data = resolve_data_path(args.data.as_deref(), &config);
    let service = build_service(&config, &data);
    let availability = service.provider().ensure_loaded()?;

    for (version, categories) in availability.iter() {
        println!(
            "{}\t{} categories\t{} operations",
            version,
            categories.len(),
            categories.operation_count()
        );
    }
    Ok(())
}

fn run_check(global: &GlobalOpts, args: &DataArgs) -> Result<()> {
    let (paths, config) = load(global)?;
    let data = resolve_data_path(args.data.as_deref(), &config);
    let service = build_service(&config, &data);
    let availability = service.provider().ensure_loaded()?;

    if availability.is_empty() {
        return Err(Error::MalformedData(format!(
            "{} contains no versions",
            data.display()
        )));
    }

    println!("config: ok ({})", paths.source);
    println!(
        "data: ok ({}, {} versions)",
        data.display(),
        availability.len()
    );
    Ok(())
}
