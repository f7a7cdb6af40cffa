//! CLI entrypoint for Survey Dashboard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use survey_application::{
    BehaviorConfig, DashboardAction, DashboardController, NoProgress, ProgressNotifier,
};
use survey_domain::{GroupBy, QuestionId, Sentiment, SortSpec, SurveyColumn};
use survey_infrastructure::{ConfigLoader, FileConfig, HttpSurveyGateway};
use survey_presentation::{
    Cli, Command, DashboardRepl, OutputConfig, OutputFormatter, ProgressReporter, ReplConfig,
    TableArgs, formatter_for,
};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("Invalid command-line options")?;

    // Held until exit so buffered log lines are flushed
    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting Survey Dashboard against {}", config.api.base_url);

    let output = OutputConfig {
        format: config.output.format.unwrap_or_default(),
        color: config.output.color,
        show_progress: !cli.quiet,
    };
    output.apply_color();

    // === Dependency Injection ===
    let behavior = BehaviorConfig::from_timeout_seconds(config.api.timeout_seconds)
        .with_page_size(page_size(&config, &cli));
    let gateway = Arc::new(HttpSurveyGateway::new(
        &config.api.base_url,
        behavior.timeout,
    )?);
    let progress: Arc<dyn ProgressNotifier> = if output.progress_enabled() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(NoProgress)
    };
    let mut controller = DashboardController::new(gateway, behavior).with_progress(progress);
    let formatter = formatter_for(output.format);

    let succeeded = match cli.command {
        None | Some(Command::Interactive) => {
            let repl_config = ReplConfig {
                history_file: config.repl.history_file.as_ref().map(PathBuf::from),
            };
            let mut repl = DashboardRepl::new(controller, formatter).with_config(repl_config);
            repl.run().await.context("Interactive session failed")?;
            true
        }
        Some(Command::Upload { file }) => {
            upload(&mut controller, formatter.as_ref(), &file).await
        }
        Some(Command::Table(args)) => table(&mut controller, formatter.as_ref(), &args).await?,
        Some(Command::Chart { question, group_by }) => {
            let question: QuestionId = question.parse()?;
            let group_by = match group_by {
                Some(field) => GroupBy::parse_optional(&field)?,
                None => None,
            };
            chart(&mut controller, formatter.as_ref(), question, group_by).await
        }
        Some(Command::Sentiment) => sentiment(&mut controller, formatter.as_ref()).await,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Command-line flags take precedence over every configuration source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = Some(path.display().to_string());
    }
}

fn page_size(config: &FileConfig, cli: &Cli) -> usize {
    match &cli.command {
        Some(Command::Table(TableArgs {
            page_size: Some(size),
            ..
        })) => *size,
        _ => config.table.page_size,
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set
fn init_logging(verbose: u8, log_file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let path = PathBuf::from(path);
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Cannot create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Print the notice left by the last action; errors go to stderr
fn report_notice<G>(controller: &DashboardController<G>, formatter: &dyn OutputFormatter)
where
    G: survey_application::SurveyGateway + 'static,
{
    if let Some(notice) = controller.state().notice() {
        let text = formatter.format_notice(notice);
        if notice.is_error() {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }
}

async fn upload(
    controller: &mut DashboardController<HttpSurveyGateway>,
    formatter: &dyn OutputFormatter,
    file: &Path,
) -> bool {
    let ok = controller.upload(Some(file)).await;
    report_notice(controller, formatter);
    ok
}

async fn table(
    controller: &mut DashboardController<HttpSurveyGateway>,
    formatter: &dyn OutputFormatter,
    args: &TableArgs,
) -> Result<bool> {
    let sentiment = match args.sentiment.as_deref() {
        None => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(s.parse::<Sentiment>()?),
    };
    let sort = match args.sort.as_deref() {
        Some(column) => {
            let column: SurveyColumn = column.parse()?;
            Some(if args.desc {
                SortSpec::descending(column)
            } else {
                SortSpec::ascending(column)
            })
        }
        None => None,
    };
    if args.page == 0 {
        bail!("--page starts at 1");
    }

    if !controller.set_sentiment_filter(sentiment).await {
        report_notice(controller, formatter);
        return Ok(false);
    }
    controller.dispatch(DashboardAction::SetTableFilter(args.filter.clone()));
    controller.dispatch(DashboardAction::SortBy(sort));
    controller.dispatch(DashboardAction::GoToPage(args.page));

    let state = controller.state();
    println!(
        "{}",
        formatter.format_table(&state.table_page(), state.table_query())
    );
    Ok(true)
}

async fn chart(
    controller: &mut DashboardController<HttpSurveyGateway>,
    formatter: &dyn OutputFormatter,
    question: QuestionId,
    group_by: Option<GroupBy>,
) -> bool {
    controller.select_question(question);
    controller.select_group_by(group_by);
    if !controller.visualize().await {
        report_notice(controller, formatter);
        return false;
    }
    if let Some(panel) = controller.state().chart() {
        println!("{}", formatter.format_chart(panel));
    }
    true
}

async fn sentiment(
    controller: &mut DashboardController<HttpSurveyGateway>,
    formatter: &dyn OutputFormatter,
) -> bool {
    if !controller.refresh_surveys().await {
        report_notice(controller, formatter);
        return false;
    }
    println!(
        "{}",
        formatter.format_summary(&controller.sentiment_summary())
    );
    true
}
