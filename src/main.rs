//! Resume matcher: compare a resume against a job description via the analysis service

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::client::{AnalysisClient, AnalysisRequest};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::{FieldSource, FormState, InputManager};
use resume_matcher::output::actions::{self, Section};
use resume_matcher::output::formatter::{ReportGenerator, ReportView};
use resume_matcher::output::report::AnalysisData;
use resume_matcher::output::score::animate_score;
use resume_matcher::output::view::{Panel, TabSelection, ViewState};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// Everything the `analyze` command was asked to do
struct AnalyzeOptions {
    jd_text: Option<String>,
    jd_file: Option<PathBuf>,
    resume_text: Option<String>,
    resume_file: Option<PathBuf>,
    tab: Option<String>,
    output: Option<String>,
    save: Option<PathBuf>,
    copy: Option<String>,
    download: Vec<String>,
    download_dir: Option<PathBuf>,
    no_animate: bool,
    hide: Vec<String>,
    multipart: bool,
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        eprintln!("{} {}", "✖".red().bold(), e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze {
            jd_text,
            jd_file,
            resume_text,
            resume_file,
            server,
            tab,
            output,
            save,
            copy,
            download,
            download_dir,
            no_animate,
            hide,
            multipart,
            no_color,
        } => {
            if let Some(server) = server {
                config.server.base_url = server;
            }

            let options = AnalyzeOptions {
                jd_text,
                jd_file,
                resume_text,
                resume_file,
                tab,
                output,
                save,
                copy,
                download,
                download_dir,
                no_animate,
                hide,
                multipart,
                no_color,
            };
            run_analysis(options, &config).await
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("{}", content);
                println!("Analysis endpoint: {}", config.analyze_url());
                Ok(())
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
                Ok(())
            }

            Some(ConfigAction::Set { key, value }) => {
                Config::update_file(&config_path, &key, &value)?;
                println!("🔧 Set {} = {}", key, value);
                Ok(())
            }
        },
    }
}

async fn run_analysis(options: AnalyzeOptions, config: &Config) -> Result<()> {
    let format = match &options.output {
        Some(name) => cli::parse_output_format(name).map_err(ResumeMatcherError::InvalidInput)?,
        None => config.output.format,
    };

    let tab = options.tab.as_deref().unwrap_or(&config.output.default_tab);
    let mut view = ViewState::new(TabSelection::parse(tab).map_err(ResumeMatcherError::InvalidInput)?);
    for name in &options.hide {
        view.hide_panel(Panel::parse(name).map_err(ResumeMatcherError::InvalidInput)?);
    }

    let copy = options
        .copy
        .as_deref()
        .map(Section::parse)
        .transpose()
        .map_err(ResumeMatcherError::InvalidInput)?;
    let downloads = options
        .download
        .iter()
        .map(|name| Section::parse(name))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(ResumeMatcherError::InvalidInput)?;

    let use_colors = config.output.color_output && !options.no_color;
    if !use_colors {
        colored::control::set_override(false);
    }

    let form = FormState::new(
        FieldSource::from_parts(options.jd_text, options.jd_file),
        FieldSource::from_parts(options.resume_text, options.resume_file),
    );
    form.validate()?;

    view.begin_submit();
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(view.submit_state().label());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = submit(&form, config, options.multipart).await;
    spinner.finish_and_clear();

    let data = match result {
        Ok(data) => {
            view.finish_success();
            data
        }
        Err(e) => {
            view.finish_error(e.to_string());
            debug!("Submit control back to: {}", view.submit_state().label());
            return Err(e);
        }
    };

    let panels = view.visible_panels(&data);
    let report = ReportView::new(&data, &panels);

    if format == OutputFormat::Console && config.output.animate_score && !options.no_animate {
        if let Some(score) = data.score.filter(|_| panels.contains(&Panel::Score)) {
            animate_score(score).await;
        }
    }

    let generator = ReportGenerator::with_options(use_colors, true, true, true);
    println!("{}", generator.generate_report(&report, &format)?);

    if let Some(path) = &options.save {
        let content = ReportGenerator::with_options(false, true, true, true).generate_report(&report, &format)?;
        actions::save_report_to_file(&content, path)?;
        println!("💾 Report saved to {}", path.display());
    }

    run_actions(&report, copy, &downloads, format, options.download_dir, config)
}

/// Resolve the form and send the single analysis request
async fn submit(form: &FormState, config: &Config, force_multipart: bool) -> Result<AnalysisData> {
    let mut input_manager = InputManager::new().with_local_extraction(config.input.extract_locally);
    let (jd, resume) = input_manager.resolve(form).await?;

    let request = AnalysisRequest::build(jd, resume, config.input.prefer_multipart || force_multipart);
    let client = AnalysisClient::from_config(config)?;
    info!("Analyzing via {}", client.url());

    client.analyze(&request).await
}

fn run_actions(
    report: &ReportView,
    copy: Option<Section>,
    downloads: &[Section],
    format: OutputFormat,
    download_dir: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    if let Some(section) = copy {
        let text = actions::section_text(section, report)?;
        actions::copy_to_clipboard(&text, actions::CLIPBOARD_HOLD)?;
        println!("📋 Copied {} to clipboard", section);
    }

    let dir = download_dir.unwrap_or_else(|| config.downloads.dir.clone());
    for section in downloads {
        let path = actions::download(*section, report, format, &dir, config.downloads.timestamp_filenames)?;
        println!("💾 Downloaded {} to {}", section, path.display());
    }

    Ok(())
}
