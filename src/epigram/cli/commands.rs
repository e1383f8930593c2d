//! # CLI Layer
//!
//! The only place that:
//! - knows about stdin, stdout and stderr
//! - installs the tracing subscriber
//! - decides the data directory
//!
//! Each handler calls one API method and hands the [`CmdResult`] to the
//! renderer.

use super::prompt;
use super::render::Renderer;
use super::setup::{Cli, Commands, HistoryAction, SignInArgs, SignUpArgs, WriteArgs};
use clap::Parser;
use directories::ProjectDirs;
use epigram::api::EpigramApi;
use epigram::client::http::HttpClient;
use epigram::commands::config::ConfigAction;
use epigram::commands::{CmdResult, EpigramPaths};
use epigram::config::EpigramConfig;
use epigram::error::{EpigramError, Result};
use epigram::form::{FormState, NEW_EPIGRAM_FIELDS, SIGN_IN_FIELDS, SIGN_UP_FIELDS};
use epigram::store::fs::FileStore;
use epigram::validation::Field;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const HOME_ENV: &str = "EPIGRAM_HOME";

struct AppContext {
    api: EpigramApi<HttpClient, FileStore>,
    renderer: Renderer,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Search { term, pages }) => handle_search(&mut ctx, term, pages).await,
        Some(Commands::History { action }) => handle_history(&mut ctx, action).await,
        Some(Commands::List) => handle_list(&ctx).await,
        Some(Commands::Today) | None => handle_today(&ctx).await,
        Some(Commands::Show { id }) => handle_show(&ctx, id).await,
        Some(Commands::Signup(args)) => handle_signup(&mut ctx, args).await,
        Some(Commands::Login(args)) => handle_login(&mut ctx, args).await,
        Some(Commands::Logout) => {
            let result = ctx.api.sign_out()?;
            print!("{}", ctx.renderer.messages(&result.messages));
            Ok(())
        }
        Some(Commands::Write(args)) => handle_write(&ctx, args).await,
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("epigram=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("epigram=warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    ProjectDirs::from("", "", "epigram")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| EpigramError::Config("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data = data_dir()?;
    std::fs::create_dir_all(&data)?;
    tracing::debug!("Using data directory {}", data.display());

    let config = EpigramConfig::load(&data)?.with_env_overrides();
    let source = HttpClient::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
    let store = FileStore::new(&data);
    let api = EpigramApi::new(source, store, config, EpigramPaths { data });

    let renderer = if cli.no_color {
        Renderer::new(false)
    } else {
        Renderer::detect()
    };
    Ok(AppContext { api, renderer })
}

fn print_search_result(ctx: &AppContext, result: &CmdResult) {
    print!("{}", ctx.renderer.messages(&result.messages));
    if let Some(page) = &result.page {
        let empty = format!("No results for '{}'.", page.term);
        print!(
            "{}",
            ctx.renderer
                .cards(&result.listed, &page.term, Some(page), &empty)
        );
    }
}

async fn handle_search(ctx: &mut AppContext, term: Vec<String>, pages: usize) -> Result<()> {
    let term = term.join(" ");
    let mut result = ctx.api.search(&term).await;
    for _ in 1..pages {
        if !ctx.api.session().can_load_more() {
            break;
        }
        result = ctx.api.load_more();
    }
    print_search_result(ctx, &result);
    Ok(())
}

async fn handle_history(ctx: &mut AppContext, action: Option<HistoryAction>) -> Result<()> {
    match action {
        None => {
            let result = ctx.api.history();
            print!("{}", ctx.renderer.history(&result.history));
        }
        Some(HistoryAction::Clear { yes }) => {
            let count = ctx.api.session().history().len();
            if !yes && count > 0 {
                let question = format!("Clear {} recent search(es)?", count);
                let stdin = std::io::stdin();
                if !prompt::confirm(&question, &mut stdin.lock())? {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            let result = ctx.api.clear_history()?;
            print!("{}", ctx.renderer.messages(&result.messages));
        }
        Some(HistoryAction::Run { index }) => {
            let result = ctx.api.search_history_entry(index).await?;
            print_search_result(ctx, &result);
        }
    }
    Ok(())
}

async fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_epigrams().await;
    print!(
        "{}",
        ctx.renderer
            .cards(&result.listed, "", result.page.as_ref(), "")
    );
    print!("{}", ctx.renderer.messages(&result.messages));
    Ok(())
}

fn print_epigram_result(ctx: &AppContext, result: &CmdResult) {
    if let Some(epigram) = &result.epigram {
        print!("{}", ctx.renderer.epigram(epigram));
    }
    print!("{}", ctx.renderer.messages(&result.messages));
}

async fn handle_today(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.today().await;
    print_epigram_result(ctx, &result);
    Ok(())
}

async fn handle_show(ctx: &AppContext, id: u64) -> Result<()> {
    let result = ctx.api.show(id).await;
    print_epigram_result(ctx, &result);
    Ok(())
}

/// Print the outcome of a form command. Rejected forms show every field
/// with its inline error and fail the command.
fn finish_form(ctx: &AppContext, form: &FormState, result: CmdResult, dry_run: bool) -> Result<()> {
    if result.is_rejected() {
        let views = prompt::views_with_errors(form, &result.field_errors);
        print!("{}", ctx.renderer.form(&views));
        return Err(EpigramError::Validation(format!(
            "{} field(s) need attention",
            result.field_errors.len()
        )));
    }
    if dry_run {
        print!("{}", ctx.renderer.form(&prompt::views(form)));
    }
    print!("{}", ctx.renderer.messages(&result.messages));
    Ok(())
}

fn read_form(fields: &[Field], given: Vec<(Field, Option<String>)>) -> Result<FormState> {
    let stdin = std::io::stdin();
    Ok(prompt::fill_form(fields, given, &mut stdin.lock())?)
}

async fn handle_signup(ctx: &mut AppContext, args: SignUpArgs) -> Result<()> {
    let form = read_form(
        SIGN_UP_FIELDS,
        vec![
            (Field::Email, args.email),
            (Field::Nickname, args.nickname),
            (Field::Password, args.password),
            (Field::PasswordConfirmation, args.password_confirmation),
        ],
    )?;
    let result = ctx
        .api
        .sign_up(form.values().clone(), args.dry_run)
        .await?;
    finish_form(ctx, &form, result, args.dry_run)
}

async fn handle_login(ctx: &mut AppContext, args: SignInArgs) -> Result<()> {
    let form = read_form(
        SIGN_IN_FIELDS,
        vec![(Field::Email, args.email), (Field::Password, args.password)],
    )?;
    let result = ctx
        .api
        .sign_in(form.values().clone(), args.dry_run)
        .await?;
    finish_form(ctx, &form, result, args.dry_run)
}

async fn handle_write(ctx: &AppContext, args: WriteArgs) -> Result<()> {
    let form = read_form(
        NEW_EPIGRAM_FIELDS,
        vec![
            (Field::EpigramContent, args.content),
            (Field::Author, args.author),
            (Field::ReferenceTitle, args.reference_title),
            (Field::ReferenceUrl, args.reference_url),
        ],
    )?;
    let result = ctx
        .api
        .create_epigram(form.values().clone(), &args.tags, args.dry_run)
        .await?;
    if let Some(epigram) = &result.epigram {
        print!("{}", ctx.renderer.epigram(epigram));
    }
    finish_form(ctx, &form, result, args.dry_run)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = ctx.api.config_action(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print!("{}", ctx.renderer.config(config));
        }
    }
    print!("{}", ctx.renderer.messages(&result.messages));
    Ok(())
}
