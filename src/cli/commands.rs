//! Command dispatch: one function per subcommand.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::EditCommand;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, EditOp};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{extract_title, generate, PracticeSession, ToTermTree};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `cuecard --help`".to_string(),
        ));
    };

    match command {
        Commands::Parse { file } => cmd_parse(file),
        Commands::Tree { file } => cmd_tree(file),
        Commands::Fmt { file, write } => cmd_fmt(file, *write),
        Commands::Title { file } => cmd_title(file),
        Commands::Cards { file, json } => cmd_cards(file, *json),
        Commands::Chapters { file } => cmd_chapters(file),
        Commands::Locate { file, path } => cmd_locate(file, path),
        Commands::Edit {
            file,
            node,
            write,
            op,
        } => cmd_edit(file, node, *write, op),
        Commands::Convert { input, output } => cmd_convert(input, output),
        Commands::Config { command } => cmd_config(command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Services configured for the directory an outline lives in.
fn container_for(file: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(file.parent())?;
    debug!(?settings, "settings");
    Ok(ServiceContainer::new(settings))
}

fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir().map_err(|e| InfraError::io("read current directory", e).into())
}

#[instrument]
fn cmd_parse(file: &Path) -> CliResult<()> {
    let container = container_for(file)?;
    let outline = container.outline_service.load(file)?;
    output::header(&outline.name);
    output::info(&crate::domain::status_line(
        outline.tree.total_nodes(),
        outline.tree.leaf_count(),
    ));
    Ok(())
}

#[instrument]
fn cmd_tree(file: &Path) -> CliResult<()> {
    let container = container_for(file)?;
    let outline = container.outline_service.load(file)?;
    for tree in outline.tree.to_term_trees() {
        print!("{tree}");
    }
    Ok(())
}

#[instrument]
fn cmd_fmt(file: &Path, write: bool) -> CliResult<()> {
    let container = container_for(file)?;
    let mut outline = container.outline_service.load(file)?;
    if write {
        container.outline_service.write(&mut outline, file)?;
        output::action("Formatted", &file.display());
    } else {
        output::info(&container.outline_service.export_text(&outline));
    }
    Ok(())
}

#[instrument]
fn cmd_title(file: &Path) -> CliResult<()> {
    let container = container_for(file)?;
    if !container.settings.is_text_file(file) {
        let outline = container.outline_service.load(file)?;
        output::info(&outline.name);
        return Ok(());
    }
    let content = container
        .fs
        .read_to_string(file)
        .map_err(|e| InfraError::io(format!("read {}", file.display()), e))?;
    match extract_title(&content) {
        Some(title) => output::info(&title),
        None => output::warning("no `# ` title header"),
    }
    Ok(())
}

#[instrument]
fn cmd_cards(file: &Path, json: bool) -> CliResult<()> {
    let container = container_for(file)?;
    let cards = container.outline_service.cards(file)?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&cards).map_err(|e| ApplicationError::Persistence {
                path: file.to_path_buf(),
                message: e.to_string(),
            })?;
        output::info(&rendered);
        return Ok(());
    }

    if cards.is_empty() {
        output::warning("no cards");
        return Ok(());
    }
    for card in &cards {
        if !card.breadcrumb.is_empty() {
            output::dim(&card.breadcrumb.join(" > "));
        }
        output::header(&format!("[{}/{}] {}", card.ordinal, card.total, card.topic));
        for bullet in &card.bullets {
            output::detail(&format!(
                "{}- {}",
                "  ".repeat(bullet.indent_level),
                bullet.text
            ));
        }
    }
    Ok(())
}

#[instrument]
fn cmd_chapters(file: &Path) -> CliResult<()> {
    let container = container_for(file)?;
    let session = container.outline_service.practice(file, 0)?;
    let navigator = session.navigator();
    debug!(level = navigator.chapter_level(), "chapter level");
    for chapter in navigator.chapters() {
        output::info(&format!(
            "{:>4}  {} ({} cards)",
            chapter.start + 1,
            chapter.key,
            chapter.len
        ));
    }
    Ok(())
}

/// Prints the card a node maps to, then the outline collapsed down to it.
#[instrument]
fn cmd_locate(file: &Path, path: &[String]) -> CliResult<()> {
    let container = container_for(file)?;
    let mut outline = container.outline_service.load(file)?;
    let mut session = PracticeSession::new(generate(&outline.tree), 0);

    if !session.go_to_path(path) {
        return Err(ApplicationError::NodeNotFound(path.join(" > ")).into());
    }
    if let Some(card) = session.current_card() {
        output::header(&format!("{}: {}", session.position_label(), card.full_path()));
    }

    outline.tree.collapse_all();
    session.highlight_current(&mut outline.tree);
    for tree in outline.tree.to_term_trees() {
        print!("{tree}");
    }
    Ok(())
}

impl From<&EditOp> for EditCommand {
    fn from(op: &EditOp) -> Self {
        match op {
            EditOp::Add => EditCommand::Add,
            EditOp::AddChild => EditCommand::AddChild,
            EditOp::Remove => EditCommand::Remove,
            EditOp::Promote => EditCommand::Promote,
            EditOp::Demote => EditCommand::Demote,
            EditOp::MoveUp => EditCommand::MoveUp,
            EditOp::MoveDown => EditCommand::MoveDown,
            EditOp::Rename { title } => EditCommand::Rename(title.clone()),
        }
    }
}

/// Title segments with the whitespace around `>` separators removed.
fn node_path(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|segment| segment.trim())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[instrument]
fn cmd_edit(file: &Path, node: &[String], write: bool, op: &EditOp) -> CliResult<()> {
    let container = container_for(file)?;
    let service = &container.outline_service;
    let outline = service.load(file)?;
    let node = node_path(node);
    let (mut outline, selection) = service.edit(outline, &node, &EditCommand::from(op))?;

    if write {
        service.write(&mut outline, file)?;
        output::action("Edited", &file.display());
        output::detail(&crate::domain::status_line(
            outline.tree.total_nodes(),
            outline.tree.leaf_count(),
        ));
    } else {
        output::info(&service.export_text(&outline));
    }
    if let Some(idx) = selection {
        debug!(selected = %outline.tree.breadcrumb(idx).join(" > "), "selection");
    }
    Ok(())
}

#[instrument]
fn cmd_convert(input: &Path, output_path: &Path) -> CliResult<()> {
    let container = container_for(input)?;
    let mut outline = container.outline_service.load(input)?;
    container.outline_service.write(&mut outline, output_path)?;
    output::action(
        "Converted",
        &format!("{} -> {}", input.display(), output_path.display()),
    );
    Ok(())
}

fn cmd_config(command: &ConfigCommands) -> CliResult<()> {
    let cwd = current_dir()?;
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(&cwd))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(&cwd)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            let container = ServiceContainer::new(Settings::default());
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
        }
        ConfigCommands::Path => {
            let local = local_config_path(&cwd);
            match global_config_path() {
                Some(global) => output::info(&format!(
                    "global: {} {}",
                    global.display(),
                    exists_marker(&global)
                )),
                None => output::warning("global config directory unavailable"),
            }
            output::info(&format!(
                "local:  {} {}",
                local.display(),
                exists_marker(&local)
            ));
        }
    }
    Ok(())
}

fn exists_marker(path: &Path) -> &'static str {
    if path.exists() {
        "(exists)"
    } else {
        "(not found)"
    }
}
