use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::DeleteOutcome;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{render_flat, render_tree, NodeDraft, NodeId};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| {
            CliError::InvalidArgs(format!("cannot determine current directory: {}", e))
        })?,
    };
    let mut settings = Settings::load(Some(project_dir.as_path()))?;
    if let Some(file) = &cli.file {
        settings.data_file = file.clone();
    }
    debug!("data_file: {}", settings.data_file.display());

    if let Commands::Config { command } = command {
        return _config(command, &settings, &project_dir);
    }

    let container = ServiceContainer::new(settings);
    match command {
        Commands::Show => _show(&container),
        Commands::List => _list(&container),
        Commands::Add {
            name,
            title,
            parent,
        } => _add(&container, name, title, parent.as_deref()),
        Commands::Edit { id, name, title } => {
            _edit(&container, id, name.as_deref(), title.as_deref())
        }
        Commands::Delete { id, yes } => _delete(&container, id, *yes),
        Commands::Move { id, to } => _move(&container, id, to.as_deref()),
        Commands::Init { force } => _init(&container, *force),
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip(container))]
fn _show(container: &ServiceContainer) -> CliResult<()> {
    let forest = container.org_chart.load()?;
    let header = container.org_chart.data_file().display().to_string();
    output::info(&render_tree(&forest, &header));
    Ok(())
}

#[instrument(skip(container))]
fn _list(container: &ServiceContainer) -> CliResult<()> {
    let flat = container.org_chart.list()?;
    if !flat.is_empty() {
        output::info(&render_flat(&flat));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _add(
    container: &ServiceContainer,
    name: &str,
    title: &str,
    parent: Option<&str>,
) -> CliResult<()> {
    let draft = NodeDraft::under(parent.map(NodeId::from))
        .name(name)
        .title(title);
    let id = container.org_chart.add(&draft)?;
    output::action("Added", &format!("{} ({}) [{}]", name.trim(), title.trim(), id));
    Ok(())
}

#[instrument(skip(container))]
fn _edit(
    container: &ServiceContainer,
    id: &str,
    name: Option<&str>,
    title: Option<&str>,
) -> CliResult<()> {
    if name.is_none() && title.is_none() {
        return Err(CliError::InvalidArgs(
            "edit needs --name and/or --title".to_string(),
        ));
    }
    container.org_chart.edit(&NodeId::from(id), name, title)?;
    output::success(&format!("Updated {}", id));
    Ok(())
}

#[instrument(skip(container))]
fn _delete(container: &ServiceContainer, id: &str, yes: bool) -> CliResult<()> {
    match container.org_chart.delete(&NodeId::from(id), yes)? {
        DeleteOutcome::Deleted(plan) => {
            output::action("Deleted", &format!("{} ({})", plan.name, plan.title));
            if plan.descendant_count > 0 {
                output::detail(&format!(
                    "{} subordinate(s) removed",
                    plan.descendant_count
                ));
            }
        }
        DeleteOutcome::Cancelled(plan) => {
            output::warning(&format!("Deletion of {} cancelled", plan.name));
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn _move(container: &ServiceContainer, id: &str, to: Option<&str>) -> CliResult<()> {
    let target = to.map(NodeId::from);
    container
        .org_chart
        .move_node(&NodeId::from(id), target.as_ref())?;
    match to {
        Some(parent) => output::success(&format!("Moved {} under {}", id, parent)),
        None => output::success(&format!("Moved {} to top level", id)),
    }
    Ok(())
}

#[instrument(skip(container))]
fn _init(container: &ServiceContainer, force: bool) -> CliResult<()> {
    let count = container.org_chart.init(force)?;
    output::action(
        "Created",
        &format!(
            "{} ({} members)",
            container.org_chart.data_file().display(),
            count
        ),
    );
    Ok(())
}

#[instrument(skip(settings))]
fn _config(command: &ConfigCommands, settings: &Settings, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: (no config directory)"),
            }
            output::detail(&format!(
                "local:  {}",
                local_config_path(project_dir).display()
            ));
            output::detail(&format!("data:   {}", settings.data_file.display()));
        }
    }
    Ok(())
}
