use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pillarx::activity::Origin;
use pillarx::bag::PropertyBag;
use pillarx::editor::EditError;
use pillarx::kind::catalog;
use pillarx::project::{FilterOptions, Project, ProjectError, TypeFilter};
use pillarx::registry::Registry;
use pillarx::settings::{CodeField, SettingsDraft, SettingsError, UnitField};
use pillarx::store::{JsonFileStore, StoreError};
use pillarx::workspace::{Caller, ListView, Workspace};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("expected KEY=VALUE, got {0:?}")]
    BadAssignment(String),
    #[error("unknown view {0:?}; expected recents, all, or my_projects")]
    UnknownView(String),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "pillarx", about = "Structural component projects from the command line")]
struct Cli {
    /// Workspace snapshot file.
    #[arg(long, env = "PILLARX_DATA", default_value = "pillarx.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List component types by catalog section.
    Types,
    /// Print the SVG schematic for a component type.
    Render(BagArgs),
    /// Print the property form for a component type.
    Form(BagArgs),
    /// List projects.
    Projects {
        #[arg(long, default_value = "recents")]
        view: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    Project(ProjectCommand),
    Component(ComponentCommand),
    Settings(SettingsCommand),
    /// Show the newest activity entries.
    Activity {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Args, Debug)]
struct BagArgs {
    /// Registry key, e.g. "Retaining Wall".
    type_name: String,

    /// Field edits applied in order to the type's defaults.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
}

#[derive(Args, Debug)]
struct ProjectCommand {
    #[command(subcommand)]
    command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProjectSubcommand {
    New {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long = "type")]
        type_name: String,
    },
    Show {
        id: String,
    },
    Rename {
        id: String,
        name: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct ComponentCommand {
    #[command(subcommand)]
    command: ComponentSubcommand,
}

#[derive(Subcommand, Debug)]
enum ComponentSubcommand {
    List {
        project: String,
        #[arg(long = "type")]
        type_filter: Option<String>,
    },
    Add {
        project: String,
        type_name: String,
    },
    Rename {
        project: String,
        id: String,
        name: String,
    },
    Duplicate {
        project: String,
        id: String,
    },
    Delete {
        project: String,
        id: String,
    },
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Show { project: String },
    SetCode { project: String, key: String, value: String },
    SetUnit { project: String, key: String, value: String },
    ToggleUnits { project: String },
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    if let Err(error) = run(cli, &mut stdout) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    debug!(data = %cli.data.display(), "opening workspace");
    let store = JsonFileStore::new(&cli.data);
    let registry = Registry::standard();
    let caller = Caller::anonymous(Origin::local());

    match cli.command {
        Command::Types => print_json(out, &catalog()),
        Command::Render(args) => {
            let bag = build_bag(registry, &args)?;
            let svg = registry.lookup(&args.type_name).render(&bag).to_svg();
            writeln!(out, "{svg}")?;
            Ok(())
        }
        Command::Form(args) => {
            let bag = build_bag(registry, &args)?;
            print_json(out, &registry.lookup(&args.type_name).form(&bag))
        }
        Command::Projects { view, search } => {
            let view = ListView::parse(&view).ok_or(CliError::UnknownView(view))?;
            let workspace = Workspace::load(&store);
            print_json(out, &workspace.list(view, &search))
        }
        Command::Project(project) => run_project(&store, &caller, project, out),
        Command::Component(component) => run_component(&store, component, out),
        Command::Settings(settings) => run_settings(&store, settings, out),
        Command::Activity { limit } => {
            let workspace = Workspace::load(&store);
            let entries: Vec<_> = workspace.activities().iter().take(limit).collect();
            print_json(out, &entries)
        }
    }
}

fn run_project(
    store: &JsonFileStore,
    caller: &Caller,
    project: ProjectCommand,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut workspace = Workspace::load(store);
    match project.command {
        ProjectSubcommand::New { name, type_name } => {
            let created = workspace.create_project(&name, &type_name, caller).clone();
            workspace.save(store)?;
            print_json(out, &created)
        }
        ProjectSubcommand::Show { id } => {
            let opened = workspace.open_project(&id, caller)?.clone();
            workspace.save(store)?;
            print_json(out, &opened)
        }
        ProjectSubcommand::Rename { id, name } => {
            if workspace.update_project(&id, |p| Ok(p.rename(&name)))? {
                workspace.save(store)?;
            }
            print_json(out, &workspace.project(&id))
        }
        ProjectSubcommand::Delete { id } => {
            let deleted = workspace.delete_project(&id, caller)?;
            workspace.save(store)?;
            print_json(out, &deleted)
        }
    }
}

fn run_component(store: &JsonFileStore, component: ComponentCommand, out: &mut dyn Write) -> Result<(), CliError> {
    let mut workspace = Workspace::load(store);
    match component.command {
        ComponentSubcommand::List { project, type_filter } => {
            let project = workspace.project(&project).ok_or(ProjectError::UnknownProject(project))?;
            let filter = type_filter.as_deref().map(TypeFilter::parse).unwrap_or_default();
            print_json(
                out,
                &serde_json::json!({
                    "components": project.filter(&filter),
                    "filterOptions": project.filter_options(FilterOptions::Present),
                }),
            )
        }
        ComponentSubcommand::Add { project, type_name } => {
            let id = workspace.update_project(&project, |p| Ok(p.add_component(&type_name)))?;
            workspace.save(store)?;
            print_component(out, &workspace, &project, &id)
        }
        ComponentSubcommand::Rename { project, id, name } => {
            if workspace.update_project(&project, |p| p.rename_component(&id, &name))? {
                workspace.save(store)?;
            }
            print_component(out, &workspace, &project, &id)
        }
        ComponentSubcommand::Duplicate { project, id } => {
            let copy = workspace.update_project(&project, |p| p.duplicate_component(&id))?;
            workspace.save(store)?;
            print_component(out, &workspace, &project, &copy)
        }
        ComponentSubcommand::Delete { project, id } => {
            let deleted = workspace.update_project(&project, |p| p.delete_component(&id))?;
            if deleted {
                workspace.save(store)?;
            }
            print_json(out, &serde_json::json!({ "deleted": deleted }))
        }
    }
}

fn run_settings(store: &JsonFileStore, settings: SettingsCommand, out: &mut dyn Write) -> Result<(), CliError> {
    let mut workspace = Workspace::load(store);
    let (SettingsSubcommand::Show { project }
    | SettingsSubcommand::SetCode { project, .. }
    | SettingsSubcommand::SetUnit { project, .. }
    | SettingsSubcommand::ToggleUnits { project }) = &settings.command;
    let project = project.clone();
    let current = workspace
        .project(&project)
        .map(|p| p.settings.clone())
        .ok_or_else(|| ProjectError::UnknownProject(project.clone()))?;

    let mut draft = SettingsDraft::open(&current);
    match settings.command {
        SettingsSubcommand::Show { .. } => return print_json(out, &current),
        SettingsSubcommand::SetCode { key, value, .. } => {
            let field = CodeField::from_key(&key).ok_or(SettingsError::UnknownField(key))?;
            draft.set_code(field, &value)?;
        }
        SettingsSubcommand::SetUnit { key, value, .. } => {
            let field = UnitField::from_key(&key).ok_or(SettingsError::UnknownField(key))?;
            draft.set_unit(field, &value)?;
        }
        SettingsSubcommand::ToggleUnits { .. } => {
            draft.toggle_unit_system();
        }
    }

    let next = draft.commit();
    workspace.update_project(&project, |p| {
        p.save_settings(next.clone());
        Ok(())
    })?;
    workspace.save(store)?;
    print_json(out, &next)
}

/// Defaults for the type with each `KEY=VALUE` applied in order.
fn build_bag(registry: &Registry, args: &BagArgs) -> Result<PropertyBag, CliError> {
    let def = registry.lookup(&args.type_name);
    let mut bag = def.defaults();
    for assignment in &args.set {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| CliError::BadAssignment(assignment.clone()))?;
        bag = def.edit(&bag, key.trim(), value.trim())?;
    }
    Ok(bag)
}

fn print_component(out: &mut dyn Write, workspace: &Workspace, project: &str, id: &str) -> Result<(), CliError> {
    let component = workspace
        .project(project)
        .and_then(|p: &Project| p.component(id))
        .ok_or_else(|| ProjectError::UnknownComponent(id.to_owned()))?;
    print_json(out, component)
}

fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
