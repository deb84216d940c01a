//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::BuildReport;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::render::ToDisplayTree;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::{InfraError, ServiceContainer};

/// Execute the parsed command line.
pub fn execute(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `cardtree --help`".into(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    let mut settings = Settings::load(Some(&project_dir))?;
    debug!("settings: {:?}", settings);

    match command {
        Commands::Build {
            cards,
            output,
            parallel,
            trust_names,
        } => {
            if let Some(cards) = cards {
                settings.cards_file = cards.clone();
            }
            if let Some(output) = output {
                settings.output_file = output.clone();
            }
            settings.build.parallel |= *parallel;
            if *trust_names {
                settings.build.verify_unique_names = false;
            }
            cmd_build(&ServiceContainer::new(settings))
        }
        Commands::Questions { cards } => {
            if let Some(cards) = cards {
                settings.cards_file = cards.clone();
            }
            cmd_questions(&ServiceContainer::new(settings))
        }
        Commands::Show { tree } => {
            let path = tree.clone().unwrap_or_else(|| settings.output_file.clone());
            cmd_show(&ServiceContainer::new(settings), &path)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => cmd_config_show(&settings),
            ConfigCommands::Init { global, force } => {
                cmd_config_init(&project_dir, *global, *force)
            }
            ConfigCommands::Path => cmd_config_path(&project_dir),
        },
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_project_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("resolve current directory", e).into()),
    }
}

#[instrument(skip_all)]
fn cmd_build(container: &ServiceContainer) -> CliResult<()> {
    let settings = &container.settings;
    let trees = container.tree_service();

    let cards = trees.load_cards(&settings.cards_file)?;
    let catalog = container.catalog_service().generate(&cards);
    debug!("{} cards, {} questions", cards.len(), catalog.len());

    let report = trees.build(&cards, &catalog)?;
    trees.write_tree(&report.tree, &settings.output_file)?;

    output::success(&format!(
        "Built decision tree for {} cards and saved it to {}",
        report.card_count,
        settings.output_file.display()
    ));
    print_report(&report);
    Ok(())
}

fn print_report(report: &BuildReport) {
    println!();
    if report.all_questions_used() {
        output::success("All available questions were chosen as optimal splits at some point in the tree!");
    } else {
        output::header(&format!(
            "Questions never chosen as optimal splits ({} of {}):",
            report.unused_questions.len(),
            report.catalog_size
        ));
        for question in &report.unused_questions {
            output::bullet(question);
        }
    }

    println!();
    output::header("Leaf node summary");
    output::count("Leaf nodes with 1 card:", report.leaves.one_card);
    output::count("Leaf nodes with 2 cards:", report.leaves.two_cards);
    output::count("Leaf nodes with 3 cards:", report.leaves.three_cards);
    output::count(
        "Leaf nodes with more than 3 cards:",
        report.leaves.more_than_three_cards,
    );
    if report.leaves.ambiguous() > 0 {
        output::warning(&format!(
            "{} leaves hold cards no question can tell apart",
            report.leaves.ambiguous()
        ));
    }
}

#[instrument(skip_all)]
fn cmd_questions(container: &ServiceContainer) -> CliResult<()> {
    let cards = container
        .tree_service()
        .load_cards(&container.settings.cards_file)?;
    let catalog = container.catalog_service().generate(&cards);

    for (i, label) in catalog.labels().enumerate() {
        output::info(&format!("{:>4}  {}", i + 1, label));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, path: &Path) -> CliResult<()> {
    let tree = container.tree_service().load_tree(path)?;
    output::info(&tree.to_display_tree());
    output::action(
        "Summary",
        &format!(
            "{} leaves, {} cards, max depth {}",
            tree.leaf_count(),
            tree.leaf_names().len(),
            tree.max_depth()
        ),
    );
    Ok(())
}

fn cmd_config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn cmd_config_init(project_dir: &Path, global: bool, force: bool) -> CliResult<()> {
    let path = if global {
        global_config_path().ok_or_else(|| {
            CliError::Usage("cannot determine the global config directory".into())
        })?
    } else {
        local_config_path(project_dir)
    };

    if path.exists() && !force {
        return Err(InfraError::AlreadyExists(path).into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
    }
    std::fs::write(&path, Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;

    output::action("Created", &path.display());
    Ok(())
}

fn cmd_config_path(project_dir: &Path) -> CliResult<()> {
    let marker = |p: &Path| if p.exists() { "" } else { " (missing)" };
    match global_config_path() {
        Some(global) => output::action("global", &format!("{}{}", global.display(), marker(&global))),
        None => output::action("global", &"unavailable"),
    }
    let local = local_config_path(project_dir);
    output::action("local", &format!("{}{}", local.display(), marker(&local)));
    Ok(())
}
