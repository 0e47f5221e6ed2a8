mod form;
mod recipe_file;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vault_core::{DirTemplateStore, FixedDestination, PdfFormFiller, SaveOutcome, VaultConfig};

use crate::form::PathChooser;
use crate::recipe_file::RecipeFile;

#[derive(Parser)]
#[command(name = "recipe-vault")]
#[command(about = "Fill themed recipe card templates", long_about = None)]
struct Cli {
    /// Template directory (default: $RECIPE_VAULT_TEMPLATE_DIR or ~/.recipe-vault/templates)
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a recipe file for rejected entries and missing fields
    Check {
        /// Recipe JSON file
        recipe: PathBuf,
    },
    /// Print the field table a recipe would be exported with
    Preview {
        /// Recipe JSON file
        recipe: PathBuf,
    },
    /// Fill the recipe's themed template and write it out
    Export {
        /// Recipe JSON file
        recipe: PathBuf,
        /// Output path (default: <recipe name>_filled.pdf in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replay a JSON list of form intents against an empty form
    Replay {
        /// Intent script
        script: PathBuf,
        /// Where a `save` intent writes (default: suggested name in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Treat every `save` as cancelled
        #[arg(long)]
        cancel_saves: bool,
    },
    /// List themes and the templates they use
    Themes,
    /// List the form fields of a template file
    Fields {
        /// PDF template
        template: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = VaultConfig::from_env().context("Invalid configuration")?;
    if let Some(dir) = cli.templates {
        config.template_dir = dir;
    }

    match cli.command {
        Commands::Check { recipe } => check(&config, &RecipeFile::load(&recipe)?),
        Commands::Preview { recipe } => preview(&config, &RecipeFile::load(&recipe)?),
        Commands::Export { recipe, out } => export(&config, &RecipeFile::load(&recipe)?, out),
        Commands::Replay {
            script,
            out,
            cancel_saves,
        } => replay(&config, &script, out, cancel_saves),
        Commands::Themes => themes(&config),
        Commands::Fields { template } => fields(&template),
    }
}

fn check(config: &VaultConfig, recipe: &RecipeFile) -> Result<()> {
    let mut session = form::open_session(config);
    let rejections = form::load_recipe(&mut session, recipe);

    for rejection in &rejections {
        println!("rejected: {}", rejection.error);
    }

    match vault_core::validate(session.draft()) {
        Ok(()) if rejections.is_empty() => {
            println!("Recipe is complete");
            Ok(())
        }
        Ok(()) => anyhow::bail!("{} entries were rejected", rejections.len()),
        Err(missing) => anyhow::bail!("{}", missing),
    }
}

fn preview(config: &VaultConfig, recipe: &RecipeFile) -> Result<()> {
    let mut session = form::open_session(config);
    form::load_recipe(&mut session, recipe);

    let assembled = session.preview()?;
    let output = serde_json::json!({
        "template": assembled.template,
        "file_name": assembled.file_name,
        "fingerprint": assembled.fields.fingerprint(),
        "fields": assembled.fields,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn export(config: &VaultConfig, recipe: &RecipeFile, out: Option<PathBuf>) -> Result<()> {
    let mut session = form::open_session(config);
    let mut chooser = PathChooser {
        explicit: out,
        dir: std::env::current_dir().context("Failed to read current directory")?,
    };

    match form::export_recipe(&mut session, recipe, &mut chooser)? {
        SaveOutcome::Saved(receipt) => {
            println!("Recipe saved successfully: {}", receipt.destination.display());
            if !receipt.skipped.is_empty() {
                println!("Template has no field for: {}", receipt.skipped.join(", "));
            }
        }
        SaveOutcome::Cancelled => println!("Save cancelled"),
    }
    Ok(())
}

fn replay(
    config: &VaultConfig,
    script: &std::path::Path,
    out: Option<PathBuf>,
    cancel_saves: bool,
) -> Result<()> {
    let intents = form::load_intents(script)?;
    let mut session = form::open_session(config);

    let steps = if cancel_saves {
        form::replay(&mut session, intents, &mut FixedDestination(None))
    } else {
        let mut chooser = PathChooser {
            explicit: out,
            dir: std::env::current_dir().context("Failed to read current directory")?,
        };
        form::replay(&mut session, intents, &mut chooser)
    };

    for step in &steps {
        println!("{}", serde_json::to_string(step)?);
    }
    Ok(())
}

fn themes(config: &VaultConfig) -> Result<()> {
    let store = DirTemplateStore::new(&config.template_dir);
    let available = store.available();

    for (name, template) in form::open_session(config).themes().iter() {
        let marker = if available.contains(template) {
            ""
        } else {
            " (missing)"
        };
        println!("{:<8} {}{}", name, template.file_name(), marker);
    }
    Ok(())
}

fn fields(template: &std::path::Path) -> Result<()> {
    let names = PdfFormFiller::new()
        .field_names(template)
        .with_context(|| format!("Failed to read template: {}", template.display()))?;
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
