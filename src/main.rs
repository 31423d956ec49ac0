use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use scanreport::layout::Rgb;
use scanreport::{common, generate_commands, plan, plan_execution, theme};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every report of a plan
    Run {
        #[clap(short, long)]
        plan: String,
        /// Re-run whenever an imported scan file changes
        #[clap(short, long)]
        watch: bool,
    },
    /// Write a starter plan
    Init {
        #[clap(short, long)]
        plan: String,
    },
    Generate {
        #[clap(subcommand)]
        command: GenerateCommands,
    },
    /// List the available report themes
    Themes,
}

#[derive(Subcommand, Debug)]
enum GenerateCommands {
    /// Print a built-in exporter template (svg, outline)
    Template { name: String },
    /// Write the sample plan and scans into a directory
    Sample { dir: String },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Run { plan, watch } => {
            info!("Running plan: {}", plan);
            plan_execution::execute_plan(plan, watch)?;
        }
        Commands::Init { plan } => {
            info!("Initializing plan: {}", plan);
            let plan_file_path = plan;
            let plan = plan::Plan::default();
            let serialized_plan = serde_yaml::to_string(&plan)?;
            common::write_string_to_file(&plan_file_path, &serialized_plan)?;
        }
        Commands::Generate { command } => match command {
            GenerateCommands::Template { name } => {
                generate_commands::generate_template(name)?;
            }
            GenerateCommands::Sample { dir } => {
                generate_commands::generate_sample(dir)?;
            }
        },
        Commands::Themes => print_themes(),
    }

    Ok(())
}

fn swatch(color: Rgb) -> String {
    "   ".on_truecolor(color.0, color.1, color.2).to_string()
}

fn print_themes() {
    for theme in theme::themes() {
        let default = if theme.id == theme::DEFAULT_THEME {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "{} {}{} {}{}{}{}{}",
            theme.id.bold(),
            theme.name,
            default,
            swatch(theme.primary),
            swatch(theme.secondary),
            swatch(theme.accent),
            swatch(theme.dark),
            swatch(theme.light),
        );
        println!("    {}", theme.features.join(", ").italic());
    }
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("handlebars=off,{}", log_level)))
        .without_time()
        .init();
}
