use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use covpages::cli::{self, HtmlOptions};

/// covpages: static HTML coverage reports from JaCoCo XML.
#[derive(Parser)]
#[command(name = "covpages", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a browsable HTML report tree.
    Html {
        /// Path to the JaCoCo XML report.
        file: PathBuf,

        /// Directory the report is written into.
        #[arg(long, default_value = "coverage-html")]
        out: PathBuf,

        /// TOML file with [display] and [report] settings.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Project name shown in the page title area.
        #[arg(long)]
        project: Option<String>,

        /// Application name shown in the page title area.
        #[arg(long)]
        app: Option<String>,

        /// Environment label shown in the page title area.
        #[arg(long)]
        env: Option<String>,

        /// Timestamp label (default: today's date).
        #[arg(long)]
        time: Option<String>,

        /// Directory searched for source files. May be repeated.
        #[arg(long = "source-root")]
        source_roots: Vec<PathBuf>,

        /// Tab width used when displaying source files.
        #[arg(long)]
        tab_width: Option<u32>,

        /// Locale written into the page header.
        #[arg(long)]
        locale: Option<String>,
    },

    /// Print the line, branch, method and class rollup of a report.
    Summary {
        /// Path to the JaCoCo XML report.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("covpages=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let out = match cli.command {
        Commands::Html {
            file,
            out,
            config,
            project,
            app,
            env,
            time,
            source_roots,
            tab_width,
            locale,
        } => {
            let ctx = HtmlOptions {
                config,
                project,
                app,
                env,
                time,
                source_roots,
                tab_width,
                locale,
            }
            .into_context()?;
            cli::cmd_html(&file, &out, &ctx)?
        }
        Commands::Summary { file } => cli::cmd_summary(&file)?,
    };
    print!("{out}");
    Ok(())
}
