use awesome_viewer::config::{self, ViewerConfig};
use awesome_viewer::generate::{BuildResult, Layout, Metadata, SiteBuilder};
use awesome_viewer::preview::{self, PreviewMode};
use awesome_viewer::{output, parse, serve, summary};
use chrono::{SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "awesome-viewer")]
#[command(about = "Build a searchable static site from a Markdown awesome-list")]
#[command(long_about = "\
Build a searchable static site from a Markdown awesome-list

Only two things in the README matter:

  ## Web Frameworks                                   # a category
  * [Flask](https://flask.palletsprojects.com/) - A microframework.
      * [Quart](https://quart.palletsprojects.com/) - Nested entries count too.

Headings without entries, and the Resources/Contributing sections, are left
out. The build writes:

  site/
  ├── index.html       # every category, with a live search filter
  ├── catalog.json     # the same data as JSON
  ├── manifest.json    # totals and build metadata
  └── ...              # everything from the asset directory

Running without a command is the same as 'awesome-viewer build'.
Run 'awesome-viewer gen-config' to generate a documented viewer.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./viewer.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Markdown list to parse
    #[arg(long, visible_alias = "readme", global = true)]
    source: Option<PathBuf>,

    /// Output directory
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Directory copied into the output
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Number of categories to preview before building (0 or less disables)
    #[arg(long, global = true, allow_negative_numbers = true)]
    preview_limit: Option<i64>,

    /// How the preview is shown
    #[arg(long, value_enum, global = true)]
    preview_mode: Option<PreviewMode>,

    /// Page layout
    #[arg(long, value_enum, global = true)]
    layout: Option<Layout>,

    /// Only print errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the list and write the site
    Build,
    /// Build, then serve the output directory locally
    Serve(ServeArgs),
    /// Print a stock viewer.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Serve the existing output without rebuilding
    #[arg(long)]
    no_build: bool,

    /// Log every request
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let command = match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Some(ref command) => command,
        None => &Command::Build,
    };
    let config = resolve_config(&cli)?;

    match command {
        Command::Build | Command::GenConfig => {
            build(&config, cli.quiet)?;
        }
        Command::Serve(args) => {
            if !args.no_build {
                build(&config, cli.quiet)?;
            }
            let port = args.port.unwrap_or(config.serve.port);
            serve::serve(&config.output, port, args.verbose)?;
        }
    }

    Ok(())
}

/// Config file layered under the command-line flags.
fn resolve_config(cli: &Cli) -> Result<ViewerConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_explicit_config(path)?,
        None => config::load_config(Path::new(config::DEFAULT_CONFIG_FILE))?,
    };
    if let Some(source) = &cli.source {
        config.source = source.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(assets) = &cli.assets {
        config.assets = assets.clone();
    }
    if let Some(limit) = cli.preview_limit {
        config.preview.limit = limit;
    }
    if let Some(mode) = cli.preview_mode {
        config.preview.mode = mode;
    }
    if let Some(layout) = cli.layout {
        config.site.layout = layout;
    }
    Ok(config)
}

fn build(config: &ViewerConfig, quiet: bool) -> Result<BuildResult, Box<dyn Error>> {
    if !quiet {
        println!("{}", output::format_stage("Parsing", &config.source));
    }
    let categories = parse::load_catalog(&config.source, &config.parser())?;
    let totals = summary::summarize(&categories);

    if !quiet {
        println!("{}", output::format_totals(totals));
        preview::print_preview(
            &categories,
            preview::clamp_limit(config.preview.limit),
            config.preview.mode,
        );
        println!("{}", output::format_stage("Writing site →", &config.output));
    }

    let result = SiteBuilder::new(&config.assets, &config.output)
        .with_site(config.site_options())
        .build(&categories, &build_metadata(config))?;

    if !quiet {
        output::print_build_output(&result, &config.output);
        println!("{}", output::format_stage("Build complete:", &config.output));
    }
    Ok(result)
}

fn build_metadata(config: &ViewerConfig) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(
        "source_readme".into(),
        config.source.display().to_string().into(),
    );
    metadata.insert(
        "generated_at".into(),
        Utc::now()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .into(),
    );
    metadata.insert("preview_limit".into(), config.preview.limit.into());
    metadata.insert("preview_mode".into(), config.preview.mode.as_str().into());
    metadata.insert("layout".into(), config.site.layout.as_str().into());
    metadata.insert(
        "generator".into(),
        concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")).into(),
    );
    metadata
}
