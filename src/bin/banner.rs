use clap::{ArgAction, Args, Parser, Subcommand};
use nowplaying_banner::{
    render_svg, render_template, to_json, update_banner, Assets, BannerError, BannerImages,
    BannerResult, Config, RenderOptions, TrackClient, TrackRecord,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Parser, Debug)]
#[command(name = "banner", version, about = "Render a now-playing banner SVG")]
struct Cli {
    /// YAML configuration file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = "banner.yaml")]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the HTML template into a new SVG
    Render(RenderArgs),
    /// Rewrite the slots of an existing banner SVG in place
    Update(UpdateArgs),
    /// Print the parsed (and optionally substituted) template tree as JSON
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// HTML template (overrides `template` in the config)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output SVG path (overrides `output` in the config)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Read the track from a JSON file instead of the service
    #[arg(long, value_name = "JSON")]
    track: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    /// Banner SVG to update (overrides `banner` in the config)
    #[arg(long)]
    banner: Option<PathBuf>,

    /// Read the track from a JSON file instead of the service
    #[arg(long, value_name = "JSON")]
    track: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    template: PathBuf,

    /// Fill the slots from this track JSON before printing
    #[arg(long, value_name = "JSON")]
    track: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "banner generation failed");
        print_error(&e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

async fn run(cli: Cli) -> BannerResult<()> {
    let config = Config::load(&cli.config).await?;

    match cli.command {
        Command::Render(args) => render(&config, args).await,
        Command::Update(args) => update(&config, args).await,
        Command::Inspect(args) => inspect(args).await,
    }
}

async fn render(config: &Config, args: RenderArgs) -> BannerResult<()> {
    let client = TrackClient::from_config(config)?;
    let track = load_track(&client, args.track.as_deref()).await?;

    let assets = Assets::load(client.http(), config).await?;

    let template_path = args.template.as_deref().unwrap_or(config.template.as_path());
    let template = tokio::fs::read_to_string(template_path).await?;
    let tree = render_template(&template, &track);

    let options = RenderOptions {
        width: config.width,
        height: config.height,
    };
    let svg = render_svg(&tree, &assets, &options);

    let output = args.output.as_deref().unwrap_or(config.output.as_path());
    tokio::fs::write(output, svg).await?;
    tracing::info!(path = %output.display(), "banner rendered");
    Ok(())
}

async fn update(config: &Config, args: UpdateArgs) -> BannerResult<()> {
    let client = TrackClient::from_config(config)?;
    let track = load_track(&client, args.track.as_deref()).await?;

    let path = args.banner.as_deref().unwrap_or(config.banner.as_path());
    let svg = tokio::fs::read_to_string(path).await?;

    let images = BannerImages::resolve(client.http(), config, &track).await;
    let updated = update_banner(&svg, &track, &images)?;

    tokio::fs::write(path, updated).await?;
    tracing::info!(path = %path.display(), "banner updated");
    Ok(())
}

async fn inspect(args: InspectArgs) -> BannerResult<()> {
    let template = tokio::fs::read_to_string(&args.template).await?;
    let tree = match args.track.as_deref() {
        Some(path) => render_template(&template, &read_track(path).await?),
        None => nowplaying_banner::parse_fragment(nowplaying_banner::extract_body(&template)),
    };
    println!("{}", to_json(&tree)?);
    Ok(())
}

/// Track from `--track` if given, otherwise from the service.
async fn load_track(client: &TrackClient, path: Option<&Path>) -> BannerResult<TrackRecord> {
    match path {
        Some(path) => read_track(path).await,
        None => client.latest().await,
    }
}

async fn read_track(path: &Path) -> BannerResult<TrackRecord> {
    let json = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}

fn print_error(error: &BannerError) {
    match error {
        BannerError::Markup {
            line,
            column,
            message,
        } => {
            eprintln!("✗ Banner SVG error at line {}, column {}:", line, column);
            eprintln!("    {}", message);
        }
        BannerError::Fetch(_) | BannerError::HttpStatus { .. } | BannerError::MissingTrackField { .. } => {
            eprintln!("✗ Could not fetch track data, no banner written:");
            eprintln!("    {}", error);
        }
        _ => eprintln!("✗ {}", error),
    }
}
