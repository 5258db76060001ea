use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use memeforge::{
    AspectRatio, Caption, CaptioningService as _, Config, GeminiClient, ImageAsset,
    MEME_TEMPLATES, MemeCompositor, default_share_links, fetch_template, find_template,
};

#[derive(Parser, Debug)]
#[command(name = "memeforge", version)]
struct Cli {
    /// Configuration JSON (service endpoint, models, timeout, font).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a caption onto an image and write a PNG.
    Render(RenderArgs),
    /// Print the caption layout for an image as JSON, without drawing.
    Plan(PlanArgs),
    /// Suggest captions for an image.
    Captions(CaptionsArgs),
    /// Describe an image in one paragraph.
    Analyze(InputArgs),
    /// Apply a natural-language edit to an image.
    Edit(EditArgs),
    /// Generate a new image from a prompt.
    Generate(GenerateArgs),
    /// List the built-in template images.
    Templates,
    /// Print share links for the supported platforms.
    Share,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Input image file.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Built-in template id or name (see `templates`).
    #[arg(long)]
    template: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Caption text. Omit to export the image unchanged.
    #[arg(long)]
    caption: Option<String>,

    /// Output PNG path. Defaults to `ai-meme.png` in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Font file to use instead of the system Impact / Arial Black chain.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    input: InputArgs,

    #[arg(long)]
    caption: String,

    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CaptionsArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Optional style hint, e.g. "wholesome" or "sarcastic".
    #[arg(long)]
    genre: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Edit instruction, e.g. "add a retro filter".
    #[arg(long)]
    prompt: String,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    prompt: String,

    /// One of 1:1, 16:9, 9:16, 4:3, 3:4.
    #[arg(long, default_value = "1:1")]
    aspect_ratio: AspectRatio,

    #[arg(long)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Render(args) => cmd_render(&config, args).await,
        Command::Plan(args) => cmd_plan(&config, args).await,
        Command::Captions(args) => cmd_captions(&config, args).await,
        Command::Analyze(args) => cmd_analyze(&config, args).await,
        Command::Edit(args) => cmd_edit(&config, args).await,
        Command::Generate(args) => cmd_generate(&config, args).await,
        Command::Templates => cmd_templates(),
        Command::Share => cmd_share(),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    Ok(config.with_env_api_key())
}

fn client(config: &Config) -> anyhow::Result<GeminiClient> {
    GeminiClient::new(config.service.clone())
        .context("set GEMINI_API_KEY (or API_KEY) or provide service.api_key in --config")
}

fn compositor(config: &Config, font: Option<PathBuf>) -> MemeCompositor {
    let mut render = config.render.clone();
    if font.is_some() {
        render.font_path = font;
    }
    MemeCompositor::new(render.font_source())
}

async fn load_input(input: &InputArgs) -> anyhow::Result<ImageAsset> {
    if let Some(key) = &input.template {
        let template = find_template(key).with_context(|| {
            format!("unknown template '{key}' (run `memeforge templates` for the list)")
        })?;
        let http = reqwest::Client::new();
        return Ok(fetch_template(&http, template).await?);
    }
    let path = input
        .image
        .as_deref()
        .context("either --image or --template is required")?;
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    ImageAsset::from_bytes(bytes).with_context(|| format!("decode '{}'", path.display()))
}

fn write_bytes(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir '{}'", parent.display()))?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

async fn cmd_render(config: &Config, args: RenderArgs) -> anyhow::Result<()> {
    let image = load_input(&args.input).await?;
    let caption = args.caption.map(Caption::from);
    let mut compositor = compositor(config, args.font);
    let composite = compositor.compose(&image, caption.as_ref())?;
    let file = memeforge::export(&composite)?;

    let out = match args.out {
        Some(path) => {
            file.save_as(&path)?;
            path
        }
        None => file.save_in(Path::new("."))?,
    };
    eprintln!("wrote {}", out.display());
    Ok(())
}

async fn cmd_plan(config: &Config, args: PlanArgs) -> anyhow::Result<()> {
    let image = load_input(&args.input).await?;
    let caption = Caption::from(args.caption);
    let mut compositor = compositor(config, args.font);
    let plan = compositor.plan(image.width(), image.height(), Some(&caption))?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

async fn cmd_captions(config: &Config, args: CaptionsArgs) -> anyhow::Result<()> {
    let client = client(config)?;
    let image = load_input(&args.input).await?;
    let captions = client
        .generate_captions(&image, args.genre.as_deref())
        .await
        .context("Failed to generate captions. Please try again.")?;
    if captions.is_empty() {
        eprintln!("no captions returned");
    }
    for (i, caption) in captions.iter().enumerate() {
        println!("{}. {caption}", i + 1);
    }
    Ok(())
}

async fn cmd_analyze(config: &Config, args: InputArgs) -> anyhow::Result<()> {
    let client = client(config)?;
    let image = load_input(&args).await?;
    let description = client
        .analyze_image(&image)
        .await
        .context("Failed to analyze image.")?;
    println!("{description}");
    Ok(())
}

async fn cmd_edit(config: &Config, args: EditArgs) -> anyhow::Result<()> {
    let client = client(config)?;
    let image = load_input(&args.input).await?;
    let edited = client
        .edit_image(&image, &args.prompt)
        .await
        .context("Failed to edit image.")?;
    write_bytes(&args.out, edited.encoded())?;
    eprintln!("wrote {} ({})", args.out.display(), edited.mime_type());
    Ok(())
}

async fn cmd_generate(config: &Config, args: GenerateArgs) -> anyhow::Result<()> {
    let client = client(config)?;
    let generated = client
        .generate_image(&args.prompt, args.aspect_ratio)
        .await
        .context("Failed to generate image.")?;
    write_bytes(&args.out, generated.encoded())?;
    eprintln!("wrote {} ({})", args.out.display(), generated.mime_type());
    Ok(())
}

fn cmd_templates() -> anyhow::Result<()> {
    for t in MEME_TEMPLATES.iter() {
        println!("{:<4} {:<28} {}", t.id, t.name, t.url);
    }
    Ok(())
}

fn cmd_share() -> anyhow::Result<()> {
    for (platform, url) in default_share_links()? {
        println!("{:<10} {url}", platform.label());
    }
    Ok(())
}
