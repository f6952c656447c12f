use std::path::{Path, PathBuf};

use adcomposer::{
    ComposeRequest, Composer, FontLibrary, LayoutClient, LayoutRequest, ModelLayoutSource,
};
use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "adcomposer", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every size x format and write the artifacts to a directory.
    Compose(ComposeArgs),
    /// Print the resolved per-size geometry as JSON without rendering.
    Plan(InputArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Compose request JSON.
    #[arg(long)]
    request: PathBuf,

    /// Product photo.
    #[arg(long)]
    image: PathBuf,

    /// Saved layout model output (plain or fenced JSON). The local fallback is used without it.
    #[arg(long)]
    layout_response: Option<PathBuf>,

    /// Saved copy-ideas model output, merged into the suggestions.
    #[arg(long, requires = "layout_response")]
    copy_ideas: Option<PathBuf>,

    /// Extra directory of ttf/otf/ttc fonts.
    #[arg(long)]
    font_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

/// Layout client that replays model output saved to disk.
struct FileLayoutClient {
    layout: PathBuf,
    ideas: Option<PathBuf>,
}

impl LayoutClient for FileLayoutClient {
    fn layout_text(&self, _req: &LayoutRequest<'_>) -> anyhow::Result<String> {
        std::fs::read_to_string(&self.layout)
            .with_context(|| format!("read layout response '{}'", self.layout.display()))
    }

    fn copy_ideas_text(&self, _req: &LayoutRequest<'_>) -> anyhow::Result<Option<String>> {
        self.ideas
            .as_ref()
            .map(|p| {
                std::fs::read_to_string(p)
                    .with_context(|| format!("read copy ideas '{}'", p.display()))
            })
            .transpose()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn load_inputs(args: &InputArgs) -> anyhow::Result<(Composer, ComposeRequest, Vec<u8>)> {
    let request = ComposeRequest::from_path(&args.request)?;
    let image = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;

    let fonts = match &args.font_dir {
        Some(dir) => FontLibrary::with_font_dir(dir),
        None => FontLibrary::system(),
    };
    let mut composer = Composer::new(fonts);
    if let Some(layout) = &args.layout_response {
        composer = composer.with_primary(ModelLayoutSource::new(FileLayoutClient {
            layout: layout.clone(),
            ideas: args.copy_ideas.clone(),
        }));
    }
    Ok((composer, request, image))
}

fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let (composer, request, image) = load_inputs(&args.input)?;
    let output = composer.compose(&image, &request)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    for artifact in &output.artifacts {
        write_artifact(&args.out, &artifact.name, &artifact.bytes)?;
    }

    let summary = serde_json::json!({
        "artifacts": output
            .artifacts
            .iter()
            .map(|a| serde_json::json!({"name": a.name, "mime": a.mime, "bytes": a.bytes.len()}))
            .collect::<Vec<_>>(),
        "failures": output.failures,
        "layout_origin": output.layout_origin,
        "suggestions": output.suggestions,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    eprintln!(
        "wrote {} artifacts to {}",
        output.artifacts.len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_plan(args: InputArgs) -> anyhow::Result<()> {
    let (composer, request, image) = load_inputs(&args)?;
    let plan = composer.plan(&image, &request)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
