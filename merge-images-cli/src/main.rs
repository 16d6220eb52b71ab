use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use merge_images_core::{config, get_image_style, generate_sprite, runtime, writer, DuplicatePolicy, SpriteConfig, VERSION};
use merge_images_plugin::{BuildPlugin, SpritePlugin, VIRTUAL_MODULE_ID};

#[derive(Parser, Debug)]
#[command(name = "merge-images", version = VERSION, about = "Pack a directory of images into one sprite atlas")]
struct Cli {
    /// Log pipeline steps (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, default_value = config::DEFAULT_SRC)]
    src: PathBuf,
    #[arg(long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,
    #[arg(long, default_value = config::DEFAULT_SPRITE_NAME)]
    sprite_name: String,
    #[arg(long, default_value = config::DEFAULT_COORDS_NAME)]
    coords_name: String,
    #[arg(long, default_value = config::DEFAULT_GLOB)]
    glob: String,
    /// Fail instead of overwriting when two images share a logical name
    #[arg(long)]
    strict: bool,
}

impl GenerateArgs {
    fn into_config(self) -> SpriteConfig {
        SpriteConfig {
            src: self.src,
            output: self.output,
            sprite_name: self.sprite_name,
            coords_name: self.coords_name,
            glob: self.glob,
            duplicates: if self.strict { DuplicatePolicy::Error } else { DuplicatePolicy::LastWins },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the atlas and its coordinate table
    Generate(GenerateArgs),
    /// Print the scaled style of one image from a coordinate file
    Style {
        coords: PathBuf,
        name: String,
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
    /// Generate, then print the virtual module a bundler would receive
    Module(GenerateArgs),
    /// Print the runtime-support module source
    Runtime,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.cmd {
        Command::Generate(args) => {
            let config = args.into_config();
            let result = generate_sprite(&config)
                .await
                .with_context(|| format!("generating sprite from {}", config.src.display()))?;
            println!("Wrote {} ({} images)", result.sprite_path.display(), result.coords.len());
            println!("Wrote {}", result.coords_path.display());
        }
        Command::Style { coords, name, scale } => {
            let table = writer::read_coords(&coords)
                .await
                .with_context(|| format!("reading {}", coords.display()))?;
            let style = get_image_style(&table, &name, scale)?;
            println!("{}", serde_json::to_string_pretty(&style)?);
        }
        Command::Module(args) => {
            let plugin = SpritePlugin::new(args.into_config())?;
            plugin.build_start().await.context("build start")?;
            let id = plugin
                .resolve_id(VIRTUAL_MODULE_ID)
                .context("virtual module was not claimed")?;
            let source = plugin.load(&id)?.context("virtual module produced no source")?;
            info!("rendered {} ({} bytes)", id, source.len());
            println!("{}", source);
        }
        Command::Runtime => print!("{}", runtime::RUNTIME_SOURCE),
    }
    Ok(())
}
