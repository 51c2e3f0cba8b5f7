//! Command line front end.
//!
//! Loads a source image, renders it as a dot pattern and writes the PNG
//! export; also renders the parameter preview swatch and the display-sized
//! copy of the source.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dotify_lib::app::SharedState;
use dotify_lib::config::SettingsManager;
use dotify_lib::services::{render, source};

#[derive(Parser)]
#[command(name = "dotify")]
#[command(about = "Turn images into dot patterns")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an image as a full-resolution dot pattern PNG
    Render {
        /// Source image (PNG, JPEG, GIF, WebP, BMP)
        input: PathBuf,

        /// Output PNG path (defaults to EXPORT_FILE_NAME in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,

        /// Print a JSON summary instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Render the parameter preview swatch
    Preview {
        /// Output PNG path
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,

        /// Swatch side length in pixels
        #[arg(long)]
        size: Option<u32>,

        /// Preview dot color (hex)
        #[arg(long)]
        accent: Option<String>,

        #[command(flatten)]
        grid: GridArgs,
    },
    /// Write a display-sized copy of the source image
    Display {
        /// Source image
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long, default_value = "display.png")]
        output: PathBuf,

        /// Width available for display in pixels
        #[arg(long, default_value_t = u32::MAX)]
        available_width: u32,
    },
    /// Show the effective settings
    Settings,
}

/// Grid flags shared by `render` and `preview`; unset flags fall back to config.
#[derive(Args)]
struct GridArgs {
    /// Cell size in pixels (preview: circle radius)
    #[arg(short, long)]
    grid_size: Option<u32>,

    /// Space between dots in pixels
    #[arg(short, long)]
    padding: Option<u32>,

    /// Background color (hex or black/white)
    #[arg(short, long)]
    background: Option<String>,

    /// Contrast factor (1.0 = neutral)
    #[arg(long)]
    contrast: Option<f32>,

    /// Saturation factor (1.0 = neutral)
    #[arg(long)]
    saturation: Option<f32>,
}

impl GridArgs {
    fn apply(&self, sm: &mut SettingsManager) -> anyhow::Result<()> {
        if let Some(v) = self.grid_size {
            sm.set_override("GRID_SIZE", &v.to_string())?;
        }
        if let Some(v) = self.padding {
            sm.set_override("PADDING", &v.to_string())?;
        }
        if let Some(v) = &self.background {
            sm.set_override("BACKGROUND_COLOR", v)?;
        }
        if let Some(v) = self.contrast {
            sm.set_override("CONTRAST", &v.to_string())?;
        }
        if let Some(v) = self.saturation {
            sm.set_override("SATURATION", &v.to_string())?;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut sm = dotify_lib::init_settings();

    match cli.command {
        Commands::Render {
            input,
            output,
            grid,
            json,
        } => {
            grid.apply(&mut sm)?;
            let state = build_state(&sm)?;
            run_render(&state, &input, output, json).await
        }
        Commands::Preview {
            output,
            size,
            accent,
            grid,
        } => {
            grid.apply(&mut sm)?;
            if let Some(size) = size {
                sm.set_override("PREVIEW_SIZE", &size.to_string())?;
            }
            if let Some(accent) = &accent {
                sm.set_override("ACCENT_COLOR", accent)?;
            }
            let state = build_state(&sm)?;
            let preview = render::render_preview(&state).await?;
            save_png(&preview, &output)?;
            tracing::info!(path = %output.display(), "Preview written");
            Ok(())
        }
        Commands::Display {
            input,
            output,
            available_width,
        } => {
            let state = build_state(&sm)?;
            source::load_file(&state, &input).await?;
            let shown = render::display_preview(&state, available_width).await?;
            save_png(&shown.to_rgba8(), &output)?;
            tracing::info!(
                path = %output.display(),
                width = shown.width(),
                height = shown.height(),
                "Display preview written"
            );
            Ok(())
        }
        Commands::Settings => {
            let settings = sm.get_all_settings();
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

fn build_state(sm: &SettingsManager) -> anyhow::Result<SharedState> {
    let config = dotify_lib::init_config(sm)?;
    Ok(SharedState::new(config))
}

async fn run_render(
    state: &SharedState,
    input: &Path,
    output: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let info = source::load_file(state, input).await?;
    let export = render::process_with_config(state).await?;

    let output = output.unwrap_or_else(|| PathBuf::from(&export.file_name));
    export.write_to(&output).await?;

    if json {
        let summary = serde_json::json!({
            "source": info,
            "export": export,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} ({}x{}) -> {} ({} bytes)",
            info.name,
            export.width,
            export.height,
            output.display(),
            export.byte_len()
        );
    }
    Ok(())
}

fn save_png(img: &image::RgbaImage, path: &Path) -> anyhow::Result<()> {
    let png = dot_pattern::encode_png(img)?;
    std::fs::write(path, png)?;
    Ok(())
}
