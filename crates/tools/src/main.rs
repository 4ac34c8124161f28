use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::{Builder, Env};
use zero_hour_core::content::gemini::{GeminiClient, GeminiConfig};
use zero_hour_core::content::scripted::ScriptedSource;
use zero_hour_core::{ContentSource, PlayerState, TurnContext};

/// Send one action to the content source and print what comes back.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action text, as the game would send it
    #[arg(default_value = "Move forward")]
    action: String,
    /// Use the scripted offline source instead of the network
    #[arg(long)]
    offline: bool,
    /// Seed for the scripted source
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Location to report in the turn context
    #[arg(long)]
    location: Option<String>,
    /// Also generate the scene image and write it here
    #[arg(long)]
    image_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let _ = Builder::from_env(Env::default().default_filter_or("info")).try_init();
    let args = Args::parse();

    let source: Box<dyn ContentSource> = if args.offline {
        Box::new(ScriptedSource::new(args.seed))
    } else {
        let config = GeminiConfig::from_env();
        if config.api_key.is_none() {
            bail!("set GEMINI_API_KEY (or API_KEY), or pass --offline");
        }
        println!("Text model: {}  Image model: {}", config.text_model, config.image_model);
        Box::new(GeminiClient::new(config))
    };

    let mut player = PlayerState::default();
    if let Some(location) = args.location {
        player.location = location;
    }
    let context = TurnContext::capture(&player);

    let response = source
        .resolve_turn(&args.action, &context)
        .with_context(|| format!("Turn resolution failed for {:?}", args.action))?;
    println!("{}", serde_json::to_string_pretty(&response).context("Failed to serialize turn")?);
    match response.encounter_spec() {
        Some(spec) => println!("Encounter: {} x {:?}", spec.count, spec.kind),
        None => println!("Encounter: none"),
    }

    if let Some(path) = args.image_out {
        let image = source
            .scene_image(&response.visual_prompt)
            .context("Scene image generation failed")?;
        let Some(image) = image else {
            bail!("The content source returned no image");
        };
        fs::write(&path, &image.bytes)
            .with_context(|| format!("Failed to write image to {}", path.display()))?;
        println!("Wrote {} ({}, {} bytes)", path.display(), image.mime_type, image.bytes.len());
    }

    Ok(())
}
