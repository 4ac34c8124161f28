mod backdrop;
mod frame_input;
mod hud_layout;
mod hud_render;
mod hud_text;
mod window_config;

use std::env;
use std::sync::Arc;

use app::app_loop::AppState;
use app::frame_elapsed_ms;
use app::launch::{SeedChoice, generate_runtime_seed, parse_launch_args};
use app::settings_file::SettingsFile;
use backdrop::Backdrop;
use env_logger::{Builder, Env};
use frame_input::capture_frame_input;
use hud_layout::{compute_hud_layout, setup_layout};
use hud_render::draw_frame;
use macroquad::prelude::{get_frame_time, get_time, next_frame, screen_height, screen_width};
use macroquad::window::Conf;
use taffy::TaffyTree;
use window_config::{build_window_conf, runtime_hud_scale};
use zero_hour_core::ContentSource;
use zero_hour_core::content::gemini::{GeminiClient, GeminiConfig};
use zero_hour_core::content::scripted::ScriptedSource;

fn window_conf() -> Conf {
    build_window_conf()
}

fn content_source(offline: bool, seed: u64, settings: &SettingsFile) -> Arc<dyn ContentSource> {
    if offline {
        log::info!("offline mode: using scripted content");
        return Arc::new(ScriptedSource::new(seed));
    }
    let mut config = GeminiConfig::from_env();
    settings.apply_to(&mut config, |name| env::var(name).is_ok_and(|value| !value.trim().is_empty()));
    if config.api_key.is_none() {
        log::warn!("no GEMINI_API_KEY or API_KEY set; every turn will fall back (try --offline)");
    }
    log::info!("content models: text={} image={}", config.text_model, config.image_model);
    Arc::new(GeminiClient::new(config))
}

#[macroquad::main(window_conf)]
async fn main() {
    let _ = Builder::from_env(Env::default().default_filter_or("info")).format_timestamp_secs().try_init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_launch_args(&args, generate_runtime_seed()) {
        Ok(options) => options,
        Err(err) => {
            log::error!("{err}");
            return;
        }
    };
    let seed = options.seed.value();
    if let SeedChoice::Generated(_) = options.seed {
        log::info!("no --seed given, generated {seed}");
    }

    let settings_path = SettingsFile::get_default_path();
    let mut settings = SettingsFile::load_or_default(settings_path.as_deref());
    let mut app = AppState::start(seed, content_source(options.offline, seed, &settings));

    let mut hud_scale = runtime_hud_scale(settings.ui_scale);
    let mut taffy = TaffyTree::new();
    let mut nodes = setup_layout(&mut taffy, hud_scale);
    let mut backdrop = Backdrop::default();

    loop {
        let input = capture_frame_input();
        if let Some(action) = input.hud_scale_action {
            hud_scale = hud_scale.apply(action);
            taffy = TaffyTree::new();
            nodes = setup_layout(&mut taffy, hud_scale);
            settings.ui_scale = Some(hud_scale.value());
            if let Some(path) = settings_path.as_deref()
                && let Err(err) = settings.write_atomic(path)
            {
                log::warn!("could not save settings to {}: {err}", path.display());
            }
        }

        let update = app.tick(&input.keys_pressed, input.shot, frame_elapsed_ms(get_frame_time()));
        if let Some(image) = &update.new_backdrop {
            backdrop.replace(image);
        }
        if update.report.died {
            log::info!("player died after {} cleared areas", app.session().encounters_cleared());
        }

        let layout = compute_hud_layout(&mut taffy, &nodes, screen_width(), screen_height());
        draw_frame(app.session(), &backdrop, &layout, hud_scale, get_time());
        next_frame().await
    }
}
