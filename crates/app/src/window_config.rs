//! Window configuration for the desktop app.

use std::env;

use app::APP_NAME;
use app::hud_scale::{HUD_SCALE_ENV, HudScale};
use macroquad::window::{Conf, screen_dpi_scale};

const DEFAULT_WINDOW_WIDTH: i32 = 1280;
const DEFAULT_WINDOW_HEIGHT: i32 = 720;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        // Request a high-DPI framebuffer so HUD text tracks display scale.
        high_dpi: true,
        ..Default::default()
    }
}

pub fn runtime_hud_scale(saved: Option<f32>) -> HudScale {
    let override_value = env::var(HUD_SCALE_ENV).ok();
    let scale = HudScale::resolve(screen_dpi_scale(), saved, override_value.as_deref());
    log::info!(
        "hud scale {:.2} (dpi {:.2}, saved {saved:?}, {HUD_SCALE_ENV}={override_value:?})",
        scale.value(),
        screen_dpi_scale()
    );
    scale
}
