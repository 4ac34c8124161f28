//! Keyboard and mouse input collection for one rendered frame.

use app::app_loop::{ACTION_BINDINGS, FIRE_KEY, RESTART_KEYS, Shot};
use app::hud_scale::HudScaleAction;
use macroquad::prelude::{
    KeyCode, MouseButton, is_key_down, is_key_pressed, is_mouse_button_pressed, mouse_position,
    screen_height, screen_width,
};

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    pub shot: Option<Shot>,
    pub hud_scale_action: Option<HudScaleAction>,
}

pub fn capture_frame_input() -> FrameInput {
    let mut keys_pressed = Vec::with_capacity(4);
    let bound = ACTION_BINDINGS.iter().flat_map(|(_, keys)| keys.iter().copied());
    for key in bound.chain(RESTART_KEYS) {
        if is_key_pressed(key) {
            keys_pressed.push(key);
        }
    }

    let viewport = (screen_width(), screen_height());
    let shot = if is_mouse_button_pressed(MouseButton::Left) {
        Some(Shot { point: mouse_position(), viewport })
    } else if is_key_pressed(FIRE_KEY) {
        Some(Shot::centered(viewport))
    } else {
        None
    };

    let ctrl_down = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);
    let hud_scale_action = if ctrl_down && is_key_pressed(KeyCode::Equal) {
        Some(HudScaleAction::Increase)
    } else if ctrl_down && is_key_pressed(KeyCode::Minus) {
        Some(HudScaleAction::Decrease)
    } else if ctrl_down && is_key_pressed(KeyCode::Key0) {
        Some(HudScaleAction::Reset)
    } else {
        None
    };

    FrameInput { keys_pressed, shot, hud_scale_action }
}
