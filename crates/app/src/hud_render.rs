//! Drawing for the scene, enemies, effects and HUD panels.

use std::mem;

use crate::backdrop::Backdrop;
use crate::hud_layout::{HudLayout, PanelRect};
use crate::hud_text::{
    CALIBER, DEATH_TITLE, PLACEHOLDER_TEXT, action_label, ammo_text, controls_hint,
    death_recap_lines, ecg_style, inventory_slot_text, location_text, log_text,
};
use app::hud_scale::HudScale;
use macroquad::prelude::*;
use zero_hour_core::encounter::{SPRITE_HEIGHT, SPRITE_WIDTH, draw_order};
use zero_hour_core::state::INVENTORY_DISPLAY_SLOTS;
use zero_hour_core::{Effect, Enemy, EnemyKind, Phase, PlayerAction, Session};

const PANEL_FILL: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.65 };
const BORDER_COLOR: Color = Color { r: 0.35, g: 0.35, b: 0.35, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const PANEL_PAD_X: f32 = 12.0;
const PANEL_PAD_Y: f32 = 22.0;
const LINE_STEP: f32 = 20.0;
const SHAKE_AMPLITUDE: f32 = 8.0;
const INVENTORY_COLUMNS: usize = 4;
const ZOMBIE_COLOR: Color = Color { r: 0.32, g: 0.38, b: 0.28, a: 1.0 };
const BOSS_COLOR: Color = Color { r: 0.45, g: 0.1, b: 0.1, a: 1.0 };

pub fn draw_frame(session: &Session, backdrop: &Backdrop, layout: &HudLayout, scale: HudScale, time: f64) {
    let player = session.player();
    let shake = scene_shake(
        player.effects.is_active(Effect::ScreenShake),
        time,
        scale.px(SHAKE_AMPLITUDE),
    );

    draw_backdrop(backdrop, shake.backdrop, scale);
    if let Some(enemies) = session.enemies() {
        for enemy in draw_order(enemies) {
            draw_enemy(enemy, shake.sprites);
        }
    }
    if session.phase() == Phase::InCombat {
        draw_crosshair(scale);
    }
    if player.effects.is_active(Effect::MuzzleFlash) {
        draw_muzzle_flash(scale);
    }
    if player.effects.is_active(Effect::DamageFlash) {
        let remaining = player.effects.remaining_ms(Effect::DamageFlash) / Effect::DamageFlash.duration_ms();
        draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.8, 0.0, 0.0, 0.45 * remaining));
    }

    draw_location_panel(session, layout.location, scale);
    draw_monitor_panel(session, layout.monitor, scale, time);
    draw_log_panel(session, layout.log, scale);
    draw_controls_panel(session, layout.controls, scale);
    draw_weapon_panel(session, layout.weapon, scale);
    draw_inventory_panel(session, layout.inventory, scale);

    if session.phase() == Phase::GameOver {
        draw_death_overlay(session, scale);
    }
}

fn draw_backdrop(backdrop: &Backdrop, shake: (f32, f32), scale: HudScale) {
    clear_background(BLACK);
    let Some(texture) = backdrop.texture() else {
        let size = scale.px(28.0);
        let dims = measure_text(PLACEHOLDER_TEXT, None, size as u16, 1.0);
        draw_text(
            PLACEHOLDER_TEXT,
            (screen_width() - dims.width) / 2.0,
            screen_height() / 2.0,
            size,
            DARKGREEN,
        );
        return;
    };
    draw_texture_ex(
        texture,
        shake.0,
        shake.1,
        WHITE,
        DrawTextureParams { dest_size: Some(vec2(screen_width(), screen_height())), ..Default::default() },
    );
}

fn draw_enemy(enemy: &Enemy, shake: (f32, f32)) {
    let rect = sprite_rect(enemy, (screen_width(), screen_height()));
    let (x, y) = (rect.x + shake.0, rect.y + shake.1);
    let body = match enemy.kind {
        EnemyKind::Zombie => ZOMBIE_COLOR,
        EnemyKind::Boss => BOSS_COLOR,
    };
    draw_rectangle(x, y, rect.width, rect.height, body);
    let eye = rect.width * 0.12;
    draw_circle(x + rect.width * 0.33, y + rect.height * 0.18, eye, RED);
    draw_circle(x + rect.width * 0.67, y + rect.height * 0.18, eye, RED);

    if enemy.hp < enemy.max_hp {
        let bar_y = y - 8.0;
        draw_rectangle(x, bar_y, rect.width, 4.0, DARKGRAY);
        draw_rectangle(x, bar_y, rect.width * enemy.hp_fraction(), 4.0, RED);
    }
}

/// On-screen sprite bounds, matching what target picking tests against.
fn sprite_rect(enemy: &Enemy, viewport: (f32, f32)) -> PanelRect {
    let width = SPRITE_WIDTH * enemy.scale;
    let height = SPRITE_HEIGHT * enemy.scale;
    let cx = enemy.x / 100.0 * viewport.0;
    let cy = enemy.y / 100.0 * viewport.1;
    PanelRect { x: cx - width / 2.0, y: cy - height / 2.0, width, height }
}

/// Screen shake per scene layer. Sprites never move, so a click on what is
/// drawn always lands on the hit box `pick_target` uses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct SceneShake {
    backdrop: (f32, f32),
    sprites: (f32, f32),
}

fn scene_shake(shaking: bool, time: f64, amplitude: f32) -> SceneShake {
    if !shaking {
        return SceneShake::default();
    }
    SceneShake { backdrop: shake_offset(time, amplitude), sprites: (0.0, 0.0) }
}

fn shake_offset(time: f64, amplitude: f32) -> (f32, f32) {
    let t = time as f32;
    ((t * 97.0).sin() * amplitude, (t * 131.0).cos() * amplitude)
}

fn draw_crosshair(scale: HudScale) {
    let (cx, cy) = (screen_width() / 2.0, screen_height() / 2.0);
    let arm = scale.px(12.0);
    draw_line(cx - arm, cy, cx + arm, cy, 2.0, RED);
    draw_line(cx, cy - arm, cx, cy + arm, 2.0, RED);
}

fn draw_muzzle_flash(scale: HudScale) {
    let (cx, cy) = (screen_width() * 0.62, screen_height() * 0.78);
    draw_circle(cx, cy, scale.px(40.0), Color::new(1.0, 0.85, 0.3, 0.8));
    draw_circle(cx, cy, scale.px(18.0), WHITE);
}

fn draw_panel(panel: PanelRect, scale: HudScale) {
    draw_rectangle(panel.x, panel.y, panel.width, panel.height, PANEL_FILL);
    draw_rectangle_lines(
        panel.x,
        panel.y,
        panel.width,
        panel.height,
        scale.px(BORDER_THICKNESS),
        BORDER_COLOR,
    );
}

fn draw_location_panel(session: &Session, panel: PanelRect, scale: HudScale) {
    draw_panel(panel, scale);
    draw_text(
        &location_text(&session.player().location),
        panel.x + scale.px(PANEL_PAD_X),
        panel.y + scale.px(PANEL_PAD_Y + 8.0),
        scale.px(24.0),
        WHITE,
    );
}

fn draw_monitor_panel(session: &Session, panel: PanelRect, scale: HudScale, time: f64) {
    draw_panel(panel, scale);
    let player = session.player();
    let style = ecg_style(player.status());
    draw_text(
        player.status().label(),
        panel.x + scale.px(PANEL_PAD_X),
        panel.y + scale.px(PANEL_PAD_Y),
        scale.px(18.0),
        style.color,
    );

    let left = panel.x + scale.px(PANEL_PAD_X);
    let width = panel.width - scale.px(PANEL_PAD_X) * 2.0;
    let baseline = panel.y + panel.height * 0.68;
    let amplitude = panel.height * 0.28;
    let steps = 48;
    let mut previous = (left, baseline);
    for step in 1..=steps {
        let fraction = step as f32 / steps as f32;
        let x = left + width * fraction;
        let offset = style
            .beat_period
            .map_or(0.0, |period| ecg_sample(time as f32 - (1.0 - fraction) * 2.0, period));
        let point = (x, baseline - offset * amplitude);
        draw_line(previous.0, previous.1, point.0, point.1, scale.px(2.0), style.color);
        previous = point;
    }
}

/// Normalized ECG trace height at time `t` for a beat every `period`
/// seconds: flat, a short dip, a sharp spike, then flat again.
fn ecg_sample(t: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let phase = t.rem_euclid(period) / period;
    match phase {
        p if p < 0.40 => 0.0,
        p if p < 0.44 => -0.2,
        p if p < 0.48 => 1.0,
        p if p < 0.52 => -0.4,
        _ => 0.0,
    }
}

fn draw_log_panel(session: &Session, panel: PanelRect, scale: HudScale) {
    draw_panel(panel, scale);
    let font_size = scale.px(20.0);
    let max_chars = ((panel.width - scale.px(PANEL_PAD_X) * 2.0) / (font_size * 0.5)).max(1.0) as usize;
    let color = if session.phase() == Phase::Loading { YELLOW } else { GREEN };
    let mut y = panel.y + scale.px(PANEL_PAD_Y + 4.0);
    for line in wrap_words(log_text(session), max_chars) {
        if y > panel.y + panel.height {
            break;
        }
        draw_text(&format!("> {line}"), panel.x + scale.px(PANEL_PAD_X), y, font_size, color);
        y += scale.px(LINE_STEP + 2.0);
    }
}

fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            lines.push(mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn draw_controls_panel(session: &Session, panel: PanelRect, scale: HudScale) {
    let font_size = scale.px(18.0);
    if session.phase() != Phase::Exploring {
        draw_panel(panel, scale);
        draw_text(
            controls_hint(session.phase()),
            panel.x + scale.px(PANEL_PAD_X),
            panel.y + panel.height * 0.65,
            font_size,
            LIGHTGRAY,
        );
        return;
    }

    let slot = panel.width / PlayerAction::ALL.len() as f32;
    for (index, action) in PlayerAction::ALL.iter().enumerate() {
        let button = PanelRect {
            x: panel.x + slot * index as f32,
            y: panel.y,
            width: slot - scale.px(6.0),
            height: panel.height,
        };
        draw_panel(button, scale);
        draw_text(
            action_label(*action),
            button.x + scale.px(PANEL_PAD_X),
            button.y + button.height * 0.65,
            font_size,
            WHITE,
        );
    }
}

fn draw_weapon_panel(session: &Session, panel: PanelRect, scale: HudScale) {
    draw_panel(panel, scale);
    let player = session.player();
    let x = panel.x + scale.px(PANEL_PAD_X);
    draw_text(CALIBER, x, panel.y + scale.px(PANEL_PAD_Y), scale.px(16.0), LIGHTGRAY);

    let ammo_color = if player.ammo == 0 { RED } else { WHITE };
    draw_text(&ammo_text(player.ammo), x, panel.y + panel.height * 0.62, scale.px(64.0), ammo_color);

    if player.effects.is_active(Effect::DryFire) {
        draw_text("*click*", x, panel.y + panel.height - scale.px(14.0), scale.px(18.0), ORANGE);
    } else if player.effects.is_active(Effect::MuzzleFlash) {
        draw_text("BANG", x, panel.y + panel.height - scale.px(14.0), scale.px(18.0), YELLOW);
    }
}

fn draw_inventory_panel(session: &Session, panel: PanelRect, scale: HudScale) {
    draw_panel(panel, scale);
    let rows = INVENTORY_DISPLAY_SLOTS.div_ceil(INVENTORY_COLUMNS);
    let pad = scale.px(6.0);
    let cell_w = (panel.width - pad) / INVENTORY_COLUMNS as f32;
    let cell_h = (panel.height - pad) / rows as f32;
    let items = session.player().visible_inventory();

    for slot in 0..INVENTORY_DISPLAY_SLOTS {
        let cell = PanelRect {
            x: panel.x + pad + cell_w * (slot % INVENTORY_COLUMNS) as f32,
            y: panel.y + pad + cell_h * (slot / INVENTORY_COLUMNS) as f32,
            width: cell_w - pad,
            height: cell_h - pad,
        };
        draw_rectangle_lines(cell.x, cell.y, cell.width, cell.height, 1.0, BORDER_COLOR);
        if let Some(item) = items.get(slot) {
            draw_text(
                &inventory_slot_text(item),
                cell.x + scale.px(4.0),
                cell.y + cell.height * 0.6,
                scale.px(13.0),
                WHITE,
            );
        }
    }
}

fn draw_death_overlay(session: &Session, scale: HudScale) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.3, 0.0, 0.0, 0.75));
    let title_size = scale.px(96.0);
    let dims = measure_text(DEATH_TITLE, None, title_size as u16, 1.0);
    let mut y = screen_height() * 0.42;
    draw_text(DEATH_TITLE, (screen_width() - dims.width) / 2.0, y, title_size, RED);

    y += scale.px(48.0);
    for line in death_recap_lines(session) {
        let size = scale.px(22.0);
        let dims = measure_text(&line, None, size as u16, 1.0);
        draw_text(&line, (screen_width() - dims.width) / 2.0, y, size, LIGHTGRAY);
        y += scale.px(28.0);
    }
}
