//! Text and color choices for the HUD, kept apart from drawing so they can be
//! tested without a window.

use app::format_seed;
use macroquad::prelude::{Color, GRAY, GREEN, RED, YELLOW};
use zero_hour_core::{HealthStatus, InventoryItem, Phase, PlayerAction, Session};

pub const LOADING_LOG: &str = "ANALYZING ENVIRONMENT...";
pub const PLACEHOLDER_TEXT: &str = "ESTABLISHING VISUAL LINK...";
pub const CALIBER: &str = "9MM PARABELLUM";
pub const RELOAD_TEXT: &str = "RELOAD";
pub const DEATH_TITLE: &str = "YOU DIED";

/// How the ECG trace is drawn for a health tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EcgStyle {
    pub color: Color,
    /// Seconds between beats; `None` draws a flat line.
    pub beat_period: Option<f32>,
}

pub fn ecg_style(status: HealthStatus) -> EcgStyle {
    match status {
        HealthStatus::Fine => EcgStyle { color: GREEN, beat_period: Some(2.0) },
        HealthStatus::Caution => EcgStyle { color: YELLOW, beat_period: Some(1.0) },
        HealthStatus::Danger => EcgStyle { color: RED, beat_period: Some(0.6) },
        HealthStatus::Dead => EcgStyle { color: GRAY, beat_period: None },
    }
}

pub fn location_text(location: &str) -> String {
    format!("LOC: {}", location.to_uppercase())
}

pub fn log_text(session: &Session) -> &str {
    if session.phase() == Phase::Loading {
        LOADING_LOG
    } else {
        &session.player().last_log
    }
}

pub fn ammo_text(ammo: u32) -> String {
    if ammo == 0 { RELOAD_TEXT.to_string() } else { format!("{ammo:02}") }
}

pub fn inventory_slot_text(item: &InventoryItem) -> String {
    if item.quantity > 1 { format!("{} x{}", item.name, item.quantity) } else { item.name.clone() }
}

pub fn action_label(action: PlayerAction) -> &'static str {
    match action {
        PlayerAction::MoveForward => "[W] FORWARD",
        PlayerAction::TurnLeft => "[A] LEFT",
        PlayerAction::TurnRight => "[D] RIGHT",
        PlayerAction::Search => "[S] SEARCH",
    }
}

/// Hint line under the log for the current phase.
pub fn controls_hint(phase: Phase) -> &'static str {
    match phase {
        Phase::Exploring => "",
        Phase::Loading => "STAND BY",
        Phase::InCombat => "CLICK OR [SPACE] TO FIRE",
        Phase::GameOver => "[R] RESTART",
    }
}

pub fn death_recap_lines(session: &Session) -> Vec<String> {
    vec![
        format!("Last seen: {}", session.player().location),
        format!("Areas cleared: {}", session.encounters_cleared()),
        format!("Seed: {}", format_seed(session.seed())),
        "Press R to try again".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use zero_hour_core::ItemKind;

    #[test]
    fn ecg_tracks_status_tier() {
        assert_eq!(ecg_style(HealthStatus::Fine).beat_period, Some(2.0));
        assert_eq!(ecg_style(HealthStatus::Caution).color, YELLOW);
        assert_eq!(ecg_style(HealthStatus::Danger).beat_period, Some(0.6));
        assert_eq!(ecg_style(HealthStatus::Dead).beat_period, None);
    }

    #[test]
    fn empty_magazine_reads_reload() {
        assert_eq!(ammo_text(0), RELOAD_TEXT);
        assert_eq!(ammo_text(7), "07");
        assert_eq!(ammo_text(15), "15");
    }

    #[test]
    fn loading_replaces_the_log_line() {
        let mut session = Session::new(1);
        assert_eq!(log_text(&session), session.player().last_log);
        session.boot();
        assert_eq!(log_text(&session), LOADING_LOG);
    }

    #[test]
    fn stacked_items_show_quantity() {
        let mut item = InventoryItem {
            id: "herb".to_string(),
            name: "Green Herb".to_string(),
            description: String::new(),
            quantity: 1,
            kind: ItemKind::Healing,
        };
        assert_eq!(inventory_slot_text(&item), "Green Herb");
        item.quantity = 3;
        assert_eq!(inventory_slot_text(&item), "Green Herb x3");
    }

    #[test]
    fn location_tag_is_upper_case() {
        assert_eq!(location_text("Main Hall"), "LOC: MAIN HALL");
    }

    #[test]
    fn recap_mentions_seed() {
        let session = Session::new(77);
        assert!(death_recap_lines(&session).contains(&"Seed: 77".to_string()));
    }
}
