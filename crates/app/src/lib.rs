pub mod app_loop;
pub mod hud_scale;
pub mod launch;
pub mod settings_file;

pub const APP_NAME: &str = "Zero Hour";

/// Seed as shown in logs and the game-over recap.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Frame delta from the windowing layer in milliseconds. Garbage reads as 0.
pub fn frame_elapsed_ms(frame_time_secs: f32) -> f32 {
    if !frame_time_secs.is_finite() || frame_time_secs <= 0.0 {
        return 0.0;
    }
    frame_time_secs * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_seed_is_exact_decimal() {
        assert_eq!(format_seed(0), "0");
        assert_eq!(format_seed(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn frame_elapsed_converts_seconds() {
        assert_eq!(frame_elapsed_ms(0.125), 125.0);
        assert_eq!(frame_elapsed_ms(3.0), 3000.0);
        assert_eq!(frame_elapsed_ms(-1.0), 0.0);
        assert_eq!(frame_elapsed_ms(f32::NAN), 0.0);
    }
}
