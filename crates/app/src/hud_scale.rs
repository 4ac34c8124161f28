//! HUD scale: a clamped multiplier applied to every HUD measurement.

pub const DEFAULT_HUD_SCALE: f32 = 1.0;
pub const MIN_HUD_SCALE: f32 = 0.5;
pub const MAX_HUD_SCALE: f32 = 3.0;
pub const HUD_SCALE_STEP: f32 = 0.1;
pub const HUD_SCALE_ENV: &str = "ZERO_HOUR_UI_SCALE";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudScaleAction {
    Increase,
    Decrease,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudScale(f32);

impl Default for HudScale {
    fn default() -> Self {
        Self(DEFAULT_HUD_SCALE)
    }
}

impl HudScale {
    pub fn new(value: f32) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        Self(value.clamp(MIN_HUD_SCALE, MAX_HUD_SCALE))
    }

    /// Pick the scale at startup. An environment override beats the saved
    /// setting, which beats the display's DPI factor.
    pub fn resolve(dpi_scale: f32, saved: Option<f32>, env_override: Option<&str>) -> Self {
        if let Some(value) = env_override.and_then(|raw| raw.trim().parse::<f32>().ok()) {
            return Self::new(value);
        }
        if let Some(value) = saved {
            return Self::new(value);
        }
        if dpi_scale.is_finite() && dpi_scale > 1.0 {
            return Self::new(dpi_scale);
        }
        Self::default()
    }

    pub fn apply(self, action: HudScaleAction) -> Self {
        match action {
            HudScaleAction::Increase => Self::new(self.0 + HUD_SCALE_STEP),
            HudScaleAction::Decrease => Self::new(self.0 - HUD_SCALE_STEP),
            HudScaleAction::Reset => Self::default(),
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Scale a reference measurement.
    pub fn px(self, reference: f32) -> f32 {
        reference * self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins() {
        assert_eq!(HudScale::resolve(2.0, Some(1.2), Some("1.5")).value(), 1.5);
    }

    #[test]
    fn saved_value_beats_dpi() {
        assert_eq!(HudScale::resolve(2.0, Some(1.7), None).value(), 1.7);
    }

    #[test]
    fn falls_back_to_dpi_then_default() {
        assert_eq!(HudScale::resolve(2.0, None, None).value(), 2.0);
        assert_eq!(HudScale::resolve(0.0, None, None).value(), DEFAULT_HUD_SCALE);
        assert_eq!(HudScale::resolve(2.0, None, Some("huge")).value(), 2.0);
    }

    #[test]
    fn values_are_clamped() {
        assert_eq!(HudScale::new(0.1).value(), MIN_HUD_SCALE);
        assert_eq!(HudScale::new(9.0).value(), MAX_HUD_SCALE);
        assert_eq!(HudScale::new(f32::INFINITY).value(), DEFAULT_HUD_SCALE);
    }

    #[test]
    fn actions_step_and_reset() {
        let scale = HudScale::default().apply(HudScaleAction::Increase);
        assert!((scale.value() - 1.1).abs() < 1e-4);
        let scale = scale.apply(HudScaleAction::Decrease).apply(HudScaleAction::Decrease);
        assert!((scale.value() - 0.9).abs() < 1e-4);
        assert_eq!(scale.apply(HudScaleAction::Reset), HudScale::default());
        assert_eq!(HudScale::new(2.0).px(12.0), 24.0);
    }
}
