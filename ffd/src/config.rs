use crate::error::{FfdError, Result};
use crate::geometry::limits;
use serde::{Deserialize, Serialize};

/// Engine settings. Every field has a default so partial JSON is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub padding: f32,
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Samples per curve.
    pub sample_count: usize,
    /// Multiplier on playback rate.
    pub speed: f32,
    /// Length of one rest→expand pass at speed 1.
    pub duration_ms: f64,
    /// Border offset of the breathing keyframe.
    pub expansion_shift: f32,
    pub hit_radius: f32,
    pub grid_visible: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 600.0,
            padding: 50.0,
            grid_rows: 4,
            grid_cols: 4,
            sample_count: 200,
            speed: 1.0,
            duration_ms: 1000.0,
            expansion_shift: 5.0,
            hit_radius: 10.0,
            grid_visible: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: EngineConfig = serde_json::from_str(s).map_err(|e| FfdError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Self> {
        let cfg: EngineConfig = serde_json::from_value(v).map_err(|e| FfdError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f64) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(FfdError::InvalidConfig(format!("{name} must be positive and finite, got {v}")))
            }
        }
        positive("canvas_width", self.canvas_width as f64)?;
        positive("canvas_height", self.canvas_height as f64)?;
        positive("speed", self.speed as f64)?;
        positive("duration_ms", self.duration_ms)?;
        positive("hit_radius", self.hit_radius as f64)?;
        if !self.padding.is_finite() || !self.expansion_shift.is_finite() {
            return Err(FfdError::InvalidConfig("padding and expansion_shift must be finite".into()));
        }
        if self.grid_rows < 2 || self.grid_cols < 2 {
            return Err(FfdError::DegenerateLattice { rows: self.grid_rows, cols: self.grid_cols });
        }
        crate::lattice::check_dims(self.grid_rows, self.grid_cols)?;
        if self.sample_count == 0 {
            return Err(FfdError::EmptySampling);
        }
        if !limits::sample_count_ok(self.sample_count) {
            return Err(FfdError::LimitExceeded { what: "sample_count", max: limits::MAX_SAMPLES, got: self.sample_count });
        }
        Ok(())
    }

    /// Interior drawing area after padding.
    pub fn grid_width(&self) -> f32 { self.canvas_width - 2.0 * self.padding }
    pub fn grid_height(&self) -> f32 { self.canvas_height - 2.0 * self.padding }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let c = EngineConfig::from_json(r#"{ "speed": 2.5, "grid_rows": 6 }"#).unwrap();
        assert_eq!(c.speed, 2.5);
        assert_eq!(c.grid_rows, 6);
        assert_eq!(c.grid_cols, 4);
        assert_eq!(c.hit_radius, 10.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(EngineConfig::from_json(r#"{ "speed": 0 }"#), Err(FfdError::InvalidConfig(_))));
        assert_eq!(
            EngineConfig::from_json(r#"{ "grid_cols": 1 }"#),
            Err(FfdError::DegenerateLattice { rows: 4, cols: 1 })
        );
        assert!(matches!(EngineConfig::from_json("{ nope"), Err(FfdError::InvalidConfig(_))));
    }
}
