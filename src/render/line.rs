use crate::foundation::core::BezPath;

/// Straight vertical segment at `x` spanning `[0, height]`.
pub fn column_path(x: f64, height: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((x, 0.0));
    p.line_to((x, height));
    p
}

/// Sine wave running down the surface, sampled every `step` px.
///
/// `x(y) = center_x + sin(y * frequency + phase) * amplitude`. The last sample is the largest
/// multiple of `step` not past `height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveShape {
    pub center_x: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub step: f64,
}

impl WaveShape {
    pub fn x_at(&self, y: f64, phase: f64) -> f64 {
        self.center_x + (y * self.frequency + phase).sin() * self.amplitude
    }

    pub fn path(&self, height: f64, phase: f64) -> BezPath {
        let mut p = BezPath::new();
        p.move_to((self.x_at(0.0, phase), 0.0));
        if !(self.step > 0.0) || height <= 0.0 {
            return p;
        }
        let samples = (height / self.step).floor() as u64;
        for i in 1..=samples {
            let y = i as f64 * self.step;
            p.line_to((self.x_at(y, phase), y));
        }
        p
    }
}
