use web_sys::CanvasRenderingContext2d;

use crate::model::Rgb;

/// Fixed-size 2D drawing target the field renders into.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb);
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb) {
        self.set_fill_style_str(&color.css());
        self.begin_path();
        self.arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0).ok();
        self.fill();
    }
}

/// In-memory surface that records what was drawn.
#[cfg(test)]
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub clears: usize,
    pub circles: Vec<(f64, f64, f64, Rgb)>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.clears += 1;
        self.circles.clear();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb) {
        self.circles.push((x, y, radius, color));
    }
}
