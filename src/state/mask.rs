use crate::model::{FieldConfig, Particle, Rgb};

/// RGBA pixels read back from the offscreen sampling canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major, 4 bytes per pixel; length = width * height * 4.
    pub rgba: Vec<u8>,
}

impl SampleBuffer {
    /// Returns `None` when the byte count does not match the dimensions.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

/// Opaque enough and not near-white. Both comparisons are strict.
pub fn admit_pixel([r, g, b, a]: [u8; 4], cfg: &FieldConfig) -> bool {
    let brightness = (r as f64 + g as f64 + b as f64) / 3.0;
    a > cfg.alpha_threshold && brightness < cfg.brightness_threshold
}

// Mask extraction: scan the grid, keep drawn pixels, rescale into canvas space.
pub fn sample_particles(buf: &SampleBuffer, cfg: &FieldConfig) -> Vec<Particle> {
    let stride = cfg.stride.max(1) as usize;
    let mut particles = Vec::new();
    for y in (0..buf.height).step_by(stride) {
        for x in (0..buf.width).step_by(stride) {
            let px = buf.pixel(x, y);
            if !admit_pixel(px, cfg) {
                continue;
            }
            let out_x = x as f64 / buf.width as f64 * cfg.canvas_width;
            let out_y = y as f64 / buf.height as f64 * cfg.canvas_height;
            let [r, g, b, _] = px;
            particles.push(Particle::at_rest(out_x, out_y, Rgb { r, g, b }));
        }
    }
    particles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(w: u32, h: u32, px: [u8; 4]) -> SampleBuffer {
        let rgba = (0..w * h).flat_map(|_| px).collect();
        SampleBuffer::new(w, h, rgba).unwrap()
    }

    fn set(buf: &mut SampleBuffer, x: u32, y: u32, px: [u8; 4]) {
        let i = ((y * buf.width + x) * 4) as usize;
        buf.rgba[i..i + 4].copy_from_slice(&px);
    }

    #[test]
    fn mismatched_length_is_rejected() {
        assert!(SampleBuffer::new(2, 2, vec![0; 15]).is_none());
        assert!(SampleBuffer::new(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn alpha_threshold_is_exclusive() {
        let cfg = FieldConfig::default();
        assert!(!admit_pixel([0, 0, 255, 100], &cfg));
        assert!(admit_pixel([0, 0, 255, 101], &cfg));
    }

    #[test]
    fn brightness_threshold_is_exclusive() {
        let cfg = FieldConfig::default();
        assert!(!admit_pixel([250, 250, 250, 255], &cfg));
        assert!(admit_pixel([249, 250, 250, 255], &cfg));
        assert!(!admit_pixel([255, 255, 255, 255], &cfg));
    }

    #[test]
    fn transparent_image_has_no_particles() {
        let cfg = FieldConfig::default();
        assert!(sample_particles(&filled(1, 1, [0, 0, 0, 0]), &cfg).is_empty());
        assert!(sample_particles(&filled(8, 8, [255, 255, 255, 255]), &cfg).is_empty());
    }

    #[test]
    fn sampling_is_deterministic() {
        let cfg = FieldConfig::default();
        let mut buf = filled(96, 96, [0, 0, 0, 0]);
        for i in 0..96 {
            set(&mut buf, i, (i * 7) % 96, [10, (i * 2) as u8, 200, 255]);
        }
        let a = sample_particles(&buf, &cfg);
        let b = sample_particles(&buf, &cfg);
        assert_eq!(a.len(), 96);
        assert_eq!(a, b);
    }

    #[test]
    fn corners_rescale_into_canvas() {
        let cfg = FieldConfig::default();
        let mut buf = filled(96, 96, [0, 0, 0, 0]);
        set(&mut buf, 0, 0, [0, 0, 255, 255]);
        set(&mut buf, 95, 95, [255, 0, 0, 255]);
        let ps = sample_particles(&buf, &cfg);
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[0].anchor(), (0.0, 0.0));
        assert_eq!((ps[0].x, ps[0].y), (0.0, 0.0));
        let (x, y) = ps[1].anchor();
        assert!((cfg.canvas_width - x) <= cfg.canvas_width / 96.0 + 1e-9);
        assert!((cfg.canvas_height - y) <= cfg.canvas_height / 96.0 + 1e-9);
        assert_eq!(ps[1].color(), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!((ps[1].vx, ps[1].vy), (0.0, 0.0));
    }

    #[test]
    fn stride_skips_rows_and_columns() {
        let cfg = FieldConfig {
            stride: 2,
            ..FieldConfig::default()
        };
        let buf = filled(4, 4, [30, 30, 30, 255]);
        let ps = sample_particles(&buf, &cfg);
        assert_eq!(ps.len(), 4);
        let anchors: Vec<_> = ps.iter().map(|p| p.anchor()).collect();
        assert_eq!(anchors[1], (90.0, 0.0));
        assert_eq!(anchors[2], (0.0, 85.0));
    }

    #[test]
    fn pixel_reads_far_end_of_wide_rows() {
        let buf = SampleBuffer {
            width: 70_000,
            height: 1,
            rgba: (0..70_000u32).flat_map(|x| [(x % 251) as u8, 0, 0, 255]).collect(),
        };
        assert_eq!(buf.pixel(69_999, 0), [(69_999 % 251) as u8, 0, 0, 255]);
        let tall = SampleBuffer {
            width: 70_000,
            height: 2,
            rgba: vec![0; 70_000 * 2 * 4],
        };
        assert_eq!(tall.pixel(69_999, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn color_is_not_alpha_blended() {
        let cfg = FieldConfig::default();
        let ps = sample_particles(&filled(1, 1, [12, 34, 56, 180]), &cfg);
        assert_eq!(ps[0].color(), Rgb { r: 12, g: 34, b: 56 });
    }
}
