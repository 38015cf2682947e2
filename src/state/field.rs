// Simulation state owned by one mounted logo: particles, pointer, and the run flag.
use crate::model::{step_particles, FieldConfig, Particle, Pointer};
use crate::state::mask::{sample_particles, SampleBuffer};
use crate::surface::Surface;

#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    pointer: Pointer,
    running: bool,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config: config.sanitized(),
            particles: Vec::new(),
            pointer: Pointer::Far,
            running: false,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rebuild the particle set from a freshly decoded image. Returns the particle count.
    pub fn load(&mut self, buf: &SampleBuffer) -> usize {
        self.particles = sample_particles(buf, &self.config);
        self.particles.len()
    }

    /// Image failed to load: blank surface, nothing to animate.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// After this, frames and pointer events leave the state untouched.
    pub fn stop(&mut self) {
        self.running = false;
        self.pointer = Pointer::Far;
    }

    pub fn pointer_move(&mut self, pointer: Pointer) {
        if self.running {
            self.pointer = pointer;
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.running {
            self.pointer = Pointer::Far;
        }
    }

    /// One update + render pass. Returns false when stopped and nothing was done.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.running {
            return false;
        }
        step_particles(&mut self.particles, self.pointer, &self.config);
        surface.clear(self.config.canvas_width, self.config.canvas_height);
        for p in &self.particles {
            surface.fill_circle(p.x, p.y, self.config.particle_radius, p.color());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn logo_buffer() -> SampleBuffer {
        // 8x8 with a filled 4x4 block in the middle.
        let mut rgba = vec![0u8; 8 * 8 * 4];
        for y in 2..6 {
            for x in 2..6 {
                let i = (y * 8 + x) * 4;
                rgba[i..i + 4].copy_from_slice(&[20, 80, 220, 255]);
            }
        }
        SampleBuffer::new(8, 8, rgba).unwrap()
    }

    fn positions(field: &ParticleField) -> Vec<(f64, f64)> {
        field.particles().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn empty_image_draws_nothing() {
        let mut field = ParticleField::new(FieldConfig::default());
        let buf = SampleBuffer::new(1, 1, vec![0, 0, 0, 0]).unwrap();
        assert_eq!(field.load(&buf), 0);
        field.start();
        let mut surface = RecordingSurface::default();
        for _ in 0..3 {
            assert!(field.frame(&mut surface));
        }
        assert!(surface.circles.is_empty());
    }

    #[test]
    fn frame_draws_each_particle_with_its_color() {
        let mut field = ParticleField::new(FieldConfig::default());
        assert_eq!(field.load(&logo_buffer()), 16);
        field.start();
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 16);
        assert!(surface.circles.iter().all(|c| c.2 == 1.3 && c.3.b == 220));
    }

    #[test]
    fn runs_over_empty_set_before_image_arrives() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.start();
        let mut surface = RecordingSurface::default();
        assert!(field.frame(&mut surface));
        field.load(&logo_buffer());
        field.frame(&mut surface);
        assert_eq!(surface.circles.len(), 16);
    }

    #[test]
    fn image_loaded_while_stopped_draws_after_start() {
        let mut field = ParticleField::new(FieldConfig::default());
        assert_eq!(field.load(&logo_buffer()), 16);
        let mut surface = RecordingSurface::default();
        assert!(!field.frame(&mut surface));
        field.start();
        assert!(field.frame(&mut surface));
        assert_eq!(surface.circles.len(), 16);
    }

    #[test]
    fn image_landing_between_stop_and_restart_is_kept() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.start();
        field.stop();
        field.load(&logo_buffer());
        field.start();
        let mut surface = RecordingSurface::default();
        field.frame(&mut surface);
        assert_eq!(surface.circles.len(), 16);
    }

    #[test]
    fn pointer_leave_resets_to_far() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.start();
        field.pointer_move(Pointer::At { x: 3.0, y: 4.0 });
        assert_eq!(field.pointer(), Pointer::At { x: 3.0, y: 4.0 });
        field.pointer_leave();
        assert_eq!(field.pointer(), Pointer::Far);
    }

    #[test]
    fn stopped_field_is_frozen() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.load(&logo_buffer());
        field.start();
        let mut surface = RecordingSurface::default();
        field.pointer_move(Pointer::At { x: 80.0, y: 80.0 });
        for _ in 0..5 {
            field.frame(&mut surface);
        }
        field.stop();
        let frozen = positions(&field);
        let drawn = surface.circles.len();
        for i in 0..20 {
            field.pointer_move(Pointer::At { x: 60.0 + i as f64, y: 70.0 });
            assert!(!field.frame(&mut surface));
        }
        assert_eq!(positions(&field), frozen);
        assert_eq!(field.pointer(), Pointer::Far);
        assert_eq!(surface.circles.len(), drawn);
        assert_eq!(surface.clears, 5);
    }

    #[test]
    fn failed_load_blanks_the_field() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.load(&logo_buffer());
        field.clear();
        assert!(field.particles().is_empty());
    }
}
