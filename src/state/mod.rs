pub mod field;
pub mod mask;
pub mod pointer;

pub use field::ParticleField;
pub use mask::SampleBuffer;
pub use pointer::to_canvas;
