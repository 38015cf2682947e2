// Device-to-canvas pointer mapping.
use crate::model::{FieldConfig, Pointer};

/// Element-relative client coordinates scaled by (logical size / rendered size).
/// A zero-sized rect (hidden element) yields `None`.
pub fn to_canvas(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
    rect_width: f64,
    rect_height: f64,
    cfg: &FieldConfig,
) -> Option<Pointer> {
    if rect_width <= 0.0 || rect_height <= 0.0 {
        return None;
    }
    let scale_x = cfg.canvas_width / rect_width;
    let scale_y = cfg.canvas_height / rect_height;
    Some(Pointer::At {
        x: (client_x - rect_left) * scale_x,
        y: (client_y - rect_top) * scale_y,
    })
}
