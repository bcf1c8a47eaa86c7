//! Aim-assist arc.
//!
//! Runs the same ballistic formula as a real stone, at a finer step, from the
//! launch point until the arc leaves the field. Nothing here looks at live
//! entities, so the arc can be rebuilt from scratch every frame.

use crate::config::{GameConfig, PREVIEW_MAX_POINTS, PREVIEW_STEP};
use crate::entities::ballistic_position;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewPoint {
    pub x: f64,
    pub y: f64,
    /// 0–255; points further along the arc are fainter.
    pub alpha: u8,
}

pub fn preview(config: &GameConfig, angle_deg: u32, speed: u32) -> Vec<PreviewPoint> {
    let origin = config.launch_point();
    let angle = (angle_deg as f64).to_radians();

    let mut path = Vec::new();
    while path.len() < PREVIEW_MAX_POINTS {
        let t = path.len() as f64 * PREVIEW_STEP;
        let (x, y) = ballistic_position(origin, angle, speed as f64, config.gravity, t);
        if x > config.width || y > config.height || y < 0.0 {
            break;
        }
        path.push((x, y));
    }

    let len = path.len() as f64;
    path.iter()
        .enumerate()
        .map(|(i, &(x, y))| PreviewPoint {
            x,
            y,
            alpha: fade(i as f64, len),
        })
        .collect()
}

fn fade(index: f64, len: f64) -> u8 {
    (180.0 - (120.0 * index / len).floor()).max(0.0) as u8
}
