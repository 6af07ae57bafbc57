//! Per-frame entry point for the input/rendering collaborator
//!
//! Input events are applied first, then the scene advances once.

use glam::Vec2;

use super::scene::{FrameStats, Scene};

/// Input collected by the collaborator since the previous frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Place an obstacle centred here (left click)
    pub place_obstacle: Option<Vec2>,
    /// Pause toggle (space)
    pub toggle_pause: bool,
    /// Debug timing toggle ('d')
    pub toggle_debug: bool,
}

/// Apply one frame of input and advance the scene.
///
/// Placement failures are logged and the frame carries on.
pub fn tick(scene: &mut Scene, input: &FrameInput) -> FrameStats {
    if input.toggle_debug {
        let enabled = !scene.debug_timing();
        scene.set_debug_timing(enabled);
        log::info!("Debug timing is now {}.", if enabled { "enabled" } else { "disabled" });
    }

    if input.toggle_pause {
        let paused = !scene.is_paused();
        scene.set_paused(paused);
        log::info!("Paused is now {}.", if paused { "enabled" } else { "disabled" });
    }

    if let Some(center) = input.place_obstacle {
        match scene.place_obstacle(center) {
            Ok(id) => log::debug!("Placed obstacle {} at ({:.1}, {:.1})", id.0, center.x, center.y),
            Err(e) => log::warn!("Could not place obstacle at ({:.1}, {:.1}): {}", center.x, center.y, e),
        }
    }

    scene.update()
}
