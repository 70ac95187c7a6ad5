//! Landing detection
//!
//! Landings are one-directional: only a falling player can land, and only on
//! the top edge of a platform. Rising through a platform never counts.

use super::state::{Platform, Player};
use crate::consts::{LANDING_TOLERANCE, PLATFORM_HEIGHT};

/// A platform the player landed on this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index into the platform list
    pub index: usize,
    pub platform_id: u32,
    /// How far the player's feet sank below the top edge
    pub depth: f32,
}

/// Strict horizontal overlap (touching edges do not count)
#[inline]
pub fn overlaps_horizontally(player: &Player, platform: &Platform) -> bool {
    player.right() > platform.pos.x && player.pos.x < platform.right()
}

/// Check whether the player lands on `platform` this tick.
///
/// Returns the sink depth below the top edge on a hit. The feet must be in
/// the platform's top band, or have crossed the top edge during this tick's
/// movement (fast falls would otherwise tunnel through).
pub fn landing_depth(player: &Player, platform: &Platform) -> Option<f32> {
    if !player.is_falling() || !platform.can_land() {
        return None;
    }
    if !overlaps_horizontally(player, platform) {
        return None;
    }

    let bottom = player.bottom();
    let top = platform.top();
    let in_band = top <= bottom && bottom < top + PLATFORM_HEIGHT + LANDING_TOLERANCE;
    let previous_bottom = bottom - player.vel.y;
    let crossed = previous_bottom <= top && top <= bottom;

    if in_band || crossed {
        Some(bottom - top)
    } else {
        None
    }
}

/// Find the platform the player lands on, if any.
///
/// When several qualify the one whose top edge is nearest the player's feet
/// wins; exact ties keep list order.
pub fn find_landing(player: &Player, platforms: &[Platform]) -> Option<Landing> {
    let mut best: Option<Landing> = None;
    for (index, platform) in platforms.iter().enumerate() {
        let Some(depth) = landing_depth(player, platform) else {
            continue;
        };
        if best.is_none_or(|b| depth < b.depth) {
            best = Some(Landing {
                index,
                platform_id: platform.id,
                depth,
            });
        }
    }
    best
}
