//! Player-vs-platform collision resolution
//!
//! Overlap alone cannot tell a landing from a wall hit, so resolution
//! disambiguates with the player's previous-frame bounds: whichever side
//! the player was on last tick is the side being entered from. Platforms
//! are resolved sequentially, each one seeing the position corrections of
//! those before it.

use super::rect::Rect;
use super::state::{Platform, Player};

/// Which face of a platform the player was pushed out of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFace {
    /// Landed on the platform top
    Top,
    /// Bumped the platform underside
    Bottom,
    /// Blocked moving rightward into the platform's left face
    Left,
    /// Blocked moving leftward into the platform's right face
    Right,
}

/// Resolve the player against every overlapping platform.
///
/// Clears `grounded` before the pass; landing on any platform top sets it
/// again. Resolution is sequential and order-dependent for overlapping
/// platform stacks - an accepted approximation.
pub fn resolve_player_platforms(player: &mut Player, platforms: &[Platform]) {
    player.grounded = false;

    for platform in platforms {
        if !player.bounds().overlaps(&platform.bounds) {
            continue;
        }
        resolve_platform_contact(player, &platform.bounds);
    }
}

/// Resolve a single confirmed overlap, clamping position and zeroing the
/// blocked velocity component.
///
/// Checked in fixed priority order; the first matching side wins. Returns
/// `None` when no side matches (both frames already overlapped, e.g. a
/// moving platform swept into the player), in which case the overlap is
/// left for a later tick to untangle.
pub fn resolve_platform_contact(player: &mut Player, bounds: &Rect) -> Option<ContactFace> {
    let prev = player.previous_bounds();

    if prev.bottom() <= bounds.top() && player.velocity.y >= 0.0 {
        player.position.y = bounds.top() - player.height;
        player.velocity.y = 0.0;
        player.grounded = true;
        Some(ContactFace::Top)
    } else if prev.top() >= bounds.bottom() {
        player.position.y = bounds.bottom();
        player.velocity.y = 0.0;
        Some(ContactFace::Bottom)
    } else if prev.right() <= bounds.left() {
        player.position.x = bounds.left() - player.width;
        player.velocity.x = 0.0;
        Some(ContactFace::Left)
    } else if prev.left() >= bounds.right() {
        player.position.x = bounds.right();
        player.velocity.x = 0.0;
        Some(ContactFace::Right)
    } else {
        None
    }
}
