//! Collision detection between the player body and obstacle rectangles
//!
//! Each axis is tested on its own: the X move is checked with the current Y,
//! the Y move with the current X. A blocked axis keeps its position, so the
//! player slides along walls instead of sticking to them.

use glam::Vec2;

use super::state::Obstacle;

/// Result of an axis-separated move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Position after the move (blocked axes unchanged)
    pub pos: Vec2,
    /// X move rejected
    pub blocked_x: bool,
    /// Y move rejected
    pub blocked_y: bool,
}

impl CollisionResult {
    pub fn hit(&self) -> bool {
        self.blocked_x || self.blocked_y
    }
}

/// Does the bounding box of a circle at `center` overlap the obstacle? (strict)
#[inline]
pub fn circle_box_overlaps(center: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    center.x + radius > obstacle.x
        && center.x - radius < obstacle.right()
        && center.y + radius > obstacle.y
        && center.y - radius < obstacle.bottom()
}

/// Move a body from `pos` toward `candidate`, rejecting each axis that would overlap
pub fn resolve_move(pos: Vec2, candidate: Vec2, radius: f32, obstacles: &[Obstacle]) -> CollisionResult {
    let try_x = Vec2::new(candidate.x, pos.y);
    let try_y = Vec2::new(pos.x, candidate.y);

    let blocked_x = obstacles.iter().any(|o| circle_box_overlaps(try_x, radius, o));
    let blocked_y = obstacles.iter().any(|o| circle_box_overlaps(try_y, radius, o));

    CollisionResult {
        pos: Vec2::new(
            if blocked_x { pos.x } else { candidate.x },
            if blocked_y { pos.y } else { candidate.y },
        ),
        blocked_x,
        blocked_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Obstacle {
        Obstacle::new(50.0, -100.0, 100.0, 200.0)
    }

    #[test]
    fn test_free_move() {
        let result = resolve_move(Vec2::ZERO, Vec2::new(10.0, 5.0), 6.0, &[wall()]);
        assert!(!result.hit());
        assert_eq!(result.pos, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_blocked_x_slides_on_y() {
        let result = resolve_move(Vec2::new(40.0, 0.0), Vec2::new(46.0, 3.0), 6.0, &[wall()]);
        assert!(result.blocked_x);
        assert!(!result.blocked_y);
        assert_eq!(result.pos, Vec2::new(40.0, 3.0));
    }

    #[test]
    fn test_touching_edge_is_not_overlap() {
        // circle box edge exactly on the wall face
        assert!(!circle_box_overlaps(Vec2::new(44.0, 0.0), 6.0, &wall()));
        assert!(circle_box_overlaps(Vec2::new(44.1, 0.0), 6.0, &wall()));
    }

    #[test]
    fn test_blocked_y_from_above() {
        let floor = Obstacle::new(-50.0, 20.0, 100.0, 10.0);
        let result = resolve_move(Vec2::new(0.0, 10.0), Vec2::new(2.0, 16.0), 6.0, &[floor]);
        assert!(result.blocked_y);
        assert!(!result.blocked_x);
        assert_eq!(result.pos, Vec2::new(2.0, 10.0));
    }
}
