//! Collision oracle
//!
//! Player hitbox against live bullets. Both sides are reduced to axis-aligned
//! boxes: a bullet is the square that inscribes its circle, a circular hitbox
//! is its bounding square. Overlap is strict, so boxes that only share an edge
//! do not collide.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;

/// Player hitbox, owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Hitbox {
    Rect { center: DVec2, half_extents: DVec2 },
    Circle { center: DVec2, radius: f64 },
}

impl Hitbox {
    pub fn rect(center: DVec2, width: f64, height: f64) -> Self {
        Hitbox::Rect {
            center,
            half_extents: DVec2::new(width, height) * 0.5,
        }
    }

    pub fn circle(center: DVec2, radius: f64) -> Self {
        Hitbox::Circle { center, radius }
    }

    pub fn center(&self) -> DVec2 {
        match *self {
            Hitbox::Rect { center, .. } | Hitbox::Circle { center, .. } => center,
        }
    }

    /// Half width and half height of the bounding box
    pub fn half_extents(&self) -> DVec2 {
        match *self {
            Hitbox::Rect { half_extents, .. } => half_extents.abs(),
            Hitbox::Circle { radius, .. } => DVec2::splat(radius.abs()),
        }
    }

    /// Move the hitbox, keeping its shape
    pub fn with_center(self, center: DVec2) -> Self {
        match self {
            Hitbox::Rect { half_extents, .. } => Hitbox::Rect {
                center,
                half_extents,
            },
            Hitbox::Circle { radius, .. } => Hitbox::Circle { center, radius },
        }
    }

    #[inline]
    pub fn overlaps(&self, projectile: &Projectile) -> bool {
        let reach = self.half_extents() + DVec2::splat(projectile.radius);
        let d = (projectile.pos - self.center()).abs();
        d.x < reach.x && d.y < reach.y
    }
}

/// True if any bullet overlaps the hitbox
pub fn player_hit<'a>(hitbox: &Hitbox, projectiles: impl IntoIterator<Item = &'a Projectile>) -> bool {
    projectiles.into_iter().any(|p| hitbox.overlaps(p))
}

/// First overlapping bullet in enumeration order
pub fn first_hit<'a>(
    hitbox: &Hitbox,
    projectiles: impl IntoIterator<Item = &'a Projectile>,
) -> Option<&'a Projectile> {
    projectiles.into_iter().find(|p| hitbox.overlaps(p))
}

pub fn count_hits<'a>(hitbox: &Hitbox, projectiles: impl IntoIterator<Item = &'a Projectile>) -> usize {
    projectiles.into_iter().filter(|p| hitbox.overlaps(p)).count()
}
