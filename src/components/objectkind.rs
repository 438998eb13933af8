//! Type tag of every tracked game object.
//!
//! The collision grid uses the tag to prune pairs that can never collide:
//! objects of the same kind, the player against its own shots, and enemies
//! against enemy shots.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ObjectKind {
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Player,
        ObjectKind::Enemy,
        ObjectKind::PlayerProjectile,
        ObjectKind::EnemyProjectile,
    ];

    /// Returns true if a pair of these kinds is never tested for collision.
    pub fn is_exempt_with(self, other: ObjectKind) -> bool {
        use ObjectKind::*;
        if self == other {
            return true;
        }
        matches!(
            (self, other),
            (Player, PlayerProjectile)
                | (PlayerProjectile, Player)
                | (Enemy, EnemyProjectile)
                | (EnemyProjectile, Enemy)
        )
    }

    /// Name of the collision mask resource for this kind.
    pub fn mask_name(self) -> &'static str {
        match self {
            ObjectKind::Player => "Ship",
            ObjectKind::Enemy => "Enemy",
            ObjectKind::PlayerProjectile => "ShipBullet",
            ObjectKind::EnemyProjectile => "EnemyBullet",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Player => "player",
            ObjectKind::Enemy => "enemy",
            ObjectKind::PlayerProjectile => "player_projectile",
            ObjectKind::EnemyProjectile => "enemy_projectile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectKind::*;
    use super::*;

    #[test]
    fn same_kind_is_exempt() {
        for kind in ObjectKind::ALL {
            assert!(kind.is_exempt_with(kind));
        }
    }

    #[test]
    fn own_shots_are_exempt_both_ways() {
        assert!(Player.is_exempt_with(PlayerProjectile));
        assert!(PlayerProjectile.is_exempt_with(Player));
        assert!(Enemy.is_exempt_with(EnemyProjectile));
        assert!(EnemyProjectile.is_exempt_with(Enemy));
    }

    #[test]
    fn hostile_pairs_are_candidates() {
        assert!(!Player.is_exempt_with(Enemy));
        assert!(!Player.is_exempt_with(EnemyProjectile));
        assert!(!Enemy.is_exempt_with(PlayerProjectile));
        assert!(!PlayerProjectile.is_exempt_with(EnemyProjectile));
    }

    #[test]
    fn mask_names_match_asset_files() {
        assert_eq!(Player.mask_name(), "Ship");
        assert_eq!(PlayerProjectile.mask_name(), "ShipBullet");
    }
}
