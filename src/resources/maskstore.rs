//! Collision mask registry.
//!
//! Masks are shared between every object of the same kind, so the store hands
//! out `Arc`s keyed by mask name (`Ship`, `Enemy`, `ShipBullet`,
//! `EnemyBullet`). The four builtin masks are compiled into the binary; a mask
//! directory can override them with `<name>.mask` files.
//!
//! A mask that cannot be read or parsed is left out of the store with a
//! warning, and objects of that kind fall back to bounding-box collision.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::components::collisionmask::CollisionMask;
use crate::components::objectkind::ObjectKind;

const BUILTIN_MASKS: [(&str, &str); 4] = [
    ("Ship", include_str!("../../assets/masks/Ship.mask")),
    ("Enemy", include_str!("../../assets/masks/Enemy.mask")),
    ("ShipBullet", include_str!("../../assets/masks/ShipBullet.mask")),
    ("EnemyBullet", include_str!("../../assets/masks/EnemyBullet.mask")),
];

#[derive(Resource, Debug, Clone, Default)]
pub struct MaskStore {
    pub masks: FxHashMap<String, Arc<CollisionMask>>,
}

impl MaskStore {
    /// Empty store: every object uses bounding-box collision.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the masks compiled into the crate.
    pub fn builtin() -> Self {
        let mut store = Self::new();
        for (name, text) in BUILTIN_MASKS {
            store.insert_parsed(name, text);
        }
        store
    }

    /// Builtin masks, overridden by any `<name>.mask` file found in `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut store = Self::builtin();
        for kind in ObjectKind::ALL {
            let name = kind.mask_name();
            let path = dir.join(format!("{}.mask", name));
            if !path.exists() {
                continue;
            }
            match CollisionMask::load(&path) {
                Ok(mask) => {
                    info!(
                        "Loaded mask '{}' ({}x{}) from {}",
                        name,
                        mask.width(),
                        mask.height(),
                        path.display()
                    );
                    store.insert(name, mask);
                }
                Err(e) => {
                    warn!("{}; '{}' falls back to bounding-box collision", e, name);
                    store.masks.remove(name);
                }
            }
        }
        store
    }

    pub fn insert(&mut self, name: impl Into<String>, mask: CollisionMask) {
        self.masks.insert(name.into(), Arc::new(mask));
    }

    /// Parse `text` and store it under `name`. Returns false, and leaves any
    /// previous mask for `name` removed, if the text is not a valid mask.
    pub fn insert_parsed(&mut self, name: &str, text: &str) -> bool {
        match CollisionMask::parse(text) {
            Ok(mask) => {
                self.insert(name, mask);
                true
            }
            Err(e) => {
                warn!("Mask '{}': {}; using bounding-box collision", name, e);
                self.masks.remove(name);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<CollisionMask>> {
        self.masks.get(name).cloned()
    }

    /// Mask used by every object of `kind`.
    pub fn for_kind(&self, kind: ObjectKind) -> Option<Arc<CollisionMask>> {
        self.get(kind.mask_name())
    }
}
