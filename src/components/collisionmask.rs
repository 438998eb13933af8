//! Pixel-level collision masks.
//!
//! A mask is a binary occupancy grid loaded from a small text format:
//!
//! ```text
//! # comment lines and blank lines are ignored
//! 0011100
//! 0111110
//! 1111111
//! ```
//!
//! Each remaining line is one pixel row, top row first. A `1` marks a solid
//! pixel; every other character is empty. The mask width is the longest row;
//! shorter rows are padded with empty pixels.

use std::path::Path;

use glam::Vec2;

use super::boxcollider::Aabb;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: usize,
    height: usize,
    /// Row-major, row 0 is the top row.
    solid: Vec<bool>,
}

impl CollisionMask {
    /// Parse a mask from its text form.
    ///
    /// Fails if the text contains no pixel rows.
    pub fn parse(text: &str) -> Result<Self, String> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err("Collision mask has no pixel rows".to_string());
        }

        let height = rows.len();
        let mut solid = vec![false; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                solid[y * width + x] = c == '1';
            }
        }

        Ok(Self {
            width,
            height,
            solid,
        })
    }

    /// Read and parse a mask file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read mask {}: {}", path.display(), e))?;
        Self::parse(&text).map_err(|e| format!("{} ({})", e, path.display()))
    }

    /// A fully solid mask of the given size.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn solid(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            solid: vec![true; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel lookup, `row` 0 at the top. Out-of-range pixels are empty.
    pub fn is_solid(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.solid[row * self.width + col]
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|s| **s).count()
    }

    /// Whether the world-space `point` hits a solid pixel when the mask is
    /// stretched over `bounds`.
    ///
    /// The top row of the mask maps onto the top edge of the box. Points
    /// outside `bounds` are never solid, and neither is anything on an empty
    /// mask.
    pub fn is_solid_at(&self, bounds: &Aabb, point: Vec2) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        if !bounds.contains_point(point) || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return false;
        }
        let u = (point.x - bounds.min.x) / bounds.width();
        let v = (bounds.max.y - point.y) / bounds.height();
        let col = ((u * self.width as f32) as usize).min(self.width - 1);
        let row = ((v * self.height as f32) as usize).min(self.height - 1);
        self.is_solid(col, row)
    }
}
