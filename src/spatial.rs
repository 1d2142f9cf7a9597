//! Uniform 3D hash grid for broad-phase proximity queries
//!
//! The grid covers a fixed-extent cubic world centered at the origin.
//! It is cleared and rebuilt once per tick from current component state
//! before any collision or sensor system queries it. Returned neighbors
//! are candidates only; narrow-phase tests confirm actual contact.

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ecs::EntityId;

/// Broad-phase category used for query-time filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Ship,
    Asteroid,
    Station,
    Missile,
    Projectile,
    Collectible,
    Debris,
}

/// Stable identity of a grid entry. Entities use their id; instanced
/// non-entity geometry (e.g. a station ring segment) uses a composite key
/// so overlapping-cell duplicates still deduplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridKey {
    Entity(EntityId),
    Instanced { group: u32, index: u32 },
}

/// A registered bounding volume: an ephemeral per-tick projection of
/// (identity, category, bounding sphere). The grid owns no entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridEntry {
    pub key: GridKey,
    pub category: Category,
    pub center: Vec3,
    pub radius: f32,
}

type Cell = (i32, i32, i32);

/// Uniform cubic-cell hash grid.
pub struct SpatialGrid {
    cell_size: f32,
    half_extent: f32,
    cells: HashMap<Cell, Vec<GridEntry>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, half_extent: f32) -> Self {
        Self {
            cell_size,
            half_extent,
            cells: HashMap::new(),
        }
    }

    /// Empty the grid. Called once per tick before the rebuild.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of occupied cells (diagnostics).
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Cell coordinate for a world-space point on one axis.
    #[inline]
    fn coord(&self, v: f32) -> i32 {
        ((v + self.half_extent) / self.cell_size).floor() as i32
    }

    /// Cell range overlapped by a sphere's axis-aligned footprint.
    fn footprint(&self, center: Vec3, radius: f32) -> (Cell, Cell) {
        let min = center - Vec3::splat(radius);
        let max = center + Vec3::splat(radius);
        (
            (self.coord(min.x), self.coord(min.y), self.coord(min.z)),
            (self.coord(max.x), self.coord(max.y), self.coord(max.z)),
        )
    }

    /// Insert an entry into every cell its bounding sphere overlaps.
    pub fn register(&mut self, entry: GridEntry) {
        let ((x0, y0, z0), (x1, y1, z1)) = self.footprint(entry.center, entry.radius);
        for x in x0..=x1 {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    self.cells.entry((x, y, z)).or_default().push(entry);
                }
            }
        }
    }

    /// Entries whose cell footprint overlaps the query sphere's footprint,
    /// optionally filtered by category, deduplicated by key. An entry
    /// spanning several overlapped cells is returned exactly once.
    pub fn get_nearby(
        &self,
        center: Vec3,
        radius: f32,
        filter: Option<Category>,
    ) -> Vec<GridEntry> {
        let ((x0, y0, z0), (x1, y1, z1)) = self.footprint(center, radius);
        let mut seen: HashSet<GridKey> = HashSet::new();
        let mut out = Vec::new();
        for x in x0..=x1 {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    let Some(cell) = self.cells.get(&(x, y, z)) else {
                        continue;
                    };
                    for entry in cell {
                        if let Some(cat) = filter
                            && entry.category != cat
                        {
                            continue;
                        }
                        if seen.insert(entry.key) {
                            out.push(*entry);
                        }
                    }
                }
            }
        }
        out
    }
}
