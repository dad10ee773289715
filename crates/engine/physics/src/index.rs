//! Obstacle collision indices
//!
//! Callers only talk to [`CollisionIndex`]. The linear index tests every
//! obstacle and is the reference; the grid index buckets obstacles on the
//! ground plane and must answer exactly the same way.

use std::collections::HashMap;

use crate::collision::Aabb;
use crate::obstacle::Obstacle;

/// Query interface over a static obstacle set
pub trait CollisionIndex {
    /// All obstacles in the index
    fn obstacles(&self) -> &[Obstacle];

    /// Whether `footprint` overlaps any obstacle on all three axes
    fn would_collide(&self, footprint: &Aabb) -> bool;

    /// The first obstacle overlapping `footprint`, if any
    fn first_hit(&self, footprint: &Aabb) -> Option<&Obstacle>;

    fn len(&self) -> usize {
        self.obstacles().len()
    }

    fn is_empty(&self) -> bool {
        self.obstacles().is_empty()
    }
}

/// Which index implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum IndexKind {
    #[default]
    Linear,
    Grid { cell_size: f32 },
}

impl IndexKind {
    /// Build the chosen index over `obstacles`
    pub fn build(self, obstacles: Vec<Obstacle>) -> Box<dyn CollisionIndex> {
        match self {
            IndexKind::Linear => Box::new(LinearIndex::new(obstacles)),
            IndexKind::Grid { cell_size } => Box::new(GridIndex::new(obstacles, cell_size)),
        }
    }
}

/// Brute-force index: one AABB test per obstacle per query
#[derive(Debug, Clone, Default)]
pub struct LinearIndex {
    obstacles: Vec<Obstacle>,
}

impl LinearIndex {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }
}

impl CollisionIndex for LinearIndex {
    fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    fn would_collide(&self, footprint: &Aabb) -> bool {
        self.first_hit(footprint).is_some()
    }

    fn first_hit(&self, footprint: &Aabb) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|obstacle| footprint.intersects(&obstacle.bounds))
    }
}

/// Uniform grid over the XZ plane
///
/// Each obstacle is registered in every cell its bounds touch. A query visits
/// the cells touched by the footprint and runs the exact AABB test on the
/// obstacles found there, so results match [`LinearIndex`] exactly.
///
/// Obstacles spanning more than [`GridIndex::MAX_CELLS_PER_OBSTACLE`] cells
/// are kept out of the grid and tested on every query. A footprint spanning
/// more cells than there are obstacles is answered by a plain scan.
#[derive(Debug, Clone)]
pub struct GridIndex {
    obstacles: Vec<Obstacle>,
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
    oversized: Vec<usize>,
}

impl GridIndex {
    /// Smallest accepted cell size; smaller or non-finite values are raised to it
    pub const MIN_CELL_SIZE: f32 = 1.0;

    /// Largest cell span an obstacle may register in
    pub const MAX_CELLS_PER_OBSTACLE: u64 = 1024;

    pub fn new(obstacles: Vec<Obstacle>, cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() {
            cell_size.max(Self::MIN_CELL_SIZE)
        } else {
            Self::MIN_CELL_SIZE
        };

        let mut cells: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        let mut oversized = Vec::new();
        for (slot, obstacle) in obstacles.iter().enumerate() {
            let span = CellSpan::covering(&obstacle.bounds, cell_size);
            if span.count() > Self::MAX_CELLS_PER_OBSTACLE {
                oversized.push(slot);
                continue;
            }
            for cell in span.cells() {
                cells.entry(cell).or_default().push(slot);
            }
        }

        tracing::debug!(
            obstacles = obstacles.len(),
            cells = cells.len(),
            oversized = oversized.len(),
            cell_size,
            "built grid collision index"
        );

        Self {
            obstacles,
            cell_size,
            cells,
            oversized,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of occupied cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

impl CollisionIndex for GridIndex {
    fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    fn would_collide(&self, footprint: &Aabb) -> bool {
        self.first_hit(footprint).is_some()
    }

    fn first_hit(&self, footprint: &Aabb) -> Option<&Obstacle> {
        let span = CellSpan::covering(footprint, self.cell_size);
        if span.count() > self.obstacles.len() as u64 {
            return self
                .obstacles
                .iter()
                .find(|obstacle| footprint.intersects(&obstacle.bounds));
        }

        span.cells()
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .chain(self.oversized.iter())
            .map(|&slot| &self.obstacles[slot])
            .find(|obstacle| footprint.intersects(&obstacle.bounds))
    }
}

/// Inclusive range of cells covered by the XZ projection of a box
#[derive(Debug, Clone, Copy)]
struct CellSpan {
    x: (i32, i32),
    z: (i32, i32),
}

impl CellSpan {
    fn covering(bounds: &Aabb, cell_size: f32) -> Self {
        let cell = |value: f32| (value / cell_size).floor() as i32;
        Self {
            x: (cell(bounds.min.x), cell(bounds.max.x)),
            z: (cell(bounds.min.z), cell(bounds.max.z)),
        }
    }

    /// Number of cells, zero for an inverted span
    fn count(&self) -> u64 {
        let extent = |(lo, hi): (i32, i32)| (i64::from(hi) - i64::from(lo) + 1).max(0) as u64;
        extent(self.x) * extent(self.z)
    }

    fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        let (z0, z1) = self.z;
        (self.x.0..=self.x.1).flat_map(move |x| (z0..=z1).map(move |z| (x, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::ObstacleId;
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tree_at(id: u32, x: f32, z: f32) -> Obstacle {
        Obstacle::place(ObstacleId(id), &Aabb::grounded(25.0, 300.0, 25.0), Vec3::new(x, 0.0, z))
    }

    fn forest() -> Vec<Obstacle> {
        vec![
            tree_at(0, 400.0, 0.0),
            tree_at(1, -350.0, 500.0),
            tree_at(2, 0.0, -600.0),
            tree_at(3, 199.0, 199.0),
        ]
    }

    #[test]
    fn test_empty_index_never_collides() {
        let index = LinearIndex::default();
        assert!(index.is_empty());
        assert!(!index.would_collide(&Aabb::grounded(1000.0, 1000.0, 1000.0)));
    }

    #[test]
    fn test_linear_index_hits() {
        let index = LinearIndex::new(forest());
        assert_eq!(index.len(), 4);

        let avatar = Aabb::grounded(20.0, 180.0, 20.0);
        assert!(!index.would_collide(&avatar));

        let touching = avatar.translated(Vec3::new(400.0 - 45.0, 0.0, 0.0));
        assert_eq!(index.first_hit(&touching).map(|o| o.id), Some(ObstacleId(0)));

        let inside = avatar.translated(Vec3::new(-350.0, 0.0, 500.0));
        assert_eq!(index.first_hit(&inside).map(|o| o.id), Some(ObstacleId(1)));

        let flying = avatar.translated(Vec3::new(400.0, 400.0, 0.0));
        assert!(!index.would_collide(&flying));
    }

    #[test]
    fn test_grid_matches_linear_on_cell_boundaries() {
        // Obstacle 3 straddles the 200-unit cell boundary on both axes
        let linear = LinearIndex::new(forest());
        let grid = GridIndex::new(forest(), 200.0);

        let avatar = Aabb::grounded(1.0, 180.0, 1.0);
        for offset in [Vec3::new(224.0, 0.0, 199.0), Vec3::new(225.0, 0.0, 225.0), Vec3::new(226.0, 0.0, 226.0)] {
            let footprint = avatar.translated(offset);
            assert_eq!(
                grid.would_collide(&footprint),
                linear.would_collide(&footprint),
                "mismatch at {offset:?}"
            );
        }
    }

    #[test]
    fn test_grid_matches_linear_randomized() {
        let mut rng = StdRng::seed_from_u64(7);
        let obstacles: Vec<Obstacle> = (0..80)
            .map(|id| tree_at(id, rng.random_range(-1000.0..1000.0), rng.random_range(-1000.0..1000.0)))
            .collect();

        let linear = LinearIndex::new(obstacles.clone());
        let grid = GridIndex::new(obstacles, 150.0);
        assert!(grid.occupied_cells() > 0);

        let avatar = Aabb::grounded(20.0, 180.0, 20.0);
        for _ in 0..2000 {
            let at = Vec3::new(
                rng.random_range(-1100.0..1100.0),
                rng.random_range(-50.0..350.0),
                rng.random_range(-1100.0..1100.0),
            );
            let footprint = avatar.translated(at);
            assert_eq!(grid.would_collide(&footprint), linear.would_collide(&footprint));
        }
    }

    #[test]
    fn test_grid_cell_size_is_sanitized() {
        assert_eq!(GridIndex::new(Vec::new(), 0.0).cell_size(), GridIndex::MIN_CELL_SIZE);
        assert_eq!(GridIndex::new(Vec::new(), f32::NAN).cell_size(), GridIndex::MIN_CELL_SIZE);
    }

    #[test]
    fn test_grid_huge_footprint_falls_back_to_scan() {
        let linear = LinearIndex::new(forest());
        let grid = GridIndex::new(forest(), 1.0);

        // Spans about 4e12 cells at this cell size
        let huge = Aabb::grounded(1.0e6, 10.0, 1.0e6);
        assert!(grid.would_collide(&huge));
        assert_eq!(
            grid.first_hit(&huge).map(|o| o.id),
            linear.first_hit(&huge).map(|o| o.id)
        );

        let far = Aabb::grounded(1.0e6, 10.0, 1.0e6).translated(Vec3::new(0.0, 0.0, 5.0e6));
        assert!(!grid.would_collide(&far));
    }

    #[test]
    fn test_grid_keeps_oversized_obstacles_queryable() {
        let wall = Obstacle::place(
            ObstacleId(9),
            &Aabb::grounded(5.0e5, 100.0, 10.0),
            Vec3::new(0.0, 0.0, 300.0),
        );
        let mut obstacles = forest();
        obstacles.push(wall);
        let grid = GridIndex::new(obstacles, 10.0);

        let avatar = Aabb::grounded(0.4, 180.0, 0.4);
        let at_wall = avatar.translated(Vec3::new(-2.0e5, 0.0, 300.0));
        assert_eq!(grid.first_hit(&at_wall).map(|o| o.id), Some(ObstacleId(9)));

        let tree = avatar.translated(Vec3::new(0.0, 0.0, -600.0));
        assert_eq!(grid.first_hit(&tree).map(|o| o.id), Some(ObstacleId(2)));
    }

    #[test]
    fn test_index_kind_builds_boxed_index() {
        let boxed = IndexKind::Grid { cell_size: 100.0 }.build(forest());
        assert_eq!(boxed.len(), 4);
        let hit = Aabb::grounded(1.0, 1.0, 1.0).translated(Vec3::new(0.0, 0.0, -600.0));
        assert!(boxed.would_collide(&hit));
    }
}
