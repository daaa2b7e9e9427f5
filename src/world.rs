use rand::Rng;

use crate::error::{Error, Result};

/// Occupancy grid. Cells are stored row-major, `true` is a wall.
///
/// Every border cell is a wall, so any ray long enough eventually stops.
#[derive(Clone, Debug)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl GridMap {
    /// Empty interior enclosed by border walls
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGrid { width, height });
        }

        let mut cells = vec![false; width * height];
        for x in 0..width {
            cells[x] = true;
            cells[(height - 1) * width + x] = true;
        }
        for y in 0..height {
            cells[y * width] = true;
            cells[y * width + width - 1] = true;
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Bordered grid with `obstacles` random interior samples applied
    pub fn generate<R: Rng>(
        width: usize,
        height: usize,
        obstacles: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        let placed = grid.add_obstacles(obstacles, rng);
        log::debug!(
            "Grid {}x{}: {} of {} obstacle samples landed",
            width,
            height,
            placed,
            obstacles
        );
        Ok(grid)
    }

    /// Scatter `count` obstacles uniformly over the interior.
    ///
    /// A sample that hits an occupied cell is dropped, not retried, so the
    /// returned number of placed obstacles can be lower than `count`.
    pub fn add_obstacles<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        if self.width < 3 || self.height < 3 {
            return 0;
        }

        let mut placed = 0;
        for _ in 0..count {
            let x = rng.gen_range(1..=self.width - 2);
            let y = rng.gen_range(1..=self.height - 2);
            let cell = &mut self.cells[y * self.width + x];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }
        placed
    }

    /// Out-of-bounds coordinates are never walls.
    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Coordinates of every wall cell, row by row
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, wall)| **wall)
            .map(move |(i, _)| (i % width, i / width))
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|wall| **wall).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_border_is_walled() {
        let grid = GridMap::new(7, 5).unwrap();
        for x in 0..7 {
            assert!(grid.is_wall(x, 0));
            assert!(grid.is_wall(x, 4));
        }
        for y in 0..5 {
            assert!(grid.is_wall(0, y));
            assert!(grid.is_wall(6, y));
        }
        assert!(!grid.is_wall(3, 2));
        assert_eq!(grid.wall_count(), 2 * 7 + 2 * 3);
    }

    #[test]
    fn test_out_of_bounds_is_not_wall() {
        let grid = GridMap::new(4, 4).unwrap();
        assert!(!grid.is_wall(-1, 0));
        assert!(!grid.is_wall(0, -1));
        assert!(!grid.is_wall(4, 0));
        assert!(!grid.is_wall(0, 4));
        assert!(!grid.is_wall(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            GridMap::new(0, 5),
            Err(Error::InvalidGrid { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_obstacles_stay_interior() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = GridMap::generate(20, 12, 60, &mut rng).unwrap();
        let border = 2 * 20 + 2 * 10;
        let interior_walls = grid.wall_count() - border;
        assert!(interior_walls <= 60);
        assert!(interior_walls > 0);

        let base = GridMap::new(20, 12).unwrap();
        for (x, y) in base.walls() {
            assert!(grid.is_wall(x as i32, y as i32));
        }
    }

    #[test]
    fn test_collisions_are_skipped() {
        // 3x3 has a single interior cell, so only the first sample can land
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = GridMap::new(3, 3).unwrap();
        assert_eq!(grid.add_obstacles(10, &mut rng), 1);
        assert!(grid.is_wall(1, 1));
    }

    #[test]
    fn test_no_interior_places_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = GridMap::new(2, 9).unwrap();
        assert_eq!(grid.add_obstacles(5, &mut rng), 0);
    }
}
