//! Occupancy map backed by a summed-area table
//!
//! `integral[(y, x)]` holds the number of occupied cells in the rectangle
//! `[0, x) x [0, y)`, so the occupied count of any window is four lookups.
//! After a commit at `(x, y)` only rows `>= y` and columns `>= x` can
//! change, and only that region is recomputed.

use rand::Rng;

use crate::mask::Mask;

/// Top-left corner of a free window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Tracks which canvas pixels are taken
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    width: u32,
    height: u32,
    /// 1 for occupied, 0 for free
    cells: Vec<u8>,
    /// `(height + 1) x (width + 1)` prefix sums
    integral: Vec<u32>,
}

impl OccupancyMap {
    /// All-free map
    pub fn new(width: u32, height: u32) -> Self {
        let stride = width as usize + 1;
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
            integral: vec![0; stride * (height as usize + 1)],
        }
    }

    /// Map whose blocked cells come from a shape mask
    pub fn with_mask(mask: &Mask) -> Self {
        let mut map = Self::new(mask.width(), mask.height());
        map.commit(mask, 0, 0);
        map
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Uniformly pick a fully free `box_w x box_h` window.
    ///
    /// Returns `None` when the box is larger than the map or no free
    /// window exists. Zero-sized boxes are treated as one pixel.
    pub fn sample<R: Rng + ?Sized>(&self, box_h: u32, box_w: u32, rng: &mut R) -> Option<Position> {
        let box_h = box_h.max(1);
        let box_w = box_w.max(1);
        if box_h > self.height || box_w > self.width {
            return None;
        }

        let hits = self.free_windows(box_w, box_h).count();
        if hits == 0 {
            return None;
        }

        let goal = rng.random_range(0..hits);
        self.free_windows(box_w, box_h).nth(goal)
    }

    /// Whether the window at `(x, y)` is entirely free and inside the map
    pub fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let fits_x = x.checked_add(w).is_some_and(|right| right <= self.width);
        let fits_y = y.checked_add(h).is_some_and(|bottom| bottom <= self.height);
        fits_x && fits_y && self.window_sum(x, y, w, h) == 0
    }

    /// Mark the mask's blocked cells as occupied, with the mask's top-left
    /// corner at `(x, y)`. Cells outside the map are ignored.
    pub fn commit(&mut self, mask: &Mask, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let w = mask.width().min(self.width - x);
        let h = mask.height().min(self.height - y);
        for dy in 0..h {
            for dx in 0..w {
                if mask.get(dx, dy) {
                    let idx = self.cell_index(x + dx, y + dy);
                    self.cells[idx] = 1;
                }
            }
        }
        self.recompute_from(x, y);
    }

    /// Mark a whole rectangle as occupied
    pub fn commit_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        if x >= self.width || y >= self.height || w == 0 || h == 0 {
            return;
        }
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y..y_end {
            let start = self.cell_index(x, row);
            let end = self.cell_index(x_end - 1, row) + 1;
            self.cells[start..end].fill(1);
        }
        self.recompute_from(x, y);
    }

    /// Occupied cells inside a window, clipped to the map
    pub fn occupied_area(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let w = w.min(self.width - x);
        let h = h.min(self.height - y);
        self.window_sum(x, y, w, h)
    }

    /// Occupied cells over the whole map
    pub fn total_occupied(&self) -> u32 {
        self.integral_at(self.width, self.height)
    }

    /// Top-left corners of every free window, row by row
    fn free_windows(&self, box_w: u32, box_h: u32) -> impl Iterator<Item = Position> + '_ {
        (0..=self.height - box_h).flat_map(move |y| {
            (0..=self.width - box_w)
                .filter(move |&x| self.window_sum(x, y, box_w, box_h) == 0)
                .map(move |x| Position::new(x, y))
        })
    }

    fn window_sum(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        let (x1, y1) = (x + w, y + h);
        // a + d - b - c, ordered so the u32 math never underflows
        self.integral_at(x1, y1) + self.integral_at(x, y)
            - self.integral_at(x1, y)
            - self.integral_at(x, y1)
    }

    /// Rebuild prefix sums for rows `>= y` and columns `>= x`
    fn recompute_from(&mut self, x: u32, y: u32) {
        let stride = self.width as usize + 1;
        for row in y as usize..self.height as usize {
            for col in x as usize..self.width as usize {
                let cell = self.cells[row * self.width as usize + col] as u32;
                let above = self.integral[row * stride + col + 1];
                let left = self.integral[(row + 1) * stride + col];
                let diag = self.integral[row * stride + col];
                self.integral[(row + 1) * stride + col + 1] = cell + above + left - diag;
            }
        }
    }

    #[inline]
    fn integral_at(&self, x: u32, y: u32) -> u32 {
        self.integral[y as usize * (self.width as usize + 1) + x as usize]
    }

    #[inline]
    fn cell_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
