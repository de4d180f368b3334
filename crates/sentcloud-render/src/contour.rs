//! Outline of a shape mask

use sentcloud_layout::Mask;

use crate::{Canvas, Color};

/// Drawable cells that touch a blocked cell (4-neighbourhood)
pub fn edge_cells(mask: &Mask) -> Vec<(u32, u32)> {
    let (w, h) = (mask.width(), mask.height());
    let mut edges = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if mask.get(x, y) {
                continue;
            }
            let touches_blocked = (x > 0 && mask.get(x - 1, y))
                || (x + 1 < w && mask.get(x + 1, y))
                || (y > 0 && mask.get(x, y - 1))
                || (y + 1 < h && mask.get(x, y + 1));
            if touches_blocked {
                edges.push((x, y));
            }
        }
    }
    edges
}

/// Paint the mask boundary, dilated to `width` output pixels.
///
/// `scale` maps mask cells onto the canvas.
pub fn draw_contour(canvas: &mut Canvas, mask: &Mask, width: u32, scale: f32, color: Color) {
    if width == 0 {
        return;
    }
    let edges = edge_cells(mask);
    tracing::debug!("Drawing contour over {} edge cells", edges.len());

    let half = width as f32 / 2.0;
    let side = scale + width as f32;
    for (x, y) in edges {
        canvas.fill_rect(x as f32 * scale - half, y as f32 * scale - half, side, side, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 with only the centre 4x4 drawable
    fn window_mask() -> Mask {
        let mut mask = Mask::filled(10, 10);
        for y in 3..7 {
            for x in 3..7 {
                mask.set(x, y, false);
            }
        }
        mask
    }

    #[test]
    fn test_edge_cells_ring() {
        let edges = edge_cells(&window_mask());
        // 4x4 block: everything but the inner 2x2
        assert_eq!(edges.len(), 12);
        assert!(edges.contains(&(3, 3)));
        assert!(!edges.contains(&(4, 4)));
    }

    #[test]
    fn test_open_mask_has_no_edges() {
        assert!(edge_cells(&Mask::new(5, 5)).is_empty());
    }

    #[test]
    fn test_draw_contour() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.clear(Color::WHITE);
        draw_contour(&mut canvas, &window_mask(), 2, 1.0, Color::RED);

        assert_eq!(canvas.get_pixel(3, 3), Some(Color::RED));
        assert_eq!(canvas.get_pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_zero_width_is_noop() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.clear(Color::WHITE);
        draw_contour(&mut canvas, &window_mask(), 0, 1.0, Color::RED);
        assert_eq!(canvas.get_pixel(3, 3), Some(Color::WHITE));
    }
}
