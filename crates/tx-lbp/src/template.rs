use tx_core::{BorderMode, ImageView, sample_at};

/// `(dx, dy)` of the 3x3 neighbors, clockwise from the top-left:
///
/// <pre>
/// 0  1  2
/// 7  p  3
/// 6  5  4
/// </pre>
pub const NEIGHBOR_OFFSETS_3X3: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Intensity of neighbor `index` of `(x, y)`.
///
/// Neighbors outside the image resolve through `border`; with
/// `BorderMode::Constant(0)` they read as 0.
pub fn neighbor_3x3(
    img: &ImageView<'_, u8>,
    x: usize,
    y: usize,
    index: usize,
    border: &BorderMode<u8>,
) -> u8 {
    let (dx, dy) = NEIGHBOR_OFFSETS_3X3[index];
    sample_at(img, x as isize + dx, y as isize + dy, border).unwrap_or(0)
}

/// All eight neighbors of `(x, y)` in template order.
pub fn neighbors_3x3(
    img: &ImageView<'_, u8>,
    x: usize,
    y: usize,
    border: &BorderMode<u8>,
    out: &mut [u8; 8],
) {
    for (index, dst) in out.iter_mut().enumerate() {
        *dst = neighbor_3x3(img, x, y, index, border);
    }
}

#[cfg(test)]
mod tests {
    use tx_core::{BorderMode, Image};

    use super::{neighbor_3x3, neighbors_3x3};

    fn ramp() -> Image<u8> {
        Image::from_vec(
            3,
            3,
            vec![
                1u8, 2, 3, // row 0
                4, 5, 6, // row 1
                7, 8, 9, // row 2
            ],
        )
        .expect("valid image")
    }

    #[test]
    fn interior_pixel_reads_clockwise_from_top_left() {
        let img = ramp();
        let mut out = [0u8; 8];
        neighbors_3x3(&img.as_view(), 1, 1, &BorderMode::Constant(0), &mut out);
        assert_eq!(out, [1, 2, 3, 6, 9, 8, 7, 4]);
    }

    #[test]
    fn corners_zero_fill_missing_neighbors() {
        let img = ramp();
        let view = img.as_view();
        let zero = BorderMode::Constant(0);
        let mut out = [0u8; 8];

        neighbors_3x3(&view, 0, 0, &zero, &mut out);
        assert_eq!(out, [0, 0, 0, 2, 5, 4, 0, 0]);

        neighbors_3x3(&view, 2, 0, &zero, &mut out);
        assert_eq!(out, [0, 0, 0, 0, 0, 6, 5, 2]);

        neighbors_3x3(&view, 2, 2, &zero, &mut out);
        assert_eq!(out, [5, 6, 0, 0, 0, 0, 0, 8]);

        neighbors_3x3(&view, 0, 2, &zero, &mut out);
        assert_eq!(out, [0, 4, 5, 8, 0, 0, 0, 0]);
    }

    #[test]
    fn edges_zero_fill_missing_neighbors() {
        let img = ramp();
        let view = img.as_view();
        let zero = BorderMode::Constant(0);
        let mut out = [0u8; 8];

        neighbors_3x3(&view, 1, 0, &zero, &mut out);
        assert_eq!(out, [0, 0, 0, 3, 6, 5, 4, 1]);

        neighbors_3x3(&view, 0, 1, &zero, &mut out);
        assert_eq!(out, [0, 1, 2, 5, 8, 7, 0, 0]);
    }

    #[test]
    fn clamp_border_repeats_edge() {
        let img = ramp();
        assert_eq!(neighbor_3x3(&img.as_view(), 0, 0, 0, &BorderMode::Clamp), 1);
        assert_eq!(neighbor_3x3(&img.as_view(), 2, 2, 4, &BorderMode::Clamp), 9);
    }

    #[test]
    fn single_pixel_image_has_no_neighbors() {
        let img = Image::new_fill(1, 1, 42u8);
        let mut out = [7u8; 8];
        neighbors_3x3(&img.as_view(), 0, 0, &BorderMode::Constant(0), &mut out);
        assert_eq!(out, [0; 8]);
    }
}
