use crate::Error;
use crate::border::BorderMode;
use crate::image::ImageView;

/// Reads the pixel at integer `(x, y)`, resolving out-of-image coordinates
/// through `border`.
///
/// Returns `None` only when the image is empty and the border is not
/// [`BorderMode::Constant`].
pub fn sample_at<T: Copy>(
    img: &ImageView<'_, T>,
    x: isize,
    y: isize,
    border: &BorderMode<T>,
) -> Option<T> {
    match (
        border.map_index(x, img.width()),
        border.map_index(y, img.height()),
    ) {
        (Some(mx), Some(my)) => img.get(mx, my).copied(),
        _ => match border {
            BorderMode::Constant(v) => Some(*v),
            BorderMode::Clamp | BorderMode::Reflect101 => None,
        },
    }
}

/// Bilinear interpolation at the sub-pixel position `(x, y)`.
///
/// The neighborhood is `floor(x)..=ceil(x)` by `floor(y)..=ceil(y)`. Columns
/// are blended first, then the two row results:
///
/// ```text
/// top    = (1 - dx) * I[y0, x0] + dx * I[y0, x1]
/// bottom = (1 - dx) * I[y1, x0] + dx * I[y1, x1]
/// value  = (1 - dy) * top + dy * bottom
/// ```
///
/// Every corner must lie inside the image; otherwise [`Error::OutOfBounds`]
/// is returned.
pub fn sample_bilinear<T: Copy + Into<f64>>(
    img: &ImageView<'_, T>,
    x: f64,
    y: f64,
) -> Result<f64, Error> {
    if !x.is_finite() || !y.is_finite() {
        return Err(Error::OutOfBounds);
    }

    let fx = x.floor();
    let fy = y.floor();
    let cx = x.ceil();
    let cy = y.ceil();
    if fx < 0.0 || fy < 0.0 || cx >= img.width() as f64 || cy >= img.height() as f64 {
        return Err(Error::OutOfBounds);
    }

    let (x0, x1, y0, y1) = (fx as usize, cx as usize, fy as usize, cy as usize);
    let dx = x - fx;
    let dy = y - fy;

    let px = |xi: usize, yi: usize| -> Result<f64, Error> {
        img.get(xi, yi).map(|&v| v.into()).ok_or(Error::OutOfBounds)
    };

    let top = (1.0 - dx) * px(x0, y0)? + dx * px(x1, y0)?;
    let bottom = (1.0 - dx) * px(x0, y1)? + dx * px(x1, y1)?;
    Ok((1.0 - dy) * top + dy * bottom)
}
