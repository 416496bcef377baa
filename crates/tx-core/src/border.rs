/// Policy for integer lookups that fall outside the image.
#[derive(Debug, Clone, PartialEq)]
pub enum BorderMode<T> {
    /// Out-of-image reads return the stored value.
    Constant(T),
    /// Out-of-image reads return the nearest edge pixel.
    Clamp,
    /// Mirror around the edge pixel without repeating it (`dcb|abcd|cba`).
    Reflect101,
}

impl<T> BorderMode<T> {
    /// Maps a possibly out-of-range index onto `[0, len)`.
    ///
    /// Returns `None` for [`BorderMode::Constant`] when `i` is outside the
    /// range, and for every mode when `len == 0`.
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        map_index(i, len, self)
    }
}

pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => Some(if i < 0 { 0 } else { len - 1 }),
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }
            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            Some(if r < len { r } else { period as usize - r })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, map_index};

    #[test]
    fn in_range_indices_pass_through_every_mode() {
        for i in 0..4isize {
            assert_eq!(map_index(i, 4, &BorderMode::Constant(0u8)), Some(i as usize));
            assert_eq!(map_index(i, 4, &BorderMode::<u8>::Clamp), Some(i as usize));
            assert_eq!(map_index(i, 4, &BorderMode::<u8>::Reflect101), Some(i as usize));
        }
    }

    #[test]
    fn constant_rejects_one_step_outside() {
        let mode = BorderMode::Constant(0u8);
        assert_eq!(mode.map_index(-1, 3), None);
        assert_eq!(mode.map_index(3, 3), None);
    }

    #[test]
    fn clamp_and_reflect_one_step_outside() {
        assert_eq!(BorderMode::<u8>::Clamp.map_index(-1, 3), Some(0));
        assert_eq!(BorderMode::<u8>::Clamp.map_index(3, 3), Some(2));
        assert_eq!(BorderMode::<u8>::Reflect101.map_index(-1, 3), Some(1));
        assert_eq!(BorderMode::<u8>::Reflect101.map_index(3, 3), Some(1));
        assert_eq!(BorderMode::<u8>::Reflect101.map_index(-5, 1), Some(0));
    }

    #[test]
    fn empty_axis_maps_nowhere() {
        assert_eq!(BorderMode::<u8>::Clamp.map_index(0, 0), None);
        assert_eq!(BorderMode::<u8>::Reflect101.map_index(0, 0), None);
    }
}
