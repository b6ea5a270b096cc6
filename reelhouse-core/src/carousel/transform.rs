//! Per-item presentation transforms.
//!
//! Everything here is a pure function of `(index, active_index, len)` and a
//! style table, so the presentation layer can recompute transforms on demand
//! and tests can check them without mounting a view. Activeness is decided
//! only by `circular_offset(..) == 0`.

use serde::{Deserialize, Serialize};

/// Visual parameters applied to carousel cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformStyle {
    /// Horizontal distance between neighbouring card centers, in pixels.
    pub spacing: f32,
    pub active_scale: f32,
    pub inactive_scale: f32,
    pub active_opacity: f32,
    pub inactive_opacity: f32,
    /// Blur applied to off-center cards. Zero disables blur.
    pub inactive_blur: f32,
    pub inactive_brightness: f32,
    /// Y rotation (degrees) of off-center cards, turned toward the center.
    pub rotate_y_degrees: f32,
    pub base_z_index: i32,
}

impl TransformStyle {
    pub const DEFAULT: TransformStyle = TransformStyle {
        spacing: 220.0,
        active_scale: 1.2,
        inactive_scale: 0.8,
        active_opacity: 1.0,
        inactive_opacity: 0.5,
        inactive_blur: 0.0,
        inactive_brightness: 0.5,
        rotate_y_degrees: 15.0,
        base_z_index: 10,
    };
}

impl Default for TransformStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Render descriptor for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    /// Signed shortest-path distance from the active item.
    pub diff: isize,
    pub x_offset: f32,
    pub scale: f32,
    pub opacity: f32,
    pub blur_radius: f32,
    pub brightness: f32,
    pub rotate_y: f32,
    pub z_index: i32,
    pub is_active: bool,
}

/// Signed circular distance of `index` from `active_index`, folded into
/// `(-len/2, len/2]`.
///
/// Items "behind" the active one wrap to a small negative value instead of a
/// large positive one. Returns 0 for an empty track.
pub fn circular_offset(index: usize, active_index: usize, len: usize) -> isize {
    if len == 0 {
        return 0;
    }
    let n = len as isize;
    let mut diff = (index as isize - active_index as isize).rem_euclid(n);
    if diff * 2 > n {
        diff -= n;
    }
    diff
}

pub fn item_transform(
    index: usize,
    active_index: usize,
    len: usize,
    style: &TransformStyle,
) -> ItemTransform {
    let diff = circular_offset(index, active_index, len);
    if diff == 0 {
        return ItemTransform {
            diff,
            x_offset: 0.0,
            scale: style.active_scale,
            opacity: style.active_opacity,
            blur_radius: 0.0,
            brightness: 1.0,
            rotate_y: 0.0,
            z_index: style.base_z_index,
            is_active: true,
        };
    }

    let rotate_y = if diff > 0 {
        -style.rotate_y_degrees
    } else {
        style.rotate_y_degrees
    };
    ItemTransform {
        diff,
        x_offset: diff as f32 * style.spacing,
        scale: style.inactive_scale,
        opacity: style.inactive_opacity,
        blur_radius: style.inactive_blur,
        brightness: style.inactive_brightness,
        rotate_y,
        z_index: style.base_z_index - diff.unsigned_abs() as i32,
        is_active: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_items_wrap_along_the_shortest_path() {
        let diffs: Vec<isize> =
            (0..5).map(|index| circular_offset(index, 1, 5)).collect();
        assert_eq!(diffs, vec![-1, 0, 1, 2, -2]);
    }

    #[test]
    fn offsets_stay_in_half_open_range_and_reconstruct_the_index() {
        for len in 1..=9usize {
            let n = len as isize;
            for active in 0..len {
                for index in 0..len {
                    let diff = circular_offset(index, active, len);
                    assert!(
                        2 * diff > -n && 2 * diff <= n,
                        "diff {diff} out of range for len {len}"
                    );
                    let rebuilt =
                        (diff + active as isize).rem_euclid(n) as usize;
                    assert_eq!(rebuilt, index);
                }
            }
        }
    }

    #[test]
    fn even_length_keeps_the_opposite_item_positive() {
        assert_eq!(circular_offset(2, 0, 4), 2);
        assert_eq!(circular_offset(0, 2, 4), 2);
    }

    #[test]
    fn active_item_gets_full_presence() {
        let t = item_transform(3, 3, 5, &TransformStyle::default());
        assert!(t.is_active);
        assert_eq!(t.x_offset, 0.0);
        assert_eq!(t.scale, 1.2);
        assert_eq!(t.opacity, 1.0);
        assert_eq!(t.blur_radius, 0.0);
        assert_eq!(t.z_index, 10);
    }

    #[test]
    fn neighbours_are_offset_dimmed_and_stacked_below() {
        let style = TransformStyle {
            inactive_blur: 4.0,
            ..TransformStyle::default()
        };
        let left = item_transform(0, 1, 5, &style);
        let far_right = item_transform(3, 1, 5, &style);

        assert_eq!(left.x_offset, -220.0);
        assert_eq!(left.rotate_y, 15.0);
        assert_eq!(left.z_index, 9);
        assert_eq!(left.blur_radius, 4.0);

        assert_eq!(far_right.x_offset, 440.0);
        assert_eq!(far_right.rotate_y, -15.0);
        assert_eq!(far_right.z_index, 8);
        assert!(far_right.z_index < left.z_index);
        assert_eq!(far_right.opacity, 0.5);
        assert_eq!(far_right.scale, 0.8);
    }
}
