//! Bar layout: one rectangle per adjacent pair of bin positions.

use super::Rect;

/// Lay out bars for `xs`/`heights`, standing on the bottom of a viewport `viewport_height` tall.
///
/// Pair (i-1, i) yields a bar centred between the two positions with the
/// height of bin i-1. The final bin has no right neighbour and gets no
/// bar, so n positions yield n - 1 bars.
pub fn layout(xs: &[f32], heights: &[f32], min_width: f32, viewport_height: f32) -> Vec<Rect> {
    let count = xs.len().min(heights.len());
    if count < 2 {
        return Vec::new();
    }

    (1..count)
        .map(|i| {
            let width = (xs[i] - xs[i - 1]).max(min_width);
            let centre = (xs[i] + xs[i - 1]) / 2.0;
            let height = heights[i - 1];
            Rect {
                x: centre - width / 2.0,
                y: viewport_height - height,
                width,
                height,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_count_drops_last_bin() {
        let xs = [0.0, 10.0, 20.0, 30.0, 40.0];
        let heights = [1.0, 2.0, 3.0, 4.0, 5.0];
        let bars = layout(&xs, &heights, 2.0, 100.0);
        assert_eq!(bars.len(), 4);
        // Last bar uses the second-to-last height; the last bin is never drawn
        assert_eq!(bars[3].height, 4.0);
    }

    #[test]
    fn test_bar_geometry() {
        let bars = layout(&[100.0, 130.0], &[50.0, 0.0], 2.0, 200.0);
        assert_eq!(
            bars,
            vec![Rect {
                x: 100.0,
                y: 150.0,
                width: 30.0,
                height: 50.0
            }]
        );
    }

    #[test]
    fn test_min_width_centred() {
        let bars = layout(&[10.0, 10.5], &[20.0, 20.0], 2.0, 100.0);
        assert_eq!(bars[0].width, 2.0);
        assert!((bars[0].x - 9.25).abs() < 1e-6);
    }

    #[test]
    fn test_too_few_points() {
        assert!(layout(&[], &[], 2.0, 100.0).is_empty());
        assert!(layout(&[1.0], &[1.0], 2.0, 100.0).is_empty());
    }
}
