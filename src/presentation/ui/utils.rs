use ratatui::layout::Rect;

/// A `width` x `height` rect centered in `r`, shrunk to fit.
#[must_use]
pub fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed_fits() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_fixed(40, 10, area), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_fixed_shrinks() {
        let area = Rect::new(2, 1, 20, 5);
        assert_eq!(centered_fixed(40, 10, area), Rect::new(2, 1, 20, 5));
    }
}
