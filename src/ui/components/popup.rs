use ratatui::layout::Rect;

/// A rect centered in `area`, sized between the min and max bounds and never
/// larger than the area allows.
pub fn centered_rect_constrained(
    area: Rect,
    min_width: u16,
    max_width: u16,
    min_height: u16,
    max_height: u16,
) -> Rect {
    let w = max_width
        .min(area.width.saturating_sub(4))
        .max(min_width)
        .min(area.width);
    let h = max_height
        .min(area.height.saturating_sub(4))
        .max(min_height)
        .min(area.height);

    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_fits_small_terminal() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect_constrained(area, 40, 60, 5, 20);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }

    #[test]
    fn test_popup_is_centered() {
        let rect = centered_rect_constrained(Rect::new(0, 0, 100, 40), 20, 60, 5, 20);
        assert_eq!(rect, Rect::new(20, 10, 60, 20));
    }
}
