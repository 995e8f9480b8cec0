/// Fixed palette for per-series colors.
///
/// Colors are assigned by position so a series keeps its color across
/// re-renders and refetches.
const PALETTE: [&str; 10] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2", "#7F7F7F",
    "#BCBD22", "#17BECF",
];

/// Color for the series at `series_index`, cycling through the palette.
pub fn color_for(series_index: usize) -> &'static str {
    PALETTE[series_index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_is_stable_and_periodic() {
        assert_eq!(color_for(0), color_for(0));
        assert_eq!(color_for(3), color_for(3 + PALETTE.len()));
        assert_ne!(color_for(0), color_for(1));

        for i in 0..100 {
            assert!(color_for(i).starts_with('#'));
        }
    }
}
