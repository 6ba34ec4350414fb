//! Reference Chart
//!
//! Average wait per weekday, drawn as horizontal text bars.
//!
//! The figures are illustrative reference data shipped with the app. They
//! are never derived from, or updated by, live predictions.

/// Illustrative average wait in minutes for each day of the week
pub const AVG_WAIT_BY_DAY: [(&str, u32); 7] = [
    ("Monday", 15),
    ("Tuesday", 20),
    ("Wednesday", 18),
    ("Thursday", 22),
    ("Friday", 25),
    ("Saturday", 30),
    ("Sunday", 12),
];

/// Chart title
pub const CHART_TITLE: &str = "📊 Average Wait Time Per Day";

const BAR_CHAR: char = '█';

/// Render `data` as one bar per row, the longest bar `width` cells wide
pub fn render_bar_chart(data: &[(&str, u32)], width: usize) -> String {
    let label_width = data.iter().map(|(day, _)| day.len()).max().unwrap_or(0);
    let max_value = data.iter().map(|(_, wait)| *wait).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(CHART_TITLE);
    out.push('\n');

    if data.is_empty() {
        out.push_str("  No data\n");
        return out;
    }

    for (day, wait) in data {
        let bar_len = if max_value == 0 {
            0
        } else {
            // Round to nearest cell
            ((*wait as usize * width) + max_value as usize / 2) / max_value as usize
        };
        let bar: String = std::iter::repeat(BAR_CHAR).take(bar_len).collect();
        out.push_str(&format!(
            "  {:<label_width$} │{} {}\n",
            day,
            bar,
            wait,
            label_width = label_width
        ));
    }

    out.push_str(&format!(
        "  {:<label_width$} └ Minutes\n",
        "",
        label_width = label_width
    ));
    out
}

/// Render the built-in reference chart
pub fn reference_chart(width: usize) -> String {
    render_bar_chart(&AVG_WAIT_BY_DAY, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_data_is_fixed() {
        assert_eq!(AVG_WAIT_BY_DAY.len(), 7);
        assert_eq!(AVG_WAIT_BY_DAY[0], ("Monday", 15));
        assert_eq!(AVG_WAIT_BY_DAY[5], ("Saturday", 30));
        assert_eq!(AVG_WAIT_BY_DAY[6], ("Sunday", 12));
    }

    #[test]
    fn test_longest_bar_fills_width() {
        let chart = reference_chart(30);
        let saturday = chart.lines().find(|l| l.contains("Saturday")).unwrap();
        let bars = saturday.chars().filter(|c| *c == BAR_CHAR).count();
        assert_eq!(bars, 30);
        assert!(saturday.ends_with(" 30"));
    }

    #[test]
    fn test_bars_scale() {
        let chart = render_bar_chart(&[("A", 10), ("B", 5)], 10);
        let counts: Vec<usize> = chart
            .lines()
            .skip(1)
            .take(2)
            .map(|l| l.chars().filter(|c| *c == BAR_CHAR).count())
            .collect();
        assert_eq!(counts, vec![10, 5]);
    }

    #[test]
    fn test_empty_chart() {
        let chart = render_bar_chart(&[], 10);
        assert!(chart.contains("No data"));
    }
}
