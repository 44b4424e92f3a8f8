//! Completion percentage shared by the assembly board and the quiz.

/// `round(100 * done / total)`, rounding halves up, in integer arithmetic.
///
/// An empty total counts as 0%. Anything short of `total` stays below 100,
/// even when the ratio would round up to it.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    if done >= total {
        return 100;
    }
    (((200 * done + total) / (2 * total)) as u8).min(99)
}

/// Text progress bar followed by the same percentage as a label.
pub fn bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100) as usize;
    let filled = (percent * width + 50) / 100;
    format!(
        "{}{} {}%",
        "▓".repeat(filled),
        "░".repeat(width - filled),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_of_seven_is_fourteen() {
        assert_eq!(percent(1, 7), 14);
        assert_eq!(percent(7, 7), 100);
        assert_eq!(percent(0, 7), 0);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(percent(1, 8), 13); // 12.5
        assert_eq!(percent(1, 200), 1); // 0.5
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
    }

    #[test]
    fn only_full_is_hundred() {
        for total in 1..=50 {
            for done in 0..total {
                assert!(percent(done, total) < 100, "{done}/{total}");
            }
            assert_eq!(percent(total, total), 100);
        }
    }

    #[test]
    fn near_complete_large_totals_stay_below_hundred() {
        assert_eq!(percent(200, 201), 99);
    }

    #[test]
    fn empty_total_is_zero() {
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn bar_label_matches_percent() {
        assert_eq!(bar(0, 10), "░░░░░░░░░░ 0%");
        assert_eq!(bar(100, 10), "▓▓▓▓▓▓▓▓▓▓ 100%");
        assert!(bar(14, 10).ends_with(" 14%"));
        assert_eq!(bar(14, 10).chars().filter(|c| *c == '▓').count(), 1);
    }
}
