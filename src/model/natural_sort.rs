use std::cmp::Ordering;

/// Natural-order comparison: alternating non-digit/digit runs are compared
/// element-wise, digit runs by integer value, so `group-2` sorts before
/// `group-10`. Leading zeros do not affect the value; when two runs are
/// numerically equal the shorter (fewer leading zeros) run wins so the
/// ordering stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = runs(a);
    let mut right = runs(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.numeric, y.numeric) {
                    (true, true) => cmp_numeric(x.text, y.text),
                    // A digit run sorts before a non-digit run, matching
                    // byte order of digits vs letters.
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (false, false) => x.text.cmp(y.text),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

struct Run<'a> {
    text: &'a str,
    numeric: bool,
}

fn runs(s: &str) -> impl Iterator<Item = Run<'_>> {
    let bytes = s.as_bytes();
    let mut start = 0;
    std::iter::from_fn(move || {
        if start >= bytes.len() {
            return None;
        }
        let numeric = bytes[start].is_ascii_digit();
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() == numeric {
            end += 1;
        }
        let run = Run {
            text: &s[start..end],
            numeric,
        };
        start = end;
        Some(run)
    })
}

/// Integer comparison of digit runs of arbitrary length: strip leading
/// zeros, compare by digit count, then lexically. Equal values break the tie
/// on the raw run so `01` and `1` stay distinguishable.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_runs_compare_by_value() {
        let mut labels = vec!["group-10", "group-2"];
        labels.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(labels, vec!["group-2", "group-10"]);
    }

    #[test]
    fn mixed_alpha_numeric_labels() {
        let mut labels = vec!["2. Group 2", "10. Group 10", "1. Group 1"];
        labels.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(labels, vec!["1. Group 1", "2. Group 2", "10. Group 10"]);
    }

    #[test]
    fn alpha_suffix_breaks_numeric_ties() {
        let mut labels = vec!["group-2", "group-1b", "group-10", "group-1"];
        labels.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(labels, vec!["group-1", "group-1b", "group-2", "group-10"]);
    }

    #[test]
    fn leading_zeros_do_not_change_value_order() {
        assert_eq!(natural_cmp("item-002", "item-3"), Ordering::Less);
        assert_eq!(natural_cmp("item-010", "item-9"), Ordering::Greater);
        // equal value, different spelling: still a total order
        assert_eq!(natural_cmp("item-01", "item-1"), Ordering::Greater);
        assert_eq!(natural_cmp("item-1", "item-1"), Ordering::Equal);
    }

    #[test]
    fn huge_numbers_do_not_overflow() {
        assert_eq!(
            natural_cmp("v99999999999999999999998", "v99999999999999999999910"),
            Ordering::Greater
        );
    }
}
