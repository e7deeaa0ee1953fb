use crate::error::PageError;
use crate::record::{Record, Value};
use feruca::Collator;
use ord_subset::OrdSubset;
use serde::Serialize;
use std::borrow::Borrow;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(PageError::InvalidConfig(format!(
                "Unknown sort direction '{}' (expected asc or desc)",
                other
            ))),
        }
    }
}

thread_local! {
    // CLDR root collation; keeps its lookup caches between comparisons
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Unicode Collation Algorithm comparison with the CLDR root tailoring.
/// Accents and case are secondary and tertiary differences; byte order breaks
/// any remaining tie.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

// NaN has no place in the order; it ties with everything so it keeps input order.
fn compare_numbers(a: f64, b: f64) -> Ordering {
    if a.is_outside_order() || b.is_outside_order() {
        return Ordering::Equal;
    }
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Compare two field values for sorting.
///
/// Nulls always go last, whichever the direction. Values of different kinds
/// are compared by their display strings.
pub fn compare_values(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    let ordering = match (a, b) {
        (Value::Null, Value::Null) => return Ordering::Equal,
        (Value::Null, _) => return Ordering::Greater,
        (_, Value::Null) => return Ordering::Less,
        (Value::Text(a), Value::Text(b)) => locale_compare(a, b),
        (Value::Number(a), Value::Number(b)) => compare_numbers(*a, *b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (a, b) => a.to_display_string().cmp(&b.to_display_string()),
    };
    direction.apply(ordering)
}

/// Bottom-up merge sort over indices. Must tolerate comparators that are not
/// a total order (mixed-type columns). Stable: the left run wins ties.
fn stable_sort_indices<F>(order: &mut Vec<usize>, mut compare: F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let len = order.len();
    if len < 2 {
        return;
    }

    let mut buffer = vec![0usize; len];
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right, mut out) = (start, mid, start);

            while left < mid && right < end {
                if compare(order[right], order[left]) == Ordering::Less {
                    buffer[out] = order[right];
                    right += 1;
                } else {
                    buffer[out] = order[left];
                    left += 1;
                }
                out += 1;
            }

            let remaining_left = mid - left;
            buffer[out..out + remaining_left].copy_from_slice(&order[left..mid]);
            out += remaining_left;
            buffer[out..end].copy_from_slice(&order[right..end]);

            start = end;
        }
        std::mem::swap(order, &mut buffer);
        width *= 2;
    }
}

/// Reorder `order` (indices into `items`) by the value of `key`.
pub(crate) fn sort_indices(
    items: &[Record],
    order: &mut Vec<usize>,
    key: Option<&str>,
    direction: SortDirection,
) {
    if let Some(key) = key {
        stable_sort_indices(order, |a, b| {
            compare_values(items[a].get(key), items[b].get(key), direction)
        });
    }
}

/// Standalone sort helper. Without a key the input order is returned as is.
pub fn sort<R>(items: &[R], key: Option<&str>, direction: SortDirection) -> Vec<R>
where
    R: Borrow<Record> + Clone,
{
    let Some(key) = key else {
        return items.to_vec();
    };

    let mut order: Vec<usize> = (0..items.len()).collect();
    stable_sort_indices(&mut order, |a, b| {
        let left: &Record = items[a].borrow();
        let right: &Record = items[b].borrow();
        compare_values(left.get(key), right.get(key), direction)
    });
    order.into_iter().map(|index| items[index].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn people() -> Vec<Record> {
        vec![
            Record::new().with("name", "Bob").with("age", 30),
            Record::new().with("name", "Ann").with("age", 25),
            Record::new().with("name", Value::Null).with("age", 40),
        ]
    }

    fn names(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get("name").to_display_string())
            .collect()
    }

    #[test]
    fn test_text_ascending_with_null_last() {
        let sorted = sort(&people(), Some("name"), SortDirection::Ascending);
        assert_eq!(names(&sorted), vec!["Ann", "Bob", ""]);
        assert!(sorted[2].get("name").is_null());
        assert_eq!(sorted[2].get("age"), &Value::Number(40.0));
    }

    #[test]
    fn test_nulls_stay_last_when_descending() {
        let sorted = sort(&people(), Some("name"), SortDirection::Descending);
        assert_eq!(names(&sorted), vec!["Bob", "Ann", ""]);
    }

    #[test]
    fn test_missing_key_is_treated_as_null() {
        let items = vec![
            Record::new().with("name", "Cleo"),
            Record::new().with("name", "Ann").with("rank", 2),
            Record::new().with("name", "Bob").with("rank", 1),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = sort(&items, Some("rank"), direction);
            assert_eq!(sorted[2].get("name"), &Value::from("Cleo"));
        }
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let items: Vec<Record> = [10, 9, 100, 1]
            .iter()
            .map(|n| Record::new().with("n", *n))
            .collect();
        let sorted = sort(&items, Some("n"), SortDirection::Ascending);
        let values: Vec<String> = sorted.iter().map(|r| r.get("n").to_display_string()).collect();
        assert_eq!(values, vec!["1", "9", "10", "100"]);
    }

    #[test]
    fn test_dates_sort_by_instant() {
        let items = vec![
            Record::new().with("id", 1).with("posted", datetime!(2024-05-01 09:00 +2)),
            Record::new().with("id", 2).with("posted", datetime!(2024-05-01 08:00 UTC)),
        ];
        let sorted = sort(&items, Some("posted"), SortDirection::Ascending);
        // 09:00+02:00 is 07:00 UTC
        assert_eq!(sorted[0].get("id"), &Value::Number(1.0));
    }

    #[test]
    fn test_no_key_keeps_input_order() {
        let items = people();
        assert_eq!(sort(&items, None, SortDirection::Descending), items);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let items = vec![
            Record::new().with("team", "b").with("id", 1),
            Record::new().with("team", "a").with("id", 2),
            Record::new().with("team", "b").with("id", 3),
            Record::new().with("team", "a").with("id", 4),
            Record::new().with("team", "b").with("id", 5),
        ];
        fn ids(records: &[Record]) -> Vec<String> {
            records.iter().map(|r| r.get("id").to_display_string()).collect()
        }
        assert_eq!(
            ids(&sort(&items, Some("team"), SortDirection::Ascending)),
            vec!["2", "4", "1", "3", "5"]
        );
        assert_eq!(
            ids(&sort(&items, Some("team"), SortDirection::Descending)),
            vec!["1", "3", "5", "2", "4"]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let items = people();
        let once = sort(&items, Some("name"), SortDirection::Descending);
        let twice = sort(&once, Some("name"), SortDirection::Descending);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_borrowed_records() {
        let items = people();
        let refs: Vec<&Record> = items.iter().collect();
        let sorted = sort(&refs, Some("age"), SortDirection::Descending);
        assert_eq!(sorted[0].get("age"), &Value::Number(40.0));
        assert_eq!(sorted[2].get("age"), &Value::Number(25.0));
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Zoe", "zoe"), Ordering::Greater);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_eq!(locale_compare("Émile", "Zoe"), Ordering::Less);
        assert_eq!(locale_compare("Andre", "Émile"), Ordering::Less);
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let items: Vec<Record> = ["Zoe", "Émile", "Andre", "emma"]
            .iter()
            .map(|name| Record::new().with("name", *name))
            .collect();
        let sorted = sort(&items, Some("name"), SortDirection::Ascending);
        assert_eq!(names(&sorted), vec!["Andre", "Émile", "emma", "Zoe"]);
    }

    #[test]
    fn test_mixed_types_compare_as_strings() {
        assert_eq!(
            compare_values(&Value::Number(10.0), &Value::from("9"), SortDirection::Ascending),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::Bool(true), &Value::Bool(false), SortDirection::Ascending),
            Ordering::Greater
        );
    }

    #[test]
    fn test_nan_ties_with_numbers() {
        assert_eq!(
            compare_values(&Value::Number(f64::NAN), &Value::Number(1.0), SortDirection::Ascending),
            Ordering::Equal
        );
    }

    #[test]
    fn test_inconsistent_mixed_column_does_not_panic() {
        let values: Vec<Value> = vec![
            Value::Number(9.0),
            Value::from("9"),
            Value::Number(10.0),
            Value::Bool(true),
            Value::from("10"),
            Value::Number(f64::NAN),
            Value::Null,
            Value::from(vec!["x", "y"]),
        ];
        let items: Vec<Record> = values
            .iter()
            .cycle()
            .take(64)
            .enumerate()
            .map(|(i, v)| Record::new().with("v", v.clone()).with("i", i as i64))
            .collect();
        let sorted = sort(&items, Some("v"), SortDirection::Ascending);
        assert_eq!(sorted.len(), items.len());
        assert!(sorted[56..].iter().all(|r| r.get("v").is_null()));
    }
}
