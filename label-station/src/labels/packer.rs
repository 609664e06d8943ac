//! Row packing

use super::types::{LabelInstance, Row};

/// Split labels into rows of `labels_per_row`
///
/// Only the last row may be shorter. No row is empty and rows are never padded.
pub fn pack_rows(labels: &[LabelInstance], labels_per_row: usize) -> Vec<Row<'_>> {
    labels.chunks(labels_per_row.max(1)).map(Row::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<LabelInstance> {
        (0..n)
            .map(|i| LabelInstance {
                display_name: format!("Label {}", i),
                barcode_value: i.to_string(),
                item_code: format!("I{}", i),
                unit_price: i as f64,
            })
            .collect()
    }

    #[test]
    fn test_even_split() {
        let all = labels(4);
        let rows = pack_rows(&all, 2);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_partial_last_row() {
        let all = labels(3);
        let rows = pack_rows(&all, 2);
        assert_eq!(rows.iter().map(Row::len).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_rows_reproduce_input() {
        let all = labels(7);
        for per_row in 1..=8 {
            let rows = pack_rows(&all, per_row);
            let flat: Vec<_> = rows.iter().flat_map(|r| r.labels().iter().cloned()).collect();
            assert_eq!(flat, all);
            let (last, full) = rows.split_last().unwrap();
            assert!(full.iter().all(|r| r.len() == per_row));
            assert!((1..=per_row).contains(&last.len()));
        }
    }

    #[test]
    fn test_zero_per_row_treated_as_one() {
        let all = labels(3);
        assert_eq!(pack_rows(&all, 0).len(), 3);
    }

    #[test]
    fn test_no_labels_no_rows() {
        assert!(pack_rows(&[], 2).is_empty());
    }
}
