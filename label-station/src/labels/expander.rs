//! Line-item expansion: one label instance per physical label

use tracing::{debug, warn};

use super::types::{LabelInstance, PrintableLine};

/// Upper bound on copies of a single line
pub const MAX_PRINT_QUANTITY: usize = 9999;

/// Turn a raw print quantity into a label count
///
/// Numbers are rounded to the nearest integer. Missing, non-numeric and
/// non-positive quantities print one label.
pub fn coerce_quantity(item_code: &str, raw: Option<f64>) -> usize {
    let Some(value) = raw else {
        debug!(item_code, "No print quantity, printing 1");
        return 1;
    };

    let rounded = value.round();
    if !rounded.is_finite() || rounded < 1.0 {
        warn!(item_code, quantity = value, "Invalid print quantity, printing 1");
        return 1;
    }
    if rounded > MAX_PRINT_QUANTITY as f64 {
        warn!(
            item_code,
            quantity = value,
            max = MAX_PRINT_QUANTITY,
            "Print quantity too large, clamping"
        );
        return MAX_PRINT_QUANTITY;
    }
    rounded as usize
}

/// Expand lines into label instances, keeping all copies of a line together
pub fn expand_lines(lines: &[PrintableLine]) -> Vec<LabelInstance> {
    let counts: Vec<usize> = lines
        .iter()
        .map(|line| coerce_quantity(&line.item_code, line.print_quantity))
        .collect();

    let mut labels = Vec::with_capacity(counts.iter().sum());
    for (line, &count) in lines.iter().zip(&counts) {
        let label = LabelInstance::from(line);
        labels.extend(std::iter::repeat_n(label, count));
    }
    labels
}
