use serde_json::Value;

use super::{format_value, result_of};

/// Print just the key answer value from the output.
///
/// Looks for the headline statistic of each command in priority order,
/// then falls back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = result_of(value);

    // Dotted paths reach into nested test results.
    let priority_paths = [
        "conforms",
        "bootstrap.mean_statistic",
        "mean_statistic",
        "chi2.statistic",
        "retained",
        "save_path",
    ];

    for path in &priority_paths {
        let found = path
            .split('.')
            .try_fold(result_obj, |v, key| v.as_object().and_then(|m| m.get(key)));
        if let Some(val) = found {
            if !val.is_null() {
                println!("{}", format_value(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}
