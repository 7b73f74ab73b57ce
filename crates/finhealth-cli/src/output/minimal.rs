use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    // Unwrap the computation envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // A recommendation list: one line per category
    if let Value::Array(items) = result_obj {
        if items.is_empty() {
            println!("no recommendations");
            return;
        }
        for item in items {
            if let Value::Object(map) = item {
                let category = map.get("category").map(format_minimal).unwrap_or_default();
                let priority = map.get("priority").map(format_minimal).unwrap_or_default();
                println!("{}: {}", category, priority);
            } else {
                println!("{}", format_minimal(item));
            }
        }
        return;
    }

    // Priority list of key output fields
    let priority_keys = [
        "score",
        "tier",
        "risk_tier",
        "risk_score",
        "current_ratio",
        "revenue_growth",
    ];

    if let Value::Object(map) = result_obj {
        // A full report leads with the credit score
        if let Some(Value::Object(credit)) = map.get("credit_score") {
            if let (Some(score), Some(tier)) = (credit.get("score"), credit.get("tier")) {
                println!("{} ({})", format_minimal(score), format_minimal(tier));
                return;
            }
        }

        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // Not an object, just print directly
    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
