//! Diff rendering for fixture comparison.

use serde_json::Value;

/// Render a line diff between pretty-printed expected and actual output.
#[must_use]
pub fn render_diff(expected: &Value, actual: &Value) -> String {
    let expected = serde_json::to_string_pretty(expected).unwrap_or_else(|_| expected.to_string());
    let actual = serde_json::to_string_pretty(actual).unwrap_or_else(|_| actual.to_string());
    render_text_diff(&expected, &actual)
}

/// Line-by-line diff of two texts.
#[must_use]
pub fn render_text_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let e_lines: Vec<&str> = expected.lines().collect();
    let a_lines: Vec<&str> = actual.lines().collect();
    for i in 0..e_lines.len().max(a_lines.len()) {
        match (e_lines.get(i), a_lines.get(i)) {
            (Some(e), Some(a)) if e == a => {}
            (e, a) => {
                out.push_str(&format!("@@ line {} @@\n", i + 1));
                if let Some(e) = e {
                    out.push_str(&format!("-{e}\n"));
                }
                if let Some(a) = a {
                    out.push_str(&format!("+{a}\n"));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_values() {
        assert_eq!(render_diff(&json!({"x": 1.0}), &json!({"x": 1.0})), "[identical]");
    }

    #[test]
    fn changed_line_is_marked() {
        let d = render_text_diff("a\nb\nc", "a\nB\nc");
        assert!(d.contains("@@ line 2 @@\n-b\n+B\n"));
        assert!(!d.contains("line 1"));
    }

    #[test]
    fn trailing_lines_are_reported() {
        let d = render_text_diff("a", "a\nextra");
        assert!(d.contains("@@ line 2 @@\n+extra\n"));
    }
}
