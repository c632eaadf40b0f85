//! Purpose: Render envelope JSON for terminals, optionally with ANSI color.
//! Exports: `render_json`.
//! Role: Small, pure formatter used by CLI emission paths.
//! Invariants: Without color, output equals `serde_json::to_string_pretty`.
//! Invariants: A top-level `status` tag is tinted by variant only when color is on.
use japi::api::Status;
use serde_json::{Map, Value};

const INDENT: &str = "  ";

const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_PLAIN: &str = "39";
const COLOR_SUCCESS: &str = "1;32";
const COLOR_FAIL: &str = "1;33";
const COLOR_ERROR: &str = "1;31";

pub fn render_json(value: &Value, use_color: bool) -> String {
    let mut painter = Painter {
        use_color,
        out: String::new(),
    };
    painter.value(value, 0);
    painter.out
}

struct Painter {
    use_color: bool,
    out: String,
}

impl Painter {
    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.paint("null", COLOR_PLAIN),
            Value::Bool(flag) => self.paint(if *flag { "true" } else { "false" }, COLOR_BOOL),
            Value::Number(num) => self.paint(&num.to_string(), COLOR_NUMBER),
            Value::String(text) => self.paint(&quote(text), COLOR_STRING),
            Value::Array(items) => self.array(items, depth),
            Value::Object(map) => self.object(map, depth),
        }
    }

    fn array(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.paint("[]", COLOR_PLAIN);
            return;
        }
        self.paint("[", COLOR_PLAIN);
        self.out.push('\n');
        for (idx, item) in items.iter().enumerate() {
            self.indent(depth + 1);
            self.value(item, depth + 1);
            self.separator(idx + 1 < items.len());
        }
        self.indent(depth);
        self.paint("]", COLOR_PLAIN);
    }

    fn object(&mut self, map: &Map<String, Value>, depth: usize) {
        if map.is_empty() {
            self.paint("{}", COLOR_PLAIN);
            return;
        }
        self.paint("{", COLOR_PLAIN);
        self.out.push('\n');
        for (idx, (key, value)) in map.iter().enumerate() {
            self.indent(depth + 1);
            self.paint(&quote(key), COLOR_KEY);
            self.paint(":", COLOR_PLAIN);
            self.out.push(' ');
            match status_color(depth, key, value) {
                Some(color) => self.paint(&quote(value.as_str().unwrap_or_default()), color),
                None => self.value(value, depth + 1),
            }
            self.separator(idx + 1 < map.len());
        }
        self.indent(depth);
        self.paint("}", COLOR_PLAIN);
    }

    fn separator(&mut self, more: bool) {
        if more {
            self.paint(",", COLOR_PLAIN);
        }
        self.out.push('\n');
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    fn paint(&mut self, text: &str, color: &str) {
        if !self.use_color {
            self.out.push_str(text);
            return;
        }
        self.out.push_str("\u{1b}[");
        self.out.push_str(color);
        self.out.push('m');
        self.out.push_str(text);
        self.out.push_str("\u{1b}[0m");
    }
}

fn status_color(depth: usize, key: &str, value: &Value) -> Option<&'static str> {
    if depth != 0 || key != "status" {
        return None;
    }
    match value.as_str().and_then(Status::from_tag)? {
        Status::Success => Some(COLOR_SUCCESS),
        Status::Fail => Some(COLOR_FAIL),
        Status::Error => Some(COLOR_ERROR),
    }
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::render_json;
    use serde_json::json;

    #[test]
    fn plain_output_matches_pretty() {
        let value = json!({
            "status": "success",
            "data": {"arr": [1, true, null], "nested": {"x": "y"}, "empty": []},
            "meta": {}
        });
        let plain = render_json(&value, false);
        let pretty = serde_json::to_string_pretty(&value).expect("pretty");
        assert_eq!(plain, pretty);
    }

    #[test]
    fn status_tag_is_tinted_by_variant() {
        let error = render_json(&json!({"status": "error", "message": "bad"}), true);
        assert!(error.contains("\u{1b}[1;31m\"error\"\u{1b}[0m"));
        assert!(error.contains("\u{1b}[32m\"bad\"\u{1b}[0m"));

        let fail = render_json(&json!({"status": "fail", "data": 1}), true);
        assert!(fail.contains("\u{1b}[1;33m\"fail\"\u{1b}[0m"));
        assert!(fail.contains("\u{1b}[33m1\u{1b}[0m"));
    }

    #[test]
    fn nested_status_keys_are_ordinary_strings() {
        let value = json!({"status": "success", "data": {"status": "error"}});
        let colored = render_json(&value, true);
        assert!(colored.contains("\u{1b}[1;32m\"success\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[32m\"error\"\u{1b}[0m"));
    }
}
