use std::fmt::Write;

use super::Point;

/// Render a point as one line of InfluxDB line protocol (second precision).
///
/// Tags with an empty value are left out; InfluxDB rejects them.
pub fn encode_point(point: &Point) -> String {
    let mut line = escape(&point.measurement, &[',', ' ']);

    for (key, value) in &point.tags {
        if value.is_empty() {
            continue;
        }
        line.push(',');
        line.push_str(&escape(key, KEY_SPECIALS));
        line.push('=');
        line.push_str(&escape(value, KEY_SPECIALS));
    }

    let mut separator = ' ';
    for (key, value) in &point.values {
        line.push(separator);
        line.push_str(&escape(key, KEY_SPECIALS));
        line.push('=');
        let _ = write!(line, "{value}");
        separator = ',';
    }

    let _ = write!(line, " {}", point.timestamp.unix_timestamp());
    line
}

const KEY_SPECIALS: &[char] = &[',', '=', ' '];

fn escape(raw: &str, specials: &[char]) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if specials.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
