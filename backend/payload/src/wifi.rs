//! WiFi network payloads, `WIFI:S:<ssid>;T:<security>;P:<password>;H:<hidden>;;`.
//!
//! Fields are `KEY:VALUE` pairs split on `;`. Values may escape `;`, `:`, `,` and `\` with a
//! backslash.

use std::collections::HashMap;

use crate::classify::WIFI_PREFIX;

const MASK: char = '•';

pub fn summarize_wifi(raw: &str) -> String {
    let fields = parse_fields(raw.strip_prefix(WIFI_PREFIX).unwrap_or(raw));

    let mut summary = String::new();

    if let Some(ssid) = fields.get("s") {
        summary.push_str(&format!("Red: {ssid}\n"));
    }
    if let Some(security) = fields.get("t") {
        summary.push_str(&format!("Tipo: {security}\n"));
    }
    if let Some(password) = fields.get("p") {
        summary.push_str(&format!("Contraseña: {}\n", mask(password)));
    }
    if let Some(hidden) = fields.get("h") {
        let hidden = if hidden == "true" { "Sí" } else { "No" };
        summary.push_str(&format!("Red oculta: {hidden}\n"));
    }

    if summary.is_empty() {
        raw.to_string()
    } else {
        summary
    }
}

/// Same width as the password, never its characters.
fn mask(password: &str) -> String {
    std::iter::repeat_n(MASK, password.chars().count()).collect()
}

/// Lowercased keys to unescaped values. Later fields overwrite earlier ones; fields missing a
/// colon or a value are skipped.
fn parse_fields(body: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for field in split_unescaped(body, ';') {
        let Some((key, value)) = split_unescaped_once(&field, ':') else {
            continue;
        };

        if key.is_empty() || value.is_empty() {
            continue;
        }

        fields.insert(key.to_lowercase(), unescape(value));
    }

    fields
}

fn split_unescaped(input: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c if c == separator => parts.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    parts.push(current);

    parts
}

fn split_unescaped_once(input: &str, separator: char) -> Option<(&str, &str)> {
    let mut escaped = false;

    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            return Some((&input[..index], &input[index + c.len_utf8()..]));
        }
    }

    None
}

fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                unescaped.push(escaped);
            }
        } else {
            unescaped.push(c);
        }
    }

    unescaped
}
