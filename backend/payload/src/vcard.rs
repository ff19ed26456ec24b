const FALLBACK: &str = "Información de contacto (vCard)";

/// Properties pulled out of a vCard, in display order.
const FIELDS: [(&str, &str); 4] = [
    ("FN:", "Nombre"),
    ("ORG:", "Organización"),
    ("TEL:", "Teléfono"),
    ("EMAIL:", "Email"),
];

pub fn summarize_vcard(raw: &str) -> String {
    let mut values: [Option<&str>; FIELDS.len()] = [None; FIELDS.len()];

    for line in raw.split('\n').map(|line| line.trim_end_matches('\r')) {
        for (slot, (prefix, _)) in values.iter_mut().zip(FIELDS) {
            if slot.is_some() {
                continue;
            }

            if let Some(value) = line.strip_prefix(prefix).filter(|value| !value.is_empty()) {
                *slot = Some(value);
            }
        }
    }

    let summary: String = values
        .iter()
        .zip(FIELDS)
        .filter_map(|(value, (_, label))| value.map(|value| format!("{label}: {value}\n")))
        .collect();

    if summary.is_empty() {
        FALLBACK.to_string()
    } else {
        summary
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::summarize_vcard;

    #[test]
    fn test_all_fields() {
        let card = "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nORG:UTB\nTEL:555-1234\nEMAIL:jane@utb.edu.ec\nEND:VCARD";

        assert_eq!(
            summarize_vcard(card),
            "Nombre: Jane Doe\nOrganización: UTB\nTeléfono: 555-1234\nEmail: jane@utb.edu.ec\n"
        );
    }

    #[test]
    fn test_missing_fields_are_omitted() {
        let card = "BEGIN:VCARD\nFN:Jane Doe\nTEL:555-1234\nEND:VCARD";

        assert_eq!(summarize_vcard(card), "Nombre: Jane Doe\nTeléfono: 555-1234\n");
    }

    #[test]
    fn test_first_seen_wins() {
        let card = "BEGIN:VCARD\nTEL:111\nTEL:222\nEND:VCARD";

        assert_eq!(summarize_vcard(card), "Teléfono: 111\n");
    }

    #[test]
    fn test_crlf_and_empty_values() {
        let card = "BEGIN:VCARD\r\nFN:\r\nFN:Ana\r\nORG:\r\nEND:VCARD\r\n";

        assert_eq!(summarize_vcard(card), "Nombre: Ana\n");
    }

    #[test]
    fn test_typed_properties_are_not_matched() {
        let card = "BEGIN:VCARD\nTEL;TYPE=CELL:555\nEND:VCARD";

        assert_eq!(summarize_vcard(card), "Información de contacto (vCard)");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(summarize_vcard("BEGIN:VCARD"), "Información de contacto (vCard)");
    }
}
