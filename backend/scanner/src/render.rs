use chrono::{Local, NaiveDateTime};
use payload::{Action, ClassifiedPayload, ScanHistory};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Result panel for one scan, `scanned_at` in local wall-clock time.
pub fn panel(payload: &ClassifiedPayload, scanned_at: NaiveDateTime) -> String {
    let mut out = format!("{} {}\n", payload.icon(), payload.title());
    out.push_str(&format!("Tipo: {}\n\n", payload.category()));
    out.push_str(payload.display_text().trim_end_matches('\n'));
    out.push_str("\n\n");

    for action in payload.actions() {
        out.push_str(&action_line(&action));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nEscaneado el: {}\n",
        scanned_at.format(TIMESTAMP_FORMAT)
    ));

    out
}

fn action_line(action: &Action) -> String {
    match action {
        Action::Copy { .. } => action.label().to_string(),
        _ => format!("{} → {}", action.label(), action.value()),
    }
}

pub fn history_list(history: &ScanHistory) -> String {
    if history.is_empty() {
        return "Sin escaneos recientes\n".to_string();
    }

    history
        .entries()
        .enumerate()
        .map(|(index, entry)| {
            let scanned_at = entry.timestamp.with_timezone(&Local);
            let display: Vec<&str> = entry.display_data.lines().collect();

            format!(
                "{:>2}. [{}] {:<16} {}\n",
                index + 1,
                scanned_at.format(TIMESTAMP_FORMAT),
                entry.category,
                display.join(" | ")
            )
        })
        .collect()
}
