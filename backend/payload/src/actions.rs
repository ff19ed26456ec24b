use serde::Serialize;

use crate::classify::{Category, ClassifiedPayload};

/// Buttons offered under a scan result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Copy { text: String },
    Open { target: String, label: &'static str },
    Call { target: String },
    Email { target: String },
}

impl Action {
    pub fn for_payload(payload: &ClassifiedPayload) -> Vec<Action> {
        let mut actions = vec![Action::Copy {
            text: clipboard_text(payload.raw_text()),
        }];

        let Some(target) = payload.open_target() else {
            return actions;
        };

        let action = match payload.category() {
            Category::Whatsapp => Action::Open {
                target,
                label: "💬 Abrir WhatsApp",
            },
            Category::Instagram => Action::Open {
                target,
                label: "📷 Abrir Instagram",
            },
            Category::Url => Action::Open {
                target,
                label: "🌐 Abrir Enlace",
            },
            Category::InstitutionalId => Action::Open {
                target,
                label: "🎓 Ver Carnet UTB",
            },
            Category::Phone => Action::Call { target },
            Category::Email => Action::Email { target },
            _ => return actions,
        };

        actions.push(action);
        actions
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Copy { .. } => "📋 Copiar Texto",
            Action::Open { label, .. } => *label,
            Action::Call { .. } => "📞 Llamar",
            Action::Email { .. } => "📧 Enviar Email",
        }
    }

    /// What the action hands to the platform: clipboard text or a URI to launch.
    pub fn value(&self) -> &str {
        match self {
            Action::Copy { text } => text,
            Action::Open { target, .. } | Action::Call { target } | Action::Email { target } => {
                target
            }
        }
    }
}

/// Clipboard keeps printable ASCII and line breaks only.
pub fn clipboard_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| matches!(c, ' '..='~' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Action, clipboard_text};
    use crate::classify::classify;

    fn labels(raw: &str) -> Vec<&'static str> {
        classify(raw).actions().iter().map(Action::label).collect()
    }

    #[test]
    fn test_copy_always_first() {
        for raw in ["hola", "¿?", "WIFI:S:Home;;", "BEGIN:VCARD\nFN:Ana"] {
            assert_eq!(labels(raw), ["📋 Copiar Texto"], "{raw:?}");
        }
    }

    #[test]
    fn test_open_labels() {
        assert_eq!(labels("https://wa.me/1"), ["📋 Copiar Texto", "💬 Abrir WhatsApp"]);
        assert_eq!(
            labels("https://instagram.com/utb"),
            ["📋 Copiar Texto", "📷 Abrir Instagram"]
        );
        assert_eq!(labels("https://utb.edu.ec"), ["📋 Copiar Texto", "🌐 Abrir Enlace"]);
    }

    #[test]
    fn test_institutional_id_opens_completed_url() {
        let actions = classify("utb.edu.ec/carnet?key=42").actions();

        assert_eq!(
            actions[1],
            Action::Open {
                target: "https://utb.edu.ec/carnet?key=42".to_string(),
                label: "🎓 Ver Carnet UTB",
            }
        );
        assert_eq!(actions[0].value(), "utb.edu.ec/carnet?key=42");
    }

    #[test]
    fn test_call_and_email() {
        let call = classify("tel:+593987654321").actions();
        assert_eq!(call[1].label(), "📞 Llamar");
        assert_eq!(call[1].value(), "tel:+593987654321");

        let email = classify("mailto:a@b.ec").actions();
        assert_eq!(email[1].label(), "📧 Enviar Email");
        assert_eq!(email[1].value(), "mailto:a@b.ec");
    }

    #[test]
    fn test_clipboard_strips_non_ascii() {
        assert_eq!(clipboard_text("Año\tnuevo 🎉\r\nok"), "Aonuevo \r\nok");
    }
}
