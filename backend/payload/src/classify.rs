use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{actions::Action, vcard::summarize_vcard, wifi::summarize_wifi};

const WHATSAPP_PREFIXES: [&str; 2] = ["https://wa.me/", "https://api.whatsapp.com/"];
const INSTAGRAM_DOMAIN: &str = "instagram.com/";
const INSTAGRAM_SCHEME: &str = "instagram://";
const HTTP_PREFIXES: [&str; 2] = ["http://", "https://"];

pub const TEL_PREFIX: &str = "tel:";
pub const MAILTO_PREFIX: &str = "mailto:";
pub const WIFI_PREFIX: &str = "WIFI:";
pub const VCARD_PREFIX: &str = "BEGIN:VCARD";

const INSTITUTIONAL_MARKER: &str = "key=";
const INSTITUTIONAL_DOMAINS: [&str; 2] = ["utb.edu.ec", "sai_utb.edu.ec"];

static PLAIN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\s\-_.@]+$").unwrap());

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Url,
    Whatsapp,
    Instagram,
    Phone,
    Email,
    Wifi,
    Contact,
    InstitutionalId,
    PlainText,
    Unknown,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Url => "Enlace Web",
            Category::Whatsapp => "Enlace de WhatsApp",
            Category::Instagram => "Perfil de Instagram",
            Category::Phone => "Número de Teléfono",
            Category::Email => "Dirección de Email",
            Category::Wifi => "Configuración WiFi",
            Category::Contact => "Tarjeta de Contacto",
            Category::InstitutionalId => "Carnet Estudiantil UTB",
            Category::PlainText => "Texto Simple",
            Category::Unknown => "Código QR Escaneado",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Url => "🌐",
            Category::Whatsapp => "💬",
            Category::Instagram => "📷",
            Category::Phone => "📞",
            Category::Email => "📧",
            Category::Wifi => "📶",
            Category::Contact => "👤",
            Category::InstitutionalId => "🎓",
            Category::PlainText => "📄",
            Category::Unknown => "🔍",
        }
    }

    /// Wire name, same as the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Url => "URL",
            Category::Whatsapp => "WHATSAPP",
            Category::Instagram => "INSTAGRAM",
            Category::Phone => "PHONE",
            Category::Email => "EMAIL",
            Category::Wifi => "WIFI",
            Category::Contact => "CONTACT",
            Category::InstitutionalId => "INSTITUTIONAL_ID",
            Category::PlainText => "PLAIN_TEXT",
            Category::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A decoded payload together with everything the result panel shows for it.
///
/// Built only through [`classify`], so `display_text` always agrees with `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedPayload {
    raw_text: String,
    category: Category,
    title: &'static str,
    icon: &'static str,
    display_text: String,
}

impl ClassifiedPayload {
    fn new(raw_text: &str, category: Category, display_text: String) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            category,
            title: category.title(),
            icon: category.icon(),
            display_text,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn icon(&self) -> &str {
        self.icon
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Target an "open" style action launches, if the category has one.
    pub fn open_target(&self) -> Option<String> {
        match self.category {
            Category::Url | Category::Whatsapp | Category::Instagram => {
                Some(self.raw_text.clone())
            }
            Category::InstitutionalId => Some(complete_scheme(&self.raw_text)),
            Category::Phone => Some(format!("{TEL_PREFIX}{}", self.display_text)),
            Category::Email => Some(format!("{MAILTO_PREFIX}{}", self.display_text)),
            _ => None,
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        Action::for_payload(self)
    }
}

pub fn classify(raw: &str) -> ClassifiedPayload {
    let category = categorize(raw);

    let display_text = match category {
        Category::Phone => raw.strip_prefix(TEL_PREFIX).unwrap_or(raw).to_string(),
        Category::Email => raw.strip_prefix(MAILTO_PREFIX).unwrap_or(raw).to_string(),
        Category::Wifi => summarize_wifi(raw),
        Category::Contact => summarize_vcard(raw),
        Category::InstitutionalId => complete_scheme(raw),
        _ => raw.to_string(),
    };

    ClassifiedPayload::new(raw, category, display_text)
}

fn categorize(raw: &str) -> Category {
    if WHATSAPP_PREFIXES.iter().any(|prefix| raw.starts_with(prefix)) {
        Category::Whatsapp
    } else if raw.contains(INSTAGRAM_DOMAIN) || raw.starts_with(INSTAGRAM_SCHEME) {
        Category::Instagram
    } else if HTTP_PREFIXES.iter().any(|prefix| raw.starts_with(prefix)) {
        Category::Url
    } else if raw.starts_with(TEL_PREFIX) {
        Category::Phone
    } else if raw.starts_with(MAILTO_PREFIX) {
        Category::Email
    } else if raw.starts_with(WIFI_PREFIX) {
        Category::Wifi
    } else if raw.starts_with(VCARD_PREFIX) {
        Category::Contact
    } else if is_institutional_id(raw) {
        Category::InstitutionalId
    } else if PLAIN_TEXT.is_match(raw) {
        Category::PlainText
    } else {
        Category::Unknown
    }
}

fn is_institutional_id(raw: &str) -> bool {
    raw.contains(INSTITUTIONAL_MARKER)
        && INSTITUTIONAL_DOMAINS.iter().any(|domain| raw.contains(domain))
}

/// Prefixes `https://` unless the text already carries a scheme.
pub fn complete_scheme(raw: &str) -> String {
    if SCHEME.is_match(raw) {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}
