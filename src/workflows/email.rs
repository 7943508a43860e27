use super::items::add_update;
use crate::api::GraphQlTransport;
use crate::constants::EMAIL_BODY_PREVIEW_CHARS;
use crate::error::AppError;
use crate::types::ItemId;
use serde::Deserialize;

/// An email to attach to an item as an update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub sender: String,
    pub body: String,
    #[serde(default)]
    pub received_date: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Renders the email as the markdown body of an update.
pub fn format_email_update(email: &EmailMessage) -> String {
    let mut lines = vec![
        format!("### 📧 {}", email.subject),
        String::new(),
        format!("**From:** {}", email.sender),
    ];
    if let Some(date) = &email.received_date {
        lines.push(format!("**Date:** {}", date));
    }
    lines.push(String::new());
    lines.push(body_preview(&email.body));

    if !email.attachments.is_empty() {
        lines.push(String::new());
        lines.push("**Attachments:**".to_string());
        lines.extend(email.attachments.iter().map(|name| format!("- {}", name)));
    }

    lines.join("\n")
}

/// Posts the formatted email to an item. Returns the update id.
pub fn post_email_to_item<T: GraphQlTransport>(
    transport: &T,
    item_id: &ItemId,
    email: &EmailMessage,
) -> Result<String, AppError> {
    log::debug!("Posting email '{}' to item {}", email.subject, item_id);
    add_update(transport, item_id, &format_email_update(email))
}

fn body_preview(body: &str) -> String {
    match body.char_indices().nth(EMAIL_BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_full_email() {
        let email = EmailMessage {
            subject: "Invoice".to_string(),
            sender: "ops@example.com".to_string(),
            body: "Please find it attached.".to_string(),
            received_date: Some("2026-01-15".to_string()),
            attachments: vec!["invoice.pdf".to_string(), "terms.pdf".to_string()],
        };
        assert_eq!(
            format_email_update(&email),
            "### 📧 Invoice\n\n**From:** ops@example.com\n**Date:** 2026-01-15\n\n\
             Please find it attached.\n\n**Attachments:**\n- invoice.pdf\n- terms.pdf"
        );
    }

    #[test]
    fn omits_absent_date_and_attachments() {
        let email = EmailMessage {
            subject: "Hi".to_string(),
            sender: "a@b.c".to_string(),
            body: "Short".to_string(),
            ..EmailMessage::default()
        };
        assert_eq!(format_email_update(&email), "### 📧 Hi\n\n**From:** a@b.c\n\nShort");
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundaries() {
        let body = "é".repeat(EMAIL_BODY_PREVIEW_CHARS + 5);
        let preview = body_preview(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), EMAIL_BODY_PREVIEW_CHARS + 3);

        let exact = "x".repeat(EMAIL_BODY_PREVIEW_CHARS);
        assert_eq!(body_preview(&exact), exact);
    }
}
