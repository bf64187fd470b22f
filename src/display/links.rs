//! Link display formatting
//!
//! Formats decrypted links for terminal output. URLs stay masked unless the
//! link is the one currently revealed.

use tabled::{settings::Style, Table, Tabled};

use crate::audit::AuditEntry;
use crate::client::{Notification, NotificationType};
use crate::models::{DisplayLink, LinkId};

const MASK: &str = "••••••••";

#[derive(Tabled)]
struct LinkRow {
    #[tabled(rename = "ID")]
    id: LinkId,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "URL")]
    url: String,
}

/// Format links as a table, revealing only `visible`
pub fn format_link_list(links: &[DisplayLink], visible: Option<LinkId>) -> String {
    if links.is_empty() {
        return "No links yet.".to_string();
    }

    let rows = links.iter().map(|link| LinkRow {
        id: link.id,
        title: truncate(&link.title, 40),
        url: if link.failed || visible == Some(link.id) {
            link.url.clone()
        } else {
            MASK.to_string()
        },
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format one revealed link
pub fn format_link_details(link: &DisplayLink) -> String {
    let mut output = String::new();
    output.push_str(&format!("Link {}\n", link.id));
    output.push_str(&format!("  Title: {}\n", link.title));
    output.push_str(&format!("  URL:   {}\n", link.url));
    if link.failed {
        output.push_str("  (encrypted with a different master password)\n");
    }
    output
}

/// One-line rendering of a notification
pub fn format_notification(notification: &Notification) -> String {
    let kind = notification.notification_type;
    match kind {
        NotificationType::Error => {
            format!("[{}] {}: {}", kind.icon(), kind.title(), notification.message)
        }
        NotificationType::Success => format!("[{}] {}", kind.icon(), notification.message),
    }
}

/// Format audit entries, oldest first
pub fn format_audit_log(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "Audit log is empty.".to_string();
    }

    entries
        .iter()
        .map(|e| e.format_human_readable())
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> Vec<DisplayLink> {
        vec![
            DisplayLink::new(LinkId::new(2), "Mail", "https://mail.example"),
            DisplayLink::new(LinkId::new(1), "Bank", "https://bank.example"),
        ]
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_link_list(&[], None), "No links yet.");
    }

    #[test]
    fn test_urls_masked_by_default() {
        let out = format_link_list(&links(), None);
        assert!(out.contains("Mail"));
        assert!(out.contains("Bank"));
        assert!(!out.contains("https://"));
        assert!(out.contains(MASK));
    }

    #[test]
    fn test_only_visible_url_shown() {
        let out = format_link_list(&links(), Some(LinkId::new(1)));
        assert!(out.contains("https://bank.example"));
        assert!(!out.contains("https://mail.example"));
    }

    #[test]
    fn test_failed_link_shows_sentinel() {
        let out = format_link_list(&[DisplayLink::decryption_failed(LinkId::new(3))], None);
        assert_eq!(out.matches("Decryption failed").count(), 2);

        let details = format_link_details(&DisplayLink::decryption_failed(LinkId::new(3)));
        assert!(details.contains("different master password"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title", 10), "a very ...");
    }

    #[test]
    fn test_notification_format() {
        assert_eq!(format_notification(&Notification::success("Saved")), "[+] Saved");
        assert_eq!(
            format_notification(&Notification::error("Offline")),
            "[x] Error: Offline"
        );
    }
}
