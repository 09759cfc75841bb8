//! Failed-payment alert email.
//!
//! Renders the fixed HTML template and builds the MIME message with `lettre`,
//! encoded as base64url the way the Gmail API expects it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::Message;

use super::record::PaymentFailureRecord;
use super::stripe_event::StripeEvent;

const NOT_AVAILABLE: &str = "N/A";

/// Who an alert is sent from and to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddressing {
    /// Sender, e.g. `Payment Alerts <alerts@example.com>`.
    pub from: Mailbox,
    pub to: Mailbox,
}

/// A rendered alert, ready to be encoded and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEmail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub html: String,
}

impl AlertEmail {
    /// Renders the alert for a normalized failure and the event that reported it.
    pub fn render(
        event: &StripeEvent,
        record: &PaymentFailureRecord,
        addressing: &MailAddressing,
    ) -> Self {
        let amount = record
            .formatted_amount()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let currency = record.currency_code();
        let display_amount = format!("{} {}", amount, currency).trim_end().to_string();
        let name = record.display_name();

        let subject = format!("Payment Failed: {} - {}", display_amount, name);

        Self {
            from: addressing.from.clone(),
            to: addressing.to.clone(),
            subject,
            html: render_html(event, record, &display_amount),
        }
    }

    /// Builds the MIME message.
    pub fn to_message(&self) -> Result<Message, lettre::error::Error> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(self.html.clone())
    }

    /// The formatted message, base64url-encoded without padding.
    pub fn encoded_raw(&self) -> Result<String, lettre::error::Error> {
        Ok(URL_SAFE_NO_PAD.encode(self.to_message()?.formatted()))
    }
}

fn render_html(event: &StripeEvent, record: &PaymentFailureRecord, display_amount: &str) -> String {
    let customer_id = record
        .customer
        .as_ref()
        .map(|c| c.id())
        .unwrap_or(NOT_AVAILABLE);
    let email = record.customer_email().unwrap_or(NOT_AVAILABLE);
    let mode = if event.is_live() { "Live" } else { "Test" };
    let time = format_timestamp(event.created);

    let rows = [
        ("Customer", record.display_name()),
        ("Email", email),
        ("Customer ID", customer_id),
        ("Amount", display_amount),
        ("Event Type", event.event_type.as_str()),
        ("Event ID", event.id.as_str()),
        ("Time", time.as_str()),
        ("Mode", mode),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            "<tr><td style=\"padding:6px 12px;color:#555;\">{}</td>\
             <td style=\"padding:6px 12px;font-weight:bold;\">{}</td></tr>",
            label,
            escape_html(value)
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    let error_block = record
        .last_error
        .as_ref()
        .map(|error| {
            format!(
                "<div style=\"background:#fdecea;border-left:4px solid #d32f2f;padding:12px;margin:16px 0;\">\n\
                 <h3 style=\"margin:0 0 8px;color:#d32f2f;\">Error Details</h3>\n\
                 <p style=\"margin:4px 0;\"><strong>Code:</strong> {}</p>\n\
                 <p style=\"margin:4px 0;\"><strong>Message:</strong> {}</p>\n\
                 <p style=\"margin:4px 0;\"><strong>Type:</strong> {}</p>\n\
                 </div>",
                escape_html(error.code.as_deref().unwrap_or(NOT_AVAILABLE)),
                escape_html(error.message.as_deref().unwrap_or(NOT_AVAILABLE)),
                escape_html(error.error_type.as_deref().unwrap_or(NOT_AVAILABLE)),
            )
        })
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>Payment Failed</title></head>\n\
         <body style=\"font-family:Arial,Helvetica,sans-serif;color:#1a1a1a;\">\n\
         <div style=\"max-width:600px;margin:0 auto;padding:24px;\">\n\
         <h2 style=\"color:#d32f2f;\">Payment Failed</h2>\n\
         <p>A payment from <strong>{name}</strong> could not be completed.</p>\n\
         <table style=\"border-collapse:collapse;width:100%;\">\n{rows}\n</table>\n\
         {error_block}\n\
         <p><a href=\"{dashboard}\">View event in the Stripe Dashboard</a></p>\n\
         </div>\n\
         </body>\n\
         </html>",
        name = escape_html(record.display_name()),
        rows = rows,
        error_block = error_block,
        dashboard = html_escape::encode_double_quoted_attribute(&event.dashboard_url()),
    )
}

fn format_timestamp(created: i64) -> String {
    DateTime::<Utc>::from_timestamp(created, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| created.to_string())
}

fn escape_html(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}
