use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::EmailSettings;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Mail API rejected message to {to}: {status}")]
    Rejected { to: String, status: u16 },
}

/// A single outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: Option<String>,
}

/// Email delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: String,
}

/// Sends mail through an HTTP mail API authenticated with a bearer key
pub struct EmailClient {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl EmailClient {
    pub fn new(settings: &EmailSettings) -> Result<Self, EmailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.unwrap_or(15)))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            from: settings.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for EmailClient {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let body = SendRequest {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
            text: message
                .text
                .clone()
                .unwrap_or_else(|| strip_html(&message.html)),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send email to {}: {}", message.to, e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::error!("Mail API returned {} for {}", status, message.to);
            return Err(EmailError::Rejected {
                to: message.to.clone(),
                status,
            });
        }

        tracing::info!("Email sent to {} for subject: {}", message.to, message.subject);
        Ok(())
    }
}

/// Plain-text fallback: drop tags, decode the entities `escape_html`
/// produces and collapse runs of whitespace within each line
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .map(|line| unescape_html(&line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Notification telling `recipient_name` about `partner_name`, with a link to
/// the partner's public profile
pub fn match_email(to: &str, recipient_name: &str, partner_name: &str, profile_link: &str) -> EmailMessage {
    let recipient = escape_html(recipient_name);
    let partner = escape_html(partner_name);
    let link = escape_html(profile_link);

    let html = format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; background-color: #fffbeb; padding: 24px;">
    <div style="max-width: 560px; margin: 0 auto; background: #ffffff; border-radius: 12px; padding: 32px;">
      <h2 style="color: #b45309;">We found a match for you</h2>
      <p>Dear {recipient},</p>
      <p>Your matchmaker thinks you and <strong>{partner}</strong> could be a great fit.</p>
      <p><a href="{link}" style="display: inline-block; background: #d97706; color: #ffffff; padding: 12px 20px; border-radius: 8px; text-decoration: none;">View {partner}'s profile</a></p>
      <p>If the button does not work, open this link: {link}</p>
      <p>Warm regards,<br/>Your matchmaker</p>
    </div>
  </body>
</html>"#
    );

    let text = format!(
        "Dear {recipient_name},\n\n\
         Your matchmaker thinks you and {partner_name} could be a great fit.\n\n\
         View {partner_name}'s profile: {profile_link}\n\n\
         Warm regards,\nYour matchmaker"
    );

    EmailMessage {
        to: to.to_string(),
        subject: format!("You have a new match: {}", partner_name),
        html,
        text: Some(text),
    }
}
