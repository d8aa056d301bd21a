//! Message formatting utilities for client display.

use parley_shared::{protocol::MessagePayload, time::timestamp_to_clock_time};

use crate::consumer::Conversation;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the online user list, marking the current user
    pub fn format_presence(online_user_ids: &[String], me: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\nOnline:\n", RULE));

        if online_user_ids.is_empty() {
            output.push_str("(nobody)\n");
        } else {
            for user_id in online_user_ids {
                let me_suffix = if user_id == me { " (me)" } else { "" };
                output.push_str(&format!("  {}{}\n", user_id, me_suffix));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a single message line: `[12:00:00] @alice: hi`
    pub fn format_message(message: &MessagePayload) -> String {
        let mut body = message.text.clone().unwrap_or_default();
        if let Some(image_url) = &message.image_url {
            if !body.is_empty() {
                body.push(' ');
            }
            body.push_str(&format!("[image: {}]", image_url));
        }
        format!(
            "[{}] @{}: {}",
            timestamp_to_clock_time(message.created_at),
            message.sender_id,
            body
        )
    }

    /// Format the history shown when a conversation is opened
    pub fn format_history(conversation: &Conversation, messages: &[MessagePayload]) -> String {
        let mut output = format!("\n{}\n{}\n", RULE, conversation);
        if messages.is_empty() {
            output.push_str("(no messages)\n");
        }
        for message in messages {
            output.push_str(&Self::format_message(message));
            output.push('\n');
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a notification for a message outside the open conversation
    pub fn format_unread_notice(conversation: &Conversation, count: usize) -> String {
        format!("\n* new message in {} ({} unread)\n", conversation, count)
    }

    /// Format unread counters
    pub fn format_unread(summary: &[(Conversation, usize)]) -> String {
        if summary.is_empty() {
            return "\nNo unread messages\n".to_string();
        }
        let mut output = String::from("\nUnread:\n");
        for (conversation, count) in summary {
            output.push_str(&format!("  {}: {}\n", conversation, count));
        }
        output
    }

    /// Format a typing indicator change
    pub fn format_typing(sender_id: &str, is_typing: bool) -> String {
        if is_typing {
            format!("\n... {} is typing\n", sender_id)
        } else {
            format!("\n... {} stopped typing\n", sender_id)
        }
    }

    /// Format a confirmation message after sending
    pub fn format_sent_confirmation(sent_at: i64) -> String {
        format!("sent at {}\n", timestamp_to_clock_time(sent_at))
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
