//! Builds the Slack notification text for a received guest message.

use crate::webhook::MessageData;

const DASHBOARD_INBOX: &str = "https://dashboard.hostaway.com/v3/messages/inbox";
const ATTACHMENT_MARKER: &str = "\n📎 *This message contains attachments or URLs*";

/// Deep link into the Hostaway dashboard for a conversation.
pub fn conversation_link(conversation_id: &str) -> String {
    format!("{DASHBOARD_INBOX}/{conversation_id}")
}

/// Renders the notification text. Pure; section order is fixed: message
/// body, timezone, date, optional attachment marker, conversation link.
/// The message body is interpolated verbatim, mrkdwn and all.
pub fn format_notification(data: &MessageData) -> String {
    let body = data.body.as_deref().unwrap_or_default();
    let timezone = data.listing_time_zone_name.as_deref().unwrap_or_default();
    let date = data.date.as_deref().unwrap_or_default();
    let attachment_text = if data.has_attachments() {
        ATTACHMENT_MARKER
    } else {
        ""
    };
    let link = conversation_link(&data.conversation_id_text());

    format!(
        "*New Message Received*\n\n\
         💬 *Message:* {body}\n\n\
         🌍 *Timezone:* {timezone}\n\
         ⏰ *Date:* {date}{attachment_text}\n\n\
         🔗 *View Conversation:* <{link}|Open in Hostaway Dashboard>"
    )
}
