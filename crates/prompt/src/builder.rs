use edge_core::{ConversationTurn, UserContext};

use crate::knowledge::EDGE_AI_KNOWLEDGE;
use crate::ChatMessage;

/// Appended for visitors without a resolved user context.
pub const SIGN_UP_NUDGE: &str = "The user is not signed in. Where it fits naturally, encourage them \
to create a free account so the assistant can remember the conversation and personalize answers.";

const NO_ORGANIZATION: &str = "no organization";
const NO_PRODUCTS: &str = "None";

/// Composes the system prompt: knowledge block, then either the personalization block or the
/// sign-up nudge.
pub fn build_system_prompt(user: Option<&UserContext>) -> String {
    let mut out = String::from(EDGE_AI_KNOWLEDGE);
    out.push_str("\n\n");
    match user {
        Some(ctx) => out.push_str(&personalization_block(ctx)),
        None => out.push_str(SIGN_UP_NUDGE),
    }
    out
}

/// Personalization section for a signed-in user.
///
/// User-supplied fields are interpolated as-is except that line breaks and other control
/// characters become spaces, so a field cannot open a new section of the prompt.
pub fn personalization_block(ctx: &UserContext) -> String {
    let organization = ctx
        .organization_name
        .as_deref()
        .map(single_line)
        .unwrap_or_else(|| NO_ORGANIZATION.to_string());

    let products = if ctx.products.is_empty() {
        NO_PRODUCTS.to_string()
    } else {
        ctx.products
            .iter()
            .map(|p| format!("{} ({})", single_line(&p.name), single_line(&p.plan)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = String::from("## Current user\n");
    out.push_str(&format!("- Name: {}\n", single_line(&ctx.name)));
    out.push_str(&format!("- Email: {}\n", single_line(&ctx.email)));
    out.push_str(&format!("- Role: {}\n", ctx.role));
    out.push_str(&format!("- Organization: {}\n", organization));
    out.push_str(&format!("- Active products: {}\n", products));
    out.push_str(&format!(
        "- Admin: {}\n\n",
        if ctx.is_admin { "Yes" } else { "No" }
    ));
    out.push_str(
        "Personalize your responses for this user: address them by name, relate answers to the \
products they already use, and skip sign-up suggestions.",
    );
    out
}

/// System prompt, then history oldest first, then the new user message.
pub fn build_messages(
    system_prompt: &str,
    history: &[ConversationTurn],
    user_message: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(history.iter().map(ChatMessage::from));
    messages.push(ChatMessage::user(user_message));
    messages
}

fn single_line(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
