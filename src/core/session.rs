//! Session transcript store
//!
//! An ordered sequence of role-tagged messages, seeded with one system
//! message. The transcript is the single source of conversation history: it
//! is replayed verbatim to the completion service on every turn, and the
//! display layer renders everything except the seed system message. Messages
//! are only ever appended; there is no removal, editing, or truncation.

use crate::api::ChatMessage;
use crate::core::message::Message;

pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript seeded with the given system message.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The full ordered sequence, system message included. This is the view
    /// submitted to the completion service.
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// Every message except the seed system prompt, in order. This is the
    /// view the transcript display renders.
    pub fn displayable(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|msg| !msg.is_system())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Snapshot the transcript as wire messages for one completion request.
    pub fn to_api_messages(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .map(|msg| ChatMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
            })
            .collect()
    }
}
