/// Who authored a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One conversation entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// Append-only record of one chat session, in creation order.
///
/// Entries are never reordered, edited, or removed; `push` is the only
/// mutator.
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Read-only view of the conversation, safe at any time, mid-flight
    /// included.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_creation_order() {
        let mut conversation = ConversationState::new();
        conversation.push(Message::user("What is bail?"));
        conversation.push(Message::bot("Bail is..."));
        conversation.push(Message::user("And parole?"));

        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], Message::user("What is bail?"));
        assert_eq!(messages[1], Message::bot("Bail is..."));
        assert_eq!(messages[2], Message::user("And parole?"));
        assert_eq!(conversation.last(), Some(&Message::user("And parole?")));
    }

    #[test]
    fn reads_without_append_are_identical() {
        let mut conversation = ConversationState::new();
        conversation.push(Message::user("hello"));
        conversation.push(Message::bot("hi"));

        let first: Vec<Message> = conversation.messages().to_vec();
        let second: Vec<Message> = conversation.messages().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn starts_empty() {
        let conversation = ConversationState::new();
        assert!(conversation.is_empty());
        assert_eq!(conversation.len(), 0);
        assert_eq!(conversation.last(), None);
    }
}
