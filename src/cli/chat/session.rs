use tracing::{error, warn};

use crate::chat_client::{QuestionTransport, TransportError};

use super::conversation_state::{ConversationState, Message};

/// Reply shown in place of any transport failure detail.
pub const FALLBACK_REPLY: &str = "An error occurred. Please try again later.";

/// Owns one conversation and the state of its interaction loop.
///
/// At most one question is in flight at a time; a submission made while one
/// is pending is ignored. Every accepted question passes through `settle`
/// exactly once, so an accepted user message is always followed by a bot
/// entry once its call settles.
pub struct ChatSession<T> {
    transport: T,
    conversation: ConversationState,
    in_flight: bool,
    pending_input: String,
    last_error: Option<String>,
}

impl<T: QuestionTransport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            conversation: ConversationState::new(),
            in_flight: false,
            pending_input: String::new(),
            last_error: None,
        }
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Diagnostic detail of the most recent failed exchange, if the exchange
    /// after it has not yet succeeded. Never rendered into the conversation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Discard the conversation and start over with a fresh one.
    pub fn reset(&mut self) {
        self.conversation = ConversationState::new();
        self.last_error = None;
    }

    /// Guard and echo: mirror the raw input, reject empty or mid-flight
    /// submissions, otherwise append the user message immediately and mark
    /// the session in flight. Returns the question to dispatch.
    pub(crate) fn accept(&mut self, raw_input: &str) -> Option<String> {
        self.pending_input = raw_input.to_string();

        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if self.in_flight {
            warn!("Submission ignored: a question is already in flight");
            return None;
        }

        let question = trimmed.to_string();
        self.conversation.push(Message::user(question.clone()));
        self.in_flight = true;
        self.pending_input.clear();
        Some(question)
    }

    /// The single settlement point. Both outcomes append exactly one bot
    /// entry and lower the in-flight flag; no path may leave it raised.
    pub(crate) fn settle(&mut self, outcome: Result<String, TransportError>) {
        match outcome {
            Ok(answer) => {
                self.conversation.push(Message::bot(answer));
                self.last_error = None;
            }
            Err(err) => {
                error!("Chat exchange failed: {}", err);
                self.conversation.push(Message::bot(FALLBACK_REPLY));
                self.last_error = Some(err.to_string());
            }
        }
        self.in_flight = false;
    }

    /// Send an accepted question and settle with whatever comes back.
    pub(crate) async fn dispatch(&mut self, question: &str) {
        let outcome = self.transport.send_question(question).await;
        self.settle(outcome);
    }

    /// Full submission path: guard, optimistic echo, one transport call,
    /// settlement. Transport failures never escape; they become the fallback
    /// reply plus a recorded diagnostic.
    pub async fn submit(&mut self, raw_input: &str) {
        if let Some(question) = self.accept(raw_input) {
            self.dispatch(&question).await;
        }
    }
}
