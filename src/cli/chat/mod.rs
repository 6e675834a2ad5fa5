pub mod conversation_state;
pub mod prompt;
pub mod session;
pub mod view;

use std::io::Write;
use std::process::ExitCode;

use eyre::{bail, Result};
use rustyline::error::ReadlineError;
use tracing::info;

use crate::chat_client::ChatClient;
use crate::config::AppConfig;
use session::ChatSession;

const WELCOME_TEXT: &str = "
Namaste, I'm the NyayaSahaya assistant. Ask me anything about Indian law.

Things to try
• What is bail?
• What happens if I am accused under Section 420 IPC?
• How do I file a First Information Report?

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
NyayaSahaya Chat CLI

/clear        Clear the conversation history
/links        Show the companion document tools
/help         Show this help dialogue
/quit         Quit the application
";

pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    config: AppConfig,
    session: Option<ChatSession<ChatClient>>,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        config: AppConfig,
        input: Option<String>,
        interactive: bool,
    ) -> Self {
        Self {
            output,
            input,
            interactive,
            config,
            session: None,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        match ChatClient::new(&self.config) {
            Ok(client) => {
                info!("Chat endpoint: {}", client.endpoint());
                self.session = Some(ChatSession::new(client));
            }
            Err(e) => {
                writeln!(self.output, "Failed to initialize chat client: {}", e)?;
                return Ok(ExitCode::FAILURE);
            }
        }

        // Handle non-interactive mode (single question)
        if let Some(input) = self.input.take() {
            self.run_single(&input).await?;
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.print_welcome()?;
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        Ok(())
    }

    fn print_links(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Document generator:  {}",
            self.config.doc_generator_url
        )?;
        writeln!(
            self.output,
            "Document summariser: {}",
            self.config.doc_summariser_url
        )?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            match rl.readline(prompt::PROMPT) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    /// One-shot mode: submit a single question and print the resulting
    /// transcript.
    async fn run_single(&mut self, input: &str) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            bail!("chat session not initialized");
        };
        session.submit(input).await;

        if let Some(session) = self.session.as_ref() {
            view::render_transcript(&mut self.output, session.conversation().messages())?;
            if let Some(detail) = session.last_error() {
                view::render_diagnostic(&mut self.output, detail)?;
            }
        }
        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        match input.trim() {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            "/clear" => {
                if let Some(session) = self.session.as_mut() {
                    session.reset();
                }
                writeln!(self.output, "Conversation cleared.")?;
            }
            "/links" => {
                self.print_links()?;
            }
            _ => {
                self.handle_chat_input(input).await?;
            }
        }

        Ok(())
    }

    /// Drive one exchange: echo the accepted user message, hold a typing
    /// indicator while the question is in flight, then render the settled
    /// reply.
    async fn handle_chat_input(&mut self, input: &str) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            bail!("chat session not initialized");
        };

        let Some(question) = session.accept(input) else {
            return Ok(());
        };

        if let Some(echo) = session.conversation().last() {
            view::render_message(&mut self.output, echo)?;
        }

        let indicator = view::TypingIndicator::begin(&mut self.output)?;
        session.dispatch(&question).await;
        indicator.finish(&mut self.output)?;

        if let Some(reply) = session.conversation().last() {
            view::render_message(&mut self.output, reply)?;
        }
        if let Some(detail) = session.last_error() {
            view::render_diagnostic(&mut self.output, detail)?;
        }

        Ok(())
    }
}
