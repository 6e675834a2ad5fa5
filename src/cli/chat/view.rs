use std::io::Write;

use color_print::cformat;
use crossterm::{
    cursor::MoveToColumn,
    execute,
    terminal::{Clear, ClearType},
};
use eyre::Result;

use super::conversation_state::{Message, Sender};

pub const USER_LABEL: &str = "You";
pub const BOT_LABEL: &str = "NyayaSahaya";

/// Render one entry as a labelled line. Output is flushed immediately so the
/// newest entry is always visible.
pub fn render_message(out: &mut dyn Write, message: &Message) -> Result<()> {
    let line = match message.sender {
        Sender::User => cformat!("<bold><cyan>{}:</></> {}", USER_LABEL, message.text),
        Sender::Bot => cformat!("<bold><green>{}:</></> {}", BOT_LABEL, message.text),
    };
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}

pub fn render_transcript(out: &mut dyn Write, messages: &[Message]) -> Result<()> {
    for message in messages {
        render_message(out, message)?;
    }
    Ok(())
}

/// Dim side-channel line for the diagnostic detail of a failed exchange.
pub fn render_diagnostic(out: &mut dyn Write, detail: &str) -> Result<()> {
    writeln!(out, "{}", cformat!("<dim>({})</>", detail))?;
    out.flush()?;
    Ok(())
}

/// Transient line shown while a question is in flight.
///
/// `finish` consumes the indicator so it cannot outlive the settlement that
/// removes it.
pub struct TypingIndicator;

impl TypingIndicator {
    pub fn begin(out: &mut dyn Write) -> Result<Self> {
        write!(out, "{}", cformat!("<dim>{} is typing...</>", BOT_LABEL))?;
        out.flush()?;
        Ok(Self)
    }

    pub fn finish(self, mut out: &mut dyn Write) -> Result<()> {
        execute!(&mut out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_lines_carry_label_and_text() {
        let mut buffer: Vec<u8> = Vec::new();
        render_message(&mut buffer, &Message::user("What is bail?")).unwrap();
        render_message(&mut buffer, &Message::bot("Bail is...")).unwrap();

        let rendered = String::from_utf8_lossy(&buffer);
        assert!(rendered.contains("You:"));
        assert!(rendered.contains("What is bail?"));
        assert!(rendered.contains("NyayaSahaya:"));
        assert!(rendered.contains("Bail is..."));
    }

    #[test]
    fn transcript_renders_in_order() {
        let messages = vec![Message::user("first"), Message::bot("second")];
        let mut buffer: Vec<u8> = Vec::new();
        render_transcript(&mut buffer, &messages).unwrap();

        let rendered = String::from_utf8_lossy(&buffer).to_string();
        let first = rendered.find("first").unwrap();
        let second = rendered.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn typing_indicator_writes_then_erases() {
        let mut buffer: Vec<u8> = Vec::new();
        let indicator = TypingIndicator::begin(&mut buffer).unwrap();
        assert!(String::from_utf8_lossy(&buffer).contains("is typing"));

        indicator.finish(&mut buffer).unwrap();
        // The erase sequence lands after the indicator text.
        assert!(buffer.len() > "NyayaSahaya is typing...".len());
    }
}
