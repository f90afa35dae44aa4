use std::future::Future;
use std::io::{BufRead, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::llm::ProviderKind;
use crate::review::command::Command;
use crate::review::reviewer::CodeReviewer;

const HELP_TEXT: &str = "
Available commands:
  help          - Show this help message
  summary       - Show codebase structure and the files loaded for review
  clear         - Clear conversation history
  exit / quit   - Exit the assistant

To review code (loads files from codebase):
  review                         - Review entire codebase
  review --filter auth           - Review files matching 'auth'
  review --filter src/utils/     - Review files in specific folder

For follow-up questions (uses existing context):
  ask How should I fix the SQL injection?
  Can you explain the auth flow?
  What's wrong with this code? <paste snippet>
";

enum Flow {
    Continue,
    Exit,
}

/// Interactive read-eval loop over one reviewer. Commands run one at a time;
/// a failed command is reported and the loop carries on.
pub struct Session {
    reviewer: CodeReviewer,
    provider: ProviderKind,
    model: String,
}

impl Session {
    pub fn new(reviewer: CodeReviewer, provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            reviewer,
            provider,
            model: model.into(),
        }
    }

    pub fn reviewer(&self) -> &CodeReviewer {
        &self.reviewer
    }

    pub async fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        self.print_banner(out)?;

        // Raw bytes so a line with invalid UTF-8 is still read, not fatal
        let mut buf = Vec::new();
        loop {
            write!(out, "You: ")?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(out, "\nGoodbye!")?;
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            if let Flow::Exit = self.handle(Command::parse(&line), out).await? {
                break;
            }
        }

        Ok(())
    }

    fn print_banner<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\nCode Review Assistant")?;
        writeln!(out, "Provider: {} | Model: {}", self.provider, self.model)?;
        writeln!(out, "Codebase: {}\n", self.reviewer.root().display())?;
        match self.reviewer.summary() {
            Ok(summary) => writeln!(out, "{}", summary)?,
            Err(err) => writeln!(out, "Error: {}", err)?,
        }
        writeln!(
            out,
            "\nType 'help' for available commands, or ask me to review your code.\n"
        )?;
        Ok(())
    }

    async fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Exit => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Help => writeln!(out, "{}", HELP_TEXT)?,
            Command::Summary => match self.reviewer.summary() {
                Ok(summary) => writeln!(out, "{}", summary)?,
                Err(err) => writeln!(out, "Error: {}", err)?,
            },
            Command::Clear => {
                self.reviewer.clear_history();
                writeln!(out, "Conversation history cleared.")?;
            }
            Command::Review { query, filter } => {
                let status = match &filter {
                    Some(pattern) => format!("Analyzing files matching '{}'...", pattern),
                    None => "Analyzing code...".to_string(),
                };
                writeln!(out, "\n{}\n", status)?;
                let reply =
                    with_spinner(&status, self.reviewer.review(&query, filter.as_deref())).await;
                print_reply(out, reply)?;
            }
            Command::Ask(question) if question.is_empty() => {
                writeln!(out, "Usage: ask <question>")?;
            }
            Command::Ask(question) => {
                writeln!(out, "\nThinking...\n")?;
                let reply = with_spinner("Thinking...", self.reviewer.ask(&question)).await;
                print_reply(out, reply)?;
            }
        }
        Ok(Flow::Continue)
    }
}

fn print_reply<W: Write>(out: &mut W, reply: Result<String>) -> Result<()> {
    match reply {
        Ok(text) => writeln!(out, "Assistant:\n{}\n", text)?,
        Err(err) => {
            tracing::warn!("Command failed: {}", err);
            writeln!(out, "Error: {}\n", err)?;
        }
    }
    Ok(())
}

/// Shows a spinner on stderr while `task` runs. Hidden when stderr is not a
/// terminal.
async fn with_spinner<F: Future>(message: &str, task: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));

    let output = task.await;
    spinner.finish_and_clear();
    output
}
