//! Interactive composition on the terminal.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use mailform::{EmailForm, Field, MailApi, Notifier, SubmitOutcome};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

fn label(field: Field) -> &'static str {
    match field {
        Field::From => "From",
        Field::To => "To",
        Field::Subject => "Subject",
        Field::Text => "Message",
    }
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::From => "your-email@gmail.com",
        Field::To => "recipient@gmail.com",
        Field::Subject => "Enter email subject",
        Field::Text => "Type your message here, end with a line containing only '.'",
    }
}

struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    fn new() -> Self {
        Prompter {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn line(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        match self.lines.next_line().await.context("reading stdin")? {
            Some(line) => Ok(line),
            None => bail!("input closed"),
        }
    }

    /// Empty input keeps `current`.
    async fn field(&mut self, field: Field, current: &str) -> Result<String> {
        let hint = if current.is_empty() {
            placeholder(field)
        } else {
            current
        };

        if field != Field::Text {
            let answer = self.line(&format!("{} [{}]: ", label(field), hint)).await?;
            return Ok(if answer.is_empty() {
                current.to_owned()
            } else {
                answer
            });
        }

        println!("{} [{}]:", label(field), hint);
        let mut body = Vec::new();
        loop {
            let line = self.line("> ").await?;
            if line == "." {
                break;
            }
            body.push(line);
        }
        Ok(if body.is_empty() {
            current.to_owned()
        } else {
            body.join("\n")
        })
    }

    async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.line(&format!("{} [y/N]: ", question)).await?;
        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }
}

pub(crate) async fn compose<A: MailApi, N: Notifier>(form: &mut EmailForm<A, N>) -> Result<()> {
    let mut prompter = Prompter::new();
    let mut fields = Field::ALL.to_vec();

    loop {
        for field in fields.drain(..) {
            let value = prompter.field(field, form.state().get(field)).await?;
            form.set_field(field, value);
        }
        choose_attachment(&mut prompter, form).await?;

        println!("Sending...");
        match form.submit().await {
            SubmitOutcome::Sent(_) => return Ok(()),
            SubmitOutcome::Invalid => {
                for (field, message) in form.errors().iter() {
                    println!("  {}: {}", label(field), message);
                }
                fields = form.errors().iter().map(|(field, _)| field).collect();
            }
            SubmitOutcome::Failed(_) => {
                if !prompter.confirm("Try again?").await? {
                    bail!("email was not sent");
                }
            }
        }
    }
}

async fn choose_attachment<A: MailApi, N: Notifier>(
    prompter: &mut Prompter,
    form: &mut EmailForm<A, N>,
) -> Result<()> {
    loop {
        let prompt = match form.attachment() {
            Some(current) => format!(
                "Attachment [{} ({})] (path, '-' to remove, empty to keep): ",
                current.name(),
                current.size_label()
            ),
            None => "Attachment (optional) [PDF, JPG, PNG, DOC, DOCX, max 5MB]: ".to_owned(),
        };

        let answer = prompter.line(&prompt).await?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(());
        }
        if answer == "-" {
            form.remove_attachment();
            return Ok(());
        }

        // a rejected file has already raised a notice
        if crate::stage(form, Path::new(answer)).await {
            return Ok(());
        }
    }
}
