use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use mailform::{ApiConfig, EmailForm, Field, HttpMailApi, MailApi, Notifier, SubmitOutcome, Toaster};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

mod prompt;

#[derive(Parser)]
#[command(name = "mailform", about = "Compose and send email through a mail API")]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// Base URL of the mail API. Defaults to $MAILFORM_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one email from command line arguments
    Send {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        subject: String,

        /// Message body
        #[arg(long)]
        text: String,

        /// PDF, JPG, PNG, DOC or DOCX file, at most 5MB
        #[arg(long, value_name = "PATH")]
        attach: Option<PathBuf>,
    },
    /// Prompt for each field, then send
    #[command(alias = "c")]
    Compose,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("installing logger")?;

    let config = match cli.api_url {
        Some(url) => ApiConfig::new(url),
        None => ApiConfig::load(),
    }
    .context("resolving mail API URL (set MAILFORM_API_URL or pass --api-url)")?;
    let api = HttpMailApi::new(&config)?;
    log::debug!("sending to {}", api.endpoint());

    let mut form = EmailForm::new(api, Toaster::new());

    match cli.command {
        Commands::Send {
            from,
            to,
            subject,
            text,
            attach,
        } => {
            form.set_field(Field::From, from);
            form.set_field(Field::To, to);
            form.set_field(Field::Subject, subject);
            form.set_field(Field::Text, text);
            if let Some(path) = attach {
                if !stage(&mut form, &path).await {
                    bail!("attachment {} was rejected", path.display());
                }
            }

            match form.submit().await {
                SubmitOutcome::Sent(_) => {}
                SubmitOutcome::Invalid => {
                    for (field, message) in form.errors().iter() {
                        log::error!("{}: {}", field, message);
                    }
                    bail!("invalid form");
                }
                SubmitOutcome::Failed(err) => bail!(err),
            }
        }
        Commands::Compose => prompt::compose(&mut form).await?,
    }
    Ok(())
}

/// Reads `path` and offers it to the form. Returns whether it was staged.
pub(crate) async fn stage<A: MailApi, N: Notifier>(
    form: &mut EmailForm<A, N>,
    path: &Path,
) -> bool {
    let staged = form.select_file(path).await;
    if let Some(attachment) = form.attachment().filter(|_| staged) {
        log::info!("Attached {} ({})", attachment.name(), attachment.size_label());
    }
    staged
}
