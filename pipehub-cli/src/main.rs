use std::{fmt, io};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use pipehub_api::API;
use pipehub_cli::{
    ctx::{Args, Context},
    settings::{LoadOutcome, Settings},
    utils::{confirm, mask, resolve_location},
    view::render,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Notification routing settings")]
struct Cli {
    #[arg(long, env = "PIPEHUB_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,
    /// Value of the `session` cookie issued after login.
    #[arg(long, env = "PIPEHUB_SESSION", hide_env_values = true)]
    session: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current settings
    Show,
    /// Edit fields, then save both records
    Set(Edits),
    /// Issue a new app key, invalidating the current callback url
    ResetKey {
        /// Skip the confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Print the url that links a Microsoft Todo account
    LinkTodo,
    /// Report which block list term, if any, would suppress a message
    Check { message: String },
}

#[derive(clap::Args, Default)]
struct Edits {
    #[arg(long)]
    block_list: Option<String>,
    #[arg(long)]
    captcha: Option<bool>,
    #[arg(long)]
    msft_task_list_id: Option<String>,
    #[arg(long)]
    corp_id: Option<String>,
    /// Non numeric values are stored as 0
    #[arg(long)]
    agent_id: Option<String>,
    #[arg(long)]
    secret: Option<String>,
    #[arg(long)]
    telegram_bot_token: Option<String>,
    #[arg(long)]
    telegram_chat_id: Option<String>,
}

impl fmt::Debug for Edits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edits")
            .field("block_list", &self.block_list)
            .field("captcha", &self.captcha)
            .field("msft_task_list_id", &self.msft_task_list_id)
            .field("corp_id", &self.corp_id)
            .field("agent_id", &self.agent_id)
            .field("secret", &self.secret.as_deref().map(mask))
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_deref().map(mask),
            )
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Edits {
    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.block_list {
            settings.set_block_list(Some(&v));
        }
        if let Some(v) = self.captcha {
            settings.set_captcha(Some(v));
        }
        if let Some(v) = self.msft_task_list_id {
            settings.set_msft_task_list_id(Some(&v));
        }
        if let Some(v) = self.corp_id {
            settings.set_corp_id(Some(&v));
        }
        if let Some(v) = self.agent_id {
            settings.set_agent_id(Some(&v));
        }
        if let Some(v) = self.secret {
            settings.set_secret(Some(&v));
        }
        if let Some(v) = self.telegram_bot_token {
            settings.set_telegram_bot_token(Some(&v));
        }
        if let Some(v) = self.telegram_chat_id {
            settings.set_telegram_chat_id(Some(&v));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_writer(io::stderr)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::INFO.into())
                        .from_env_lossy(),
                ),
        )
        .init();

    let Cli {
        base_url,
        session,
        command,
    } = Cli::parse();
    info!("Started with command: {command:?}");

    let args = Args::builder()
        .base_url(base_url)
        .session(session)
        .build()?;
    run(&args, command).await
}

async fn run(ctx: impl Context<'_>, command: Command) -> Result<()> {
    let api = API::try_with_base_url(ctx.base_url())?;
    let session = ctx.session();

    let mut settings = Settings::new();
    if let LoadOutcome::Redirect(location) = settings.load(&api, &session).await {
        error!("Not logged in");
        println!("Log in at {}", resolve_location(api.base_url(), &location));
        return Ok(());
    }

    match command {
        Command::Show => print!("{}", render(&settings)),
        Command::Set(edits) => {
            edits.apply(&mut settings);
            let report = settings.save(&api, &session).await;
            if report.channel_acknowledged {
                println!("Saved");
            }
        }
        Command::ResetKey { yes } => {
            settings.request_reset();
            let confirmed = yes || {
                let stdin = io::stdin();
                confirm(
                    "Reset the app key? The current callback url stops working.",
                    &mut stdin.lock(),
                    &mut io::stdout(),
                )?
            };
            if !confirmed {
                settings.dismiss_reset();
                return Ok(());
            }
            if settings.confirm_reset(&api, &session).await == Some(true) {
                println!("App key reset");
            }
            print!("{}", render(&settings));
        }
        Command::LinkTodo => {
            let location = Settings::link_todo(&api, &session).await?;
            println!("{}", resolve_location(api.base_url(), &location));
        }
        Command::Check { message } => match settings.profile().blocks(&message) {
            Some(term) => println!("Blocked by \"{term}\""),
            None => println!("Not blocked"),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_command_masks_channel_secrets() {
        let cli = Cli::parse_from([
            "pipehub",
            "set",
            "--secret",
            "hunter2",
            "--telegram-bot-token",
            "123:TOPSECRET",
            "--corp-id",
            "ww01",
        ]);
        let logged = format!("{:?}", cli.command);
        assert!(!logged.contains("hunter2"));
        assert!(!logged.contains("TOPSECRET"));
        assert!(logged.contains("ww01"));
        assert!(logged.contains("RET"));
    }

    #[test]
    fn check_takes_message() {
        let cli = Cli::parse_from(["pipehub", "check", "your code is 1234"]);
        assert!(matches!(
            cli.command,
            Command::Check { ref message } if message == "your code is 1234"
        ));
    }
}
