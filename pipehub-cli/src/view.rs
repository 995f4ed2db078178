use std::fmt;

use crate::settings::Settings;
use crate::utils::mask;

/// Text form of the settings. Read-only fields are marked as such.
pub struct SettingsView<'a>(pub &'a Settings);

impl fmt::Display for SettingsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.0.profile();
        let channel = self.0.channel();

        let todo = if profile.is_todo_linked() {
            "linked"
        } else {
            "not linked"
        };
        let captcha = if profile.captcha { "on" } else { "off" };
        let terms = profile.block_terms().collect::<Vec<_>>();

        writeln!(f, "GitHub")?;
        writeln!(f, "  login         {} (read-only)", profile.github_login)?;
        writeln!(f, "  id            {} (read-only)", profile.github_id)?;
        writeln!(f, "  app key       {} (read-only)", profile.app_key)?;
        writeln!(f, "  callback url  {} (read-only)", profile.callback_url)?;
        writeln!(f, "Filtering")?;
        writeln!(f, "  block list    {}", profile.block_list)?;
        writeln!(f, "  block terms   {}", terms.len())?;
        for term in terms {
            writeln!(f, "    - {term}")?;
        }
        writeln!(f, "  captcha       {captcha}")?;
        writeln!(f, "Microsoft Todo")?;
        writeln!(f, "  account       {todo}")?;
        writeln!(f, "  task list id  {}", profile.msft_task_list_id)?;
        writeln!(f, "WeChat Work")?;
        writeln!(f, "  corp id       {}", channel.corp_id)?;
        writeln!(f, "  agent id      {}", channel.agent_id)?;
        writeln!(f, "  secret        {}", mask(&channel.secret))?;
        writeln!(f, "Telegram")?;
        writeln!(f, "  bot token     {}", mask(&channel.telegram_bot_token))?;
        writeln!(f, "  chat id       {}", channel.telegram_chat_id)
    }
}

pub fn render(settings: &Settings) -> String {
    SettingsView(settings).to_string()
}
