use anyhow::Result;
use futures_lite::future;
use tracing::{debug, info, warn};

use pipehub_api::model::{
    channel_config::ChannelConfig, error_response::ErrorResponse, user_profile::UserProfile,
};
use pipehub_api::{Ack, Fetched, Session, API};

mod reset;
pub use reset::ResetState;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Ready,
    /// Not logged in, the caller should navigate here.
    Redirect(String),
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    /// Channel config was accepted; the profile write is never acknowledged.
    pub channel_acknowledged: bool,
}

/// Local copies of the two server records plus the key reset flow.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Settings {
    profile: UserProfile,
    channel: ChannelConfig,
    reset: ResetState,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn channel(&self) -> &ChannelConfig {
        &self.channel
    }

    pub fn reset_state(&self) -> ResetState {
        self.reset
    }

    /// Fetches both records concurrently. A failed fetch leaves its record untouched.
    pub async fn load(&mut self, api: &API, session: &Session) -> LoadOutcome {
        let (profile, channel) = future::zip(
            api.get_user_profile(session),
            api.get_channel_config(session),
        )
        .await;

        match channel {
            Ok(channel) => self.channel = channel,
            Err(e) => warn!("failed to load channel config: {e}"),
        }

        match profile {
            Ok(Fetched::Ready(profile)) => {
                self.profile = profile;
                LoadOutcome::Ready
            }
            Ok(Fetched::Redirect(location)) => LoadOutcome::Redirect(location),
            Err(e) => {
                warn!("failed to load user profile: {e}");
                LoadOutcome::Ready
            }
        }
    }

    pub fn set_block_list(&mut self, value: Option<&str>) {
        self.profile = UserProfile {
            block_list: value.unwrap_or_default().into(),
            ..self.profile.clone()
        };
    }

    pub fn set_captcha(&mut self, value: Option<bool>) {
        self.profile = UserProfile {
            captcha: value.unwrap_or_default(),
            ..self.profile.clone()
        };
    }

    pub fn set_msft_task_list_id(&mut self, value: Option<&str>) {
        self.profile = UserProfile {
            msft_task_list_id: value.unwrap_or_default().into(),
            ..self.profile.clone()
        };
    }

    pub fn set_corp_id(&mut self, value: Option<&str>) {
        self.channel = ChannelConfig {
            corp_id: value.unwrap_or_default().into(),
            ..self.channel.clone()
        };
    }

    /// Non numeric input becomes `0`.
    pub fn set_agent_id(&mut self, value: Option<&str>) {
        self.channel = ChannelConfig {
            agent_id: parse_agent_id(value.unwrap_or_default()),
            ..self.channel.clone()
        };
    }

    pub fn set_secret(&mut self, value: Option<&str>) {
        self.channel = ChannelConfig {
            secret: value.unwrap_or_default().into(),
            ..self.channel.clone()
        };
    }

    pub fn set_telegram_bot_token(&mut self, value: Option<&str>) {
        self.channel = ChannelConfig {
            telegram_bot_token: value.unwrap_or_default().into(),
            ..self.channel.clone()
        };
    }

    pub fn set_telegram_chat_id(&mut self, value: Option<&str>) {
        self.channel = ChannelConfig {
            telegram_chat_id: value.unwrap_or_default().into(),
            ..self.channel.clone()
        };
    }

    /// Writes both records back with two independent requests.
    pub async fn save(&self, api: &API, session: &Session) -> SaveReport {
        let (channel, profile) = future::zip(
            api.put_channel_config(session, &self.channel),
            api.put_user_profile(session, &self.profile),
        )
        .await;

        let channel_acknowledged = match channel {
            Ok(ack) if ack.is_success() => {
                info!("channel config saved");
                true
            }
            Ok(ack) => {
                log_rejected("channel config", &ack);
                false
            }
            Err(e) => {
                warn!("failed to save channel config: {e}");
                false
            }
        };

        match profile {
            Ok(ack) => debug!("user profile save answered {}: {}", ack.status, ack.body),
            Err(e) => warn!("failed to save user profile: {e}"),
        }

        SaveReport {
            channel_acknowledged,
        }
    }

    /// Opens the confirmation. Issues no request.
    pub fn request_reset(&mut self) {
        if self.reset == ResetState::Idle {
            self.reset = ResetState::Confirming;
        }
    }

    pub fn cancel_reset(&mut self) {
        if self.reset.is_confirming() {
            self.reset = ResetState::Idle;
        }
    }

    /// Same as cancel; the confirmation was closed without an answer.
    pub fn dismiss_reset(&mut self) {
        self.cancel_reset();
    }

    /// Regenerates the app key and replaces the whole local profile with the
    /// answer, dropping unsaved profile edits.
    ///
    /// Returns `None` when no confirmation was pending, otherwise whether the
    /// reset was acknowledged.
    pub async fn confirm_reset(&mut self, api: &API, session: &Session) -> Option<bool> {
        if !self.reset.is_confirming() {
            return None;
        }
        self.reset = ResetState::Resetting;
        let result = api.reset_key(session).await;
        self.reset = ResetState::Idle;

        match result {
            Ok(reissued) => {
                let acknowledged = reissued.is_success();
                if acknowledged {
                    info!("app key reset");
                } else {
                    warn!("app key reset answered {}", reissued.status);
                }
                self.profile = reissued.profile;
                Some(acknowledged)
            }
            Err(e) => {
                warn!("failed to reset app key: {e}");
                Some(false)
            }
        }
    }

    /// Returns where to send the user to link Microsoft Todo.
    pub async fn link_todo(api: &API, session: &Session) -> Result<String> {
        api.msft_auth_url(session).await
    }
}

pub fn parse_agent_id(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

fn log_rejected(what: &str, ack: &Ack) {
    match ErrorResponse::parse(&ack.body) {
        Some(ErrorResponse {
            request_id,
            error_message,
            ..
        }) => warn!(
            "{what} rejected with {} ({request_id}): {error_message}",
            ack.status
        ),
        None => warn!("{what} rejected with {}", ack.status),
    }
}
