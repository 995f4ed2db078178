use anyhow::{anyhow, Result};
use reqwest::{header, redirect, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use crate::model::{channel_config::ChannelConfig, user_profile::UserProfile};
use crate::Session;

/// Outcome of a fetch that may require the user to log in first.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Ready(T),
    /// Navigate to this location (taken verbatim from `Location`).
    Redirect(String),
}

/// Status and raw text of a write request.
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    pub status: StatusCode,
    pub body: String,
}

impl Ack {
    pub fn is_success(&self) -> bool {
        self.status.as_u16() < 400
    }
}

/// Answer to a key reset; the profile is parsed whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct Reissued {
    pub status: StatusCode,
    pub profile: UserProfile,
}

impl Reissued {
    pub fn is_success(&self) -> bool {
        self.status.as_u16() < 400
    }
}

#[derive(Debug, Clone)]
pub struct API {
    client: reqwest::Client,
    base_url: String,
}

impl API {
    /// Base url of the pipehub backend.
    ///
    /// Example: http://localhost:8080
    pub fn try_with_base_url(base_url: &str) -> Result<Self> {
        Url::parse(base_url).map_err(|e| anyhow!("invalid base url {base_url}: {e}"))?;
        // Location headers on 401 and on the auth url answer must reach the caller.
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(API {
            client,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.client.request(method, url);
        match session.cookie_header() {
            Some(cookie) => req.header(header::COOKIE, cookie),
            None => req,
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn get_user_profile(&self, session: &Session) -> Result<Fetched<UserProfile>> {
        let resp = self.request(Method::GET, "/user", session).send().await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            let location = location_or_root(&resp);
            debug!("GET /user unauthorized, redirect to {location}");
            return Ok(Fetched::Redirect(location));
        }
        let profile: UserProfile = resp.json().await?;
        Ok(Fetched::Ready(profile))
    }

    #[tracing::instrument(skip_all)]
    pub async fn get_channel_config(&self, session: &Session) -> Result<ChannelConfig> {
        let resp = self.request(Method::GET, "/wechat", session).send().await?;
        let config: ChannelConfig = resp.json().await?;
        Ok(config)
    }

    #[tracing::instrument(skip_all)]
    pub async fn put_channel_config(
        &self,
        session: &Session,
        config: &ChannelConfig,
    ) -> Result<Ack> {
        self.put("/wechat", session, config).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn put_user_profile(
        &self,
        session: &Session,
        profile: &UserProfile,
    ) -> Result<Ack> {
        self.put("/user", session, profile).await
    }

    async fn put(&self, path: &str, session: &Session, body: &impl Serialize) -> Result<Ack> {
        let resp = self
            .request(Method::PUT, path, session)
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!("PUT {path} answered {status}");
        Ok(Ack { status, body })
    }

    #[tracing::instrument(skip_all)]
    pub async fn reset_key(&self, session: &Session) -> Result<Reissued> {
        let resp = self
            .request(Method::POST, "/user/reset_key", session)
            .send()
            .await?;
        let status = resp.status();
        let profile: UserProfile = resp.json().await?;
        Ok(Reissued { status, profile })
    }

    /// Asks the backend where to send the user to link Microsoft Todo.
    #[tracing::instrument(skip_all)]
    pub async fn msft_auth_url(&self, session: &Session) -> Result<String> {
        let resp = self
            .request(Method::GET, "/msft_auth_url", session)
            .send()
            .await?;
        Ok(location_or_root(&resp))
    }
}

fn location_or_root(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/")
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let api = API::try_with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8080");
    }

    #[test]
    fn rejects_malformed_base_url() {
        assert!(API::try_with_base_url("not a url").is_err());
    }

    #[test]
    fn ack_success_threshold() {
        let ack = |code| Ack {
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        };
        assert!(ack(200).is_success());
        assert!(ack(302).is_success());
        assert!(!ack(400).is_success());
        assert!(!ack(404).is_success());
    }
}
