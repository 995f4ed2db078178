use serde::Deserialize;
use serde::Serialize;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub github_login: String,
    pub github_id: i64,
    /// Credential embedded in `callback_url`, regenerated by a key reset.
    pub app_key: String,
    pub callback_url: String,
    /// Comma separated substrings, any match suppresses a message.
    pub block_list: String,
    /// Move verification codes to the first line of long messages.
    pub captcha: bool,
    pub msft_refresh_token: String,
    pub msft_task_list_id: String,
}

impl UserProfile {
    pub fn is_todo_linked(&self) -> bool {
        !self.msft_refresh_token.is_empty()
    }

    pub fn block_terms(&self) -> impl Iterator<Item = &str> {
        self.block_list
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Local preview of the block list, the backend has the final word.
    pub fn blocks(&self, message: &str) -> Option<&str> {
        self.block_terms().find(|term| message.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_profile() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"github_login":"alice","app_key":"k1"}"#).unwrap();
        assert_eq!(profile.github_login, "alice");
        assert_eq!(profile.app_key, "k1");
        assert_eq!(profile.github_id, 0);
        assert!(!profile.captcha);
        assert!(!profile.is_todo_linked());
    }

    #[test]
    fn block_terms_skip_blanks() {
        let profile = UserProfile {
            block_list: " foo, ,bar,".into(),
            ..Default::default()
        };
        assert_eq!(profile.block_terms().collect::<Vec<_>>(), ["foo", "bar"]);
        assert_eq!(profile.blocks("a bar b"), Some("bar"));
        assert_eq!(profile.blocks("nothing here"), None);
    }

    #[test]
    fn empty_block_list_blocks_nothing() {
        assert_eq!(UserProfile::default().blocks("anything"), None);
    }
}
