use derive_builder::Builder;
use pipehub_api::Session;

pub trait Context<'a> {
    /// Base url of the pipehub backend.
    ///
    /// Example: http://localhost:8080
    fn base_url(&self) -> &'a str;
    fn session(&self) -> Session;
}

#[derive(Clone, Builder, PartialEq, Eq, Default)]
pub struct Args {
    #[builder(default = "String::from(\"http://localhost:8080\")")]
    base_url: String,
    #[builder(default)]
    session: Option<String>,
}

impl Args {
    pub fn builder() -> ArgsBuilder {
        ArgsBuilder::default()
    }
}

impl<'a> Context<'a> for &'a Args {
    fn base_url(&self) -> &'a str {
        &self.base_url
    }

    fn session(&self) -> Session {
        self.session
            .as_deref()
            .map(Session::new)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend_and_anonymous() {
        let args = Args::builder().build().unwrap();
        let ctx = &args;
        assert_eq!(ctx.base_url(), "http://localhost:8080");
        assert!(ctx.session().is_anonymous());
    }

    #[test]
    fn session_value_is_threaded() {
        let args = Args::builder()
            .base_url("http://pipehub.test".into())
            .session(Some("s1".into()))
            .build()
            .unwrap();
        let ctx = &args;
        assert_eq!(ctx.base_url(), "http://pipehub.test");
        assert_eq!(ctx.session(), Session::new("s1"));
    }
}
