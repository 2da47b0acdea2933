use scopie_derive::scopie_error;
use std::borrow::Cow;

#[scopie_error]
pub enum DemoError {
    #[error("Missing operation{}: {scope}", format_context(.context))]
    MissingOperation { scope: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Io error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },
}

fn missing() -> Result<()> {
    Err(DemoError::MissingOperation { scope: "featured".into(), context: None })
}

fn main() {
    let err = missing().context("applying scopes").unwrap_err();
    assert_eq!(err.context_hint(), Some("applying scopes"));
    assert_eq!(err.to_string(), "Missing operation (applying scopes): featured");

    let io: DemoError = std::io::Error::other("boom").into();
    assert!(io.context_hint().is_none());
    assert!(io.with_context("reading manifest").context_hint().is_some());
}
