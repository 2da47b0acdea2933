use scopie_derive::scopie_error;
use std::borrow::Cow;

#[scopie_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown scope{}: {name}", format_context(.context))]
    UnknownScope { name: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<i64> {
    let value = raw.parse::<i64>().context("parsing page")?;
    Ok(value)
}

fn main() {
    assert_eq!(parse("42").ok(), Some(42));
}
