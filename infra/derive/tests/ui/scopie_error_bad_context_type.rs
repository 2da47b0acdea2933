use scopie_derive::scopie_error;

#[scopie_error]
pub enum DemoError {
    #[error("Unknown scope: {name}")]
    UnknownScope { name: String, context: Option<String> },
}

fn main() {}
