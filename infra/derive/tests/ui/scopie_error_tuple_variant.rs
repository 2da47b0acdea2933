use scopie_derive::scopie_error;

#[scopie_error]
pub enum DemoError {
    #[error("Parse error: {0}")]
    Parse(std::num::ParseIntError),
}

fn main() {}
