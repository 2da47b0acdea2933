use scopie_derive::scopie_error;

#[scopie_error]
pub enum DemoError {
    #[error("Io error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
