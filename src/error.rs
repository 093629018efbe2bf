use super::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("chain requires at least one transaction"))]
    EmptyTemplate,
    #[snafu(display("extranonce must be {expected} bytes, got {actual}"))]
    ExtranonceLength { expected: usize, actual: usize },
    #[snafu(display("generate header first"))]
    HeaderNotGenerated,
    #[snafu(display("invalid input encoding: {source}"))]
    InvalidInputEncoding { source: hex::FromHexError },
    #[snafu(display("malformed hash hex: {source}"))]
    MalformedHash { source: hex::FromHexError },
    #[snafu(display("template cannot be null"))]
    MissingTemplate,
    #[snafu(display("generate work first"))]
    NotInitialized,
    #[snafu(display("arbitrary bytes do not fit a single push, {size} bytes (max 75)"))]
    OversizedPush { size: usize },
    #[snafu(display("script sig too large, {size} bytes (max 100)"))]
    OversizedScriptSig { size: usize },
    #[snafu(display("{message}"))]
    Parse { message: String },
    #[snafu(display("unknown chain '{name}'"))]
    UnknownChain { name: String },
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
