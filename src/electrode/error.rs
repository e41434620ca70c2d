/// Errors that can occur while resolving an electrode symbol
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElectrodeError {
    /// The symbol has no recognized region prefix or positional suffix
    #[error("Unrecognized electrode: {0:?}")]
    Unrecognized(String),
}
