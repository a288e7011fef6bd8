#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
}
