use thiserror::Error;

/// Errors raised while decoding a bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran past the end of the incoming buffer.
    #[error("read past the end of the incoming stream")]
    BufferOverrun,

    /// A variable-length integer kept its proceed bit set past the
    /// supported width.
    #[error("variable-length integer exceeded 64 bits")]
    IntegerOverflow,
}
