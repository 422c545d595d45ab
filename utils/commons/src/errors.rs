use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Referenced store, article or purchase does not exist (Error code: -4).
    NotFound,
    /// Sender lacks the admin, store owner or seller role required
    /// (Error code: -5).
    Unauthorized,
    /// Empty name, zero price or zero quantity (Error code: -6).
    InvalidInput,
    /// Requested quantity exceeds the quantity for sale (Error code: -7).
    InsufficientStock,
    /// Seller tried to buy their own article (Error code: -8).
    SelfPurchase,
    /// Attached amount differs from price times quantity (Error code: -9).
    PriceMismatch,
    /// Only account addresses can call this function (Error code: -10).
    OnlyAccountAddress,
    /// Failed to invoke a transfer (Error code: -11).
    InvokeTransferError,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to transfers to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}
