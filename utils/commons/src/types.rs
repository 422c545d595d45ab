use super::*;

pub type ContractResult<A> = Result<A, CustomContractError>;

/// Sequential store identifier, starting at [`FIRST_ID`].
pub type StoreId = u64;

/// Sequential article identifier, global across stores.
pub type ArticleId = u64;

/// Number of units of an article.
pub type Quantity = u64;
