use super::*;

/// An untagged event of a newly opened store.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct StoreCreatedEvent {
    pub store_id: StoreId,
    /// Store owner.
    pub owner: AccountAddress,
    pub name: String,
}

/// An untagged event of an article put up for sale, either new or edited.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct ArticleListedEvent {
    pub article_id: ArticleId,
    pub store_id: StoreId,
    pub seller: AccountAddress,
    pub name: String,
    /// Unit price.
    pub price: Amount,
}

/// An untagged event of a settled purchase.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct ArticlePurchasedEvent {
    pub article_id: ArticleId,
    pub seller: AccountAddress,
    pub buyer: AccountAddress,
    pub name: String,
    /// Unit price.
    pub price: Amount,
}

/// An untagged event of a role granted to an account.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct RoleGrantedEvent {
    pub role: Role,
    pub account: AccountAddress,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomEvent {
    /// Opening a store
    StoreCreated(StoreCreatedEvent),
    /// Listing or editing an article
    ArticleListed(ArticleListedEvent),
    /// Buying an article
    ArticlePurchased(ArticlePurchasedEvent),
    /// Granting a role
    RoleGranted(RoleGrantedEvent),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::StoreCreated(event) => {
                out.write_u8(STORE_CREATED_TAG)?;
                event.serial(out)
            }
            CustomEvent::ArticleListed(event) => {
                out.write_u8(ARTICLE_LISTED_TAG)?;
                event.serial(out)
            }
            CustomEvent::ArticlePurchased(event) => {
                out.write_u8(ARTICLE_PURCHASED_TAG)?;
                event.serial(out)
            }
            CustomEvent::RoleGranted(event) => {
                out.write_u8(ROLE_GRANTED_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            STORE_CREATED_TAG => StoreCreatedEvent::deserial(source).map(CustomEvent::StoreCreated),
            ARTICLE_LISTED_TAG => {
                ArticleListedEvent::deserial(source).map(CustomEvent::ArticleListed)
            }
            ARTICLE_PURCHASED_TAG => {
                ArticlePurchasedEvent::deserial(source).map(CustomEvent::ArticlePurchased)
            }
            ROLE_GRANTED_TAG => RoleGrantedEvent::deserial(source).map(CustomEvent::RoleGranted),
            _ => Err(ParseError::default()),
        }
    }
}

/// Outcome of a mutating ledger operation: its return value and the events it
/// emitted, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt<T> {
    pub value: T,
    pub events: Vec<CustomEvent>,
}

impl<T> Receipt<T> {
    /// Receipt without events.
    pub fn silent(value: T) -> Self {
        Self {
            value,
            events: Vec::new(),
        }
    }

    pub fn with_event(value: T, event: CustomEvent) -> Self {
        Self {
            value,
            events: vec![event],
        }
    }

    /// Writes the events to the contract log and hands back the value.
    pub fn emit(self, logger: &mut impl HasLogger) -> ContractResult<T> {
        for event in self.events.iter() {
            logger.log(event)?;
        }
        Ok(self.value)
    }
}
