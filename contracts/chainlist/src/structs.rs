use super::*;

/// The contract state.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Accounts allowed to grant roles.
    pub admins: RoleSet<S>,
    /// Accounts allowed to open stores.
    pub store_owners: RoleSet<S>,
    pub stores: StateMap<StoreId, Store, S>,
    /// Identifier of the most recently created store, `0` when there are none.
    pub last_store_id: StoreId,
    pub articles: StateMap<ArticleId, Article, S>,
    /// Identifier of the most recently created article, `0` when there are none.
    pub last_article_id: ArticleId,
    /// Ids of articles with a non-zero quantity, kept in ascending order.
    pub for_sale: BTreeSet<ArticleId>,
    /// Latest purchase of every article that was bought at least once.
    pub bought_articles: StateMap<ArticleId, BoughtArticle, S>,
}

/// A store opened by a store owner.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: StoreId,
    pub owner: AccountAddress,
    pub name: String,
    /// Number of articles ever added to this store.
    pub article_count: u64,
}

/// An article offered in a store.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub store_id: StoreId,
    pub seller: AccountAddress,
    pub name: String,
    pub description: String,
    /// Price of a single unit.
    pub price: Amount,
    /// Units left for sale.
    pub quantity: Quantity,
}

impl Article {
    pub fn is_for_sale(&self) -> bool {
        self.quantity > 0
    }
}

/// Record of the latest purchase of an article.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct BoughtArticle {
    /// Id of the purchased article.
    pub id: ArticleId,
    pub store_id: StoreId,
    pub seller: AccountAddress,
    pub buyer: AccountAddress,
    /// Unit price paid.
    pub price: Amount,
    /// Units bought.
    pub quantity: Quantity,
}

/// Checked purchase that is ready to be paid out and recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub article_id: ArticleId,
    pub store_id: StoreId,
    pub seller: AccountAddress,
    pub buyer: AccountAddress,
    pub name: String,
    pub price: Amount,
    pub quantity: Quantity,
    /// Amount owed to the seller, equal to the attached amount.
    pub total: Amount,
}

/// Init parameter. The instance origin is always an admin; the listed
/// accounts are granted their roles in addition.
#[derive(Debug, Default, Serialize, SchemaType)]
pub struct InitParams {
    pub admins: Vec<AccountAddress>,
    pub store_owners: Vec<AccountAddress>,
}

#[derive(Debug, Serialize, SchemaType, Clone)]
pub struct CreateStoreParams {
    pub name: String,
}

#[derive(Debug, Serialize, SchemaType, Clone)]
pub struct AddArticleParams {
    pub store_id: StoreId,
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub quantity: Quantity,
}

/// New values for the mutable fields of an article.
#[derive(Debug, Serialize, SchemaType, Clone)]
pub struct EditArticleParams {
    pub article_id: ArticleId,
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub quantity: Quantity,
}

#[derive(Debug, Serialize, SchemaType, Clone, Copy)]
pub struct BuyParams {
    pub article_id: ArticleId,
    pub quantity: Quantity,
}
