use super::*;

// Functions for creating and updating the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates a new state with no stores or articles. `origin` becomes the first admin.
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        origin: AccountAddress,
        params: InitParams,
    ) -> Self {
        let admins = core::iter::once(origin).chain(params.admins);
        Self {
            admins: RoleSet::with_members(state_builder, admins),
            store_owners: RoleSet::with_members(state_builder, params.store_owners),
            stores: state_builder.new_map(),
            last_store_id: 0,
            articles: state_builder.new_map(),
            last_article_id: 0,
            for_sale: BTreeSet::new(),
            bought_articles: state_builder.new_map(),
        }
    }

    /// Grants the admin role. Only admins may call this; granting it twice is a no-op.
    pub fn add_admin(
        &mut self,
        caller: &AccountAddress,
        account: AccountAddress,
    ) -> ContractResult<Receipt<()>> {
        self.grant(caller, Role::Admin, account)
    }

    /// Grants the store owner role. Only admins may call this; granting it twice is a no-op.
    pub fn add_store_owner(
        &mut self,
        caller: &AccountAddress,
        account: AccountAddress,
    ) -> ContractResult<Receipt<()>> {
        self.grant(caller, Role::StoreOwner, account)
    }

    fn grant(
        &mut self,
        caller: &AccountAddress,
        role: Role,
        account: AccountAddress,
    ) -> ContractResult<Receipt<()>> {
        ensure!(
            self.admins.contains(caller),
            CustomContractError::Unauthorized
        );

        let granted = match role {
            Role::Admin => self.admins.insert(account),
            Role::StoreOwner => self.store_owners.insert(account),
        };

        if !granted {
            return Ok(Receipt::silent(()));
        }

        Ok(Receipt::with_event(
            (),
            CustomEvent::RoleGranted(RoleGrantedEvent { role, account }),
        ))
    }

    pub fn is_admin(&self, account: &AccountAddress) -> bool {
        self.admins.contains(account)
    }

    pub fn is_store_owner(&self, account: &AccountAddress) -> bool {
        self.store_owners.contains(account)
    }

    /// Opens a new store owned by `caller`.
    ///
    /// It rejects if:
    /// - `caller` is not a store owner.
    /// - `name` is empty.
    pub fn create_store(
        &mut self,
        caller: AccountAddress,
        name: String,
    ) -> ContractResult<Receipt<StoreId>> {
        ensure!(
            self.store_owners.contains(&caller),
            CustomContractError::Unauthorized
        );
        ensure!(!name.is_empty(), CustomContractError::InvalidInput);

        let store_id = self.last_store_id + 1;
        self.stores.insert(
            store_id,
            Store {
                id: store_id,
                owner: caller,
                name: name.clone(),
                article_count: 0,
            },
        );
        self.last_store_id = store_id;

        Ok(Receipt::with_event(
            store_id,
            CustomEvent::StoreCreated(StoreCreatedEvent {
                store_id,
                owner: caller,
                name,
            }),
        ))
    }

    pub fn store(&self, store_id: StoreId) -> ContractResult<Store> {
        self.stores
            .get(&store_id)
            .map(|store| store.clone())
            .ok_or(CustomContractError::NotFound)
    }

    /// Ids of all stores in creation order.
    pub fn store_ids(&self) -> Vec<StoreId> {
        (FIRST_ID..=self.last_store_id).collect()
    }

    pub fn store_count(&self) -> u64 {
        self.last_store_id
    }

    /// Lists a new article in `params.store_id` with `caller` as seller.
    ///
    /// It rejects if:
    /// - The store does not exist.
    /// - The name is empty or the price is zero.
    pub fn add_article(
        &mut self,
        caller: AccountAddress,
        params: AddArticleParams,
    ) -> ContractResult<Receipt<ArticleId>> {
        ensure!(
            self.stores.get(&params.store_id).is_some(),
            CustomContractError::NotFound
        );
        ensure!(
            !params.name.is_empty() && params.price > Amount::zero(),
            CustomContractError::InvalidInput
        );

        let article_id = self.last_article_id + 1;
        let article = Article {
            id: article_id,
            store_id: params.store_id,
            seller: caller,
            name: params.name,
            description: params.description,
            price: params.price,
            quantity: params.quantity,
        };
        let event = listed_event(&article);

        if let Some(mut store) = self.stores.get_mut(&params.store_id) {
            store.article_count += 1;
        }
        self.update_for_sale(&article);
        self.articles.insert(article_id, article);
        self.last_article_id = article_id;

        Ok(Receipt::with_event(
            article_id,
            CustomEvent::ArticleListed(event),
        ))
    }

    /// Overwrites name, description, price and quantity of an article. The
    /// id, store and seller never change.
    ///
    /// It rejects if:
    /// - The article does not exist.
    /// - `caller` is not the seller.
    /// - The new name is empty or the new price is zero.
    pub fn edit_article(
        &mut self,
        caller: &AccountAddress,
        params: EditArticleParams,
    ) -> ContractResult<Receipt<()>> {
        let mut article = self.article(params.article_id)?;

        ensure!(
            article.seller == *caller,
            CustomContractError::Unauthorized
        );
        ensure!(
            !params.name.is_empty() && params.price > Amount::zero(),
            CustomContractError::InvalidInput
        );

        article.name = params.name;
        article.description = params.description;
        article.price = params.price;
        article.quantity = params.quantity;

        let event = listed_event(&article);
        self.update_for_sale(&article);
        self.articles.insert(article.id, article);

        Ok(Receipt::with_event((), CustomEvent::ArticleListed(event)))
    }

    pub fn article(&self, article_id: ArticleId) -> ContractResult<Article> {
        self.articles
            .get(&article_id)
            .map(|article| article.clone())
            .ok_or(CustomContractError::NotFound)
    }

    /// Number of articles ever listed, sold out ones included.
    pub fn number_of_articles(&self) -> u64 {
        self.last_article_id
    }

    /// Ids of articles with units left, ascending.
    pub fn articles_for_sale(&self) -> Vec<ArticleId> {
        self.for_sale.iter().copied().collect()
    }

    /// Ids of articles of one store with units left, ascending.
    pub fn store_articles_for_sale(&self, store_id: StoreId) -> ContractResult<Vec<ArticleId>> {
        ensure!(
            self.stores.get(&store_id).is_some(),
            CustomContractError::NotFound
        );

        Ok(self
            .for_sale
            .iter()
            .copied()
            .filter(|id| {
                self.articles
                    .get(id)
                    .map_or(false, |article| article.store_id == store_id)
            })
            .collect())
    }

    /// Checks a purchase of `params.quantity` units paid with `amount`
    /// without touching the state.
    ///
    /// It rejects if:
    /// - The article does not exist.
    /// - The article is sold out or has fewer units than requested.
    /// - The requested quantity is zero.
    /// - `caller` is the seller.
    /// - `amount` differs from unit price times quantity.
    pub fn prepare_purchase(
        &self,
        caller: AccountAddress,
        params: BuyParams,
        amount: Amount,
    ) -> ContractResult<Settlement> {
        let article = self.article(params.article_id)?;

        ensure!(
            article.is_for_sale() && params.quantity <= article.quantity,
            CustomContractError::InsufficientStock
        );
        ensure!(params.quantity > 0, CustomContractError::InvalidInput);
        ensure!(caller != article.seller, CustomContractError::SelfPurchase);

        // An overflowing total can never be matched by the attached amount
        let total = total_price(article.price, params.quantity)
            .ok_or(CustomContractError::PriceMismatch)?;
        ensure!(total == amount, CustomContractError::PriceMismatch);

        Ok(Settlement {
            article_id: article.id,
            store_id: article.store_id,
            seller: article.seller,
            buyer: caller,
            name: article.name,
            price: article.price,
            quantity: params.quantity,
            total,
        })
    }

    /// Applies a prepared purchase: takes the units off the article and
    /// records the buyer. Payment is the caller's business.
    pub fn settle(&mut self, settlement: Settlement) -> ContractResult<Receipt<BoughtArticle>> {
        let remaining = {
            let mut article = self
                .articles
                .get_mut(&settlement.article_id)
                .ok_or(CustomContractError::NotFound)?;
            article.quantity = article
                .quantity
                .checked_sub(settlement.quantity)
                .ok_or(CustomContractError::InsufficientStock)?;
            article.quantity
        };

        if remaining == 0 {
            self.for_sale.remove(&settlement.article_id);
        }

        let bought = BoughtArticle {
            id: settlement.article_id,
            store_id: settlement.store_id,
            seller: settlement.seller,
            buyer: settlement.buyer,
            price: settlement.price,
            quantity: settlement.quantity,
        };
        self.bought_articles.insert(settlement.article_id, bought);

        Ok(Receipt::with_event(
            bought,
            CustomEvent::ArticlePurchased(ArticlePurchasedEvent {
                article_id: settlement.article_id,
                seller: settlement.seller,
                buyer: settlement.buyer,
                name: settlement.name,
                price: settlement.price,
            }),
        ))
    }

    pub fn bought_article(&self, article_id: ArticleId) -> ContractResult<BoughtArticle> {
        self.bought_articles
            .get(&article_id)
            .map(|bought| *bought)
            .ok_or(CustomContractError::NotFound)
    }

    fn update_for_sale(&mut self, article: &Article) {
        if article.is_for_sale() {
            self.for_sale.insert(article.id);
        } else {
            self.for_sale.remove(&article.id);
        }
    }
}

fn listed_event(article: &Article) -> ArticleListedEvent {
    ArticleListedEvent {
        article_id: article.id,
        store_id: article.store_id,
        seller: article.seller,
        name: article.name.clone(),
        price: article.price,
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const OWNER: AccountAddress = AccountAddress([2; 32]);
    const SELLER: AccountAddress = AccountAddress([3; 32]);
    const BUYER: AccountAddress = AccountAddress([4; 32]);

    fn default_state() -> State<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();
        State::new(
            &mut state_builder,
            ADMIN,
            InitParams {
                admins: vec![],
                store_owners: vec![OWNER],
            },
        )
    }

    fn article_params(store_id: StoreId, name: &str, price: u64, quantity: u64) -> AddArticleParams {
        AddArticleParams {
            store_id,
            name: String::from(name),
            description: String::from("Description"),
            price: Amount::from_ccd(price),
            quantity,
        }
    }

    /// State with one store and one article of `quantity` units at 10 CCD.
    fn state_with_article(quantity: u64) -> State<TestStateApi> {
        let mut state = default_state();
        state
            .create_store(OWNER, String::from("store 1"))
            .expect_report("Failed to create store");
        state
            .add_article(SELLER, article_params(1, "article 1", 10, quantity))
            .expect_report("Failed to add article");
        state
    }

    #[concordium_test]
    fn test_new_state_is_empty() {
        let state = default_state();

        claim_eq!(state.number_of_articles(), 0);
        claim_eq!(state.articles_for_sale(), Vec::<ArticleId>::new());
        claim_eq!(state.store_ids(), Vec::<StoreId>::new());
        claim_eq!(state.admins.list(), vec![ADMIN]);
        claim_eq!(state.store_owners.list(), vec![OWNER]);
    }

    #[concordium_test]
    fn test_origin_listed_first_among_admins() {
        let mut state_builder = TestStateBuilder::new();
        let state: State<TestStateApi> = State::new(
            &mut state_builder,
            ADMIN,
            InitParams {
                admins: vec![SELLER, ADMIN],
                store_owners: vec![],
            },
        );

        claim_eq!(state.admins.list(), vec![ADMIN, SELLER]);
        claim!(state.store_owners.is_empty());
    }

    #[concordium_test]
    fn test_add_admin() {
        let mut state = default_state();

        let receipt = state
            .add_admin(&ADMIN, SELLER)
            .expect_report("Admin should be able to add admins");
        claim_eq!(
            receipt.events,
            vec![CustomEvent::RoleGranted(RoleGrantedEvent {
                role: Role::Admin,
                account: SELLER,
            })]
        );
        claim!(state.is_admin(&SELLER));
        claim!(!state.is_store_owner(&SELLER));

        // New admin can grant roles as well
        claim!(state.add_admin(&SELLER, BUYER).is_ok());
        claim_eq!(state.admins.list(), vec![ADMIN, SELLER, BUYER]);
    }

    #[concordium_test]
    fn test_add_existing_admin_is_noop() {
        let mut state = default_state();

        let receipt = state
            .add_admin(&ADMIN, ADMIN)
            .expect_report("Adding an existing admin should succeed");

        claim!(receipt.events.is_empty());
        claim_eq!(state.admins.list(), vec![ADMIN]);
    }

    #[concordium_test]
    fn test_add_admin_unauthorized() {
        let mut state = default_state();

        // Store owners are not admins
        let result = state.add_admin(&OWNER, BUYER);

        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(!state.is_admin(&BUYER));
    }

    #[concordium_test]
    fn test_add_store_owner() {
        let mut state = default_state();

        let result = state.add_store_owner(&OWNER, SELLER);
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(!state.is_store_owner(&SELLER));

        let receipt = state
            .add_store_owner(&ADMIN, SELLER)
            .expect_report("Admin should be able to add store owners");
        claim_eq!(
            receipt.events,
            vec![CustomEvent::RoleGranted(RoleGrantedEvent {
                role: Role::StoreOwner,
                account: SELLER,
            })]
        );
        claim!(state.is_store_owner(&SELLER));
        claim!(!state.is_admin(&SELLER));
        claim_eq!(state.store_owners.list(), vec![OWNER, SELLER]);
    }

    #[concordium_test]
    fn test_create_store() {
        let mut state = default_state();

        let receipt = state
            .create_store(OWNER, String::from("store 1"))
            .expect_report("Failed to create store");
        claim_eq!(receipt.value, 1);
        claim_eq!(
            receipt.events,
            vec![CustomEvent::StoreCreated(StoreCreatedEvent {
                store_id: 1,
                owner: OWNER,
                name: String::from("store 1"),
            })]
        );

        let receipt = state
            .create_store(OWNER, String::from("store 2"))
            .expect_report("Failed to create store");
        claim_eq!(receipt.value, 2);

        claim_eq!(state.store_ids(), vec![1, 2]);
        claim_eq!(state.store_count(), 2);
        claim_eq!(
            state.store(2),
            Ok(Store {
                id: 2,
                owner: OWNER,
                name: String::from("store 2"),
                article_count: 0,
            })
        );
        claim_eq!(state.store(3), Err(CustomContractError::NotFound));
    }

    #[concordium_test]
    fn test_create_store_rejections() {
        let mut state = default_state();

        // Admins are not store owners
        let result = state.create_store(ADMIN, String::from("store"));
        claim_eq!(result, Err(CustomContractError::Unauthorized));

        let result = state.create_store(OWNER, String::new());
        claim_eq!(result, Err(CustomContractError::InvalidInput));

        claim!(state.store_ids().is_empty());
    }

    #[concordium_test]
    fn test_add_article_ids_are_global_and_sequential() {
        let mut state = default_state();
        state
            .create_store(OWNER, String::from("store 1"))
            .expect_report("Failed to create store");
        state
            .create_store(OWNER, String::from("store 2"))
            .expect_report("Failed to create store");

        let first = state.add_article(SELLER, article_params(2, "a", 1, 1));
        let second = state.add_article(BUYER, article_params(1, "b", 1, 1));
        let third = state.add_article(SELLER, article_params(2, "c", 1, 1));

        claim_eq!(first.map(|r| r.value), Ok(1));
        claim_eq!(second.map(|r| r.value), Ok(2));
        claim_eq!(third.map(|r| r.value), Ok(3));
        claim_eq!(state.number_of_articles(), 3);
        claim_eq!(state.store(1).map(|s| s.article_count), Ok(1));
        claim_eq!(state.store(2).map(|s| s.article_count), Ok(2));
        claim_eq!(state.store_articles_for_sale(2), Ok(vec![1, 3]));
        claim_eq!(state.store_articles_for_sale(1), Ok(vec![2]));
        claim_eq!(
            state.store_articles_for_sale(3),
            Err(CustomContractError::NotFound)
        );
    }

    #[concordium_test]
    fn test_add_article_rejections() {
        let mut state = default_state();

        let result = state.add_article(SELLER, article_params(1, "article 1", 10, 1));
        claim_eq!(result, Err(CustomContractError::NotFound));

        state
            .create_store(OWNER, String::from("store 1"))
            .expect_report("Failed to create store");

        let result = state.add_article(SELLER, article_params(1, "", 10, 1));
        claim_eq!(result, Err(CustomContractError::InvalidInput));

        let result = state.add_article(SELLER, article_params(1, "article 1", 0, 1));
        claim_eq!(result, Err(CustomContractError::InvalidInput));

        // Failed attempts do not consume ids
        claim_eq!(state.number_of_articles(), 0);
        claim_eq!(state.store(1).map(|s| s.article_count), Ok(0));
    }

    #[concordium_test]
    fn test_add_article_without_units_is_not_for_sale() {
        let state = state_with_article(0);

        claim_eq!(state.number_of_articles(), 1);
        claim!(state.articles_for_sale().is_empty());
    }

    #[concordium_test]
    fn test_edit_article_round_trip() {
        let mut state = state_with_article(1);

        let receipt = state
            .edit_article(
                &SELLER,
                EditArticleParams {
                    article_id: 1,
                    name: String::from("article edited"),
                    description: String::from("edited"),
                    price: Amount::from_ccd(30),
                    quantity: 3,
                },
            )
            .expect_report("Seller should be able to edit");

        claim_eq!(
            receipt.events,
            vec![CustomEvent::ArticleListed(ArticleListedEvent {
                article_id: 1,
                store_id: 1,
                seller: SELLER,
                name: String::from("article edited"),
                price: Amount::from_ccd(30),
            })]
        );
        claim_eq!(
            state.article(1),
            Ok(Article {
                id: 1,
                store_id: 1,
                seller: SELLER,
                name: String::from("article edited"),
                description: String::from("edited"),
                price: Amount::from_ccd(30),
                quantity: 3,
            })
        );
    }

    #[concordium_test]
    fn test_edit_article_rejections() {
        let mut state = state_with_article(1);
        let edit = |name: &str, price: u64| EditArticleParams {
            article_id: 1,
            name: String::from(name),
            description: String::new(),
            price: Amount::from_ccd(price),
            quantity: 5,
        };

        let result = state.edit_article(&BUYER, edit("stolen", 1));
        claim_eq!(result, Err(CustomContractError::Unauthorized));

        let result = state.edit_article(&SELLER, edit("", 1));
        claim_eq!(result, Err(CustomContractError::InvalidInput));

        let result = state.edit_article(&SELLER, edit("free", 0));
        claim_eq!(result, Err(CustomContractError::InvalidInput));

        let mut missing = edit("missing", 1);
        missing.article_id = 2;
        let result = state.edit_article(&SELLER, missing);
        claim_eq!(result, Err(CustomContractError::NotFound));

        claim_eq!(state.article(1).map(|a| a.name), Ok(String::from("article 1")));
    }

    #[concordium_test]
    fn test_edit_article_quantity_moves_between_sold_out_and_for_sale() {
        let mut state = state_with_article(2);
        let edit = |quantity: u64| EditArticleParams {
            article_id: 1,
            name: String::from("article 1"),
            description: String::new(),
            price: Amount::from_ccd(10),
            quantity,
        };

        claim!(state.edit_article(&SELLER, edit(0)).is_ok());
        claim!(state.articles_for_sale().is_empty());

        claim!(state.edit_article(&SELLER, edit(4)).is_ok());
        claim_eq!(state.articles_for_sale(), vec![1]);
    }

    #[concordium_test]
    fn test_purchase() {
        let mut state = state_with_article(3);
        let params = BuyParams {
            article_id: 1,
            quantity: 2,
        };

        let settlement = state
            .prepare_purchase(BUYER, params, Amount::from_ccd(20))
            .expect_report("Purchase should be valid");
        claim_eq!(settlement.seller, SELLER);
        claim_eq!(settlement.total, Amount::from_ccd(20));

        let receipt = state.settle(settlement).expect_report("Failed to settle");
        let bought = BoughtArticle {
            id: 1,
            store_id: 1,
            seller: SELLER,
            buyer: BUYER,
            price: Amount::from_ccd(10),
            quantity: 2,
        };
        claim_eq!(receipt.value, bought);
        claim_eq!(
            receipt.events,
            vec![CustomEvent::ArticlePurchased(ArticlePurchasedEvent {
                article_id: 1,
                seller: SELLER,
                buyer: BUYER,
                name: String::from("article 1"),
                price: Amount::from_ccd(10),
            })]
        );
        claim_eq!(state.article(1).map(|a| a.quantity), Ok(1));
        claim_eq!(state.articles_for_sale(), vec![1]);
        claim_eq!(state.bought_article(1), Ok(bought));
    }

    #[concordium_test]
    fn test_purchase_last_units_leaves_for_sale_index() {
        let mut state = state_with_article(1);

        let settlement = state
            .prepare_purchase(
                BUYER,
                BuyParams {
                    article_id: 1,
                    quantity: 1,
                },
                Amount::from_ccd(10),
            )
            .expect_report("Purchase should be valid");
        claim!(state.settle(settlement).is_ok());

        claim!(state.articles_for_sale().is_empty());
        claim_eq!(state.number_of_articles(), 1);
        claim_eq!(state.article(1).map(|a| a.quantity), Ok(0));

        // Sold out articles can not be bought
        let result = state.prepare_purchase(
            BUYER,
            BuyParams {
                article_id: 1,
                quantity: 0,
            },
            Amount::zero(),
        );
        claim_eq!(result, Err(CustomContractError::InsufficientStock));
    }

    #[concordium_test]
    fn test_purchase_rejections() {
        let state = state_with_article(1);
        let buy = |article_id: ArticleId, quantity: Quantity| BuyParams {
            article_id,
            quantity,
        };

        let cases = vec![
            (BUYER, buy(2, 1), Amount::from_ccd(10), CustomContractError::NotFound),
            (BUYER, buy(1, 2), Amount::from_ccd(20), CustomContractError::InsufficientStock),
            (BUYER, buy(1, 0), Amount::zero(), CustomContractError::InvalidInput),
            (SELLER, buy(1, 1), Amount::from_ccd(10), CustomContractError::SelfPurchase),
            (BUYER, buy(1, 1), Amount::from_ccd(11), CustomContractError::PriceMismatch),
            (BUYER, buy(1, 1), Amount::from_ccd(9), CustomContractError::PriceMismatch),
        ];

        for (caller, params, amount, expected) in cases {
            claim_eq!(state.prepare_purchase(caller, params, amount), Err(expected));
        }

        claim_eq!(state.article(1).map(|a| a.quantity), Ok(1));
        claim_eq!(state.articles_for_sale(), vec![1]);
        claim_eq!(state.bought_article(1), Err(CustomContractError::NotFound));
    }

    #[concordium_test]
    fn test_purchase_overflowing_total_is_price_mismatch() {
        let mut state = default_state();
        state
            .create_store(OWNER, String::from("store 1"))
            .expect_report("Failed to create store");
        state
            .add_article(
                SELLER,
                AddArticleParams {
                    store_id: 1,
                    name: String::from("expensive"),
                    description: String::new(),
                    price: Amount::from_micro_ccd(u64::MAX),
                    quantity: 2,
                },
            )
            .expect_report("Failed to add article");

        let result = state.prepare_purchase(
            BUYER,
            BuyParams {
                article_id: 1,
                quantity: 2,
            },
            Amount::from_micro_ccd(u64::MAX),
        );

        claim_eq!(result, Err(CustomContractError::PriceMismatch));
    }

    #[concordium_test]
    fn test_repeat_purchase_overwrites_bought_article() {
        let mut state = state_with_article(3);
        let other_buyer = AccountAddress([5; 32]);

        for (buyer, quantity) in [(BUYER, 1u64), (other_buyer, 2u64)].iter() {
            let settlement = state
                .prepare_purchase(
                    *buyer,
                    BuyParams {
                        article_id: 1,
                        quantity: *quantity,
                    },
                    Amount::from_ccd(10 * quantity),
                )
                .expect_report("Purchase should be valid");
            claim!(state.settle(settlement).is_ok());
        }

        let bought = state.bought_article(1).expect_report("Purchase not recorded");
        claim_eq!(bought.buyer, other_buyer);
        claim_eq!(bought.quantity, 2);
        claim!(state.articles_for_sale().is_empty());
    }
}
