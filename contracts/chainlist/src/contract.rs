use super::*;

/// Initialize the ChainList contract. The instance origin becomes the first admin.
#[init(contract = "ChainList", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;

    Ok(State::new(state_builder, ctx.init_origin(), params))
}

/// Grant the admin role to an account.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Sender is not an admin.
/// - Fails to log `RoleGranted` event.
#[receive(
    contract = "ChainList",
    name = "addAdmin",
    parameter = "AccountAddress",
    mutable,
    enable_logger
)]
fn add_admin<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let sender = get_account_address(ctx.sender())?;
    let account: AccountAddress = ctx.parameter_cursor().get()?;

    host.state_mut().add_admin(&sender, account)?.emit(logger)
}

/// Grant the store owner role to an account.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Sender is not an admin.
/// - Fails to log `RoleGranted` event.
#[receive(
    contract = "ChainList",
    name = "addStoreOwner",
    parameter = "AccountAddress",
    mutable,
    enable_logger
)]
fn add_store_owner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let sender = get_account_address(ctx.sender())?;
    let account: AccountAddress = ctx.parameter_cursor().get()?;

    host.state_mut()
        .add_store_owner(&sender, account)?
        .emit(logger)
}

/// Open a store owned by the sender. Returns the new store id.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Sender is not a store owner.
/// - Store name is empty.
/// - Fails to log `StoreCreated` event.
#[receive(
    contract = "ChainList",
    name = "addStore",
    parameter = "CreateStoreParams",
    return_value = "StoreId",
    mutable,
    enable_logger
)]
fn add_store<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<StoreId> {
    let sender = get_account_address(ctx.sender())?;
    let params: CreateStoreParams = ctx.parameter_cursor().get()?;

    host.state_mut()
        .create_store(sender, params.name)?
        .emit(logger)
}

/// List an article for sale in a store with the sender as seller. Returns
/// the new article id.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Store does not exist.
/// - Article name is empty or price is zero.
/// - Fails to log `ArticleListed` event.
#[receive(
    contract = "ChainList",
    name = "addArticle",
    parameter = "AddArticleParams",
    return_value = "ArticleId",
    mutable,
    enable_logger
)]
fn add_article<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<ArticleId> {
    let sender = get_account_address(ctx.sender())?;
    let params: AddArticleParams = ctx.parameter_cursor().get()?;

    host.state_mut().add_article(sender, params)?.emit(logger)
}

/// Edit name, description, price and quantity of an article.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Article does not exist.
/// - Sender is not the seller.
/// - Article name is empty or price is zero.
/// - Fails to log `ArticleListed` event.
#[receive(
    contract = "ChainList",
    name = "editArticle",
    parameter = "EditArticleParams",
    mutable,
    enable_logger
)]
fn edit_article<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let sender = get_account_address(ctx.sender())?;
    let params: EditArticleParams = ctx.parameter_cursor().get()?;

    host.state_mut().edit_article(&sender, params)?.emit(logger)
}

/// Buy units of an article. The attached amount must equal unit price times
/// quantity and is paid out to the seller in full.
///
/// Rejects if:
/// - Sender is a contract address.
/// - It fails to parse the parameter.
/// - The article does not exist.
/// - The article has fewer units for sale than requested.
/// - The requested quantity is zero.
/// - Sender is the seller.
/// - The amount differs from the total price.
/// - The transfer to the seller fails.
/// - Fails to log `ArticlePurchased` event.
#[receive(
    contract = "ChainList",
    name = "buyArticle",
    parameter = "BuyParams",
    return_value = "BoughtArticle",
    mutable,
    enable_logger,
    payable
)]
fn buy_article<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<BoughtArticle> {
    let sender = get_account_address(ctx.sender())?;
    let params: BuyParams = ctx.parameter_cursor().get()?;

    let settlement = host.state().prepare_purchase(sender, params, amount)?;

    // Nothing is mutated before the seller got paid
    host.invoke_transfer(&settlement.seller, settlement.total)?;

    host.state_mut().settle(settlement)?.emit(logger)
}

/// View function that returns whether an account is an admin.
#[receive(
    contract = "ChainList",
    name = "isAdmin",
    parameter = "AccountAddress",
    return_value = "bool"
)]
fn is_admin<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let account: AccountAddress = ctx.parameter_cursor().get()?;

    Ok(host.state().is_admin(&account))
}

/// View function that returns whether an account is a store owner.
#[receive(
    contract = "ChainList",
    name = "isStoreOwner",
    parameter = "AccountAddress",
    return_value = "bool"
)]
fn is_store_owner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    let account: AccountAddress = ctx.parameter_cursor().get()?;

    Ok(host.state().is_store_owner(&account))
}

/// View function that returns the admins in the order they were added.
#[receive(
    contract = "ChainList",
    name = "getAdmins",
    return_value = "Vec<AccountAddress>"
)]
fn get_admins<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<AccountAddress>> {
    Ok(host.state().admins.list())
}

/// View function that returns the store owners in the order they were added.
#[receive(
    contract = "ChainList",
    name = "getStoreOwners",
    return_value = "Vec<AccountAddress>"
)]
fn get_store_owners<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<AccountAddress>> {
    Ok(host.state().store_owners.list())
}

#[receive(
    contract = "ChainList",
    name = "getStore",
    parameter = "StoreId",
    return_value = "Store"
)]
fn get_store<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Store> {
    let store_id: StoreId = ctx.parameter_cursor().get()?;

    host.state().store(store_id)
}

#[receive(
    contract = "ChainList",
    name = "getAllStores",
    return_value = "Vec<StoreId>"
)]
fn get_all_stores<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<StoreId>> {
    Ok(host.state().store_ids())
}

#[receive(contract = "ChainList", name = "getStoreCount", return_value = "u64")]
fn get_store_count<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u64> {
    Ok(host.state().store_count())
}

#[receive(
    contract = "ChainList",
    name = "getArticle",
    parameter = "ArticleId",
    return_value = "Article"
)]
fn get_article<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Article> {
    let article_id: ArticleId = ctx.parameter_cursor().get()?;

    host.state().article(article_id)
}

/// View function that returns how many articles were ever listed, sold out
/// ones included.
#[receive(
    contract = "ChainList",
    name = "getNumberOfArticles",
    return_value = "u64"
)]
fn get_number_of_articles<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<u64> {
    Ok(host.state().number_of_articles())
}

#[receive(
    contract = "ChainList",
    name = "getArticlesForSale",
    return_value = "Vec<ArticleId>"
)]
fn get_articles_for_sale<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<ArticleId>> {
    Ok(host.state().articles_for_sale())
}

#[receive(
    contract = "ChainList",
    name = "getStoreArticlesForSale",
    parameter = "StoreId",
    return_value = "Vec<ArticleId>"
)]
fn get_store_articles_for_sale<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<ArticleId>> {
    let store_id: StoreId = ctx.parameter_cursor().get()?;

    host.state().store_articles_for_sale(store_id)
}

/// View function that returns the latest purchase of an article.
#[receive(
    contract = "ChainList",
    name = "getBoughtArticle",
    parameter = "ArticleId",
    return_value = "BoughtArticle"
)]
fn get_bought_article<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<BoughtArticle> {
    let article_id: ArticleId = ctx.parameter_cursor().get()?;

    host.state().bought_article(article_id)
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([0u8; 32]);
    const STORE_OWNER: AccountAddress = AccountAddress([1u8; 32]);
    const SELLER: AccountAddress = AccountAddress([2u8; 32]);
    const BUYER: AccountAddress = AccountAddress([3u8; 32]);
    const NEWCOMER: AccountAddress = AccountAddress([4u8; 32]);

    const ARTICLE_PRICE_1: Amount = Amount::from_micro_ccd(10_000_000);
    const ARTICLE_PRICE_2: Amount = Amount::from_micro_ccd(20_000_000);
    const ARTICLE_PRICE_3: Amount = Amount::from_micro_ccd(30_000_000);

    fn new_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let params = InitParams {
            admins: vec![],
            store_owners: vec![STORE_OWNER],
        };
        let bytes = to_bytes(&params);
        ctx.set_init_origin(ADMIN).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_ChainList");

        TestHost::new(state, state_builder)
    }

    /// Host with two stores, as the marketplace UI expects before listing.
    fn host_with_stores() -> TestHost<State<TestStateApi>> {
        let mut host = new_host();
        for name in ["store 1", "store 2"].iter() {
            let mut ctx = TestReceiveContext::empty();
            let bytes = to_bytes(&CreateStoreParams {
                name: String::from(*name),
            });
            ctx.set_sender(Address::Account(STORE_OWNER))
                .set_parameter(&bytes);
            let mut logger = TestLogger::init();

            claim!(add_store(&ctx, &mut host, &mut logger).is_ok());
        }
        host
    }

    fn call_add_article(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        params: &AddArticleParams,
    ) -> (ContractResult<ArticleId>, TestLogger) {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(params);
        ctx.set_sender(Address::Account(sender)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = add_article(&ctx, host, &mut logger);
        (result, logger)
    }

    fn call_buy_article(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        params: BuyParams,
        amount: Amount,
    ) -> (ContractResult<BoughtArticle>, TestLogger) {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&params);
        ctx.set_sender(Address::Account(sender)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        host.set_self_balance(amount);
        let result = buy_article(&ctx, host, amount, &mut logger);
        (result, logger)
    }

    fn article_1() -> AddArticleParams {
        AddArticleParams {
            store_id: 1,
            name: String::from("article 1"),
            description: String::from("Description for article 1"),
            price: ARTICLE_PRICE_1,
            quantity: 1,
        }
    }

    fn article_2() -> AddArticleParams {
        AddArticleParams {
            store_id: 2,
            name: String::from("article 2"),
            description: String::from("Description for article 2"),
            price: ARTICLE_PRICE_2,
            quantity: 2,
        }
    }

    fn buy_one(article_id: ArticleId) -> BuyParams {
        BuyParams {
            article_id,
            quantity: 1,
        }
    }

    fn articles_for_sale(host: &TestHost<State<TestStateApi>>) -> Vec<ArticleId> {
        let ctx = TestReceiveContext::empty();
        get_articles_for_sale(&ctx, host).expect_report("Failed to view articles for sale")
    }

    fn number_of_articles(host: &TestHost<State<TestStateApi>>) -> u64 {
        let ctx = TestReceiveContext::empty();
        get_number_of_articles(&ctx, host).expect_report("Failed to view number of articles")
    }

    fn view_article(host: &TestHost<State<TestStateApi>>, article_id: ArticleId) -> Article {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&article_id);
        ctx.set_parameter(&bytes);
        get_article(&ctx, host).expect_report("Failed to view article")
    }

    /// Checks article 1 still matches what was listed.
    fn claim_article_1_intact(host: &TestHost<State<TestStateApi>>) {
        let params = article_1();
        claim_eq!(
            view_article(host, 1),
            Article {
                id: 1,
                store_id: params.store_id,
                seller: SELLER,
                name: params.name,
                description: params.description,
                price: params.price,
                quantity: params.quantity,
            },
            "Article 1 should be unchanged"
        );
    }

    /// Test initialization succeeds.
    #[concordium_test]
    fn test_init() {
        let host = new_host();
        let ctx = TestReceiveContext::empty();

        claim_eq!(get_admins(&ctx, &host), Ok(vec![ADMIN]));
        claim_eq!(get_store_owners(&ctx, &host), Ok(vec![STORE_OWNER]));
        claim_eq!(get_all_stores(&ctx, &host), Ok(vec![]));
        claim_eq!(get_store_count(&ctx, &host), Ok(0));
    }

    #[concordium_test]
    fn test_init_without_parameter_fails() {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(ADMIN).set_parameter(&[]);
        let mut state_builder = TestStateBuilder::new();

        let result = init(&ctx, &mut state_builder);

        claim!(result.is_err(), "Init should require a parameter");
    }

    #[concordium_test]
    fn test_manage_roles() {
        let mut host = new_host();

        // Admin grants store owner role
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&NEWCOMER);
        ctx.set_sender(Address::Account(ADMIN)).set_parameter(&bytes);
        let mut logger = TestLogger::init();
        let result = add_store_owner(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(logger.logs.len(), 1, "One event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::RoleGranted(RoleGrantedEvent {
                role: Role::StoreOwner,
                account: NEWCOMER,
            }))
        );

        // Store owners can not grant the admin role
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(NEWCOMER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();
        let result = add_admin(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(logger.logs.is_empty(), "No event should be logged");

        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(is_admin(&ctx, &host), Ok(false));
        claim_eq!(is_store_owner(&ctx, &host), Ok(true));
    }

    #[concordium_test]
    fn test_add_existing_admin_succeeds_silently() {
        let mut host = new_host();

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&ADMIN);
        ctx.set_sender(Address::Account(ADMIN)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = add_admin(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim!(logger.logs.is_empty(), "No event should be logged");
        let ctx = TestReceiveContext::empty();
        claim_eq!(get_admins(&ctx, &host), Ok(vec![ADMIN]));
    }

    #[concordium_test]
    fn test_contract_sender_is_rejected() {
        let mut host = new_host();

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&NEWCOMER);
        ctx.set_sender(Address::Contract(ContractAddress {
            index: 1,
            subindex: 0,
        }))
        .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = add_admin(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress));
    }

    #[concordium_test]
    fn test_add_store() {
        let mut host = new_host();

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&CreateStoreParams {
            name: String::from("store 1"),
        });
        ctx.set_sender(Address::Account(STORE_OWNER))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = add_store(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(1));
        claim_eq!(logger.logs.len(), 1, "One event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::StoreCreated(StoreCreatedEvent {
                store_id: 1,
                owner: STORE_OWNER,
                name: String::from("store 1"),
            }))
        );

        // Sellers without the store owner role can not open stores
        ctx.set_sender(Address::Account(SELLER));
        let result = add_store(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized));

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&1u64);
        ctx.set_parameter(&bytes);
        claim_eq!(
            get_store(&ctx, &host),
            Ok(Store {
                id: 1,
                owner: STORE_OWNER,
                name: String::from("store 1"),
                article_count: 0,
            })
        );
    }

    // Happy path: list, buy, edit and inspect the purchase record.

    #[concordium_test]
    fn test_initialized_with_empty_values() {
        let host = host_with_stores();

        claim_eq!(number_of_articles(&host), 0, "Number of articles must be zero");
        claim!(
            articles_for_sale(&host).is_empty(),
            "There shouldn't be any article for sale"
        );
    }

    #[concordium_test]
    fn test_add_articles() {
        let mut host = host_with_stores();

        let (result, logger) = call_add_article(&mut host, SELLER, &article_1());
        claim_eq!(result, Ok(1));
        claim_eq!(logger.logs.len(), 1, "One event should have been triggered");
        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::ArticleListed(ArticleListedEvent {
                article_id: 1,
                store_id: 1,
                seller: SELLER,
                name: String::from("article 1"),
                price: ARTICLE_PRICE_1,
            }))
        );
        claim_eq!(number_of_articles(&host), 1, "Number of articles must be one");
        claim_eq!(articles_for_sale(&host), vec![1]);
        claim_article_1_intact(&host);

        let (result, logger) = call_add_article(&mut host, SELLER, &article_2());
        claim_eq!(result, Ok(2));
        claim_eq!(logger.logs.len(), 1, "One event should have been triggered");
        claim_eq!(number_of_articles(&host), 2, "Number of articles must be two");
        claim_eq!(articles_for_sale(&host), vec![1, 2]);
        claim_eq!(view_article(&host, 2).store_id, 2);
        // First article is not overwritten
        claim_article_1_intact(&host);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&2u64);
        ctx.set_parameter(&bytes);
        claim_eq!(get_store(&ctx, &host).map(|s| s.article_count), Ok(1));
        claim_eq!(get_store_articles_for_sale(&ctx, &host), Ok(vec![2]));
    }

    #[concordium_test]
    fn test_buy_article() {
        let mut host = host_with_stores();
        claim!(call_add_article(&mut host, SELLER, &article_1()).0.is_ok());
        claim!(call_add_article(&mut host, SELLER, &article_2()).0.is_ok());

        let (result, logger) = call_buy_article(&mut host, BUYER, buy_one(1), ARTICLE_PRICE_1);

        let bought = BoughtArticle {
            id: 1,
            store_id: 1,
            seller: SELLER,
            buyer: BUYER,
            price: ARTICLE_PRICE_1,
            quantity: 1,
        };
        claim_eq!(result, Ok(bought));
        claim_eq!(logger.logs.len(), 1, "One event should have been triggered");
        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::ArticlePurchased(ArticlePurchasedEvent {
                article_id: 1,
                seller: SELLER,
                buyer: BUYER,
                name: String::from("article 1"),
                price: ARTICLE_PRICE_1,
            }))
        );
        claim!(
            host.transfer_occurred(&SELLER, ARTICLE_PRICE_1),
            "Seller should have earned the article price"
        );

        // Sold out article is gone from sale but still counted
        claim_eq!(articles_for_sale(&host), vec![2]);
        claim_eq!(number_of_articles(&host), 2, "There should still be 2 articles");

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&1u64);
        ctx.set_parameter(&bytes);
        claim_eq!(get_bought_article(&ctx, &host), Ok(bought));
    }

    #[concordium_test]
    fn test_buy_several_units() {
        let mut host = host_with_stores();
        claim!(call_add_article(&mut host, SELLER, &article_2()).0.is_ok());

        let params = BuyParams {
            article_id: 1,
            quantity: 2,
        };
        let total = Amount::from_micro_ccd(ARTICLE_PRICE_2.micro_ccd * 2);
        let (result, _) = call_buy_article(&mut host, BUYER, params, total);

        claim_eq!(result.map(|bought| bought.quantity), Ok(2));
        claim!(host.transfer_occurred(&SELLER, total));
        claim_eq!(view_article(&host, 1).quantity, 0);
        claim!(articles_for_sale(&host).is_empty());
    }

    #[concordium_test]
    fn test_edit_article() {
        let mut host = host_with_stores();
        claim!(call_add_article(&mut host, SELLER, &article_1()).0.is_ok());
        claim!(call_add_article(&mut host, SELLER, &article_2()).0.is_ok());
        claim!(call_buy_article(&mut host, BUYER, buy_one(1), ARTICLE_PRICE_1)
            .0
            .is_ok());

        let params = EditArticleParams {
            article_id: 2,
            name: String::from("article edited 2"),
            description: String::from("Description for edited article 2"),
            price: ARTICLE_PRICE_3,
            quantity: 3,
        };
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&params);
        ctx.set_sender(Address::Account(SELLER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = edit_article(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(logger.logs.len(), 1, "One event should have been triggered");
        claim_eq!(
            logger.logs[0],
            to_bytes(&CustomEvent::ArticleListed(ArticleListedEvent {
                article_id: 2,
                store_id: 2,
                seller: SELLER,
                name: String::from("article edited 2"),
                price: ARTICLE_PRICE_3,
            }))
        );
        claim_eq!(number_of_articles(&host), 2, "Number of articles must be two");
        claim_eq!(articles_for_sale(&host), vec![2]);
        claim_eq!(
            view_article(&host, 2),
            Article {
                id: 2,
                store_id: 2,
                seller: SELLER,
                name: params.name,
                description: params.description,
                price: ARTICLE_PRICE_3,
                quantity: 3,
            }
        );

        // Only the seller may edit
        ctx.set_sender(Address::Account(BUYER));
        let result = edit_article(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized));
    }

    // Exceptions: every rejected purchase leaves the ledger untouched.

    #[concordium_test]
    fn test_buy_when_nothing_for_sale() {
        let mut host = host_with_stores();

        let (result, logger) = call_buy_article(&mut host, BUYER, buy_one(1), ARTICLE_PRICE_1);

        claim_eq!(result, Err(CustomContractError::NotFound));
        claim!(logger.logs.is_empty());
        claim_eq!(number_of_articles(&host), 0, "Number of articles must be 0");
    }

    #[concordium_test]
    fn test_buy_article_that_does_not_exist() {
        let mut host = host_with_stores();
        claim!(call_add_article(&mut host, SELLER, &article_1()).0.is_ok());

        let (result, _) = call_buy_article(&mut host, BUYER, buy_one(2), ARTICLE_PRICE_1);

        claim_eq!(result, Err(CustomContractError::NotFound));
        claim_eq!(number_of_articles(&host), 1);
        claim_article_1_intact(&host);
    }

    #[concordium_test]
    fn test_buy_too_many_articles() {
        let mut host = host_with_stores();
        claim!(call_add_article(&mut host, SELLER, &article_1()).0.is_ok());

        let params = BuyParams {
            article_id: 1,
            quantity: 2,
        };
        let (result, _) = call_buy_article(&mut host, BUYER, params, ARTICLE_PRICE_2);

        claim_eq!(result, Err(CustomContractError::InsufficientStock));
        claim!(!host.transfer_occurred(&SELLER, ARTICLE_PRICE_2));
        claim_article_1_intact(&host);
    }

    #[concordium_test]
    fn test_buy_sold_out_article() {
        let mut host = host_with_stores();
        claim!(call_add_article(&mut host, SELLER, &article_1()).0.is_ok());
        claim!(call_buy_article(&mut host, BUYER, buy_one(1), ARTICLE_PRICE_1)
            .0
            .is_ok());

        let (result, _) = call_buy_article(&mut host, NEWCOMER, buy_one(1), ARTICLE_PRICE_1);

        claim_eq!(result, Err(CustomContractError::InsufficientStock));
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&1u64);
        ctx.set_parameter(&bytes);
        claim_eq!(
            get_bought_article(&ctx, &host).map(|bought| bought.buyer),
            Ok(BUYER)
        );
    }

    #[concordium_test]
    fn test_buy_own_article() {
        let mut host = host_with_stores();
        claim!(call_add_article(&mut host, SELLER, &article_1()).0.is_ok());

        let (result, _) = call_buy_article(&mut host, SELLER, buy_one(1), ARTICLE_PRICE_1);

        claim_eq!(result, Err(CustomContractError::SelfPurchase));
        claim!(!host.transfer_occurred(&SELLER, ARTICLE_PRICE_1));
        claim_eq!(articles_for_sale(&host), vec![1]);
        claim_article_1_intact(&host);
    }

    #[concordium_test]
    fn test_buy_with_wrong_price() {
        let mut host = host_with_stores();
        claim!(call_add_article(&mut host, SELLER, &article_1()).0.is_ok());
        let overpaid = Amount::from_micro_ccd(ARTICLE_PRICE_1.micro_ccd + 1_000_000);

        let (result, _) = call_buy_article(&mut host, BUYER, buy_one(1), overpaid);

        claim_eq!(result, Err(CustomContractError::PriceMismatch));
        claim!(!host.transfer_occurred(&SELLER, overpaid));
        claim_eq!(articles_for_sale(&host), vec![1]);
        claim_article_1_intact(&host);
    }

    #[concordium_test]
    fn test_failed_transfer_leaves_article_for_sale() {
        let mut host = host_with_stores();
        claim!(call_add_article(&mut host, SELLER, &article_1()).0.is_ok());

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&buy_one(1));
        ctx.set_sender(Address::Account(BUYER)).set_parameter(&bytes);
        let mut logger = TestLogger::init();
        // Contract can not cover the payout
        host.set_self_balance(Amount::zero());

        let result = buy_article(&ctx, &mut host, ARTICLE_PRICE_1, &mut logger);

        claim_eq!(result, Err(CustomContractError::InvokeTransferError));
        claim!(logger.logs.is_empty());
        claim_eq!(articles_for_sale(&host), vec![1]);
        claim_article_1_intact(&host);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&1u64);
        ctx.set_parameter(&bytes);
        claim_eq!(
            get_bought_article(&ctx, &host),
            Err(CustomContractError::NotFound)
        );
    }

    #[concordium_test]
    fn test_add_article_to_missing_store() {
        let mut host = new_host();

        let (result, logger) = call_add_article(&mut host, SELLER, &article_1());

        claim_eq!(result, Err(CustomContractError::NotFound));
        claim!(logger.logs.is_empty());
        claim_eq!(number_of_articles(&host), 0);
    }
}
