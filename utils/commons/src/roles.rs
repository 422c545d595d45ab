use super::*;

/// Role a marketplace account can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SchemaType, Serialize)]
pub enum Role {
    /// May grant both roles.
    Admin,
    /// May open stores.
    StoreOwner,
}

/// Grow-only set of accounts that remembers the order in which members joined.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct RoleSet<S: HasStateApi> {
    /// Membership lookup.
    members: StateSet<AccountAddress, S>,
    /// Position in joining order to member.
    order: StateMap<u32, AccountAddress, S>,
    len: u32,
}

impl<S: HasStateApi> RoleSet<S> {
    pub fn new(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            members: state_builder.new_set(),
            order: state_builder.new_map(),
            len: 0,
        }
    }

    /// Creates a set seeded with `accounts`, skipping duplicates.
    pub fn with_members(
        state_builder: &mut StateBuilder<S>,
        accounts: impl IntoIterator<Item = AccountAddress>,
    ) -> Self {
        let mut set = Self::new(state_builder);
        for account in accounts {
            set.insert(account);
        }
        set
    }

    pub fn contains(&self, account: &AccountAddress) -> bool {
        self.members.contains(account)
    }

    /// Adds `account` and returns `true` if it was not a member yet.
    pub fn insert(&mut self, account: AccountAddress) -> bool {
        if !self.members.insert(account) {
            return false;
        }
        self.order.insert(self.len, account);
        self.len += 1;
        true
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Members in joining order.
    pub fn list(&self) -> Vec<AccountAddress> {
        (0..self.len)
            .filter_map(|position| self.order.get(&position).map(|account| *account))
            .collect()
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ACCOUNT_0: AccountAddress = AccountAddress([0; 32]);
    const ACCOUNT_1: AccountAddress = AccountAddress([1; 32]);
    const ACCOUNT_2: AccountAddress = AccountAddress([2; 32]);

    #[concordium_test]
    fn test_new_role_set_is_empty() {
        let mut state_builder = TestStateBuilder::new();
        let set: RoleSet<TestStateApi> = RoleSet::new(&mut state_builder);

        claim!(set.is_empty());
        claim_eq!(set.list(), Vec::<AccountAddress>::new());
        claim!(!set.contains(&ACCOUNT_0));
    }

    #[concordium_test]
    fn test_insert_keeps_joining_order() {
        let mut state_builder = TestStateBuilder::new();
        let mut set: RoleSet<TestStateApi> = RoleSet::new(&mut state_builder);

        // Byte order of the addresses is the reverse of the joining order
        claim!(set.insert(ACCOUNT_2));
        claim!(set.insert(ACCOUNT_0));
        claim!(set.insert(ACCOUNT_1));

        claim_eq!(set.len(), 3);
        claim_eq!(set.list(), vec![ACCOUNT_2, ACCOUNT_0, ACCOUNT_1]);
        claim!(set.contains(&ACCOUNT_0));
        claim!(set.contains(&ACCOUNT_1));
        claim!(set.contains(&ACCOUNT_2));
    }

    #[concordium_test]
    fn test_insert_existing_member_is_noop() {
        let mut state_builder = TestStateBuilder::new();
        let mut set: RoleSet<TestStateApi> = RoleSet::new(&mut state_builder);

        claim!(set.insert(ACCOUNT_1));
        // No change expected
        claim!(!set.insert(ACCOUNT_1));

        claim_eq!(set.len(), 1);
        claim_eq!(set.list(), vec![ACCOUNT_1]);
    }

    #[concordium_test]
    fn test_with_members_skips_duplicates() {
        let mut state_builder = TestStateBuilder::new();
        let set: RoleSet<TestStateApi> = RoleSet::with_members(
            &mut state_builder,
            vec![ACCOUNT_0, ACCOUNT_1, ACCOUNT_0, ACCOUNT_2, ACCOUNT_1],
        );

        claim_eq!(set.len(), 3);
        claim_eq!(set.list(), vec![ACCOUNT_0, ACCOUNT_1, ACCOUNT_2]);
    }
}
