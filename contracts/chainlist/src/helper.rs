use super::*;

/// Marketplace identities are accounts, so contract senders are turned away.
pub fn get_account_address(address: Address) -> ContractResult<AccountAddress> {
    match address {
        Address::Account(addr) => Ok(addr),
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress),
    }
}

/// Total owed for `quantity` units, `None` on overflow.
pub fn total_price(price: Amount, quantity: Quantity) -> Option<Amount> {
    price
        .micro_ccd
        .checked_mul(quantity)
        .map(Amount::from_micro_ccd)
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_get_account_address() {
        let account = AccountAddress([3; 32]);
        let contract = ContractAddress {
            index: 3,
            subindex: 0,
        };

        claim_eq!(get_account_address(Address::Account(account)), Ok(account));
        claim_eq!(
            get_account_address(Address::Contract(contract)),
            Err(CustomContractError::OnlyAccountAddress)
        );
    }

    #[concordium_test]
    fn test_total_price() {
        claim_eq!(
            total_price(Amount::from_ccd(10), 3),
            Some(Amount::from_ccd(30))
        );
        claim_eq!(total_price(Amount::from_ccd(10), 0), Some(Amount::zero()));
        claim_eq!(total_price(Amount::from_micro_ccd(u64::MAX), 2), None);
    }
}
