use crate::data_structures::{CollectionConfig, CollectionEvent, CollectionMetadata, EventLog};
use crate::receiver::{ReceiverRegistry, TokenReceiver};
use crate::types::*;
use crate::utils::swap_remove_tracked;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// In-memory non-fungible token collection with ERC-721 semantics
#[derive(Debug)]
pub struct Collection {
    metadata: CollectionMetadata,

    /// Account the wrapper-level operations act as
    deployer: Address,

    /// Last issued token id; the next mint uses `token_counter + 1`
    token_counter: TokenId,

    owners: HashMap<TokenId, Address>,
    balances: HashMap<Address, Balance>,

    /// Per-owner enumeration, with each token's slot in its owner's list
    owned_tokens: HashMap<Address, Vec<TokenId>>,
    owned_index: HashMap<TokenId, usize>,

    /// Global enumeration of live tokens
    all_tokens: Vec<TokenId>,
    all_index: HashMap<TokenId, usize>,

    token_approvals: HashMap<TokenId, Address>,

    /// Per-token URIs set at mint time; override `base_uri`
    token_uris: HashMap<TokenId, String>,

    /// Accounts besides the deployer allowed to call `mint_as`
    minters: HashSet<Address>,

    /// (owner, operator) pairs
    operators: HashSet<(Address, Address)>,

    receivers: ReceiverRegistry,
    log: EventLog,
}

/// Snapshot of collection-level facts
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CollectionInfo {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub deployer: Address,
    pub total_supply: usize,
    pub next_token_id: TokenId,
    pub event_count: usize,
    pub log_digest: String,
}

impl Collection {
    /// Create a new, empty collection
    pub fn new(config: CollectionConfig) -> NiftyResult<Self> {
        config.validate()?;

        Ok(Self {
            metadata: CollectionMetadata::from(&config),
            deployer: config.deployer,
            token_counter: 0,
            owners: HashMap::new(),
            balances: HashMap::new(),
            owned_tokens: HashMap::new(),
            owned_index: HashMap::new(),
            all_tokens: Vec::new(),
            all_index: HashMap::new(),
            token_approvals: HashMap::new(),
            token_uris: HashMap::new(),
            minters: HashSet::new(),
            operators: HashSet::new(),
            receivers: ReceiverRegistry::new(),
            log: EventLog::new(),
        })
    }

    pub fn with_deployer(
        name: impl Into<String>,
        symbol: impl Into<String>,
        deployer: Address,
    ) -> NiftyResult<Self> {
        Self::new(CollectionConfig::new(name, symbol).with_deployer(deployer))
    }

    // ---------------------------------------------------------------
    // Metadata
    // ---------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn base_uri(&self) -> &str {
        &self.metadata.base_uri
    }

    pub fn set_base_uri(&mut self, base_uri: impl Into<String>) {
        self.metadata.base_uri = base_uri.into();
    }

    pub fn metadata(&self) -> &CollectionMetadata {
        &self.metadata
    }

    pub fn deployer(&self) -> Address {
        self.deployer
    }

    /// The token's own URI if one was set at mint, else `base_uri + id`
    pub fn token_uri(&self, token_id: TokenId) -> NiftyResult<String> {
        self.require_owned(token_id)?;
        match self.token_uris.get(&token_id) {
            Some(uri) => Ok(uri.clone()),
            None => Ok(self.metadata.token_uri(token_id)),
        }
    }

    pub fn info(&self) -> CollectionInfo {
        CollectionInfo {
            name: self.metadata.name.clone(),
            symbol: self.metadata.symbol.clone(),
            base_uri: self.metadata.base_uri.clone(),
            deployer: self.deployer,
            total_supply: self.total_supply(),
            next_token_id: self.next_token_id(),
            event_count: self.log.len(),
            log_digest: format!("0x{}", hex::encode(self.log.digest())),
        }
    }

    // ---------------------------------------------------------------
    // Minting and burning
    // ---------------------------------------------------------------

    /// Mint the next token id to `to`
    pub fn mint(&mut self, to: Address) -> NiftyResult<TokenId> {
        self.mint_inner(to, None)
    }

    /// Mint, running the receiver hook if `to` is a contract
    pub fn safe_mint(&mut self, to: Address, data: &[u8]) -> NiftyResult<TokenId> {
        self.mint_inner(to, Some(data))
    }

    /// Mint on behalf of a whitelisted minter, optionally pinning a token URI
    pub fn mint_as(
        &mut self,
        caller: Address,
        to: Address,
        uri: Option<String>,
    ) -> NiftyResult<TokenId> {
        if !self.is_minter(caller) {
            return Err(NiftyError::UnauthorizedMinter(caller));
        }
        let token_id = self.mint_inner(to, None)?;
        if let Some(uri) = uri {
            self.token_uris.insert(token_id, uri);
        }
        Ok(token_id)
    }

    fn mint_inner(&mut self, to: Address, data: Option<&[u8]>) -> NiftyResult<TokenId> {
        if to.is_zero() {
            return Err(NiftyError::InvalidReceiver(to));
        }
        let token_id = self
            .token_counter
            .checked_add(1)
            .ok_or(NiftyError::CounterOverflow)?;

        if let Some(data) = data {
            if !self.receivers.check(self.deployer, Address::zero(), to, token_id, data) {
                warn!(%to, token_id, "receiver rejected minted token");
                return Err(NiftyError::InvalidReceiver(to));
            }
        }

        self.add_token_to_owner(to, token_id);
        self.add_token_to_all(token_id);
        self.owners.insert(token_id, to);
        self.token_counter = token_id;

        self.log.push(CollectionEvent::Transfer {
            from: Address::zero(),
            to,
            token_id,
        });
        debug!(%to, token_id, "minted token");
        Ok(token_id)
    }

    /// Destroy a token without an authorization check
    pub fn burn(&mut self, token_id: TokenId) -> NiftyResult<()> {
        let owner = self.require_owned(token_id)?;

        self.token_approvals.remove(&token_id);
        self.token_uris.remove(&token_id);
        self.remove_token_from_owner(owner, token_id);
        self.remove_token_from_all(token_id);
        self.owners.remove(&token_id);

        self.log.push(CollectionEvent::Transfer {
            from: owner,
            to: Address::zero(),
            token_id,
        });
        debug!(%owner, token_id, "burned token");
        Ok(())
    }

    /// Destroy a token on behalf of `caller`, who must be owner, approved or operator
    pub fn burn_from(&mut self, caller: Address, token_id: TokenId) -> NiftyResult<()> {
        let owner = self.require_owned(token_id)?;
        if !self.is_authorized(owner, caller, token_id) {
            return Err(NiftyError::InsufficientApproval { caller, token_id });
        }
        self.burn(token_id)
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn balance_of(&self, owner: Address) -> NiftyResult<Balance> {
        if owner.is_zero() {
            return Err(NiftyError::InvalidOwner(owner));
        }
        Ok(self.balances.get(&owner).copied().unwrap_or(0))
    }

    pub fn owner_of(&self, token_id: TokenId) -> NiftyResult<Address> {
        self.require_owned(token_id)
    }

    pub fn exists(&self, token_id: TokenId) -> bool {
        self.owners.contains_key(&token_id)
    }

    /// The owner's tokens in enumeration order
    pub fn tokens_by_owner(&self, owner: Address) -> NiftyResult<Vec<TokenId>> {
        if owner.is_zero() {
            return Err(NiftyError::InvalidOwner(owner));
        }
        Ok(self.owned_tokens.get(&owner).cloned().unwrap_or_default())
    }

    pub fn token_of_owner_by_index(&self, owner: Address, index: usize) -> NiftyResult<TokenId> {
        if owner.is_zero() {
            return Err(NiftyError::InvalidOwner(owner));
        }
        let tokens = self.owned_tokens.get(&owner).map(Vec::as_slice).unwrap_or(&[]);
        tokens
            .get(index)
            .copied()
            .ok_or(NiftyError::OutOfBoundsIndex { index, len: tokens.len() })
    }

    pub fn total_supply(&self) -> usize {
        self.all_tokens.len()
    }

    pub fn token_by_index(&self, index: usize) -> NiftyResult<TokenId> {
        self.all_tokens.get(index).copied().ok_or(NiftyError::OutOfBoundsIndex {
            index,
            len: self.all_tokens.len(),
        })
    }

    pub fn all_tokens(&self) -> &[TokenId] {
        &self.all_tokens
    }

    /// Id the next successful mint will assign
    pub fn next_token_id(&self) -> TokenId {
        self.token_counter.saturating_add(1)
    }

    /// Last id issued; 0 before the first mint
    pub fn last_token_id(&self) -> TokenId {
        self.token_counter
    }

    // ---------------------------------------------------------------
    // Transfers
    // ---------------------------------------------------------------

    /// Safe transfer from the deployer, acting as the deployer
    pub fn transfer(&mut self, to: Address, token_id: TokenId) -> NiftyResult<()> {
        let deployer = self.deployer;
        self.safe_transfer_from(deployer, deployer, to, token_id, &[])
    }

    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> NiftyResult<()> {
        self.transfer_inner(caller, from, to, token_id, None)
    }

    pub fn safe_transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
        data: &[u8],
    ) -> NiftyResult<()> {
        self.transfer_inner(caller, from, to, token_id, Some(data))
    }

    fn transfer_inner(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
        data: Option<&[u8]>,
    ) -> NiftyResult<()> {
        let owner = self.require_owned(token_id)?;
        if !self.is_authorized(owner, caller, token_id) {
            return Err(NiftyError::InsufficientApproval { caller, token_id });
        }
        if owner != from {
            return Err(NiftyError::IncorrectOwner { from, token_id, owner });
        }
        if to.is_zero() {
            return Err(NiftyError::InvalidReceiver(to));
        }

        // The hook sees no intermediate state, so rejecting before the
        // move is the same as reverting after it.
        if let Some(data) = data {
            if !self.receivers.check(caller, from, to, token_id, data) {
                warn!(%to, token_id, "receiver rejected transferred token");
                return Err(NiftyError::InvalidReceiver(to));
            }
        }

        self.token_approvals.remove(&token_id);
        self.remove_token_from_owner(from, token_id);
        self.add_token_to_owner(to, token_id);
        self.owners.insert(token_id, to);

        self.log.push(CollectionEvent::Transfer { from, to, token_id });
        debug!(%from, %to, token_id, %caller, "transferred token");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Approvals
    // ---------------------------------------------------------------

    /// Approve `to` for a single token; the null address clears the approval
    pub fn approve(&mut self, caller: Address, to: Address, token_id: TokenId) -> NiftyResult<()> {
        let owner = self.require_owned(token_id)?;
        if caller != owner && !self.is_approved_for_all(owner, caller) {
            return Err(NiftyError::InvalidApprover(caller));
        }
        if to == owner {
            return Err(NiftyError::ApprovalToCurrentOwner(token_id));
        }

        if to.is_zero() {
            self.token_approvals.remove(&token_id);
        } else {
            self.token_approvals.insert(token_id, to);
        }

        self.log.push(CollectionEvent::Approval {
            owner,
            approved: to,
            token_id,
        });
        debug!(%owner, approved = %to, token_id, "approval updated");
        Ok(())
    }

    pub fn get_approved(&self, token_id: TokenId) -> NiftyResult<Option<Address>> {
        self.require_owned(token_id)?;
        Ok(self.token_approvals.get(&token_id).copied())
    }

    pub fn set_approval_for_all(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> NiftyResult<()> {
        if operator == caller || operator.is_zero() {
            return Err(NiftyError::InvalidOperator(operator));
        }

        if approved {
            self.operators.insert((caller, operator));
        } else {
            self.operators.remove(&(caller, operator));
        }

        self.log.push(CollectionEvent::ApprovalForAll {
            owner: caller,
            operator,
            approved,
        });
        debug!(owner = %caller, %operator, approved, "operator approval updated");
        Ok(())
    }

    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operators.contains(&(owner, operator))
    }

    // ---------------------------------------------------------------
    // Minter whitelist
    // ---------------------------------------------------------------

    /// The deployer is always a minter
    pub fn is_minter(&self, account: Address) -> bool {
        account == self.deployer || self.minters.contains(&account)
    }

    /// Whitelisted minters, excluding the deployer, in address order
    pub fn minters(&self) -> Vec<Address> {
        let mut minters: Vec<Address> = self.minters.iter().copied().collect();
        minters.sort();
        minters
    }

    pub fn add_minter(&mut self, caller: Address, account: Address) -> NiftyResult<()> {
        self.add_minters(caller, &[account])
    }

    /// Whitelist several accounts; nothing changes if any of them is null
    pub fn add_minters(&mut self, caller: Address, accounts: &[Address]) -> NiftyResult<()> {
        self.require_deployer(caller)?;
        if let Some(null) = accounts.iter().find(|a| a.is_zero()) {
            return Err(NiftyError::UnauthorizedMinter(*null));
        }
        for &account in accounts {
            if account != self.deployer && self.minters.insert(account) {
                self.log.push(CollectionEvent::MinterUpdated { account, allowed: true });
                debug!(%account, "minter added");
            }
        }
        Ok(())
    }

    /// Returns whether the account was whitelisted
    pub fn remove_minter(&mut self, caller: Address, account: Address) -> NiftyResult<bool> {
        self.require_deployer(caller)?;
        let removed = self.minters.remove(&account);
        if removed {
            self.log.push(CollectionEvent::MinterUpdated { account, allowed: false });
            debug!(%account, "minter removed");
        }
        Ok(removed)
    }

    fn require_deployer(&self, caller: Address) -> NiftyResult<()> {
        if caller != self.deployer {
            return Err(NiftyError::NotDeployer(caller));
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Receiver hooks
    // ---------------------------------------------------------------

    pub fn register_receiver(&mut self, address: Address, hook: Arc<dyn TokenReceiver>) {
        self.receivers.register(address, hook);
    }

    pub fn unregister_receiver(&mut self, address: Address) -> bool {
        self.receivers.unregister(&address)
    }

    pub fn is_contract(&self, address: Address) -> bool {
        self.receivers.is_contract(&address)
    }

    // ---------------------------------------------------------------
    // Event log
    // ---------------------------------------------------------------

    pub fn events(&self) -> &[CollectionEvent] {
        self.log.events()
    }

    pub fn events_for_token(&self, token_id: TokenId) -> Vec<&CollectionEvent> {
        self.log.for_token(token_id)
    }

    pub fn log_digest(&self) -> Digest {
        self.log.digest()
    }

    // ---------------------------------------------------------------
    // Internal bookkeeping
    // ---------------------------------------------------------------

    fn require_owned(&self, token_id: TokenId) -> NiftyResult<Address> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or(NiftyError::NonexistentToken(token_id))
    }

    fn is_authorized(&self, owner: Address, spender: Address, token_id: TokenId) -> bool {
        spender == owner
            || self.token_approvals.get(&token_id) == Some(&spender)
            || self.is_approved_for_all(owner, spender)
    }

    fn add_token_to_owner(&mut self, to: Address, token_id: TokenId) {
        let list = self.owned_tokens.entry(to).or_default();
        self.owned_index.insert(token_id, list.len());
        list.push(token_id);
        *self.balances.entry(to).or_insert(0) += 1;
    }

    fn remove_token_from_owner(&mut self, from: Address, token_id: TokenId) {
        let Some(index) = self.owned_index.remove(&token_id) else {
            return;
        };
        if let Some(list) = self.owned_tokens.get_mut(&from) {
            if let Some(moved) = swap_remove_tracked(list, index) {
                self.owned_index.insert(moved, index);
            }
            if list.is_empty() {
                self.owned_tokens.remove(&from);
            }
        }
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance = balance.saturating_sub(1);
            if *balance == 0 {
                self.balances.remove(&from);
            }
        }
    }

    fn add_token_to_all(&mut self, token_id: TokenId) {
        self.all_index.insert(token_id, self.all_tokens.len());
        self.all_tokens.push(token_id);
    }

    fn remove_token_from_all(&mut self, token_id: TokenId) {
        if let Some(index) = self.all_index.remove(&token_id) {
            if let Some(moved) = swap_remove_tracked(&mut self.all_tokens, index) {
                self.all_index.insert(moved, index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receiver::{AcceptAll, RejectAll};
    use crate::utils::dev_accounts;
    use rand::thread_rng;

    fn collection() -> (Collection, Vec<Address>) {
        let accounts = dev_accounts(4);
        let c = Collection::with_deployer("MyNFT", "MNFT", accounts[0]).unwrap();
        (c, accounts)
    }

    #[test]
    fn test_mint_assigns_sequential_ids() {
        let (mut c, accounts) = collection();

        assert_eq!(c.next_token_id(), 1);
        assert_eq!(c.mint(accounts[1]).unwrap(), 1);
        assert_eq!(c.mint(accounts[1]).unwrap(), 2);
        assert_eq!(c.mint(accounts[2]).unwrap(), 3);

        assert_eq!(c.balance_of(accounts[1]).unwrap(), 2);
        assert_eq!(c.owner_of(3).unwrap(), accounts[2]);
        assert_eq!(c.total_supply(), 3);
        assert_eq!(c.last_token_id(), 3);
    }

    #[test]
    fn test_failed_mint_keeps_counter() {
        let (mut c, accounts) = collection();

        assert_eq!(
            c.mint(Address::zero()),
            Err(NiftyError::InvalidReceiver(Address::zero()))
        );
        assert_eq!(c.next_token_id(), 1);

        let contract = accounts[3];
        c.register_receiver(contract, Arc::new(RejectAll));
        assert!(c.safe_mint(contract, &[]).is_err());
        assert_eq!(c.next_token_id(), 1);
        assert!(c.events().is_empty());

        // Plain mint skips the hook
        assert_eq!(c.mint(contract).unwrap(), 1);
    }

    #[test]
    fn test_burn_does_not_reuse_ids() {
        let (mut c, accounts) = collection();
        let id = c.mint(accounts[1]).unwrap();
        c.burn(id).unwrap();

        assert!(!c.exists(id));
        assert_eq!(c.owner_of(id), Err(NiftyError::NonexistentToken(id)));
        assert_eq!(c.balance_of(accounts[1]).unwrap(), 0);
        assert_eq!(c.burn(id), Err(NiftyError::NonexistentToken(id)));

        assert_eq!(c.mint(accounts[1]).unwrap(), 2);
    }

    #[test]
    fn test_transfer_acts_as_deployer() {
        let (mut c, accounts) = collection();
        let deployer = accounts[0];

        let id = c.mint(deployer).unwrap();
        c.transfer(accounts[1], id).unwrap();
        assert_eq!(c.owner_of(id).unwrap(), accounts[1]);

        // The deployer no longer owns it and holds no approval
        let err = c.transfer(accounts[2], id).unwrap_err();
        assert_eq!(
            err,
            NiftyError::InsufficientApproval { caller: deployer, token_id: id }
        );
    }

    #[test]
    fn test_transfer_clears_approval() {
        let (mut c, accounts) = collection();
        let id = c.mint(accounts[1]).unwrap();

        c.approve(accounts[1], accounts[2], id).unwrap();
        assert_eq!(c.get_approved(id).unwrap(), Some(accounts[2]));

        c.transfer_from(accounts[2], accounts[1], accounts[3], id).unwrap();
        assert_eq!(c.get_approved(id).unwrap(), None);
        assert_eq!(c.owner_of(id).unwrap(), accounts[3]);
    }

    #[test]
    fn test_incorrect_owner() {
        let (mut c, accounts) = collection();
        let id = c.mint(accounts[1]).unwrap();
        c.set_approval_for_all(accounts[1], accounts[2], true).unwrap();

        let err = c
            .transfer_from(accounts[2], accounts[3], accounts[2], id)
            .unwrap_err();
        assert_eq!(
            err,
            NiftyError::IncorrectOwner { from: accounts[3], token_id: id, owner: accounts[1] }
        );
    }

    #[test]
    fn test_safe_transfer_to_contract() {
        let (mut c, accounts) = collection();
        let mut rng = thread_rng();
        let good = Address::random(&mut rng);
        let bad = Address::random(&mut rng);
        c.register_receiver(good, Arc::new(AcceptAll));
        c.register_receiver(bad, Arc::new(RejectAll));

        let id = c.mint(accounts[0]).unwrap();
        let digest = c.log_digest();

        assert_eq!(c.transfer(bad, id), Err(NiftyError::InvalidReceiver(bad)));
        assert_eq!(c.owner_of(id).unwrap(), accounts[0]);
        assert_eq!(c.log_digest(), digest);

        // Unsafe transfer ignores hooks
        c.transfer_from(accounts[0], accounts[0], bad, id).unwrap();
        assert_eq!(c.owner_of(id).unwrap(), bad);

        let id2 = c.mint(accounts[0]).unwrap();
        c.transfer(good, id2).unwrap();
        assert_eq!(c.owner_of(id2).unwrap(), good);
    }

    #[test]
    fn test_approve_rules() {
        let (mut c, accounts) = collection();
        let id = c.mint(accounts[1]).unwrap();

        assert_eq!(
            c.approve(accounts[1], accounts[1], id),
            Err(NiftyError::ApprovalToCurrentOwner(id))
        );
        assert_eq!(
            c.approve(accounts[2], accounts[3], id),
            Err(NiftyError::InvalidApprover(accounts[2]))
        );

        // A stranger naming the owner is rejected as a stranger
        assert_eq!(
            c.approve(accounts[2], accounts[1], id),
            Err(NiftyError::InvalidApprover(accounts[2]))
        );

        // Operators may approve on the owner's behalf
        c.set_approval_for_all(accounts[1], accounts[2], true).unwrap();
        c.approve(accounts[2], accounts[3], id).unwrap();
        assert_eq!(c.get_approved(id).unwrap(), Some(accounts[3]));

        c.approve(accounts[1], Address::zero(), id).unwrap();
        assert_eq!(c.get_approved(id).unwrap(), None);
        assert_eq!(c.get_approved(99), Err(NiftyError::NonexistentToken(99)));
    }

    #[test]
    fn test_operator_rules() {
        let (mut c, accounts) = collection();
        assert_eq!(
            c.set_approval_for_all(accounts[1], accounts[1], true),
            Err(NiftyError::InvalidOperator(accounts[1]))
        );
        assert!(c.set_approval_for_all(accounts[1], Address::zero(), true).is_err());

        c.set_approval_for_all(accounts[1], accounts[2], true).unwrap();
        assert!(c.is_approved_for_all(accounts[1], accounts[2]));
        assert!(!c.is_approved_for_all(accounts[2], accounts[1]));

        c.set_approval_for_all(accounts[1], accounts[2], false).unwrap();
        assert!(!c.is_approved_for_all(accounts[1], accounts[2]));
    }

    #[test]
    fn test_burn_from_requires_authorization() {
        let (mut c, accounts) = collection();
        let id = c.mint(accounts[1]).unwrap();

        assert_eq!(
            c.burn_from(accounts[2], id),
            Err(NiftyError::InsufficientApproval { caller: accounts[2], token_id: id })
        );
        c.approve(accounts[1], accounts[2], id).unwrap();
        c.burn_from(accounts[2], id).unwrap();
        assert!(!c.exists(id));
    }

    #[test]
    fn test_null_owner_queries() {
        let (c, _) = collection();
        let zero = Address::zero();
        assert_eq!(c.balance_of(zero), Err(NiftyError::InvalidOwner(zero)));
        assert_eq!(c.tokens_by_owner(zero), Err(NiftyError::InvalidOwner(zero)));
        assert!(c.token_of_owner_by_index(zero, 0).is_err());
    }

    #[test]
    fn test_token_uri() {
        let (mut c, accounts) = collection();
        let id = c.mint(accounts[1]).unwrap();
        assert_eq!(c.token_uri(id).unwrap(), "");

        c.set_base_uri("https://meta.example/");
        assert_eq!(c.token_uri(id).unwrap(), "https://meta.example/1");
        assert_eq!(c.token_uri(5), Err(NiftyError::NonexistentToken(5)));
    }

    #[test]
    fn test_minter_whitelist() {
        let (mut c, accounts) = collection();
        let (deployer, minter, outsider) = (accounts[0], accounts[1], accounts[2]);

        assert!(c.is_minter(deployer));
        assert_eq!(
            c.mint_as(minter, outsider, None),
            Err(NiftyError::UnauthorizedMinter(minter))
        );
        assert_eq!(c.add_minter(minter, minter), Err(NiftyError::NotDeployer(minter)));

        c.add_minter(deployer, minter).unwrap();
        assert_eq!(c.mint_as(minter, outsider, None).unwrap(), 1);

        assert!(c.remove_minter(deployer, minter).unwrap());
        assert!(!c.remove_minter(deployer, minter).unwrap());
        assert!(c.mint_as(minter, outsider, None).is_err());
        assert_eq!(c.next_token_id(), 2);
    }

    #[test]
    fn test_add_minters_is_atomic() {
        let (mut c, accounts) = collection();
        let batch = [accounts[1], Address::zero(), accounts[2]];

        assert!(c.add_minters(accounts[0], &batch).is_err());
        assert!(c.minters().is_empty());

        c.add_minters(accounts[0], &[accounts[2], accounts[1], accounts[0]]).unwrap();
        let mut expected = vec![accounts[1], accounts[2]];
        expected.sort();
        assert_eq!(c.minters(), expected);
    }

    #[test]
    fn test_token_uri_override() {
        let (mut c, accounts) = collection();
        c.set_base_uri("https://meta.example/");

        let pinned = c
            .mint_as(accounts[0], accounts[1], Some("ipfs://invoice-7".to_string()))
            .unwrap();
        let plain = c.mint_as(accounts[0], accounts[1], None).unwrap();

        assert_eq!(c.token_uri(pinned).unwrap(), "ipfs://invoice-7");
        assert_eq!(c.token_uri(plain).unwrap(), "https://meta.example/2");

        c.burn(pinned).unwrap();
        assert_eq!(c.token_uri(pinned), Err(NiftyError::NonexistentToken(pinned)));
    }

    #[test]
    fn test_info_snapshot() {
        let (mut c, accounts) = collection();
        c.mint(accounts[1]).unwrap();

        let info = c.info();
        assert_eq!(info.name, "MyNFT");
        assert_eq!(info.symbol, "MNFT");
        assert_eq!(info.total_supply, 1);
        assert_eq!(info.next_token_id, 2);
        assert_eq!(info.event_count, 1);
        assert_eq!(info.log_digest.len(), 66);
    }
}
