//! In-memory collaborators and a ready-made treasury fixture for tests.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use alloy_primitives::{Address, U256};
use chrono::Duration;

use crate::{
    collaborators::{
        Checkpoint, Collaborators, CommunityFund, IndexOracle, ManagedToken, Operated,
        PriceOracle, SeigniorageDistributor,
    },
    constants::scale,
    treasury::{settings::TreasurySettings, Treasury},
    types::ExecutionContext,
    utils::error::{collaborator_err, TreasuryResult},
};

pub const START: u64 = 1_700_000_000;
pub const DAY: u64 = 86_400;

pub fn e18(value: u64) -> U256 {
    U256::from(value) * scale()
}

/// `value / 100` in 1e18 units
pub fn percent(value: u64) -> U256 {
    e18(value) / U256::from(100)
}

pub fn treasury_address() -> Address {
    Address::repeat_byte(0x7e)
}

pub fn governance_address() -> Address {
    Address::repeat_byte(0x90)
}

pub fn user_address() -> Address {
    Address::repeat_byte(0x05)
}

pub fn successor_address() -> Address {
    Address::repeat_byte(0x5c)
}

#[derive(Clone, Debug, Default)]
struct LedgerState {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    total_supply: U256,
    operator: Address,
    owner: Address,
}

#[derive(Debug, Default)]
struct LedgerBook {
    state: LedgerState,
    checkpoints: Vec<LedgerState>,
}

/// ERC-20 style ledger with an operator and an owner. Clones share the book.
#[derive(Clone, Debug)]
pub struct InMemoryToken {
    address: Address,
    book: Rc<RefCell<LedgerBook>>,
}

impl InMemoryToken {
    pub fn new(address: Address, operator: Address) -> Self {
        let book = LedgerBook {
            state: LedgerState {
                operator,
                owner: operator,
                ..Default::default()
            },
            checkpoints: vec![],
        };
        Self {
            address,
            book: Rc::new(RefCell::new(book)),
        }
    }

    /// Mints outside of any permission check.
    pub fn credit(&self, holder: Address, amount: U256) {
        let mut book = self.book.borrow_mut();
        *book.state.balances.entry(holder).or_default() += amount;
        book.state.total_supply += amount;
    }

    pub fn set_operator(&self, operator: Address) {
        self.book.borrow_mut().state.operator = operator;
    }

    pub fn set_owner(&self, owner: Address) {
        self.book.borrow_mut().state.owner = owner;
    }

    /// Sets an allowance outside of any permission check.
    pub fn grant(&self, holder: Address, spender: Address, amount: U256) {
        self.book
            .borrow_mut()
            .state
            .allowances
            .insert((holder, spender), amount);
    }

    /// Moves `amount` from `holder` to `to`, spending the allowance of `spender`.
    pub fn transfer_from(
        &self,
        spender: Address,
        holder: Address,
        to: Address,
        amount: U256,
    ) -> TreasuryResult<()> {
        let mut book = self.book.borrow_mut();
        book.spend_allowance(holder, spender, amount)?;
        book.move_balance(holder, to, amount)
    }
}

impl LedgerBook {
    fn require_operator(&self, caller: Address) -> TreasuryResult<()> {
        if caller != self.state.operator {
            return Err(collaborator_err(format!("{} is not the operator", caller)));
        }
        Ok(())
    }

    fn require_owner(&self, caller: Address) -> TreasuryResult<()> {
        if caller != self.state.owner {
            return Err(collaborator_err(format!("{} is not the owner", caller)));
        }
        Ok(())
    }

    fn debit(&mut self, holder: Address, amount: U256) -> TreasuryResult<()> {
        let balance = self.state.balances.entry(holder).or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or_else(|| collaborator_err("transfer amount exceeds balance"))?;
        Ok(())
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) -> TreasuryResult<()> {
        self.debit(from, amount)?;
        *self.state.balances.entry(to).or_default() += amount;
        Ok(())
    }

    fn spend_allowance(&mut self, holder: Address, spender: Address, amount: U256) -> TreasuryResult<()> {
        let allowance = self.state.allowances.entry((holder, spender)).or_default();
        *allowance = allowance
            .checked_sub(amount)
            .ok_or_else(|| collaborator_err("amount exceeds allowance"))?;
        Ok(())
    }

    fn destroy(&mut self, holder: Address, amount: U256) -> TreasuryResult<()> {
        self.debit(holder, amount)?;
        self.state.total_supply -= amount;
        Ok(())
    }
}

impl Checkpoint for InMemoryToken {
    fn checkpoint(&mut self) {
        let mut book = self.book.borrow_mut();
        let snapshot = book.state.clone();
        book.checkpoints.push(snapshot);
    }

    fn commit(&mut self) {
        self.book.borrow_mut().checkpoints.pop();
    }

    fn rollback(&mut self) {
        let mut book = self.book.borrow_mut();
        if let Some(snapshot) = book.checkpoints.pop() {
            book.state = snapshot;
        }
    }
}

impl Operated for InMemoryToken {
    fn address(&self) -> Address {
        self.address
    }

    fn operator(&self) -> Address {
        self.book.borrow().state.operator
    }

    fn owner(&self) -> Option<Address> {
        Some(self.book.borrow().state.owner)
    }
}

impl ManagedToken for InMemoryToken {
    fn total_supply(&self) -> U256 {
        self.book.borrow().state.total_supply
    }

    fn balance_of(&self, holder: Address) -> U256 {
        self.book
            .borrow()
            .state
            .balances
            .get(&holder)
            .copied()
            .unwrap_or_default()
    }

    fn mint(&mut self, caller: Address, to: Address, amount: U256) -> TreasuryResult<()> {
        let mut book = self.book.borrow_mut();
        book.require_operator(caller)?;
        *book.state.balances.entry(to).or_default() += amount;
        book.state.total_supply += amount;
        Ok(())
    }

    fn burn(&mut self, caller: Address, amount: U256) -> TreasuryResult<()> {
        let mut book = self.book.borrow_mut();
        book.require_operator(caller)?;
        book.destroy(caller, amount)
    }

    fn burn_from(&mut self, caller: Address, holder: Address, amount: U256) -> TreasuryResult<()> {
        let mut book = self.book.borrow_mut();
        book.require_operator(caller)?;
        book.spend_allowance(holder, caller, amount)?;
        book.destroy(holder, amount)
    }

    fn transfer(&mut self, caller: Address, to: Address, amount: U256) -> TreasuryResult<()> {
        self.book.borrow_mut().move_balance(caller, to, amount)
    }

    fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> TreasuryResult<()> {
        self.grant(caller, spender, amount);
        Ok(())
    }

    fn transfer_operator(&mut self, caller: Address, new_operator: Address) -> TreasuryResult<()> {
        let mut book = self.book.borrow_mut();
        book.require_owner(caller)?;
        book.state.operator = new_operator;
        Ok(())
    }

    fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> TreasuryResult<()> {
        let mut book = self.book.borrow_mut();
        book.require_owner(caller)?;
        book.state.owner = new_owner;
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
struct SinkState {
    operator: Address,
    received: Vec<U256>,
    memos: Vec<String>,
}

/// Fund or distributor that pulls the peg asset through its allowance.
#[derive(Clone, Debug)]
pub struct InMemorySink {
    address: Address,
    peg: InMemoryToken,
    state: Rc<RefCell<SinkState>>,
    checkpoints: Rc<RefCell<Vec<SinkState>>>,
}

impl InMemorySink {
    pub fn new(address: Address, peg: &InMemoryToken, operator: Address) -> Self {
        Self {
            address,
            peg: peg.clone(),
            state: Rc::new(RefCell::new(SinkState {
                operator,
                ..Default::default()
            })),
            checkpoints: Rc::new(RefCell::new(vec![])),
        }
    }

    pub fn received(&self) -> Vec<U256> {
        self.state.borrow().received.clone()
    }

    pub fn memos(&self) -> Vec<String> {
        self.state.borrow().memos.clone()
    }

    pub fn set_operator(&self, operator: Address) {
        self.state.borrow_mut().operator = operator;
    }

    fn pull(&mut self, from: Address, amount: U256, memo: Option<&str>) -> TreasuryResult<()> {
        self.peg.transfer_from(self.address, from, self.address, amount)?;
        let mut state = self.state.borrow_mut();
        state.received.push(amount);
        if let Some(memo) = memo {
            state.memos.push(memo.to_string());
        }
        Ok(())
    }
}

impl Checkpoint for InMemorySink {
    fn checkpoint(&mut self) {
        let snapshot = self.state.borrow().clone();
        self.checkpoints.borrow_mut().push(snapshot);
    }

    fn commit(&mut self) {
        self.checkpoints.borrow_mut().pop();
    }

    fn rollback(&mut self) {
        if let Some(snapshot) = self.checkpoints.borrow_mut().pop() {
            *self.state.borrow_mut() = snapshot;
        }
    }
}

impl Operated for InMemorySink {
    fn address(&self) -> Address {
        self.address
    }

    fn operator(&self) -> Address {
        self.state.borrow().operator
    }

    fn owner(&self) -> Option<Address> {
        None
    }
}

impl SeigniorageDistributor for InMemorySink {
    fn allocate_seigniorage(&mut self, caller: Address, amount: U256) -> TreasuryResult<()> {
        if caller != self.state.borrow().operator {
            return Err(collaborator_err("caller is not the operator"));
        }
        self.pull(caller, amount, None)
    }
}

impl CommunityFund for InMemorySink {
    fn address(&self) -> Address {
        self.address
    }

    fn deposit(&mut self, caller: Address, token: Address, amount: U256, memo: &str) -> TreasuryResult<()> {
        if token != self.peg.address() {
            return Err(collaborator_err("unexpected token"));
        }
        self.pull(caller, amount, Some(memo))
    }
}

#[derive(Debug, Default)]
struct FeedState {
    price: Option<U256>,
    index: Option<U256>,
    fail_updates: bool,
    updates: u32,
}

/// Price feed and reference index backed by settable values.
#[derive(Clone, Debug, Default)]
pub struct Feed {
    state: Rc<RefCell<FeedState>>,
}

impl Feed {
    /// `None` makes the next consult fail.
    pub fn set_price(&self, price: Option<U256>) {
        self.state.borrow_mut().price = price;
    }

    /// Sets the target price by writing the matching 8-decimal index value.
    pub fn set_target(&self, target: U256) {
        self.state.borrow_mut().index = Some(target * U256::from(100));
    }

    pub fn fail_index(&self) {
        self.state.borrow_mut().index = None;
    }

    pub fn fail_updates(&self, fail: bool) {
        self.state.borrow_mut().fail_updates = fail;
    }

    pub fn updates(&self) -> u32 {
        self.state.borrow().updates
    }
}

impl PriceOracle for Feed {
    fn consult(&self, _token: Address, _amount_in: U256) -> TreasuryResult<U256> {
        self.state
            .borrow()
            .price
            .ok_or_else(|| collaborator_err("no price"))
    }

    fn update(&mut self) -> TreasuryResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_updates {
            return Err(collaborator_err("period not elapsed"));
        }
        state.updates += 1;
        Ok(())
    }
}

impl IndexOracle for Feed {
    fn latest_value(&self) -> TreasuryResult<U256> {
        self.state
            .borrow()
            .index
            .ok_or_else(|| collaborator_err("index unavailable"))
    }
}

/// A treasury wired to in-memory collaborators, with handles to inspect them.
pub struct World {
    pub treasury: Treasury,
    pub peg: InMemoryToken,
    pub bond: InMemoryToken,
    pub share: InMemoryToken,
    pub distributor: InMemorySink,
    pub fund: InMemorySink,
    pub feed: Feed,
}

impl World {
    /// Treasury starting at [`START`] with daily epochs, a 2% fund rate and
    /// the peg priced exactly at a target of 1.
    pub fn new() -> Self {
        let treasury = treasury_address();
        let peg = InMemoryToken::new(Address::repeat_byte(0xa1), treasury);
        let bond = InMemoryToken::new(Address::repeat_byte(0xb1), treasury);
        let share = InMemoryToken::new(Address::repeat_byte(0xc1), treasury);
        let distributor = InMemorySink::new(Address::repeat_byte(0xd1), &peg, treasury);
        let fund = InMemorySink::new(Address::repeat_byte(0xf1), &peg, treasury);

        let feed = Feed::default();
        feed.set_price(Some(e18(1)));
        feed.set_target(e18(1));

        let mut settings = TreasurySettings::default();
        settings
            .address(treasury)
            .governance(governance_address())
            .start_time(START)
            .period(Duration::days(1))
            .fund_allocation_rate(2);

        let collaborators = Collaborators {
            peg: Box::new(peg.clone()),
            bond: Box::new(bond.clone()),
            share: Box::new(share.clone()),
            distributor: Box::new(distributor.clone()),
            fund: Box::new(fund.clone()),
        };

        let treasury = Treasury::new(
            settings,
            collaborators,
            Box::new(feed.clone()),
            Box::new(feed.clone()),
        )
        .expect("valid settings");

        Self {
            treasury,
            peg,
            bond,
            share,
            distributor,
            fund,
            feed,
        }
    }

    pub fn ctx(caller: Address, slot: u64, now: u64) -> ExecutionContext {
        ExecutionContext::new(caller, slot, now)
    }
}
