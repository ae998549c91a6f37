//! In-memory capability doubles for unit and property tests.
//!
//! All doubles share state through `Rc<RefCell<..>>` so a test can keep
//! a handle to the same ledger the pool mutates. Token doubles can be
//! switched into a failing mode to exercise transfer-failure rollback.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::{Address, Amount, PoolEvent};
use crate::traits::{AssetToken, Clock, EventSink, ShareToken};

// ---------------------------------------------------------------------------
// MockToken
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct TokenLedger {
    balances: HashMap<Address, Amount>,
    failing: bool,
}

/// An in-memory basket asset. Clones share one ledger.
#[derive(Debug, Clone)]
pub(crate) struct MockToken {
    address: Address,
    ledger: Rc<RefCell<TokenLedger>>,
}

impl MockToken {
    pub(crate) fn new(address: Address) -> Self {
        Self {
            address,
            ledger: Rc::new(RefCell::new(TokenLedger::default())),
        }
    }

    /// Credits `holder` out of thin air, for test setup.
    pub(crate) fn credit(&self, holder: &Address, amount: Amount) {
        let mut ledger = self.ledger.borrow_mut();
        let entry = ledger.balances.entry(*holder).or_insert(Amount::ZERO);
        *entry = entry.checked_add(&amount).unwrap_or(Amount::MAX);
    }

    /// Makes every subsequent transfer report failure.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.ledger.borrow_mut().failing = failing;
    }

    fn move_between(&self, from: &Address, to: &Address, amount: Amount) -> bool {
        let mut ledger = self.ledger.borrow_mut();
        if ledger.failing {
            return false;
        }
        let from_balance = ledger.balances.get(from).copied().unwrap_or(Amount::ZERO);
        let Some(remaining) = from_balance.checked_sub(&amount) else {
            return false;
        };
        ledger.balances.insert(*from, remaining);
        let entry = ledger.balances.entry(*to).or_insert(Amount::ZERO);
        let Some(grown) = entry.checked_add(&amount) else {
            return false;
        };
        *entry = grown;
        true
    }
}

impl AssetToken for MockToken {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, holder: &Address) -> Amount {
        self.ledger
            .borrow()
            .balances
            .get(holder)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(&mut self, to: &Address, amount: Amount) -> bool {
        // The pool transfers out of its own balance; the pool address is
        // the conventional sender in these tests.
        self.move_between(&POOL, to, amount)
    }

    fn transfer_from(&mut self, from: &Address, to: &Address, amount: Amount) -> bool {
        self.move_between(from, to, amount)
    }
}

// ---------------------------------------------------------------------------
// MockShares
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct ShareLedger {
    balances: HashMap<Address, Amount>,
    supply: Amount,
}

/// An in-memory share token. Clones share one ledger.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockShares {
    ledger: Rc<RefCell<ShareLedger>>,
}

impl MockShares {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl ShareToken for MockShares {
    fn mint(&mut self, to: &Address, amount: Amount) -> bool {
        let mut ledger = self.ledger.borrow_mut();
        let Some(supply) = ledger.supply.checked_add(&amount) else {
            return false;
        };
        ledger.supply = supply;
        let entry = ledger.balances.entry(*to).or_insert(Amount::ZERO);
        let Some(grown) = entry.checked_add(&amount) else {
            return false;
        };
        *entry = grown;
        true
    }

    fn burn(&mut self, from: &Address, amount: Amount) -> bool {
        let mut ledger = self.ledger.borrow_mut();
        let held = ledger.balances.get(from).copied().unwrap_or(Amount::ZERO);
        let Some(remaining) = held.checked_sub(&amount) else {
            return false;
        };
        let Some(supply) = ledger.supply.checked_sub(&amount) else {
            return false;
        };
        ledger.balances.insert(*from, remaining);
        ledger.supply = supply;
        true
    }

    fn balance_of(&self, holder: &Address) -> Amount {
        self.ledger
            .borrow()
            .balances
            .get(holder)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn total_supply(&self) -> Amount {
        self.ledger.borrow().supply
    }
}

// ---------------------------------------------------------------------------
// MockClock
// ---------------------------------------------------------------------------

/// A settable clock. Clones share one instant.
#[derive(Debug, Clone)]
pub(crate) struct MockClock {
    now: Rc<Cell<u64>>,
}

impl MockClock {
    pub(crate) fn new(now: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub(crate) fn advance(&self, seconds: u64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for MockClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// A sink that appends every event to a shared vector.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingSink {
    events: Rc<RefCell<Vec<PoolEvent>>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn recorded(&self) -> Vec<PoolEvent> {
        self.events.borrow().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: PoolEvent) {
        self.events.borrow_mut().push(event);
    }
}

// ---------------------------------------------------------------------------
// Well-known test addresses
// ---------------------------------------------------------------------------

pub(crate) const POOL: Address = Address::from_bytes([0xF0u8; 32]);
pub(crate) const OWNER: Address = Address::from_bytes([0xAAu8; 32]);
pub(crate) const ALICE: Address = Address::from_bytes([0x01u8; 32]);
pub(crate) const BOB: Address = Address::from_bytes([0x02u8; 32]);
