//! Ledger: wallet credits, purchases and upgrade pricing.
//!
//! Balances live in `PersistedState`; these functions are the only code that
//! changes the wallet outside a prestige reset.

use orbitlink_core::error::PurchaseError;
use orbitlink_core::events::{ShipArrival, SimEvent};
use orbitlink_core::state::PersistedState;

/// Credits earned for one arrival. Flat for now; the arrival carries the
/// route and target planet for tiered payouts.
#[inline]
pub fn arrival_payout(_arrival: &ShipArrival, base_payout: f64) -> f64 {
    base_payout
}

/// Pay out an arrival and announce the new balance. Returns the payout.
pub fn credit_arrival(
    state: &mut PersistedState,
    arrival: &ShipArrival,
    base_payout: f64,
    events: &mut Vec<SimEvent>,
) -> f64 {
    let payout = arrival_payout(arrival, base_payout);
    state.wallet_balance += payout;
    events.push(SimEvent::BalanceChanged {
        wallet_balance: state.wallet_balance,
    });
    payout
}

/// Debit `cost` if the wallet covers it. On failure nothing changes.
pub fn try_purchase(
    state: &mut PersistedState,
    cost: f64,
    events: &mut Vec<SimEvent>,
) -> Result<(), PurchaseError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(PurchaseError::InvalidCost { cost });
    }
    if state.wallet_balance < cost {
        return Err(PurchaseError::InsufficientFunds {
            cost,
            balance: state.wallet_balance,
        });
    }
    state.wallet_balance -= cost;
    events.push(SimEvent::BalanceChanged {
        wallet_balance: state.wallet_balance,
    });
    Ok(())
}

/// Exponential upgrade pricing: `base * multiplier^level`.
#[inline]
pub fn upgrade_cost(base: f64, multiplier: f64, level: u32) -> f64 {
    base * multiplier.powf(level as f64)
}
