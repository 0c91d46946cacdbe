//! Prestige: trade accumulated wealth for dark matter and restart the world.

use orbitlink_core::components::{PlanetState, RouteState};
use orbitlink_core::state::PersistedState;

/// Result of a successful prestige.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrestigeOutcome {
    pub dark_matter_earned: f64,
    pub dark_matter_balance: f64,
}

pub fn can_prestige(state: &PersistedState, threshold: f64) -> bool {
    state.wallet_balance >= threshold
}

/// Reset to `default_world`, keeping dark matter plus `floor(wallet / threshold)`.
///
/// The whole state is replaced in one assignment so no reader can observe a
/// half-reset world. Below the threshold nothing changes.
pub fn trigger(
    state: &mut PersistedState,
    threshold: f64,
    default_world: (Vec<PlanetState>, Vec<RouteState>),
) -> Option<PrestigeOutcome> {
    if !can_prestige(state, threshold) {
        return None;
    }

    let earned = (state.wallet_balance / threshold).floor();
    let retained = state.dark_matter_balance + earned;
    let (planets, routes) = default_world;

    *state = PersistedState {
        wallet_balance: 0.0,
        dark_matter_balance: retained,
        planets,
        routes,
    };

    Some(PrestigeOutcome {
        dark_matter_earned: earned,
        dark_matter_balance: retained,
    })
}
