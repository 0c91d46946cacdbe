//! Route network editing.

use orbitlink_core::components::RouteState;
use orbitlink_core::constants::FIRST_ROUTE_ID;
use orbitlink_core::error::RouteError;
use orbitlink_core::state::PersistedState;

/// Connect two planets. A→B and B→A count as the same connection.
pub fn create_route(
    state: &mut PersistedState,
    source_planet_id: u32,
    target_planet_id: u32,
) -> Result<u32, RouteError> {
    if source_planet_id == target_planet_id {
        return Err(RouteError::SamePlanet {
            planet_id: source_planet_id,
        });
    }
    for planet_id in [source_planet_id, target_planet_id] {
        if state.planet(planet_id).is_none() {
            return Err(RouteError::UnknownPlanet { planet_id });
        }
    }
    if let Some(existing) = state
        .routes
        .iter()
        .find(|r| r.connects(source_planet_id, target_planet_id))
    {
        return Err(RouteError::DuplicateRoute {
            existing_route_id: existing.route_id,
        });
    }

    let route_id = next_route_id(&state.routes).ok_or(RouteError::RouteIdsExhausted)?;
    state
        .routes
        .push(RouteState::new(route_id, source_planet_id, target_planet_id));
    Ok(route_id)
}

/// Remove a route. Ships still on it despawn on their next advance.
pub fn delete_route(state: &mut PersistedState, route_id: u32) -> Result<RouteState, RouteError> {
    let index = state
        .routes
        .iter()
        .position(|r| r.route_id == route_id)
        .ok_or(RouteError::UnknownRoute { route_id })?;
    Ok(state.routes.remove(index))
}

/// One past the highest id in use, or `None` once `u32::MAX` is taken.
fn next_route_id(routes: &[RouteState]) -> Option<u32> {
    match routes.iter().map(|r| r.route_id).max() {
        Some(max) => max.checked_add(1),
        None => Some(FIRST_ROUTE_ID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitlink_core::components::PlanetState;

    fn three_planets() -> PersistedState {
        PersistedState {
            planets: vec![
                PlanetState::new(1, 3.0, 0.5, 0.0),
                PlanetState::new(2, 6.0, 0.2, 0.0),
                PlanetState::new(3, 9.0, 0.1, 0.0),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn first_route_gets_base_id() {
        let mut state = three_planets();
        assert_eq!(create_route(&mut state, 1, 2), Ok(101));
        assert_eq!(create_route(&mut state, 2, 3), Ok(102));
        assert_eq!(state.routes.len(), 2);
    }

    #[test]
    fn ids_continue_past_the_highest() {
        let mut state = three_planets();
        state.routes.push(RouteState::new(250, 1, 2));
        assert_eq!(create_route(&mut state, 1, 3), Ok(251));
    }

    #[test]
    fn create_fails_cleanly_when_ids_run_out() {
        let mut state = three_planets();
        state.routes.push(RouteState::new(u32::MAX, 1, 2));
        assert_eq!(
            create_route(&mut state, 2, 3),
            Err(RouteError::RouteIdsExhausted)
        );
        assert_eq!(state.routes.len(), 1);

        // Freeing the top id makes room again.
        delete_route(&mut state, u32::MAX).unwrap();
        assert_eq!(create_route(&mut state, 2, 3), Ok(101));
    }

    #[test]
    fn rejects_invalid_connections() {
        let mut state = three_planets();
        assert_eq!(
            create_route(&mut state, 2, 2),
            Err(RouteError::SamePlanet { planet_id: 2 })
        );
        assert_eq!(
            create_route(&mut state, 1, 9),
            Err(RouteError::UnknownPlanet { planet_id: 9 })
        );

        create_route(&mut state, 1, 2).unwrap();
        assert_eq!(
            create_route(&mut state, 2, 1),
            Err(RouteError::DuplicateRoute {
                existing_route_id: 101
            })
        );
        assert_eq!(state.routes.len(), 1);
    }

    #[test]
    fn delete_returns_removed_route() {
        let mut state = three_planets();
        create_route(&mut state, 1, 2).unwrap();
        create_route(&mut state, 2, 3).unwrap();

        let removed = delete_route(&mut state, 101).unwrap();
        assert!(removed.connects(1, 2));
        assert_eq!(state.routes.len(), 1);
        assert_eq!(
            delete_route(&mut state, 101),
            Err(RouteError::UnknownRoute { route_id: 101 })
        );
    }
}
