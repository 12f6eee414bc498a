//! Roaming sub-state transitions.
//!
//! An AI actor dwells in Waiting or Driving for a randomized number of turns
//! and then flips to the other. Seeing the player switches either one to
//! Chasing. A chasing actor that loses sight keeps chasing for a short grace
//! period before it goes back to Driving.

use std::ops::RangeInclusive;

use rand::Rng;

use delve_core::{AiConfig, RoamingState, RoamingSubState};

/// Waiting dwell for an actor seen for the first time.
pub const FRESH_WAITING_TURNS: RangeInclusive<u32> = 2..=4;
/// Waiting dwell after a Driving stint.
pub const WAITING_TURNS: RangeInclusive<u32> = 2..=5;
pub const DRIVING_TURNS: RangeInclusive<u32> = 3..=9;
pub const CHASING_TURNS: RangeInclusive<u32> = 10..=14;

/// A sub-state change produced by [`update_state`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: RoamingSubState,
    pub to: RoamingSubState,
}

/// Advances `roaming` by one AI turn.
///
/// `turn` is the global turn number; elapsed time is measured against the
/// turn the current sub-state was entered. Returns the transition taken, if
/// the sub-state changed.
pub fn update_state<R: Rng + ?Sized>(
    roaming: &mut RoamingState,
    sees_target: bool,
    turn: u64,
    config: &AiConfig,
    rng: &mut R,
) -> Option<Transition> {
    use RoamingSubState::*;

    let from = roaming.sub_state;
    match from {
        Uninitialized => enter(roaming, Waiting, turn, rng.gen_range(FRESH_WAITING_TURNS)),
        Waiting | Driving if sees_target => {
            enter(roaming, Chasing, turn, rng.gen_range(CHASING_TURNS));
        }
        Waiting if dwell_expired(roaming, turn) => {
            enter(roaming, Driving, turn, rng.gen_range(DRIVING_TURNS));
        }
        Driving if dwell_expired(roaming, turn) => {
            enter(roaming, Waiting, turn, rng.gen_range(WAITING_TURNS));
        }
        Waiting | Driving => {}
        Chasing if sees_target => {
            roaming.started_at = turn;
            roaming.turns_without_sight = 0;
        }
        Chasing => {
            roaming.turns_without_sight += 1;
            if roaming.turns_without_sight > config.chase_grace_turns {
                enter(roaming, Driving, turn, rng.gen_range(DRIVING_TURNS));
            }
        }
    }

    (roaming.sub_state != from).then_some(Transition {
        from,
        to: roaming.sub_state,
    })
}

fn dwell_expired(roaming: &RoamingState, turn: u64) -> bool {
    roaming.elapsed(turn) >= u64::from(roaming.planned_turns)
}

fn enter(roaming: &mut RoamingState, sub_state: RoamingSubState, turn: u64, planned_turns: u32) {
    *roaming = RoamingState::new(sub_state, turn, planned_turns);
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::PcgRng;

    fn rng() -> PcgRng {
        PcgRng::new(0xDE1E)
    }

    #[test]
    fn fresh_actor_starts_waiting_for_two_to_four_turns() {
        let config = AiConfig::default();
        for seed in 0..64 {
            let mut rng = PcgRng::new(seed);
            let mut roaming = RoamingState::default();
            let change = update_state(&mut roaming, false, 7, &config, &mut rng);

            assert_eq!(
                change,
                Some(Transition {
                    from: RoamingSubState::Uninitialized,
                    to: RoamingSubState::Waiting,
                })
            );
            assert_eq!(roaming.started_at, 7);
            assert!(FRESH_WAITING_TURNS.contains(&roaming.planned_turns));
        }
    }

    #[test]
    fn uninitialized_ignores_sight_on_first_update() {
        let mut roaming = RoamingState::default();
        update_state(&mut roaming, true, 1, &AiConfig::default(), &mut rng());
        assert_eq!(roaming.sub_state, RoamingSubState::Waiting);
    }

    #[test]
    fn waiting_flips_to_driving_once_the_dwell_elapses() {
        let config = AiConfig::default();
        let mut rng = rng();
        let mut roaming = RoamingState::new(RoamingSubState::Waiting, 1, 2);

        assert_eq!(update_state(&mut roaming, false, 2, &config, &mut rng), None);
        assert_eq!(roaming.sub_state, RoamingSubState::Waiting);

        let change = update_state(&mut roaming, false, 3, &config, &mut rng);
        assert_eq!(change.map(|t| t.to), Some(RoamingSubState::Driving));
        assert_eq!(roaming.started_at, 3);
        assert!(DRIVING_TURNS.contains(&roaming.planned_turns));
    }

    #[test]
    fn driving_returns_to_waiting_with_the_longer_range() {
        let config = AiConfig::default();
        for seed in 0..64 {
            let mut rng = PcgRng::new(seed);
            let mut roaming = RoamingState::new(RoamingSubState::Driving, 10, 3);
            update_state(&mut roaming, false, 13, &config, &mut rng);
            assert_eq!(roaming.sub_state, RoamingSubState::Waiting);
            assert!(WAITING_TURNS.contains(&roaming.planned_turns));
        }
    }

    #[test]
    fn sight_switches_waiting_and_driving_to_chasing() {
        let config = AiConfig::default();
        let mut rng = rng();
        for sub_state in [RoamingSubState::Waiting, RoamingSubState::Driving] {
            let mut roaming = RoamingState::new(sub_state, 1, 9);
            let change = update_state(&mut roaming, true, 2, &config, &mut rng);
            assert_eq!(
                change,
                Some(Transition {
                    from: sub_state,
                    to: RoamingSubState::Chasing,
                })
            );
            assert!(CHASING_TURNS.contains(&roaming.planned_turns));
        }
    }

    #[test]
    fn chasing_in_sight_refreshes_the_timer() {
        let config = AiConfig::default();
        let mut roaming = RoamingState::new(RoamingSubState::Chasing, 1, 10);
        roaming.turns_without_sight = 2;

        assert_eq!(update_state(&mut roaming, true, 40, &config, &mut rng()), None);
        assert_eq!(roaming.sub_state, RoamingSubState::Chasing);
        assert_eq!(roaming.started_at, 40);
        assert_eq!(roaming.turns_without_sight, 0);
    }

    #[test]
    fn chase_grace_is_configurable() {
        let config = AiConfig {
            chase_grace_turns: 0,
            ..AiConfig::default()
        };
        let mut roaming = RoamingState::new(RoamingSubState::Chasing, 1, 10);
        let change = update_state(&mut roaming, false, 2, &config, &mut rng());
        assert_eq!(change.map(|t| t.to), Some(RoamingSubState::Driving));
    }
}
