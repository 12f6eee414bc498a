//! Activity kinds and their static metadata.

/// Every kind of activity an actor can pursue. Selects the [`Behavior`](super::Behavior).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActivityKind {
    Move,
    Attack,
    Rest,
    Wait,
    Read,
    Craft,
    PickUp,
    Warp,
    OpenDoor,
    CloseDoor,
    Talk,
    UseItem,
    Interact,
}

/// Static, per-kind activity metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityInfo {
    pub kind: ActivityKind,
    /// Display name used in narration.
    pub name: String,
    pub interruptible: bool,
    pub resumable: bool,
    /// AP withdrawn each time the activity consumes a turn.
    pub ap_cost: u32,
    /// AP needed to finish; 0 marks a fixed one-turn action.
    pub total_required_ap: u32,
    pub requires_target: bool,
    pub requires_position: bool,
}

impl ActivityInfo {
    /// True for actions resolved in a single turn regardless of the actor's AP.
    pub fn is_instant(&self) -> bool {
        self.total_required_ap == 0
    }
}

impl ActivityKind {
    /// Built-in metadata table.
    pub fn info(self) -> ActivityInfo {
        use ActivityKind::*;

        // (name, interruptible, resumable, ap_cost, total_required_ap, target, position)
        let (name, interruptible, resumable, ap_cost, total_required_ap, target, position) =
            match self {
                Move => ("move", false, false, 100, 0, false, true),
                Attack => ("attack", false, false, 100, 0, true, false),
                Rest => ("rest", true, true, 100, 1000, false, false),
                Wait => ("wait", true, false, 100, 0, false, false),
                Read => ("read", true, true, 100, 500, false, false),
                Craft => ("craft", true, true, 100, 800, false, false),
                PickUp => ("pick up", false, false, 50, 0, false, false),
                Warp => ("warp", false, false, 100, 0, false, false),
                OpenDoor => ("open door", false, false, 50, 0, false, true),
                CloseDoor => ("close door", false, false, 50, 0, false, true),
                Talk => ("talk", true, false, 50, 0, true, false),
                UseItem => ("use item", false, false, 50, 0, false, false),
                Interact => ("interact", false, false, 50, 0, false, true),
            };

        ActivityInfo {
            kind: self,
            name: name.to_string(),
            interruptible,
            resumable,
            ap_cost,
            total_required_ap,
            requires_target: target,
            requires_position: position,
        }
    }
}

/// Turns an activity needs given the actor's AP.
///
/// `ceil(total_required_ap / actor_ap)` when both are positive, else a single turn.
/// AP-rich actors therefore finish long activities sooner.
pub fn calculate_required_turns(info: &ActivityInfo, actor_ap: u32) -> u32 {
    if info.total_required_ap > 0 && actor_ap > 0 {
        info.total_required_ap.div_ceil(actor_ap)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn with_total(total_required_ap: u32) -> ActivityInfo {
        ActivityInfo {
            total_required_ap,
            ..ActivityKind::Rest.info()
        }
    }

    #[test]
    fn required_turns_uses_ceiling_division() {
        assert_eq!(calculate_required_turns(&with_total(1000), 100), 10);
        assert_eq!(calculate_required_turns(&with_total(1000), 334), 3);
        assert_eq!(calculate_required_turns(&with_total(1000), 1000), 1);
        assert_eq!(calculate_required_turns(&with_total(1000), 5000), 1);
    }

    #[test]
    fn zero_total_or_zero_ap_is_one_turn() {
        assert_eq!(calculate_required_turns(&with_total(0), 100), 1);
        assert_eq!(calculate_required_turns(&with_total(0), 0), 1);
        assert_eq!(calculate_required_turns(&with_total(1000), 0), 1);
    }

    #[test]
    fn instant_kinds_default_to_one_turn() {
        for kind in [
            ActivityKind::Move,
            ActivityKind::Attack,
            ActivityKind::PickUp,
            ActivityKind::Warp,
            ActivityKind::Talk,
            ActivityKind::OpenDoor,
            ActivityKind::CloseDoor,
        ] {
            assert_eq!(calculate_required_turns(&kind.info(), 37), 1, "{kind}");
        }
    }

    #[test]
    fn info_table_is_keyed_by_kind() {
        for kind in ActivityKind::iter() {
            assert_eq!(kind.info().kind, kind);
        }
    }

    #[test]
    fn kind_parses_from_snake_case() {
        assert_eq!("open_door".parse::<ActivityKind>(), Ok(ActivityKind::OpenDoor));
        assert_eq!(ActivityKind::PickUp.to_string(), "pick_up");
    }
}
