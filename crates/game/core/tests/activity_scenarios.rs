use delve_core::{
    ActionApi, ActionApiError, ActionOutcome, ActionRequest, ActivityKind, ActorState, EntityId,
    Faction, GameConfig, GameEnv, GameState, ManagerError, MessageLog, Position, PropState,
    ResourceMeter, TickOutcome, World, WorldMap,
};

fn dungeon() -> GameState {
    let mut state = GameState::new(WorldMap::bordered(12, 12), 100);
    state
        .add_actor(
            ActorState::new(EntityId::PLAYER, "hero", Position::new(5, 5), Faction::Player)
                .with_hp(ResourceMeter::new(2, 20))
                .with_ap(100),
        )
        .unwrap();
    state
}

#[test]
fn rest_runs_ten_turns_then_evicts() {
    let config = GameConfig::default();
    let mut state = dungeon();
    let mut log = MessageLog::default();
    let mut world = World::new(&mut state, GameEnv::new(&config)).with_narrator(&mut log);
    let mut api = ActionApi::new();

    let result = api
        .execute(ActionRequest::rest(EntityId::PLAYER), &mut world)
        .unwrap();
    assert_eq!(result.outcome, ActionOutcome::Started { turns: 10 });

    for turn in 1..=10 {
        let report = api.advance_turn(&mut world);
        let tick = report.for_actor(EntityId::PLAYER).unwrap();
        if turn < 10 {
            assert_eq!(tick.outcome, TickOutcome::Continuing);
            let activity = api.manager().current_activity(EntityId::PLAYER).unwrap();
            assert_eq!(activity.turns_left(), 10 - turn);
        } else {
            assert_eq!(tick.outcome, TickOutcome::Completed);
        }
    }

    assert!(!api.manager().has_activity(EntityId::PLAYER));
    assert_eq!(
        world.state.entities.actor(EntityId::PLAYER).unwrap().hp.current,
        12
    );
    drop(world);
    assert_eq!(log.last(), Some("hero feels rested."));
}

#[test]
fn rest_with_enemy_in_reach_never_registers() {
    let config = GameConfig::default();
    let mut state = dungeon();
    state
        .add_actor(ActorState::new(
            EntityId(1),
            "skeleton",
            Position::new(4, 6),
            Faction::Hostile,
        ))
        .unwrap();
    let mut world = World::new(&mut state, GameEnv::new(&config));
    let mut api = ActionApi::new();

    let err = api
        .execute(ActionRequest::rest(EntityId::PLAYER), &mut world)
        .unwrap_err();

    assert!(api.manager().is_empty());
    match err {
        ActionApiError::Manager(ManagerError::Phase(phase)) => {
            assert!(phase.to_string().contains("enemies nearby"), "{phase}");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn open_door_twice_reports_success_both_times() {
    let config = GameConfig::default();
    let mut state = dungeon();
    let door = Position::new(6, 5);
    let id = state.allocate_entity_id();
    state.add_prop(PropState::door(id, door, false)).unwrap();
    let mut world = World::new(&mut state, GameEnv::new(&config));
    let mut api = ActionApi::new();

    for _ in 0..2 {
        let result = api
            .execute(ActionRequest::open_door(EntityId::PLAYER, door), &mut world)
            .unwrap();
        assert_eq!(result.outcome, ActionOutcome::Completed);
    }

    let prop = world.state.entities.prop_at(door).unwrap();
    assert!(prop.is_open());
    assert!(!prop.blocks_movement());
    assert!(!prop.blocks_view());
    assert!(world.state.can_enter(door));
}

#[test]
fn enemy_arrival_interrupts_rest_with_narration() {
    let config = GameConfig::default();
    let mut state = dungeon();
    let mut log = MessageLog::default();
    let mut world = World::new(&mut state, GameEnv::new(&config)).with_narrator(&mut log);
    let mut api = ActionApi::new();

    api.execute(ActionRequest::rest(EntityId::PLAYER), &mut world)
        .unwrap();
    api.advance_turn(&mut world);
    world
        .state
        .add_actor(ActorState::new(
            EntityId(1),
            "wolf",
            Position::new(6, 6),
            Faction::Hostile,
        ))
        .unwrap();

    let report = api.advance_turn(&mut world);
    assert_eq!(report.canceled().count(), 1);
    assert!(api.manager().is_empty());

    drop(world);
    let last = log.last().unwrap();
    assert!(last.starts_with("activity interrupted:"), "{last}");
}

#[test]
fn starting_a_new_activity_pauses_the_old_one() {
    let config = GameConfig::default();
    let mut state = dungeon();
    let mut world = World::new(&mut state, GameEnv::new(&config));
    let mut api = ActionApi::new();

    api.execute(ActionRequest::rest(EntityId::PLAYER), &mut world)
        .unwrap();
    api.execute(ActionRequest::wait_for(EntityId::PLAYER, 3), &mut world)
        .unwrap();

    let current = api.manager().current_activity(EntityId::PLAYER).unwrap();
    assert_eq!(current.kind(), ActivityKind::Wait);
    assert_eq!(api.manager().len(), 1);
}

#[test]
fn continuous_activity_charges_player_every_turn() {
    let config = GameConfig::default();
    let mut state = dungeon();
    let mut world = World::new(&mut state, GameEnv::new(&config));
    let mut api = ActionApi::new();

    api.execute(ActionRequest::wait_for(EntityId::PLAYER, 2), &mut world)
        .unwrap();
    assert_eq!(world.state.turn.player_moves, 100);

    api.advance_turn(&mut world);
    assert_eq!(world.state.turn.player_moves, 0);
}
