//! Unit tests for town-agent.

#[cfg(test)]
mod activity {
    use town_core::{Millis, Point};

    use crate::{Activity, ActivityState};

    #[test]
    fn stored_variants_map_to_reported_states() {
        assert_eq!(Activity::Moving.state(), ActivityState::Moving);
        assert_eq!(Activity::Working { started: Millis(1) }.state(), ActivityState::Working);
        let ex = Activity::Exploring {
            started: Millis(1),
            base:    Point::new(0.0, 0.0),
            target:  Point::new(1.0, 1.0),
        };
        assert_eq!(ex.state(), ActivityState::Exploring);
        assert_eq!(
            Activity::RegeneratingTasks { since: Millis(1) }.state().to_string(),
            "regenerating_tasks"
        );
        assert_eq!(ActivityState::Idle.as_str(), "idle");
    }
}

#[cfg(test)]
mod conversation {
    use crate::ConversationLog;

    #[test]
    fn append_does_not_touch_snapshots() {
        let mut log = ConversationLog::default();
        log.push("Dante", "Hi", true);
        let snapshot = log.clone();
        log.push("Diana", "Hello", false);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|e| e.from_self), Some(false));
    }
}

#[cfg(test)]
mod frames {
    use town_core::Facing;

    use crate::FrameCounts;

    #[test]
    fn per_facing_counts_never_zero() {
        let f = FrameCounts { up: 4, down: 6, left: 0, right: 2 };
        assert_eq!(f.for_facing(Facing::Up), 4);
        assert_eq!(f.for_facing(Facing::Left), 1);
        assert_eq!(FrameCounts::default().for_facing(Facing::Right), 6);
    }
}

#[cfg(test)]
mod store {
    use town_core::{AgentId, CoreError, Point};
    use town_schedule::{ResidentDef, Roster, TaskGenerator, PLAYER_PERSONALITY};

    use crate::{Activity, AgentStoreBuilder, Control};

    fn town() -> crate::AgentStore {
        let (store, _) = AgentStoreBuilder::new(42)
            .roster(&Roster::default_town())
            .build(&TaskGenerator::default())
            .unwrap();
        store
    }

    #[test]
    fn builds_default_town() {
        let store = town();
        assert_eq!(store.len(), 7);
        assert_eq!(store.player(), Some(AgentId(6)));

        let dante = store.get(AgentId(0)).unwrap();
        assert_eq!(dante.name, "Dante");
        assert_eq!(dante.position, Point::new(50.0, 100.0));
        assert_eq!(dante.activity, Activity::Moving);
        assert_eq!(dante.base_tasks.len(), 5);
        assert!((7..=8).contains(&dante.goals.len()));
        assert_eq!(dante.personality, dante.keywords);

        let prota = store.get(AgentId(6)).unwrap();
        assert_eq!(prota.control, Control::Player { target: None });
        assert_eq!(prota.personality, PLAYER_PERSONALITY);
        assert_eq!(prota.goals.len(), 1);
    }

    #[test]
    fn find_by_name_matches_exactly() {
        let store = town();
        assert_eq!(store.find_by_name("Prota").map(|a| a.id), Some(AgentId(6)));
        assert!(store.find_by_name("prota").is_none());
    }

    #[test]
    fn replace_swaps_whole_record() {
        let mut store = town();
        let mut next = store.get(AgentId(1)).unwrap().clone();
        next.position = Point::new(1.0, 2.0);
        let old = store.replace(next).unwrap();
        assert_eq!(old.position, Point::new(150.0, 150.0));
        assert_eq!(store.get(AgentId(1)).unwrap().position, Point::new(1.0, 2.0));
    }

    #[test]
    fn replace_unknown_id_fails() {
        let mut store = town();
        let mut ghost = store.get(AgentId(0)).unwrap().clone();
        ghost.id = AgentId(50);
        assert!(matches!(store.replace(ghost), Err(CoreError::AgentNotFound(AgentId(50)))));
    }

    #[test]
    fn rejects_duplicate_names_and_two_players() {
        let tg = TaskGenerator::default();
        let a = ResidentDef::resident(0, "A", (0.0, 0.0), "", &[("x", "park")]);
        let dup = ResidentDef::resident(1, "A", (0.0, 0.0), "", &[("x", "park")]);
        assert!(AgentStoreBuilder::new(1).resident(a.clone()).resident(dup).build(&tg).is_err());

        let p1 = ResidentDef::player(0, "P1", (0.0, 0.0), &[]);
        let p2 = ResidentDef::player(1, "P2", (0.0, 0.0), &[]);
        assert!(AgentStoreBuilder::new(1).resident(p1).resident(p2).build(&tg).is_err());
    }

    #[test]
    fn rejects_sparse_ids() {
        let tg = TaskGenerator::default();
        let a = ResidentDef::resident(3, "A", (0.0, 0.0), "", &[]);
        assert!(matches!(
            AgentStoreBuilder::new(1).resident(a).build(&tg),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn same_seed_same_goal_order() {
        let a = town();
        let b = town();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.goals.goals(), y.goals.goals());
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_derives {
    use crate::{ActivityState, ConversationEntry};

    fn assert_serde<T: serde::Serialize + serde::de::DeserializeOwned>() {}

    #[test]
    fn exported_records_are_serde() {
        assert_serde::<ActivityState>();
        assert_serde::<ConversationEntry>();
    }
}
