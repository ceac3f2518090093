//! Unit tests for town-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, LeaseId, TicketId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(6);
        assert_eq!(id.index(), 6);
        assert_eq!(AgentId::from_index(6), Some(id));
        assert_eq!(AgentId::from_index(usize::MAX), None);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(3).to_string(), "agent#3");
        assert_eq!(TicketId(12).to_string(), "ticket#12");
        assert_eq!(LeaseId(1).to_string(), "lease#1");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Bounds, Point};

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(30.0, 40.0);
        assert!((a.distance(b) - 50.0).abs() < 1e-5);
        assert_eq!(a.delta_to(b), Point::new(30.0, 40.0));
    }

    #[test]
    fn clamp_pins_each_axis() {
        let b = Bounds::new(Point::new(0.0, 0.0), Point::new(752.0, 552.0));
        assert_eq!(b.clamp(Point::new(-3.0, 600.0)), Point::new(0.0, 552.0));
        assert_eq!(b.clamp(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
        assert!(b.contains(Point::new(752.0, 0.0)));
        assert!(!b.contains(Point::new(752.1, 0.0)));
    }
}

#[cfg(test)]
mod time {
    use crate::{Millis, SimClock, Tick};

    #[test]
    fn animation_ticks() {
        assert!(Tick(0).is_animation_tick(15));
        assert!(Tick(30).is_animation_tick(15));
        assert!(!Tick(31).is_animation_tick(15));
        assert!(!Tick(30).is_animation_tick(0));
    }

    #[test]
    fn millis_since_saturates() {
        assert_eq!(Millis(5_000).since(Millis(1_000)), 4_000);
        assert_eq!(Millis(1_000).since(Millis(5_000)), 0);
        assert!(Millis(6_000).has_elapsed(Millis(1_000), 5_000));
        assert!(!Millis(5_999).has_elapsed(Millis(1_000), 5_000));
    }

    #[test]
    fn clock_maps_ticks_to_millis() {
        let mut clock = SimClock::new(1_000, 16);
        assert_eq!(clock.now(), Millis(1_000));
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.now(), Millis(1_032));
        assert_eq!(clock.ticks_for_ms(5_000), 313);
    }
}

#[cfg(test)]
mod facing {
    use crate::Facing;

    #[test]
    fn horizontal_wins_only_when_strictly_larger() {
        assert_eq!(Facing::from_step(1.0, 0.5), Facing::Right);
        assert_eq!(Facing::from_step(-1.0, 0.5), Facing::Left);
        assert_eq!(Facing::from_step(0.5, 0.5), Facing::Down);
        assert_eq!(Facing::from_step(0.5, -0.6), Facing::Up);
    }

    #[test]
    fn vertical_wins_ties() {
        assert_eq!(Facing::from_step(1.0, 1.0), Facing::Down);
        assert_eq!(Facing::from_step(-2.0, -2.0), Facing::Up);
    }

    #[test]
    fn hysteresis_keeps_current_facing_near_diagonal() {
        assert_eq!(Facing::Up.with_hysteresis(1.0, 0.8, 0.3), Facing::Up);
        assert_eq!(Facing::Up.with_hysteresis(1.0, 0.6, 0.3), Facing::Right);
        assert_eq!(Facing::Left.with_hysteresis(0.1, 0.9, 0.3), Facing::Down);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Facing::Right.to_string(), "right");
        assert_eq!(Facing::default(), Facing::Down);
    }
}

#[cfg(test)]
mod rng {
    use crate::rng::agent_seed;
    use crate::{AgentId, AgentRng};

    #[test]
    fn same_seed_same_stream() {
        let mut a = AgentRng::new(7, AgentId(2));
        let mut b = AgentRng::new(7, AgentId(2));
        let xs: Vec<f64> = (0..8).map(|_| a.unit()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.unit()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn agents_get_distinct_streams() {
        assert_ne!(agent_seed(7, AgentId(1)), agent_seed(7, AgentId(2)));
        let mut a = AgentRng::new(7, AgentId(1));
        let mut b = AgentRng::new(7, AgentId(2));
        let xs: Vec<f64> = (0..4).map(|_| a.unit()).collect();
        let ys: Vec<f64> = (0..4).map(|_| b.unit()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn chance_extremes() {
        let mut r = AgentRng::new(1, AgentId(0));
        for _ in 0..100 {
            assert!(r.chance(1.0));
            assert!(!r.chance(0.0));
        }
    }

    #[test]
    fn ranges_hold() {
        let mut r = AgentRng::new(5, AgentId(3));
        for _ in 0..200 {
            let h = r.heading();
            assert!((0.0..std::f32::consts::TAU).contains(&h));
            assert!(r.below(50.0) < 50.0);
            assert!((2..=3).contains(&r.count_between(2, 3)));
        }
        assert_eq!(r.below(0.0), 0.0);
        assert_eq!(r.count_between(4, 1), 4);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut r = AgentRng::new(3, AgentId(4));
        let mut v: Vec<u32> = (0..20).collect();
        r.shuffle(&mut v);
        v.sort_unstable();
        assert_eq!(v, (0..20).collect::<Vec<_>>());
    }
}

#[cfg(test)]
mod config {
    use crate::{Millis, Point, TownConfig};

    #[test]
    fn default_is_valid() {
        TownConfig::default().validate().unwrap();
    }

    #[test]
    fn busy_window_matches_choreography() {
        let c = TownConfig::default();
        assert_eq!(c.line_span_ms(), 6_000);
        assert_eq!(c.encounter_busy_ms(1), 7_000);
        assert_eq!(c.encounter_busy_ms(2), 13_000);
        // Capped at two lines.
        assert_eq!(c.encounter_busy_ms(5), 13_000);
    }

    #[test]
    fn bounds_have_tile_margins() {
        let c = TownConfig::default();
        assert_eq!(c.agent_bounds().max, Point::new(752.0, 552.0));
        assert_eq!(c.exploration_bounds().min, Point::new(48.0, 48.0));
        assert_eq!(c.player_bounds().min, Point::new(24.0, 24.0));
        assert_eq!(c.player_bounds().max, Point::new(776.0, 576.0));
    }

    #[test]
    fn rejects_bad_probability() {
        let c = TownConfig { interaction_probability: 1.5, ..TownConfig::default() };
        assert!(c.validate().is_err());
        let c = TownConfig { tick_duration_ms: 0, ..TownConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn clock_uses_tick_duration() {
        let c = TownConfig::default();
        let mut clock = c.make_clock(Millis(0));
        clock.advance();
        assert_eq!(clock.now(), Millis(16));
    }
}
