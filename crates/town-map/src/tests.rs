//! Unit tests for town-map.

#[cfg(test)]
mod registry {
    use town_core::Point;

    use crate::{Location, LocationRegistry, MapError};

    #[test]
    fn default_town_has_all_locations() {
        let reg = LocationRegistry::default_town();
        assert_eq!(reg.len(), 23);
        assert_eq!(reg.position("park"), Some(Point::new(100.0, 100.0)));
        assert_eq!(reg.position("windmill"), Some(Point::new(650.0, 350.0)));
        assert!(reg.position("moon").is_none());
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let reg = LocationRegistry::new(vec![
            Location::new("b", 1.0, 1.0),
            Location::new("a", 2.0, 2.0),
        ])
        .unwrap();
        let names: Vec<&str> = reg.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = LocationRegistry::new(vec![
            Location::new("park", 1.0, 1.0),
            Location::new("park", 2.0, 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, MapError::DuplicateLocation(n) if n == "park"));
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use town_core::Point;

    use crate::{load_locations_reader, MapError};

    #[test]
    fn loads_rows() {
        let csv = "name,x,y\npark,100,100\noffice,700.5,150\n";
        let reg = load_locations_reader(Cursor::new(csv)).unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.position("office"), Some(Point::new(700.5, 150.0)));
    }

    #[test]
    fn bad_coordinate_is_parse_error() {
        let csv = "name,x,y\npark,abc,100\n";
        let err = load_locations_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, MapError::Parse(_)));
    }

    #[test]
    fn duplicate_row_rejected() {
        let csv = "name,x,y\npark,1,1\npark,2,2\n";
        assert!(matches!(
            load_locations_reader(Cursor::new(csv)),
            Err(MapError::DuplicateLocation(_))
        ));
    }
}

#[cfg(test)]
mod proximity {
    use town_core::{AgentId, Point};

    use crate::ProximityIndex;

    fn index() -> ProximityIndex {
        ProximityIndex::build([
            (AgentId(3), Point::new(130.0, 100.0)),
            (AgentId(1), Point::new(100.0, 100.0)),
            (AgentId(2), Point::new(150.0, 100.0)),
            (AgentId(4), Point::new(160.0, 100.0)),
        ])
    }

    #[test]
    fn within_is_strict_and_sorted() {
        let idx = index();
        // Agent 4 sits exactly 60 away: excluded.
        assert_eq!(idx.within(Point::new(100.0, 100.0), 60.0, AgentId(1)), vec![AgentId(2), AgentId(3)]);
    }

    #[test]
    fn excludes_self_only() {
        let idx = index();
        let hits = idx.within(Point::new(150.0, 100.0), 15.0, AgentId(2));
        assert_eq!(hits, vec![AgentId(4)]);
        assert_eq!(idx.len(), 4);
    }

    #[test]
    fn empty_index() {
        let idx = ProximityIndex::build(std::iter::empty());
        assert!(idx.is_empty());
        assert!(idx.within(Point::new(0.0, 0.0), 100.0, AgentId(0)).is_empty());
    }
}
