use std::collections::HashSet;
use std::convert::TryFrom;
use std::fmt;

use tracing::{debug, trace};

use crate::error::Error;
use crate::plan::{Decoding, DigPlan, Direction};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Position { x, y }
    }

    pub fn origin() -> Self {
        Position { x: 0, y: 0 }
    }

    pub fn moved(self, direction: Direction) -> Position {
        use Direction::*;
        let mut position = self;
        match direction {
            Up => position.y -= 1,
            Down => position.y += 1,
            Left => position.x -= 1,
            Right => position.x += 1,
        }
        position
    }

    fn moved_by(self, direction: Direction, distance: u64) -> Position {
        use Direction::*;
        let distance = i64::try_from(distance).unwrap_or(i64::max_value());
        let Position { x, y } = self;
        match direction {
            Up => Position::new(x, y.saturating_sub(distance)),
            Down => Position::new(x, y.saturating_add(distance)),
            Left => Position::new(x.saturating_sub(distance), y),
            Right => Position::new(x.saturating_add(distance), y),
        }
    }

    // Up, down, left, right.
    pub fn adjacent(self) -> impl Iterator<Item = Position> {
        Direction::all().map(move |direction| self.moved(direction))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Bounds {
    pub fn around(position: Position) -> Self {
        Bounds {
            min_x: position.x,
            max_x: position.x,
            min_y: position.y,
            max_y: position.y,
        }
    }

    /// Box around the corners of a plan, found without stepping along each trench.
    pub fn of_plan(plan: &DigPlan, decoding: Decoding) -> Result<Self, Error> {
        let mut position = Position::origin();
        let mut bounds = Bounds::around(position);
        for instruction in plan.instructions(decoding) {
            let instruction = instruction?;
            position = position.moved_by(instruction.direction, instruction.distance);
            bounds.include(position);
        }
        Ok(bounds)
    }

    pub fn include(&mut self, position: Position) {
        self.min_x = self.min_x.min(position.x);
        self.max_x = self.max_x.max(position.x);
        self.min_y = self.min_y.min(position.y);
        self.max_y = self.max_y.max(position.y);
    }

    pub fn width(&self) -> u64 {
        (self.max_x.wrapping_sub(self.min_x) as u64).saturating_add(1)
    }

    pub fn height(&self) -> u64 {
        (self.max_y.wrapping_sub(self.min_y) as u64).saturating_add(1)
    }

    pub fn ensure_within(&self, limit: u64) -> Result<u64, Error> {
        self.width()
            .checked_mul(self.height())
            .filter(|cells| *cells <= limit)
            .ok_or_else(|| Error::GridTooLarge {
                width: self.width(),
                height: self.height(),
                limit,
            })
    }

    pub fn contains(&self, position: Position) -> bool {
        (self.min_x..=self.max_x).contains(&position.x) && (self.min_y..=self.max_y).contains(&position.y)
    }

    // Column and row from the top left corner.
    pub fn offset(&self, position: Position) -> Option<(usize, usize)> {
        if self.contains(position) {
            Some(((position.x - self.min_x) as usize, (position.y - self.min_y) as usize))
        } else {
            None
        }
    }
}

/// The result of tracing a dig plan from the origin.
#[derive(Clone, Debug)]
pub struct Walk {
    route: Vec<Position>,
    bounds: Bounds,
}

impl Walk {
    pub fn trace(plan: &DigPlan, decoding: Decoding) -> Result<Self, Error> {
        let mut position = Position::origin();
        let mut bounds = Bounds::around(position);
        let mut route = vec![position];

        for instruction in plan.instructions(decoding) {
            let instruction = instruction?;
            trace!(?instruction, %position, "digging");
            for _ in 0..instruction.distance {
                position = position.moved(instruction.direction);
                route.push(position);
            }
            bounds.include(position);
        }

        debug!(
            steps = route.len() - 1,
            min_x = bounds.min_x,
            max_x = bounds.max_x,
            min_y = bounds.min_y,
            max_y = bounds.max_y,
            "traced dig plan"
        );

        Ok(Walk { route, bounds })
    }

    pub fn trace_within(plan: &DigPlan, decoding: Decoding, limit: u64) -> Result<Self, Error> {
        Bounds::of_plan(plan, decoding)?.ensure_within(limit)?;
        Self::trace(plan, decoding)
    }

    // Starts at the origin, one entry per step after that.
    pub fn route(&self) -> &[Position] {
        &self.route
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn end(&self) -> Position {
        self.route.last().cloned().unwrap_or_else(Position::origin)
    }

    pub fn boundary(&self) -> HashSet<Position> {
        self.route.iter().cloned().collect()
    }

    pub fn is_closed(&self) -> bool {
        self.end() == Position::origin()
    }

    pub fn ensure_closed(&self) -> Result<(), Error> {
        if self.is_closed() {
            Ok(())
        } else {
            Err(Error::UnclosedPath { end: self.end() })
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use proptest::prelude::*;

    pub(crate) fn rectangle(width: u64, height: u64) -> DigPlan {
        DigPlan::new(vec![
            format!("R {} (#000000)", width),
            format!("D {} (#000000)", height),
            format!("L {} (#000000)", width),
            format!("U {} (#000000)", height),
        ])
    }

    pub(crate) fn lagoon() -> DigPlan {
        DigPlan::new(vec![
            "R 6 (#70c710)",
            "D 5 (#0dc571)",
            "L 2 (#5713f0)",
            "D 2 (#d2c081)",
            "R 2 (#59c680)",
            "D 2 (#411b91)",
            "L 5 (#8ceee2)",
            "U 2 (#caa173)",
            "L 1 (#1b58a2)",
            "U 2 (#caa171)",
            "R 2 (#7807d2)",
            "U 3 (#a77fa3)",
            "L 2 (#015232)",
            "U 2 (#7a21e3)",
        ])
    }

    #[test]
    fn test_rectangle() {
        let walk = Walk::trace(&rectangle(6, 5), Decoding::Direct).unwrap();
        assert!(walk.is_closed());
        assert_eq!(walk.route().len(), 23);
        assert_eq!(walk.boundary().len(), 22);
        assert_eq!(
            walk.bounds(),
            Bounds {
                min_x: 0,
                max_x: 6,
                min_y: 0,
                max_y: 5
            }
        );
        assert_eq!(walk.bounds().width(), 7);
        assert_eq!(walk.bounds().height(), 6);
    }

    #[test]
    fn test_rectangle_encoded() {
        let walk = Walk::trace(&rectangle(6, 5), Decoding::Encoded).unwrap();
        assert_eq!(walk.route(), &[Position::origin()]);
        assert_eq!(walk.bounds(), Bounds::around(Position::origin()));
    }

    #[test]
    fn test_lagoon() {
        let walk = Walk::trace(&lagoon(), Decoding::Direct).unwrap();
        assert!(walk.is_closed());
        assert_eq!(walk.route().len(), 39);
        assert_eq!(walk.boundary().len(), 38);
        assert_eq!(
            walk.bounds(),
            Bounds {
                min_x: 0,
                max_x: 6,
                min_y: 0,
                max_y: 9
            }
        );
    }

    #[test]
    fn test_negative_bounds() {
        let plan = DigPlan::new(vec!["L 3 (#000000)", "U 2 (#000000)", "R 3 (#000000)", "D 2 (#000000)"]);
        let walk = Walk::trace(&plan, Decoding::Direct).unwrap();
        assert_eq!(
            walk.bounds(),
            Bounds {
                min_x: -3,
                max_x: 0,
                min_y: -2,
                max_y: 0
            }
        );
        assert_eq!(walk.bounds().offset(Position::new(-3, -2)), Some((0, 0)));
        assert_eq!(walk.bounds().offset(Position::new(0, 0)), Some((3, 2)));
        assert_eq!(walk.bounds().offset(Position::new(1, 0)), None);
    }

    #[test]
    fn test_unclosed() {
        let plan = DigPlan::new(vec!["R 3 (#000000)", "D 2 (#000000)"]);
        let walk = Walk::trace(&plan, Decoding::Direct).unwrap();
        assert!(!walk.is_closed());
        match walk.ensure_closed() {
            Err(Error::UnclosedPath { end }) => assert_eq!(end, Position::new(3, 2)),
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_aborts_trace() {
        let plan = DigPlan::new(vec!["R 3 (#000000)", "X 2 (#000000)"]);
        assert!(matches!(
            Walk::trace(&plan, Decoding::Direct),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_corner_bounds_match_trace() {
        let walk = Walk::trace(&lagoon(), Decoding::Direct).unwrap();
        assert_eq!(Bounds::of_plan(&lagoon(), Decoding::Direct).unwrap(), walk.bounds());

        let walk = Walk::trace_within(&rectangle(6, 5), Decoding::Direct, 42).unwrap();
        assert_eq!(walk.route().len(), 23);
    }

    #[test]
    fn test_too_large_before_digging() {
        let plan = DigPlan::new((0..40).map(|i| {
            if i % 2 == 0 {
                "R 0 (#fffff0)"
            } else {
                "L 0 (#fffff2)"
            }
        }));
        match Walk::trace_within(&plan, Decoding::Encoded, 10) {
            Err(Error::GridTooLarge { width, height, limit }) => {
                assert_eq!((width, height, limit), (0xfffff + 1, 1, 10));
            }
            other => panic!("Unexpected result {:?}", other.map(|walk| walk.route().len())),
        }

        let plan = DigPlan::new(vec!["R 99999999999 (#000000)", "L 99999999999 (#000000)"]);
        assert!(matches!(
            Walk::trace_within(&plan, Decoding::Direct, 1_000_000),
            Err(Error::GridTooLarge { width: 100_000_000_000, .. })
        ));
    }

    #[test]
    fn test_extreme_distances_saturate() {
        let plan = DigPlan::new(vec![
            "L 99999999999999999999 (#000000)",
            "R 99999999999999999999 (#000000)",
            "R 99999999999999999999 (#000000)",
        ]);
        let bounds = Bounds::of_plan(&plan, Decoding::Direct);
        assert!(matches!(bounds, Err(Error::Parse { .. })));

        let plan = DigPlan::new(vec![
            "L 9223372036854775807 (#000000)",
            "R 18446744073709551615 (#000000)",
            "R 18446744073709551615 (#000000)",
        ]);
        let bounds = Bounds::of_plan(&plan, Decoding::Direct).unwrap();
        assert_eq!(bounds.width(), u64::max_value());
        assert!(matches!(bounds.ensure_within(1_000_000), Err(Error::GridTooLarge { .. })));
    }

    #[test]
    fn test_adjacent() {
        let adjacent: Vec<_> = Position::new(2, -1).adjacent().collect();
        assert_eq!(
            adjacent,
            vec![
                Position::new(2, -2),
                Position::new(2, 0),
                Position::new(1, -1),
                Position::new(3, -1)
            ]
        );
    }

    proptest! {
        #[test]
        fn rectangles_close(width in 0u64..40, height in 0u64..40) {
            let walk = Walk::trace(&rectangle(width, height), Decoding::Direct).unwrap();
            prop_assert!(walk.is_closed());
            prop_assert_eq!(walk.route().len() as u64, 1 + 2 * (width + height));
        }

        #[test]
        fn route_counts_every_step(distances in proptest::collection::vec((0usize..4, 0u64..20), 0..12)) {
            let letters = ['U', 'D', 'L', 'R'];
            let plan = DigPlan::new(
                distances
                    .iter()
                    .map(|(direction, distance)| format!("{} {} (#000000)", letters[*direction], distance)),
            );
            let walk = Walk::trace(&plan, Decoding::Direct).unwrap();
            let total: u64 = distances.iter().map(|(_, distance)| distance).sum();
            prop_assert_eq!(walk.route().len() as u64, total + 1);
            for position in walk.route() {
                prop_assert!(walk.bounds().contains(*position));
            }
        }
    }
}
