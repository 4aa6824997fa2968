use crate::config::ArenaConfig;
use crate::engine::{Point, Rect, Size};
use rand::Rng;

/// The playfield, origin at the top left like the canvas
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

/// Which side of the arena a spawn comes from
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

impl From<&ArenaConfig> for Arena {
    fn from(config: &ArenaConfig) -> Self {
        Arena::new(config.width, config.height)
    }
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Arena { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            Point::default(),
            Size {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// Borders count as inside
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point::new(point.x.clamp(0.0, self.width), point.y.clamp(0.0, self.height))
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ]
    }

    /// Point on `edge` at fraction `t` (0..=1) of its length
    pub fn edge_point(&self, edge: Edge, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        match edge {
            Edge::Top => Point::new(self.width * t, 0.0),
            Edge::Right => Point::new(self.width, self.height * t),
            Edge::Bottom => Point::new(self.width * t, self.height),
            Edge::Left => Point::new(0.0, self.height * t),
        }
    }

    pub fn random_edge_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
        self.edge_point(edge, rng.gen_range(0.0..=1.0))
    }

    /// Corner with the greatest distance to `point`
    pub fn farthest_corner(&self, point: Point) -> Point {
        self.corners()
            .into_iter()
            .fold(Point::default(), |best, corner| {
                if corner.distance(point) > best.distance(point) {
                    corner
                } else {
                    best
                }
            })
    }

    /// Is `point` on one of the four borders
    pub fn on_edge(&self, point: Point) -> bool {
        self.contains(point)
            && (point.x == 0.0 || point.y == 0.0 || point.x == self.width || point.y == self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn edge_points_stay_on_the_border() {
        let arena = Arena::new(350.0, 200.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(arena.on_edge(arena.random_edge_point(&mut rng)));
        }
    }

    #[test]
    fn clamp_pulls_points_back_inside() {
        let arena = Arena::new(100.0, 100.0);
        assert_eq!(arena.clamp(Point::new(-5.0, 140.0)), Point::new(0.0, 100.0));
    }

    #[test]
    fn farthest_corner_is_opposite() {
        let arena = Arena::new(100.0, 100.0);
        assert_eq!(arena.farthest_corner(Point::new(10.0, 90.0)), Point::new(100.0, 0.0));
        assert_eq!(arena.farthest_corner(Point::new(0.0, 0.0)), Point::new(100.0, 100.0));
    }
}
