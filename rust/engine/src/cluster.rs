//! Groups stable card locations into piles and routes piles to seats.
//!
//! Clustering is a single greedy pass with running centroids. Candidates
//! are sorted by coordinates first so the grouping is a function of the
//! table layout, not of the order the detector happened to list cards in.

use serde::Serialize;

use crate::cards::Card;
use crate::frame::Point;

/// A spatial pile of cards believed to form one hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    members: Vec<(Card, Point)>,
    centroid: Point,
}

impl Cluster {
    fn seed(card: Card, location: Point) -> Self {
        Self {
            members: vec![(card, location)],
            centroid: location,
        }
    }

    fn absorb(&mut self, card: Card, location: Point) {
        self.members.push((card, location));
        let n = self.members.len() as f32;
        let (sx, sy) = self
            .members
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (_, p)| (sx + p.x, sy + p.y));
        self.centroid = Point::new(sx / n, sy / n);
    }

    pub fn contains(&self, card: Card) -> bool {
        self.members.iter().any(|&(c, _)| c == card)
    }

    pub fn centroid(&self) -> Point {
        self.centroid
    }

    pub fn cards(&self) -> Vec<Card> {
        self.members.iter().map(|&(c, _)| c).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Greedy single-pass union of stable locations into piles.
///
/// Each candidate joins the first existing cluster whose centroid is within
/// `threshold` and which does not already hold that identity, recomputing
/// the centroid as the mean of all members; otherwise it seeds a new
/// cluster.
pub fn cluster_locations(locations: &[(Card, Point)], threshold: f32) -> Vec<Cluster> {
    let mut candidates = locations.to_vec();
    candidates.sort_by(|a, b| {
        (a.1.x, a.1.y)
            .partial_cmp(&(b.1.x, b.1.y))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut clusters: Vec<Cluster> = Vec::new();
    for (card, location) in candidates {
        match clusters
            .iter_mut()
            .find(|c| c.centroid.distance(location) < threshold && !c.contains(card))
        {
            Some(cluster) => cluster.absorb(card, location),
            None => clusters.push(Cluster::seed(card, location)),
        }
    }
    clusters
}

/// Frame quadrants, numbered clockwise from the top-left.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum Quadrant {
    TopLeft = 1,
    TopRight = 2,
    BottomRight = 3,
    BottomLeft = 4,
}

impl Quadrant {
    /// Quadrant of a point given the frame dimensions; the midlines
    /// bisect the frame, points on them fall toward the bottom-right.
    pub fn of(point: Point, frame_size: (u32, u32)) -> Quadrant {
        let top = point.y < frame_size.1 as f32 / 2.0;
        let left = point.x < frame_size.0 as f32 / 2.0;
        match (top, left) {
            (true, true) => Quadrant::TopLeft,
            (true, false) => Quadrant::TopRight,
            (false, false) => Quadrant::BottomRight,
            (false, true) => Quadrant::BottomLeft,
        }
    }
}

/// The role a pile is attributed to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum Seat {
    Player(usize),
    Dealer,
}

/// Static quadrant-to-seat routing, fixed per player count.
///
/// Reference layout: the dealer works the far (top) half of the frame,
/// players sit along the near edge. With two players, seat 0 takes the
/// bottom-left quadrant and seat 1 the bottom-right; a single player
/// owns the whole near half.
#[derive(Debug, Clone, Copy)]
pub struct SeatMap {
    num_players: usize,
}

impl SeatMap {
    pub fn new(num_players: usize) -> Self {
        debug_assert!((1..=2).contains(&num_players));
        Self { num_players }
    }

    pub fn seat_for(&self, quadrant: Quadrant) -> Seat {
        match quadrant {
            Quadrant::TopLeft | Quadrant::TopRight => Seat::Dealer,
            Quadrant::BottomLeft => Seat::Player(0),
            Quadrant::BottomRight => {
                if self.num_players >= 2 {
                    Seat::Player(1)
                } else {
                    Seat::Player(0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(label: &str) -> Card {
        label.parse().unwrap()
    }

    #[test]
    fn nearby_cards_form_one_pile() {
        let clusters = cluster_locations(
            &[
                (card("7S"), Point::new(300.0, 800.0)),
                (card("KD"), Point::new(340.0, 820.0)),
                (card("AH"), Point::new(1500.0, 300.0)),
            ],
            150.0,
        );
        assert_eq!(clusters.len(), 2);
        let sizes: Vec<usize> = clusters.iter().map(Cluster::len).collect();
        assert!(sizes.contains(&2) && sizes.contains(&1));
    }

    #[test]
    fn grouping_ignores_input_order() {
        let a = [
            (card("7S"), Point::new(300.0, 800.0)),
            (card("KD"), Point::new(340.0, 820.0)),
            (card("AH"), Point::new(1500.0, 300.0)),
        ];
        let mut b = a;
        b.reverse();
        assert_eq!(
            cluster_locations(&a, 150.0),
            cluster_locations(&b, 150.0)
        );
    }

    #[test]
    fn duplicate_identity_never_joins_the_same_pile() {
        // Cannot happen upstream (one sighting per identity per frame), but
        // the no-duplicate guard must hold regardless.
        let clusters = cluster_locations(
            &[
                (card("7S"), Point::new(300.0, 800.0)),
                (card("7S"), Point::new(310.0, 805.0)),
            ],
            150.0,
        );
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn quadrants_number_clockwise_from_top_left() {
        let size = (1920, 1080);
        assert_eq!(Quadrant::of(Point::new(10.0, 10.0), size), Quadrant::TopLeft);
        assert_eq!(
            Quadrant::of(Point::new(1900.0, 10.0), size),
            Quadrant::TopRight
        );
        assert_eq!(
            Quadrant::of(Point::new(1900.0, 1000.0), size),
            Quadrant::BottomRight
        );
        assert_eq!(
            Quadrant::of(Point::new(10.0, 1000.0), size),
            Quadrant::BottomLeft
        );
    }

    #[test]
    fn two_player_seat_map_routes_piles() {
        let seats = SeatMap::new(2);
        assert_eq!(seats.seat_for(Quadrant::TopLeft), Seat::Dealer);
        assert_eq!(seats.seat_for(Quadrant::TopRight), Seat::Dealer);
        assert_eq!(seats.seat_for(Quadrant::BottomLeft), Seat::Player(0));
        assert_eq!(seats.seat_for(Quadrant::BottomRight), Seat::Player(1));
    }

    #[test]
    fn single_player_owns_the_near_half() {
        let seats = SeatMap::new(1);
        assert_eq!(seats.seat_for(Quadrant::BottomLeft), Seat::Player(0));
        assert_eq!(seats.seat_for(Quadrant::BottomRight), Seat::Player(0));
    }
}
