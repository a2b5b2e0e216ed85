use crate::games::{Direction, GridPos};

pub type Point = GridPos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    ObstacleCollision,
}

/// Input already mapped from raw keys by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeInput {
    Turn(Direction),
    Restart,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate { score: u32 },
    Died(DeathReason),
    Halted,
}

/// A 2x2 block with a countdown in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    pub cells: [Point; 4],
    pub remaining_ticks: u32,
}

impl Obstacle {
    pub fn at(top_left: Point, lifetime_ticks: u32) -> Self {
        Self {
            cells: [
                top_left,
                top_left.offset(1, 0),
                top_left.offset(0, 1),
                top_left.offset(1, 1),
            ],
            remaining_ticks: lifetime_ticks,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.cells.contains(&point)
    }
}

pub mod colors {
    use crate::games::Rgb;

    pub const HEAD: Rgb = Rgb(46, 204, 113);
    pub const BODY: Rgb = Rgb(39, 174, 96);
    pub const FOOD: Rgb = Rgb(231, 76, 60);
    pub const OBSTACLE: Rgb = Rgb(241, 196, 15);
}
