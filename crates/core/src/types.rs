use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    /// Reserved "no valid position found" value for callers that cannot carry an `Option`.
    pub const SENTINEL: Pos = Pos { y: -1, x: -1 };

    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    pub fn or_sentinel(found: Option<Pos>) -> Pos {
        found.unwrap_or(Self::SENTINEL)
    }

    pub fn up(self) -> Pos {
        Pos { y: self.y + 1, x: self.x }
    }

    pub fn down(self) -> Pos {
        Pos { y: self.y - 1, x: self.x }
    }

    pub fn left(self) -> Pos {
        Pos { y: self.y, x: self.x - 1 }
    }

    pub fn right(self) -> Pos {
        Pos { y: self.y, x: self.x + 1 }
    }

    /// Von-Neumann neighbours in probe order: up, down, left, right.
    pub fn neighbors(self) -> [Pos; 4] {
        [self.up(), self.down(), self.left(), self.right()]
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OccupantKind {
    Base,
    Player,
    Enemy,
    Wall,
    EdgeWall,
}

impl OccupantKind {
    pub const ALL: [OccupantKind; 5] = [
        OccupantKind::Base,
        OccupantKind::Player,
        OccupantKind::Enemy,
        OccupantKind::Wall,
        OccupantKind::EdgeWall,
    ];

    pub fn code(self) -> u8 {
        match self {
            OccupantKind::Base => 1,
            OccupantKind::Player => 2,
            OccupantKind::Enemy => 3,
            OccupantKind::Wall => 4,
            OccupantKind::EdgeWall => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OccupantKind::Base => "base",
            OccupantKind::Player => "player",
            OccupantKind::Enemy => "enemy",
            OccupantKind::Wall => "wall",
            OccupantKind::EdgeWall => "edge_wall",
        }
    }
}
