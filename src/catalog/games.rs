//! Game mode templates.
//!
//! A template is pure setup data: grid size, win condition, and each team's
//! starting pieces and painted cells. Building one never touches live state;
//! the session copies the template into a fresh grid and roster when a game
//! is created.

use serde::{Deserialize, Serialize};

use crate::core::{CellPos, GridSize, Team};

/// The built-in game modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Splash3,
    Revolution,
    Hue2,
    Splash4,
    Partition,
    Frontier,
}

impl GameMode {
    /// All modes, in catalog order.
    pub const ALL: [GameMode; 6] = [
        GameMode::Splash3,
        GameMode::Revolution,
        GameMode::Hue2,
        GameMode::Splash4,
        GameMode::Partition,
        GameMode::Frontier,
    ];

    /// Lowercase mode name, as used in commands.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameMode::Splash3 => "splash3",
            GameMode::Revolution => "revolution",
            GameMode::Hue2 => "hue2",
            GameMode::Splash4 => "splash4",
            GameMode::Partition => "partition",
            GameMode::Frontier => "frontier",
        }
    }

    /// Parse a lowercase mode name.
    #[must_use]
    pub fn parse(name: &str) -> Option<GameMode> {
        GameMode::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The built-in piece types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Leader,
    Colorer,
    Car,
    Painter,
    Overlord,
    Bucketeer,
    Medic,
    Shooter,
}

impl PieceKind {
    /// Lowercase kind name, as used in signup preferences.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Leader => "leader",
            PieceKind::Colorer => "colorer",
            PieceKind::Car => "car",
            PieceKind::Painter => "painter",
            PieceKind::Overlord => "overlord",
            PieceKind::Bucketeer => "bucketeer",
            PieceKind::Medic => "medic",
            PieceKind::Shooter => "shooter",
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One piece in a template, before any player claims it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingPiece {
    pub kind: PieceKind,
    pub pos: CellPos,
}

/// One pre-painted cell in a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingCell {
    pub pos: CellPos,
    /// Shade 1 to 3.
    pub shade: u8,
}

/// One team's slice of a template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSetup {
    pub team: Team,
    pub pieces: Vec<StartingPiece>,
    pub cells: Vec<StartingCell>,
}

/// A complete game mode definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTemplate {
    pub mode: GameMode,
    /// Cell count a team must reach to win; `None` for partition-only modes.
    pub win: Option<u32>,
    /// Roster size the mode is designed for.
    pub recommended_players: u32,
    pub grid: GridSize,
    pub teams: Vec<TeamSetup>,
    /// Partition block dimensions `(width, height)`, for partition modes.
    pub partitions: Option<(u32, u32)>,
}

impl GameTemplate {
    /// Total number of pieces across all teams.
    #[must_use]
    pub fn piece_count(&self) -> u32 {
        self.teams.iter().map(|t| t.pieces.len() as u32).sum()
    }
}

fn p(kind: PieceKind, x: i32, y: i32) -> StartingPiece {
    StartingPiece {
        kind,
        pos: CellPos::new(x, y),
    }
}

fn c(x: i32, y: i32, shade: u8) -> StartingCell {
    StartingCell {
        pos: CellPos::new(x, y),
        shade,
    }
}

/// A full row of cells at one shade, for gradient setups.
fn row(y: i32, width: i32, shade: u8) -> impl Iterator<Item = StartingCell> {
    (0..width).map(move |x| c(x, y, shade))
}

/// Build the template for a mode.
#[must_use]
pub fn template_of(mode: GameMode) -> GameTemplate {
    use PieceKind::*;
    match mode {
        GameMode::Splash3 => GameTemplate {
            mode,
            win: Some(61),
            recommended_players: 9,
            grid: GridSize::new(11, 11),
            teams: vec![
                TeamSetup {
                    team: Team::Blue,
                    pieces: vec![p(Leader, 2, 0), p(Colorer, 0, 0), p(Colorer, 4, 0)],
                    cells: vec![
                        c(0, 0, 1),
                        c(1, 0, 2),
                        c(2, 0, 3),
                        c(3, 0, 2),
                        c(4, 0, 1),
                        c(1, 1, 1),
                        c(2, 1, 2),
                        c(3, 1, 1),
                        c(2, 2, 1),
                    ],
                },
                TeamSetup {
                    team: Team::Red,
                    pieces: vec![p(Leader, 2, 10), p(Colorer, 0, 10), p(Colorer, 4, 10)],
                    cells: vec![
                        c(0, 10, 1),
                        c(1, 10, 2),
                        c(2, 10, 3),
                        c(3, 10, 2),
                        c(4, 10, 1),
                        c(1, 9, 1),
                        c(2, 9, 2),
                        c(3, 9, 1),
                        c(2, 8, 1),
                    ],
                },
                TeamSetup {
                    team: Team::Green,
                    pieces: vec![p(Leader, 10, 5), p(Colorer, 10, 3), p(Colorer, 10, 7)],
                    cells: vec![
                        c(10, 3, 1),
                        c(10, 4, 2),
                        c(10, 5, 3),
                        c(10, 6, 2),
                        c(10, 7, 1),
                        c(9, 4, 1),
                        c(9, 5, 2),
                        c(9, 6, 1),
                        c(8, 5, 1),
                    ],
                },
            ],
            partitions: None,
        },
        GameMode::Revolution => GameTemplate {
            mode,
            win: Some(81),
            recommended_players: 6,
            grid: GridSize::new(11, 11),
            teams: vec![
                TeamSetup {
                    team: Team::Blue,
                    pieces: vec![
                        p(Leader, 1, 0),
                        p(Colorer, 1, 1),
                        p(Colorer, 0, 1),
                        p(Colorer, 2, 2),
                    ],
                    cells: vec![
                        c(0, 0, 1),
                        c(1, 0, 2),
                        c(2, 0, 3),
                        c(0, 1, 2),
                        c(1, 1, 2),
                        c(2, 1, 3),
                        c(0, 2, 3),
                        c(1, 2, 3),
                        c(2, 2, 3),
                        c(10, 7, 1),
                        c(8, 7, 1),
                        c(7, 10, 1),
                        c(7, 8, 1),
                    ],
                },
                TeamSetup {
                    team: Team::Red,
                    pieces: vec![p(Leader, 9, 8), p(Car, 8, 9)],
                    cells: vec![
                        c(10, 10, 1),
                        c(10, 9, 1),
                        c(9, 10, 1),
                        c(7, 7, 1),
                        c(8, 10, 2),
                        c(10, 8, 2),
                        c(9, 9, 2),
                        c(8, 8, 2),
                        c(9, 7, 2),
                        c(7, 9, 2),
                        c(8, 9, 3),
                        c(9, 8, 3),
                    ],
                },
            ],
            partitions: None,
        },
        GameMode::Hue2 => GameTemplate {
            mode,
            win: Some(81),
            recommended_players: 8,
            grid: GridSize::new(11, 11),
            teams: vec![
                TeamSetup {
                    team: Team::Blue,
                    pieces: vec![
                        p(Leader, 2, 9),
                        p(Colorer, 1, 9),
                        p(Painter, 0, 9),
                        p(Car, 2, 10),
                    ],
                    cells: vec![
                        c(0, 10, 3),
                        c(1, 10, 3),
                        c(2, 10, 2),
                        c(2, 9, 2),
                        c(1, 9, 2),
                        c(0, 9, 2),
                        c(0, 8, 1),
                        c(1, 8, 1),
                        c(2, 8, 1),
                        c(3, 8, 1),
                        c(3, 9, 1),
                        c(3, 10, 1),
                    ],
                },
                TeamSetup {
                    team: Team::Red,
                    pieces: vec![
                        p(Leader, 8, 1),
                        p(Colorer, 9, 1),
                        p(Painter, 10, 1),
                        p(Car, 8, 0),
                    ],
                    cells: vec![
                        c(10, 0, 3),
                        c(9, 0, 3),
                        c(8, 0, 2),
                        c(8, 1, 2),
                        c(9, 1, 2),
                        c(10, 1, 2),
                        c(10, 2, 1),
                        c(9, 2, 1),
                        c(8, 2, 1),
                        c(7, 2, 1),
                        c(7, 1, 1),
                        c(7, 0, 1),
                    ],
                },
            ],
            partitions: None,
        },
        GameMode::Splash4 => GameTemplate {
            mode,
            win: Some(51),
            recommended_players: 12,
            grid: GridSize::new(11, 11),
            teams: vec![
                TeamSetup {
                    team: Team::Blue,
                    pieces: vec![p(Leader, 1, 1), p(Colorer, 2, 0), p(Colorer, 0, 2)],
                    cells: vec![
                        c(0, 0, 3),
                        c(1, 0, 2),
                        c(0, 1, 2),
                        c(2, 0, 1),
                        c(1, 1, 1),
                        c(0, 2, 1),
                    ],
                },
                TeamSetup {
                    team: Team::Red,
                    pieces: vec![p(Leader, 1, 9), p(Colorer, 0, 8), p(Colorer, 2, 10)],
                    cells: vec![
                        c(0, 10, 3),
                        c(1, 10, 2),
                        c(0, 9, 2),
                        c(2, 10, 1),
                        c(1, 9, 1),
                        c(0, 8, 1),
                    ],
                },
                TeamSetup {
                    team: Team::Green,
                    pieces: vec![p(Leader, 9, 1), p(Colorer, 8, 0), p(Colorer, 10, 2)],
                    cells: vec![
                        c(10, 0, 3),
                        c(9, 0, 2),
                        c(10, 1, 2),
                        c(8, 0, 1),
                        c(9, 1, 1),
                        c(10, 2, 1),
                    ],
                },
                TeamSetup {
                    team: Team::Yellow,
                    pieces: vec![p(Leader, 9, 9), p(Colorer, 10, 8), p(Colorer, 8, 10)],
                    cells: vec![
                        c(10, 10, 3),
                        c(9, 10, 2),
                        c(10, 9, 2),
                        c(8, 10, 1),
                        c(9, 9, 1),
                        c(10, 8, 1),
                    ],
                },
            ],
            partitions: None,
        },
        GameMode::Partition => GameTemplate {
            mode,
            win: None,
            recommended_players: 12,
            grid: GridSize::new(12, 12),
            teams: vec![
                TeamSetup {
                    team: Team::Blue,
                    pieces: vec![p(Overlord, 2, 0), p(Colorer, 3, 0), p(Car, 4, 0)],
                    cells: vec![c(2, 0, 3), c(3, 0, 3), c(4, 0, 3)],
                },
                TeamSetup {
                    team: Team::Green,
                    pieces: vec![p(Car, 7, 0), p(Colorer, 8, 0), p(Overlord, 9, 0)],
                    cells: vec![c(7, 0, 3), c(8, 0, 3), c(9, 0, 3)],
                },
                TeamSetup {
                    team: Team::Red,
                    pieces: vec![p(Overlord, 2, 11), p(Colorer, 3, 11), p(Car, 4, 11)],
                    cells: vec![c(2, 11, 3), c(3, 11, 3), c(4, 11, 3)],
                },
                TeamSetup {
                    team: Team::Yellow,
                    pieces: vec![p(Car, 7, 11), p(Colorer, 8, 11), p(Overlord, 9, 11)],
                    cells: vec![c(7, 11, 3), c(8, 11, 3), c(9, 11, 3)],
                },
            ],
            partitions: Some((4, 4)),
        },
        GameMode::Frontier => {
            // Each side starts with a five-row gradient across the full width.
            let gradient = |rows: [(i32, u8); 5]| -> Vec<StartingCell> {
                rows.iter()
                    .flat_map(|&(y, shade)| row(y, 11, shade))
                    .collect()
            };
            GameTemplate {
                mode,
                win: Some(81),
                recommended_players: 6,
                grid: GridSize::new(11, 11),
                teams: vec![
                    TeamSetup {
                        team: Team::Blue,
                        pieces: vec![p(Shooter, 5, 1), p(Medic, 8, 3), p(Bucketeer, 9, 3)],
                        cells: gradient([(0, 3), (1, 2), (2, 2), (3, 1), (4, 1)]),
                    },
                    TeamSetup {
                        team: Team::Red,
                        pieces: vec![p(Painter, 5, 9), p(Leader, 2, 7), p(Bucketeer, 1, 7)],
                        cells: gradient([(10, 3), (9, 2), (8, 2), (7, 1), (6, 1)]),
                    },
                ],
                partitions: None,
            }
        }
    }
}
