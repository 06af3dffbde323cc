use core::fmt;

use itertools::Itertools;

use crate::{
    coordinate::{Coordinate, Direction},
    error::{Error, Result},
    Path,
};

/// A single movement instruction for a robot following a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

impl Command {
    pub fn direction(self) -> Direction {
        match self {
            Command::MoveUp => Direction::Up,
            Command::MoveDown => Direction::Down,
            Command::MoveLeft => Direction::Left,
            Command::MoveRight => Direction::Right,
        }
    }
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Command::MoveUp,
            Direction::Down => Command::MoveDown,
            Direction::Left => Command::MoveLeft,
            Direction::Right => Command::MoveRight,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Command::MoveUp => "move up",
            Command::MoveDown => "move down",
            Command::MoveLeft => "move left",
            Command::MoveRight => "move right",
        };
        f.write_str(s)
    }
}

/// Translates a path into one command per step. Every step must be a single cardinal move;
/// anything else (diagonal, repeated or skipped cells) means the path is broken and is
/// reported as [Error::InvalidStep]. Empty and single-cell paths need no commands.
pub fn path_to_commands(path: &[Coordinate]) -> Result<Vec<Command>> {
    path.iter()
        .tuple_windows()
        .map(|(from, to)| {
            from.direction_to(to)
                .map(Command::from)
                .ok_or_else(|| Error::InvalidStep {
                    from: *from,
                    to: *to,
                })
        })
        .collect()
}

/// Replays commands from `start`, returning every visited cell including `start`.
pub fn apply_commands(start: Coordinate, commands: &[Command]) -> Path {
    let mut path = Vec::with_capacity(commands.len() + 1);
    path.push(start);
    let mut current = start;
    for command in commands {
        current = current.step(command.direction());
        path.push(current);
    }
    path
}
