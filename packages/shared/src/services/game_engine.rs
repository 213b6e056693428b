use std::collections::{HashSet, VecDeque};

#[cfg(test)]
use mockall::automock;

use crate::models::game::{Game, Player, Position, Wall};
use crate::services::geometry::{
    adjacent, neighbors, step_blocked, wall_within_bounds, walls_overlap, within_bounds,
};

/// Rules checks the orchestrator relies on. Every method is a pure
/// predicate over the given state.
#[cfg_attr(test, automock)]
pub trait GameEngine: Send + Sync {
    fn check_win(&self, player: &Player) -> bool;
    fn is_move_valid(&self, game: &Game, player_id: &str, new_position: &Position) -> bool;
    fn is_wall_placement_valid(&self, game: &Game, wall: &Wall) -> bool;
    fn has_path_to_goal(&self, game: &Game, player: &Player) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Allow jumping over an adjacent opponent. When enabled a player can
    /// never step onto the opponent's cell.
    pub jump_over_opponent: bool,
}

#[derive(Debug, Clone, Default)]
pub struct QuoridorEngine {
    config: EngineConfig,
}

impl QuoridorEngine {
    pub fn new() -> Self {
        QuoridorEngine::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        QuoridorEngine { config }
    }

    /// Jump targets over `opponent`: straight behind when open, otherwise
    /// the cells beside the opponent that are not walled off.
    fn is_jump_over_opponent(
        &self,
        walls: &[Wall],
        player: &Position,
        opponent: &Position,
        new_position: &Position,
    ) -> bool {
        if !adjacent(player, opponent) || step_blocked(walls, player, opponent) {
            return false;
        }

        let behind = Position::new(
            opponent.x + (opponent.x - player.x),
            opponent.y + (opponent.y - player.y),
        );
        if within_bounds(&behind) && !step_blocked(walls, opponent, &behind) {
            return *new_position == behind;
        }

        neighbors(opponent).iter().any(|side| {
            within_bounds(side)
                && side == new_position
                && side != player
                && !step_blocked(walls, opponent, side)
        })
    }
}

impl GameEngine for QuoridorEngine {
    fn check_win(&self, player: &Player) -> bool {
        player.position.y == player.goal
    }

    fn is_move_valid(&self, game: &Game, player_id: &str, new_position: &Position) -> bool {
        let Some(player) = game.player(player_id) else {
            return false;
        };

        if !within_bounds(new_position) {
            return false;
        }

        if self.config.jump_over_opponent {
            let Some(opponent) = game.opponent(player_id) else {
                return false;
            };
            if *new_position == opponent.position {
                return false;
            }
            if self.is_jump_over_opponent(
                &game.walls,
                &player.position,
                &opponent.position,
                new_position,
            ) {
                return true;
            }
        }

        if !adjacent(&player.position, new_position) {
            return false;
        }

        !step_blocked(&game.walls, &player.position, new_position)
    }

    fn is_wall_placement_valid(&self, game: &Game, wall: &Wall) -> bool {
        if wall.position_1 == wall.position_2 {
            return false;
        }

        if !wall_within_bounds(wall) {
            return false;
        }

        if game.walls.iter().any(|existing| walls_overlap(wall, existing)) {
            return false;
        }

        // Check connectivity against a copy; the game itself is untouched.
        let mut walls = game.walls.clone();
        walls.push(*wall);

        has_path_to_goal(&walls, &game.player_1) && has_path_to_goal(&walls, &game.player_2)
    }

    fn has_path_to_goal(&self, game: &Game, player: &Player) -> bool {
        has_path_to_goal(&game.walls, player)
    }
}

/// Breadth-first search from the player's cell to any cell on its goal row,
/// treating only walls as obstacles.
pub fn has_path_to_goal(walls: &[Wall], player: &Player) -> bool {
    let mut visited = HashSet::from([player.position]);
    let mut queue = VecDeque::from([player.position]);

    while let Some(current) = queue.pop_front() {
        if current.y == player.goal {
            return true;
        }

        for neighbor in neighbors(&current) {
            if !within_bounds(&neighbor)
                || visited.contains(&neighbor)
                || step_blocked(walls, &current, &neighbor)
            {
                continue;
            }

            visited.insert(neighbor);
            queue.push_back(neighbor);
        }
    }

    false
}
