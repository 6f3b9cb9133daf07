#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::game::MAX_BULLET_STEPS;
    use crate::game::board::{ActionOutcome, Board};
    use crate::game::entities::{Bullet, Player, start_position};
    use crate::game::error::GameError;
    use crate::game::grid::*;
    use crate::game::systems::*;
    use crate::game::types::*;

    fn player(id: PlayerId) -> Player {
        Player::new(id, format!("player{}", id), "Abc123!@".to_string(), 0, 3)
    }

    /// A board with every tile cleared, so tests can lay out walls by hand.
    fn open_board(height: usize, width: usize) -> Board {
        let mut board = Board::new(height, width, Difficulty::new(1).unwrap(), Some(7)).unwrap();
        for row in board.grid.iter_mut() {
            for cell in row.iter_mut() {
                cell.tile = Tile::Empty;
            }
        }
        board.walls.clear();
        board
    }

    fn corners(board: &Board) -> Vec<Position> {
        (0..4).map(|slot| start_position(slot, board.height(), board.width())).collect()
    }

    fn fly(board: &mut Board, bullet_id: BulletId) -> BulletStep {
        for _ in 0..MAX_BULLET_STEPS + 1 {
            let step = step_bullet(board, bullet_id, 1.0);
            if !step.is_flying() {
                return step;
            }
        }
        panic!("bullet never stopped");
    }

    #[test]
    fn test_weights_sum_to_hundred() {
        for level in 1..=4 {
            let weights = TileWeights::for_difficulty(level).unwrap();
            assert_eq!(weights.total(), 100, "difficulty {}", level);
        }
    }

    #[test]
    fn test_unknown_difficulty_fails() {
        assert_eq!(TileWeights::for_difficulty(0), Err(GameError::InvalidDifficulty(0)));
        assert_eq!(TileWeights::for_difficulty(5), Err(GameError::InvalidDifficulty(5)));
        assert_eq!(Difficulty::new(5), Err(GameError::InvalidDifficulty(5)));
    }

    #[test]
    fn test_board_too_small() {
        let err = Board::new(2, 20, Difficulty::new(1).unwrap(), Some(1)).unwrap_err();
        assert_eq!(err, GameError::BoardTooSmall { height: 2, width: 20 });
    }

    #[test]
    fn test_generation_respects_dimensions_and_limits() {
        for level in 1..=4 {
            for seed in 0..10 {
                let difficulty = Difficulty::new(level).unwrap();
                let board = Board::new(20, 25, difficulty, Some(seed)).unwrap();
                assert_eq!(board.grid.len(), 20);
                assert!(board.grid.iter().all(|row| row.len() == 25));

                let bombs = board.grid.iter().flatten().filter(|c| c.tile == Tile::Bomb).count();
                assert!(bombs <= 3 + level as usize);

                let k = square_size(20, 25);
                let mut copy = board.grid.clone();
                assert_eq!(fix_squares(&mut copy, k), 0, "solid square left behind");
                assert!(
                    board
                        .grid
                        .iter()
                        .all(|row| row.iter().any(|c| c.tile != Tile::Unbreakable))
                );
                let walls = board.grid.iter().flatten().filter(|c| c.tile.is_wall()).count();
                assert_eq!(board.walls.len(), walls);
            }
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let difficulty = Difficulty::new(3).unwrap();
        let a = Board::new(20, 20, difficulty, Some(42)).unwrap();
        let b = Board::new(20, 20, difficulty, Some(42)).unwrap();
        assert_eq!(a.grid, b.grid);
    }

    #[test]
    fn test_fix_squares_breaks_every_block() {
        let mut grid = generate_grid(4, 4);
        for row in grid.iter_mut() {
            for cell in row.iter_mut() {
                cell.tile = Tile::Unbreakable;
            }
        }
        assert!(fix_squares(&mut grid, 2) > 1);
        assert_eq!(fix_squares(&mut grid, 2), 0);
    }

    #[test]
    fn test_fix_rows_and_columns_clears_half() {
        let mut grid = generate_grid(4, 6);
        for cell in grid[2].iter_mut() {
            cell.tile = Tile::Unbreakable;
        }
        for row in grid.iter_mut() {
            row[5].tile = Tile::Unbreakable;
        }
        fix_rows_and_columns(&mut grid);

        let row: Vec<Tile> = grid[2].iter().map(|c| c.tile).collect();
        assert_eq!(&row[..3], &[Tile::Empty; 3]);
        assert_eq!(&row[3..], &[Tile::Unbreakable; 3]);

        let column: Vec<Tile> = grid.iter().map(|r| r[5].tile).collect();
        assert_eq!(column, vec![Tile::Empty, Tile::Empty, Tile::Unbreakable, Tile::Unbreakable]);
    }

    #[test]
    fn test_insert_players_in_corner_order() {
        let mut board = Board::new(20, 20, Difficulty::new(4).unwrap(), Some(3)).unwrap();
        let expected = corners(&board);
        for id in 1..=4 {
            let pos = board.join(player(id)).unwrap();
            assert_eq!(pos, expected[id as usize - 1]);
            let cell = board.grid[pos.x][pos.y];
            assert!(cell.is_start);
            assert_eq!(cell.tile, Tile::Empty);
            for x in pos.x - 1..=pos.x + 1 {
                for y in pos.y - 1..=pos.y + 1 {
                    assert_eq!(board.tile_at(Position::new(x, y)), Some(Tile::Empty));
                }
            }
        }
        assert_eq!(board.join(player(5)), Err(GameError::BoardFull));
        assert_eq!(board.tanks.len(), 4);
    }

    #[test]
    fn test_move_blocked_by_walls_still_turns() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        for (key, tile) in [('d', Tile::Breakable), ('S', Tile::Unbreakable)] {
            let start = board.tank(1).unwrap().pos;
            let (direction, target) = match key {
                'd' => (Direction::Right, Position::new(start.x, start.y + 1)),
                _ => (Direction::Down, Position::new(start.x + 1, start.y)),
            };
            board.set_tile(target, tile);
            assert_eq!(move_tank(&mut board, 1, key).unwrap(), start);
            assert_eq!(board.tank(1).unwrap().direction, direction);
        }

        let start = board.tank(1).unwrap().pos;
        board.set_tile(Position::new(start.x - 1, start.y), Tile::Bomb);
        assert_eq!(move_tank(&mut board, 1, 'w').unwrap(), start);
    }

    #[test]
    fn test_move_steps_onto_empty_tile() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        assert_eq!(move_tank(&mut board, 1, 'D').unwrap(), Position::new(1, 2));
        assert_eq!(move_tank(&mut board, 1, 'w').unwrap(), Position::new(0, 2));
        // Edge of the board.
        assert_eq!(move_tank(&mut board, 1, 'w').unwrap(), Position::new(0, 2));
        assert_eq!(board.tank(1).unwrap().direction, Direction::Up);
    }

    #[test]
    fn test_other_key_steps_in_current_facing() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        assert_eq!(move_tank(&mut board, 1, 's').unwrap(), Position::new(2, 1));
        assert_eq!(move_tank(&mut board, 1, 'x').unwrap(), Position::new(3, 1));
        assert_eq!(board.tank(1).unwrap().direction, Direction::Down);

        board.set_tile(Position::new(4, 1), Tile::Breakable);
        assert_eq!(move_tank(&mut board, 1, '1').unwrap(), Position::new(3, 1));
        assert_eq!(move_tank(&mut board, 99, 'w'), Err(GameError::UnknownPlayer(99)));
    }

    #[test]
    fn test_removed_tank_is_no_longer_alive() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        assert!(board.tank(1).unwrap().is_alive);
        assert_eq!(board.tank(1).unwrap().speed, 1);

        let removed = remove_player(&mut board, 1).unwrap();
        assert!(!removed.is_alive);
        assert!(board.tank(1).is_none());
        assert!(remove_player(&mut board, 1).is_none());
    }

    #[test]
    fn test_tanks_may_share_a_cell() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        board.join(player(2)).unwrap();
        board.tank_mut(2).unwrap().pos = Position::new(1, 3);
        move_tank(&mut board, 1, 'd').unwrap();
        assert_eq!(move_tank(&mut board, 1, 'd').unwrap(), Position::new(1, 3));
    }

    #[test]
    fn test_shoot_cooldown_allows_one_bullet() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        let t0 = Instant::now();

        assert!(shoot(&mut board, 1, t0).unwrap().is_some());
        assert_eq!(shoot(&mut board, 1, t0 + Duration::from_secs(1)).unwrap(), None);
        assert_eq!(board.bullets.len(), 1);

        assert!(shoot(&mut board, 1, t0 + Duration::from_secs(4)).unwrap().is_some());
        assert_eq!(board.bullets.len(), 2);
    }

    #[test]
    fn test_bullet_starts_one_cell_ahead() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        move_tank(&mut board, 1, 's').unwrap();
        let id = shoot(&mut board, 1, Instant::now()).unwrap().unwrap();
        let bullet = board.bullets.iter().find(|b| b.id == id).unwrap();
        assert_eq!((bullet.x, bullet.y), (3.0, 1.0));
        assert_eq!(bullet.direction, Direction::Down);
        assert_eq!(bullet.owner, 1);
    }

    #[test]
    fn test_apply_action_dispatches_on_key() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        let now = Instant::now();
        assert_eq!(
            board.apply_action(1, 'd', now).unwrap(),
            ActionOutcome::Moved(Position::new(1, 2))
        );
        assert!(matches!(board.apply_action(1, 'F', now).unwrap(), ActionOutcome::Shot(Some(_))));
        assert_eq!(board.apply_action(1, 'f', now).unwrap(), ActionOutcome::Shot(None));
    }

    #[test]
    fn test_bullets_on_same_spot_both_stop() {
        let mut board = open_board(10, 10);
        let mut first = Bullet::new(Position::new(5, 3), Direction::Right, 1);
        first.y = 3.25;
        let mut second = Bullet::new(Position::new(5, 3), Direction::Left, 2);
        second.y = 3.5;
        let (first_id, second_id) = (first.id, second.id);
        board.bullets.push(first);
        board.bullets.push(second);

        assert_eq!(
            step_bullet(&mut board, second_id, 1.0),
            BulletStep::Collided { other: first_id }
        );
        assert!(board.bullets.is_empty());
        assert_eq!(step_bullet(&mut board, first_id, 1.0), BulletStep::Vanished);
    }

    #[test]
    fn test_bullet_breaks_breakable_wall() {
        let mut board = open_board(10, 10);
        board.set_tile(Position::new(5, 7), Tile::Breakable);
        let bullet = Bullet::new(Position::new(5, 5), Direction::Right, 1);
        let id = bullet.id;
        board.bullets.push(bullet);

        assert_eq!(
            fly(&mut board, id),
            BulletStep::HitWall { at: Position::new(5, 7), tile: Tile::Breakable }
        );
        assert_eq!(board.tile_at(Position::new(5, 7)), Some(Tile::Empty));
        assert!(board.walls.iter().all(|w| w.pos != Position::new(5, 7)));
        assert!(board.bullets.is_empty());
    }

    #[test]
    fn test_bullet_stops_on_unbreakable_wall() {
        let mut board = open_board(10, 10);
        board.set_tile(Position::new(2, 5), Tile::Unbreakable);
        let bullet = Bullet::new(Position::new(5, 5), Direction::Up, 1);
        let id = bullet.id;
        board.bullets.push(bullet);

        assert_eq!(
            fly(&mut board, id),
            BulletStep::HitWall { at: Position::new(2, 5), tile: Tile::Unbreakable }
        );
        assert_eq!(board.tile_at(Position::new(2, 5)), Some(Tile::Unbreakable));
    }

    #[test]
    fn test_bullet_leaves_board() {
        let mut board = open_board(10, 10);
        let bullet = Bullet::new(Position::new(5, 8), Direction::Right, 1);
        let id = bullet.id;
        board.bullets.push(bullet);
        assert_eq!(fly(&mut board, id), BulletStep::OutOfBounds);
        assert!(board.bullets.is_empty());
    }

    #[test]
    fn test_bullet_expires() {
        let mut board = open_board(10, 10);
        let mut bullet = Bullet::new(Position::new(5, 5), Direction::Right, 1);
        bullet.steps = MAX_BULLET_STEPS;
        let id = bullet.id;
        board.bullets.push(bullet);
        assert_eq!(step_bullet(&mut board, id, 1.0), BulletStep::Expired);
        assert!(board.bullets.is_empty());
    }

    #[test]
    fn test_hit_respawns_target_and_scores_shooter() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        board.join(player(2)).unwrap();
        board.tank_mut(1).unwrap().direction = Direction::Right;
        board.tank_mut(2).unwrap().pos = Position::new(1, 4);

        let id = shoot(&mut board, 1, Instant::now()).unwrap().unwrap();
        assert_eq!(
            fly(&mut board, id),
            BulletStep::HitTank { target: 2, shooter: 1, high_score: Some(1) }
        );

        let target = board.tank(2).unwrap();
        assert!(corners(&board).contains(&target.pos));
        assert_eq!(target.player.remaining_lives, 3);
        let shooter = &board.tank(1).unwrap().player;
        assert_eq!((shooter.score, shooter.high_score), (1, 1));
        assert!(board.bullets.is_empty());
    }

    #[test]
    fn test_bomb_blast_removes_tanks_in_range() {
        let mut board = open_board(25, 25);
        for id in 1..=3 {
            board.join(player(id)).unwrap();
        }
        board.tank_mut(1).unwrap().pos = Position::new(15, 12);
        board.tank_mut(2).unwrap().pos = Position::new(20, 20);
        board.tank_mut(3).unwrap().pos = Position::new(10, 20);
        board.set_tile(Position::new(10, 10), Tile::Bomb);
        board.set_tile(Position::new(12, 12), Tile::Breakable);
        board.set_tile(Position::new(11, 11), Tile::Unbreakable);
        board.set_tile(Position::new(22, 22), Tile::Breakable);

        let bullet = Bullet::new(Position::new(10, 10), Direction::Right, 3);
        let id = bullet.id;
        board.bullets.push(bullet);

        let step = step_bullet(&mut board, id, 1.0);
        assert_eq!(step, BulletStep::Detonated { at: Position::new(10, 10), removed: vec![1, 3] });
        assert!(board.tank(1).is_none());
        assert!(board.tank(3).is_none());
        assert!(board.tank(2).is_some());
        assert_eq!(board.tile_at(Position::new(10, 10)), Some(Tile::Empty));
        assert_eq!(board.tile_at(Position::new(12, 12)), Some(Tile::Empty));
        assert_eq!(board.tile_at(Position::new(11, 11)), Some(Tile::Unbreakable));
        assert_eq!(board.tile_at(Position::new(22, 22)), Some(Tile::Breakable));
    }

    #[test]
    fn test_blast_frees_slot_for_next_join() {
        let mut board = open_board(25, 25);
        for id in 1..=4 {
            board.join(player(id)).unwrap();
        }
        let removed = trigger_bomb(&mut board, Position::new(1, 1));
        assert_eq!(removed, vec![1]);
        assert_eq!(board.join(player(5)).unwrap(), Position::new(1, 1));
    }

    #[test]
    fn test_respawn_lands_on_a_cleared_corner() {
        let mut board = Board::new(20, 20, Difficulty::new(4).unwrap(), Some(11)).unwrap();
        board.join(player(1)).unwrap();
        for _ in 0..8 {
            let pos = respawn_player(&mut board, 1).unwrap();
            assert!(corners(&board).contains(&pos));
            assert_eq!(board.tile_at(pos), Some(Tile::Empty));
            assert_eq!(board.tile_at(Position::new(pos.x + 1, pos.y)), Some(Tile::Empty));
        }
        assert_eq!(respawn_player(&mut board, 9), Err(GameError::UnknownPlayer(9)));
    }

    #[test]
    fn test_board_state_is_bordered_and_stable() {
        let mut board = open_board(5, 6);
        board.join(player(1)).unwrap();
        board.set_tile(Position::new(3, 3), Tile::Breakable);
        board.set_tile(Position::new(3, 4), Tile::Unbreakable);
        board.set_tile(Position::new(2, 4), Tile::Bomb);

        let view = board_state(&board);
        assert_eq!(view, board_state(&board));
        assert_eq!(view.board.len(), 7);
        assert!(view.board.iter().all(|row| row.len() == 8));
        assert!(view.board[0].iter().all(|c| *c == '#'));
        assert!(view.board[6].iter().all(|c| *c == '#'));
        assert_eq!(view.board[2][2], 'P');
        assert_eq!(view.board[4][4], '+');
        assert_eq!(view.board[4][5], '#');
        assert_eq!(view.board[3][5], ' ');
        // The cell right of a tank is still rendered.
        assert_eq!(view.board[2][3], ' ');
    }

    #[test]
    fn test_tank_masks_wall_underneath() {
        let mut board = open_board(5, 5);
        board.join(player(1)).unwrap();
        board.set_tile(Position::new(1, 1), Tile::Unbreakable);
        assert_eq!(board_state(&board).board[2][2], 'P');
    }

    #[test]
    fn test_player_and_bullet_views() {
        let mut board = open_board(10, 10);
        board.join(player(1)).unwrap();
        board.join(player(2)).unwrap();
        let players = player_state(&board);
        assert_eq!(players.players.len(), 2);
        assert_eq!(players.players[1].name, "player2");
        assert_eq!((players.players[1].x, players.players[1].y), (1, 8));

        board.tank_mut(1).unwrap().direction = Direction::Down;
        shoot(&mut board, 1, Instant::now()).unwrap();
        let coords = bullet_coords(&board);
        assert_eq!(coords.bullets.len(), 1);
        assert_eq!((coords.bullets[0].coord_x, coords.bullets[0].coord_y), (2.0, 3.0));
    }

    #[test]
    fn test_difficulty_change_reseats_tanks() {
        let mut board = Board::new(20, 20, Difficulty::new(1).unwrap(), Some(5)).unwrap();
        board.join(player(1)).unwrap();
        board.join(player(2)).unwrap();
        move_tank(&mut board, 1, 's').unwrap();
        respawn_player(&mut board, 2).unwrap();

        board.set_difficulty(Difficulty::new(4).unwrap()).unwrap();
        assert_eq!(board.difficulty().level(), 4);
        for (id, slot) in [(1, 0), (2, 1)] {
            let pos = board.tank(id).unwrap().pos;
            assert_eq!(pos, start_position(slot, 20, 20));
            assert_eq!(board.tile_at(pos), Some(Tile::Empty));
        }
    }
}
