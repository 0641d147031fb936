//! Rule-level tests for flanking analysis over whole boards.
//!
//! Exercises the analysis through the grid model rather than hand-built token
//! slices, so occupancy, team assignment, and the rule toggles all take part.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use flanktool::flanking::{flanking_bonus, is_flanked, Rules};
use flanktool::grid::{Footprint, GridModel, Team, TokenId, GRID_SIZE};

fn board(tokens: &[(i32, i32, i32, Team)]) -> GridModel {
    let mut grid = GridModel::new();
    for &(row, col, size, team) in tokens {
        grid.spawn(Footprint::new(row, col, size), Some(team));
    }
    grid
}

fn flanked(grid: &GridModel, id: u32, rules: Rules) -> bool {
    let token = grid.token(TokenId(id)).unwrap();
    is_flanked(token, grid.tokens(), rules)
}

fn bonus(grid: &GridModel, attacker: u32, target: u32, rules: Rules) -> u8 {
    let a = grid.token(TokenId(attacker)).unwrap();
    let t = grid.token(TokenId(target)).unwrap();
    flanking_bonus(a, t, grid.tokens(), rules)
}

#[test]
fn pincer_on_the_row_axis() {
    let grid = board(&[
        (9, 9, 2, Team::Enemy),
        (8, 9, 1, Team::Ally),
        (11, 9, 1, Team::Ally),
    ]);
    let rules = Rules::default();
    assert!(flanked(&grid, 1, rules));
    assert_eq!(bonus(&grid, 2, 1, rules), 2);
    assert_eq!(bonus(&grid, 3, 1, rules), 2);
    // The enemy earns nothing back; it has no supporting pair.
    assert_eq!(bonus(&grid, 1, 2, rules), 0);
}

#[test]
fn pincer_on_the_column_axis() {
    let grid = board(&[
        (9, 9, 2, Team::Enemy),
        (9, 8, 1, Team::Ally),
        (9, 11, 1, Team::Ally),
    ]);
    let rules = Rules::default();
    assert!(flanked(&grid, 1, rules));
    assert_eq!(bonus(&grid, 2, 1, rules), 2);
}

#[test]
fn all_four_sides_reach_the_cap() {
    let grid = board(&[
        (9, 9, 2, Team::Enemy),
        (8, 9, 1, Team::Ally),
        (11, 9, 1, Team::Ally),
        (9, 8, 1, Team::Ally),
        (9, 11, 1, Team::Ally),
    ]);
    let rules = Rules::default();
    for id in 2..=5 {
        assert_eq!(bonus(&grid, id, 1, rules), 4);
    }
}

#[test]
fn extra_allies_on_a_held_side_add_nothing() {
    let grid = board(&[
        (9, 9, 2, Team::Enemy),
        (8, 9, 1, Team::Ally),
        (11, 9, 1, Team::Ally),
        (11, 10, 1, Team::Ally),
    ]);
    let rules = Rules::default();
    assert_eq!(bonus(&grid, 2, 1, rules), 2);
    assert_eq!(bonus(&grid, 3, 1, rules), 2);
    assert_eq!(bonus(&grid, 4, 1, rules), 2);
}

#[test]
fn mixed_sizes_flank_across_partial_edges() {
    // A 3x3 enemy pinched by a 2x2 and a 1x1 that each touch only part of
    // an edge.
    let grid = board(&[
        (8, 8, 3, Team::Enemy),
        (6, 9, 2, Team::Ally),
        (11, 8, 1, Team::Ally),
    ]);
    let rules = Rules::default();
    assert!(flanked(&grid, 1, rules));
    assert_eq!(bonus(&grid, 2, 1, rules), 2);
}

#[test]
fn corner_contact_needs_the_diagonal_rule() {
    let grid = board(&[
        (9, 9, 2, Team::Enemy),
        (8, 8, 1, Team::Ally),
        (11, 11, 1, Team::Ally),
    ]);
    assert!(!flanked(&grid, 1, Rules::default()));
    let diagonal = Rules {
        diagonal_flanking: true,
    };
    assert!(flanked(&grid, 1, diagonal));
    assert_eq!(bonus(&grid, 2, 1, diagonal), 2);
}

#[test]
fn diagonal_rule_mixes_axes_for_extras() {
    // Cardinal pincer plus one corner ally: the corner only counts as an
    // extra side when diagonals are in play.
    let grid = board(&[
        (9, 9, 2, Team::Enemy),
        (8, 9, 1, Team::Ally),
        (11, 9, 1, Team::Ally),
        (8, 8, 1, Team::Ally),
    ]);
    assert_eq!(bonus(&grid, 2, 1, Rules::default()), 2);
    let diagonal = Rules {
        diagonal_flanking: true,
    };
    assert_eq!(bonus(&grid, 2, 1, diagonal), 3);
}

#[test]
fn counter_flanking_silences_the_pinned_attacker() {
    let grid = board(&[
        (9, 9, 2, Team::Enemy),
        (8, 9, 1, Team::Ally),
        (11, 9, 1, Team::Ally),
        (7, 9, 1, Team::Enemy),
    ]);
    let rules = Rules::default();
    assert!(flanked(&grid, 2, rules));
    assert_eq!(bonus(&grid, 2, 1, rules), 0);
    // The pinned ally also stops anchoring its partner.
    assert_eq!(bonus(&grid, 3, 1, rules), 0);
    // Geometrically the big enemy is still caught between both allies.
    assert!(flanked(&grid, 1, rules));
}

#[test]
fn sixth_sense_protects_self_but_still_helps() {
    let mut grid = board(&[
        (9, 9, 2, Team::Enemy),
        (8, 9, 1, Team::Ally),
        (11, 9, 1, Team::Ally),
    ]);
    let rules = Rules::default();
    grid.toggle_sixth_sense(TokenId(1));
    assert!(!flanked(&grid, 1, rules));
    assert_eq!(bonus(&grid, 2, 1, rules), 0);

    // Move the immunity to an ally: the enemy is flankable again and the
    // immune ally still anchors its partner's bonus.
    grid.toggle_sixth_sense(TokenId(1));
    grid.toggle_sixth_sense(TokenId(3));
    assert!(flanked(&grid, 1, rules));
    assert_eq!(bonus(&grid, 2, 1, rules), 2);
}

#[test]
fn teamless_tokens_take_no_part() {
    let mut grid = board(&[(9, 9, 2, Team::Enemy), (8, 9, 1, Team::Ally)]);
    // The second pincer exists but has no team yet.
    grid.spawn(Footprint::new(11, 9, 1), None);
    let rules = Rules::default();
    assert!(!flanked(&grid, 1, rules));
    assert_eq!(bonus(&grid, 2, 1, rules), 0);

    grid.assign_team(TokenId(3), Team::Ally);
    assert!(flanked(&grid, 1, rules));
    assert_eq!(bonus(&grid, 2, 1, rules), 2);
}

#[test]
fn bonus_range_holds_on_random_dense_boards() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let mut grid = GridModel::new();
        for _ in 0..60 {
            let size = rng.gen_range(1..=3);
            let row = rng.gen_range(0..GRID_SIZE - size);
            let col = rng.gen_range(0..GRID_SIZE - size);
            let fp = Footprint::new(row, col, size);
            if grid.is_free(fp, None) {
                let team = if rng.gen_bool(0.5) {
                    Team::Ally
                } else {
                    Team::Enemy
                };
                grid.spawn(fp, Some(team));
            }
        }
        for rules in [
            Rules::default(),
            Rules {
                diagonal_flanking: true,
            },
        ] {
            for a in grid.tokens() {
                for t in grid.tokens() {
                    let b = flanking_bonus(a, t, grid.tokens(), rules);
                    assert!(matches!(b, 0 | 2 | 3 | 4), "bonus {b} out of range");
                    if a.id == t.id || a.team == t.team {
                        assert_eq!(b, 0);
                    }
                }
            }
        }
        // The cell matrix always matches what the token list implies.
        let derived = grid.derived_occupancy();
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                assert_eq!(derived[r as usize][c as usize], grid.occupant(r, c));
            }
        }
    }
}
