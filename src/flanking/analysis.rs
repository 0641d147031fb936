//! Flanking evaluation.
//!
//! Pure scoring over a token snapshot: whether a token is flanked, the bonus
//! an attacker earns against a target, and the aggregate analysis shown while
//! hovering a token. Every query runs against a single `&[Token]` slice, so
//! nested flanked checks (the counter-flanking veto) see one consistent
//! snapshot per call.

use serde::Serialize;

use super::adjacency::{is_adjacent, Direction};
use crate::grid::token::{Token, TokenId};

/// Bonus granted by the first opposite-side ally pair.
pub const BASE_BONUS: u8 = 2;

/// Ceiling on the total flanking bonus.
pub const MAX_BONUS: u8 = 4;

/// Session-wide rule toggles that alter the adjacency set consulted by every
/// analysis query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rules {
    pub diagonal_flanking: bool,
}

const CARDINAL_AXES: &[(Direction, Direction)] = &Direction::CARDINAL_AXES;
const ALL_AXES: &[(Direction, Direction)] = &[
    Direction::CARDINAL_AXES[0],
    Direction::CARDINAL_AXES[1],
    Direction::DIAGONAL_AXES[0],
    Direction::DIAGONAL_AXES[1],
];

impl Rules {
    /// The mutually-opposite side pairs in play under these rules.
    pub fn axes(self) -> &'static [(Direction, Direction)] {
        if self.diagonal_flanking {
            ALL_AXES
        } else {
            CARDINAL_AXES
        }
    }

    /// All sides in play under these rules.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        self.axes().iter().flat_map(|&(a, b)| [a, b])
    }
}

/// The single side on which `a` borders `b`, if any, among the sides the
/// rules put in play. Square footprints can border a target on at most one
/// side, so "first match" is "the match".
pub fn adjacent_direction(a: &Token, b: &Token, rules: Rules) -> Option<Direction> {
    rules
        .directions()
        .find(|&d| is_adjacent(a.footprint, b.footprint, d))
}

fn is_adjacent_any(a: &Token, b: &Token, rules: Rules) -> bool {
    adjacent_direction(a, b, rules).is_some()
}

/// True iff opposing tokens border `target` on both sides of some axis pair.
/// Teamless and sixth-sense targets are never flanked.
pub fn is_flanked(target: &Token, tokens: &[Token], rules: Rules) -> bool {
    let Some(team) = target.team else {
        return false;
    };
    if target.sixth_sense {
        return false;
    }
    let foe = team.opponent();
    let side_held = |dir: Direction| {
        tokens.iter().any(|t| {
            t.id != target.id
                && t.team == Some(foe)
                && is_adjacent(t.footprint, target.footprint, dir)
        })
    };
    rules
        .axes()
        .iter()
        .any(|&(a, b)| side_held(a) && side_held(b))
}

/// The bonus `attacker` earns against `target`: 0, or 2..=4.
///
/// Zero when the two share a team (or either is teamless), when the target
/// has sixth sense, when the attacker does not border the target, or when the
/// attacker is itself flanked. Otherwise the base 2 requires an unflanked
/// ally on the side directly opposite the attacker, and each further side
/// (on the remaining axes) held by an unflanked ally adds 1, to at most 4.
///
/// Ally flanked status is evaluated one level deep against the same snapshot;
/// there is no transitive chain.
pub fn flanking_bonus(attacker: &Token, target: &Token, tokens: &[Token], rules: Rules) -> u8 {
    let (Some(attacker_team), Some(target_team)) = (attacker.team, target.team) else {
        return 0;
    };
    if attacker_team == target_team || target.sixth_sense {
        return 0;
    }
    let Some(attack_side) = adjacent_direction(attacker, target, rules) else {
        return 0;
    };
    if is_flanked(attacker, tokens, rules) {
        return 0;
    }

    let ally_on = |dir: Direction| {
        tokens.iter().any(|t| {
            t.id != attacker.id
                && t.team == Some(attacker_team)
                && is_adjacent(t.footprint, target.footprint, dir)
                && !is_flanked(t, tokens, rules)
        })
    };

    if !ally_on(attack_side.opposite()) {
        return 0;
    }

    let mut extra: u8 = 0;
    for &(d1, d2) in rules.axes() {
        if d1 == attack_side || d2 == attack_side {
            continue;
        }
        if ally_on(d1) {
            extra += 1;
        }
        if ally_on(d2) {
            extra += 1;
        }
    }
    BASE_BONUS + extra.min(MAX_BONUS - BASE_BONUS)
}

/// One adjacent opposing token in a hover analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub id: TokenId,
    /// Bonus the hovered token earns against this contact; 0 means no
    /// highlight.
    pub bonus: u8,
    pub immune: bool,
}

/// Everything the presentation layer needs to draw a hover overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverAnalysis {
    pub token: TokenId,
    pub flanked: bool,
    pub immune: bool,
    /// Adjacent opposing tokens with the hovered token's bonus against each.
    pub contacts: Vec<Contact>,
    /// Opposing tokens currently earning a bonus against the hovered token.
    pub flankers: Vec<TokenId>,
}

/// Computes the hover overlay for a token. `None` for unknown ids and for
/// tokens still awaiting a team.
pub fn analyze_hover(id: TokenId, tokens: &[Token], rules: Rules) -> Option<HoverAnalysis> {
    let token = tokens.iter().find(|t| t.id == id)?;
    let team = token.team?;
    let foe = team.opponent();

    let contacts = tokens
        .iter()
        .filter(|t| t.team == Some(foe) && is_adjacent_any(token, t, rules))
        .map(|t| Contact {
            id: t.id,
            bonus: flanking_bonus(token, t, tokens, rules),
            immune: t.sixth_sense,
        })
        .collect();

    let flankers = tokens
        .iter()
        .filter(|t| t.team == Some(foe) && flanking_bonus(t, token, tokens, rules) > 0)
        .map(|t| t.id)
        .collect();

    Some(HoverAnalysis {
        token: id,
        flanked: is_flanked(token, tokens, rules),
        immune: token.sixth_sense,
        contacts,
        flankers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::token::{Footprint, Team};

    fn token(id: u32, row: i32, col: i32, size: i32, team: Team) -> Token {
        Token {
            id: TokenId(id),
            footprint: Footprint::new(row, col, size),
            team: Some(team),
            sixth_sense: false,
        }
    }

    fn diagonal() -> Rules {
        Rules {
            diagonal_flanking: true,
        }
    }

    #[test]
    fn opposite_pair_flanks() {
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let north = token(2, 8, 9, 1, Team::Ally);
        let south = token(3, 11, 9, 1, Team::Ally);
        let board = vec![enemy.clone(), north.clone(), south.clone()];
        let rules = Rules::default();

        assert!(is_flanked(&enemy, &board, rules));
        assert_eq!(flanking_bonus(&north, &enemy, &board, rules), 2);
        assert_eq!(flanking_bonus(&south, &enemy, &board, rules), 2);
    }

    #[test]
    fn single_side_does_not_flank() {
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let north = token(2, 8, 9, 1, Team::Ally);
        let board = vec![enemy.clone(), north.clone()];
        let rules = Rules::default();

        assert!(!is_flanked(&enemy, &board, rules));
        assert_eq!(flanking_bonus(&north, &enemy, &board, rules), 0);
    }

    #[test]
    fn allies_on_all_sides_max_out() {
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let board = vec![
            enemy.clone(),
            token(2, 8, 9, 1, Team::Ally),
            token(3, 11, 9, 1, Team::Ally),
            token(4, 9, 8, 1, Team::Ally),
            token(5, 9, 11, 1, Team::Ally),
        ];
        let rules = Rules::default();
        for ally in &board[1..] {
            assert_eq!(flanking_bonus(ally, &enemy, &board, rules), 4);
        }
    }

    #[test]
    fn same_side_allies_do_not_stack() {
        // Two allies sharing the south edge of a 2x2 count as one side.
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let north = token(2, 8, 9, 1, Team::Ally);
        let board = vec![
            enemy.clone(),
            north.clone(),
            token(3, 11, 9, 1, Team::Ally),
            token(4, 11, 10, 1, Team::Ally),
        ];
        assert_eq!(flanking_bonus(&north, &enemy, &board, Rules::default()), 2);
    }

    #[test]
    fn flanked_attacker_projects_nothing() {
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let north = token(2, 8, 9, 1, Team::Ally);
        let south = token(3, 11, 9, 1, Team::Ally);
        // Second enemy above the north ally pins it.
        let pincer = token(4, 7, 9, 1, Team::Enemy);
        let board = vec![enemy.clone(), north.clone(), south.clone(), pincer];
        let rules = Rules::default();

        assert!(is_flanked(&north, &board, rules));
        assert_eq!(flanking_bonus(&north, &enemy, &board, rules), 0);
        // The flanked north ally no longer anchors the south attacker either.
        assert_eq!(flanking_bonus(&south, &enemy, &board, rules), 0);
        // The big enemy is still geometrically caught between both allies.
        assert!(is_flanked(&enemy, &board, rules));
    }

    #[test]
    fn sixth_sense_blocks_both_directions_of_analysis() {
        let mut enemy = token(1, 9, 9, 2, Team::Enemy);
        enemy.sixth_sense = true;
        let north = token(2, 8, 9, 1, Team::Ally);
        let south = token(3, 11, 9, 1, Team::Ally);
        let board = vec![enemy.clone(), north.clone(), south.clone()];
        let rules = Rules::default();

        assert!(!is_flanked(&enemy, &board, rules));
        assert_eq!(flanking_bonus(&north, &enemy, &board, rules), 0);
        assert_eq!(flanking_bonus(&south, &enemy, &board, rules), 0);
    }

    #[test]
    fn sixth_sense_token_still_helps_its_own_team() {
        // The immune ally still anchors a flank against a normal target.
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let north = token(2, 8, 9, 1, Team::Ally);
        let mut south = token(3, 11, 9, 1, Team::Ally);
        south.sixth_sense = true;
        let board = vec![enemy.clone(), north.clone(), south];
        assert_eq!(flanking_bonus(&north, &enemy, &board, Rules::default()), 2);
    }

    #[test]
    fn teamless_tokens_are_invisible_to_analysis() {
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let north = token(2, 8, 9, 1, Team::Ally);
        let mut south = token(3, 11, 9, 1, Team::Ally);
        south.team = None;
        let board = vec![enemy.clone(), north.clone(), south.clone()];
        let rules = Rules::default();

        assert!(!is_flanked(&enemy, &board, rules));
        assert_eq!(flanking_bonus(&north, &enemy, &board, rules), 0);
        assert_eq!(flanking_bonus(&south, &enemy, &board, rules), 0);
    }

    #[test]
    fn diagonal_corners_flank_only_when_enabled() {
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let nw = token(2, 8, 8, 1, Team::Ally);
        let se = token(3, 11, 11, 1, Team::Ally);
        let board = vec![enemy.clone(), nw.clone(), se.clone()];

        assert!(!is_flanked(&enemy, &board, Rules::default()));
        assert_eq!(flanking_bonus(&nw, &enemy, &board, Rules::default()), 0);

        assert!(is_flanked(&enemy, &board, diagonal()));
        assert_eq!(flanking_bonus(&nw, &enemy, &board, diagonal()), 2);
        assert_eq!(flanking_bonus(&se, &enemy, &board, diagonal()), 2);
    }

    #[test]
    fn bonus_is_never_one_and_never_above_four() {
        // Saturate every side and diagonal of the target.
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let mut board = vec![
            enemy.clone(),
            token(2, 8, 9, 1, Team::Ally),
            token(3, 11, 9, 1, Team::Ally),
            token(4, 9, 8, 1, Team::Ally),
            token(5, 9, 11, 1, Team::Ally),
            token(6, 8, 8, 1, Team::Ally),
            token(7, 8, 11, 1, Team::Ally),
            token(8, 11, 8, 1, Team::Ally),
            token(9, 11, 11, 1, Team::Ally),
        ];
        for rules in [Rules::default(), diagonal()] {
            for attacker in &board[1..] {
                let bonus = flanking_bonus(attacker, &enemy, &board, rules);
                assert!(matches!(bonus, 0 | 2 | 3 | 4), "got {bonus}");
            }
        }
        // Three sides covered: base plus one extra.
        board.truncate(4);
        let north = board[1].clone();
        assert_eq!(flanking_bonus(&north, &enemy, &board, Rules::default()), 3);
    }

    #[test]
    fn hover_analysis_lists_contacts_and_flankers() {
        let enemy = token(1, 9, 9, 2, Team::Enemy);
        let north = token(2, 8, 9, 1, Team::Ally);
        let south = token(3, 11, 9, 1, Team::Ally);
        let far = token(4, 0, 0, 1, Team::Ally);
        let board = vec![enemy.clone(), north, south, far];
        let rules = Rules::default();

        let report = analyze_hover(TokenId(1), &board, rules).unwrap();
        assert!(report.flanked);
        assert!(!report.immune);
        let mut contact_ids: Vec<_> = report.contacts.iter().map(|c| c.id).collect();
        contact_ids.sort();
        assert_eq!(contact_ids, vec![TokenId(2), TokenId(3)]);
        // Both adjacent allies earn a bonus against the hovered enemy.
        assert_eq!(report.flankers.len(), 2);

        let ally_report = analyze_hover(TokenId(2), &board, rules).unwrap();
        assert!(!ally_report.flanked);
        assert_eq!(ally_report.contacts.len(), 1);
        assert_eq!(ally_report.contacts[0].bonus, 2);

        assert!(analyze_hover(TokenId(99), &board, rules).is_none());
    }
}
