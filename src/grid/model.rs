//! Grid occupancy state.
//!
//! Holds the authoritative cell matrix and token list. Every cell referencing
//! a token id lies inside that token's footprint, and no two tokens claim the
//! same cell. Tokens without a team are tracked but occupy nothing until a
//! team is assigned.
//!
//! Occupying a non-free footprint or naming a missing token id is a caller
//! bug, enforced with `debug_assert!`; callers check `is_free` first.

use super::token::{Footprint, Team, Token, TokenId, GRID_SIZE};

const N: usize = GRID_SIZE as usize;

/// Occupancy grid plus the set of tokens on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    cells: [[Option<TokenId>; N]; N],
    tokens: Vec<Token>,
    next_id: u32,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GridModel {
    /// Creates an empty grid.
    pub fn new() -> Self {
        GridModel {
            cells: [[None; N]; N],
            tokens: Vec::new(),
            next_id: 1,
        }
    }

    /// All tokens, in creation order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Looks up a token by id.
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| t.id == id)
    }

    /// The occupant of a single cell, if any. Out-of-range cells are empty.
    pub fn occupant(&self, row: i32, col: i32) -> Option<TokenId> {
        if !(0..GRID_SIZE).contains(&row) || !(0..GRID_SIZE).contains(&col) {
            return None;
        }
        self.cells[row as usize][col as usize]
    }

    /// The id the next spawned token will receive.
    pub fn peek_next_id(&self) -> TokenId {
        TokenId(self.next_id)
    }

    /// True iff the entire footprint lies inside the grid.
    pub fn is_within_bounds(&self, fp: Footprint) -> bool {
        fp.in_bounds()
    }

    /// True iff every cell of the footprint is unoccupied or occupied only by
    /// `ignore` (lets a token overlap itself while relocating). Out-of-bounds
    /// footprints are never free.
    pub fn is_free(&self, fp: Footprint, ignore: Option<TokenId>) -> bool {
        if !fp.in_bounds() {
            return false;
        }
        fp.cells().all(|(r, c)| match self.cells[r as usize][c as usize] {
            None => true,
            Some(id) => Some(id) == ignore,
        })
    }

    /// Marks every cell of the token's footprint as occupied by it.
    ///
    /// Precondition: the footprint is in bounds and free (apart from the
    /// token itself).
    pub fn occupy(&mut self, id: TokenId) {
        let Some(fp) = self.token(id).map(|t| t.footprint) else {
            debug_assert!(false, "occupy: unknown token {id}");
            return;
        };
        debug_assert!(self.is_free(fp, Some(id)), "occupy: footprint not free for {id}");
        for (r, c) in fp.cells() {
            self.cells[r as usize][c as usize] = Some(id);
        }
    }

    /// Clears every cell of the token's footprint that references it.
    /// Idempotent: cells already empty or owned by others are untouched.
    pub fn vacate(&mut self, id: TokenId) {
        let Some(fp) = self.token(id).map(|t| t.footprint) else {
            debug_assert!(false, "vacate: unknown token {id}");
            return;
        };
        for (r, c) in fp.cells() {
            let cell = &mut self.cells[r as usize][c as usize];
            if *cell == Some(id) {
                *cell = None;
            }
        }
    }

    /// Creates a token at `fp`. Team-bearing tokens occupy immediately;
    /// teamless tokens await assignment.
    ///
    /// Precondition: `fp` is in bounds and free.
    pub fn spawn(&mut self, fp: Footprint, team: Option<Team>) -> TokenId {
        debug_assert!(self.is_free(fp, None), "spawn: footprint not free");
        let id = TokenId(self.next_id);
        self.next_id += 1;
        self.tokens.push(Token {
            id,
            footprint: fp,
            team,
            sixth_sense: false,
        });
        if team.is_some() {
            self.occupy(id);
        }
        id
    }

    /// Assigns a team and occupies the footprint.
    pub fn assign_team(&mut self, id: TokenId, team: Team) {
        let Some(token) = self.token_mut(id) else {
            debug_assert!(false, "assign_team: unknown token {id}");
            return;
        };
        token.team = Some(team);
        self.occupy(id);
    }

    /// Swaps a placed token to the opposing team. Occupancy is unchanged.
    pub fn swap_team(&mut self, id: TokenId) {
        let Some(token) = self.token_mut(id) else {
            debug_assert!(false, "swap_team: unknown token {id}");
            return;
        };
        if let Some(team) = token.team {
            token.team = Some(team.opponent());
        }
    }

    /// Toggles the sixth-sense immunity flag.
    pub fn toggle_sixth_sense(&mut self, id: TokenId) {
        let Some(token) = self.token_mut(id) else {
            debug_assert!(false, "toggle_sixth_sense: unknown token {id}");
            return;
        };
        token.sixth_sense = !token.sixth_sense;
    }

    /// Relocates a token: vacates its current cells, updates the footprint,
    /// and re-occupies if the token has a team.
    ///
    /// Precondition: `to` is in bounds and free apart from the token itself.
    pub fn move_token(&mut self, id: TokenId, to: Footprint) {
        debug_assert!(self.is_free(to, Some(id)), "move_token: destination not free");
        self.vacate(id);
        let Some(token) = self.token_mut(id) else {
            debug_assert!(false, "move_token: unknown token {id}");
            return;
        };
        token.footprint = to;
        if token.team.is_some() {
            self.occupy(id);
        }
    }

    /// Removes a token and clears its occupancy footprint.
    pub fn remove(&mut self, id: TokenId) -> Option<Token> {
        let idx = self.tokens.iter().position(|t| t.id == id)?;
        self.vacate(id);
        Some(self.tokens.remove(idx))
    }

    /// Empties the grid and restarts id assignment.
    pub fn clear(&mut self) {
        self.cells = [[None; N]; N];
        self.tokens.clear();
        self.next_id = 1;
    }

    /// Rebuilds the occupancy matrix from the token list. Consistency means
    /// this equals the live matrix; teamless tokens contribute nothing.
    pub fn derived_occupancy(&self) -> [[Option<TokenId>; N]; N] {
        let mut derived = [[None; N]; N];
        for token in &self.tokens {
            if token.team.is_none() {
                continue;
            }
            for (r, c) in token.footprint.cells() {
                derived[r as usize][c as usize] = Some(token.id);
            }
        }
        derived
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(row: i32, col: i32, size: i32) -> Footprint {
        Footprint::new(row, col, size)
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = GridModel::new();
        assert!(grid.tokens().is_empty());
        assert_eq!(grid.occupant(0, 0), None);
        assert_eq!(grid.peek_next_id(), TokenId(1));
    }

    #[test]
    fn spawn_with_team_occupies_footprint() {
        let mut grid = GridModel::new();
        let id = grid.spawn(fp(3, 4, 2), Some(Team::Enemy));
        assert_eq!(id, TokenId(1));
        for (r, c) in fp(3, 4, 2).cells() {
            assert_eq!(grid.occupant(r, c), Some(id));
        }
        assert_eq!(grid.occupant(5, 4), None);
    }

    #[test]
    fn teamless_spawn_does_not_occupy() {
        let mut grid = GridModel::new();
        let id = grid.spawn(fp(0, 0, 1), None);
        assert_eq!(grid.occupant(0, 0), None);
        assert!(!grid.token(id).unwrap().is_placed());

        grid.assign_team(id, Team::Ally);
        assert_eq!(grid.occupant(0, 0), Some(id));
    }

    #[test]
    fn is_free_honors_ignore_id() {
        let mut grid = GridModel::new();
        let id = grid.spawn(fp(5, 5, 2), Some(Team::Ally));
        assert!(!grid.is_free(fp(6, 6, 2), None));
        assert!(grid.is_free(fp(6, 6, 2), Some(id)));
        assert!(!grid.is_free(fp(19, 19, 2), None));
    }

    #[test]
    fn move_token_relocates_occupancy() {
        let mut grid = GridModel::new();
        let id = grid.spawn(fp(0, 0, 2), Some(Team::Ally));
        grid.move_token(id, fp(10, 10, 2));
        assert_eq!(grid.occupant(0, 0), None);
        assert_eq!(grid.occupant(10, 10), Some(id));
        assert_eq!(grid.token(id).unwrap().footprint, fp(10, 10, 2));
    }

    #[test]
    fn remove_clears_cells_and_list() {
        let mut grid = GridModel::new();
        let id = grid.spawn(fp(2, 2, 3), Some(Team::Enemy));
        let removed = grid.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(grid.occupant(3, 3), None);
        assert!(grid.tokens().is_empty());
        assert!(grid.remove(id).is_none());
    }

    #[test]
    fn ids_are_monotonic_until_clear() {
        let mut grid = GridModel::new();
        let a = grid.spawn(fp(0, 0, 1), Some(Team::Ally));
        let b = grid.spawn(fp(0, 1, 1), Some(Team::Ally));
        grid.remove(a);
        let c = grid.spawn(fp(0, 2, 1), Some(Team::Ally));
        assert!(a < b && b < c);

        grid.clear();
        assert_eq!(grid.peek_next_id(), TokenId(1));
    }

    #[test]
    fn swap_team_flips_placed_tokens_only() {
        let mut grid = GridModel::new();
        let placed = grid.spawn(fp(0, 0, 1), Some(Team::Ally));
        let pending = grid.spawn(fp(2, 2, 1), None);
        grid.swap_team(placed);
        grid.swap_team(pending);
        assert_eq!(grid.token(placed).unwrap().team, Some(Team::Enemy));
        assert_eq!(grid.token(pending).unwrap().team, None);
    }

    #[test]
    fn derived_occupancy_matches_live_matrix() {
        let mut grid = GridModel::new();
        grid.spawn(fp(1, 1, 2), Some(Team::Ally));
        grid.spawn(fp(4, 4, 3), Some(Team::Enemy));
        grid.spawn(fp(10, 10, 1), None);
        let derived = grid.derived_occupancy();
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                assert_eq!(derived[r as usize][c as usize], grid.occupant(r, c));
            }
        }
    }
}
