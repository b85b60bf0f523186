use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use crate::board::{CompositeBoard, MacroBoard, Move, Player};
use crate::config::{EngineConfig, SafetyMode};
use crate::error::{Error, Result};
use crate::search::rank::Ranker;
use crate::search::safety::{is_safe_destination, pick_safe_move};

/// A microboard together with our ranked local moves in it.
struct Plan {
    at: Move,
    ranked: Vec<Move>,
}

impl Plan {
    fn top(&self) -> Option<Move> { self.ranked.first().copied() }
}

/// Holds the authoritative board for one player and decides its moves.
pub struct Engine {
    board: CompositeBoard,
    me: Player,
    config: EngineConfig,
    ranker: Ranker,
    rng: SmallRng,
}

impl Engine {
    pub fn new(me: Player, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { board: CompositeBoard::new(), me, config, ranker: Ranker::standard(), rng }
    }

    pub fn with_ranker(mut self, ranker: Ranker) -> Self { self.ranker = ranker; self }

    pub fn player(&self) -> Player { self.me }
    pub fn set_player(&mut self, me: Player) { self.me = me; }
    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn board(&self) -> &CompositeBoard { &self.board }
    pub fn board_mut(&mut self) -> &mut CompositeBoard { &mut self.board }

    /// Replaces the whole board. A rejected update keeps the previous state.
    pub fn apply_board_update(&mut self, cells: &[i64], statuses: &[i64]) -> Result<()> {
        self.board.apply_update(cells, statuses)
    }

    /// Candidate microboards ordered by the rule chain run over the macro game.
    pub fn rank_microboards(&mut self, valid: &MacroBoard) -> Vec<Move> {
        let candidates = self.board.candidate_microboards();
        let grid = valid.to_grid(self.config.disabled_scoring);
        self.ranker
            .rank(&grid, self.me, &mut self.rng)
            .into_iter()
            .filter(|m| candidates.contains(m))
            .filter(|m| self.board.microboard(m.x, m.y).has_legal_move())
            .collect()
    }

    fn plan(&mut self, at: Move) -> Plan {
        let micro = self.board.microboard(at.x, at.y);
        let ranked = self.ranker.rank(&micro, self.me, &mut self.rng);
        Plan { at, ranked }
    }

    fn safe_cell(&self, valid: &MacroBoard, plan: &Plan) -> Option<Move> {
        let micro = self.board.microboard(plan.at.x, plan.at.y);
        pick_safe_move(&self.board, valid, plan.at, &micro, &plan.ranked, self.me, self.config.safety_threshold)
    }

    fn top_is_safe(&self, valid: &MacroBoard, plan: &Plan) -> bool {
        let micro = self.board.microboard(plan.at.x, plan.at.y);
        plan.top().is_some_and(|local| {
            is_safe_destination(&self.board, valid, plan.at, &micro, local, self.me, self.config.safety_threshold)
        })
    }

    fn choose_forced(&mut self, valid: &MacroBoard, at: Move) -> Result<(Move, Move)> {
        debug!("playing on microboard {}", at);
        let plan = self.plan(at);
        let local = match self.config.safety {
            SafetyMode::AnySafeCell => self.safe_cell(valid, &plan).or_else(|| plan.top()),
            SafetyMode::Off | SafetyMode::TopRanked => plan.top(),
        };
        local.map(|l| (at, l)).ok_or(Error::NoLegalMove)
    }

    fn choose_free(&mut self, valid: &MacroBoard) -> Result<(Move, Move)> {
        let boards = self.rank_microboards(valid);
        debug!("microboard preference: {:?}", boards);
        let plans: Vec<Plan> = boards.into_iter().map(|at| self.plan(at)).collect();
        let Some(fallback) = plans.first() else { return Err(Error::NoLegalMove) };

        let picked = match self.config.safety {
            SafetyMode::Off => None,
            SafetyMode::TopRanked => {
                let survivors: Vec<&Plan> = plans.iter().filter(|p| self.top_is_safe(valid, p)).collect();
                debug!("safe microboards: {:?}", survivors.iter().map(|p| p.at).collect::<Vec<_>>());
                survivors.first().and_then(|p| p.top().map(|l| (p.at, l)))
            }
            SafetyMode::AnySafeCell => plans.iter().find_map(|p| self.safe_cell(valid, p).map(|l| (p.at, l))),
        };
        if let Some(choice) = picked { return Ok(choice); }

        debug!("no safe microboard, falling back to {}", fallback.at);
        fallback.top().map(|l| (fallback.at, l)).ok_or(Error::NoLegalMove)
    }

    /// Decides the next move in global 9x9 coordinates.
    pub fn choose_move(&mut self) -> Result<Move> {
        debug!("board: {}", self.board);
        let valid = self.board.valid_macro_statuses();
        debug!("macroboard:\n{}", valid);

        let res = match self.board.active_microboard() {
            Some(at) => self.choose_forced(&valid, at),
            None => self.choose_free(&valid),
        };
        let (at, local) = res?;
        let global = Move::to_global(at, local);
        debug!("microboard {} local {} -> global {}", at, local, global);
        Ok(global)
    }
}
