//! Combat/turn orchestrator.
//!
//! Owns the board, both card economies, both characters and the score, and
//! sequences every transition between them:
//!
//! ```text
//! WaitingForPlayer ──move──▶ line check
//!     lines  → damage, Resolving ──(clear, settle)──▶ GameOver | WaitingForPlayer
//!     full   → tie, Resolving ──(board reset)──▶ WaitingForPlayer
//!     else   → AiThinking (direct) | WaitingForEndTurn (cards)
//! WaitingForEndTurn ──end turn──▶ AiThinking
//! AiThinking ──(opponent move)──▶ line check, then WaitingForPlayer
//! GameOver ──reset──▶ WaitingForPlayer
//! ```
//!
//! Invalid requests are rejected without touching state or publishing
//! events. A reset is accepted in any state and cancels every pending
//! deferred transition.

use tracing::{debug, info};

use super::events::{EventListener, EventLog, GameEvent, StatusMessage};
use super::scheduler::{Millis, Scheduler};
use super::state::{MatchSnapshot, TurnState};
use crate::ai::{MovePolicy, MoveSelector};
use crate::board::{Board, LineCheck, LinePattern, Mark};
use crate::cards::{Card, CardEconomy, CardId, DeckCounts};
use crate::combat::{line_damage, Character, Score};
use crate::core::{ConfigError, GameConfig, GameRng, PlayMode, Side, SideMap};

/// Why an inbound request was ignored.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("not accepted while {0}")]
    WrongState(TurnState),

    #[error("not available in {0:?} mode")]
    WrongMode(PlayMode),

    #[error("cell {0} is out of range or occupied")]
    InvalidCell(usize),

    #[error("{0} is not in hand")]
    CardNotInHand(CardId),

    #[error("{0} does not place the player's mark")]
    CardNotPlayable(CardId),

    #[error("skill must be within [0, 1], got {0}")]
    InvalidSkill(f64),
}

/// Transitions that run after a pause.
#[derive(Clone, Debug, PartialEq)]
enum Deferred {
    OpponentTurn,
    ClearLines(Vec<LinePattern>),
    SettleAfterScore,
    ResetAfterTie,
}

/// The match state machine.
///
/// ```
/// use gridlock::core::GameConfig;
/// use gridlock::orchestrator::{Orchestrator, TurnState};
///
/// let mut game = Orchestrator::new(GameConfig::default()).unwrap();
/// game.request_player_move(4).unwrap();
/// assert_eq!(game.current_state(), TurnState::AiThinking);
///
/// // Input during the opponent's pause is ignored
/// assert!(game.request_player_move(0).is_err());
///
/// game.tick(500);
/// assert_eq!(game.current_state(), TurnState::WaitingForPlayer);
/// ```
pub struct Orchestrator {
    config: GameConfig,
    board: Board,
    policy: Box<dyn MovePolicy>,
    economy: CardEconomy,
    card_rng: GameRng,
    characters: SideMap<Character>,
    score: Score,
    state: TurnState,
    scheduler: Scheduler<Deferred>,
    events: EventLog,
}

impl Orchestrator {
    /// Start a match with the skill-blended opponent.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed).for_context("ai");
        let selector = MoveSelector::new(config.skill, rng);
        Self::with_policy(config, Box::new(selector))
    }

    /// Start a match with a custom opponent policy.
    pub fn with_policy(config: GameConfig, policy: Box<dyn MovePolicy>) -> Result<Self, ConfigError> {
        config.validate()?;

        let root = GameRng::new(config.seed);
        let economy = CardEconomy::new(&config, root.for_context("deck"));
        let characters = SideMap::new(|side| Character::new(config.starting_health(side)));

        let mut game = Self {
            board: Board::new(),
            policy,
            economy,
            card_rng: root.for_context("opponent-cards"),
            characters,
            score: Score::default(),
            state: TurnState::WaitingForPlayer,
            scheduler: Scheduler::new(),
            events: EventLog::new(),
            config,
        };
        game.start_game();
        Ok(game)
    }

    // === Inbound requests ===

    /// Direct mode: place the human mark at `index`.
    pub fn request_player_move(&mut self, index: usize) -> Result<(), Rejection> {
        self.expect_mode(PlayMode::Direct)?;
        self.expect_state(TurnState::WaitingForPlayer)?;
        if !self.board.is_valid_move(index) {
            return reject(Rejection::InvalidCell(index));
        }

        self.place(Side::Player, index);
        self.after_move(Side::Player);
        Ok(())
    }

    /// Card mode: play `card` from the human hand onto `index`.
    pub fn request_play_card(&mut self, card: CardId, index: usize) -> Result<(), Rejection> {
        self.expect_mode(PlayMode::Cards)?;
        self.expect_state(TurnState::WaitingForPlayer)?;
        if !self.board.is_valid_move(index) {
            return reject(Rejection::InvalidCell(index));
        }
        match self.economy.holds(Side::Player, card) {
            None => return reject(Rejection::CardNotInHand(card)),
            Some(held) if held.mark() != Side::Player.mark() => {
                return reject(Rejection::CardNotPlayable(card));
            }
            Some(_) => {}
        }

        self.play_card(Side::Player, card);
        self.place(Side::Player, index);
        self.after_move(Side::Player);
        Ok(())
    }

    /// Card mode: hand the turn to the opponent after playing a card.
    pub fn request_end_turn(&mut self) -> Result<(), Rejection> {
        self.expect_mode(PlayMode::Cards)?;
        self.expect_state(TurnState::WaitingForEndTurn)?;
        self.begin_opponent_turn();
        Ok(())
    }

    /// Start a new game: fresh board, full health, fresh decks. The score is
    /// kept. Any pending deferred transition is cancelled.
    pub fn request_reset(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        debug!(cancelled, from = %self.state, "reset requested");
        self.start_game();
    }

    /// Change the opponent's skill.
    pub fn set_difficulty(&mut self, skill: f64) -> Result<(), Rejection> {
        if !(0.0..=1.0).contains(&skill) {
            return reject(Rejection::InvalidSkill(skill));
        }
        self.config.skill = skill;
        self.policy.set_skill(skill);
        debug!(skill, "difficulty changed");
        Ok(())
    }

    // === Time ===

    /// Advance the clock by `elapsed` ms and run every transition now due.
    ///
    /// Each transition runs at its own due time, so anything it schedules
    /// is timed from that point rather than from the end of the tick.
    pub fn tick(&mut self, elapsed: Millis) {
        let target = self.scheduler.now().saturating_add(elapsed);
        while let Some(task) = self.scheduler.pop_due_by(target) {
            self.run(task);
        }
        let remaining = target.saturating_sub(self.scheduler.now());
        self.scheduler.advance(remaining);
    }

    /// Run pending transitions until none is left, jumping the clock as
    /// needed. Returns the number of transitions run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.scheduler.pop_next() {
            self.run(task);
            ran += 1;
        }
        ran
    }

    /// True if a deferred transition is waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.scheduler.is_empty()
    }

    // === Events ===

    /// Register a listener for every later event.
    pub fn subscribe(&mut self, listener: Box<dyn EventListener>) {
        self.events.subscribe(listener);
    }

    /// Take all events published since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // === Queries ===

    #[must_use]
    pub fn board_snapshot(&self) -> Board {
        self.board.clone()
    }

    #[must_use]
    pub fn score_snapshot(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn current_state(&self) -> TurnState {
        self.state
    }

    #[must_use]
    pub fn hand_snapshot(&self, side: Side) -> Vec<Card> {
        self.economy.hand(side).to_vec()
    }

    #[must_use]
    pub fn deck_counts(&self, side: Side) -> DeckCounts {
        self.economy.deck_counts(side)
    }

    #[must_use]
    pub fn character(&self, side: Side) -> Character {
        self.characters[side]
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Everything presentation needs in one value.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            state: self.state,
            board: self.board.cells(),
            characters: self.characters.clone(),
            score: self.score,
            hands: SideMap::new(|side| self.hand_snapshot(side)),
            deck_counts: SideMap::new(|side| self.deck_counts(side)),
            skill: self.config.skill,
        }
    }

    // === Transitions ===

    fn start_game(&mut self) {
        self.board.reset();
        for (_, character) in self.characters.iter_mut() {
            character.reset();
        }
        self.publish(GameEvent::BoardReset);

        if self.config.mode == PlayMode::Cards {
            self.economy.reset();
            for side in Side::ALL {
                self.economy.draw_initial_hand(side);
                self.publish_hand(side);
            }
        }

        self.enter_player_turn();
        info!(mode = ?self.config.mode, score = %self.score, "new game started");
    }

    fn run(&mut self, task: Deferred) {
        debug!(?task, state = %self.state, clock = self.scheduler.now(), "running deferred transition");
        match task {
            Deferred::OpponentTurn => self.opponent_turn(),
            Deferred::ClearLines(patterns) => {
                let cleared = self.board.clear_lines(&patterns);
                self.publish(GameEvent::LinesCleared { cells: cleared.to_vec() });
            }
            Deferred::SettleAfterScore => {
                if Side::ALL.iter().any(|&side| self.characters[side].is_defeated()) {
                    self.finish_game();
                } else {
                    self.begin_player_turn();
                }
            }
            Deferred::ResetAfterTie => {
                self.board.reset();
                self.publish(GameEvent::BoardReset);
                self.begin_player_turn();
            }
        }
    }

    fn place(&mut self, side: Side, index: usize) {
        let mark = side.mark();
        if self.board.apply_move(index, mark) {
            debug!(%side, index, "mark placed");
            self.publish(GameEvent::CellFilled { index, mark });
        }
    }

    fn play_card(&mut self, side: Side, card: CardId) {
        if let Some(played) = self.economy.play(card, side) {
            self.economy.discard(played, side);
            self.publish_hand(side);
        }
    }

    fn after_move(&mut self, mover: Side) {
        let check = self.board.evaluate_lines();
        if !check.is_empty() {
            self.score_lines(&check);
        } else if self.board.is_full() {
            self.tie();
        } else {
            match (mover, self.config.mode) {
                (Side::Player, PlayMode::Direct) => self.begin_opponent_turn(),
                (Side::Player, PlayMode::Cards) => {
                    self.state = TurnState::WaitingForEndTurn;
                    self.publish(GameEvent::status(StatusMessage::EndTurnPrompt));
                }
                (Side::Opponent, _) => self.begin_player_turn(),
            }
        }
    }

    fn score_lines(&mut self, check: &LineCheck) {
        let scorers: Vec<Mark> = check.scorers().collect();
        for mark in scorers {
            let lines = check.patterns_for(mark);
            let attacker = Side::of_mark(mark);
            let target = attacker.other();
            let damage = line_damage(lines.len(), self.config.damage_per_line);

            self.characters[target].take_damage(damage);
            self.characters[attacker].record_dealt(damage);
            debug!(
                %attacker,
                lines = lines.len(),
                damage,
                target_health = self.characters[target].health,
                "lines scored"
            );

            let line_count = lines.len();
            self.publish(GameEvent::LinesCompleted { lines, mark });
            self.publish(GameEvent::DamageApplied { target, amount: damage });
            let message = match attacker {
                Side::Player => StatusMessage::PlayerCombo { lines: line_count, damage },
                Side::Opponent => StatusMessage::OpponentCombo { lines: line_count, damage },
            };
            self.publish(GameEvent::status(message));

            if self.config.mode == PlayMode::Cards && !self.economy.refill_after_score(attacker).is_empty() {
                self.publish_hand(attacker);
            }
        }

        self.state = TurnState::Resolving;
        let clear_at = self.config.line_clear_delay_ms;
        let settle_at = self.config.line_settle_delay_ms.max(clear_at);
        self.scheduler.schedule(clear_at, Deferred::ClearLines(check.patterns().collect()));
        self.scheduler.schedule(settle_at, Deferred::SettleAfterScore);
    }

    fn tie(&mut self) {
        self.score.record_tie();
        info!(score = %self.score, "board full, tie");
        self.publish(GameEvent::TieDetected);
        self.publish(GameEvent::ScoreChanged { score: self.score });
        self.publish(GameEvent::status(StatusMessage::Tie));

        self.state = TurnState::Resolving;
        self.scheduler.schedule(self.config.tie_reset_delay_ms, Deferred::ResetAfterTie);
    }

    fn finish_game(&mut self) {
        let winner = if self.characters[Side::Player].is_defeated() {
            Side::Opponent
        } else {
            Side::Player
        };
        self.state = TurnState::GameOver;
        self.score.record_win(winner);
        info!(%winner, score = %self.score, "game over");

        self.publish(GameEvent::ScoreChanged { score: self.score });
        let message = match winner {
            Side::Player => StatusMessage::Victory,
            Side::Opponent => StatusMessage::Defeat,
        };
        self.publish(GameEvent::status(message));
        self.publish(GameEvent::GameOver { winner });
    }

    fn begin_opponent_turn(&mut self) {
        self.state = TurnState::AiThinking;
        self.publish(GameEvent::status(StatusMessage::OpponentThinking));
        self.scheduler.schedule(self.config.ai_delay_ms, Deferred::OpponentTurn);
    }

    fn opponent_turn(&mut self) {
        if self.state != TurnState::AiThinking {
            return;
        }
        let side = Side::Opponent;
        let mark = side.mark();

        if self.config.mode == PlayMode::Cards {
            if self.economy.draw(side).is_ok() {
                self.publish_hand(side);
            }
            let playable: Vec<CardId> = self
                .economy
                .hand(side)
                .iter()
                .filter(|card| card.mark() == mark)
                .map(|card| card.id)
                .collect();
            let Some(&card) = self.card_rng.choose(&playable) else {
                debug!("opponent has no playable card, passing");
                self.begin_player_turn();
                return;
            };
            self.play_card(side, card);
        }

        let Some(index) = self.policy.choose_move(&self.board, mark) else {
            debug!("opponent found no move, passing");
            self.begin_player_turn();
            return;
        };
        self.place(side, index);
        self.after_move(side);
    }

    /// Hand play back to the human. In card mode the human draws first.
    fn begin_player_turn(&mut self) {
        if self.config.mode == PlayMode::Cards && self.economy.draw(Side::Player).is_ok() {
            self.publish_hand(Side::Player);
        }
        self.enter_player_turn();
    }

    fn enter_player_turn(&mut self) {
        self.state = TurnState::WaitingForPlayer;
        let message = match self.config.mode {
            PlayMode::Direct => StatusMessage::YourTurn,
            PlayMode::Cards => StatusMessage::PlayCard,
        };
        self.publish(GameEvent::status(message));
    }

    // === Helpers ===

    fn expect_state(&self, expected: TurnState) -> Result<(), Rejection> {
        if self.state == expected {
            Ok(())
        } else {
            reject(Rejection::WrongState(self.state))
        }
    }

    fn expect_mode(&self, expected: PlayMode) -> Result<(), Rejection> {
        if self.config.mode == expected {
            Ok(())
        } else {
            reject(Rejection::WrongMode(self.config.mode))
        }
    }

    fn publish(&mut self, event: GameEvent) {
        self.events.publish(event);
    }

    fn publish_hand(&mut self, side: Side) {
        let hand = self.hand_snapshot(side);
        self.publish(GameEvent::HandChanged { side, hand });
    }
}

fn reject(rejection: Rejection) -> Result<(), Rejection> {
    debug!(%rejection, "request rejected");
    Err(rejection)
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("state", &self.state)
            .field("board", &self.board)
            .field("characters", &self.characters)
            .field("score", &self.score)
            .field("pending", &self.scheduler.len())
            .finish_non_exhaustive()
    }
}
