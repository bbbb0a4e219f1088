use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use strum::IntoEnumIterator;

use crate::{
    action::Action,
    error::{GameError, StateError, ValidationError},
    event::{EndTurnReason, Event},
    game_state::{GameSession, Phase, TurnPhase},
    outcome::{GameSummary, RoundOutcome, Scores},
    recorder::GameRecorder,
    review::{Review, Verdict},
    round::Round,
    team::{Player, PlayerId, Roster, Team},
    timer::{TickOutcome, TimerToken},
    word_queue::WordQueue,
};

impl GameSession {
    /// Applies one intent and returns the events it produced. On error the session is unchanged.
    pub fn apply(&mut self, action: Action) -> Result<Vec<Event>, GameError> {
        let mut events = vec![];
        let result = match &action {
            Action::AddPlayer(team, name) => self.handle_add_player(*team, name, &mut events),
            Action::RemovePlayer(team, id) => self.handle_remove_player(*team, id, &mut events),
            Action::MovePlayer(id, from, to) => {
                self.handle_move_player(id, *from, *to, &mut events)
            }
            Action::SelectDeck(id) => self.handle_select_deck(id, &mut events),
            Action::StartGame(words) => self.handle_start_game(words, &mut events),
            Action::StartTimer => self.handle_start_timer(&mut events),
            Action::StopTimer => self.handle_stop_timer(&mut events),
            Action::Tick(token) => self.handle_tick(*token, &mut events),
            Action::MarkCorrect(word) => self.handle_judge(word, Verdict::Correct, &mut events),
            Action::MarkIncorrect(word) => {
                self.handle_judge(word, Verdict::Incorrect, &mut events)
            }
            Action::ToggleReview(word) => self.handle_toggle_review(word, &mut events),
            Action::ToggleReviewAt(index) => {
                self.handle_toggle_review_at(*index, &mut events)
            }
            Action::CommitReview => self.handle_commit_review(&mut events),
            Action::AdvanceTurn => self.handle_advance_turn(&mut events),
            Action::EndRound => self.handle_end_round(&mut events),
            Action::EndGame => self.handle_end_game(&mut events),
            Action::ResetGame => {
                self.handle_reset(&mut events);
                Ok(())
            }
        };

        match result {
            Ok(()) => {
                for event in &events {
                    debug!("{:?}", event);
                }
                self.log.extend(events.iter().cloned());
                Ok(events)
            }
            Err(e) => {
                warn!("Rejected {:?}: {}", action, e);
                Err(e)
            }
        }
    }

    pub fn add_player(&mut self, team: Team, name: &str) -> Result<Player, GameError> {
        let events = self.apply(Action::AddPlayer(team, name.to_string()))?;
        match events.into_iter().next() {
            Some(Event::PlayerAdded(_, player)) => Ok(player),
            _ => unreachable!("adding a player always emits PlayerAdded"),
        }
    }

    pub fn remove_player(&mut self, team: Team, id: &str) -> Result<(), GameError> {
        self.apply(Action::RemovePlayer(team, id.to_string()))
            .map(|_| ())
    }

    pub fn move_player(&mut self, id: &str, from: Team, to: Team) -> Result<(), GameError> {
        self.apply(Action::MovePlayer(id.to_string(), from, to))
            .map(|_| ())
    }

    pub fn select_deck(&mut self, deck_id: &str) -> Result<(), GameError> {
        self.apply(Action::SelectDeck(deck_id.to_string()))
            .map(|_| ())
    }

    pub fn start_game(&mut self, words: Vec<String>) -> Result<(), GameError> {
        self.apply(Action::StartGame(words)).map(|_| ())
    }

    /// Starts or resumes the countdown and returns the token the tick source must present.
    pub fn start_timer(&mut self) -> Result<TimerToken, GameError> {
        self.apply(Action::StartTimer)?;
        Ok(self.timer.token())
    }

    pub fn stop_timer(&mut self) -> Result<(), GameError> {
        self.apply(Action::StopTimer).map(|_| ())
    }

    pub fn tick(&mut self, token: TimerToken) -> Result<Vec<Event>, GameError> {
        self.apply(Action::Tick(token))
    }

    pub fn mark_correct(&mut self, word: &str) -> Result<Vec<Event>, GameError> {
        self.apply(Action::MarkCorrect(word.to_string()))
    }

    pub fn mark_incorrect(&mut self, word: &str) -> Result<Vec<Event>, GameError> {
        self.apply(Action::MarkIncorrect(word.to_string()))
    }

    /// Flips the first review entry for `word`. Use [`GameSession::toggle_review_at`] when
    /// the deck repeats words.
    pub fn toggle_review(&mut self, word: &str) -> Result<Verdict, GameError> {
        let events = self.apply(Action::ToggleReview(word.to_string()))?;
        toggled_verdict(events)
    }

    pub fn toggle_review_at(&mut self, index: usize) -> Result<Verdict, GameError> {
        let events = self.apply(Action::ToggleReviewAt(index))?;
        toggled_verdict(events)
    }

    pub fn commit_review(&mut self) -> Result<(), GameError> {
        self.apply(Action::CommitReview).map(|_| ())
    }

    /// Moves to the next player. Returns `false` when the team now due has nobody to play,
    /// which ends the round.
    pub fn advance_turn(&mut self) -> Result<bool, GameError> {
        self.apply(Action::AdvanceTurn)?;
        Ok(self.current_player().is_some())
    }

    pub fn end_round(&mut self) -> Result<RoundOutcome, GameError> {
        self.apply(Action::EndRound)?;
        match self.history.last() {
            Some(outcome) => Ok(outcome.clone()),
            None => unreachable!("ending a round always records an outcome"),
        }
    }

    pub fn end_game(&mut self) -> Result<GameSummary, GameError> {
        self.apply(Action::EndGame)?;
        match &self.summary {
            Some(summary) => Ok(summary.clone()),
            None => unreachable!("ending a game always builds a summary"),
        }
    }

    pub fn reset_game(&mut self) {
        // reset never fails
        let _ = self.apply(Action::ResetGame);
    }

    /// Ends the game and hands the summary to `recorder`. A recorder failure is logged and
    /// does not affect the returned summary.
    ///
    /// The session is left `Ended` rather than cleared, keeping the roster and summary for a
    /// rematch through [`GameSession::start_game`]. Call [`GameSession::reset_game`] to clear it.
    pub fn finish<R: GameRecorder + ?Sized>(
        &mut self,
        recorder: &R,
    ) -> Result<GameSummary, GameError> {
        let summary = self.end_game()?;
        match recorder.record(&summary) {
            Ok(()) => info!("Game recorded"),
            Err(e) => warn!("Game could not be recorded: {}", e),
        }
        Ok(summary)
    }

    // Setup ----------------------------------------------------------------

    fn require_setup(&self) -> Result<(), GameError> {
        if self.is_in_progress() {
            return Err(StateError::GameInProgress.into());
        }
        Ok(())
    }

    fn handle_add_player(
        &mut self,
        team: Team,
        name: &str,
        events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.require_setup()?;
        let player = self.roster.add(team, name)?;
        events.push(Event::PlayerAdded(team, player));
        Ok(())
    }

    fn handle_remove_player(
        &mut self,
        team: Team,
        id: &PlayerId,
        events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.require_setup()?;
        let player = self.roster.remove(team, id)?;
        events.push(Event::PlayerRemoved(team, player.id));
        Ok(())
    }

    fn handle_move_player(
        &mut self,
        id: &PlayerId,
        from: Team,
        to: Team,
        events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.require_setup()?;
        self.roster.move_player(id, from, to)?;
        events.push(Event::PlayerMoved(id.clone(), from, to));
        Ok(())
    }

    fn handle_select_deck(&mut self, id: &str, events: &mut Vec<Event>) -> Result<(), GameError> {
        self.require_setup()?;
        self.deck_id = Some(id.to_string());
        events.push(Event::DeckSelected(id.to_string()));
        Ok(())
    }

    fn handle_start_game(
        &mut self,
        words: &[String],
        events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.require_setup()?;
        let words: Vec<String> = words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            return Err(ValidationError::NoWords.into());
        }
        if let Some(team) = Team::iter().find(|&t| self.roster.is_empty(t)) {
            return Err(ValidationError::EmptyTeam(team).into());
        }

        let word_count = words.len();
        self.queue = WordQueue::shuffled(words, &mut self.rng);
        self.phase = Phase::InProgress(Round::first());
        self.scores = Scores::default();
        self.history.clear();
        self.review = Review::new();
        self.round_correct.clear();
        self.round_incorrect.clear();
        self.round_closed = false;
        self.summary = None;
        self.reset_rotation();

        info!("Game started with {} words", word_count);
        events.push(Event::GameStarted(word_count));
        events.push(Event::RoundStarted(Round::first()));
        self.prepare_turn(events);
        Ok(())
    }

    // Turn -----------------------------------------------------------------

    fn require_open_round(&self) -> Result<Round, GameError> {
        match self.phase {
            Phase::InProgress(round) if self.round_closed => {
                Err(StateError::RoundAlreadyEnded(round).into())
            }
            Phase::InProgress(round) => Ok(round),
            _ => Err(StateError::GameNotInProgress.into()),
        }
    }

    fn reset_rotation(&mut self) {
        self.current_team = Team::Blue;
        self.current_player_index = 0;
        self.rotation_stalled = false;
    }

    /// Resets the timer for the player now due. A team without players stalls the rotation.
    fn prepare_turn(&mut self, events: &mut Vec<Event>) {
        self.timer.reset();
        self.turn = TurnPhase::Ready;
        match self.current_player().cloned() {
            Some(player) => {
                self.rotation_stalled = false;
                events.push(Event::TurnReady(self.current_team, player));
            }
            None => {
                warn!("Team {} has no players, ending round", self.current_team);
                self.rotation_stalled = true;
                events.push(Event::RotationStalled(self.current_team));
            }
        }
    }

    /// The single place a turn closes.
    fn end_turn(&mut self, reason: EndTurnReason, events: &mut Vec<Event>) {
        self.timer.stop();
        self.turn = TurnPhase::Over(reason);
        debug!("Turn ended: {}", reason);
        events.push(Event::TurnEnded(reason));
    }

    fn handle_start_timer(&mut self, events: &mut Vec<Event>) -> Result<(), GameError> {
        self.require_open_round()?;
        let turn = self.turn;
        match turn {
            TurnPhase::Over(_) => Err(StateError::NoActiveTurn.into()),
            TurnPhase::Playing if self.timer.is_running() => Err(StateError::TimerRunning.into()),
            TurnPhase::Ready if self.current_player().is_none() => {
                // nobody can take this turn
                self.rotation_stalled = true;
                events.push(Event::RotationStalled(self.current_team));
                Ok(())
            }
            _ if self.queue.is_exhausted() => {
                self.end_turn(EndTurnReason::WordsExhausted, events);
                Ok(())
            }
            // a zero-length turn has no time to play
            _ if self.timer.remaining() == 0 => {
                self.end_turn(EndTurnReason::TimeExpired, events);
                Ok(())
            }
            _ => {
                self.timer.start();
                self.turn = TurnPhase::Playing;
                events.push(Event::TimerStarted(self.timer.remaining()));
                Ok(())
            }
        }
    }

    fn handle_stop_timer(&mut self, events: &mut Vec<Event>) -> Result<(), GameError> {
        self.require_open_round()?;
        if self.turn != TurnPhase::Playing || !self.timer.is_running() {
            return Err(StateError::NoActiveTurn.into());
        }
        self.timer.stop();
        events.push(Event::TimerStopped(self.timer.remaining()));
        Ok(())
    }

    fn handle_tick(&mut self, token: TimerToken, events: &mut Vec<Event>) -> Result<(), GameError> {
        match self.timer.tick(token) {
            TickOutcome::Ignored => {}
            TickOutcome::Running(remaining) => events.push(Event::TimerTicked(remaining)),
            TickOutcome::Expired => {
                events.push(Event::TimerTicked(0));
                self.end_turn(EndTurnReason::TimeExpired, events);
            }
        }
        Ok(())
    }

    fn handle_judge(
        &mut self,
        word: &str,
        verdict: Verdict,
        events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.require_open_round()?;
        if self.queue.is_exhausted() {
            if !matches!(self.turn, TurnPhase::Over(_)) {
                self.end_turn(EndTurnReason::WordsExhausted, events);
            }
            return Ok(());
        }
        if self.turn != TurnPhase::Playing || !self.timer.is_running() {
            return Err(StateError::NoActiveTurn.into());
        }
        let expected = match self.queue.current() {
            Some(current) if current == word => current.clone(),
            Some(current) => {
                return Err(ValidationError::WordNotPresented {
                    expected: current.clone(),
                    got: word.to_string(),
                }
                .into())
            }
            None => unreachable!("queue is not exhausted"),
        };

        let team = self.current_team;
        if verdict == Verdict::Correct {
            self.scores.add(team);
        }
        self.review.record(expected.clone(), verdict, team);
        self.queue.advance();
        events.push(Event::WordJudged(expected, verdict, team));

        if self.queue.is_exhausted() {
            self.end_turn(EndTurnReason::WordsExhausted, events);
        }
        Ok(())
    }

    // Review ---------------------------------------------------------------

    fn handle_toggle_review(
        &mut self,
        word: &str,
        events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.require_review_window()?;
        let index = self
            .review
            .position(word)
            .ok_or_else(|| ValidationError::NotUnderReview(word.to_string()))?;
        self.toggle_entry(index, events)
    }

    fn handle_toggle_review_at(
        &mut self,
        index: usize,
        events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.require_review_window()?;
        self.toggle_entry(index, events)
    }

    /// Flipping a verdict also moves the point: the score of the team that played the word
    /// always equals its number of words judged correct.
    fn toggle_entry(&mut self, index: usize, events: &mut Vec<Event>) -> Result<(), GameError> {
        let entry = self
            .review
            .toggle_at(index)
            .ok_or(ValidationError::NoReviewEntry(index))?;
        let (word, verdict, team) = (entry.word.clone(), entry.verdict, entry.team);
        match verdict {
            Verdict::Correct => self.scores.add(team),
            Verdict::Incorrect => self.scores.subtract(team),
        }
        events.push(Event::ReviewToggled(word, verdict));
        Ok(())
    }

    fn require_review_window(&self) -> Result<(), GameError> {
        self.require_open_round()?;
        if self.is_timer_live() {
            return Err(StateError::TurnInProgress.into());
        }
        Ok(())
    }

    fn handle_commit_review(&mut self, events: &mut Vec<Event>) -> Result<(), GameError> {
        self.require_review_window()?;
        self.commit(events);
        Ok(())
    }

    /// Review is closed only while the clock is actually counting down; a paused turn may
    /// be corrected.
    fn is_timer_live(&self) -> bool {
        self.turn == TurnPhase::Playing && self.timer.is_running()
    }

    fn commit(&mut self, events: &mut Vec<Event>) {
        if self.review.is_empty() {
            return;
        }
        let (mut correct, mut incorrect) = (0, 0);
        for entry in self.review.drain() {
            match entry.verdict {
                Verdict::Correct => {
                    correct += 1;
                    self.round_correct.push(entry.word);
                }
                Verdict::Incorrect => {
                    incorrect += 1;
                    self.round_incorrect.push(entry.word);
                }
            }
        }
        events.push(Event::ReviewCommitted { correct, incorrect });
    }

    // Rotation -------------------------------------------------------------

    fn handle_advance_turn(&mut self, events: &mut Vec<Event>) -> Result<(), GameError> {
        self.require_open_round()?;
        if self.turn == TurnPhase::Playing {
            return Err(StateError::TurnInProgress.into());
        }
        self.commit(events);

        self.current_player_index += 1;
        if self.current_player_index >= self.roster.players(self.current_team).len() {
            self.current_team = self.current_team.other();
            self.current_player_index = 0;
        }
        self.prepare_turn(events);
        Ok(())
    }

    // Round & game ---------------------------------------------------------

    fn close_round(&mut self, round: Round, events: &mut Vec<Event>) {
        if self.turn == TurnPhase::Playing {
            self.end_turn(EndTurnReason::Interrupted, events);
        }
        self.timer.reset();
        self.commit(events);

        let outcome = RoundOutcome {
            round,
            correct: std::mem::take(&mut self.round_correct),
            incorrect: std::mem::take(&mut self.round_incorrect),
            scores: self.scores,
        };
        info!(
            "Round {} ended: {} correct, {} incorrect, blue {} red {}",
            round.number(),
            outcome.correct.len(),
            outcome.incorrect.len(),
            self.scores.blue,
            self.scores.red
        );
        self.history.push(outcome.clone());
        self.round_closed = true;
        events.push(Event::RoundEnded(outcome));
    }

    fn handle_end_round(&mut self, events: &mut Vec<Event>) -> Result<(), GameError> {
        let round = self.require_open_round()?;
        self.close_round(round, events);

        if let Some(next) = round.next() {
            self.queue.reshuffle(&mut self.rng);
            self.reset_rotation();
            self.round_closed = false;
            self.phase = Phase::InProgress(next);
            events.push(Event::RoundStarted(next));
            self.prepare_turn(events);
        }
        Ok(())
    }

    fn handle_end_game(&mut self, events: &mut Vec<Event>) -> Result<(), GameError> {
        let round = match self.phase {
            Phase::InProgress(round) => round,
            _ => return Err(StateError::GameNotInProgress.into()),
        };
        if !self.round_closed {
            self.close_round(round, events);
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let summary = GameSummary::new(
            timestamp,
            self.deck_id.clone(),
            self.scores,
            self.history.clone(),
            &self.roster,
        );
        match summary.winner {
            Some(team) => info!("Game over, team {} wins", team),
            None => info!("Game over, tie"),
        }
        self.phase = Phase::Ended;
        self.turn = TurnPhase::Ready;
        self.summary = Some(summary.clone());
        events.push(Event::GameEnded(summary));
        Ok(())
    }

    fn handle_reset(&mut self, events: &mut Vec<Event>) {
        self.roster = Roster::new();
        self.phase = Phase::NotStarted;
        self.turn = TurnPhase::Ready;
        self.scores = Scores::default();
        self.queue = WordQueue::default();
        self.timer.reset();
        self.review = Review::new();
        self.round_correct.clear();
        self.round_incorrect.clear();
        self.round_closed = false;
        self.history.clear();
        self.deck_id = None;
        self.summary = None;
        self.log.clear();
        self.reset_rotation();
        events.push(Event::GameReset);
    }
}

fn toggled_verdict(events: Vec<Event>) -> Result<Verdict, GameError> {
    match events.into_iter().next() {
        Some(Event::ReviewToggled(_, verdict)) => Ok(verdict),
        _ => unreachable!("toggling always emits ReviewToggled"),
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{
        config::GameConfig,
        error::{GameError, StateError, ValidationError},
        event::{EndTurnReason, Event},
        game_state::{GameSession, Phase, TurnPhase},
        outcome::GameSummary,
        recorder::{GameRecorder, MemoryRecorder, RecordError},
        review::Verdict,
        round::Round,
        team::Team,
        timer::TimerToken,
    };

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    fn session() -> GameSession {
        GameSession::new(GameConfig {
            turn_seconds: 30,
            seed: Some(42),
        })
    }

    /// blue = [Alice, Bob], red = [Carol], words = [sol, luna, mar]
    fn started() -> GameSession {
        let mut game = session();
        game.add_player(Team::Blue, "Alice").unwrap();
        game.add_player(Team::Blue, "Bob").unwrap();
        game.add_player(Team::Red, "Carol").unwrap();
        game.start_game(words(&["sol", "luna", "mar"])).unwrap();
        game
    }

    fn current_name(game: &GameSession) -> String {
        game.current_player().unwrap().name.clone()
    }

    fn judge_current(game: &mut GameSession, verdict: Verdict) {
        let word = game.current_word().unwrap().clone();
        match verdict {
            Verdict::Correct => game.mark_correct(&word).unwrap(),
            Verdict::Incorrect => game.mark_incorrect(&word).unwrap(),
        };
    }

    fn expire(game: &mut GameSession, token: TimerToken) -> Vec<Event> {
        let mut last = vec![];
        for _ in 0..game.config().turn_seconds {
            last = game.tick(token).unwrap();
        }
        last
    }

    #[test]
    fn start_game_should_reject_empty_team_and_empty_deck() {
        let mut game = session();
        game.add_player(Team::Blue, "Alice").unwrap();

        assert_eq!(
            game.start_game(words(&["sol"])),
            Err(GameError::Validation(ValidationError::EmptyTeam(Team::Red)))
        );
        game.add_player(Team::Red, "Carol").unwrap();
        assert_eq!(
            game.start_game(words(&["", "  "])),
            Err(GameError::Validation(ValidationError::NoWords))
        );
        assert_eq!(game.phase(), Phase::NotStarted);
    }

    #[test]
    fn start_game_should_initialise_first_round() {
        let game = started();

        assert_eq!(game.phase(), Phase::InProgress(Round::One));
        assert_eq!(game.queue().len(), 3);
        assert_eq!(game.queue().cursor(), 0);
        assert_eq!(game.current_team(), Team::Blue);
        assert_eq!(current_name(&game), "Alice");
        assert_eq!(game.scores().blue + game.scores().red, 0);
        assert!(!game.timer().is_running());
        assert_eq!(game.timer().remaining(), 30);
    }

    #[test]
    fn roster_should_be_locked_while_game_is_in_progress() {
        let mut game = started();

        assert_eq!(
            game.add_player(Team::Red, "Dave"),
            Err(GameError::State(StateError::GameInProgress))
        );
    }

    #[test]
    fn advance_turn_should_exhaust_team_before_switching() {
        let mut game = started();

        assert_eq!(game.advance_turn(), Ok(true));
        assert_eq!(
            (game.current_team(), current_name(&game)),
            (Team::Blue, "Bob".to_string())
        );
        assert_eq!(game.advance_turn(), Ok(true));
        assert_eq!(
            (game.current_team(), current_name(&game)),
            (Team::Red, "Carol".to_string())
        );
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(game.advance_turn(), Ok(true));
        assert_eq!(
            (game.current_team(), current_name(&game)),
            (Team::Blue, "Alice".to_string())
        );
    }

    #[test]
    fn advance_turn_should_clear_stall_once_a_player_is_due() {
        let mut game = started();
        game.roster.remove(Team::Red, "player-3").unwrap();
        game.advance_turn().unwrap();
        assert_eq!(game.advance_turn(), Ok(false));
        assert!(game.is_round_complete());

        assert_eq!(game.advance_turn(), Ok(true));

        assert_eq!(current_name(&game), "Alice");
        assert!(!game.is_round_complete());
    }

    #[test]
    fn advance_turn_should_reset_timer() {
        let mut game = started();
        let token = game.start_timer().unwrap();
        game.tick(token).unwrap();
        expire(&mut game, token);

        game.advance_turn().unwrap();

        assert_eq!(game.timer().remaining(), 30);
        assert!(!game.timer().is_running());
        assert_eq!(game.turn(), TurnPhase::Ready);
    }

    #[test]
    fn advance_turn_should_return_false_when_switching_into_empty_team() {
        let mut game = started();
        // Only reachable if a roster is emptied behind the engine's back.
        game.roster.remove(Team::Red, "player-3").unwrap();

        assert_eq!(game.advance_turn(), Ok(true));
        assert_eq!(game.advance_turn(), Ok(false));
        assert!(game.is_round_complete());
        assert!(matches!(
            game.events().last(),
            Some(Event::RotationStalled(Team::Red))
        ));
    }

    #[test]
    fn start_timer_without_player_should_end_round_instead_of_failing() {
        let mut game = started();
        game.current_team = Team::Red;
        game.current_player_index = 5;

        assert!(game.start_timer().is_ok());
        assert!(!game.timer().is_running());
        assert!(game.is_round_complete());
    }

    #[test]
    fn mark_correct_should_add_exactly_one_point_to_acting_team() {
        let mut game = started();
        game.start_timer().unwrap();

        judge_current(&mut game, Verdict::Correct);

        assert_eq!(game.score(Team::Blue), 1);
        assert_eq!(game.score(Team::Red), 0);
        assert_eq!(game.queue().cursor(), 1);
    }

    #[test]
    fn mark_incorrect_should_not_change_scores() {
        let mut game = started();
        game.start_timer().unwrap();

        judge_current(&mut game, Verdict::Incorrect);

        assert_eq!(game.scores().blue, 0);
        assert_eq!(game.scores().red, 0);
        assert_eq!(game.queue().cursor(), 1);
        assert_eq!(game.review().count(Verdict::Incorrect), 1);
    }

    #[test]
    fn judging_should_be_rejected_while_timer_is_stopped() {
        let mut game = started();
        let word = game.queue().current().unwrap().clone();

        assert_eq!(
            game.mark_correct(&word),
            Err(GameError::State(StateError::NoActiveTurn))
        );

        game.start_timer().unwrap();
        game.stop_timer().unwrap();
        assert_eq!(
            game.mark_incorrect(&word),
            Err(GameError::State(StateError::NoActiveTurn))
        );
        assert_eq!(game.queue().cursor(), 0);
    }

    #[test]
    fn judging_should_reject_word_that_is_not_presented() {
        let mut game = started();
        game.start_timer().unwrap();

        let result = game.mark_correct("nube");

        assert!(matches!(
            result,
            Err(GameError::Validation(ValidationError::WordNotPresented { .. }))
        ));
        assert_eq!(game.score(Team::Blue), 0);
    }

    #[test]
    fn stopped_timer_should_resume_same_turn() {
        let mut game = started();
        let token = game.start_timer().unwrap();
        game.tick(token).unwrap();
        game.stop_timer().unwrap();
        assert_eq!(game.tick(token).unwrap(), vec![]);

        let resumed = game.start_timer().unwrap();

        assert_eq!(resumed, token);
        assert_eq!(game.timer().remaining(), 29);
        assert_eq!(game.turn(), TurnPhase::Playing);
    }

    #[test]
    fn time_expiry_should_end_turn() {
        let mut game = started();
        let token = game.start_timer().unwrap();

        let events = expire(&mut game, token);

        assert_eq!(
            events,
            vec![
                Event::TimerTicked(0),
                Event::TurnEnded(EndTurnReason::TimeExpired)
            ]
        );
        assert_eq!(game.turn(), TurnPhase::Over(EndTurnReason::TimeExpired));
        assert_eq!(
            game.start_timer(),
            Err(GameError::State(StateError::NoActiveTurn))
        );
    }

    #[test]
    fn stale_tick_from_previous_turn_should_be_ignored() {
        let mut game = started();
        let old = game.start_timer().unwrap();
        expire(&mut game, old);
        game.advance_turn().unwrap();
        let new = game.start_timer().unwrap();

        assert_eq!(game.tick(old).unwrap(), vec![]);
        assert_eq!(game.timer().remaining(), 30);
        assert_eq!(game.tick(new).unwrap(), vec![Event::TimerTicked(29)]);
    }

    #[test]
    fn exhausting_words_should_end_turn_with_time_left() {
        let mut game = started();
        game.start_timer().unwrap();

        for _ in 0..3 {
            judge_current(&mut game, Verdict::Correct);
        }

        assert_eq!(game.turn(), TurnPhase::Over(EndTurnReason::WordsExhausted));
        assert!(!game.timer().is_running());
        assert_eq!(game.timer().remaining(), 30);
        assert!(game.is_round_complete());
        assert_eq!(game.round_judged(), game.queue().len());
    }

    #[test]
    fn judging_exhausted_queue_should_be_a_no_op() {
        let mut game = started();
        game.start_timer().unwrap();
        for _ in 0..3 {
            judge_current(&mut game, Verdict::Incorrect);
        }

        assert_eq!(game.mark_correct("sol"), Ok(vec![]));
        assert_eq!(game.score(Team::Blue), 0);
        assert_eq!(game.round_judged(), 3);
    }

    #[test]
    fn full_game_skeleton_should_follow_rotation_and_rounds() {
        let mut game = started();
        let first_round_words = game.queue().words().iter().cloned().sorted().collect_vec();

        // Alice scores one word, then time runs out.
        let token = game.start_timer().unwrap();
        judge_current(&mut game, Verdict::Correct);
        assert_eq!(game.score(Team::Blue), 1);
        assert_eq!(game.queue().cursor(), 1);
        expire(&mut game, token);

        // Bob is next, still on blue.
        assert_eq!(game.advance_turn(), Ok(true));
        assert_eq!(
            (game.current_team(), game.current_player_index()),
            (Team::Blue, 1)
        );
        assert_eq!(current_name(&game), "Bob");
        game.start_timer().unwrap();
        judge_current(&mut game, Verdict::Incorrect);
        judge_current(&mut game, Verdict::Correct);
        assert!(game.is_round_complete());

        let outcome = game.end_round().unwrap();
        assert_eq!(outcome.round, Round::One);
        assert_eq!(outcome.correct.len(), 2);
        assert_eq!(outcome.incorrect.len(), 1);
        assert_eq!(outcome.scores.blue, 2);

        assert_eq!(game.round(), Some(Round::Two));
        assert_eq!(game.queue().cursor(), 0);
        assert_eq!(
            game.queue().words().iter().cloned().sorted().collect_vec(),
            first_round_words
        );
        assert_eq!(
            (game.current_team(), current_name(&game)),
            (Team::Blue, "Alice".to_string())
        );
        assert!(game.round_correct().is_empty());
    }

    #[test]
    fn start_timer_with_zero_length_turn_should_expire_immediately() {
        let mut game = GameSession::new(GameConfig {
            turn_seconds: 0,
            seed: Some(42),
        });
        game.add_player(Team::Blue, "Alice").unwrap();
        game.add_player(Team::Red, "Carol").unwrap();
        game.start_game(words(&["sol", "luna"])).unwrap();

        game.start_timer().unwrap();

        assert_eq!(game.turn(), TurnPhase::Over(EndTurnReason::TimeExpired));
        assert!(!game.timer().is_running());
        assert_eq!(game.advance_turn(), Ok(true));
        assert_eq!(current_name(&game), "Carol");
    }

    #[test]
    fn review_toggle_should_move_word_and_point() {
        let mut game = started();
        let token = game.start_timer().unwrap();
        let word = game.current_word().unwrap().clone();
        game.mark_incorrect(&word).unwrap();
        expire(&mut game, token);

        assert_eq!(game.toggle_review(&word), Ok(Verdict::Correct));
        assert_eq!(game.score(Team::Blue), 1);
        game.commit_review().unwrap();

        assert_eq!(game.round_correct(), &[word.clone()]);
        assert!(game.round_incorrect().is_empty());
        assert!(game.review().is_empty());
        let outcome = game.end_round().unwrap();
        assert_eq!(outcome.correct, vec![word]);
        assert_eq!(outcome.scores.blue, 1);
    }

    #[test]
    fn review_toggle_to_incorrect_should_take_point_back() {
        let mut game = started();
        game.start_timer().unwrap();
        let word = game.current_word().unwrap().clone();
        game.mark_correct(&word).unwrap();
        game.stop_timer().unwrap();

        assert_eq!(game.toggle_review(&word), Ok(Verdict::Incorrect));
        assert_eq!(game.score(Team::Blue), 0);
    }

    #[test]
    fn review_should_be_rejected_while_timer_runs() {
        let mut game = started();
        game.start_timer().unwrap();
        let word = game.current_word().unwrap().clone();
        game.mark_correct(&word).unwrap();

        assert_eq!(
            game.toggle_review(&word),
            Err(GameError::State(StateError::TurnInProgress))
        );
        assert_eq!(
            game.toggle_review("nube"),
            Err(GameError::State(StateError::TurnInProgress))
        );
    }

    #[test]
    fn review_toggle_at_should_flip_only_the_chosen_copy_of_a_repeated_word() {
        let mut game = session();
        game.add_player(Team::Blue, "Alice").unwrap();
        game.add_player(Team::Red, "Carol").unwrap();
        game.start_game(words(&["sol", "sol"])).unwrap();
        game.start_timer().unwrap();
        game.mark_correct("sol").unwrap();
        game.mark_incorrect("sol").unwrap();
        assert_eq!(game.score(Team::Blue), 1);

        assert_eq!(game.toggle_review_at(1), Ok(Verdict::Correct));

        let entries = game.review().entries();
        let verdicts = entries.iter().map(|e| e.verdict).collect_vec();
        assert_eq!(verdicts, vec![Verdict::Correct, Verdict::Correct]);
        assert_eq!(game.score(Team::Blue), 2);
        assert_eq!(
            game.toggle_review_at(2),
            Err(GameError::Validation(ValidationError::NoReviewEntry(2)))
        );
    }

    #[test]
    fn advance_turn_should_commit_pending_review() {
        let mut game = started();
        let token = game.start_timer().unwrap();
        judge_current(&mut game, Verdict::Correct);
        expire(&mut game, token);

        game.advance_turn().unwrap();

        assert!(game.review().is_empty());
        assert_eq!(game.round_correct().len(), 1);
    }

    #[test]
    fn end_round_should_not_repeat_after_last_round() {
        let mut game = started();
        game.end_round().unwrap();
        game.end_round().unwrap();
        let last = game.end_round().unwrap();

        assert_eq!(last.round, Round::Three);
        assert!(game.is_awaiting_end());
        assert_eq!(
            game.end_round(),
            Err(GameError::State(StateError::RoundAlreadyEnded(Round::Three)))
        );
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn end_round_should_fail_without_game() {
        let mut game = session();
        assert_eq!(
            game.end_round(),
            Err(GameError::State(StateError::GameNotInProgress))
        );
    }

    #[test]
    fn end_game_should_pick_higher_score_or_tie() {
        let mut game = started();
        game.scores.blue = 7;
        game.scores.red = 5;
        assert_eq!(game.end_game().unwrap().winner, Some(Team::Blue));

        let mut game = started();
        game.scores.blue = 4;
        game.scores.red = 4;
        let summary = game.end_game().unwrap();
        assert_eq!(summary.winner, None);
        assert!(summary.is_tie());
        assert_eq!(game.phase(), Phase::Ended);
    }

    #[test]
    fn end_game_should_close_running_round_and_summarise() {
        let mut game = started();
        let token = game.start_timer().unwrap();
        judge_current(&mut game, Verdict::Correct);
        judge_current(&mut game, Verdict::Incorrect);
        game.tick(token).unwrap();

        let summary = game.end_game().unwrap();

        assert_eq!(summary.rounds.len(), 1);
        assert_eq!(summary.total_words, 2);
        assert_eq!(summary.total_correct, 1);
        assert_eq!(summary.accuracy_percent, 50);
        assert_eq!(summary.players.len(), 3);
        assert_eq!(game.tick(token).unwrap(), vec![]);
        assert_eq!(
            game.end_game(),
            Err(GameError::State(StateError::GameNotInProgress))
        );
    }

    #[test]
    fn deck_id_should_be_carried_into_summary() {
        let mut game = session();
        game.add_player(Team::Blue, "Alice").unwrap();
        game.add_player(Team::Red, "Carol").unwrap();
        game.select_deck("animals").unwrap();
        game.start_game(words(&["cat"])).unwrap();

        let summary = game.end_game().unwrap();

        assert_eq!(summary.deck_id, Some("animals".to_string()));
    }

    struct FailingRecorder;

    impl GameRecorder for FailingRecorder {
        fn record(&self, _summary: &GameSummary) -> Result<(), RecordError> {
            Err(RecordError::Unavailable("disk full".to_string()))
        }
    }

    #[test]
    fn finish_should_record_summary() {
        let mut game = started();
        let recorder = MemoryRecorder::new();

        let summary = game.finish(&recorder).unwrap();

        assert_eq!(recorder.records(), vec![summary]);
    }

    #[test]
    fn finish_should_survive_recorder_failure() {
        let mut game = started();

        let summary = game.finish(&FailingRecorder);

        assert!(summary.is_ok());
        assert_eq!(game.phase(), Phase::Ended);
    }

    #[test]
    fn rematch_should_keep_roster_and_clear_scores() {
        let mut game = started();
        game.start_timer().unwrap();
        judge_current(&mut game, Verdict::Correct);
        game.end_game().unwrap();

        game.start_game(words(&["nube", "lluvia"])).unwrap();

        assert_eq!(game.score(Team::Blue), 0);
        assert!(game.history().is_empty());
        assert_eq!(game.roster().players(Team::Blue).len(), 2);
        assert_eq!(game.queue().len(), 2);
    }

    #[test]
    fn reset_should_return_to_defaults() {
        let mut game = started();
        game.start_timer().unwrap();

        game.reset_game();

        assert_eq!(game.phase(), Phase::NotStarted);
        assert!(game.roster().is_empty(Team::Blue));
        assert!(game.roster().is_empty(Team::Red));
        assert!(game.history().is_empty());
        assert_eq!(game.events(), &[Event::GameReset]);
    }

    #[test]
    fn rejected_action_should_leave_event_log_untouched() {
        let mut game = started();
        let logged = game.events().len();

        assert!(game.stop_timer().is_err());

        assert_eq!(game.events().len(), logged);
    }
}
