use std::{
    error::Error,
    io::{self, Write},
    str::FromStr,
    time::Duration,
};

use charades_core::{
    recorder::GameRecorder, EndTurnReason, Event, GameSession, GameSummary, Round,
    RoundOutcome, Team, TurnPhase,
};
use itertools::Itertools;
use log::info;
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    time,
};

static RULES: &str = "
*** Charades ***
Two teams take turns making their own team guess as many words as possible before the clock
runs out. The same words are played in all three rounds, only the way clues may be given
changes. Every word guessed is one point for the team of the player giving clues.";

type Input = Lines<BufReader<Stdin>>;

pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
struct ParseCommandError;

#[derive(Debug, PartialEq)]
enum SetupCommand {
    Add(Team, String),
    Move(usize),
    Remove(usize),
    Start,
    Rules,
    Quit,
}

impl SetupCommand {
    fn help() -> String {
        [
            "- [blue <name>]: add a player to team blue",
            "- [red <name>]: add a player to team red",
            "- [m <n>]: move player n to the other team",
            "- [d <n>]: remove player n",
            "- [s]: start the game",
            "- [r]: display rules",
            "- [q]: quit",
        ]
        .join("\n")
    }
}

impl FromStr for SetupCommand {
    type Err = ParseCommandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cmd, rest) = match s.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (s, ""),
        };
        match (cmd, rest) {
            ("s", "") => Ok(SetupCommand::Start),
            ("r", "") => Ok(SetupCommand::Rules),
            ("q", "") => Ok(SetupCommand::Quit),
            ("m", n) => usize::from_str(n)
                .map(SetupCommand::Move)
                .map_err(|_| ParseCommandError),
            ("d", n) => usize::from_str(n)
                .map(SetupCommand::Remove)
                .map_err(|_| ParseCommandError),
            (team, name) if !name.is_empty() => Team::from_str(team)
                .map(|t| SetupCommand::Add(t, name.to_string()))
                .map_err(|_| ParseCommandError),
            _ => Err(ParseCommandError),
        }
    }
}

#[derive(Debug, PartialEq)]
enum TurnCommand {
    Correct,
    Incorrect,
    Pause,
    Quit,
}

impl TurnCommand {
    fn help() -> &'static str {
        "[c] correct, [x] skip / incorrect, [p] pause or resume, [q] quit"
    }
}

impl FromStr for TurnCommand {
    type Err = ParseCommandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" | "" => Ok(TurnCommand::Correct),
            "x" => Ok(TurnCommand::Incorrect),
            "p" => Ok(TurnCommand::Pause),
            "q" => Ok(TurnCommand::Quit),
            _ => Err(ParseCommandError),
        }
    }
}

#[derive(Debug, PartialEq)]
enum ReviewCommand {
    Toggle(usize),
    Done,
}

impl FromStr for ReviewCommand {
    type Err = ParseCommandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "d" => Ok(ReviewCommand::Done),
            _ => match usize::from_str(s) {
                Ok(n) if n > 0 => Ok(ReviewCommand::Toggle(n - 1)),
                _ => Err(ParseCommandError),
            },
        }
    }
}

fn describe(reason: EndTurnReason) -> &'static str {
    match reason {
        EndTurnReason::TimeExpired => "Time is up!",
        EndTurnReason::WordsExhausted => "No words left in this round!",
        EndTurnReason::Interrupted => "Turn interrupted.",
    }
}

pub struct CliGame {
    session: GameSession,
    input: Input,
}

impl CliGame {
    pub fn new(session: GameSession) -> Self {
        CliGame {
            session,
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn run<R: GameRecorder>(
        &mut self,
        words: Vec<String>,
        recorder: &R,
    ) -> Result<(), Box<dyn Error>> {
        println!("{}", RULES);
        if let Flow::Quit = self.setup(words).await? {
            return Ok(());
        }
        if let Flow::Quit = self.play_rounds().await? {
            println!("\nGame stopped early.");
        }
        let summary = self.session.finish(recorder)?;
        print_summary(&summary);
        Ok(())
    }

    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        self.input.next_line().await
    }

    fn show_roster(&self) {
        let all = self.session.roster().all();
        println!();
        for team in [Team::Blue, Team::Red] {
            let names = all
                .iter()
                .enumerate()
                .filter(|(_, (t, _))| *t == team)
                .map(|(i, (_, p))| format!("[{}] {}", i + 1, p.name))
                .join(", ");
            println!("  {:<5} {}", team.to_string(), names);
        }
    }

    fn player_at(&self, n: usize) -> Option<(Team, String)> {
        self.session
            .roster()
            .all()
            .get(n.checked_sub(1)?)
            .map(|(team, p)| (*team, p.id.clone()))
    }

    async fn setup(&mut self, words: Vec<String>) -> Result<Flow, Box<dyn Error>> {
        println!("\n{}", SetupCommand::help());
        loop {
            self.show_roster();
            let line = match self.read_line(">").await? {
                Some(line) => line,
                None => return Ok(Flow::Quit),
            };
            let result = match SetupCommand::from_str(line.trim()) {
                Ok(SetupCommand::Add(team, name)) => {
                    self.session.add_player(team, &name).map(|_| ())
                }
                Ok(SetupCommand::Move(n)) => match self.player_at(n) {
                    Some((team, id)) => self.session.move_player(&id, team, team.other()),
                    None => {
                        println!("There is no player {}", n);
                        Ok(())
                    }
                },
                Ok(SetupCommand::Remove(n)) => match self.player_at(n) {
                    Some((team, id)) => self.session.remove_player(team, &id),
                    None => {
                        println!("There is no player {}", n);
                        Ok(())
                    }
                },
                Ok(SetupCommand::Start) => match self.session.start_game(words.clone()) {
                    Ok(()) => {
                        println!("\n{}", Round::first().rule());
                        return Ok(Flow::Continue);
                    }
                    Err(e) => Err(e),
                },
                Ok(SetupCommand::Rules) => {
                    println!("{}\n\n{}", RULES, Round::rules());
                    Ok(())
                }
                Ok(SetupCommand::Quit) => return Ok(Flow::Quit),
                Err(_) => {
                    println!("{}", SetupCommand::help());
                    Ok(())
                }
            };
            if let Err(e) = result {
                println!("{}", e);
            }
        }
    }

    async fn play_rounds(&mut self) -> Result<Flow, Box<dyn Error>> {
        while self.session.is_in_progress() && !self.session.is_awaiting_end() {
            if self.session.is_round_complete() {
                let outcome = self.session.end_round()?;
                print_round(&outcome);
                if let (Some(next), false) = (self.session.round(), self.session.is_awaiting_end())
                {
                    println!("\n{}", next.rule());
                }
                continue;
            }
            if let Flow::Quit = self.play_turn().await? {
                return Ok(Flow::Quit);
            }
            if let Flow::Quit = self.review().await? {
                return Ok(Flow::Quit);
            }
            if !self.session.is_round_complete() {
                self.session.advance_turn()?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show_word(&self) {
        if let Some(word) = self.session.current_word() {
            println!(
                "\n>>> {} <<<   ({}s, {} words left)",
                word,
                self.session.timer().remaining(),
                self.session.queue().remaining()
            );
        }
    }

    async fn play_turn(&mut self) -> Result<Flow, Box<dyn Error>> {
        let (team, name) = match self.session.current_player() {
            Some(player) => (self.session.current_team(), player.name.clone()),
            None => {
                // nobody can play, the engine closes the round
                self.session.start_timer()?;
                return Ok(Flow::Continue);
            }
        };
        println!(
            "\n{} (team {}) gives the clues. Score: blue {} - red {}",
            name,
            team,
            self.session.score(Team::Blue),
            self.session.score(Team::Red)
        );
        match self
            .read_line("Press enter to start the clock, q to quit >")
            .await?
        {
            Some(line) if line.trim() != "q" => {}
            _ => return Ok(Flow::Quit),
        }

        let token = self.session.start_timer()?;
        if self.session.turn() != TurnPhase::Playing {
            return Ok(Flow::Continue);
        }
        info!("Turn started for {}", name);
        println!("{}", TurnCommand::help());
        let mut interval = time::interval(Duration::from_secs(1));
        // the first tick completes immediately
        interval.tick().await;
        self.show_word();

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    for event in self.session.tick(token)? {
                        match event {
                            Event::TimerTicked(s) if s > 0 && (s % 10 == 0 || s <= 5) => {
                                println!("  {}s left", s)
                            }
                            Event::TurnEnded(reason) => println!("\n{}", describe(reason)),
                            _ => {}
                        }
                    }
                }
                line = self.input.next_line() => {
                    let cmd = match line? {
                        None => TurnCommand::Quit,
                        Some(line) => match TurnCommand::from_str(line.trim()) {
                            Ok(cmd) => cmd,
                            Err(_) => {
                                println!("{}", TurnCommand::help());
                                continue;
                            }
                        },
                    };
                    match cmd {
                        TurnCommand::Quit => return Ok(Flow::Quit),
                        TurnCommand::Pause if self.session.timer().is_running() => {
                            self.session.stop_timer()?;
                            println!("Paused. [p] to resume");
                        }
                        TurnCommand::Pause => {
                            self.session.start_timer()?;
                            self.show_word();
                        }
                        TurnCommand::Correct | TurnCommand::Incorrect => {
                            let word = match self.session.current_word() {
                                Some(word) if self.session.timer().is_running() => word.clone(),
                                _ => {
                                    println!("The clock is paused. [p] to resume");
                                    continue;
                                }
                            };
                            let events = if cmd == TurnCommand::Correct {
                                self.session.mark_correct(&word)?
                            } else {
                                self.session.mark_incorrect(&word)?
                            };
                            match events.last() {
                                Some(Event::TurnEnded(reason)) => {
                                    println!("\n{}", describe(*reason))
                                }
                                _ => self.show_word(),
                            }
                        }
                    }
                }
            }
            if let TurnPhase::Over(_) = self.session.turn() {
                return Ok(Flow::Continue);
            }
        }
    }

    async fn review(&mut self) -> Result<Flow, Box<dyn Error>> {
        if self.session.review().is_empty() {
            return Ok(Flow::Continue);
        }
        loop {
            println!("\nThis turn:");
            for (i, entry) in self.session.review().entries().iter().enumerate() {
                println!("  [{}] {} - {}", i + 1, entry.word, entry.verdict);
            }
            let line = match self
                .read_line("Number to flip a word, enter to confirm >")
                .await?
            {
                Some(line) => line,
                None => return Ok(Flow::Quit),
            };
            match ReviewCommand::from_str(line.trim()) {
                Ok(ReviewCommand::Done) => {
                    self.session.commit_review()?;
                    return Ok(Flow::Continue);
                }
                Ok(ReviewCommand::Toggle(i)) => {
                    if i < self.session.review().len() {
                        self.session.toggle_review_at(i)?;
                    } else {
                        println!("There is no word {}", i + 1);
                    }
                }
                Err(_) => println!("Enter a word number or just press enter"),
            }
        }
    }
}

fn print_round(outcome: &RoundOutcome) {
    println!(
        "\n=== Round {} over: {} guessed, {} missed ({}%) ===",
        outcome.round.number(),
        outcome.correct.len(),
        outcome.incorrect.len(),
        outcome.accuracy_percent()
    );
    println!(
        "Score: blue {} - red {}",
        outcome.scores.blue, outcome.scores.red
    );
}

fn print_summary(summary: &GameSummary) {
    println!("\n*** Game over ***");
    match summary.winner {
        Some(team) => println!("Team {} wins!", team),
        None => println!("It's a tie!"),
    }
    println!(
        "blue {} - red {} | {} of {} words guessed ({}%)",
        summary.score_blue,
        summary.score_red,
        summary.total_correct,
        summary.total_words,
        summary.accuracy_percent
    );
    for round in &summary.rounds {
        println!(
            "  Round {}: {}",
            round.round.number(),
            round.correct.iter().join(", ")
        );
    }
}
