use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use log::{debug, error, info, warn};
use crate::board::Player;
use crate::error::{Error, Result};
use crate::search::Engine;

fn parse_counter(field: &'static str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|_| Error::malformed(field, format!("'{value}' is not a number")))
}

/// Line-based game-engine session: `settings`, `update game ...` and
/// `action move ...` commands in, `place_move x y` answers out.
pub struct Session {
    engine: Engine,
    round: u32,
    move_nr: u32,
    settings: HashMap<String, String>,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        info!("engine config: {:?}", engine.config());
        Self { engine, round: 0, move_nr: 0, settings: HashMap::new() }
    }

    pub fn engine(&self) -> &Engine { &self.engine }
    pub fn round(&self) -> u32 { self.round }
    pub fn move_nr(&self) -> u32 { self.move_nr }
    pub fn setting(&self, key: &str) -> Option<&str> { self.settings.get(key).map(String::as_str) }

    fn cmd_settings(&mut self, key: &str, value: &str) {
        if key == "your_botid" {
            match value.parse::<i64>().map_err(|_| Error::malformed("your_botid", value)).and_then(Player::from_id) {
                Ok(p) => { info!("playing as {}", p); self.engine.set_player(p); }
                Err(e) => warn!("ignoring bot id '{}': {}", value, e),
            }
        }
        self.settings.insert(key.to_string(), value.to_string());
    }

    fn cmd_update_game(&mut self, key: &str, value: &str) {
        let res = match key {
            "round" => parse_counter("round", value).map(|n| self.round = n),
            "move" => parse_counter("move", value).map(|n| self.move_nr = n),
            "field" => self.engine.board_mut().load_cells(value),
            "macroboard" => self.engine.board_mut().load_macro_statuses(value),
            other => { debug!("ignoring game update '{}'", other); Ok(()) }
        };
        if let Err(e) = res { warn!("rejected update: {}", e); }
    }

    fn cmd_action_move(&mut self) -> String {
        debug!("round {} move {}", self.round, self.move_nr);
        match self.engine.choose_move() {
            Ok(mv) => format!("place_move {} {}", mv.x, mv.y),
            Err(e) => { error!("forfeiting turn: {}", e); "pass".to_string() }
        }
    }

    /// Handles one input line, returning the reply to send, if any.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["settings", key, value] => { self.cmd_settings(key, value); None }
            ["update", "game", key, value] => { self.cmd_update_game(key, value); None }
            ["action", "move", ..] => Some(self.cmd_action_move()),
            [] => None,
            _ => { debug!("ignoring line '{}'", line); None }
        }
    }

    pub fn run_loop<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line == "quit" { break; }
            if let Some(reply) = self.handle_line(line) {
                writeln!(out, "{}", reply)?;
                out.flush()?;
            }
        }
        Ok(())
    }
}
