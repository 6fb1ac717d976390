use crate::battle::ai::Action;
use crate::errors::{BattleResult, TeamError};
use crate::monster::MonsterInstance;
use crate::species::Species;
use crate::team::MonsterTeam;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Team1Win,
    Team2Win,
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::InProgress)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle Management
    BattleStarted {
        team1_size: usize,
        team2_size: usize,
    },
    BattleEnded {
        result: GameState,
        turns: u32,
    },

    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Monster Actions
    ActionChosen {
        side: usize,
        monster: Species,
        action: Action,
    },
    MonsterSwapped {
        side: usize,
        old_monster: Species,
        new_monster: Species,
    },
    TeamReordered {
        side: usize,
    },
    MonsterSentOut {
        side: usize,
        monster: Species,
    },

    // Combat
    Attacked {
        side: usize,
        attacker: Species,
        defender: Species,
        damage: u32,
        effectiveness: f64,
        remaining_hp: i32,
    },
    AttritionApplied {
        monster1: Species,
        monster2: Species,
    },
    MonsterFainted {
        side: usize,
        monster: Species,
    },

    // Progression
    LevelGained {
        side: usize,
        monster: Species,
        new_level: u32,
    },
    MonsterEvolved {
        side: usize,
        from: Species,
        into: Species,
    },
}

impl BattleEvent {
    fn side_name(side: usize) -> String {
        format!("Team {}", side + 1)
    }

    /// Human-readable text for the event, or None for silent bookkeeping events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted {
                team1_size,
                team2_size,
            } => Some(format!(
                "Battle begins: {} monsters vs {} monsters",
                team1_size, team2_size
            )),
            BattleEvent::BattleEnded { result, turns } => {
                let outcome = match result {
                    GameState::Team1Win => "Team 1 wins".to_string(),
                    GameState::Team2Win => "Team 2 wins".to_string(),
                    GameState::Draw => "The battle is a draw".to_string(),
                    GameState::InProgress => "The battle was abandoned".to_string(),
                };
                Some(format!("{} after {} turns!", outcome, turns))
            }

            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,

            // Shown through the follow-up events instead
            BattleEvent::ActionChosen { .. } => None,
            BattleEvent::MonsterSwapped {
                side,
                old_monster,
                new_monster,
            } => Some(format!(
                "{} recalled {} and sent out {}!",
                Self::side_name(*side),
                old_monster,
                new_monster
            )),
            BattleEvent::TeamReordered { side } => {
                Some(format!("{} reshuffled its team!", Self::side_name(*side)))
            }
            BattleEvent::MonsterSentOut { side, monster } => Some(format!(
                "{} sent out {}!",
                Self::side_name(*side),
                monster
            )),

            BattleEvent::Attacked {
                attacker,
                defender,
                damage,
                effectiveness,
                remaining_hp,
                ..
            } => {
                let mut text = format!(
                    "{} hit {} for {} damage ({} HP left)",
                    attacker, defender, damage, remaining_hp
                );
                if *effectiveness > 1.0 {
                    text.push_str(". It's super effective!");
                } else if *effectiveness < 1.0 {
                    text.push_str(". It's not very effective...");
                }
                Some(text)
            }
            BattleEvent::AttritionApplied { monster1, monster2 } => Some(format!(
                "{} and {} are worn down by the fight",
                monster1, monster2
            )),
            BattleEvent::MonsterFainted { monster, .. } => {
                Some(format!("{} fainted!", monster))
            }

            BattleEvent::LevelGained {
                monster, new_level, ..
            } => Some(format!("{} grew to level {}!", monster, new_level)),
            BattleEvent::MonsterEvolved { from, into, .. } => {
                Some(format!("{} evolved into {}!", from, into))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Print the formatted text of every event that has one.
    pub fn print_formatted(&self) {
        for line in self.formatted_lines() {
            println!("  {}", line);
        }
    }

    /// Print all events using their formatted text with a custom prefix message.
    pub fn print_formatted_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_formatted();
    }

    pub fn formatted_lines(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// A battle in progress: both teams plus the monster each side has out.
///
/// The active monsters live outside their containers. Index 0 is team 1.
#[derive(Debug)]
pub struct BattleState<'t> {
    pub teams: [&'t mut MonsterTeam; 2],
    pub active: [MonsterInstance; 2],
    pub turn_number: u32,
    pub game_state: GameState,
}

impl<'t> BattleState<'t> {
    /// Start a battle by withdrawing one active monster from each team.
    pub fn new(team1: &'t mut MonsterTeam, team2: &'t mut MonsterTeam) -> BattleResult<Self> {
        if team1.is_empty() || team2.is_empty() {
            return Err(TeamError::Empty.into());
        }
        let active1 = team1.retrieve()?;
        let active2 = team2.retrieve()?;
        Ok(Self {
            teams: [team1, team2],
            active: [active1, active2],
            turn_number: 0,
            game_state: GameState::InProgress,
        })
    }

    /// A side is out once its team is empty and its active monster has fainted.
    pub fn is_side_defeated(&self, side: usize) -> bool {
        self.teams[side].is_empty() && self.active[side].is_fainted()
    }
}
