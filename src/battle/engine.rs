use crate::battle::ai::Action;
use crate::battle::state::{BattleEvent, BattleState, EventBus, GameState};
use crate::effectiveness::EffectivenessTable;
use crate::errors::BattleResult;
use crate::monster::MonsterInstance;
use crate::species::SpeciesTable;
use crate::team::MonsterTeam;

/// HP every active monster loses at the end of a turn in which both survive.
pub const ATTRITION_DAMAGE: u32 = 1;

/// The result of a finished battle, plus whatever was recorded on the way.
#[derive(Debug, Clone)]
pub struct BattleReport {
    pub result: GameState,
    pub turns: u32,
    pub events: EventBus,
}

/// Runs battles between two teams.
///
/// Holds read-only references to the species and effectiveness tables.
/// With `verbosity` 0 nothing is recorded on the event bus; events still
/// go to the `log` facade at debug level.
#[derive(Debug, Clone, Copy)]
pub struct Battle<'a> {
    species: &'a SpeciesTable,
    effectiveness: &'a EffectivenessTable,
    verbosity: u8,
}

impl<'a> Battle<'a> {
    pub fn new(species: &'a SpeciesTable, effectiveness: &'a EffectivenessTable) -> Self {
        Self {
            species,
            effectiveness,
            verbosity: 0,
        }
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    pub fn species(&self) -> &'a SpeciesTable {
        self.species
    }

    /// Fight until one side (or both) runs out of monsters.
    pub fn battle(
        &self,
        team1: &mut MonsterTeam,
        team2: &mut MonsterTeam,
    ) -> BattleResult<BattleReport> {
        let (team1_size, team2_size) = (team1.len(), team2.len());
        let mut state = BattleState::new(team1, team2)?;

        let mut bus = EventBus::new();
        self.emit(
            &mut bus,
            BattleEvent::BattleStarted {
                team1_size,
                team2_size,
            },
        );
        for side in 0..2 {
            self.emit(
                &mut bus,
                BattleEvent::MonsterSentOut {
                    side,
                    monster: state.active[side].species(),
                },
            );
        }

        while !state.game_state.is_over() {
            self.resolve_turn(&mut state, &mut bus)?;
        }

        self.emit(
            &mut bus,
            BattleEvent::BattleEnded {
                result: state.game_state,
                turns: state.turn_number,
            },
        );
        log::info!(
            "battle finished: {:?} after {} turns",
            state.game_state,
            state.turn_number
        );

        Ok(BattleReport {
            result: state.game_state,
            turns: state.turn_number,
            events: bus,
        })
    }

    /// Resolve one turn and update `state.game_state`.
    pub fn resolve_turn(&self, state: &mut BattleState, bus: &mut EventBus) -> BattleResult<()> {
        state.turn_number += 1;
        self.emit(
            bus,
            BattleEvent::TurnStarted {
                turn_number: state.turn_number,
            },
        );

        // 1. Both sides choose before anything moves.
        let actions = [
            state.teams[0].decide_action(&state.active[0], &state.active[1]),
            state.teams[1].decide_action(&state.active[1], &state.active[0]),
        ];
        for (side, &action) in actions.iter().enumerate() {
            self.emit(
                bus,
                BattleEvent::ActionChosen {
                    side,
                    monster: state.active[side].species(),
                    action,
                },
            );
        }

        // 2. Container actions.
        for (side, &action) in actions.iter().enumerate() {
            if matches!(action, Action::Swap | Action::Special) {
                self.rotate_active(state, side, action == Action::Special, bus)?;
            }
        }

        // 3. Combat.
        self.resolve_combat(state, actions, bus);

        // 4. Attrition.
        if state.active.iter().all(MonsterInstance::is_alive) {
            for monster in &mut state.active {
                monster.take_damage(ATTRITION_DAMAGE);
            }
            self.emit(
                bus,
                BattleEvent::AttritionApplied {
                    monster1: state.active[0].species(),
                    monster2: state.active[1].species(),
                },
            );
        }

        // 5. Faints, progression and replacements.
        match (state.active[0].is_alive(), state.active[1].is_alive()) {
            (true, false) => {
                self.reward_survivor(state, 0, bus)?;
                self.replace_fainted(state, 1, bus)?;
            }
            (false, true) => {
                self.reward_survivor(state, 1, bus)?;
                self.replace_fainted(state, 0, bus)?;
            }
            (false, false) => {
                self.replace_fainted(state, 0, bus)?;
                self.replace_fainted(state, 1, bus)?;
            }
            (true, true) => {}
        }

        // 6. Terminal check.
        state.game_state = check_win_conditions(state);
        self.emit(bus, BattleEvent::TurnEnded);
        Ok(())
    }

    // Return the active monster to its team, optionally reorder, and take the next one.
    fn rotate_active(
        &self,
        state: &mut BattleState,
        side: usize,
        special: bool,
        bus: &mut EventBus,
    ) -> BattleResult<()> {
        let old_monster = state.active[side].species();
        let team = &mut state.teams[side];
        team.add(state.active[side].clone())?;
        if special {
            team.special();
            self.emit(bus, BattleEvent::TeamReordered { side });
        }
        state.active[side] = team.retrieve()?;
        self.emit(
            bus,
            BattleEvent::MonsterSwapped {
                side,
                old_monster,
                new_monster: state.active[side].species(),
            },
        );
        Ok(())
    }

    fn resolve_combat(&self, state: &mut BattleState, actions: [Action; 2], bus: &mut EventBus) {
        match actions {
            [Action::Attack, Action::Attack] => {
                let speed1 = state.active[0].speed();
                let speed2 = state.active[1].speed();
                if speed1 == speed2 {
                    self.strike(state, 0, bus);
                    self.strike(state, 1, bus);
                } else {
                    let (first, second) = if speed1 > speed2 { (0, 1) } else { (1, 0) };
                    self.strike(state, first, bus);
                    if state.active[second].is_alive() {
                        self.strike(state, second, bus);
                    }
                }
            }
            [Action::Attack, _] => self.strike(state, 0, bus),
            [_, Action::Attack] => self.strike(state, 1, bus),
            _ => {}
        }
    }

    fn strike(&self, state: &mut BattleState, side: usize, bus: &mut EventBus) {
        let [first, second] = &mut state.active;
        let (attacker, defender) = if side == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };

        let effectiveness = self
            .effectiveness
            .effectiveness(attacker.element(), defender.element());
        let damage = attacker.strike(defender, self.effectiveness);
        self.emit(
            bus,
            BattleEvent::Attacked {
                side,
                attacker: attacker.species(),
                defender: defender.species(),
                damage,
                effectiveness,
                remaining_hp: defender.current_hp(),
            },
        );
        if defender.is_fainted() {
            self.emit(
                bus,
                BattleEvent::MonsterFainted {
                    side: 1 - side,
                    monster: defender.species(),
                },
            );
        }
    }

    fn reward_survivor(
        &self,
        state: &mut BattleState,
        side: usize,
        bus: &mut EventBus,
    ) -> BattleResult<()> {
        let survivor = &mut state.active[side];
        survivor.level_up()?;
        self.emit(
            bus,
            BattleEvent::LevelGained {
                side,
                monster: survivor.species(),
                new_level: survivor.level(),
            },
        );

        if survivor.ready_to_evolve() {
            let from = survivor.species();
            let into = survivor.evolve(self.species)?;
            self.emit(bus, BattleEvent::MonsterEvolved { side, from, into });
        }
        Ok(())
    }

    fn replace_fainted(
        &self,
        state: &mut BattleState,
        side: usize,
        bus: &mut EventBus,
    ) -> BattleResult<()> {
        if state.teams[side].is_empty() {
            return Ok(());
        }
        state.active[side] = state.teams[side].retrieve()?;
        self.emit(
            bus,
            BattleEvent::MonsterSentOut {
                side,
                monster: state.active[side].species(),
            },
        );
        Ok(())
    }

    fn emit(&self, bus: &mut EventBus, event: BattleEvent) {
        log::debug!("{:?}", event);
        if self.verbosity > 0 {
            bus.push(event);
        }
    }
}

/// Decide whether the battle is over.
pub fn check_win_conditions(state: &BattleState) -> GameState {
    match (state.is_side_defeated(0), state.is_side_defeated(1)) {
        (true, true) => GameState::Draw,
        (true, false) => GameState::Team2Win,
        (false, true) => GameState::Team1Win,
        (false, false) => GameState::InProgress,
    }
}
