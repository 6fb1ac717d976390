//! The battle tower: a persistent player team against a rotating queue of
//! enemy teams, each side with a limited number of lives.

use crate::battle::engine::{Battle, BattleReport};
use crate::battle::state::GameState;
use crate::errors::{TeamError, TowerError, TowerResult};
use crate::team::{spawn_team, MonsterTeam, Selection, TeamMode, TeamOptions};
use rand::Rng;
use schema::Element;
use std::collections::{BTreeSet, VecDeque};

pub const MIN_LIVES: u32 = 2;
pub const MAX_LIVES: u32 = 10;

/// An enemy team waiting in the tower queue.
#[derive(Debug)]
pub struct EnemyEntry {
    pub team: MonsterTeam,
    pub lives: u32,
}

/// Outcome of one tower battle, with both teams already regenerated.
#[derive(Debug)]
pub struct TowerBattle<'t> {
    pub result: GameState,
    pub report: BattleReport,
    pub player_team: &'t MonsterTeam,
    pub enemy_team: &'t MonsterTeam,
    pub player_lives: u32,
    pub enemy_lives: u32,
}

#[derive(Debug)]
pub struct BattleTower<'a, R: Rng> {
    battle: Battle<'a>,
    rng: R,
    min_lives: u32,
    max_lives: u32,
    enemy_options: TeamOptions,
    player: Option<MonsterTeam>,
    player_lives: u32,
    enemies: VecDeque<EnemyEntry>,
    current_enemy: usize,
    original_elements: BTreeSet<Element>,
    enemy_elements: BTreeSet<Element>,
    tower_elements: BTreeSet<Element>,
}

impl<'a, R: Rng> BattleTower<'a, R> {
    pub fn new(battle: Battle<'a>, rng: R) -> Self {
        Self {
            battle,
            rng,
            min_lives: MIN_LIVES,
            max_lives: MAX_LIVES,
            enemy_options: TeamOptions::new(TeamMode::Back),
            player: None,
            player_lives: 0,
            enemies: VecDeque::new(),
            current_enemy: 0,
            original_elements: BTreeSet::new(),
            enemy_elements: BTreeSet::new(),
            tower_elements: BTreeSet::new(),
        }
    }

    /// Range lives are drawn from, inclusive on both ends.
    pub fn with_lives_range(mut self, min_lives: u32, max_lives: u32) -> TowerResult<Self> {
        if min_lives == 0 || min_lives > max_lives {
            return Err(TeamError::InvalidConfiguration(format!(
                "invalid lives range {}..={}",
                min_lives, max_lives
            ))
            .into());
        }
        self.min_lives = min_lives;
        self.max_lives = max_lives;
        Ok(self)
    }

    /// Options used for teams created by `generate_teams`.
    pub fn with_enemy_options(mut self, options: TeamOptions) -> Self {
        self.enemy_options = options;
        self
    }

    fn roll_lives(&mut self) -> u32 {
        self.rng.random_range(self.min_lives..=self.max_lives)
    }

    /// Install the player's team with a random number of lives, which is returned.
    pub fn set_my_team(&mut self, team: MonsterTeam) -> u32 {
        self.original_elements = team.original_elements();
        self.player = Some(team);
        self.player_lives = self.roll_lives();
        log::info!("player team set with {} lives", self.player_lives);
        self.player_lives
    }

    pub fn add_enemy_team(&mut self, team: MonsterTeam, lives: u32) {
        self.enemies.push_back(EnemyEntry { team, lives });
    }

    /// Replace the enemy queue with `count` randomly selected teams.
    pub fn generate_teams(&mut self, count: usize) -> TowerResult<()> {
        self.enemies.clear();
        for _ in 0..count {
            let team = spawn_team(
                self.enemy_options,
                &Selection::Random,
                self.battle.species(),
                &mut self.rng,
            )?;
            let lives = self.roll_lives();
            log::debug!("generated enemy {} with {} lives", team, lives);
            self.add_enemy_team(team, lives);
        }
        Ok(())
    }

    pub fn player_team(&self) -> Option<&MonsterTeam> {
        self.player.as_ref()
    }

    pub fn player_lives(&self) -> u32 {
        self.player_lives
    }

    /// Enemy entries in queue order, head first.
    pub fn enemies(&self) -> impl Iterator<Item = &EnemyEntry> {
        self.enemies.iter()
    }

    pub fn tower_elements(&self) -> &BTreeSet<Element> {
        &self.tower_elements
    }

    pub fn enemy_elements(&self) -> &BTreeSet<Element> {
        &self.enemy_elements
    }

    /// False once the player is out of lives; otherwise whether any enemy
    /// still has lives. Exhausted enemies stay in the queue.
    pub fn battles_remaining(&self) -> bool {
        self.player_lives > 0 && self.enemies.iter().any(|entry| entry.lives > 0)
    }

    // The enemy the next battle will be fought against.
    fn next_up(&self) -> Option<&EnemyEntry> {
        self.enemies
            .iter()
            .find(|entry| entry.lives > 0)
            .or_else(|| self.enemies.front())
    }

    /// Fight the next enemy with lives left. Returns `None` once no battles remain.
    pub fn next_battle(&mut self) -> TowerResult<Option<TowerBattle<'_>>> {
        let player = self.player.as_mut().ok_or(TowerError::NoPlayerTeam)?;
        if self.player_lives == 0 || self.enemies.iter().all(|entry| entry.lives == 0) {
            return Ok(None);
        }

        // Exhausted enemies are passed over but keep their place in the rotation.
        while self.enemies.front().is_some_and(|entry| entry.lives == 0) {
            self.enemies.rotate_left(1);
        }
        // The entry only leaves the queue once its battle has been fought.
        let Some(front) = self.enemies.front_mut() else {
            return Ok(None);
        };
        let report = self.battle.battle(player, &mut front.team)?;
        player.regenerate()?;
        front.team.regenerate()?;
        let Some(mut entry) = self.enemies.pop_front() else {
            return Ok(None);
        };

        match report.result {
            GameState::Team1Win => entry.lives = entry.lives.saturating_sub(1),
            GameState::Team2Win => self.player_lives = self.player_lives.saturating_sub(1),
            GameState::Draw => {
                entry.lives = entry.lives.saturating_sub(1);
                self.player_lives = self.player_lives.saturating_sub(1);
            }
            GameState::InProgress => {}
        }
        log::info!(
            "tower battle: {:?}, player lives {}, enemy lives {}",
            report.result,
            self.player_lives,
            entry.lives
        );
        self.enemies.push_back(entry);

        if self.current_enemy == self.enemies.len() {
            self.tower_elements.clear();
            self.current_enemy = 0;
        }
        self.current_enemy += 1;

        self.enemy_elements = self
            .next_up()
            .map(|entry| entry.team.elements())
            .unwrap_or_default();
        self.tower_elements.extend(self.enemy_elements.iter().copied());

        let (Some(player_team), Some(enemy)) = (self.player.as_ref(), self.enemies.back()) else {
            return Ok(None);
        };
        Ok(Some(TowerBattle {
            result: report.result,
            report,
            player_team,
            enemy_team: &enemy.team,
            player_lives: self.player_lives,
            enemy_lives: enemy.lives,
        }))
    }

    /// Elements seen in the tower this rotation that neither the player's
    /// original team nor the next enemy team has, in element order.
    pub fn out_of_meta(&self) -> Vec<Element> {
        let next_elements = self
            .next_up()
            .map(|entry| entry.team.elements())
            .unwrap_or_default();
        self.tower_elements
            .iter()
            .filter(|element| {
                !self.original_elements.contains(element) && !next_elements.contains(element)
            })
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{fighter, neutral_effectiveness, team_of, TestMonsterBuilder};
    use crate::effectiveness::EffectivenessTable;
    use crate::errors::BattleError;
    use crate::monster::MonsterInstance;
    use crate::species::{Species, SpeciesTable};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn champion() -> MonsterInstance {
        TestMonsterBuilder::new(Species::Flamikin)
            .stats(50, 5, 10, 100)
            .element(Element::Fire)
            .evolves_into(None)
            .build()
    }

    fn weakling(species: Species, element: Element) -> MonsterInstance {
        TestMonsterBuilder::new(species)
            .stats(5, 5, 1, 10)
            .element(element)
            .evolves_into(None)
            .build()
    }

    #[test]
    fn test_losing_player_runs_out_after_two_battles() {
        let effectiveness = neutral_effectiveness();
        let battle = Battle::new(SpeciesTable::builtin(), &effectiveness);
        let mut tower = BattleTower::new(battle, StdRng::seed_from_u64(3))
            .with_lives_range(2, 2)
            .unwrap();

        assert_eq!(
            tower.set_my_team(team_of(TeamMode::Back, vec![weakling(Species::Vineon, Element::Grass)])),
            2
        );
        tower.add_enemy_team(team_of(TeamMode::Back, vec![champion()]), 2);

        let mut battles = 0;
        while tower.battles_remaining() {
            let outcome = tower.next_battle().unwrap().unwrap();
            assert_eq!(outcome.result, GameState::Team2Win);
            assert_eq!(outcome.enemy_lives, 2);
            battles += 1;
        }

        assert_eq!(battles, 2);
        assert_eq!(tower.player_lives(), 0);
        assert!(tower.next_battle().unwrap().is_none());
    }

    #[test]
    fn test_draw_costs_both_sides_a_life() {
        let effectiveness = neutral_effectiveness();
        let battle = Battle::new(SpeciesTable::builtin(), &effectiveness);
        let mut tower = BattleTower::new(battle, StdRng::seed_from_u64(3))
            .with_lives_range(3, 3)
            .unwrap();
        tower.set_my_team(team_of(TeamMode::Front, vec![fighter(Species::Flamikin, 50, 5, 7, 30)]));
        tower.add_enemy_team(
            team_of(TeamMode::Front, vec![fighter(Species::Vineon, 50, 5, 7, 30)]),
            4,
        );

        let outcome = tower.next_battle().unwrap().unwrap();

        assert_eq!(outcome.result, GameState::Draw);
        assert_eq!(outcome.player_lives, 2);
        assert_eq!(outcome.enemy_lives, 3);
        // Both teams are fresh again after the bout.
        assert_eq!(outcome.player_team.len(), 1);
        assert_eq!(outcome.enemy_team.len(), 1);
    }

    #[test]
    fn test_exhausted_enemies_are_skipped_but_kept() {
        let effectiveness = neutral_effectiveness();
        let battle = Battle::new(SpeciesTable::builtin(), &effectiveness);
        let mut tower = BattleTower::new(battle, StdRng::seed_from_u64(3));
        tower.set_my_team(team_of(TeamMode::Back, vec![champion()]));
        tower.add_enemy_team(team_of(TeamMode::Back, vec![weakling(Species::Aquariuma, Element::Water)]), 1);
        tower.add_enemy_team(team_of(TeamMode::Back, vec![weakling(Species::Vineon, Element::Grass)]), 2);

        let lives: Vec<u32> = std::iter::from_fn(|| {
            tower.next_battle().unwrap().map(|outcome| outcome.enemy_lives)
        })
        .collect();

        assert_eq!(lives, vec![0, 1, 0]);
        assert!(!tower.battles_remaining());
        assert_eq!(tower.enemies().count(), 2);
    }

    #[test]
    fn test_failed_battle_keeps_enemy_queue_intact() {
        let effectiveness = neutral_effectiveness();
        let battle = Battle::new(SpeciesTable::builtin(), &effectiveness);
        let mut tower = BattleTower::new(battle, StdRng::seed_from_u64(3));
        tower.set_my_team(team_of(TeamMode::Back, vec![champion()]));
        tower.add_enemy_team(team_of(TeamMode::Back, vec![]), 3);
        tower.add_enemy_team(team_of(TeamMode::Back, vec![weakling(Species::Vineon, Element::Grass)]), 2);

        assert!(matches!(
            tower.next_battle(),
            Err(TowerError::Battle(BattleError::Team(TeamError::Empty)))
        ));

        let lives: Vec<u32> = tower.enemies().map(|entry| entry.lives).collect();
        assert_eq!(lives, vec![3, 2]);
        assert_eq!(tower.enemies().next().map(|entry| entry.team.len()), Some(0));
        assert_eq!(tower.player_team().map(|team| team.len()), Some(1));
        assert!(tower.battles_remaining());
    }

    #[test]
    fn test_out_of_meta_tracks_rotation() {
        let effectiveness = neutral_effectiveness();
        let battle = Battle::new(SpeciesTable::builtin(), &effectiveness);
        let mut tower = BattleTower::new(battle, StdRng::seed_from_u64(3));
        tower.set_my_team(team_of(TeamMode::Back, vec![champion()]));
        for (species, element) in [
            (Species::Aquariuma, Element::Water),
            (Species::Vineon, Element::Grass),
            (Species::Frostbite, Element::Ice),
        ] {
            tower.add_enemy_team(team_of(TeamMode::Back, vec![weakling(species, element)]), 5);
        }
        assert!(tower.out_of_meta().is_empty());

        tower.next_battle().unwrap();
        tower.next_battle().unwrap();
        assert_eq!(tower.out_of_meta(), vec![Element::Grass]);

        tower.next_battle().unwrap();
        assert_eq!(tower.out_of_meta(), vec![Element::Grass, Element::Ice]);

        // A full rotation has passed, so the coverage set starts over.
        tower.next_battle().unwrap();
        assert_eq!(
            tower.tower_elements().iter().copied().collect::<Vec<_>>(),
            vec![Element::Grass]
        );
        assert!(tower.out_of_meta().is_empty());
    }

    #[test]
    fn test_next_battle_requires_player_team() {
        let effectiveness = neutral_effectiveness();
        let mut tower = BattleTower::new(
            Battle::new(SpeciesTable::builtin(), &effectiveness),
            StdRng::seed_from_u64(0),
        );
        assert!(matches!(tower.next_battle(), Err(TowerError::NoPlayerTeam)));
    }

    #[test]
    fn test_rejects_inverted_lives_range() {
        let effectiveness = neutral_effectiveness();
        let result = BattleTower::new(
            Battle::new(SpeciesTable::builtin(), &effectiveness),
            StdRng::seed_from_u64(0),
        )
        .with_lives_range(5, 2);
        assert!(matches!(
            result,
            Err(TowerError::Team(TeamError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn test_generated_tower_runs_to_completion() {
        let table = SpeciesTable::builtin();
        let battle = Battle::new(table, EffectivenessTable::builtin());
        let mut tower = BattleTower::new(battle, StdRng::seed_from_u64(129371));
        let player = spawn_team(
            TeamOptions::new(TeamMode::Back),
            &Selection::Random,
            table,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let lives = tower.set_my_team(player);
        assert!((MIN_LIVES..=MAX_LIVES).contains(&lives));

        tower.generate_teams(3).unwrap();
        assert_eq!(tower.enemies().count(), 3);
        assert!(tower.enemies().all(|entry| {
            (MIN_LIVES..=MAX_LIVES).contains(&entry.lives)
                && entry.team.mode() == TeamMode::Back
                && (1..=crate::team::TEAM_LIMIT).contains(&entry.team.len())
        }));

        let mut battles = 0;
        while tower.next_battle().unwrap().is_some() {
            battles += 1;
            assert!(battles < 1000);
        }
        assert!(!tower.battles_remaining());
    }
}
