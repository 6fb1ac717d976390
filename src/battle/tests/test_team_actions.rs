use crate::battle::ai::Action;
use crate::battle::engine::Battle;
use crate::battle::state::{BattleEvent, BattleState, EventBus, GameState};
use crate::battle::tests::common::{assert_ok, fighter, neutral_effectiveness, scripted_team_of, team_of};
use crate::errors::{BattleError, TeamError};
use crate::species::{Species, SpeciesTable};
use crate::team::{MonsterTeam, TeamMode, TeamOptions};
use pretty_assertions::assert_eq;

fn species_in(team: &MonsterTeam) -> Vec<Species> {
    team.snapshot_order().iter().map(|m| m.species()).collect()
}

#[test]
fn test_swap_returns_active_and_takes_next() {
    let effectiveness = neutral_effectiveness();
    let battle = Battle::new(SpeciesTable::builtin(), &effectiveness).with_verbosity(1);
    let mut team1 = scripted_team_of(
        TeamMode::Back,
        vec![
            fighter(Species::Flamikin, 5, 5, 5, 50),
            fighter(Species::Aquariuma, 5, 5, 5, 50),
        ],
        Action::Swap,
    );
    let mut team2 = scripted_team_of(
        TeamMode::Back,
        vec![fighter(Species::Vineon, 50, 40, 5, 50)],
        Action::Attack,
    );

    let mut bus = EventBus::new();
    {
        let mut state = assert_ok(BattleState::new(&mut team1, &mut team2));
        assert_ok(battle.resolve_turn(&mut state, &mut bus));

        // The incoming monster takes the hit.
        assert_eq!(state.active[0].species(), Species::Aquariuma);
        assert_eq!(state.active[0].current_hp(), 50 - 45 - 1);
    }
    assert_eq!(species_in(&team1), vec![Species::Flamikin]);
    assert!(bus.events().contains(&BattleEvent::MonsterSwapped {
        side: 0,
        old_monster: Species::Flamikin,
        new_monster: Species::Aquariuma,
    }));
}

#[test]
fn test_special_only_reorders_own_team() {
    let effectiveness = neutral_effectiveness();
    let battle = Battle::new(SpeciesTable::builtin(), &effectiveness);
    let mut team1 = scripted_team_of(
        TeamMode::Back,
        vec![
            fighter(Species::Flamikin, 5, 5, 5, 50),
            fighter(Species::Aquariuma, 5, 5, 5, 50),
            fighter(Species::Vineon, 5, 5, 5, 50),
        ],
        Action::Special,
    );
    let mut team2 = scripted_team_of(
        TeamMode::Front,
        vec![
            fighter(Species::Gustwing, 5, 5, 5, 50),
            fighter(Species::Frostbite, 5, 5, 5, 50),
            fighter(Species::Rockodile, 5, 5, 5, 50),
        ],
        Action::Swap,
    );

    {
        let mut state = assert_ok(BattleState::new(&mut team1, &mut team2));
        assert_ok(battle.resolve_turn(&mut state, &mut EventBus::new()));

        // Queue [Aquariuma, Vineon, Flamikin] becomes [Flamikin, Vineon, Aquariuma].
        assert_eq!(state.active[0].species(), Species::Flamikin);
        // Stack swap puts the same monster straight back out.
        assert_eq!(state.active[1].species(), Species::Rockodile);
    }
    assert_eq!(species_in(&team1), vec![Species::Vineon, Species::Aquariuma]);
    assert_eq!(species_in(&team2), vec![Species::Frostbite, Species::Gustwing]);
}

#[test]
fn test_optimise_special_sends_out_lowest_key() {
    let effectiveness = neutral_effectiveness();
    let battle = Battle::new(SpeciesTable::builtin(), &effectiveness);
    let options = TeamOptions::new(TeamMode::Optimise).with_sort_key(crate::team::SortKey::Hp);
    let mut team1 = MonsterTeam::from_monsters(
        options,
        vec![
            fighter(Species::Flamikin, 5, 5, 5, 10),
            fighter(Species::Aquariuma, 5, 5, 5, 30),
            fighter(Species::Vineon, 5, 5, 5, 20),
        ],
    )
    .unwrap()
    .with_behavior(Box::new(crate::battle::ai::FixedBehavior(Action::Special)));
    let mut team2 = scripted_team_of(
        TeamMode::Back,
        vec![fighter(Species::Gustwing, 5, 5, 5, 50)],
        Action::Swap,
    );

    let mut state = assert_ok(BattleState::new(&mut team1, &mut team2));
    assert_eq!(state.active[0].species(), Species::Aquariuma);
    assert_ok(battle.resolve_turn(&mut state, &mut EventBus::new()));

    assert_eq!(state.active[0].species(), Species::Flamikin);
}

#[test]
fn test_battle_requires_monsters_on_both_sides() {
    let effectiveness = neutral_effectiveness();
    let battle = Battle::new(SpeciesTable::builtin(), &effectiveness);
    let mut team1 = team_of(TeamMode::Back, vec![fighter(Species::Flamikin, 5, 5, 5, 10)]);
    let mut team2 = MonsterTeam::new(TeamOptions::new(TeamMode::Back)).unwrap();

    let result = battle.battle(&mut team1, &mut team2);

    assert!(matches!(result, Err(BattleError::Team(TeamError::Empty))));
    assert_eq!(species_in(&team1), vec![Species::Flamikin]);
}

#[test]
fn test_battle_opens_with_full_roster_sizes() {
    let effectiveness = neutral_effectiveness();
    let battle = Battle::new(SpeciesTable::builtin(), &effectiveness).with_verbosity(1);
    let mut team1 = team_of(TeamMode::Back, vec![fighter(Species::Flamikin, 50, 5, 5, 20)]);
    let mut team2 = team_of(
        TeamMode::Back,
        vec![
            fighter(Species::Vineon, 5, 5, 1, 1),
            fighter(Species::Gustwing, 5, 5, 1, 1),
        ],
    );

    let report = assert_ok(battle.battle(&mut team1, &mut team2));

    assert_eq!(
        report.events.events()[..3],
        [
            BattleEvent::BattleStarted {
                team1_size: 1,
                team2_size: 2,
            },
            BattleEvent::MonsterSentOut {
                side: 0,
                monster: Species::Flamikin,
            },
            BattleEvent::MonsterSentOut {
                side: 1,
                monster: Species::Vineon,
            },
        ]
    );
}

#[test]
fn test_deeper_team_outlasts_single_monster() {
    let effectiveness = neutral_effectiveness();
    let battle = Battle::new(SpeciesTable::builtin(), &effectiveness).with_verbosity(1);
    let mut team1 = team_of(TeamMode::Back, vec![fighter(Species::Flamikin, 20, 5, 5, 20)]);
    let mut team2 = team_of(
        TeamMode::Back,
        vec![
            fighter(Species::Vineon, 20, 5, 5, 20),
            fighter(Species::Gustwing, 20, 5, 5, 20),
        ],
    );

    let report = assert_ok(battle.battle(&mut team1, &mut team2));

    assert_eq!(report.result, GameState::Team2Win);
    let lines = report.events.formatted_lines();
    assert_eq!(lines.first().map(String::as_str), Some("Battle begins: 1 monsters vs 2 monsters"));
    assert!(lines.last().is_some_and(|line| line.starts_with("Team 2 wins")));
}
