//! Two-team settlements: shares are decided per team, paid per player.

use tablepot_core::{
    compute_settlement, compute_settlement_with, Entity, ErrorKind, Member, Mode, PolicyConfig,
    SettleError, Settlement,
};

fn team(id: &str, members: &[(&str, i64)]) -> Entity {
    Entity::team(
        id,
        members
            .iter()
            .map(|&(m, s)| Member { id: m.into(), score: s })
            .collect(),
    )
}

fn rows(s: &Settlement) -> Vec<(String, u64, Option<bool>)> {
    s.allocations
        .iter()
        .map(|a| (a.entity_id.clone(), a.amount, a.team_won))
        .collect()
}

fn row(id: &str, amount: u64, won: Option<bool>) -> (String, u64, Option<bool>) {
    (id.to_string(), amount, won)
}

fn sample_teams() -> Vec<Entity> {
    vec![
        team("Team 1", &[("Asha", 6), ("Ravi", 2)]),
        team("Team 2", &[("Meera", 3), ("Kiran", 1)]),
    ]
}

#[test]
fn standard_team_game_pays_each_player_their_team_share() {
    // winners 30% (15% each), losers 70% (35% each);
    // 150 floors to 22, 22, 52, 52 with two units from the top
    let s = compute_settlement(&sample_teams(), 150, Mode::team()).unwrap();
    assert_eq!(
        rows(&s),
        vec![
            row("Asha", 23, Some(true)),
            row("Ravi", 23, Some(true)),
            row("Meera", 52, Some(false)),
            row("Kiran", 52, Some(false)),
        ]
    );
    assert_eq!(s.allocations[2].team.as_deref(), Some("Team 2"));
}

#[test]
fn decided_team_game_does_not_pay_like_a_draw() {
    let entities = vec![
        team("Team 1", &[("Asha", 9), ("Ravi", 9)]),
        team("Team 2", &[("Meera", 0), ("Kiran", 0)]),
    ];
    let s = compute_settlement(&entities, 100, Mode::team()).unwrap();
    let winner = s.amount_for("Asha").unwrap();
    let loser = s.amount_for("Meera").unwrap();
    assert_ne!(winner, loser, "decided game paid both teams alike: {s:?}");
    assert_eq!((winner, loser), (15, 35));
}

#[test]
fn winning_team_is_listed_first() {
    let entities = vec![
        team("Team 1", &[("Asha", 0), ("Ravi", 1)]),
        team("Team 2", &[("Meera", 3), ("Kiran", 1)]),
    ];
    let s = compute_settlement(&entities, 100, Mode::team()).unwrap();
    assert_eq!(s.allocations[0].entity_id, "Meera");
    assert_eq!(s.allocations[0].team_won, Some(true));
    assert_eq!(s.allocations[3].entity_id, "Ravi");
}

#[test]
fn loser_pays_team_game_charges_only_the_losing_team() {
    let s = compute_settlement(&sample_teams(), 150, Mode::team().with_loser_pays(true)).unwrap();
    assert_eq!(
        rows(&s),
        vec![
            row("Asha", 0, Some(true)),
            row("Ravi", 0, Some(true)),
            row("Meera", 75, Some(false)),
            row("Kiran", 75, Some(false)),
        ]
    );
}

#[test]
fn draw_splits_the_pot_across_every_player() {
    let entities = vec![
        team("Team 1", &[("Asha", 3), ("Ravi", 2)]),
        team("Team 2", &[("Meera", 4), ("Kiran", 1)]),
    ];
    for mode in [Mode::team(), Mode::team().with_loser_pays(true)] {
        let s = compute_settlement(&entities, 100, mode).unwrap();
        assert_eq!(
            rows(&s),
            vec![
                row("Asha", 25, None),
                row("Ravi", 25, None),
                row("Meera", 25, None),
                row("Kiran", 25, None),
            ],
            "mode {mode:?}"
        );
    }
}

#[test]
fn uneven_draw_stays_balanced() {
    let entities = vec![
        team("Team 1", &[("Asha", 3), ("Ravi", 2)]),
        team("Team 2", &[("Meera", 5)]),
    ];
    let s = compute_settlement(&entities, 100, Mode::team()).unwrap();
    let got: Vec<u64> = s.allocations.iter().map(|a| a.amount).collect();
    assert_eq!(got, vec![34, 33, 33]);
}

#[test]
fn pot_of_120_uses_the_general_team_ladder() {
    let s = compute_settlement(&sample_teams(), 120, Mode::team()).unwrap();
    assert_eq!(
        rows(&s),
        vec![
            row("Asha", 18, Some(true)),
            row("Ravi", 18, Some(true)),
            row("Meera", 42, Some(false)),
            row("Kiran", 42, Some(false)),
        ]
    );
}

#[test]
fn team_ladder_is_configurable() {
    let mut config = PolicyConfig::default();
    config.team_ladder = vec![50, 50];
    let s = compute_settlement_with(&config, &sample_teams(), 100, Mode::team()).unwrap();
    let got: Vec<u64> = s.allocations.iter().map(|a| a.amount).collect();
    assert_eq!(got, vec![25, 25, 25, 25]);
}

#[test]
fn team_mode_needs_exactly_two_teams() {
    let mut entities = sample_teams();
    entities.push(team("Team 3", &[("Dev", 1)]));
    let err = compute_settlement(&entities, 100, Mode::team()).unwrap_err();
    assert!(matches!(err, SettleError::TeamCount { count: 3 }));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn empty_team_is_rejected() {
    let entities = vec![team("Team 1", &[("Asha", 1)]), Entity::team("Team 2", Vec::new())];
    let err = compute_settlement(&entities, 100, Mode::team()).unwrap_err();
    assert!(matches!(err, SettleError::EmptyTeam { ref team } if team == "Team 2"));
}

#[test]
fn declared_team_score_must_match_members() {
    let mut entities = sample_teams();
    entities[0].score = 99;
    let err = compute_settlement(&entities, 100, Mode::team()).unwrap_err();
    assert!(matches!(
        err,
        SettleError::TeamScoreMismatch { declared: 99, members_total: 8, .. }
    ));
}

#[test]
fn overflowing_team_total_is_a_validation_error() {
    let entities = vec![
        team("Team 1", &[("Asha", i64::MAX), ("Ravi", 1)]),
        team("Team 2", &[("Meera", 1)]),
    ];
    let err = compute_settlement(&entities, 100, Mode::team()).unwrap_err();
    assert!(matches!(err, SettleError::ScoreOverflow { ref id } if id == "Team 1"));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn player_on_both_teams_is_rejected() {
    let entities = vec![
        team("Team 1", &[("Asha", 1), ("Ravi", 1)]),
        team("Team 2", &[("Asha", 2)]),
    ];
    let err = compute_settlement(&entities, 100, Mode::team()).unwrap_err();
    assert!(matches!(err, SettleError::DuplicateEntity { ref id } if id == "Asha"));
}
