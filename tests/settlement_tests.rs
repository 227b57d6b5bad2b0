//! Worked settlement scenarios, end to end through the round.

use wolf_goat_pig::core::{Action, HoleDefinition, Player, PlayerId, PlayerMap, RoundConfig};
use wolf_goat_pig::handicap::{strokes_received, Handicap};
use wolf_goat_pig::settlement::{distribute, HoleOutcome};
use wolf_goat_pig::{Round, TeamId};

fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

fn course() -> Vec<HoleDefinition> {
    (1..=18).map(|n| HoleDefinition::new(n, 4, n, 400)).collect()
}

fn round_with(handicaps: &[f64], config: RoundConfig) -> Round {
    let players = handicaps
        .iter()
        .enumerate()
        .map(|(i, &h)| {
            let id = p(i as u8);
            Player::new(id, format!("P{i}"), Handicap::new(h).unwrap())
        })
        .collect();
    Round::create(players, course(), config).unwrap()
}

fn scratch(count: usize) -> Round {
    round_with(&vec![0.0; count], RoundConfig::default())
}

fn gross(values: &[u8]) -> Action {
    Action::SubmitScores {
        gross: PlayerMap::from_vec(values.to_vec()),
    }
}

/// Strokes on a stroke-index-10 hole for a mixed group.
#[test]
fn test_strokes_on_index_ten() {
    let strokes: Vec<u16> = [18.0, 9.0, 0.0, 27.0]
        .iter()
        .map(|&h| strokes_received(Handicap::new(h).unwrap(), 10).unwrap().full())
        .collect();
    // 27 is one full lap of 18 plus 9, which does not reach index 10.
    assert_eq!(strokes, vec![1, 0, 0, 1]);
}

/// Handicap strokes decide the hole: the 18-handicapper's gross 5 ties a
/// scratch 4 because of the stroke.
#[test]
fn test_net_scores_decide() {
    let mut round = round_with(&[0.0, 18.0, 0.0, 0.0], RoundConfig::default());
    round.apply(p(0), Action::RequestPartner { partner: p(2) }).unwrap();
    round.apply(p(2), Action::AcceptPartner).unwrap();

    let snapshot = round.apply(p(0), gross(&[4, 5, 4, 5])).unwrap();
    let record = snapshot.last_settlement().unwrap();
    // p1's 5 nets 4 on hole 1, tying the best ball.
    assert!(matches!(record.outcome, HoleOutcome::Halved { .. }));
    assert_eq!(record.carry_out, 1);
}

/// Solo captain loses to the best ball of three.
#[test]
fn test_solo_loss() {
    let mut round = scratch(4);
    round.apply(p(0), Action::DeclareSolo).unwrap();
    let snapshot = round.apply(p(0), gross(&[5, 4, 6, 6])).unwrap();

    let record = snapshot.last_settlement().unwrap();
    assert_eq!(
        record.outcome.winner(),
        Some(TeamId::Two),
        "three-player side has the best ball"
    );
    assert_eq!(record.delta(p(0)), -6);
    for player in 1..4 {
        assert_eq!(record.delta(p(player)), 2);
    }
}

/// Two halved holes build a carry-over the third hole pays out.
#[test]
fn test_carry_over_paid_on_decisive_hole() {
    let mut round = scratch(4);
    for captain in 0..2 {
        round.apply(p(captain), Action::DeclareSolo).unwrap();
        round.apply(p(captain), gross(&[4, 4, 4, 4])).unwrap();
    }
    assert_eq!(round.carry_over(), 2);

    round.apply(p(2), Action::RequestPartner { partner: p(3) }).unwrap();
    round.apply(p(3), Action::AcceptPartner).unwrap();
    let snapshot = round.apply(p(2), gross(&[5, 5, 4, 5])).unwrap();

    let record = snapshot.last_settlement().unwrap();
    assert_eq!(record.carry_in, 2);
    assert_eq!(record.carry_out, 0);
    assert_eq!(record.transferred, 6);
    assert_eq!(snapshot.standings.values().copied().collect::<Vec<_>>(), vec![-3, -3, 3, 3]);
    assert_eq!(snapshot.carry_over, 0);
}

/// Five players, three against two, base wager three quarters.
#[test]
fn test_five_player_trio_beats_pair() {
    let mut round = round_with(&[0.0; 5], RoundConfig::default().with_base_wager(3));
    round.apply(p(0), Action::RequestPartner { partner: p(1) }).unwrap();
    round.apply(p(1), Action::AcceptPartner).unwrap();
    round.apply(p(4), Action::AardvarkJoinRequest { team: TeamId::Two }).unwrap();
    round.apply(p(2), Action::AardvarkJoinAccept { aardvark: p(4) }).unwrap();

    let snapshot = round.apply(p(0), gross(&[5, 5, 4, 5, 5])).unwrap();
    let record = snapshot.last_settlement().unwrap();
    assert_eq!(record.transferred, 6);
    assert_eq!(
        record.deltas.values().copied().collect::<Vec<_>>(),
        vec![-3, -3, 2, 2, 2]
    );
}

/// A declined double concedes the hole at the pre-double wager, carry-over
/// included.
#[test]
fn test_declined_double_pays_carry_over() {
    let mut round = scratch(4);
    round.apply(p(0), Action::DeclareSolo).unwrap();
    round.apply(p(0), gross(&[4, 4, 4, 4])).unwrap();

    round.apply(p(1), Action::RequestPartner { partner: p(2) }).unwrap();
    round.apply(p(2), Action::AcceptPartner).unwrap();
    round.apply(p(1), Action::OfferDouble).unwrap();
    let snapshot = round.apply(p(0), Action::DeclineDouble).unwrap();

    let record = snapshot.last_settlement().unwrap();
    assert_eq!(record.hole, 2);
    assert_eq!(record.outcome, HoleOutcome::Conceded { by: TeamId::Two });
    assert_eq!(record.carry_in, 1);
    assert_eq!(record.delta(p(1)), 2);
    assert_eq!(record.delta(p(2)), 2);
    assert_eq!(record.delta(p(0)), -2);
    assert_eq!(record.delta(p(3)), -2);
    assert_eq!(snapshot.hole.map(|h| h.number), Some(3));
}

/// An odd total spreads its remainder by standing.
#[test]
fn test_fair_distribution_remainders() {
    let standings = PlayerMap::from_vec(vec![0, 5, -4, 10, 3]);
    let deltas = distribute(7, &[p(0), p(1)], &[p(2), p(3), p(4)], &standings);

    // Winners: the lower standing takes the extra quarter.
    assert_eq!(deltas[p(0)], 4);
    assert_eq!(deltas[p(1)], 3);
    // Losers: the leader pays the extra quarter.
    assert_eq!(deltas[p(3)], -3);
    assert_eq!(deltas[p(2)], -2);
    assert_eq!(deltas[p(4)], -2);
    assert_eq!(deltas.values().sum::<i64>(), 0);
}

/// Two leftover quarters both fall on the leading loser.
#[test]
fn test_leading_loser_absorbs_remainder() {
    let standings = PlayerMap::from_vec(vec![-3, 1, 6, 2, 2]);
    let deltas = distribute(11, &[p(0), p(1)], &[p(2), p(3), p(4)], &standings);

    assert_eq!(deltas[p(2)], -5);
    assert_eq!(deltas[p(3)], -3);
    assert_eq!(deltas[p(4)], -3);
    // Winners: p0 trails and takes the odd quarter.
    assert_eq!(deltas[p(0)], 6);
    assert_eq!(deltas[p(1)], 5);
}

/// Standings carry into later remainders; the round stays zero-sum.
#[test]
fn test_standings_stay_zero_sum() {
    let mut round = round_with(&[0.0; 5], RoundConfig::default());
    // Captain solos and wins against four: 2 quarters from each.
    round.apply(p(0), Action::DeclareSolo).unwrap();
    round.apply(p(4), Action::AardvarkJoinRequest { team: TeamId::Two }).unwrap();
    round.apply(p(1), Action::AardvarkJoinAccept { aardvark: p(4) }).unwrap();
    let snapshot = round.apply(p(0), gross(&[3, 4, 4, 4, 4])).unwrap();

    assert_eq!(snapshot.standings[p(0)], 8);
    assert_eq!(snapshot.standings.values().sum::<i64>(), 0);
    assert!(snapshot.settlements.iter().all(|r| r.sum() == 0));
}
