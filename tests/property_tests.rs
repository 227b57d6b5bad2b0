//! Property tests for stroke allocation, distribution and settlement.

use proptest::prelude::*;

use wolf_goat_pig::core::{Action, HoleDefinition, Player, PlayerId, PlayerMap, RoundConfig};
use wolf_goat_pig::handicap::{strokes_received, Handicap};
use wolf_goat_pig::settlement::{distribute, HoleOutcome};
use wolf_goat_pig::{Round, TeamId};

fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

/// Play hole 1 with the captain solo or partnered with seat 1; every
/// aardvark joins side two.
fn play_first_hole(handicaps: &[u16], solo: bool, gross: &[u8]) -> Round {
    let count = handicaps.len();
    let players = handicaps
        .iter()
        .enumerate()
        .map(|(i, &tenths)| {
            Player::new(p(i as u8), format!("P{i}"), Handicap::from_tenths(tenths).unwrap())
        })
        .collect();
    let holes = (1..=18).map(|n| HoleDefinition::new(n, 4, n, 400)).collect();
    let mut round = Round::create(players, holes, RoundConfig::default()).unwrap();

    if solo {
        round.apply(p(0), Action::DeclareSolo).unwrap();
    } else {
        round.apply(p(0), Action::RequestPartner { partner: p(1) }).unwrap();
        round.apply(p(1), Action::AcceptPartner).unwrap();
    }
    let leader = if solo { p(1) } else { p(2) };
    for aardvark in 4..count {
        let aardvark = p(aardvark as u8);
        round
            .apply(aardvark, Action::AardvarkJoinRequest { team: TeamId::Two })
            .unwrap();
        round.apply(leader, Action::AardvarkJoinAccept { aardvark }).unwrap();
    }

    round
        .apply(
            p(0),
            Action::SubmitScores {
                gross: PlayerMap::from_vec(gross[..count].to_vec()),
            },
        )
        .unwrap();
    round
}

proptest! {
    /// More handicap never means fewer strokes on any hole.
    #[test]
    fn test_strokes_monotonic(tenths in 0u16..400, stroke_index in 1u8..=18) {
        let lower = strokes_received(Handicap::from_tenths(tenths).unwrap(), stroke_index).unwrap();
        let higher = strokes_received(Handicap::from_tenths(tenths + 1).unwrap(), stroke_index).unwrap();
        prop_assert!(lower <= higher);
    }

    /// Strokes over a full course add up to the handicap, half included.
    #[test]
    fn test_strokes_sum_to_handicap(tenths in 0u16..=400) {
        let handicap = Handicap::from_tenths(tenths).unwrap();
        let halves: u16 = (1..=18u8)
            .map(|si| strokes_received(handicap, si).unwrap().halves())
            .sum();
        prop_assert_eq!(halves, handicap.whole() * 2 + u16::from(handicap.has_half()));
    }

    /// Distribution moves exactly the total; the leading loser absorbs the
    /// loser-side remainder.
    #[test]
    fn test_distribution_zero_sum(
        total in 0i64..2_000,
        count in 4usize..=6,
        split in 1usize..6,
        standings in prop::collection::vec(-200i64..200, 6),
    ) {
        let split = split.min(count - 1);
        let seats: Vec<PlayerId> = (0..count).map(|i| p(i as u8)).collect();
        let (winners, losers) = seats.split_at(split);
        let standings = PlayerMap::from_vec(standings[..count].to_vec());

        let deltas = distribute(total, winners, losers, &standings);
        prop_assert_eq!(deltas.values().sum::<i64>(), 0);

        let per_winner = total / winners.len() as i64;
        for &winner in winners {
            prop_assert!(deltas[winner] == per_winner || deltas[winner] == per_winner + 1);
        }
        // Only the leading loser pays more than the even share, and they
        // pay the whole remainder.
        let per_loser = total / losers.len() as i64;
        let remainder = total % losers.len() as i64;
        let leader = losers
            .iter()
            .copied()
            .max_by(|&a, &b| standings[a].cmp(&standings[b]).then(b.cmp(&a)))
            .unwrap();
        for &loser in losers {
            let expected = if loser == leader { per_loser + remainder } else { per_loser };
            prop_assert_eq!(-deltas[loser], expected);
        }
    }

    /// Any played hole settles to zero; a halved hole grows the carry-over
    /// by its wager.
    #[test]
    fn test_settlement_zero_sum(
        count in 4usize..=6,
        handicaps in prop::collection::vec(0u16..=400, 6),
        gross in prop::collection::vec(1u8..=10, 6),
        solo in any::<bool>(),
    ) {
        let round = play_first_hole(&handicaps[..count], solo, &gross);
        let record = round.settlements().front().cloned().unwrap();

        prop_assert_eq!(record.sum(), 0);
        prop_assert_eq!(round.standings().values().sum::<i64>(), 0);
        match record.outcome {
            HoleOutcome::Halved { .. } => {
                prop_assert_eq!(record.transferred, 0);
                prop_assert_eq!(record.carry_out, record.carry_in + record.wager);
            }
            HoleOutcome::Won { .. } => {
                prop_assert!(record.transferred > 0);
                prop_assert_eq!(record.carry_out, 0);
            }
            HoleOutcome::Conceded { .. } => prop_assert!(false, "no double was offered"),
        }
    }
}
