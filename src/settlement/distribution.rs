//! Fair distribution (the Karl Marx rule).
//!
//! A fixed total moves from the losing side to the winning side. Each side
//! splits it as evenly as whole quarters allow. Leftover quarters:
//!
//! - losers: the whole remainder falls on the loser with the highest
//!   cumulative standing, so the player furthest behind never absorbs
//!   rounding
//! - winners: handed out one at a time, starting with the lowest
//!   cumulative standing
//!
//! Ties go to the lower seat. Both sides move exactly `total`, so the
//! result always sums to zero.

use crate::core::{PlayerId, PlayerMap, Quarters};

/// Per-player deltas for moving `total` quarters from `losers` to `winners`.
///
/// Players on neither list get zero. Both lists must be non-empty.
///
/// ```
/// use wolf_goat_pig::core::{PlayerId, PlayerMap};
/// use wolf_goat_pig::settlement::distribute;
///
/// let p = PlayerId::new;
/// let standings = PlayerMap::with_value(5, 0);
/// let deltas = distribute(6, &[p(0), p(1), p(2)], &[p(3), p(4)], &standings);
/// assert_eq!(deltas.values().copied().collect::<Vec<_>>(), vec![2, 2, 2, -3, -3]);
/// ```
pub fn distribute(
    total: Quarters,
    winners: &[PlayerId],
    losers: &[PlayerId],
    standings: &PlayerMap<Quarters>,
) -> PlayerMap<Quarters> {
    let mut deltas = PlayerMap::with_value(standings.player_count(), 0);

    for (player, share) in split(total, losers, standings, Remainder::Leader) {
        deltas[player] -= share;
    }
    for (player, share) in split(total, winners, standings, Remainder::Trailing) {
        deltas[player] += share;
    }

    deltas
}

/// Who absorbs the quarters an even split leaves over.
#[derive(Clone, Copy)]
enum Remainder {
    /// All of it to the highest standing.
    Leader,
    /// One each, lowest standing first.
    Trailing,
}

fn split(
    total: Quarters,
    players: &[PlayerId],
    standings: &PlayerMap<Quarters>,
    remainder_rule: Remainder,
) -> Vec<(PlayerId, Quarters)> {
    if players.is_empty() {
        return Vec::new();
    }

    let count = players.len() as Quarters;
    let share = total / count;
    let remainder = total % count;

    let mut ranked = players.to_vec();
    ranked.sort_by(|&a, &b| {
        let by_standing = standings[a].cmp(&standings[b]);
        let by_standing = match remainder_rule {
            Remainder::Leader => by_standing.reverse(),
            Remainder::Trailing => by_standing,
        };
        by_standing.then(a.cmp(&b))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, player)| {
            let extra = match remainder_rule {
                Remainder::Leader if rank == 0 => remainder,
                Remainder::Leader => 0,
                Remainder::Trailing => Quarters::from((rank as Quarters) < remainder),
            };
            (player, share + extra)
        })
        .collect()
}
