//! Player roster checks and the random team draw.

use crate::{
    error::{SettleError, SettleResult},
    rng::GameRng,
};
use std::collections::BTreeSet;

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_TEAM_DRAW_PLAYERS: usize = 4;

/// Trim every name and check it is filled in, long enough and unique.
pub fn validate_roster<S: AsRef<str>>(names: &[S]) -> SettleResult<Vec<String>> {
    let trimmed: Vec<String> = names.iter().map(|n| n.as_ref().trim().to_string()).collect();

    let mut seen = BTreeSet::new();
    for name in &trimmed {
        if name.is_empty() {
            return Err(SettleError::InvalidName {
                name: name.clone(),
                reason: "name must be filled in",
            });
        }
        if name.chars().count() < MIN_NAME_LEN {
            return Err(SettleError::InvalidName {
                name: name.clone(),
                reason: "name must be at least 3 characters",
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(SettleError::InvalidName {
                name: name.clone(),
                reason: "name is already taken",
            });
        }
    }
    Ok(trimmed)
}

/// Shuffle the roster and deal it into two teams.
///
/// After the shuffle, seat `i` is paired with seat `n - 1 - i`; pairs
/// alternate between the teams. With four players that gives
/// `[s0, s3]` against `[s1, s2]`. When the pair count is odd the middle
/// pair is split, so both teams always get `n / 2` players.
pub fn draw_teams<S: AsRef<str>>(names: &[S], rng: &mut GameRng) -> SettleResult<[Vec<String>; 2]> {
    let mut seats = validate_roster(names)?;
    if seats.len() < MIN_TEAM_DRAW_PLAYERS || seats.len() % 2 != 0 {
        return Err(SettleError::RosterTooSmall {
            required: MIN_TEAM_DRAW_PLAYERS,
            count: seats.len(),
        });
    }
    rng.shuffle(&mut seats);

    let n = seats.len();
    let pairs = n / 2;
    let mut teams: [Vec<String>; 2] = [Vec::new(), Vec::new()];
    for i in 0..pairs {
        let (first, second) = (seats[i].clone(), seats[n - 1 - i].clone());
        if pairs % 2 == 1 && i == pairs - 1 {
            teams[0].push(first);
            teams[1].push(second);
        } else {
            let team = &mut teams[i % 2];
            team.push(first);
            team.push(second);
        }
    }
    debug_assert_eq!(teams[0].len(), teams[1].len());
    log::debug!(
        "{}: drew teams of {} and {}",
        rng.name,
        teams[0].len(),
        teams[1].len()
    );
    Ok(teams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngStream;

    #[test]
    fn names_are_trimmed() {
        let names = validate_roster(&["  Asha ", "Ravi"]).unwrap();
        assert_eq!(names, vec!["Asha", "Ravi"]);
    }

    #[test]
    fn short_blank_and_duplicate_names_are_rejected() {
        assert!(validate_roster(&["Asha", "  "]).is_err());
        assert!(validate_roster(&["Asha", "Al"]).is_err());
        assert!(validate_roster(&["Asha", "Asha "]).is_err());
    }

    #[test]
    fn team_draw_is_reproducible_and_uses_everyone() {
        let roster = ["Asha", "Ravi", "Meera", "Kiran"];
        let mut rng_a = GameRng::new(99, RngStream::TeamDraw);
        let mut rng_b = GameRng::new(99, RngStream::TeamDraw);
        let a = draw_teams(&roster, &mut rng_a).unwrap();
        let b = draw_teams(&roster, &mut rng_b).unwrap();
        assert_eq!(a, b);

        let mut everyone: Vec<String> = a.concat();
        everyone.sort();
        assert_eq!(everyone, vec!["Asha", "Kiran", "Meera", "Ravi"]);
        assert_eq!(a[0].len(), 2);
        assert_eq!(a[1].len(), 2);
    }

    #[test]
    fn team_draw_of_six_gives_two_teams_of_three() {
        let roster = ["Asha", "Ravi", "Meera", "Kiran", "Devan", "Priya"];
        for seed in 0..20 {
            let mut rng = GameRng::new(seed, RngStream::TeamDraw);
            let teams = draw_teams(&roster, &mut rng).unwrap();
            assert_eq!(teams[0].len(), 3, "seed {seed}: {teams:?}");
            assert_eq!(teams[1].len(), 3, "seed {seed}: {teams:?}");

            let mut everyone = teams.concat();
            everyone.sort();
            everyone.dedup();
            assert_eq!(everyone.len(), 6, "seed {seed}: {teams:?}");
        }
    }

    #[test]
    fn team_draw_needs_an_even_roster_of_four() {
        let mut rng = GameRng::new(1, RngStream::TeamDraw);
        assert!(matches!(
            draw_teams(&["Asha", "Ravi", "Meera"], &mut rng),
            Err(SettleError::RosterTooSmall { count: 3, .. })
        ));
    }
}
