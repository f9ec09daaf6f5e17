//! Market, league, team and methodology breakdowns over a wager collection.
//!
//! Nothing here depends on the ladder; every function takes a flat wager
//! slice. Team names are recovered heuristically from free-text event
//! strings, so team rollups are best-effort.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{Money, Percent};
use super::{Outcome, Wager};

/// Label used for wagers without a league.
pub const NO_LEAGUE: &str = "No league";

/// Label used for wagers without a methodology.
pub const NO_METHODOLOGY: &str = "No method";

/// Market text marking a first-half market.
const FIRST_HALF: &str = "FIRST HALF";

/// Under lines reported by [`under_matrix`]; lines up to 2.5 also get a half-time row.
const UNDER_LINES: [&str; 9] = ["0.5", "1.5", "2.5", "3.5", "4.5", "5.5", "6.5", "7.5", "8.5"];
const HALF_TIME_MAX_LINE: usize = 2;

/// Rolled-up figures for one group of wagers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub count: u32,
    pub profit: Money,
    /// Lost wagers; for under markets these are the goals conceded.
    pub loss_events: u32,
    pub won: u32,
    pub settled: u32,
    pub invested: Money,
}

impl Breakdown {
    /// Fold one wager into the totals.
    pub fn add(&mut self, wager: &Wager) {
        self.count += 1;
        self.profit += wager.profit;
        self.invested += wager.stake;
        if wager.is_loss() {
            self.loss_events += 1;
        }
        if wager.outcome.is_settled() {
            self.settled += 1;
            if wager.outcome == Outcome::Won {
                self.won += 1;
            }
        }
    }

    /// Build totals from a set of wagers.
    pub fn of<'a, I>(wagers: I) -> Self
    where
        I: IntoIterator<Item = &'a Wager>,
    {
        let mut breakdown = Self::default();
        for wager in wagers {
            breakdown.add(wager);
        }
        breakdown
    }

    /// Won over settled wagers as a percentage.
    #[must_use]
    pub fn win_rate(&self) -> Option<Percent> {
        (self.settled > 0)
            .then(|| Decimal::from(self.won) / Decimal::from(self.settled) * Decimal::ONE_HUNDRED)
    }

    /// Profit over invested stake as a percentage.
    #[must_use]
    pub fn roi(&self) -> Option<Percent> {
        (self.invested > Decimal::ZERO).then(|| self.profit / self.invested * Decimal::ONE_HUNDRED)
    }

    /// Loss events over count as a percentage.
    #[must_use]
    pub fn loss_rate(&self) -> Option<Percent> {
        (self.count > 0).then(|| {
            Decimal::from(self.loss_events) / Decimal::from(self.count) * Decimal::ONE_HUNDRED
        })
    }
}

/// Breakdowns keyed by label.
pub type Rollup = BTreeMap<String, Breakdown>;

fn rollup_by<'a, F>(wagers: &'a [Wager], label: F) -> Rollup
where
    F: Fn(&'a Wager) -> &'a str,
{
    let mut map = Rollup::new();
    for wager in wagers {
        map.entry(label(wager).to_string()).or_default().add(wager);
    }
    map
}

/// Totals per exact market label.
#[must_use]
pub fn by_market(wagers: &[Wager]) -> Rollup {
    rollup_by(wagers, |w| w.market.as_str())
}

/// Totals per league, with unassigned wagers under [`NO_LEAGUE`].
#[must_use]
pub fn by_league(wagers: &[Wager]) -> Rollup {
    rollup_by(wagers, |w| w.league.as_deref().unwrap_or(NO_LEAGUE))
}

/// Totals per methodology, with untagged wagers under [`NO_METHODOLOGY`].
#[must_use]
pub fn by_methodology(wagers: &[Wager]) -> Rollup {
    rollup_by(wagers, |w| w.methodology.as_deref().unwrap_or(NO_METHODOLOGY))
}

/// Totals per team for the given team names.
///
/// A wager counts towards a team when its event mentions the team
/// (case-insensitive) or its `team` field names it. One wager can count
/// towards several teams. Teams without wagers are omitted.
#[must_use]
pub fn by_team(wagers: &[Wager], teams: &[String]) -> Rollup {
    let mut map = Rollup::new();
    for team in teams {
        let needle = team.to_lowercase();
        let breakdown = Breakdown::of(wagers.iter().filter(|w| {
            w.event.to_lowercase().contains(&needle) || w.team.as_deref() == Some(team.as_str())
        }));
        if breakdown.count > 0 {
            map.insert(team.clone(), breakdown);
        }
    }
    map
}

fn separator() -> Option<&'static Regex> {
    static SEPARATOR: OnceLock<Option<Regex>> = OnceLock::new();
    SEPARATOR
        .get_or_init(|| Regex::new(r"(?i)\s+(?:vs|v|@|-|/)\s+").ok())
        .as_ref()
}

/// Split an event string into participant names.
///
/// Separators are `vs`, `v`, `@`, `-` and `/` surrounded by whitespace, so
/// scores like `2/1` stay intact. Parts of one character or less are dropped.
/// Text without a separator comes back as a single name.
#[must_use]
pub fn split_event(event: &str) -> Vec<String> {
    let keep = |part: &&str| part.chars().count() > 1;
    match separator() {
        Some(re) => re
            .split(event)
            .map(str::trim)
            .filter(keep)
            .map(str::to_string)
            .collect(),
        None => std::iter::once(event.trim())
            .filter(keep)
            .map(str::to_string)
            .collect(),
    }
}

/// Every team name found in event strings and explicit `team` fields, sorted.
#[must_use]
pub fn discover_teams(wagers: &[Wager]) -> Vec<String> {
    let mut teams = BTreeSet::new();
    for wager in wagers {
        teams.extend(split_event(&wager.event));
        if let Some(team) = wager.team.as_deref().filter(|t| !t.trim().is_empty()) {
            teams.insert(team.to_string());
        }
    }
    teams.into_iter().collect()
}

/// Rollup rows ordered by profit, best first.
#[must_use]
pub fn ranked_by_profit(rollup: &Rollup) -> Vec<(&str, &Breakdown)> {
    let mut rows: Vec<_> = rollup.iter().map(|(k, v)| (k.as_str(), v)).collect();
    rows.sort_by(|a, b| b.1.profit.cmp(&a.1.profit));
    rows
}

/// First-half versus full-time totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HalfSplit {
    pub first_half: Breakdown,
    pub full_time: Breakdown,
}

fn is_first_half(market_upper: &str) -> bool {
    market_upper.contains(FIRST_HALF)
}

/// Split totals by whether the market is a first-half market.
#[must_use]
pub fn half_split(wagers: &[Wager]) -> HalfSplit {
    let mut split = HalfSplit::default();
    for wager in wagers {
        if is_first_half(&wager.market.to_uppercase()) {
            split.first_half.add(wager);
        } else {
            split.full_time.add(wager);
        }
    }
    split
}

/// One under line of the market matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnderLine {
    pub line: String,
    /// Present only for the lower lines that trade at half time.
    pub half_time: Option<Breakdown>,
    pub full_time: Breakdown,
}

/// Under 0.5 through 8.5 totals, split into half-time and full-time rows.
///
/// A market is half-time when it reads `UNDER x HT`, or mentions the line
/// together with "FIRST HALF". Full time is `UNDER x FT`, or the line with
/// neither marker.
#[must_use]
pub fn under_matrix(wagers: &[Wager]) -> Vec<UnderLine> {
    let markets: Vec<(String, &Wager)> =
        wagers.iter().map(|w| (w.market.to_uppercase(), w)).collect();

    UNDER_LINES
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let label = format!("UNDER {line}");
            let ht_label = format!("{label} HT");
            let ft_label = format!("{label} FT");

            let half_time = Breakdown::of(markets.iter().filter_map(|(m, w)| {
                (m.contains(&ht_label) || (m.contains(&label) && is_first_half(m))).then_some(*w)
            }));
            let full_time = Breakdown::of(markets.iter().filter_map(|(m, w)| {
                let bare = m.contains(&label) && !m.contains(&ht_label) && !is_first_half(m);
                (m.contains(&ft_label) || bare).then_some(*w)
            }));

            UnderLine {
                line: label,
                half_time: (i <= HALF_TIME_MAX_LINE).then_some(half_time),
                full_time,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{settled, wager_on};
    use rust_decimal_macros::dec;

    fn on_market(market: &str, profit: Decimal, outcome: Outcome) -> Wager {
        Wager {
            market: market.to_string(),
            ..settled(wager_on(1, profit), outcome)
        }
    }

    #[test]
    fn market_rollup_counts_losses_and_wins() {
        let wagers = vec![
            on_market("UNDER 2.5 FT", dec!(5), Outcome::Won),
            on_market("UNDER 2.5 FT", dec!(-10), Outcome::Lost),
            on_market("Match Odds", dec!(0), Outcome::Pending),
        ];
        let rollup = by_market(&wagers);

        let under = &rollup["UNDER 2.5 FT"];
        assert_eq!(under.count, 2);
        assert_eq!(under.profit, dec!(-5));
        assert_eq!(under.loss_events, 1);
        assert_eq!(under.win_rate(), Some(dec!(50)));

        let odds = &rollup["Match Odds"];
        assert_eq!(odds.settled, 0);
        assert_eq!(odds.win_rate(), None);
    }

    #[test]
    fn roi_uses_invested_stake() {
        let breakdown = Breakdown::of(&[on_market("X", dec!(5), Outcome::Won)]);
        // testkit stakes are 10
        assert_eq!(breakdown.roi(), Some(dec!(50)));
    }

    #[test]
    fn missing_league_and_method_use_fallback_labels() {
        let wagers = vec![
            on_market("X", dec!(1), Outcome::Won),
            Wager {
                league: Some("Liga Portugal".into()),
                methodology: Some("Lay the Draw".into()),
                ..on_market("X", dec!(2), Outcome::Won)
            },
        ];
        assert!(by_league(&wagers).contains_key(NO_LEAGUE));
        assert!(by_league(&wagers).contains_key("Liga Portugal"));
        assert!(by_methodology(&wagers).contains_key(NO_METHODOLOGY));
        assert!(by_methodology(&wagers).contains_key("Lay the Draw"));
    }

    #[test]
    fn split_event_on_common_separators() {
        assert_eq!(split_event("Porto vs Benfica"), vec!["Porto", "Benfica"]);
        assert_eq!(split_event("Lakers @ Celtics"), vec!["Lakers", "Celtics"]);
        assert_eq!(split_event("Arsenal V Chelsea"), vec!["Arsenal", "Chelsea"]);
        assert_eq!(split_event("Braga - Sporting"), vec!["Braga", "Sporting"]);
        assert_eq!(split_event("Inter / Milan"), vec!["Inter", "Milan"]);
    }

    #[test]
    fn split_event_keeps_unparsed_text_whole() {
        assert_eq!(split_event("Nadal-Federer 2/1"), vec!["Nadal-Federer 2/1"]);
        assert!(split_event("").is_empty());
    }

    #[test]
    fn discover_teams_dedupes_and_includes_explicit_team() {
        let wagers = vec![
            Wager {
                event: "Porto vs Benfica".into(),
                ..wager_on(1, dec!(1))
            },
            Wager {
                event: "Benfica vs Braga".into(),
                team: Some("Vitória".into()),
                ..wager_on(2, dec!(1))
            },
        ];
        assert_eq!(
            discover_teams(&wagers),
            vec!["Benfica", "Braga", "Porto", "Vitória"]
        );
    }

    #[test]
    fn team_rollup_matches_event_mentions() {
        let wagers = vec![
            Wager {
                event: "Porto vs Benfica".into(),
                ..wager_on(1, dec!(4))
            },
            Wager {
                event: "benfica vs Braga".into(),
                ..wager_on(2, dec!(-2))
            },
        ];
        let teams = discover_teams(&wagers);
        let rollup = by_team(&wagers, &teams);

        assert_eq!(rollup["Benfica"].count, 2);
        assert_eq!(rollup["Benfica"].profit, dec!(2));
        assert_eq!(rollup["Porto"].count, 1);
    }

    #[test]
    fn ranking_puts_best_profit_first() {
        let wagers = vec![
            on_market("A", dec!(-3), Outcome::Lost),
            on_market("B", dec!(8), Outcome::Won),
            on_market("C", dec!(1), Outcome::Won),
        ];
        let rollup = by_market(&wagers);
        let order: Vec<_> = ranked_by_profit(&rollup).into_iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn half_split_detects_first_half_markets() {
        let wagers = vec![
            on_market("Over 0.5 Goals - First Half", dec!(3), Outcome::Won),
            on_market("Over 2.5 Goals", dec!(-1), Outcome::Lost),
        ];
        let split = half_split(&wagers);
        assert_eq!(split.first_half.profit, dec!(3));
        assert_eq!(split.full_time.count, 1);
    }

    #[test]
    fn under_matrix_separates_half_time_rows() {
        let wagers = vec![
            on_market("Under 1.5 HT", dec!(2), Outcome::Won),
            on_market("Under 1.5 Goals First Half", dec!(-10), Outcome::Lost),
            on_market("Under 1.5 FT", dec!(1), Outcome::Won),
            on_market("Under 4.5 FT", dec!(1), Outcome::Won),
        ];
        let matrix = under_matrix(&wagers);
        assert_eq!(matrix.len(), 9);

        let u15 = &matrix[1];
        let ht = u15.half_time.unwrap();
        assert_eq!(ht.count, 2);
        assert_eq!(ht.loss_events, 1);
        assert_eq!(u15.full_time.count, 1);

        let u45 = &matrix[4];
        assert!(u45.half_time.is_none());
        assert_eq!(u45.full_time.count, 1);
    }
}
