use std::collections::HashMap;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use crate::common::TeamRecord;
use crate::error::{Error, Result};

/// Read-only snapshot of a division: each team's record and the games still left between every
/// pair of teams. Teams are addressed by their position in the input.
#[derive(Debug, Clone)]
pub struct Standings {
    records: Vec<TeamRecord>,
    // against[i][j] == against[j][i], zero on the diagonal
    against: Vec<Vec<u32>>,
    ids: HashMap<String, usize>,
}

impl Standings {
    pub fn new(records: Vec<TeamRecord>, against: Vec<Vec<u32>>) -> Result<Self> {
        if records.len() != against.len() {
            return Err(Error::LengthMismatch {
                teams: records.len(),
                rows: against.len(),
            });
        }
        let mut ids = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if ids.insert(record.name.clone(), i).is_some() {
                return Err(Error::DuplicateTeam(record.name.clone()));
            }
        }
        for (i, row) in against.iter().enumerate() {
            if row.len() != records.len() {
                return Err(Error::LengthMismatch {
                    teams: records.len(),
                    rows: row.len(),
                });
            }
            if row[i] != 0 {
                return Err(Error::SelfSchedule(records[i].name.clone()));
            }
        }
        for i in 0..records.len() {
            for j in i + 1..records.len() {
                if against[i][j] != against[j][i] {
                    return Err(Error::AsymmetricSchedule {
                        first: records[i].name.clone(),
                        second: records[j].name.clone(),
                        forward: against[i][j],
                        backward: against[j][i],
                    });
                }
            }
        }
        Ok(Standings {
            records,
            against,
            ids,
        })
    }
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        std::fs::read_to_string(path)?.parse()
    }
    pub fn number_of_teams(&self) -> usize {
        self.records.len()
    }
    // names in input order
    pub fn teams(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|record| record.name.as_str())
    }
    pub fn index_of(&self, team: &str) -> Result<usize> {
        self.ids
            .get(team)
            .copied()
            .ok_or_else(|| Error::UnknownTeam(team.to_owned()))
    }
    pub fn record(&self, team: &str) -> Result<&TeamRecord> {
        Ok(&self.records[self.index_of(team)?])
    }
    pub fn wins(&self, team: &str) -> Result<u32> {
        self.record(team).map(|record| record.wins)
    }
    pub fn losses(&self, team: &str) -> Result<u32> {
        self.record(team).map(|record| record.losses)
    }
    pub fn remaining(&self, team: &str) -> Result<u32> {
        self.record(team).map(|record| record.remaining)
    }
    pub fn against(&self, first: &str, second: &str) -> Result<u32> {
        Ok(self.against[self.index_of(first)?][self.index_of(second)?])
    }

    // index-based accessors used by the flow computation; callers guarantee i, j < n
    pub(crate) fn name(&self, i: usize) -> &str {
        &self.records[i].name
    }
    pub(crate) fn record_at(&self, i: usize) -> &TeamRecord {
        &self.records[i]
    }
    pub(crate) fn games_between(&self, i: usize, j: usize) -> u32 {
        self.against[i][j]
    }
}

struct Tokens<'a>(SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn word(&mut self, expected: &'static str) -> Result<&'a str> {
        self.0.next().ok_or(Error::MissingToken { expected })
    }
    fn number<N: FromStr>(&mut self, expected: &'static str) -> Result<N> {
        let token = self.word(expected)?;
        token.parse().map_err(|_| Error::InvalidNumber {
            token: token.to_owned(),
            expected,
        })
    }
}

impl FromStr for Standings {
    type Err = Error;

    // n, then per team: name wins losses remaining against_0 .. against_{n-1}
    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = Tokens(s.split_whitespace());
        let n: usize = tokens.number("number of teams")?;
        let mut records = Vec::new();
        let mut against = Vec::new();
        for _ in 0..n {
            let name = tokens.word("team name")?;
            let wins = tokens.number("wins")?;
            let losses = tokens.number("losses")?;
            let remaining = tokens.number("remaining games")?;
            let row = (0..n)
                .map(|_| tokens.number("games against another team"))
                .collect::<Result<Vec<u32>>>()?;
            records.push(TeamRecord::new(name, wins, losses, remaining));
            against.push(row);
        }
        let count = tokens.0.count();
        if count > 0 {
            return Err(Error::TrailingInput { count });
        }
        Standings::new(records, against)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAMS4: &str = "4
        Atlanta       83 71  8  0 1 6 1
        Philadelphia  80 79  3  1 0 0 2
        New_York      78 78  6  6 0 0 0
        Montreal      77 82  3  1 2 0 0
    ";

    #[test]
    fn test_parse() {
        let standings: Standings = TEAMS4.parse().unwrap();
        assert_eq!(standings.number_of_teams(), 4);
        assert_eq!(
            standings.teams().collect::<Vec<_>>(),
            ["Atlanta", "Philadelphia", "New_York", "Montreal"]
        );
        assert_eq!(standings.wins("Philadelphia").unwrap(), 80);
        assert_eq!(standings.losses("Philadelphia").unwrap(), 79);
        assert_eq!(standings.remaining("New_York").unwrap(), 6);
        assert_eq!(standings.against("Atlanta", "New_York").unwrap(), 6);
        assert_eq!(standings.against("New_York", "Atlanta").unwrap(), 6);
        assert_eq!(standings.against("Montreal", "Montreal").unwrap(), 0);
    }

    #[test]
    fn test_unknown_team() {
        let standings: Standings = TEAMS4.parse().unwrap();
        assert!(matches!(
            standings.wins("Boston"),
            Err(Error::UnknownTeam(name)) if name == "Boston"
        ));
        assert!(matches!(
            standings.against("Atlanta", "Boston"),
            Err(Error::UnknownTeam(_))
        ));
        assert!(matches!(standings.index_of(""), Err(Error::UnknownTeam(_))));
    }

    #[test]
    fn test_missing_tokens() {
        let err = "2 A 1 2 3 0 1 B 4 5 6 1".parse::<Standings>().unwrap_err();
        assert!(matches!(err, Error::MissingToken { .. }));
        assert!(matches!(
            "".parse::<Standings>().unwrap_err(),
            Error::MissingToken { expected: "number of teams" }
        ));
    }

    #[test]
    fn test_huge_team_count() {
        let err = "18446744073709551615 A 1 1 1 0".parse::<Standings>().unwrap_err();
        assert!(matches!(err, Error::MissingToken { .. }));
        let err = "1000000000 A 1 1 1 0".parse::<Standings>().unwrap_err();
        assert!(matches!(err, Error::MissingToken { .. }));
    }

    #[test]
    fn test_trailing_tokens() {
        let err = "1 A 1 2 3 0 extra".parse::<Standings>().unwrap_err();
        assert!(matches!(err, Error::TrailingInput { count: 1 }));
    }

    #[test]
    fn test_negative_numbers_rejected() {
        let err = "1 A -1 2 3 0".parse::<Standings>().unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { expected: "wins", .. }));
    }

    #[test]
    fn test_schedule_validation() {
        assert!(matches!(
            "2 A 1 1 1 0 1 B 1 1 2 2 0".parse::<Standings>().unwrap_err(),
            Error::AsymmetricSchedule { forward: 1, backward: 2, .. }
        ));
        assert!(matches!(
            "1 A 1 1 1 1".parse::<Standings>().unwrap_err(),
            Error::SelfSchedule(_)
        ));
        assert!(matches!(
            "2 A 1 1 0 0 0 A 1 1 0 0 0".parse::<Standings>().unwrap_err(),
            Error::DuplicateTeam(_)
        ));
    }

    #[test]
    fn test_new_length_mismatch() {
        let records = vec![TeamRecord::new("A", 1, 0, 0), TeamRecord::new("B", 0, 1, 0)];
        let err = Standings::new(records, vec![vec![0, 0]]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { teams: 2, rows: 1 }));
    }

    #[test]
    fn test_empty_division() {
        let standings: Standings = "0".parse().unwrap();
        assert_eq!(standings.number_of_teams(), 0);
        assert_eq!(standings.teams().count(), 0);
    }
}
