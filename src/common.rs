use std::collections::btree_set::Iter;
use std::collections::BTreeSet;
use std::fmt::Display;

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TeamRecord {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub remaining: u32,
}

impl TeamRecord {
    pub fn new(name: impl Into<String>, wins: u32, losses: u32, remaining: u32) -> Self {
        TeamRecord {
            name: name.into(),
            wins,
            losses,
            remaining,
        }
    }
    // best final total, assuming every remaining game is won
    pub fn max_wins(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.remaining)
    }
}

impl Display for TeamRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{} ({} left)",
            self.name, self.wins, self.losses, self.remaining
        )
    }
}

/// Teams whose combined standing already rules out first place for some other team.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Certificate(BTreeSet<String>);

impl Certificate {
    pub fn new() -> Self {
        Certificate(BTreeSet::new())
    }
    pub fn single(name: impl Into<String>) -> Self {
        Certificate(BTreeSet::from([name.into()]))
    }
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Certificate {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for Certificate {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Certificate(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ ")?;
        for name in &self.0 {
            write!(f, "{} ", name)?;
        }
        write!(f, "}}")
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Verdict {
    Alive,
    // some single team already has more wins than the candidate can reach
    TriviallyEliminated(Certificate),
    // proven by a min cut of the schedule network
    Eliminated(Certificate),
}

impl Verdict {
    pub fn is_eliminated(&self) -> bool {
        !matches!(self, Verdict::Alive)
    }
    pub fn is_trivial(&self) -> bool {
        matches!(self, Verdict::TriviallyEliminated(_))
    }
    pub fn certificate(&self) -> Option<&Certificate> {
        match self {
            Verdict::Alive => None,
            Verdict::TriviallyEliminated(certificate) | Verdict::Eliminated(certificate) => {
                Some(certificate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_display_is_sorted() {
        let certificate: Certificate = ["Toronto", "Boston", "New_York"].into_iter().collect();
        assert_eq!(certificate.to_string(), "{ Boston New_York Toronto }");
        assert_eq!(Certificate::new().to_string(), "{ }");
    }

    #[test]
    fn test_verdict_certificate() {
        assert_eq!(Verdict::Alive.certificate(), None);
        let verdict = Verdict::TriviallyEliminated(Certificate::single("Detroit"));
        assert!(verdict.is_eliminated());
        assert!(verdict.is_trivial());
        assert!(verdict.certificate().unwrap().contains("Detroit"));
        let verdict = Verdict::Eliminated(["a", "b"].into_iter().collect());
        assert!(!verdict.is_trivial());
        assert_eq!(verdict.certificate().map(Certificate::len), Some(2));
    }

    #[test]
    fn test_max_wins() {
        let record = TeamRecord::new("Atlanta", 83, 71, 8);
        assert_eq!(record.max_wins(), 91);
        assert_eq!(record.to_string(), "Atlanta 83-71 (8 left)");
        let record = TeamRecord::new("Atlanta", u32::MAX, 0, u32::MAX);
        assert_eq!(record.max_wins(), 2 * u64::from(u32::MAX));
    }
}
