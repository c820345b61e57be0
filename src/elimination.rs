use once_cell::sync::OnceCell;
use tracing::debug;

use crate::common::{Certificate, Verdict};
use crate::error::Result;
use crate::max_flow::{edmonds_karp, source_side};
use crate::network::FlowNetwork;
use crate::standings::Standings;

/// Answers elimination queries for one division. Each team's verdict is computed on first use and
/// kept for the lifetime of the value; concurrent callers asking about the same team share a single
/// computation.
#[derive(Debug)]
pub struct Division {
    standings: Standings,
    verdicts: Vec<OnceCell<Verdict>>,
}

impl Division {
    pub fn new(standings: Standings) -> Self {
        let verdicts = (0..standings.number_of_teams())
            .map(|_| OnceCell::new())
            .collect();
        Division {
            standings,
            verdicts,
        }
    }
    pub fn standings(&self) -> &Standings {
        &self.standings
    }
    pub fn number_of_teams(&self) -> usize {
        self.standings.number_of_teams()
    }
    pub fn teams(&self) -> impl Iterator<Item = &str> + '_ {
        self.standings.teams()
    }
    pub fn wins(&self, team: &str) -> Result<u32> {
        self.standings.wins(team)
    }
    pub fn losses(&self, team: &str) -> Result<u32> {
        self.standings.losses(team)
    }
    pub fn remaining(&self, team: &str) -> Result<u32> {
        self.standings.remaining(team)
    }
    pub fn against(&self, first: &str, second: &str) -> Result<u32> {
        self.standings.against(first, second)
    }
    pub fn verdict(&self, team: &str) -> Result<&Verdict> {
        let candidate = self.standings.index_of(team)?;
        Ok(self.verdicts[candidate].get_or_init(|| decide(&self.standings, candidate)))
    }
    pub fn is_eliminated(&self, team: &str) -> Result<bool> {
        self.verdict(team).map(Verdict::is_eliminated)
    }
    // None when the team can still finish first
    pub fn certificate_of_elimination(&self, team: &str) -> Result<Option<&Certificate>> {
        self.verdict(team).map(Verdict::certificate)
    }
    // every eliminated team with its certificate, in input order
    pub fn eliminated(&self) -> impl Iterator<Item = (&str, &Certificate)> + '_ {
        (0..self.number_of_teams()).filter_map(move |i| {
            let verdict = self.verdicts[i].get_or_init(|| decide(&self.standings, i));
            verdict
                .certificate()
                .map(|certificate| (self.standings.name(i), certificate))
        })
    }
}

fn decide(standings: &Standings, candidate: usize) -> Verdict {
    if let Some(leader) = trivial_elimination(standings, candidate) {
        debug!(
            team = standings.name(candidate),
            by = standings.name(leader),
            "trivially eliminated"
        );
        return Verdict::TriviallyEliminated(Certificate::single(standings.name(leader)));
    }
    let mut network = FlowNetwork::build(standings, candidate);
    let flow = edmonds_karp(&mut network);
    let verdict = match extract_certificate(standings, &network, flow.value) {
        Some(certificate) => {
            debug_assert!(
                is_valid_certificate(standings, candidate, &certificate),
                "certificate {} does not eliminate {}",
                certificate,
                standings.name(candidate)
            );
            Verdict::Eliminated(certificate)
        }
        None => Verdict::Alive,
    };
    debug!(
        team = standings.name(candidate),
        eliminated = verdict.is_eliminated(),
        flow = flow.value,
        demand = network.demand(),
        "decided by max flow"
    );
    verdict
}

// some other team whose current wins already exceed the candidate's best possible total
pub(crate) fn trivial_elimination(standings: &Standings, candidate: usize) -> Option<usize> {
    let best = standings.record_at(candidate).max_wins();
    (0..standings.number_of_teams())
        .filter(|&i| i != candidate)
        .find(|&i| u64::from(standings.record_at(i).wins) > best)
}

// after a max flow: eliminated iff some game could not be routed, and then the teams on the
// source side of the cut form the certificate
pub(crate) fn extract_certificate(
    standings: &Standings,
    network: &FlowNetwork,
    flow: i64,
) -> Option<Certificate> {
    if flow == network.demand() {
        return None;
    }
    assert!(flow < network.demand(), "flow {} exceeds demand", flow);
    let side = source_side(network);
    let certificate: Certificate = network
        .team_nodes()
        .filter(|(_, node)| side.contains(node))
        .map(|(team, _)| standings.name(team))
        .collect();
    assert!(!certificate.is_empty(), "unsaturated cut without teams");
    Some(certificate)
}

/// Checks the pigeonhole bound: the certificate teams hold more wins, current plus those still
/// to be played among themselves, than they could share while each stays at or below the
/// candidate's best total.
pub fn is_valid_certificate(
    standings: &Standings,
    candidate: usize,
    certificate: &Certificate,
) -> bool {
    let members: Vec<usize> = (0..standings.number_of_teams())
        .filter(|&i| certificate.contains(standings.name(i)))
        .collect();
    if members.len() != certificate.len() || members.contains(&candidate) || members.is_empty() {
        return false;
    }
    let wins: u64 = members
        .iter()
        .map(|&i| u64::from(standings.record_at(i).wins))
        .sum();
    let internal: u64 = members
        .iter()
        .enumerate()
        .flat_map(|(k, &i)| members[k + 1..].iter().map(move |&j| (i, j)))
        .map(|(i, j)| u64::from(standings.games_between(i, j)))
        .sum();
    let best = standings.record_at(candidate).max_wins();
    wins + internal > members.len() as u64 * best
}
