//! Backtracking search with MRV/degree variable ordering and
//! least-constraining-value ordering, running AC-3 inference on every branch

use super::{ac3, Assignment, CspError, DomainStore};
use crate::crossword::{Crossword, Variable};
use itertools::Itertools;
use std::time::{Duration, Instant};

/// Counters describing one search run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Tentative assignments explored
    pub states: usize,
    /// Tentative assignments undone after their branch failed
    pub backtracks: usize,
}

/// Depth-first backtracking solver over a node-consistent domain store.
///
/// Failure to find a solution is a normal result (`Ok(None)`); errors are
/// reserved for contract violations and the optional wall-clock limit.
pub struct BacktrackSolver<'a> {
    crossword: &'a Crossword,
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
    stats: SearchStatistics,
}

impl<'a> BacktrackSolver<'a> {
    /// Create a solver with no time limit
    pub fn new(crossword: &'a Crossword) -> Self {
        Self {
            crossword,
            time_limit: None,
            deadline: None,
            stats: SearchStatistics::default(),
        }
    }

    /// Create a solver that aborts with [`CspError::Timeout`] once `limit`
    /// wall-clock time has elapsed. The limit is checked at each recursion
    /// entry, so results are unchanged whenever it does not expire.
    pub fn with_time_limit(crossword: &'a Crossword, limit: Duration) -> Self {
        Self {
            crossword,
            time_limit: Some(limit),
            deadline: None,
            stats: SearchStatistics::default(),
        }
    }

    /// Counters from the most recent [`solve`](Self::solve) call
    pub fn statistics(&self) -> SearchStatistics {
        self.stats
    }

    /// Search for a complete assignment, pruning domains branch-locally as it
    /// goes. `Ok(None)` means the puzzle has no solution from this state.
    pub fn solve(&mut self, domains: &mut DomainStore) -> Result<Option<Assignment>, CspError> {
        self.deadline = self.time_limit.map(|limit| Instant::now() + limit);
        self.stats = SearchStatistics::default();
        let mut assignment = Assignment::new();
        self.backtrack(&mut assignment, domains)
    }

    fn backtrack(
        &mut self,
        assignment: &mut Assignment,
        domains: &mut DomainStore,
    ) -> Result<Option<Assignment>, CspError> {
        if let (Some(deadline), Some(limit)) = (self.deadline, self.time_limit) {
            if Instant::now() >= deadline {
                return Err(CspError::Timeout { limit });
            }
        }

        if assignment.is_complete(self.crossword) {
            return Ok(Some(assignment.clone()));
        }

        let Some(var) = self.select_unassigned_variable(assignment, domains) else {
            return Ok(None);
        };

        for word in self.order_domain_values(&var, assignment, domains) {
            self.stats.states += 1;
            assignment.assign(var, word)?;

            if self.consistent(assignment) {
                let mark = domains.checkpoint();
                let arcs: Vec<(Variable, Variable)> = self
                    .crossword
                    .neighbors(&var)
                    .iter()
                    .map(|neighbor| (*neighbor, var))
                    .collect();

                if ac3(domains, self.crossword, Some(arcs)) {
                    if let Some(solution) = self.backtrack(assignment, domains)? {
                        return Ok(Some(solution));
                    }
                }

                domains.rollback(mark);
            }

            assignment.unassign(&var)?;
            self.stats.backtracks += 1;
        }

        Ok(None)
    }

    /// Pick the unassigned variable with the fewest remaining candidates,
    /// breaking ties by the larger neighbor count and then by canonical
    /// variable order, so runs are reproducible.
    fn select_unassigned_variable(
        &self,
        assignment: &Assignment,
        domains: &DomainStore,
    ) -> Option<Variable> {
        let mut choice: Option<Variable> = None;

        for var in self.crossword.variables() {
            if assignment.contains(var) {
                continue;
            }
            match choice {
                None => choice = Some(*var),
                Some(best) => {
                    let size = domains.size(var);
                    let best_size = domains.size(&best);
                    let better = size < best_size
                        || (size == best_size
                            && self.crossword.neighbors(var).len()
                                > self.crossword.neighbors(&best).len());
                    if better {
                        choice = Some(*var);
                    }
                }
            }
        }

        choice
    }

    /// Order `var`'s candidates ascending by how many candidate words they
    /// would rule out across unassigned neighbors, ties broken
    /// lexicographically. Pure ordering: domains are not touched.
    fn order_domain_values(
        &self,
        var: &Variable,
        assignment: &Assignment,
        domains: &DomainStore,
    ) -> Vec<String> {
        let unassigned: Vec<&Variable> = self
            .crossword
            .neighbors(var)
            .iter()
            .filter(|neighbor| !assignment.contains(neighbor))
            .collect();

        let mut scored: Vec<(usize, String)> = domains
            .words(var)
            .map(|word| {
                let eliminated = unassigned
                    .iter()
                    .map(|neighbor| {
                        let Some((i, j)) = self.crossword.overlap(var, neighbor) else {
                            return 0;
                        };
                        let letter = word.as_bytes().get(i).copied();
                        domains
                            .words(neighbor)
                            .filter(|other| other.as_bytes().get(j).copied() != letter)
                            .count()
                    })
                    .sum();
                (eliminated, word.clone())
            })
            .collect();

        scored.sort();
        scored.into_iter().map(|(_, word)| word).collect()
    }

    /// Full consistency check of the partial assignment: length-correct
    /// values, globally distinct words, and agreement on every overlap
    /// between assigned pairs, not only neighbors of the latest choice.
    fn consistent(&self, assignment: &Assignment) -> bool {
        for (var, word) in assignment.iter() {
            if word.len() != var.length {
                return false;
            }
        }

        for ((x, wx), (y, wy)) in assignment.iter().tuple_combinations() {
            if wx == wy {
                return false;
            }
            if let Some((i, j)) = self.crossword.overlap(x, y) {
                if wx.as_bytes().get(i) != wy.as_bytes().get(j) {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::Direction;
    use crate::csp::enforce_node_consistency;
    use std::collections::HashSet;

    fn puzzle(structure: Vec<Vec<bool>>, words: &[&str]) -> Crossword {
        let vocab: HashSet<String> = words.iter().map(|w| w.to_string()).collect();
        Crossword::new(structure, vocab).unwrap()
    }

    fn cross(words: &[&str]) -> Crossword {
        puzzle(
            vec![
                vec![true, true, true],
                vec![false, true, false],
                vec![false, true, false],
            ],
            words,
        )
    }

    fn node_consistent_domains(crossword: &Crossword) -> DomainStore {
        let mut domains = DomainStore::seed(crossword);
        enforce_node_consistency(&mut domains, crossword);
        domains
    }

    fn assert_valid(crossword: &Crossword, assignment: &Assignment) {
        assert!(assignment.is_complete(crossword));

        let words: Vec<&String> = crossword
            .variables()
            .iter()
            .map(|var| assignment.get(var).unwrap())
            .collect();
        let distinct: HashSet<&&String> = words.iter().collect();
        assert_eq!(distinct.len(), words.len(), "duplicate word in assignment");

        for x in crossword.variables() {
            let wx = assignment.get(x).unwrap();
            assert_eq!(wx.len(), x.length);
            for y in crossword.neighbors(x) {
                let (i, j) = crossword.overlap(x, y).unwrap();
                let wy = assignment.get(y).unwrap();
                assert_eq!(wx.as_bytes()[i], wy.as_bytes()[j]);
            }
        }
    }

    #[test]
    fn test_solves_crossing_pair() {
        let crossword = cross(&["CAT", "CAR", "ART"]);
        let mut domains = node_consistent_domains(&crossword);
        let mut solver = BacktrackSolver::new(&crossword);

        let assignment = solver.solve(&mut domains).unwrap().unwrap();

        assert_valid(&crossword, &assignment);
        let down = Variable::new(0, 1, Direction::Down, 3);
        // ART is the only word that can start with the crossing letter
        assert_eq!(assignment.get(&down), Some(&"ART".to_string()));
        assert!(solver.statistics().states >= 2);
    }

    #[test]
    fn test_returns_none_when_domain_is_emptied_by_lengths() {
        let crossword = puzzle(vec![vec![true; 5]], &["CAT", "ARTS"]);
        let mut domains = node_consistent_domains(&crossword);
        let mut solver = BacktrackSolver::new(&crossword);

        assert_eq!(solver.solve(&mut domains).unwrap(), None);
    }

    #[test]
    fn test_returns_none_when_letters_cannot_agree() {
        let crossword = cross(&["CAT", "CAR", "RAT"]);
        let mut domains = node_consistent_domains(&crossword);
        let mut solver = BacktrackSolver::new(&crossword);

        // No candidate for the down slot starts with 'A'
        assert_eq!(solver.solve(&mut domains).unwrap(), None);
        assert!(solver.statistics().backtracks > 0);
    }

    #[test]
    fn test_distinctness_is_global() {
        // Two parallel slots that never cross still may not share a word
        let structure = vec![
            vec![true, true, true],
            vec![false, false, false],
            vec![true, true, true],
        ];

        let single = puzzle(structure.clone(), &["CAT"]);
        let mut domains = node_consistent_domains(&single);
        let mut solver = BacktrackSolver::new(&single);
        assert_eq!(solver.solve(&mut domains).unwrap(), None);

        let pair = puzzle(structure, &["CAT", "RAT"]);
        let mut domains = node_consistent_domains(&pair);
        let mut solver = BacktrackSolver::new(&pair);
        let assignment = solver.solve(&mut domains).unwrap().unwrap();
        assert_valid(&pair, &assignment);
    }

    #[test]
    fn test_mrv_prefers_smaller_domain() {
        let crossword = cross(&["CAT", "CAR", "ART"]);
        let mut domains = node_consistent_domains(&crossword);
        let across = Variable::new(0, 0, Direction::Across, 3);
        let down = Variable::new(0, 1, Direction::Down, 3);

        // Shrink the down domain by hand; MRV must now pick it first
        domains.remove(&down, "CAT");
        domains.remove(&down, "CAR");

        let solver = BacktrackSolver::new(&crossword);
        let choice = solver
            .select_unassigned_variable(&Assignment::new(), &domains)
            .unwrap();
        assert_eq!(choice, down);

        // With one variable assigned, the other is the only choice left
        let mut assignment = Assignment::new();
        assignment.assign(down, "ART".to_string()).unwrap();
        let choice = solver
            .select_unassigned_variable(&assignment, &domains)
            .unwrap();
        assert_eq!(choice, across);
    }

    #[test]
    fn test_degree_breaks_mrv_ties() {
        // A horizontal bar crossed by two vertical slots: all domains are
        // equal in size, but the bar has degree two.
        let structure = vec![
            vec![true, false, true],
            vec![true, true, true],
            vec![true, false, true],
        ];
        let crossword = puzzle(structure, &["CAT", "CAR", "ART"]);
        let domains = node_consistent_domains(&crossword);
        let solver = BacktrackSolver::new(&crossword);

        let choice = solver
            .select_unassigned_variable(&Assignment::new(), &domains)
            .unwrap();
        assert_eq!(choice, Variable::new(1, 0, Direction::Across, 3));
    }

    #[test]
    fn test_least_constraining_value_order() {
        let crossword = cross(&["CAT", "CAR", "ART"]);
        let domains = node_consistent_domains(&crossword);
        let solver = BacktrackSolver::new(&crossword);
        let across = Variable::new(0, 0, Direction::Across, 3);

        // CAT and CAR each leave ART available in the down slot (2 words
        // eliminated); ART eliminates all three. Ties fall back to
        // lexicographic order.
        let ordered = solver.order_domain_values(&across, &Assignment::new(), &domains);
        assert_eq!(ordered, vec!["CAR", "CAT", "ART"]);
    }

    #[test]
    fn test_value_order_ignores_assigned_neighbors() {
        let crossword = cross(&["CAT", "CAR", "ART"]);
        let domains = node_consistent_domains(&crossword);
        let solver = BacktrackSolver::new(&crossword);
        let across = Variable::new(0, 0, Direction::Across, 3);
        let down = Variable::new(0, 1, Direction::Down, 3);

        let mut assignment = Assignment::new();
        assignment.assign(down, "ART".to_string()).unwrap();

        // With the only neighbor assigned, every candidate scores zero and
        // the order is purely lexicographic.
        let ordered = solver.order_domain_values(&across, &assignment, &domains);
        assert_eq!(ordered, vec!["ART", "CAR", "CAT"]);
    }

    #[test]
    fn test_sibling_branches_see_clean_domains() {
        // The first candidate tried for the down slot duplicates the across
        // word and fails; its sibling must still see an untouched store.
        let crossword = cross(&["CAT", "CAR", "ART", "RAT"]);
        let mut domains = node_consistent_domains(&crossword);
        let mut solver = BacktrackSolver::new(&crossword);

        let assignment = solver.solve(&mut domains).unwrap().unwrap();

        assert_valid(&crossword, &assignment);
        assert!(solver.statistics().backtracks > 0);
        // Failed-branch prunings have been rolled back; only the successful
        // branch's inference remains in the store.
        for var in crossword.variables() {
            assert!(!domains.is_empty(var));
        }
    }

    #[test]
    fn test_consistent_rejects_overlap_disagreement() {
        let crossword = cross(&["CAT", "CAR", "ART", "RAT"]);
        let solver = BacktrackSolver::new(&crossword);
        let across = Variable::new(0, 0, Direction::Across, 3);
        let down = Variable::new(0, 1, Direction::Down, 3);

        let mut good = Assignment::new();
        good.assign(across, "CAT".to_string()).unwrap();
        good.assign(down, "ART".to_string()).unwrap();
        assert!(solver.consistent(&good));

        let mut bad = Assignment::new();
        bad.assign(across, "CAT".to_string()).unwrap();
        bad.assign(down, "RAT".to_string()).unwrap();
        assert!(!solver.consistent(&bad));

        let mut duplicate = Assignment::new();
        duplicate.assign(across, "CAT".to_string()).unwrap();
        assert!(duplicate.assign(down, "CAT".to_string()).is_ok());
        assert!(!solver.consistent(&duplicate));
    }

    #[test]
    fn test_zero_time_limit_aborts() {
        let crossword = cross(&["CAT", "CAR", "ART"]);
        let mut domains = node_consistent_domains(&crossword);
        let mut solver = BacktrackSolver::with_time_limit(&crossword, Duration::ZERO);

        let err = solver.solve(&mut domains).unwrap_err();
        assert!(matches!(err, CspError::Timeout { .. }));
    }

    #[test]
    fn test_solves_ring_puzzle() {
        let structure = vec![
            vec![true, true, true, true, true],
            vec![true, false, false, false, true],
            vec![true, false, false, false, true],
            vec![true, false, false, false, true],
            vec![true, true, true, true, true],
        ];
        let crossword = puzzle(
            structure,
            &["SPLIT", "SIREN", "THOSE", "NICHE", "STONE", "CAT", "CAR"],
        );
        let mut domains = node_consistent_domains(&crossword);
        let mut solver = BacktrackSolver::new(&crossword);

        let assignment = solver.solve(&mut domains).unwrap().unwrap();
        assert_valid(&crossword, &assignment);
    }
}
