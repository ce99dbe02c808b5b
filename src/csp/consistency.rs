//! Node and arc consistency enforcement over the domain store

use super::DomainStore;
use crate::crossword::{Crossword, Variable};
use rayon::prelude::*;
use std::collections::VecDeque;

/// Remove from every domain each word whose length differs from the slot
/// length. A domain may legally end up empty here; search reports the failure
/// later. Per-variable filtering is independent, so the scan runs in
/// parallel and the removals are applied through the trail afterwards.
pub fn enforce_node_consistency(domains: &mut DomainStore, crossword: &Crossword) {
    let stale: Vec<(Variable, Vec<String>)> = crossword
        .variables()
        .par_iter()
        .map(|var| {
            let mismatched = domains
                .words(var)
                .filter(|word| word.len() != var.length)
                .cloned()
                .collect();
            (*var, mismatched)
        })
        .collect();

    for (var, words) in stale {
        for word in words {
            domains.remove(&var, &word);
        }
    }
}

/// Make `x` arc consistent with `y`: drop every word of `x` that has no
/// counterpart in `y`'s domain agreeing on the overlap letter. A counterpart
/// must be a different word, since one word cannot fill two slots. Returns
/// whether any removal was made; a no-op when the slots do not overlap.
pub fn revise(domains: &mut DomainStore, crossword: &Crossword, x: &Variable, y: &Variable) -> bool {
    let Some((i, j)) = crossword.overlap(x, y) else {
        return false;
    };

    let stale: Vec<String> = domains
        .words(x)
        .filter(|word| {
            let Some(&letter) = word.as_bytes().get(i) else {
                return true;
            };
            !domains
                .words(y)
                .any(|other| other.as_bytes().get(j) == Some(&letter) && other.as_str() != word.as_str())
        })
        .cloned()
        .collect();

    for word in &stale {
        domains.remove(x, word);
    }

    !stale.is_empty()
}

/// Propagate arc consistency to a fixed point with the AC-3 worklist
/// algorithm. Starts from `initial_arcs` when given, otherwise from every
/// ordered pair of overlapping variables. Returns false as soon as a domain
/// is wiped out, meaning the puzzle is unsatisfiable from the current state.
pub fn ac3(
    domains: &mut DomainStore,
    crossword: &Crossword,
    initial_arcs: Option<Vec<(Variable, Variable)>>,
) -> bool {
    let mut queue: VecDeque<(Variable, Variable)> = match initial_arcs {
        Some(arcs) => arcs.into(),
        None => crossword
            .variables()
            .iter()
            .flat_map(|x| crossword.neighbors(x).iter().map(move |y| (*x, *y)))
            .collect(),
    };

    while let Some((x, y)) = queue.pop_front() {
        if revise(domains, crossword, &x, &y) {
            if domains.is_empty(&x) {
                return false;
            }
            // Tightening x may invalidate values its other neighbors relied on
            for z in crossword.neighbors(&x) {
                if z != &y {
                    queue.push_back((*z, x));
                }
            }
        }
    }

    true
}
