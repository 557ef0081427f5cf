use itertools::Itertools;
use log::{debug, trace};
use crate::tabular_dfa::{unique_name, TabularDfa};
use crate::{Map, Set};

/// Partition refinement over the reachable states.
///
/// Starts from {rejecting, accepting} and splits any block whose members
/// disagree on the blocks they reach, symbol by symbol, until a full pass
/// splits nothing. Merged blocks are named `{a,b,...}`, primed if that
/// name is already taken; singleton blocks keep their state's name.
pub(crate) fn minimise(table: &TabularDfa) -> TabularDfa {
  let reachable = table.reachable();
  let (accepting, rejecting): (Vec<_>, Vec<_>) = reachable.into_iter()
    .partition(|&state| table.accepting[state]);

  let mut blocks = vec![rejecting, accepting];
  blocks.retain(|block| !block.is_empty());

  let mut block_of = vec![usize::MAX; table.len()];
  for (i, block) in blocks.iter().enumerate() {
    for &state in block {
      block_of[state] = i;
    }
  }

  'refine: loop {
    for i in 0..blocks.len() {
      let mut groups: Map<Vec<usize>, Vec<usize>> = Map::new();
      for &state in &blocks[i] {
        let signature = table.row(state).iter()
          .map(|&next| block_of[next])
          .collect::<Vec<_>>();
        groups.entry(signature).or_default().push(state);
      }

      if groups.len() > 1 {
        trace!("split block {} into {} blocks", i, groups.len());
        let mut groups = groups.into_values();
        if let Some(first) = groups.next() {
          blocks[i] = first;
        }
        for group in groups {
          let j = blocks.len();
          for &state in &group {
            block_of[state] = j;
          }
          blocks.push(group);
        }
        continue 'refine;
      }
    }
    break;
  }

  debug!("minimised {} states into {} blocks", table.len(), blocks.len());

  let mut taken = blocks.iter()
    .filter_map(|block| match block.as_slice() {
      [state] => Some(table.names[*state].clone()),
      _ => None,
    })
    .collect::<Set<_>>();
  let names = blocks.iter()
    .map(|block| match block.as_slice() {
      [state] => table.names[*state].clone(),
      _ => {
        let names = block.iter().map(|&state| table.names[state].as_str()).sorted();
        let name = format!("{{{}}}", names.format(","));
        let name = unique_name(name, |name| taken.contains(name));
        taken.insert(name.clone());
        name
      }
    })
    .collect();
  let accepting = blocks.iter()
    .map(|block| block.iter().any(|&state| table.accepting[state]))
    .collect();
  let block_of = &block_of;
  let transitions = blocks.iter()
    .flat_map(|block| table.row(block[0]).iter().map(move |&next| block_of[next]))
    .collect();

  TabularDfa::from_parts(
    names,
    accepting,
    block_of[table.start],
    table.alphabet.clone(),
    transitions)
}
