#![cfg(test)]
//! This integration suite validates the framework on the classic textbook
//! client: a backward liveness analysis. The analyzed program is a three
//! block function whose middle block loops on itself:
//!
//! ```text
//! block 0:  v0 <- input()          (defines v0 and v2)
//!           v2 <- input()
//! block 1:  if v0 goto 1 else 2    (uses v0, loops on itself)
//! block 2:  return v2              (uses v2)
//! ```
//!
//! Running the engine backward (rooted at the exit block, accessors
//! swapped), the entry state of a block is its live-out set and its exit
//! state is its live-in set.
use absint::prelude::*;

/// One basic block of the analyzed program, reduced to what liveness cares
/// about: the variables it reads and the variables it writes.
struct Block {
    uses: &'static [&'static str],
    defs: &'static [&'static str]
}

/// The whole analyzed program: the blocks and the flow between them.
struct Program {
    blocks   : Vec<Block>,
    cfg_succs: Vec<Vec<usize>>,
    cfg_preds: Vec<Vec<usize>>
}

fn program() -> Program {
    Program {
        blocks: vec![
            Block { uses: &[],     defs: &["v0", "v2"] },
            Block { uses: &["v0"], defs: &[]           },
            Block { uses: &["v2"], defs: &[]           },
        ],
        cfg_succs: vec![vec![1], vec![1, 2], vec![]],
        cfg_preds: vec![vec![],  vec![0, 1], vec![1]]
    }
}

/// The transfer functions of liveness: kill the definitions, then revive
/// the uses.
struct Liveness<'a> {
    program: &'a Program
}
impl TransferFunctions<usize, PowersetDomain<&'static str>> for Liveness<'_> {
    fn analyze_node(&mut self, node: &usize, state: &mut PowersetDomain<&'static str>) {
        let block = &self.program.blocks[*node];
        for v in block.defs {
            state.remove(v);
        }
        for v in block.uses {
            state.add(*v);
        }
    }
}

fn set(items: &[&'static str]) -> PowersetDomain<&'static str> {
    items.iter().copied().collect()
}

#[test]
fn liveness_on_the_looping_three_block_program() {
    let program = program();
    // the analysis runs backward: its successors are the flow graph's
    // predecessors, and it is rooted at the exit block
    let succs = |n: &usize| program.cfg_preds[*n].clone();
    let preds = |n: &usize| program.cfg_succs[*n].clone();

    let mut engine = MonotonicFixpointIterator::new(
        2, succs, preds, Liveness { program: &program });
    // nothing lives past the return
    engine.run(PowersetDomain::empty());

    // block 2: live-in {v2}, live-out {}
    assert!(engine.entry_state_at(&2).equals(&set(&[])));
    assert!(engine.exit_state_at(&2).equals(&set(&["v2"])));
    // block 1: live-in = live-out = {v0, v2}
    assert!(engine.entry_state_at(&1).equals(&set(&["v0", "v2"])));
    assert!(engine.exit_state_at(&1).equals(&set(&["v0", "v2"])));
    // block 0: live-in {}, live-out {v0, v2}
    assert!(engine.entry_state_at(&0).equals(&set(&["v0", "v2"])));
    assert!(engine.exit_state_at(&0).equals(&set(&[])));
}

/// The very same analysis, this time over the dense bitset domain: the
/// variables are numbered v0 = 0, v1 = 1, v2 = 2.
struct DenseLiveness {
    uses: Vec<Vec<usize>>,
    defs: Vec<Vec<usize>>
}
impl TransferFunctions<usize, BitSetDomain> for DenseLiveness {
    fn analyze_node(&mut self, node: &usize, state: &mut BitSetDomain) {
        for v in &self.defs[*node] {
            state.remove(*v);
        }
        for v in &self.uses[*node] {
            state.add(*v);
        }
    }
}

#[test]
fn liveness_over_the_dense_bitset_domain() {
    let program  = program();
    let analyzer = DenseLiveness {
        uses: vec![vec![],     vec![0], vec![2]],
        defs: vec![vec![0, 2], vec![],  vec![]]
    };
    let succs = |n: &usize| program.cfg_preds[*n].clone();
    let preds = |n: &usize| program.cfg_succs[*n].clone();

    let mut engine = MonotonicFixpointIterator::new(2, succs, preds, analyzer);
    engine.run(BitSetDomain::empty(3));

    assert!(engine.exit_state_at(&2).equals(&BitSetDomain::with_members(3, &[2])));
    assert!(engine.entry_state_at(&1).equals(&BitSetDomain::with_members(3, &[0, 2])));
    assert!(engine.exit_state_at(&1).equals(&BitSetDomain::with_members(3, &[0, 2])));
    assert!(engine.entry_state_at(&0).equals(&BitSetDomain::with_members(3, &[0, 2])));
    assert!(engine.exit_state_at(&0).equals(&BitSetDomain::empty(3)));
}
