//! Checkpoint graph compaction.
//!
//! A waiting person sometimes leaves behind a checkpoint that contributes
//! nothing: its only outgoing edge is that same person's wait, landing on a
//! checkpoint of the same day. Such checkpoints are spliced out by pointing
//! their incoming edges at the successor.

use rustc_hash::FxHashMap;

use crate::log_debug;
use crate::logging::VERBOSITY_SILENT;

use super::checkpoint::{CheckpointGraph, CheckpointId, ExecutionKind};

/// Remove redundant person-wait checkpoints.
///
/// A checkpoint is removed when all of these hold:
/// - it has exactly one outgoing edge, a person-wait
/// - one of its incoming edges belongs to that person
/// - the wait lands on a checkpoint of the same day
///
/// Surviving checkpoints keep their ids, and no task's completion day changes.
pub fn optimize(graph: CheckpointGraph) -> CheckpointGraph {
    compact(graph, VERBOSITY_SILENT)
}

pub(crate) fn compact(graph: CheckpointGraph, verbosity: u8) -> CheckpointGraph {
    let CheckpointGraph {
        mut checkpoints,
        mut executions,
    } = graph;

    let positions: FxHashMap<CheckpointId, usize> = checkpoints
        .iter()
        .enumerate()
        .map(|(pos, c)| (c.id, pos))
        .collect();
    let mut removed = vec![false; checkpoints.len()];
    let mut dropped = vec![false; executions.len()];

    for pos in 0..checkpoints.len() {
        let checkpoint = &checkpoints[pos];
        let &[wait] = checkpoint.outgoing.as_slice() else {
            continue;
        };
        let wait_edge = &executions[wait];
        if wait_edge.kind() != ExecutionKind::PersonWait {
            continue;
        }
        let carries_person = checkpoint
            .incoming
            .iter()
            .any(|&e| executions[e].person_id == wait_edge.person_id);
        if !carries_person {
            continue;
        }
        let Some(&target) = positions.get(&wait_edge.to) else {
            continue;
        };
        if removed[target] || checkpoints[target].day != checkpoint.day {
            continue;
        }

        let (target_id, target_day) = (checkpoints[target].id, checkpoints[target].day);
        let incoming = std::mem::take(&mut checkpoints[pos].incoming);
        for &edge in &incoming {
            executions[edge].to = target_id;
            executions[edge].end_day = target_day;
        }
        let target_incoming = &mut checkpoints[target].incoming;
        target_incoming.retain(|&e| e != wait);
        target_incoming.extend(incoming);

        log_debug!(
            verbosity,
            "Splicing checkpoint {} into {}",
            checkpoints[pos].id,
            target_id
        );
        dropped[wait] = true;
        removed[pos] = true;
    }

    // Compact the execution arena and renumber edge references
    let mut remap = vec![usize::MAX; executions.len()];
    let mut kept_executions = Vec::with_capacity(executions.len());
    for (old, execution) in executions.into_iter().enumerate() {
        if !dropped[old] {
            remap[old] = kept_executions.len();
            kept_executions.push(execution);
        }
    }

    let kept_checkpoints = checkpoints
        .into_iter()
        .zip(removed)
        .filter(|(_, gone)| !gone)
        .map(|(mut checkpoint, _)| {
            checkpoint.incoming.retain(|&e| !dropped[e]);
            checkpoint.outgoing.retain(|&e| !dropped[e]);
            for edge in checkpoint.incoming.iter_mut().chain(checkpoint.outgoing.iter_mut()) {
                *edge = remap[*edge];
            }
            checkpoint
        })
        .collect();

    CheckpointGraph {
        checkpoints: kept_checkpoints,
        executions: kept_executions,
    }
}
