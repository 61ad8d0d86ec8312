//! Streaming top-N: a buffer of at most N+1 records, compacted (sort desc, truncate to N) whenever it fills.
//!
//! Right after a compaction the buffer is exactly the top N of everything seen so far; the next
//! compaction compares that against at most N newer records, so every emitted snapshot is the true
//! top N at the time it is sent. Once N records are held, every arrival triggers a compaction,
//! so each sort covers only N+1 records.
//!
//! Ties keep buffer order (stable sort): survivors of earlier compactions sit ahead of newer arrivals.

use crossbeam_channel::{Receiver, Sender};
use log::debug;
use std::thread::{self, JoinHandle};

use crate::utils::config::TOPN_INITIAL_CAPACITY;
use crate::{FileRecord, Snapshot};

/// Bounded top-N buffer.
#[derive(Debug)]
pub struct TopN {
    limit: usize,
    buf: Vec<FileRecord>,
    compactions: usize,
}

impl TopN {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            // Huge limits grow on demand instead of reserving N+1 slots up front.
            buf: Vec::with_capacity(limit.min(TOPN_INITIAL_CAPACITY) + 1),
            compactions: 0,
        }
    }

    /// Records currently held (≤ N between pushes).
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn compactions(&self) -> usize {
        self.compactions
    }

    /// Append one record. Returns a snapshot when this push filled the buffer to N+1 and compacted it.
    pub fn push(&mut self, record: FileRecord) -> Option<Snapshot> {
        self.buf.push(record);
        if self.buf.len() <= self.limit {
            return None;
        }
        self.compact();
        Some(self.buf.clone())
    }

    /// Final ranking once input has ended.
    pub fn finish(mut self) -> Snapshot {
        debug_assert!(self.buf.len() <= self.limit, "buffer left above limit");
        sort_desc(&mut self.buf);
        self.buf
    }

    fn compact(&mut self) {
        sort_desc(&mut self.buf);
        self.buf.truncate(self.limit);
        self.compactions += 1;
    }
}

/// Stable sort, largest first.
fn sort_desc(records: &mut [FileRecord]) {
    records.sort_by(|a, b| b.size.cmp(&a.size));
}

/// Consume `record_rx` until the walker closes it, sending each compaction's snapshot and then
/// the final one. Dropping `snapshot_tx` on return closes the snapshots queue.
pub fn run_aggregator(record_rx: Receiver<FileRecord>, snapshot_tx: Sender<Snapshot>, limit: usize) {
    let mut top = TopN::new(limit);
    let mut received = 0_usize;
    while let Ok(record) = record_rx.recv() {
        received += 1;
        if let Some(snapshot) = top.push(record)
            && snapshot_tx.send(snapshot).is_err()
        {
            debug!("aggregate: snapshots queue has no receiver, stopping");
            return;
        }
    }
    debug!(
        "aggregate: records queue closed after {} records, {} compactions",
        received,
        top.compactions()
    );
    if snapshot_tx.send(top.finish()).is_err() {
        debug!("aggregate: snapshots queue has no receiver, final snapshot dropped");
    }
}

/// Spawn the aggregator stage. It owns `snapshot_tx`.
pub fn spawn_aggregate_thread(
    record_rx: Receiver<FileRecord>,
    snapshot_tx: Sender<Snapshot>,
    limit: usize,
) -> JoinHandle<()> {
    thread::spawn(move || run_aggregator(record_rx, snapshot_tx, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn rec(name: &str, size: u64) -> FileRecord {
        FileRecord::new(name, size)
    }

    fn sizes(snapshot: &[FileRecord]) -> Vec<u64> {
        snapshot.iter().map(|r| r.size).collect()
    }

    /// Feed records through the real stage on a thread and collect every snapshot sent.
    fn run_stage(records: Vec<FileRecord>, limit: usize) -> Vec<Snapshot> {
        let (record_tx, record_rx) = bounded(0);
        let (snapshot_tx, snapshot_rx) = bounded(0);
        let handle = spawn_aggregate_thread(record_rx, snapshot_tx, limit);
        let feeder = thread::spawn(move || {
            for r in records {
                record_tx.send(r).unwrap();
            }
        });
        let snapshots: Vec<Snapshot> = snapshot_rx.iter().collect();
        feeder.join().unwrap();
        handle.join().unwrap();
        snapshots
    }

    #[test]
    fn test_push_below_limit_emits_nothing() {
        let mut top = TopN::new(3);
        assert!(top.push(rec("a", 1)).is_none());
        assert!(top.push(rec("b", 2)).is_none());
        assert!(top.push(rec("c", 3)).is_none());
        assert_eq!(top.len(), 3);
        assert_eq!(top.compactions(), 0);
    }

    #[test]
    fn test_push_at_limit_plus_one_compacts() {
        let mut top = TopN::new(3);
        for (i, s) in [10, 5, 8].into_iter().enumerate() {
            assert!(top.push(rec(&i.to_string(), s)).is_none());
        }
        let snap = top.push(rec("x", 1)).expect("compaction at N+1");
        assert_eq!(sizes(&snap), vec![10, 8, 5]);
        assert_eq!(top.len(), 3);
        assert_eq!(top.compactions(), 1);
    }

    #[test]
    fn test_scenario_a_final_top_three() {
        let mut top = TopN::new(3);
        for (i, s) in [10, 5, 8, 1, 20, 3].into_iter().enumerate() {
            let _ = top.push(rec(&format!("f{i}"), s));
        }
        assert_eq!(sizes(&top.finish()), vec![20, 10, 8]);
    }

    #[test]
    fn test_fewer_than_limit_sorted() {
        let mut top = TopN::new(5);
        top.push(rec("small", 2));
        top.push(rec("big", 9));
        let fin = top.finish();
        assert_eq!(sizes(&fin), vec![9, 2]);
        assert_eq!(fin[0].path, std::path::PathBuf::from("big"));
    }

    #[test]
    fn test_empty_input_empty_final() {
        assert!(TopN::new(4).finish().is_empty());
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let mut top = TopN::new(2);
        top.push(rec("first", 7));
        top.push(rec("second", 7));
        top.push(rec("third", 7));
        top.push(rec("fourth", 7));
        let fin = top.finish();
        let names: Vec<_> = fin.iter().map(|r| r.path.to_str().unwrap()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_every_snapshot_is_exact_top_n_so_far() {
        let input: Vec<u64> = vec![4, 17, 3, 3, 99, 0, 42, 8, 8, 15, 1, 23, 23, 7, 60, 5];
        let limit = 4;
        let mut top = TopN::new(limit);
        for (i, &s) in input.iter().enumerate() {
            if let Some(snap) = top.push(rec(&i.to_string(), s)) {
                let mut expected: Vec<u64> = input[..=i].to_vec();
                expected.sort_by(|a, b| b.cmp(a));
                expected.truncate(limit);
                assert_eq!(sizes(&snap), expected, "after {} records", i + 1);
            }
        }
    }

    #[test]
    fn test_order_independent_as_set() {
        let a: Vec<u64> = vec![5, 1, 9, 3, 7, 2, 8, 6, 4];
        let mut b = a.clone();
        b.reverse();
        let finish = |v: &[u64]| {
            let mut top = TopN::new(3);
            for (i, &s) in v.iter().enumerate() {
                let _ = top.push(rec(&i.to_string(), s));
            }
            sizes(&top.finish())
        };
        assert_eq!(finish(&a), finish(&b));
        assert_eq!(finish(&a), vec![9, 8, 7]);
    }

    #[test]
    fn test_huge_limit_keeps_everything() {
        let mut top = TopN::new(usize::MAX);
        assert!(top.push(rec("a", 3)).is_none());
        assert!(top.push(rec("b", 11)).is_none());
        assert_eq!(sizes(&top.finish()), vec![11, 3]);
    }

    #[test]
    fn test_stage_final_snapshot_is_last() {
        let records = [10, 5, 8, 1, 20, 3]
            .into_iter()
            .enumerate()
            .map(|(i, s)| rec(&i.to_string(), s))
            .collect();
        let snapshots = run_stage(records, 3);
        // Compactions at records 4, 5, 6, then the unconditional final one.
        assert_eq!(snapshots.len(), 4);
        assert_eq!(sizes(snapshots.last().unwrap()), vec![20, 10, 8]);
    }

    #[test]
    fn test_stage_no_records_sends_one_empty_snapshot() {
        let snapshots = run_stage(Vec::new(), 10);
        assert_eq!(snapshots.len(), 1);
        assert!(snapshots[0].is_empty());
    }
}
