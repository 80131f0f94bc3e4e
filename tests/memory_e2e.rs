//! End-to-end exercises of the memory subsystem.
//!
//! These tests drive the stores the way an agent process does: background
//! producer threads pushing percepts while command-handler threads read,
//! record, promote, and snapshot.

use std::sync::Arc;
use std::thread;

use engram::{AgentMemory, BeliefPattern, Percept, PerceptBatch, PerceptPattern};
use tempfile::tempdir;

const PRODUCERS: usize = 4;
const OBJECTS: usize = 25;
const ROUNDS: usize = 20;

#[test]
fn concurrent_producers_and_readers_keep_indexes_consistent() {
    let memory = AgentMemory::new();

    let mut producers = Vec::new();
    for t in 0..PRODUCERS {
        let percepts = Arc::clone(memory.percepts());
        producers.push(thread::spawn(move || {
            for round in 0..ROUNDS {
                for i in 0..OBJECTS {
                    let id = format!("obj-{t}-{i}");
                    percepts
                        .upsert(Percept::new("position", id, vec![round.to_string()]))
                        .unwrap();
                }
            }
        }));
    }

    let reader = {
        let percepts = Arc::clone(memory.percepts());
        thread::spawn(move || {
            for _ in 0..200 {
                // Reads taken mid-stream must always be internally
                // consistent copies, whatever the producers are doing.
                let all = percepts
                    .search(&PerceptPattern::new().kind("position"))
                    .unwrap();
                assert!(all.len() <= PRODUCERS * OBJECTS);
                for percept in all {
                    assert_eq!(percept.kind, "position");
                    assert_eq!(percept.args.len(), 1);
                }
            }
        })
    };

    for handle in producers {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    assert_eq!(memory.percepts().len().unwrap(), PRODUCERS * OBJECTS);

    // Both lookup paths agree on every key, and every key holds the last
    // value its producer wrote.
    let last = (ROUNDS - 1).to_string();
    for t in 0..PRODUCERS {
        for i in 0..OBJECTS {
            let id = format!("obj-{t}-{i}");
            let by_object = memory
                .percepts()
                .search(&PerceptPattern::new().object(&id))
                .unwrap();
            assert_eq!(by_object.len(), 1);
            assert_eq!(by_object[0].args[0], last);

            let by_both = memory
                .percepts()
                .search(&PerceptPattern::new().kind("position").object(&id))
                .unwrap();
            assert_eq!(by_both, by_object);
        }
    }
}

#[test]
fn concurrent_belief_recording_never_loses_entries() {
    let memory = AgentMemory::new();

    let mut writers = Vec::new();
    for t in 0..PRODUCERS {
        let beliefs = Arc::clone(memory.beliefs());
        writers.push(thread::spawn(move || {
            for i in 0..100 {
                beliefs
                    .add("heard", vec![format!("writer-{t}"), i.to_string()])
                    .unwrap();
            }
        }));
    }
    for handle in writers {
        handle.join().unwrap();
    }

    assert_eq!(memory.beliefs().len().unwrap(), PRODUCERS * 100);
    for t in 0..PRODUCERS {
        let mine = memory
            .beliefs()
            .search(&BeliefPattern::new().name("heard").arg(format!("writer-{t}")))
            .unwrap();
        assert_eq!(mine.len(), 100);
    }
}

#[test]
fn observe_promote_save_restore_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("beliefs.json");

    let memory = AgentMemory::new();
    let percepts = memory.percept_recall();
    let beliefs = memory.belief_recall();

    // Live observation, including an overwrite at the same key.
    percepts.register("avatar", "u1", ["1", "2", "3"]).unwrap();
    percepts.register("avatar", "u1", ["4", "5", "6"]).unwrap();
    let batch = PerceptBatch::from(vec![
        Percept::new("name_of", "u1", vec!["Alice".to_string()]),
        Percept::new("region", "r1", vec!["Taygeta".to_string()]),
    ]);
    percepts.register_batch(batch).unwrap();

    // Promote everything known about u1 into durable memory.
    let promoted = percepts
        .remember_that(&PerceptPattern::new().object("u1"))
        .unwrap();
    assert_eq!(promoted, 2);
    beliefs.record("met", ["alice"]).unwrap();

    beliefs.save_to(&path).unwrap();

    // A fresh process restores the belief log; percepts start empty by
    // design.
    let fresh = AgentMemory::new();
    fresh.belief_recall().restore_from(&path).unwrap();

    assert_eq!(fresh.beliefs().len().unwrap(), 3);
    assert!(fresh.percepts().is_empty().unwrap());

    let rows = fresh
        .belief_recall()
        .recall_all(&BeliefPattern::new().name("percept").arg("avatar").arg("u1"))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][..5], ["percept", "avatar", "u1", "4", "5"]);

    assert!(fresh
        .belief_recall()
        .exists(&BeliefPattern::new().name("met").arg("alice"))
        .unwrap());
}
