//! Concurrent starts and progress updates against one store.

use std::sync::{Arc, Barrier};
use std::thread;

use uuid::Uuid;

use fitquest::gamification::lifecycle::LifecycleError;
use fitquest::gamification::types::ChallengeStatus;
use fitquest::gamification::{ChallengeManager, ManagerError};
use fitquest::storage::{ChallengeStore, SqliteChallengeStore};

#[test]
fn test_concurrent_increments_are_not_lost() {
    let store = SqliteChallengeStore::in_memory().unwrap();
    let user = Uuid::new_v4();
    // Target 30
    let challenge = ChallengeManager::new(store.clone())
        .start_challenge(user, "Mois de Fer")
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let manager = ChallengeManager::new(store.clone());
            let id = challenge.id;
            thread::spawn(move || {
                for _ in 0..5 {
                    manager.record_progress(id, 1.0).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stored = store.get_challenge(challenge.id).unwrap().unwrap();
    assert_eq!(stored.current, 20.0);
    assert_eq!(stored.status, ChallengeStatus::Active);
}

#[test]
fn test_racing_completion_stops_at_target() {
    let store = SqliteChallengeStore::in_memory().unwrap();
    // Target 4
    let challenge = ChallengeManager::new(store.clone())
        .start_challenge(Uuid::new_v4(), "Guerrier de la Semaine")
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = ChallengeManager::new(store.clone());
            let id = challenge.id;
            thread::spawn(move || manager.record_progress(id, 1.0))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }

    let stored = store.get_challenge(challenge.id).unwrap().unwrap();
    assert_eq!(stored.status, ChallengeStatus::Completed);
    assert_eq!(stored.current, 4.0);
    assert!(stored.completed_at.is_some());
}

#[test]
fn test_concurrent_starts_create_one_instance() {
    const THREADS: usize = 8;

    for _ in 0..20 {
        let store = SqliteChallengeStore::in_memory().unwrap();
        let user = Uuid::new_v4();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let manager = ChallengeManager::new(store.clone());
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    manager.start_challenge(user, "Première Séance")
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for rejected in results.iter().filter(|r| r.is_err()) {
            assert!(matches!(
                rejected,
                Err(ManagerError::Lifecycle(LifecycleError::AlreadyInProgress(_)))
            ));
        }

        let stored = store.fetch_challenges(user).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, ChallengeStatus::Active);
    }
}
