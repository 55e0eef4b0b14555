use boundq::Core::{Semaphore, SemaphoreClosed};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const BLOCKED: Duration = Duration::from_millis(150);
const WAKE: Duration = Duration::from_secs(5);

#[test]
fn acquire_takes_initial_permits_without_blocking() {
    let sem = Semaphore::new(3);
    for _ in 0..3 {
        sem.acquire().unwrap();
    }
    assert_eq!(sem.available(), 0);
}

#[test]
fn acquire_blocks_until_release() {
    let sem = Arc::new(Semaphore::new(0));
    let (tx, rx) = mpsc::channel();

    let waiter = {
        let sem = sem.clone();
        thread::spawn(move || {
            sem.acquire().unwrap();
            tx.send(()).unwrap();
        })
    };

    assert!(rx.recv_timeout(BLOCKED).is_err(), "acquire returned with no permits");
    sem.release();
    rx.recv_timeout(WAKE).expect("release did not wake the waiter");
    waiter.join().unwrap();
    assert_eq!(sem.available(), 0);
}

#[test]
fn each_release_wakes_exactly_one_waiter() {
    let sem = Arc::new(Semaphore::new(0));
    let woken = Arc::new(AtomicUsize::new(0));

    let waiters: Vec<_> = (0..4)
        .map(|_| {
            let sem = sem.clone();
            let woken = woken.clone();
            thread::spawn(move || {
                if sem.acquire().is_ok() {
                    woken.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    thread::sleep(BLOCKED);
    assert_eq!(woken.load(Ordering::SeqCst), 0);

    sem.release();
    sem.release();
    thread::sleep(BLOCKED);
    assert_eq!(woken.load(Ordering::SeqCst), 2);

    sem.close();
    for waiter in waiters {
        waiter.join().unwrap();
    }
    assert_eq!(woken.load(Ordering::SeqCst), 2);
}

#[test]
fn close_wakes_blocked_waiters_with_error() {
    let sem = Arc::new(Semaphore::new(0));
    let (tx, rx) = mpsc::channel();

    for _ in 0..3 {
        let sem = sem.clone();
        let tx = tx.clone();
        thread::spawn(move || tx.send(sem.acquire()).unwrap());
    }

    thread::sleep(BLOCKED);
    assert!(sem.close());
    for _ in 0..3 {
        assert_eq!(rx.recv_timeout(WAKE).unwrap(), Err(SemaphoreClosed));
    }
}

#[test]
fn closed_semaphore_hands_out_remaining_permits() {
    let sem = Semaphore::new(2);
    sem.close();
    assert!(sem.acquire().is_ok());
    assert!(sem.acquire().is_ok());
    assert_eq!(sem.acquire(), Err(SemaphoreClosed));
}

#[test]
fn permits_are_conserved_under_contention() {
    let sem = Arc::new(Semaphore::new(8));
    let threads = 8;
    let rounds = 5_000;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let sem = sem.clone();
            thread::spawn(move || {
                for _ in 0..rounds {
                    sem.acquire().unwrap();
                    if fastrand::u8(..) == 0 {
                        thread::yield_now();
                    }
                    sem.release();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(sem.available(), 8);
}
