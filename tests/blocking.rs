// Two-thread harnesses with explicit checkpoints around the blocking points.

use boundq::MPMC::{BoundedQueue, Payload};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long a thread must stay parked before we call it blocked.
const BLOCKED: Duration = Duration::from_millis(200);
const WAKE: Duration = Duration::from_secs(5);

fn tag(n: u8) -> Payload {
    Payload::new(vec![n])
}

#[test]
fn capacity_one_push_waits_for_pop() {
    let queue = Arc::new(BoundedQueue::new(1).unwrap());
    queue.push(tag(1)).unwrap();

    let (pushed, pushed_rx) = mpsc::channel();
    let second = {
        let queue = queue.clone();
        thread::spawn(move || {
            queue.push(tag(2)).unwrap();
            pushed.send(()).unwrap();
        })
    };

    assert!(
        pushed_rx.recv_timeout(BLOCKED).is_err(),
        "second push completed on a full queue"
    );
    assert_eq!(queue.len(), 1);

    assert_eq!(queue.pop().unwrap().data(), &[1]);
    pushed_rx.recv_timeout(WAKE).expect("pop did not unblock the push");
    second.join().unwrap();

    assert_eq!(queue.pop().unwrap().data(), &[2]);
    assert!(queue.is_empty());
}

#[test]
fn pop_waits_for_push() {
    let queue = Arc::new(BoundedQueue::new(3).unwrap());

    let (popped, popped_rx) = mpsc::channel();
    let consumer = {
        let queue = queue.clone();
        thread::spawn(move || popped.send(queue.pop().unwrap().into_data()).unwrap())
    };

    assert!(
        popped_rx.recv_timeout(BLOCKED).is_err(),
        "pop returned from an empty queue"
    );

    queue.push(tag(42)).unwrap();
    assert_eq!(popped_rx.recv_timeout(WAKE).unwrap(), vec![42]);
    consumer.join().unwrap();
}

#[test]
fn full_queue_releases_exactly_one_push_per_pop() {
    const CAPACITY: usize = 5;
    let queue = Arc::new(BoundedQueue::new(CAPACITY).unwrap());

    for n in 0..CAPACITY as u8 {
        queue.push(tag(n)).unwrap();
    }
    assert_eq!(queue.len(), CAPACITY);

    let completed = Arc::new(AtomicUsize::new(0));
    let blocked: Vec<_> = (0..2u8)
        .map(|n| {
            let queue = queue.clone();
            let completed = completed.clone();
            thread::spawn(move || {
                queue.push(tag(100 + n)).unwrap();
                completed.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    thread::sleep(BLOCKED);
    assert_eq!(completed.load(Ordering::SeqCst), 0, "push on a full queue returned");

    // Start a consumer that takes a single payload.
    let first = queue.pop().unwrap();
    assert_eq!(first.data(), &[0]);

    let deadline = std::time::Instant::now() + WAKE;
    while completed.load(Ordering::SeqCst) == 0 && std::time::Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    thread::sleep(BLOCKED);
    assert_eq!(completed.load(Ordering::SeqCst), 1, "one pop must free one push");
    assert_eq!(queue.len(), CAPACITY);

    queue.pop().unwrap();
    for handle in blocked {
        handle.join().unwrap();
    }
    assert_eq!(completed.load(Ordering::SeqCst), 2);

    // Original payloads first, then the two late ones in some order.
    let rest: Vec<u8> = (0..CAPACITY).map(|_| queue.pop().unwrap().data()[0]).collect();
    assert_eq!(&rest[..3], &[2, 3, 4]);
    let mut late = rest[3..].to_vec();
    late.sort_unstable();
    assert_eq!(late, vec![100, 101]);
}

#[test]
fn waiting_consumers_each_get_a_distinct_payload() {
    let queue = Arc::new(BoundedQueue::new(2).unwrap());
    let (tx, rx) = mpsc::channel();

    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let queue = queue.clone();
            let tx = tx.clone();
            thread::spawn(move || tx.send(queue.pop().unwrap().data()[0]).unwrap())
        })
        .collect();

    thread::sleep(BLOCKED);
    for n in 1..=3 {
        queue.push(tag(n)).unwrap();
    }

    let mut got: Vec<u8> = (0..3).map(|_| rx.recv_timeout(WAKE).unwrap()).collect();
    got.sort_unstable();
    assert_eq!(got, vec![1, 2, 3]);
    for handle in consumers {
        handle.join().unwrap();
    }
}
