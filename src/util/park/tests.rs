use super::Parker;
cfg_not_loom! {
use std::time::{Duration, Instant};

#[test]
fn unpark_from_other_thread() {
    static PARKER: Parker = Parker::new();
    std::thread::spawn(|| PARKER.unpark());
    unsafe { PARKER.park() };
}

#[test]
fn unpark_before_park() {
    let parker = Parker::new();
    parker.unpark();
    unsafe { parker.park() };
}

#[test]
fn deadline_expires() {
    let parker = Parker::new();
    let start = Instant::now();
    let notified = unsafe { parker.park_deadline(start + Duration::from_millis(20)) };
    assert!(!notified, "nobody unparked, the wait should time out.");
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn deadline_in_the_past_keeps_token() {
    let parker = Parker::new();
    parker.unpark();
    assert!(unsafe { parker.park_deadline(Instant::now()) });
}

#[test]
fn deadline_woken_early() {
    static PARKER: Parker = Parker::new();
    std::thread::spawn(|| {
        std::thread::sleep(Duration::from_millis(10));
        PARKER.unpark();
    });
    assert!(unsafe { PARKER.park_deadline(Instant::now() + Duration::from_secs(30)) });
}

#[test]
fn reusable_after_timeout() {
    let parker = Parker::new();
    assert!(!unsafe { parker.park_deadline(Instant::now() + Duration::from_millis(1)) });
    parker.unpark();
    unsafe { parker.park() };
}

}

cfg_loom! {

#[test]
fn unpark_from_other_thread() {
    loom::model::model(|| {
        let parker = loom::sync::Arc::new(Parker::new());
        let cloned = parker.clone();
        loom::thread::spawn(move || {
            cloned.unpark();
        });
        unsafe { parker.park() };
    });
}

#[test]
fn unpark_before_park() {
    loom::model::model(|| {
        let parker = Parker::new();
        parker.unpark();
        unsafe { parker.park() };
    });
}

#[test]
fn deadline_sees_earlier_unpark() {
    loom::model::model(|| {
        let parker = Parker::new();
        parker.unpark();
        assert!(unsafe { parker.park_deadline(std::time::Instant::now()) });
    });
}

}
