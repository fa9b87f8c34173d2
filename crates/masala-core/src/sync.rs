// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mutex helpers shared by the managers and API shims.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the guard if a previous holder panicked.
///
/// Every structure guarded this way is updated with single map or field
/// operations, so the data behind a poisoned lock is still consistent.
pub fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lock two mutexes of the same type in ascending address order.
///
/// Guards are returned in argument order. When both arguments are the same
/// mutex it is locked once and the second guard is `None`.
pub fn lock_pair<'a, T>(
    first: &'a Mutex<T>,
    second: &'a Mutex<T>,
) -> (MutexGuard<'a, T>, Option<MutexGuard<'a, T>>) {
    if std::ptr::eq(first, second) {
        return (lock(first), None);
    }
    let first_addr = first as *const Mutex<T> as usize;
    let second_addr = second as *const Mutex<T> as usize;
    if first_addr < second_addr {
        let a = lock(first);
        let b = lock(second);
        (a, Some(b))
    } else {
        let b = lock(second);
        let a = lock(first);
        (a, Some(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn lock_pair_same_mutex_locks_once() {
        let m = Mutex::new(3);
        let (a, b) = lock_pair(&m, &m);
        assert_eq!(*a, 3);
        assert!(b.is_none());
    }

    #[test]
    fn lock_pair_preserves_argument_order() {
        let x = Mutex::new("x");
        let y = Mutex::new("y");
        let (a, b) = lock_pair(&y, &x);
        assert_eq!(*a, "y");
        assert_eq!(*b.unwrap(), "x");
    }

    #[test]
    fn opposite_order_pairs_do_not_deadlock() {
        let left = Arc::new(Mutex::new(0u64));
        let right = Arc::new(Mutex::new(0u64));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let (l, r) = (Arc::clone(&left), Arc::clone(&right));
                thread::spawn(move || {
                    for _ in 0..2_000 {
                        let (mut a, b) = if i % 2 == 0 {
                            lock_pair(&*l, &*r)
                        } else {
                            lock_pair(&*r, &*l)
                        };
                        *a += 1;
                        if let Some(mut b) = b {
                            *b += 1;
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(*lock(&left), 8_000);
        assert_eq!(*lock(&right), 8_000);
    }

    #[test]
    fn lock_recovers_from_poison() {
        let m = Arc::new(Mutex::new(1));
        let poisoner = Arc::clone(&m);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join();
        assert!(m.is_poisoned());
        assert_eq!(*lock(&m), 1);
    }
}
