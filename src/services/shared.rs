use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::quilt::Quilt;

/// A quilt shared between threads.
///
/// Every operation runs under one lock, so edits from different threads are
/// serialized and a palette removal never interleaves with a paint stroke or
/// a gradient run.
#[derive(Debug, Clone, Default)]
pub struct SharedQuilt {
    inner: Arc<Mutex<Quilt>>,
}

impl SharedQuilt {
    pub fn new(quilt: Quilt) -> Self {
        Self {
            inner: Arc::new(Mutex::new(quilt)),
        }
    }

    /// Run `f` with exclusive access to the quilt.
    pub fn with<T>(&self, f: impl FnOnce(&mut Quilt) -> T) -> T {
        f(&mut self.lock())
    }

    /// Lock the quilt for several operations in a row.
    ///
    /// A panic in another holder does not leave the quilt half-written:
    /// every operation validates before mutating, so the poisoned value is
    /// still consistent and is handed out as-is.
    pub fn lock(&self) -> MutexGuard<'_, Quilt> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Quilt> for SharedQuilt {
    fn from(quilt: Quilt) -> Self {
        Self::new(quilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;
    use quilt_color::Srgb;
    use std::thread;

    #[test]
    fn test_concurrent_edits_are_serialized() {
        let mut quilt = Quilt::new(2.0, 20.0, 20.0, Unit::Inches);
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 1000).unwrap();
        let shared = SharedQuilt::new(quilt);
        let cols = shared.with(|q| q.cols());

        let handles: Vec<_> = (0..4)
            .map(|row| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for col in 0..cols {
                        shared.with(|q| q.paint(row, col, 0, red)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.with(|q| q.usage_count(red)), 4 * cols);
    }

    #[test]
    fn test_remove_color_while_painting() {
        let mut quilt = Quilt::new(2.0, 20.0, 20.0, Unit::Inches);
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 1000).unwrap();
        let shared = SharedQuilt::new(quilt);

        let painter = {
            let shared = shared.clone();
            thread::spawn(move || {
                for col in 0..5 {
                    // UnknownColor once the removal lands
                    let _ = shared.with(|q| q.paint(0, col, 0, red));
                }
            })
        };
        shared.with(|q| q.remove_color(red));
        painter.join().unwrap();

        // Whatever order the threads ran in, no cell may reference the
        // removed color.
        let quilt = shared.lock();
        assert!(!quilt.palette().contains(red));
        assert_eq!(quilt.usage_count(red), 0);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let shared = SharedQuilt::default();
        let clone = shared.clone();
        let _ = thread::spawn(move || {
            let _guard = clone.lock();
            panic!("boom");
        })
        .join();

        assert_eq!(shared.with(|q| q.cols()), 17);
    }
}
