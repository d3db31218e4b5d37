//! Transient highlights.

use std::{
  collections::BTreeMap,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
  thread::{self, JoinHandle},
  time::Duration,
};

use crate::selection::Selection;

/// Handle of a highlight, used to remove it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OverlayId(u64);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Overlay {
  pub sel: Selection,
  pub face: String,
}

#[derive(Debug, Default)]
struct OverlayTable {
  next_id: u64,
  active: BTreeMap<OverlayId, Overlay>,
}

/// Highlights currently shown over a buffer.
///
/// Cloning shares the same table, so that timers can remove what they were given.
#[derive(Clone, Debug, Default)]
pub struct Overlays {
  table: Arc<Mutex<OverlayTable>>,
}

impl Overlays {
  fn lock(&self) -> MutexGuard<'_, OverlayTable> {
    // a panicking timer cannot leave the table half-updated
    self.table.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn add(&self, sel: Selection, face: impl Into<String>) -> OverlayId {
    let mut table = self.lock();
    let id = OverlayId(table.next_id);
    table.next_id += 1;
    table.active.insert(
      id,
      Overlay {
        sel,
        face: face.into(),
      },
    );

    id
  }

  pub fn remove(&self, id: OverlayId) -> Option<Overlay> {
    self.lock().active.remove(&id)
  }

  /// Active highlights, oldest first.
  pub fn active(&self) -> Vec<Overlay> {
    self.lock().active.values().cloned().collect()
  }

  /// Show a highlight, and remove it after `duration` from a detached thread.
  ///
  /// The returned handle does not need to be joined.
  pub fn flash(&self, sel: Selection, face: impl Into<String>, duration: Duration) -> JoinHandle<()> {
    let id = self.add(sel, face);
    let overlays = self.clone();

    thread::spawn(move || {
      thread::sleep(duration);

      if overlays.remove(id).is_some() {
        log::trace!("flash {id:?} over {sel:?} removed");
      }
    })
  }
}
