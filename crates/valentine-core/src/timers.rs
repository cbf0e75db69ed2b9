//! Cancelable scheduled tasks driven by an external clock.
//!
//! Nothing here sleeps: the owner calls [`TimerQueue::advance`] from its frame
//! loop and acts on the returned payloads.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    due: f64,
    repeat: Option<Repeat>,
    task: T,
}

#[derive(Clone, Copy, Debug)]
struct Repeat {
    interval: f64,
    until: f64,
}

#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fire `task` once at `now + delay`.
    pub fn once(&mut self, now: f64, delay: f64, task: T) -> TimerId {
        let id = self.next_id();
        self.entries.push(Entry {
            id,
            due: now + delay.max(0.0),
            repeat: None,
            task,
        });
        id
    }

    /// Fire `task` every `interval` seconds until `window` seconds from `now`
    /// have elapsed; the entry removes itself afterwards.
    pub fn every(&mut self, now: f64, interval: f64, window: f64, task: T) -> TimerId {
        let id = self.next_id();
        let interval = interval.max(1e-3);
        self.entries.push(Entry {
            id,
            due: now + interval,
            repeat: Some(Repeat {
                interval,
                until: now + window.max(0.0),
            }),
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect every task due at or before `now`, in due-time order.
    /// Repeating tasks fire once per elapsed interval, never past their window.
    pub fn advance(&mut self, now: f64) -> Vec<T> {
        let mut fired: Vec<(f64, T)> = Vec::new();
        self.entries.retain_mut(|e| {
            while e.due <= now {
                match e.repeat {
                    Some(r) if e.due > r.until => return false,
                    Some(r) => {
                        fired.push((e.due, e.task.clone()));
                        e.due += r.interval;
                    }
                    None => {
                        fired.push((e.due, e.task.clone()));
                        return false;
                    }
                }
            }
            match e.repeat {
                Some(r) => e.due <= r.until,
                None => true,
            }
        });
        fired.sort_by(|a, b| a.0.total_cmp(&b.0));
        fired.into_iter().map(|(_, t)| t).collect()
    }
}
