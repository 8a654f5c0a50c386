// Fixed-interval refresh: decides when to tick and runs one tick

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::collectors::{CollectError, Collector};
use crate::gui::components::InfoTable;
use crate::gui::theme::Theme;
use crate::models::{Category, CategorySnapshot};

/// Tracks when the next refresh is due.
#[derive(Clone, Debug)]
pub struct RefreshScheduler {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl RefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Returns true and records the tick when a refresh is due.
    /// The first poll is always due.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_tick = Some(now);
        }
        due
    }

    /// Time left until the next tick, zero when overdue.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }
}

/// The collectors and the table each of them feeds.
pub struct Dashboard {
    collectors: Vec<Box<dyn Collector>>,
    tables: [InfoTable; 4],
}

impl Dashboard {
    pub fn new(collectors: Vec<Box<dyn Collector>>) -> Self {
        Self {
            collectors,
            tables: Default::default(),
        }
    }

    /// Runs every collector in order, rendering each result before the next runs.
    /// A failing or panicking collector only affects its own table.
    pub fn refresh_all(&mut self, theme: &Theme) {
        for collector in self.collectors.iter_mut() {
            let category = collector.category();
            let snapshot = collect_isolated(collector.as_mut());
            self.tables[category.index()].populate(&snapshot, theme);
        }
    }

    pub fn table(&self, category: Category) -> &InfoTable {
        &self.tables[category.index()]
    }
}

fn collect_isolated(collector: &mut dyn Collector) -> CategorySnapshot {
    let category = collector.category();
    let result = panic::catch_unwind(AssertUnwindSafe(|| collector.collect()))
        .unwrap_or(Err(CollectError::Panicked(category)));

    match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(?category, error = %e, "collector failed");
            CategorySnapshot::unavailable(
                category,
                format!("{} Information", category.title()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type CallLog = Rc<RefCell<Vec<Category>>>;

    enum Behaviour {
        Rows(usize),
        Fail,
        Panic,
    }

    struct FakeCollector {
        category: Category,
        behaviour: Behaviour,
        log: CallLog,
    }

    impl Collector for FakeCollector {
        fn category(&self) -> Category {
            self.category
        }

        fn collect(&mut self) -> Result<CategorySnapshot, CollectError> {
            self.log.borrow_mut().push(self.category);
            match self.behaviour {
                Behaviour::Rows(n) => {
                    let mut s = CategorySnapshot::new(self.category);
                    s.push_header("Header");
                    for i in 0..n {
                        s.push(format!("row {i}"), "x");
                    }
                    Ok(s)
                }
                Behaviour::Fail => Err(CollectError::NoConnectedDisplays),
                Behaviour::Panic => panic!("sensor exploded"),
            }
        }
    }

    fn dashboard(behaviours: [Behaviour; 4]) -> (Dashboard, CallLog) {
        let log = CallLog::default();
        let collectors = Category::ALL
            .into_iter()
            .zip(behaviours)
            .map(|(category, behaviour)| {
                Box::new(FakeCollector {
                    category,
                    behaviour,
                    log: log.clone(),
                }) as Box<dyn Collector>
            })
            .collect();
        (Dashboard::new(collectors), log)
    }

    #[test]
    fn runs_collectors_in_fixed_order() {
        let (mut d, log) = dashboard([
            Behaviour::Rows(1),
            Behaviour::Rows(2),
            Behaviour::Rows(3),
            Behaviour::Rows(4),
        ]);
        d.refresh_all(&Theme::arc());

        assert_eq!(*log.borrow(), Category::ALL.to_vec());
        assert_eq!(d.table(Category::Cpu).rows().len(), 2);
        assert_eq!(d.table(Category::System).rows().len(), 5);
    }

    #[test]
    fn one_failure_does_not_block_the_others() {
        let (mut d, log) = dashboard([
            Behaviour::Panic,
            Behaviour::Rows(7),
            Behaviour::Fail,
            Behaviour::Rows(5),
        ]);
        d.refresh_all(&Theme::arc());

        assert_eq!(log.borrow().len(), 4);
        assert_eq!(d.table(Category::Ram).rows().len(), 8);
        assert_eq!(d.table(Category::System).rows().len(), 6);

        let cpu = d.table(Category::Cpu).rows();
        assert_eq!(cpu.len(), 1);
        assert_eq!(cpu[0].label, "CPU Information");
        assert_eq!(cpu[0].value, "Not available");

        let gpu = d.table(Category::Gpu).rows();
        assert_eq!(gpu.len(), 1);
        assert_eq!(gpu[0].label, "GPU Information");
    }

    #[test]
    fn repeated_ticks_do_not_grow_tables() {
        let (mut d, _) = dashboard([
            Behaviour::Rows(3),
            Behaviour::Rows(3),
            Behaviour::Rows(3),
            Behaviour::Rows(3),
        ]);
        let theme = Theme::arc();
        d.refresh_all(&theme);
        d.refresh_all(&theme);
        d.refresh_all(&theme);

        for c in Category::ALL {
            assert_eq!(d.table(c).rows().len(), 4);
        }
    }

    #[test]
    fn first_poll_is_due_then_waits_for_interval() {
        let start = Instant::now();
        let mut s = RefreshScheduler::new(Duration::from_millis(3000));

        assert!(s.poll(start));
        assert!(!s.poll(start + Duration::from_millis(2999)));
        assert_eq!(
            s.time_until_next(start + Duration::from_millis(1000)),
            Duration::from_millis(2000)
        );
        assert!(s.poll(start + Duration::from_millis(3000)));
        assert!(!s.poll(start + Duration::from_millis(3001)));
    }

    #[test]
    fn unpolled_scheduler_is_due_now() {
        let s = RefreshScheduler::new(Duration::from_secs(3));
        assert_eq!(s.time_until_next(Instant::now()), Duration::ZERO);
    }
}
