//! Calendar repository contract and in-memory implementation.

use crate::model::calendar::Calendar;
use crate::repo::memory::MemoryTable;
use crate::repo::RepoResult;

pub trait CalendarRepository: Send + Sync {
    fn list_calendars(&self) -> RepoResult<Vec<Calendar>>;
    fn get_calendar(&self, id: &str) -> RepoResult<Option<Calendar>>;
    fn create_calendar(&self, calendar: &Calendar) -> RepoResult<()>;
    fn update_calendar(&self, calendar: &Calendar) -> RepoResult<()>;
}

#[derive(Debug)]
pub struct InMemoryCalendarRepository {
    table: MemoryTable<Calendar>,
}

impl InMemoryCalendarRepository {
    pub fn seeded(calendars: Vec<Calendar>) -> Self {
        Self {
            table: MemoryTable::new(calendars),
        }
    }
}

impl CalendarRepository for InMemoryCalendarRepository {
    fn list_calendars(&self) -> RepoResult<Vec<Calendar>> {
        self.table.list()
    }

    fn get_calendar(&self, id: &str) -> RepoResult<Option<Calendar>> {
        self.table.get(id)
    }

    fn create_calendar(&self, calendar: &Calendar) -> RepoResult<()> {
        self.table.insert(calendar.clone())
    }

    fn update_calendar(&self, calendar: &Calendar) -> RepoResult<()> {
        self.table.replace(calendar.clone()).map(|_| ())
    }
}
